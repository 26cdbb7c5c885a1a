use std::path::{Path, PathBuf};

use crate::foundation::error::{KeylcdError, KeylcdResult};

/// Resolve a theme resource inside `dir` for a device model and optional
/// theme variant.
///
/// Tries `<prefix><model>-<variant>.<ext>` first, then falls back to
/// `<prefix>default-<variant>.<ext>`. When `required`, absence of both is a
/// fatal [`KeylcdError::Resource`]; otherwise `Ok(None)` means the optional
/// resource is simply not present.
pub fn resolve_variant_path(
    dir: &Path,
    prefix: &str,
    model: &str,
    variant: Option<&str>,
    extension: &str,
    required: bool,
) -> KeylcdResult<Option<PathBuf>> {
    let variant_suffix = match variant {
        Some(v) if !v.is_empty() => format!("-{v}"),
        _ => String::new(),
    };

    let model_path = dir.join(format!("{prefix}{model}{variant_suffix}.{extension}"));
    if model_path.exists() {
        return Ok(Some(model_path));
    }
    let default_path = dir.join(format!("{prefix}default{variant_suffix}.{extension}"));
    if default_path.exists() {
        return Ok(Some(default_path));
    }

    if required {
        Err(KeylcdError::resource(format!(
            "no .{extension} resource for model '{model}' (variant {variant:?}) in '{}'",
            dir.display()
        )))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/resources.rs"]
mod tests;
