/// Convenience result type used across keylcd.
pub type KeylcdResult<T> = Result<T, KeylcdError>;

/// Top-level error taxonomy used by engine and driver APIs.
///
/// Hook failures and structural lookup misses are deliberately *not* part of
/// this taxonomy: they are logged warnings and the render pass continues.
#[derive(thiserror::Error, Debug)]
pub enum KeylcdError {
    /// A required template or script resource is missing. Fatal at theme
    /// construction time.
    #[error("resource error: {0}")]
    Resource(String),

    /// Driver surface violations: buffer-size mismatch, write while
    /// disconnected, socket failures.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Malformed template text after substitution.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KeylcdError {
    /// Build a [`KeylcdError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`KeylcdError::Protocol`] value.
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Build a [`KeylcdError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`KeylcdError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
