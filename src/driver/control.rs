use crate::foundation::error::{KeylcdError, KeylcdResult};

bitflags::bitflags! {
    /// Display hints describing how a control is presented and used.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
    pub struct ControlHint: u32 {
        /// Value can be dimmed gradually.
        const DIMMABLE = 1 << 0;
        /// Value can be shaded/faded by the idle handler.
        const SHADEABLE = 1 << 1;
        /// Supplies the theme's default foreground fill.
        const FOREGROUND = 1 << 2;
        /// Supplies the theme's default background fill.
        const BACKGROUND = 1 << 3;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Value carried by a [`Control`].
pub enum ControlValue {
    /// RGB color triple.
    Color(u8, u8, u8),
    /// Scalar setting, bounded by the control's range when present.
    Scalar(i32),
}

impl ControlValue {
    /// Color triple, if this is a color value.
    pub fn color(&self) -> Option<(u8, u8, u8)> {
        match self {
            ControlValue::Color(r, g, b) => Some((*r, *g, *b)),
            ControlValue::Scalar(_) => None,
        }
    }

    /// `#rrggbb` form of a color value.
    pub fn as_hex_rgb(&self) -> Option<String> {
        self.color().map(|(r, g, b)| format!("#{r:02x}{g:02x}{b:02x}"))
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A named, typed device setting (backlight color, brightness, default
/// foreground/background) created at driver construction and mutated by
/// user preference changes.
pub struct Control {
    /// Stable identifier used for persistence.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Current value.
    pub value: ControlValue,
    /// Inclusive lower bound for scalar values.
    pub min: Option<i32>,
    /// Inclusive upper bound for scalar values.
    pub max: Option<i32>,
    /// Presentation hints.
    pub hint: ControlHint,
}

impl Control {
    /// Color control with hints.
    pub fn color(id: &str, name: &str, rgb: (u8, u8, u8), hint: ControlHint) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            value: ControlValue::Color(rgb.0, rgb.1, rgb.2),
            min: None,
            max: None,
            hint,
        }
    }

    /// Bounded scalar control with hints.
    pub fn scalar(id: &str, name: &str, value: i32, min: i32, max: i32, hint: ControlHint) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            value: ControlValue::Scalar(value),
            min: Some(min),
            max: Some(max),
            hint,
        }
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Ordered collection of a driver's controls.
pub struct ControlSet {
    controls: Vec<Control>,
}

impl ControlSet {
    /// Wrap a list of controls.
    pub fn new(controls: Vec<Control>) -> Self {
        Self { controls }
    }

    /// The default control set for the supported device: keyboard backlight
    /// color, LCD brightness, default foreground and background.
    pub fn device_defaults() -> Self {
        Self::new(vec![
            Control::color(
                "backlight_colour",
                "Keyboard Backlight Colour",
                (0, 0, 0),
                ControlHint::DIMMABLE | ControlHint::SHADEABLE,
            ),
            Control::scalar(
                "lcd_brightness",
                "LCD Brightness",
                100,
                0,
                100,
                ControlHint::SHADEABLE,
            ),
            Control::color(
                "foreground",
                "Default LCD Foreground",
                (255, 255, 255),
                ControlHint::FOREGROUND,
            ),
            Control::color(
                "background",
                "Default LCD Background",
                (0, 0, 0),
                ControlHint::BACKGROUND,
            ),
        ])
    }

    /// All controls in order.
    pub fn iter(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter()
    }

    /// Control by id.
    pub fn get(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id == id)
    }

    /// First control carrying the given hint.
    pub fn for_hint(&self, hint: ControlHint) -> Option<&Control> {
        self.controls.iter().find(|c| c.hint.contains(hint))
    }

    /// Update a control's value, clamping scalars into the declared range.
    pub fn set_value(&mut self, id: &str, value: ControlValue) -> KeylcdResult<()> {
        let control = self
            .controls
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| KeylcdError::validation(format!("unknown control '{id}'")))?;
        control.value = match (value, control.min, control.max) {
            (ControlValue::Scalar(v), Some(min), Some(max)) => {
                ControlValue::Scalar(v.clamp(min, max))
            }
            (v, _, _) => v,
        };
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/control.rs"]
mod tests;
