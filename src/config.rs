//! Typed slider configuration.
//!
//! [`SliderConfig`] carries every styling and behavior attribute of a slider
//! as a plain field. It can be built with struct update syntax or loaded
//! from JSON:
//!
//! ```rust
//! use floem_touch_slider::{Orientation, SliderConfig};
//!
//! let bass = SliderConfig {
//!     name: "Bass".to_string(),
//!     orientation: Orientation::Vertical,
//!     min_value: -50.0,
//!     range: 100.0,
//!     format: "%.0f".to_string(),
//!     ..SliderConfig::default()
//! };
//! assert!(bass.validate().is_ok());
//! ```

use floem::peniko::Color;
use serde::{Deserialize, Serialize};

use crate::color::hex_serde;
use crate::constants;
use crate::format::{FormatError, NumberFormat};
use crate::state::Orientation;

/// Errors that can occur when loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse slider configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The value format string is not usable
    #[error("Invalid value format: {0}")]
    Format(#[from] FormatError),
}

/// All slider attributes except the value itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub name: String,
    pub orientation: Orientation,
    pub min_value: f64,
    /// Width of the domain; negative ranges are treated as 1.
    pub range: f64,
    /// printf-style value format, e.g. `"%.1f"`.
    pub format: String,
    #[serde(with = "hex_serde")]
    pub bar_background_color: Color,
    #[serde(with = "hex_serde")]
    pub bar_color: Color,
    #[serde(with = "hex_serde")]
    pub thumb_color: Color,
    #[serde(with = "hex_serde")]
    pub value_text_color: Color,
    #[serde(with = "hex_serde")]
    pub name_text_color: Color,
    #[serde(with = "hex_serde")]
    pub zero_color: Color,
    pub value_visible: bool,
    pub name_visible: bool,
    pub bar_background_filled: bool,
    pub show_zero: bool,
    pub start_from_zero: bool,
    pub snap_to_zero: bool,
    pub return_to_zero: bool,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            orientation: Orientation::Horizontal,
            min_value: 0.0,
            range: 1.0,
            format: constants::DEFAULT_FORMAT.to_string(),
            bar_background_color: constants::DEFAULT_BAR_BACKGROUND,
            bar_color: constants::DEFAULT_BAR,
            thumb_color: constants::DEFAULT_THUMB,
            value_text_color: constants::DEFAULT_VALUE_TEXT,
            name_text_color: constants::DEFAULT_NAME_TEXT,
            zero_color: constants::DEFAULT_ZERO,
            value_visible: true,
            name_visible: true,
            bar_background_filled: true,
            show_zero: true,
            start_from_zero: false,
            snap_to_zero: false,
            return_to_zero: false,
        }
    }
}

impl SliderConfig {
    /// Parse and validate a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the format string parses.
    pub fn validate(&self) -> Result<(), FormatError> {
        NumberFormat::parse(&self.format).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() {
        let config = SliderConfig::from_json(
            r##"{
                "name": "Treble",
                "orientation": "vertical",
                "min_value": -100,
                "range": 200,
                "bar_color": "#323296",
                "snap_to_zero": true
            }"##,
        )
        .unwrap();
        assert_eq!(config.name, "Treble");
        assert_eq!(config.orientation, Orientation::Vertical);
        assert_eq!(config.min_value, -100.0);
        assert_eq!(config.bar_color, Color::rgb8(50, 50, 150));
        assert!(config.snap_to_zero);
        assert_eq!(config.format, "%.1f");
        assert_eq!(config.thumb_color, constants::DEFAULT_THUMB);
    }

    #[test]
    fn invalid_color_is_a_parse_error() {
        let err = SliderConfig::from_json(r#"{ "bar_color": "blue" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_format_is_rejected() {
        let err = SliderConfig::from_json(r#"{ "format": "%d" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Format(_)));
    }

    #[test]
    fn oversized_precision_is_rejected() {
        let err = SliderConfig::from_json(r#"{ "format": "%.70000f" }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Format(FormatError::OutOfRange(_))
        ));
    }

    #[test]
    fn json_round_trip() {
        let config = SliderConfig {
            name: "Volume".into(),
            bar_background_color: Color::rgba8(50, 50, 50, 128),
            ..SliderConfig::default()
        };
        let json = config.to_json().unwrap();
        assert!(json.contains("\"#32323280\""));
        assert_eq!(SliderConfig::from_json(&json).unwrap(), config);
    }
}
