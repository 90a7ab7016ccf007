//! Hex color parsing and formatting for slider configuration.
//!
//! Colors are stored as [`Color`] (8-bit RGBA). The configuration layer
//! reads and writes them as hex strings.

use floem::peniko::Color;

/// Parse a hex string (with or without `#`, 3, 6, or 8 chars).
///
/// 8-char hex is interpreted as RRGGBBAA. 3 and 6-char hex default to full opacity.
pub fn parse_hex(hex: &str) -> Option<Color> {
    let stripped = hex.trim().trim_start_matches('#');
    if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&stripped[range], 16).ok();
    match stripped.len() {
        3 => {
            let r = channel(0..1)?;
            let g = channel(1..2)?;
            let b = channel(2..3)?;
            Some(Color::rgb8(r * 17, g * 17, b * 17))
        }
        6 => Some(Color::rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        8 => Some(Color::rgba8(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        )),
        _ => None,
    }
}

/// Format as uppercase hex with a `#` prefix.
///
/// Returns `#RRGGBB` for opaque colors and `#RRGGBBAA` otherwise.
pub fn to_hex(color: Color) -> String {
    if color.a == 255 {
        format!("#{:02X}{:02X}{:02X}", color.r, color.g, color.b)
    } else {
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            color.r, color.g, color.b, color.a
        )
    }
}

/// Serde adapter storing a [`Color`] as a hex string.
pub(crate) mod hex_serde {
    use floem::peniko::Color;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hex(&raw).ok_or_else(|| D::Error::custom(format!("invalid hex color `{raw}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_lengths() {
        assert_eq!(parse_hex("#fff"), Some(Color::rgb8(255, 255, 255)));
        assert_eq!(parse_hex("3B82F6"), Some(Color::rgb8(0x3B, 0x82, 0xF6)));
        assert_eq!(
            parse_hex("#0000FF4D"),
            Some(Color::rgba8(0, 0, 255, 0x4D))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_hex("#12"), None);
        assert_eq!(parse_hex("zzzzzz"), None);
        assert_eq!(parse_hex(""), None);
    }

    #[test]
    fn alpha_only_emitted_when_translucent() {
        assert_eq!(to_hex(Color::rgb8(50, 50, 150)), "#323296");
        assert_eq!(to_hex(Color::rgba8(50, 50, 50, 128)), "#32323280");
    }
}
