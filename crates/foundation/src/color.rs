//! RGBA colors parsed from CSS-style strings.
//!
//! Supported syntaxes: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`,
//! `rgb(r, g, b)` and `rgba(r, g, b, a)` with 0-255 channels and a 0-1 alpha.

use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
    #[error("invalid rgb()/rgba() color: {0}")]
    InvalidFunction(String),
    #[error("unsupported color syntax: {0}")]
    Unsupported(String),
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn as_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(s.to_string()));
        }

        let lower = s.to_ascii_lowercase();
        if let Some(body) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_function(body)
                .ok_or_else(|| ColorParseError::InvalidFunction(s.to_string()));
        }

        Err(ColorParseError::Unsupported(s.to_string()))
    }

    /// Parse `input`, falling back to `fallback` when the string is not a
    /// supported color.
    pub fn parse_or(input: &str, fallback: Color) -> Color {
        Self::parse(input).unwrap_or(fallback)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    let (r, g, b, a) = match hex.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
        4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return None,
    };
    Some(Color::from_rgb8(r, g, b).with_alpha(a as f32 / 255.0))
}

fn parse_function(body: &str) -> Option<Color> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let mut channels = [0.0f32; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        let v: f32 = part.parse().ok()?;
        if !v.is_finite() {
            return None;
        }
        *slot = v.clamp(0.0, 255.0) / 255.0;
    }

    let alpha = match parts.get(3) {
        Some(part) => {
            let v: f32 = part.parse().ok()?;
            if !v.is_finite() {
                return None;
            }
            v.clamp(0.0, 1.0)
        }
        None => 1.0,
    };

    Some(Color::rgba(channels[0], channels[1], channels[2], alpha))
}

#[cfg(test)]
mod tests {
    use super::{Color, ColorParseError};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Color::parse("#ff0000").unwrap(), Color::rgba(1.0, 0.0, 0.0, 1.0));
        assert_eq!(Color::parse("#0f0").unwrap(), Color::rgba(0.0, 1.0, 0.0, 1.0));
        assert_eq!(Color::parse("#00000000").unwrap().a, 0.0);
    }

    #[test]
    fn parses_rgb_and_rgba_functions() {
        assert_eq!(
            Color::parse("rgb(255, 0, 255)").unwrap(),
            Color::rgba(1.0, 0.0, 1.0, 1.0)
        );
        let c = Color::parse("rgba(255,255,255,0.7)").unwrap();
        assert_eq!(c, Color::rgba(1.0, 1.0, 1.0, 0.7));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Color::parse("   "), Err(ColorParseError::Empty));
        assert!(matches!(
            Color::parse("#12345"),
            Err(ColorParseError::InvalidHex(_))
        ));
        assert!(matches!(
            Color::parse("rgb(1,2)"),
            Err(ColorParseError::InvalidFunction(_))
        ));
        assert!(matches!(
            Color::parse("hsl(10, 20%, 30%)"),
            Err(ColorParseError::Unsupported(_))
        ));
    }

    #[test]
    fn parse_or_falls_back() {
        assert_eq!(Color::parse_or("nope", Color::WHITE), Color::WHITE);
    }
}
