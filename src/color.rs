//! Color values and the fixed symbol palettes
//!
//! Colors are accepted either as a small set of CSS-style names or as raw
//! `#rrggbb` values. The foreground and background palettes used by
//! `randomize_colors` are immutable configuration, never mutated at runtime.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque sRGB color value renderable by the symbol renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// `#000000`
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    /// `#ff0000`
    pub const RED: Color = Color::new(0xff, 0x00, 0x00);
    /// `#0000ff`
    pub const BLUE: Color = Color::new(0x00, 0x00, 0xff);
    /// `#008000`
    pub const GREEN: Color = Color::new(0x00, 0x80, 0x00);
    /// `#ffffff`
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    /// `#ffc0cb`
    pub const PINK: Color = Color::new(0xff, 0xc0, 0xcb);
    /// `#ffff00`
    pub const YELLOW: Color = Color::new(0xff, 0xff, 0x00);
    /// `#e6e6fa`
    pub const LAVENDER: Color = Color::new(0xe6, 0xe6, 0xfa);
    /// `#f0fff0`
    pub const HONEYDEW: Color = Color::new(0xf0, 0xff, 0xf0);

    /// Create a color from raw channel values
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to an opaque RGBA pixel for the image renderer
    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 0xff])
    }
}

/// Default foreground (dark module) palette for randomized colors
pub const FOREGROUND_PALETTE: [Color; 4] =
    [Color::BLACK, Color::RED, Color::BLUE, Color::GREEN];

/// Default background (light module) palette for randomized colors
pub const BACKGROUND_PALETTE: [Color; 5] = [
    Color::WHITE,
    Color::PINK,
    Color::YELLOW,
    Color::LAVENDER,
    Color::HONEYDEW,
];

impl FromStr for Color {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "black" => return Ok(Color::BLACK),
            "red" => return Ok(Color::RED),
            "blue" => return Ok(Color::BLUE),
            "green" => return Ok(Color::GREEN),
            "white" => return Ok(Color::WHITE),
            "pink" => return Ok(Color::PINK),
            "yellow" => return Ok(Color::YELLOW),
            "lavender" => return Ok(Color::LAVENDER),
            "honeydew" => return Ok(Color::HONEYDEW),
            _ => {}
        }

        let hex = trimmed.strip_prefix('#').ok_or_else(|| {
            Error::Color(format!(
                "Unknown color '{trimmed}', expected a palette name or #rrggbb"
            ))
        })?;
        if hex.len() != 6 {
            return Err(Error::Color(format!(
                "Invalid hex color '#{hex}', expected exactly six hex digits"
            )));
        }

        let parse_channel = |s: &str| {
            u8::from_str_radix(s, 16)
                .map_err(|e| Error::Color(format!("Invalid hex color '#{hex}': {e}")))
        };
        Ok(Color::new(
            parse_channel(&hex[0..2])?,
            parse_channel(&hex[2..4])?,
            parse_channel(&hex[4..6])?,
        ))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_palette_names_case_insensitively() {
        assert_eq!("Black".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!("HONEYDEW".parse::<Color>().unwrap(), Color::HONEYDEW);
        assert_eq!(" lavender ".parse::<Color>().unwrap(), Color::LAVENDER);
    }

    #[test]
    fn parses_hex_values() {
        assert_eq!(
            "#1a2b3c".parse::<Color>().unwrap(),
            Color::new(0x1a, 0x2b, 0x3c)
        );
    }

    #[test]
    fn rejects_unknown_names_and_bad_hex() {
        assert!("chartreuse".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
    }

    #[test]
    fn displays_as_lowercase_hex() {
        assert_eq!(Color::PINK.to_string(), "#ffc0cb");
    }

    #[test]
    fn round_trips_through_serde_string() {
        let json = serde_json::to_string(&Color::GREEN).unwrap();
        assert_eq!(json, "\"#008000\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::GREEN);
    }
}
