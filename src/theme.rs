use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const LIGHT_GRAY: Self = Self::new(0xaa, 0xaa, 0xaa);
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let hex = input.strip_prefix('#').unwrap_or(input);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ColorError::InvalidHex(input.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorError::InvalidHex(input.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let input = String::deserialize(deserializer)?;
        input.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing colors
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid color '{0}': expected '#rrggbb'")]
    InvalidHex(String),
}

/// Fill colors for the two waves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaveTheme {
    /// The leading wave, drawn first.
    pub top: Color,
    /// The trailing wave, drawn over the top one.
    pub bottom: Color,
}

impl Default for WaveTheme {
    fn default() -> Self {
        Self { top: Color::LIGHT_GRAY, bottom: Color::WHITE }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#000000", Color::new(0, 0, 0))]
    #[case("#ff8000", Color::new(255, 128, 0))]
    #[case("AaBbCc", Color::new(0xaa, 0xbb, 0xcc))]
    fn parse(#[case] input: &str, #[case] expected: Color) {
        assert_eq!(input.parse::<Color>(), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("#fff")]
    #[case("#gg0000")]
    #[case("#ff00001")]
    #[case("#ééé")]
    fn invalid(#[case] input: &str) {
        assert_eq!(input.parse::<Color>(), Err(ColorError::InvalidHex(input.to_string())));
    }

    #[test]
    fn display() {
        assert_eq!(Color::new(1, 2, 255).to_string(), "#0102ff");
    }

    #[test]
    fn default_theme() {
        let theme = WaveTheme::default();
        assert_eq!(theme.top.to_string(), "#aaaaaa");
        assert_eq!(theme.bottom.to_string(), "#ffffff");
    }
}
