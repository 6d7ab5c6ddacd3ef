//! RGBA colors
//!
//! Colors are stored as normalized `f32` channels. Parsing accepts the CSS
//! notations used in motion targets: `#rgb`, `#rrggbb`, `#rrggbbaa`,
//! `rgb(...)` and `rgba(...)` (with an optional alpha on `rgb`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};

/// RGBA color with channels in 0.0..=1.0
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from 8-bit channels and a 0..1 alpha
    pub fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a.clamp(0.0, 1.0),
        )
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Channels as 8-bit values (alpha excluded)
    pub fn to_rgb8(&self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Linear interpolation between two colors
    pub fn lerp(a: &Color, b: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }

    /// Parse a CSS color string
    pub fn parse(input: &str) -> Result<Self> {
        let s = input.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ParseError::InvalidHex(input.to_string()));
        }

        let lower = s.to_ascii_lowercase();
        let args = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'));

        match args {
            Some(args) => parse_rgb_args(args)
                .ok_or_else(|| ParseError::InvalidColorFunction(input.to_string())),
            None => Err(ParseError::Unrecognized(input.to_string())),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_rgb8();
        let a = (self.a.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
        write!(f, "rgba({}, {}, {}, {})", r, g, b, a)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Color::rgba8(
            digit(0)? * 17,
            digit(1)? * 17,
            digit(2)? * 17,
            1.0,
        )),
        6 => Some(Color::rgba8(pair(0)?, pair(2)?, pair(4)?, 1.0)),
        8 => Some(Color::rgba8(
            pair(0)?,
            pair(2)?,
            pair(4)?,
            pair(6)? as f32 / 255.0,
        )),
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Color> {
    let parts: Vec<f32> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f32>().ok())
        .collect::<Option<Vec<_>>>()?;

    let channel = |v: f32| v.clamp(0.0, 255.0) / 255.0;
    match parts.as_slice() {
        [r, g, b] => Some(Color::rgb(channel(*r), channel(*g), channel(*b))),
        [r, g, b, a] => Some(Color::rgba(
            channel(*r),
            channel(*g),
            channel(*b),
            a.clamp(0.0, 1.0),
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let c = Color::parse("#059669").unwrap();
        assert_eq!(c.to_rgb8(), [0x05, 0x96, 0x69]);
        assert_eq!(c.a, 1.0);

        let short = Color::parse("#fff").unwrap();
        assert_eq!(short, Color::WHITE);
    }

    #[test]
    fn test_parse_rgb_with_alpha() {
        // rgb() with a fourth channel is accepted as alpha
        let c = Color::parse("rgb(252, 211, 77, 0)").unwrap();
        assert_eq!(c.to_rgb8(), [252, 211, 77]);
        assert_eq!(c.a, 0.0);

        let c = Color::parse("rgba(252, 211, 77, 1)").unwrap();
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Color::parse("#12345"),
            Err(ParseError::InvalidHex(_))
        ));
        assert!(matches!(
            Color::parse("rgb(1, 2)"),
            Err(ParseError::InvalidColorFunction(_))
        ));
        assert!(matches!(
            Color::parse("emerald"),
            Err(ParseError::Unrecognized(_))
        ));
    }

    #[test]
    fn test_lerp_clamps() {
        let a = Color::rgba(0.0, 0.0, 0.0, 0.0);
        let b = Color::rgba(1.0, 1.0, 1.0, 1.0);
        assert_eq!(Color::lerp(&a, &b, 2.0), b);
        let mid = Color::lerp(&a, &b, 0.5);
        assert!((mid.a - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_display() {
        let c = Color::rgba8(252, 211, 77, 0.5);
        assert_eq!(c.to_string(), "rgba(252, 211, 77, 0.5)");
    }
}
