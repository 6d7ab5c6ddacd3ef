//! Animatable value types
//!
//! Provides the `Interpolate` trait and the `Value` enum carried by motion
//! values: plain numbers, percentages and colors.

use std::fmt;
use std::str::FromStr;

use kinetic_core::{Color, ParseError};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal (for settling detection)
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

// ============================================================================
// Color Implementation
// ============================================================================

impl Interpolate for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Color::lerp(self, other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.r - other.r).abs() < epsilon
            && (self.g - other.g).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
            && (self.a - other.a).abs() < epsilon
    }
}

// ============================================================================
// Motion Value
// ============================================================================

/// A value a motion property can hold
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// Unitless number or pixels (opacity, x, scale, rotate degrees)
    Number(f32),
    /// Percentage, stored as the percent figure (`-100%` is `Percent(-100.0)`)
    Percent(f32),
    Color(Color),
}

impl Value {
    /// Numeric component of numbers and percentages
    pub fn scalar(&self) -> Option<f32> {
        match *self {
            Value::Number(v) | Value::Percent(v) => Some(v),
            Value::Color(_) => None,
        }
    }

    /// Same unit as self, with a new numeric component
    ///
    /// Colors have no numeric component and are returned unchanged.
    pub fn with_scalar(&self, v: f32) -> Value {
        match self {
            Value::Number(_) => Value::Number(v),
            Value::Percent(_) => Value::Percent(v),
            Value::Color(c) => Value::Color(*c),
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match *self {
            Value::Color(c) => Some(c),
            _ => None,
        }
    }

    /// Parse `12.5`, `-100%`, or any CSS color accepted by `Color::parse`
    pub fn parse(input: &str) -> Result<Value, ParseError> {
        let s = input.trim();
        if let Some(percent) = s.strip_suffix('%') {
            return percent
                .trim()
                .parse::<f32>()
                .map(Value::Percent)
                .map_err(|_| ParseError::InvalidNumber(input.to_string()));
        }
        if let Ok(v) = s.parse::<f32>() {
            return Ok(Value::Number(v));
        }
        Color::parse(s).map(Value::Color)
    }
}

impl Interpolate for Value {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Value::Number(Interpolate::lerp(a, b, t)),
            (Value::Percent(a), Value::Percent(b)) => Value::Percent(Interpolate::lerp(a, b, t)),
            (Value::Color(a), Value::Color(b)) => Value::Color(Interpolate::lerp(a, b, t)),
            // Mixed units cannot blend
            _ => {
                if t < 0.5 {
                    *self
                } else {
                    *other
                }
            }
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) | (Value::Percent(a), Value::Percent(b)) => {
                a.approx_eq(b, epsilon)
            }
            (Value::Color(a), Value::Color(b)) => a.approx_eq(b, epsilon),
            _ => false,
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Number(v)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Value::parse(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{}", v),
            Value::Percent(v) => write!(f, "{}%", v),
            Value::Color(c) => write!(f, "{}", c),
        }
    }
}
