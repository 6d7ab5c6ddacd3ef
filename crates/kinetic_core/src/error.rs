//! Error types for kinetic_core

use thiserror::Error;

/// Errors produced when parsing textual style values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Hex color with an unsupported digit count or non-hex digits
    #[error("invalid hex color: {0}")]
    InvalidHex(String),

    /// Functional color notation that could not be read
    #[error("invalid color function: {0}")]
    InvalidColorFunction(String),

    /// Number that could not be parsed
    #[error("invalid number: {0}")]
    InvalidNumber(String),

    /// Input that matches no known syntax
    #[error("unrecognized value: {0}")]
    Unrecognized(String),
}

/// Result type for kinetic_core parsing
pub type Result<T> = std::result::Result<T, ParseError>;
