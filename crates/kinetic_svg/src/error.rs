//! SVG error types

use thiserror::Error;

/// Errors that can occur when loading SVG path data
#[derive(Error, Debug)]
pub enum SvgError {
    /// SVG parsing error
    #[error("SVG parsing error: {0}")]
    Parse(String),

    /// The document contains no drawable path
    #[error("SVG contains no path geometry")]
    EmptyPath,
}

/// Result type for kinetic_svg operations
pub type Result<T> = std::result::Result<T, SvgError>;
