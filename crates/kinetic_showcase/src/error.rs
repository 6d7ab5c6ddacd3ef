//! Showcase error types

use std::path::PathBuf;

use kinetic_animation::AnimationError;
use kinetic_layout::LayoutError;
use kinetic_svg::SvgError;
use thiserror::Error;

/// Errors that can occur while building or driving the showcase page
#[derive(Error, Debug)]
pub enum ShowcaseError {
    /// Layout or element animation error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Animation error outside an element (transforms, keyframes)
    #[error(transparent)]
    Animation(#[from] AnimationError),

    /// Icon path could not be loaded
    #[error("icon error: {0}")]
    Svg(#[from] SvgError),

    /// Config file could not be read
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the showcase
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Viewport dimensions must be positive
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    /// A config value is out of range
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The layout is missing a node the page needs
    #[error("layout has no {0} node")]
    MissingNode(String),
}

/// Result type for kinetic_showcase operations
pub type Result<T> = std::result::Result<T, ShowcaseError>;
