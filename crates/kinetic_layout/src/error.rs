//! Layout error types

use kinetic_animation::AnimationError;
use thiserror::Error;

/// Errors that can occur while laying out or animating the page
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The layout engine rejected the tree
    #[error("layout engine error: {0}")]
    Taffy(#[from] taffy::TaffyError),

    /// A scroll offset string could not be parsed
    #[error("invalid scroll offset: {0:?}")]
    InvalidOffset(String),

    /// An animation could not be started
    #[error(transparent)]
    Animation(#[from] AnimationError),
}

/// Result type for kinetic_layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
