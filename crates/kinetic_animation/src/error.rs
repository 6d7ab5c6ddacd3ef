//! Error types for kinetic_animation

use thiserror::Error;

use crate::scheduler::MotionValueId;

/// Errors raised while building or driving animations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// A keyframe track needs at least one value
    #[error("keyframe track has no values")]
    EmptyKeyframes,

    /// Explicit keyframe times must pair up with values
    #[error("keyframe times ({times}) do not match values ({values})")]
    TimesMismatch { values: usize, times: usize },

    /// Keyframe times must start at 0, end at 1 and never decrease
    #[error("keyframe times must ascend from 0.0 to 1.0: {0:?}")]
    InvalidTimes(Vec<f32>),

    /// One easing per segment was expected
    #[error("expected {expected} segment easings, got {got}")]
    EasingCountMismatch { expected: usize, got: usize },

    /// Input and output ranges of a transform differ in length
    #[error("input range has {input} stops but output range has {output}")]
    RangeLengthMismatch { input: usize, output: usize },

    /// A transform needs at least two stops
    #[error("range transform needs at least two stops, got {0}")]
    RangeTooShort(usize),

    /// Transform input stops must be strictly monotonic
    #[error("range transform input must be strictly monotonic: {0:?}")]
    RangeNotMonotonic(Vec<f32>),

    /// The motion value was removed or never existed
    #[error("unknown motion value {0:?}")]
    UnknownValue(MotionValueId),

    /// Textual value could not be parsed
    #[error(transparent)]
    Parse(#[from] kinetic_core::ParseError),
}

/// Result type for kinetic_animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
