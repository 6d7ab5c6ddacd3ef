//! Range transforms
//!
//! Maps an input value (typically scroll progress) through piecewise-linear
//! segments onto output values:
//!
//! ```rust
//! use kinetic_animation::{RangeTransform, Value};
//!
//! let slide = RangeTransform::new(&[0.0, 1.0], vec![Value::Percent(-100.0), Value::Percent(0.0)]).unwrap();
//! assert_eq!(slide.apply(0.5), Value::Percent(-50.0));
//! assert_eq!(slide.apply(7.0), Value::Percent(0.0)); // clamped
//! ```

use smallvec::SmallVec;

use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::values::{Interpolate, Value};

/// Piecewise mapping from an input range to an output range
#[derive(Clone, Debug)]
pub struct RangeTransform<T: Interpolate = Value> {
    input: SmallVec<[f32; 4]>,
    output: SmallVec<[T; 4]>,
    clamp: bool,
    easing: Easing,
}

impl<T: Interpolate> RangeTransform<T> {
    /// Build a transform; stops must be strictly ascending or strictly descending
    pub fn new(input: &[f32], output: Vec<T>) -> Result<Self> {
        if input.len() != output.len() {
            return Err(AnimationError::RangeLengthMismatch {
                input: input.len(),
                output: output.len(),
            });
        }
        if input.len() < 2 {
            return Err(AnimationError::RangeTooShort(input.len()));
        }

        let ascending = input.windows(2).all(|w| w[0] < w[1]);
        let descending = input.windows(2).all(|w| w[0] > w[1]);
        if !ascending && !descending {
            return Err(AnimationError::RangeNotMonotonic(input.to_vec()));
        }

        let mut input: SmallVec<[f32; 4]> = input.iter().copied().collect();
        let mut output: SmallVec<[T; 4]> = output.into_iter().collect();
        if descending {
            input.reverse();
            output.reverse();
        }

        Ok(Self {
            input,
            output,
            clamp: true,
            easing: Easing::Linear,
        })
    }

    /// Allow extrapolation past the ends of the input range
    pub fn unclamped(mut self) -> Self {
        self.clamp = false;
        self
    }

    /// Ease within each segment
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn is_clamped(&self) -> bool {
        self.clamp
    }

    pub fn apply(&self, value: f32) -> T {
        let last = self.input.len() - 1;

        if self.clamp {
            if value <= self.input[0] {
                return self.output[0].clone();
            }
            if value >= self.input[last] {
                return self.output[last].clone();
            }
        }

        let mut segment = 0;
        while segment < last - 1 && value >= self.input[segment + 1] {
            segment += 1;
        }

        let start = self.input[segment];
        let end = self.input[segment + 1];
        let t = (value - start) / (end - start);
        // Unclamped input outside the range extrapolates linearly
        let t = if self.clamp || (0.0..=1.0).contains(&t) {
            self.easing.apply(t)
        } else {
            t
        };

        self.output[segment].lerp(&self.output[segment + 1], t)
    }
}
