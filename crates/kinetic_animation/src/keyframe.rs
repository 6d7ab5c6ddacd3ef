//! Keyframe tracks
//!
//! A track is an ordered list of values positioned on a 0..1 timeline.
//! Without explicit times the values are spread evenly. Easing applies
//! within each segment, so `[1, 2, 2, 1]` with `EaseInOut` eases in and out
//! of every keyframe rather than across the whole track.

use smallvec::SmallVec;

use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::values::{Interpolate, Value};

/// How easing is assigned to the segments of a track
#[derive(Clone, Debug, PartialEq)]
pub enum SegmentEasing {
    /// Same curve for every segment
    Uniform(Easing),
    /// One curve per segment (`len - 1` entries)
    PerSegment(Vec<Easing>),
}

impl Default for SegmentEasing {
    fn default() -> Self {
        SegmentEasing::Uniform(Easing::Linear)
    }
}

/// A sequence of values sampled by normalized progress
#[derive(Clone, Debug)]
pub struct KeyframeTrack<T: Interpolate = Value> {
    values: SmallVec<[T; 4]>,
    times: SmallVec<[f32; 4]>,
    easing: SegmentEasing,
}

impl<T: Interpolate> KeyframeTrack<T> {
    /// Create a track with evenly spaced keyframes and linear easing
    pub fn new(values: impl IntoIterator<Item = T>) -> Result<Self> {
        let values: SmallVec<[T; 4]> = values.into_iter().collect();
        if values.is_empty() {
            return Err(AnimationError::EmptyKeyframes);
        }
        let times = even_times(values.len());
        Ok(Self {
            values,
            times,
            easing: SegmentEasing::default(),
        })
    }

    /// Two-keyframe track
    pub fn tween(from: T, to: T) -> Self {
        let mut values = SmallVec::new();
        values.push(from);
        values.push(to);
        Self {
            values,
            times: even_times(2),
            easing: SegmentEasing::default(),
        }
    }

    /// Position keyframes explicitly
    ///
    /// Times must pair with values, start at 0, end at 1 and never decrease.
    pub fn with_times(mut self, times: &[f32]) -> Result<Self> {
        if times.len() != self.values.len() {
            return Err(AnimationError::TimesMismatch {
                values: self.values.len(),
                times: times.len(),
            });
        }
        let starts_at_zero = times.first().is_some_and(|t| *t == 0.0);
        let ends_at_one = times.last().is_some_and(|t| *t == 1.0);
        let ascending = times.windows(2).all(|w| w[0] <= w[1]);
        // A single keyframe may sit anywhere
        if times.len() > 1 && !(starts_at_zero && ends_at_one && ascending) {
            return Err(AnimationError::InvalidTimes(times.to_vec()));
        }
        self.times = times.iter().copied().collect();
        Ok(self)
    }

    /// Apply one easing curve to every segment
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = SegmentEasing::Uniform(easing);
        self
    }

    /// Apply a distinct easing curve to each segment
    pub fn with_segment_easings(mut self, easings: Vec<Easing>) -> Result<Self> {
        let expected = self.segment_count();
        if easings.len() != expected {
            return Err(AnimationError::EasingCountMismatch {
                expected,
                got: easings.len(),
            });
        }
        self.easing = SegmentEasing::PerSegment(easings);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn times(&self) -> &[f32] {
        &self.times
    }

    pub fn first(&self) -> &T {
        &self.values[0]
    }

    pub fn last(&self) -> &T {
        &self.values[self.values.len() - 1]
    }

    fn segment_count(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    fn easing_for(&self, segment: usize) -> Easing {
        match &self.easing {
            SegmentEasing::Uniform(easing) => *easing,
            SegmentEasing::PerSegment(easings) => {
                easings.get(segment).copied().unwrap_or_default()
            }
        }
    }

    /// The same track played back to front
    ///
    /// Values and segment easings are reversed and times mirrored, so the
    /// reversed track runs forward in time with forward easing.
    pub fn reversed(&self) -> Self {
        let values = self.values.iter().rev().cloned().collect();
        let times = self.times.iter().rev().map(|t| 1.0 - t).collect();
        let easing = match &self.easing {
            SegmentEasing::Uniform(e) => SegmentEasing::Uniform(*e),
            SegmentEasing::PerSegment(easings) => {
                SegmentEasing::PerSegment(easings.iter().rev().copied().collect())
            }
        };
        Self {
            values,
            times,
            easing,
        }
    }

    /// Sample the track at `progress` (clamped to 0..1)
    pub fn sample(&self, progress: f32) -> T {
        if self.values.len() == 1 {
            return self.values[0].clone();
        }

        let p = progress.clamp(0.0, 1.0);
        if p >= 1.0 {
            return self.last().clone();
        }
        let last_segment = self.values.len() - 2;

        let mut segment = 0;
        while segment < last_segment && self.times[segment + 1] <= p {
            segment += 1;
        }

        let start = self.times[segment];
        let end = self.times[segment + 1];
        let span = end - start;
        let local = if span <= f32::EPSILON {
            1.0
        } else {
            ((p - start) / span).clamp(0.0, 1.0)
        };

        let eased = self.easing_for(segment).apply(local);
        self.values[segment].lerp(&self.values[segment + 1], eased)
    }
}

fn even_times(count: usize) -> SmallVec<[f32; 4]> {
    if count <= 1 {
        let mut times = SmallVec::new();
        times.push(0.0);
        return times;
    }
    let last = (count - 1) as f32;
    (0..count).map(|i| i as f32 / last).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_spacing() {
        let track = KeyframeTrack::new([1.0_f32, 2.0, 2.0, 1.0]).unwrap();
        assert_eq!(track.times().len(), 4);
        assert!((track.times()[1] - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(track.times()[3], 1.0);
    }

    #[test]
    fn test_sample_hits_every_keyframe() {
        let track = KeyframeTrack::new([1.0_f32, 2.0, 2.0, 1.0])
            .unwrap()
            .with_easing(Easing::EaseInOut);

        assert_eq!(track.sample(0.0), 1.0);
        assert!((track.sample(1.0 / 3.0) - 2.0).abs() < 1e-4);
        assert!((track.sample(0.5) - 2.0).abs() < 1e-4);
        assert_eq!(track.sample(1.0), 1.0);
    }

    #[test]
    fn test_easing_is_per_segment() {
        // Halfway through the first segment of an ease-in-out track is the midpoint
        let track = KeyframeTrack::new([0.0_f32, 90.0, 90.0, 0.0])
            .unwrap()
            .with_easing(Easing::EaseInOut);
        assert!((track.sample(1.0 / 6.0) - 45.0).abs() < 0.05);
    }

    #[test]
    fn test_percent_track() {
        let track = KeyframeTrack::new([
            Value::Percent(10.0),
            Value::Percent(10.0),
            Value::Percent(50.0),
            Value::Percent(10.0),
        ])
        .unwrap();
        assert_eq!(track.sample(0.2), Value::Percent(10.0));
        assert_eq!(track.sample(2.0 / 3.0), Value::Percent(50.0));
    }

    #[test]
    fn test_invalid_times() {
        let track = KeyframeTrack::new([0.0_f32, 1.0, 2.0]).unwrap();
        assert!(matches!(
            track.clone().with_times(&[0.0, 1.0]),
            Err(AnimationError::TimesMismatch { .. })
        ));
        assert!(matches!(
            track.clone().with_times(&[0.0, 0.8, 0.5]),
            Err(AnimationError::InvalidTimes(_))
        ));
        let timed = track.with_times(&[0.0, 0.8, 1.0]).unwrap();
        assert!((timed.sample(0.4) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_empty_track_rejected() {
        let empty: Vec<f32> = Vec::new();
        assert_eq!(
            KeyframeTrack::new(empty).unwrap_err(),
            AnimationError::EmptyKeyframes
        );
    }

    #[test]
    fn test_reversed_track() {
        let track = KeyframeTrack::tween(0.0_f32, 10.0).with_easing(Easing::EaseIn);
        let reversed = track.reversed();
        assert_eq!(reversed.sample(0.0), 10.0);
        assert_eq!(reversed.sample(1.0), 0.0);
        // Forward easing on the reversed values
        assert!(reversed.sample(0.25) > 7.5);
    }

    #[test]
    fn test_segment_easings() {
        let track = KeyframeTrack::new([0.0_f32, 10.0, 30.0])
            .unwrap()
            .with_segment_easings(vec![Easing::EaseIn, Easing::Linear])
            .unwrap();

        // Ease-in lags behind linear in the first segment, the second is linear
        assert!(track.sample(0.25) < 5.0);
        assert!((track.sample(0.75) - 20.0).abs() < 1e-4);
        assert!((track.sample(0.5) - 10.0).abs() < 1e-4);

        // Reversal swaps the curves along with the values
        let reversed = track.reversed();
        assert_eq!(reversed.sample(0.0), 30.0);
        assert!((reversed.sample(0.25) - 20.0).abs() < 1e-4);
        assert!((reversed.sample(0.5) - 10.0).abs() < 1e-4);
        assert!(reversed.sample(0.75) > 5.0);
        assert_eq!(reversed.sample(1.0), 0.0);
    }

    #[test]
    fn test_segment_easing_count_checked() {
        let track = KeyframeTrack::new([0.0_f32, 10.0, 30.0]).unwrap();
        assert_eq!(
            track.with_segment_easings(vec![Easing::EaseIn]).unwrap_err(),
            AnimationError::EasingCountMismatch {
                expected: 2,
                got: 1
            }
        );
    }
}
