//! Animation scheduler
//!
//! Owns every motion value on the page and advances their animations when
//! the host reports a new frame. Ticking is deterministic: the host passes
//! the elapsed time, so the same input sequence always produces the same
//! values.
//!
//! Each motion value has at most one active animation. Starting a new one
//! interrupts the old one, beginning from the value's current state; springs
//! also inherit its velocity.

use slotmap::{new_key_type, SlotMap};

use crate::error::{AnimationError, Result};
use crate::keyframe::KeyframeTrack;
use crate::spring::Spring;
use crate::transition::{Driver, ResolvedTransition};
use crate::values::Value;

new_key_type! {
    /// Handle to a motion value registered with the scheduler
    pub struct MotionValueId;
}

/// Animation currently driving a motion value
#[derive(Clone, Debug)]
enum ActiveAnimation {
    Tween {
        track: KeyframeTrack<Value>,
        /// Reversed track, sampled on mirrored iterations
        mirrored: Option<KeyframeTrack<Value>>,
        transition: ResolvedTransition,
        started_at_ms: f64,
    },
    Spring {
        spring: Spring,
        /// Unit carrier for the spring's scalar output
        template: Value,
        delay_remaining_ms: f32,
    },
}

#[derive(Clone, Debug)]
struct MotionValue {
    current: Value,
    /// Units per second (scalar values only)
    velocity: f32,
    animation: Option<ActiveAnimation>,
}

impl MotionValue {
    fn new(initial: Value) -> Self {
        Self {
            current: initial,
            velocity: 0.0,
            animation: None,
        }
    }

    /// Advance the active animation; returns true while it still runs
    fn advance(&mut self, now_ms: f64, dt_ms: f32) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };

        let previous = self.current;
        let finished = match animation {
            ActiveAnimation::Tween {
                track,
                mirrored,
                transition,
                started_at_ms,
            } => {
                let elapsed = (now_ms - *started_at_ms) as f32;
                let playhead = transition.playhead(elapsed);
                if playhead.started {
                    let source = match mirrored {
                        Some(reversed) if playhead.mirrored => reversed,
                        _ => track,
                    };
                    self.current = source.sample(playhead.progress);
                }
                playhead.finished
            }
            ActiveAnimation::Spring {
                spring,
                template,
                delay_remaining_ms,
            } => {
                let mut remaining_ms = dt_ms;
                if *delay_remaining_ms > 0.0 {
                    let consumed = remaining_ms.min(*delay_remaining_ms);
                    *delay_remaining_ms -= consumed;
                    remaining_ms -= consumed;
                }

                spring.advance(remaining_ms / 1000.0);

                self.current = template.with_scalar(spring.value());
                if *delay_remaining_ms <= 0.0 && spring.is_settled() {
                    self.current = template.with_scalar(spring.target());
                    true
                } else {
                    false
                }
            }
        };

        self.velocity = match (previous.scalar(), self.current.scalar()) {
            (Some(before), Some(after)) if dt_ms > 0.0 => (after - before) / (dt_ms / 1000.0),
            _ => 0.0,
        };
        if let Some(ActiveAnimation::Spring { spring, .. }) = &self.animation {
            self.velocity = spring.velocity();
        }

        if finished {
            self.animation = None;
            self.velocity = 0.0;
        }
        !finished
    }
}

/// The animation scheduler that ticks all motion values
#[derive(Debug, Default)]
pub struct AnimationScheduler {
    values: SlotMap<MotionValueId, MotionValue>,
    now_ms: f64,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds of animation time elapsed since creation
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Register a motion value
    pub fn create(&mut self, initial: Value) -> MotionValueId {
        self.values.insert(MotionValue::new(initial))
    }

    /// Current value, or None if the id is unknown
    pub fn get(&self, id: MotionValueId) -> Option<Value> {
        self.values.get(id).map(|v| v.current)
    }

    /// Current numeric component (numbers and percentages)
    pub fn get_scalar(&self, id: MotionValueId) -> Option<f32> {
        self.get(id).and_then(|v| v.scalar())
    }

    /// Current velocity in units per second
    pub fn velocity(&self, id: MotionValueId) -> Option<f32> {
        self.values.get(id).map(|v| v.velocity)
    }

    /// Jump to a value, cancelling any animation
    pub fn set_immediate(&mut self, id: MotionValueId, value: Value) -> Result<()> {
        let motion = self.value_mut(id)?;
        motion.current = value;
        motion.velocity = 0.0;
        motion.animation = None;
        Ok(())
    }

    /// Animate from the current value to `target`
    pub fn animate_to(
        &mut self,
        id: MotionValueId,
        target: Value,
        transition: &ResolvedTransition,
    ) -> Result<()> {
        let from = self.value_mut(id)?.current;
        self.start(id, KeyframeTrack::tween(from, target), transition)
    }

    /// Animate through explicit keyframes
    ///
    /// The first keyframe is where the animation starts; the value jumps to
    /// it once the delay elapses.
    pub fn animate_keyframes(
        &mut self,
        id: MotionValueId,
        keyframes: Vec<Value>,
        transition: &ResolvedTransition,
    ) -> Result<()> {
        self.value_mut(id)?;
        let track = KeyframeTrack::new(keyframes)?;
        self.start(id, track, transition)
    }

    fn start(
        &mut self,
        id: MotionValueId,
        track: KeyframeTrack<Value>,
        transition: &ResolvedTransition,
    ) -> Result<()> {
        let now_ms = self.now_ms;
        let motion = self.value_mut(id)?;
        let target = *track.last();

        let animation = match (&transition.driver, motion.current.scalar(), target.scalar()) {
            (Driver::Spring(config), Some(from), Some(to)) => {
                let mut spring = Spring::new(config.with_rest_for_span(to - from), from);
                spring.set_velocity(motion.velocity);
                spring.set_target(to);
                tracing::debug!(?id, from, to, stiffness = config.stiffness, "spring started");
                ActiveAnimation::Spring {
                    spring,
                    template: target,
                    delay_remaining_ms: transition.delay_ms,
                }
            }
            (Driver::Tween { easing, times, .. }, _, _) => {
                let mut track = track.with_easing(*easing);
                if let Some(times) = times {
                    track = track.with_times(times)?;
                }
                tracing::debug!(?id, keyframes = track.len(), delay_ms = transition.delay_ms, "tween started");
                ActiveAnimation::Tween {
                    mirrored: transition.repeat.map(|_| track.reversed()),
                    track,
                    transition: transition.clone(),
                    started_at_ms: now_ms,
                }
            }
            // Springs need numeric endpoints; colors fall back to the default tween
            (Driver::Spring(_), _, _) => {
                let fallback = ResolvedTransition {
                    driver: Driver::Tween {
                        duration_ms: 300.0,
                        easing: crate::easing::Easing::DEFAULT_TWEEN,
                        times: None,
                    },
                    ..transition.clone()
                };
                tracing::debug!(?id, "spring requested for non-numeric value, using tween");
                ActiveAnimation::Tween {
                    mirrored: fallback.repeat.map(|_| track.reversed()),
                    track: track.with_easing(crate::easing::Easing::DEFAULT_TWEEN),
                    transition: fallback,
                    started_at_ms: now_ms,
                }
            }
        };

        motion.animation = Some(animation);
        Ok(())
    }

    /// Stop animating, keeping the current value
    pub fn stop(&mut self, id: MotionValueId) -> Result<()> {
        let motion = self.value_mut(id)?;
        motion.animation = None;
        motion.velocity = 0.0;
        Ok(())
    }

    /// Remove a motion value entirely
    pub fn remove(&mut self, id: MotionValueId) -> Option<Value> {
        self.values.remove(id).map(|v| v.current)
    }

    /// Remove every motion value, returning how many were dropped
    pub fn clear(&mut self) -> usize {
        let count = self.values.len();
        self.values.clear();
        count
    }

    pub fn is_animating(&self, id: MotionValueId) -> bool {
        self.values
            .get(id)
            .is_some_and(|v| v.animation.is_some())
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.values.values().any(|v| v.animation.is_some())
    }

    /// Number of registered motion values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Tick all animations
    ///
    /// Returns true if any animations are still active (need another tick).
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        self.now_ms += dt_ms as f64;
        let now_ms = self.now_ms;

        let mut active = 0usize;
        for (_, value) in self.values.iter_mut() {
            if value.advance(now_ms, dt_ms) {
                active += 1;
            }
        }

        tracing::trace!(now_ms, active, "animation tick");
        active > 0
    }

    fn value_mut(&mut self, id: MotionValueId) -> Result<&mut MotionValue> {
        self.values
            .get_mut(id)
            .ok_or(AnimationError::UnknownValue(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::property::Property;
    use crate::transition::{RepeatType, TransitionSpec};

    fn run(scheduler: &mut AnimationScheduler, ms: f32) {
        let mut elapsed = 0.0;
        while elapsed < ms {
            scheduler.tick(10.0);
            elapsed += 10.0;
        }
    }

    #[test]
    fn test_tween_reaches_target() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.create(Value::Number(0.0));
        let t = TransitionSpec::tween(1000.0, Easing::EaseOut).resolve(Property::Y, Some(0.0), 2);
        scheduler.animate_to(id, Value::Number(100.0), &t).unwrap();

        run(&mut scheduler, 500.0);
        let mid = scheduler.get_scalar(id).unwrap();
        // Ease-out is past the halfway point at half time
        assert!(mid > 50.0 && mid < 100.0);

        run(&mut scheduler, 600.0);
        assert_eq!(scheduler.get(id), Some(Value::Number(100.0)));
        assert!(!scheduler.is_animating(id));
    }

    #[test]
    fn test_delay_holds_value() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.create(Value::Number(0.0));
        let t = TransitionSpec::tween(100.0, Easing::Linear)
            .delay(250.0)
            .resolve(Property::Opacity, Some(1.0), 2);
        scheduler.animate_to(id, Value::Number(1.0), &t).unwrap();

        run(&mut scheduler, 240.0);
        assert_eq!(scheduler.get_scalar(id), Some(0.0));
        assert!(scheduler.is_animating(id));

        run(&mut scheduler, 200.0);
        assert_eq!(scheduler.get_scalar(id), Some(1.0));
    }

    #[test]
    fn test_spring_with_delay_settles() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.create(Value::Number(75.0));
        let t = TransitionSpec::delayed(300.0).resolve(Property::Y, Some(0.0), 2);
        scheduler.animate_to(id, Value::Number(0.0), &t).unwrap();

        run(&mut scheduler, 290.0);
        assert_eq!(scheduler.get_scalar(id), Some(75.0));

        run(&mut scheduler, 3000.0);
        assert_eq!(scheduler.get_scalar(id), Some(0.0));
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_long_pause_finishes_animations() {
        let mut scheduler = AnimationScheduler::new();
        let spring = scheduler.create(Value::Number(75.0));
        let t = TransitionSpec::delayed(300.0).resolve(Property::Y, Some(0.0), 2);
        scheduler.animate_to(spring, Value::Number(0.0), &t).unwrap();
        let tween = scheduler.create(Value::Number(0.0));
        let t = TransitionSpec::tween(100.0, Easing::Linear).resolve(Property::X, Some(0.0), 2);
        scheduler.animate_to(tween, Value::Number(1.0), &t).unwrap();
        scheduler.tick(16.0);

        // One frame after a very long gap
        assert!(!scheduler.tick(5.0e8));
        assert_eq!(scheduler.get_scalar(spring), Some(0.0));
        assert_eq!(scheduler.get_scalar(tween), Some(1.0));
    }

    #[test]
    fn test_non_finite_tick_is_ignored() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.create(Value::Number(0.0));
        let t = TransitionSpec::tween(100.0, Easing::Linear).resolve(Property::X, Some(0.0), 2);
        scheduler.animate_to(id, Value::Number(1.0), &t).unwrap();
        scheduler.tick(50.0);

        assert!(scheduler.tick(f32::INFINITY));
        assert!(scheduler.tick(f32::NAN));
        assert_eq!(scheduler.now_ms(), 50.0);
        assert!((scheduler.get_scalar(id).unwrap() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_infinite_keyframes_keep_running() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.create(Value::Number(1.0));
        let spec = TransitionSpec::tween(5000.0, Easing::EaseInOut)
            .repeat_forever(RepeatType::Loop)
            .repeat_delay(1000.0);
        let t = spec.resolve(Property::Scale, None, 4);
        let frames = vec![1.0, 2.0, 2.0, 1.0].into_iter().map(Value::Number).collect();
        scheduler.animate_keyframes(id, frames, &t).unwrap();

        run(&mut scheduler, 2500.0);
        assert!((scheduler.get_scalar(id).unwrap() - 2.0).abs() < 1e-3);

        // During the repeat delay the last keyframe holds
        run(&mut scheduler, 3000.0);
        assert!((scheduler.get_scalar(id).unwrap() - 1.0).abs() < 1e-3);
        assert!(scheduler.is_animating(id));
    }

    #[test]
    fn test_color_spring_falls_back_to_tween() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.create(Value::Color(kinetic_core::Color::BLACK));
        let t = TransitionSpec::spring(300.0, 20.0).resolve(Property::BackgroundColor, None, 2);
        scheduler
            .animate_to(id, Value::Color(kinetic_core::Color::WHITE), &t)
            .unwrap();

        run(&mut scheduler, 400.0);
        assert_eq!(scheduler.get(id), Some(Value::Color(kinetic_core::Color::WHITE)));
    }

    #[test]
    fn test_interrupt_starts_from_current() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.create(Value::Number(0.0));
        let t = TransitionSpec::tween(100.0, Easing::Linear).resolve(Property::X, Some(0.0), 2);
        scheduler.animate_to(id, Value::Number(100.0), &t).unwrap();
        run(&mut scheduler, 50.0);
        let at_interrupt = scheduler.get_scalar(id).unwrap();

        scheduler.animate_to(id, Value::Number(0.0), &t).unwrap();
        scheduler.tick(0.0);
        assert_eq!(scheduler.get_scalar(id), Some(at_interrupt));

        run(&mut scheduler, 200.0);
        assert_eq!(scheduler.get_scalar(id), Some(0.0));
    }

    #[test]
    fn test_unknown_value() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.create(Value::Number(0.0));
        scheduler.remove(id);
        assert!(matches!(
            scheduler.set_immediate(id, Value::Number(1.0)),
            Err(AnimationError::UnknownValue(_))
        ));
        assert_eq!(scheduler.get(id), None);
    }
}
