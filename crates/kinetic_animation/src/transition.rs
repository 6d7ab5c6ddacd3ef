//! Declarative transitions
//!
//! A `TransitionSpec` is the partially specified form authors write: any
//! field may be left out. Resolving a spec for a concrete property yields a
//! `ResolvedTransition` with a single driver (tween or spring), a start
//! delay and an optional repeat policy.
//!
//! Orchestration fields (delay, repeat, child delays and stagger) never count
//! as "defining" a transition. A spec made only of those falls back to the
//! property's default driver, so `delay: 300ms` on a `y` animation still
//! springs.

use rustc_hash::FxHashMap;

use crate::easing::Easing;
use crate::property::Property;
use crate::spring::SpringConfig;
use crate::stagger::{StaggerConfig, StaggerDirection};

/// Animation type requested by a spec
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    Tween,
    Spring,
}

/// How repeated iterations play back
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RepeatType {
    /// Restart from the beginning
    #[default]
    Loop,
    /// Odd iterations run backwards in time
    Reverse,
    /// Odd iterations run forwards over the swapped keyframes
    Mirror,
}

/// Number of extra iterations after the first
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatCount {
    Finite(u32),
    Infinite,
}

/// Resolved repeat policy
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Repeat {
    pub count: RepeatCount,
    pub kind: RepeatType,
    /// Pause between iterations (ms)
    pub delay_ms: f32,
}

/// Partially specified transition, as authored
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionSpec {
    pub kind: Option<TransitionKind>,
    pub duration_ms: Option<f32>,
    pub easing: Option<Easing>,
    pub times: Option<Vec<f32>>,
    pub stiffness: Option<f32>,
    pub damping: Option<f32>,
    pub mass: Option<f32>,
    pub bounce_stiffness: Option<f32>,
    pub bounce_damping: Option<f32>,
    pub delay_ms: Option<f32>,
    pub repeat: Option<RepeatCount>,
    pub repeat_type: Option<RepeatType>,
    pub repeat_delay_ms: Option<f32>,
    pub delay_children_ms: Option<f32>,
    pub stagger_children_ms: Option<f32>,
    pub stagger_direction: Option<StaggerDirection>,
    /// Per-property replacements (a matching entry replaces the whole spec)
    pub overrides: FxHashMap<Property, TransitionSpec>,
}

/// How a resolved animation produces values
#[derive(Clone, Debug, PartialEq)]
pub enum Driver {
    /// Time-based interpolation through keyframes
    Tween {
        duration_ms: f32,
        easing: Easing,
        times: Option<Vec<f32>>,
    },
    /// Physics-based motion towards the final keyframe
    Spring(SpringConfig),
}

/// Fully resolved transition for one property
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTransition {
    pub driver: Driver,
    pub delay_ms: f32,
    pub repeat: Option<Repeat>,
}

/// Position within a tween's timeline
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playhead {
    /// Linear progress within the current iteration (0..1), direction applied
    pub progress: f32,
    /// Zero-based iteration index
    pub iteration: u64,
    /// Sample the mirrored keyframes instead of the originals
    pub mirrored: bool,
    /// The start delay has elapsed
    pub started: bool,
    /// Every iteration has completed
    pub finished: bool,
}

impl TransitionSpec {
    /// Time-based transition
    pub fn tween(duration_ms: f32, easing: Easing) -> Self {
        Self {
            kind: Some(TransitionKind::Tween),
            duration_ms: Some(duration_ms),
            easing: Some(easing),
            ..Default::default()
        }
    }

    /// Physics-based transition
    pub fn spring(stiffness: f32, damping: f32) -> Self {
        Self {
            kind: Some(TransitionKind::Spring),
            stiffness: Some(stiffness),
            damping: Some(damping),
            ..Default::default()
        }
    }

    /// Spec carrying only a start delay
    pub fn delayed(delay_ms: f32) -> Self {
        Self::default().delay(delay_ms)
    }

    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn times(mut self, times: Vec<f32>) -> Self {
        self.times = Some(times);
        self
    }

    pub fn repeat(mut self, count: RepeatCount, kind: RepeatType) -> Self {
        self.repeat = Some(count);
        self.repeat_type = Some(kind);
        self
    }

    pub fn repeat_forever(self, kind: RepeatType) -> Self {
        self.repeat(RepeatCount::Infinite, kind)
    }

    pub fn repeat_delay(mut self, delay_ms: f32) -> Self {
        self.repeat_delay_ms = Some(delay_ms);
        self
    }

    pub fn stagger_children(mut self, delay_ms: f32) -> Self {
        self.stagger_children_ms = Some(delay_ms);
        self
    }

    pub fn delay_children(mut self, delay_ms: f32) -> Self {
        self.delay_children_ms = Some(delay_ms);
        self
    }

    /// Spring parameters for drag bounce-back
    pub fn bounce(mut self, stiffness: f32, damping: f32) -> Self {
        self.bounce_stiffness = Some(stiffness);
        self.bounce_damping = Some(damping);
        self
    }

    /// Replace the transition for a single property
    pub fn with_override(mut self, property: Property, spec: TransitionSpec) -> Self {
        self.overrides.insert(property, spec);
        self
    }

    /// Spec that applies to `property`
    pub fn for_property(&self, property: Property) -> TransitionSpec {
        match self.overrides.get(&property) {
            Some(spec) => spec.clone(),
            None => TransitionSpec {
                overrides: FxHashMap::default(),
                ..self.clone()
            },
        }
    }

    /// Whether anything beyond orchestration was specified
    pub fn is_defined(&self) -> bool {
        self.kind.is_some()
            || self.duration_ms.is_some()
            || self.easing.is_some()
            || self.times.is_some()
            || self.stiffness.is_some()
            || self.damping.is_some()
            || self.mass.is_some()
            || self.bounce_stiffness.is_some()
            || self.bounce_damping.is_some()
    }

    /// Stagger settings for children, if this spec orchestrates any
    pub fn stagger(&self) -> Option<StaggerConfig> {
        if self.stagger_children_ms.is_none() && self.delay_children_ms.is_none() {
            return None;
        }
        Some(
            StaggerConfig::new(self.stagger_children_ms.unwrap_or(0.0))
                .delay_children(self.delay_children_ms.unwrap_or(0.0))
                .direction(self.stagger_direction.unwrap_or_default()),
        )
    }

    /// Resolve for one property animating through `keyframe_count` keyframes
    /// towards `target` (None for non-numeric targets)
    pub fn resolve(
        &self,
        property: Property,
        target: Option<f32>,
        keyframe_count: usize,
    ) -> ResolvedTransition {
        let spec = self.for_property(property);

        let driver = if !spec.is_defined() {
            property.default_driver(target, keyframe_count)
        } else if spec.kind == Some(TransitionKind::Spring) {
            let stiffness = spec.stiffness.unwrap_or(100.0);
            let damping = spec.damping.unwrap_or(10.0);
            let mass = spec.mass.unwrap_or(1.0);
            Driver::Spring(SpringConfig::new(stiffness, damping, mass))
        } else {
            Driver::Tween {
                duration_ms: spec.duration_ms.unwrap_or(300.0),
                easing: spec.easing.unwrap_or(Easing::EaseInOut),
                times: spec.times.clone(),
            }
        };

        let repeat = spec.repeat.and_then(|count| {
            if count == RepeatCount::Finite(0) {
                return None;
            }
            Some(Repeat {
                count,
                kind: spec.repeat_type.unwrap_or_default(),
                delay_ms: spec.repeat_delay_ms.unwrap_or(0.0),
            })
        });

        ResolvedTransition {
            driver,
            delay_ms: spec.delay_ms.unwrap_or(0.0).max(0.0),
            repeat,
        }
    }
}

impl ResolvedTransition {
    /// Add to the start delay (used for staggered children)
    pub fn with_extra_delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms += delay_ms.max(0.0);
        self
    }

    /// Position of a tween `elapsed_ms` after it was started
    ///
    /// Springs have no fixed timeline; for them only `started` is meaningful.
    pub fn playhead(&self, elapsed_ms: f32) -> Playhead {
        if elapsed_ms < self.delay_ms {
            return Playhead {
                progress: 0.0,
                iteration: 0,
                mirrored: false,
                started: false,
                finished: false,
            };
        }

        let duration = match &self.driver {
            Driver::Tween { duration_ms, .. } => duration_ms.max(0.0),
            Driver::Spring(_) => 0.0,
        };
        let (count, kind, repeat_delay) = match self.repeat {
            Some(repeat) => (repeat.count, repeat.kind, repeat.delay_ms.max(0.0)),
            None => (RepeatCount::Finite(0), RepeatType::Loop, 0.0),
        };
        let last_iteration = match count {
            RepeatCount::Finite(n) => Some(n as u64),
            RepeatCount::Infinite => None,
        };

        let t = elapsed_ms - self.delay_ms;
        let cycle = duration + repeat_delay;

        let (iteration, progress, finished) = if duration <= 0.0 || cycle <= 0.0 {
            (last_iteration.unwrap_or(0), 1.0, true)
        } else {
            let iteration = (t / cycle).floor() as u64;
            let local = t - iteration as f32 * cycle;
            let progress = (local / duration).min(1.0);
            match last_iteration {
                Some(last) if iteration > last => (last, 1.0, true),
                Some(last) if iteration == last && local >= duration => (last, 1.0, true),
                _ => (iteration, progress, false),
            }
        };

        let odd = iteration % 2 == 1;
        let progress = if odd && kind == RepeatType::Reverse {
            1.0 - progress
        } else {
            progress
        };

        Playhead {
            progress,
            iteration,
            mirrored: odd && kind == RepeatType::Mirror,
            started: true,
            finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tween(duration_ms: f32) -> ResolvedTransition {
        TransitionSpec::tween(duration_ms, Easing::Linear).resolve(Property::Opacity, Some(1.0), 2)
    }

    #[test]
    fn test_orchestration_only_falls_back_to_defaults() {
        let spec = TransitionSpec::delayed(300.0);
        assert!(!spec.is_defined());

        let y = spec.resolve(Property::Y, Some(0.0), 2);
        assert!(matches!(y.driver, Driver::Spring(_)));
        assert_eq!(y.delay_ms, 300.0);

        let opacity = spec.resolve(Property::Opacity, Some(1.0), 2);
        assert!(matches!(
            opacity.driver,
            Driver::Tween { duration_ms, easing, .. }
                if duration_ms == 300.0 && easing == Easing::DEFAULT_TWEEN
        ));
    }

    #[test]
    fn test_bounce_only_spec_is_a_plain_tween() {
        // Bounce parameters define the transition without choosing a type
        let spec = TransitionSpec::default().bounce(600.0, 10.0);
        let scale = spec.resolve(Property::Scale, Some(1.1), 2);
        assert_eq!(
            scale.driver,
            Driver::Tween {
                duration_ms: 300.0,
                easing: Easing::EaseInOut,
                times: None
            }
        );
    }

    #[test]
    fn test_property_override_replaces_default() {
        let spec = TransitionSpec::tween(2000.0, Easing::EaseInOut)
            .delay(1000.0)
            .with_override(
                Property::Fill,
                TransitionSpec::tween(2000.0, Easing::EaseIn).delay(2000.0),
            );
        assert_eq!(spec.resolve(Property::PathLength, Some(1.0), 2).delay_ms, 1000.0);

        let fill = spec.resolve(Property::Fill, None, 2);
        assert_eq!(fill.delay_ms, 2000.0);
        assert!(matches!(fill.driver, Driver::Tween { easing: Easing::EaseIn, .. }));
    }

    #[test]
    fn test_playhead_delay_and_finish() {
        let t = tween(1000.0).with_extra_delay(200.0);
        assert!(!t.playhead(100.0).started);

        let mid = t.playhead(700.0);
        assert!(mid.started && !mid.finished);
        assert!((mid.progress - 0.5).abs() < 1e-6);

        let end = t.playhead(5000.0);
        assert!(end.finished);
        assert_eq!(end.progress, 1.0);
    }

    #[test]
    fn test_playhead_repeat_reverse_with_delay() {
        let spec = TransitionSpec::tween(2000.0, Easing::Linear)
            .delay(1000.0)
            .repeat_forever(RepeatType::Reverse)
            .repeat_delay(1000.0);
        let t = spec.resolve(Property::PathLength, Some(1.0), 2);

        // First iteration: forward
        assert!((t.playhead(2000.0).progress - 0.5).abs() < 1e-6);
        // Holding at the end during the repeat delay
        assert_eq!(t.playhead(3500.0).progress, 1.0);
        // Second iteration runs backwards
        let back = t.playhead(5000.0);
        assert_eq!(back.iteration, 1);
        assert!((back.progress - 0.5).abs() < 1e-6);
        // Third iteration forward again
        assert!((t.playhead(8000.0).progress - 0.5).abs() < 1e-6);
        assert!(!t.playhead(1_000_000.0).finished);
    }

    #[test]
    fn test_playhead_finite_repeat() {
        let spec = TransitionSpec::tween(100.0, Easing::Linear).repeat(RepeatCount::Finite(2), RepeatType::Mirror);
        let t = spec.resolve(Property::Opacity, Some(1.0), 2);

        assert!(t.playhead(150.0).mirrored);
        let done = t.playhead(1000.0);
        assert!(done.finished);
        assert_eq!(done.iteration, 2);
        assert!(!done.mirrored);
    }

    #[test]
    fn test_stagger_from_spec() {
        let spec = TransitionSpec::default().stagger_children(250.0);
        let stagger = spec.stagger().unwrap();
        assert_eq!(stagger.delay_for_index(3, 6), 750.0);
        assert!(TransitionSpec::default().stagger().is_none());
    }
}
