//! Kinetic Animation System
//!
//! Spring physics, keyframe tracks, declarative transitions and a
//! deterministic, frame-driven scheduler.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Keyframe Tracks**: Evenly spaced or timed keyframes with per-segment easing
//! - **Transitions**: Delay, duration, repeat (loop / reverse / mirror) and
//!   per-property defaults for partially specified transitions
//! - **Stagger**: Incremental start delays for sibling elements
//! - **Range Transforms**: Map scroll progress (or any input) onto output values
//! - **Scheduler**: Owns motion values and advances them on each host frame
//!
//! # Example
//!
//! ```rust
//! use kinetic_animation::{AnimationScheduler, Property, TransitionSpec, Value};
//!
//! let mut scheduler = AnimationScheduler::new();
//! let opacity = scheduler.create(Value::Number(0.0));
//!
//! let transition = TransitionSpec::default().resolve(Property::Opacity, Some(1.0), 2);
//! scheduler.animate_to(opacity, Value::Number(1.0), &transition).unwrap();
//!
//! // Default opacity tween lasts 300ms
//! for _ in 0..20 {
//!     scheduler.tick(16.0);
//! }
//! assert_eq!(scheduler.get(opacity), Some(Value::Number(1.0)));
//! ```

pub mod easing;
pub mod error;
pub mod keyframe;
pub mod property;
pub mod scheduler;
pub mod spring;
pub mod stagger;
pub mod transform;
pub mod transition;
pub mod values;

pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use keyframe::{KeyframeTrack, SegmentEasing};
pub use property::Property;
pub use scheduler::{AnimationScheduler, MotionValueId};
pub use spring::{Spring, SpringConfig};
pub use stagger::{StaggerConfig, StaggerDirection};
pub use transform::RangeTransform;
pub use transition::{
    Driver, Playhead, Repeat, RepeatCount, RepeatType, ResolvedTransition, TransitionKind,
    TransitionSpec,
};
pub use values::{Interpolate, Value};
