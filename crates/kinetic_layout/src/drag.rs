//! Constrained drag with release momentum
//!
//! While the pointer is held, the element follows it within its constraints.
//! On release each axis coasts with exponential-decay inertia; an axis that
//! reaches a constraint hands over to a bounce spring that settles on the
//! boundary.

use std::collections::VecDeque;

use kinetic_animation::{Spring, SpringConfig};
use kinetic_core::{Point, StateTransitions};
use serde::{Deserialize, Serialize};

/// Velocity is estimated over pointer samples this recent (ms)
const VELOCITY_WINDOW_MS: f64 = 100.0;

/// Limits on the drag offset, relative to the rest position
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragConstraints {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl DragConstraints {
    /// `distance` in every direction
    pub fn uniform(distance: f32) -> Self {
        Self {
            top: -distance,
            right: distance,
            bottom: distance,
            left: -distance,
        }
    }

    pub fn clamp(&self, offset: Point) -> Point {
        Point::new(
            offset.x.clamp(self.left, self.right),
            offset.y.clamp(self.top, self.bottom),
        )
    }

    pub fn contains(&self, offset: Point) -> bool {
        self.clamp(offset) == offset
    }
}

/// Drag tuning
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragConfig {
    pub constraints: DragConstraints,
    /// How far past a constraint the element follows the pointer (0..1)
    pub elastic: f32,
    /// Inertia travel as a fraction of release velocity
    pub power: f32,
    /// Inertia decay time constant (ms)
    pub time_constant_ms: f32,
    /// Spring that settles an axis onto a boundary
    pub bounce: SpringConfig,
    /// Inertia stops once this close to its resting point
    pub rest_delta: f32,
}

impl DragConfig {
    pub fn new(constraints: DragConstraints) -> Self {
        Self {
            constraints,
            elastic: 0.0,
            power: 0.8,
            time_constant_ms: 750.0,
            bounce: SpringConfig::new(600.0, 10.0, 1.0).with_rest(1.0, 10.0),
            rest_delta: 1.0,
        }
    }

    pub fn elastic(mut self, elastic: f32) -> Self {
        self.elastic = elastic.clamp(0.0, 1.0);
        self
    }

    /// Bounce spring stiffness and damping
    pub fn bounce(mut self, stiffness: f32, damping: f32) -> Self {
        self.bounce = SpringConfig::new(stiffness, damping, 1.0).with_rest(1.0, 10.0);
        self
    }
}

/// Drag lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPhase {
    #[default]
    Idle,
    /// Following the pointer
    Dragging,
    /// Coasting after release
    Momentum,
    /// At least one axis is springing onto a boundary
    Bouncing,
}

impl DragPhase {
    pub fn is_active(&self) -> bool {
        !matches!(self, DragPhase::Idle)
    }
}

/// Events driving [`DragPhase`]
pub mod drag_events {
    pub const START: u32 = 30;
    pub const RELEASE: u32 = 31;
    pub const HIT_EDGE: u32 = 32;
    pub const SETTLED: u32 = 33;
}

impl StateTransitions for DragPhase {
    fn on_event(&self, event: u32) -> Option<Self> {
        use drag_events::*;

        match (self, event) {
            // A new press interrupts any release animation
            (_, START) => Some(DragPhase::Dragging),
            (DragPhase::Dragging, RELEASE) => Some(DragPhase::Momentum),
            (DragPhase::Momentum, HIT_EDGE) => Some(DragPhase::Bouncing),
            (DragPhase::Momentum | DragPhase::Bouncing, SETTLED) => Some(DragPhase::Idle),
            _ => None,
        }
    }
}

/// Release motion of one axis
#[derive(Clone, Debug)]
enum AxisMotion {
    Rest,
    Inertia {
        origin: f32,
        amplitude: f32,
        elapsed_ms: f32,
    },
    Bounce(Spring),
}

#[derive(Clone, Debug)]
struct Axis {
    offset: f32,
    velocity: f32,
    min: f32,
    max: f32,
    motion: AxisMotion,
}

impl Axis {
    fn new(min: f32, max: f32) -> Self {
        Self {
            offset: 0.0,
            velocity: 0.0,
            min,
            max,
            motion: AxisMotion::Rest,
        }
    }

    fn out_of_bounds(&self, value: f32) -> bool {
        value < self.min || value > self.max
    }

    fn nearest_boundary(&self, value: f32) -> f32 {
        if (self.min - value).abs() < (self.max - value).abs() {
            self.min
        } else {
            self.max
        }
    }

    /// Pointer-driven position, resisting past the constraints
    fn follow(&mut self, raw: f32, elastic: f32) {
        self.offset = if raw < self.min {
            self.min - (self.min - raw) * elastic
        } else if raw > self.max {
            self.max + (raw - self.max) * elastic
        } else {
            raw
        };
    }

    fn bounce(&mut self, config: &DragConfig) {
        let mut spring = Spring::new(config.bounce, self.offset);
        spring.set_velocity(self.velocity);
        spring.set_target(self.nearest_boundary(self.offset));
        self.motion = AxisMotion::Bounce(spring);
    }

    fn release(&mut self, velocity: f32, config: &DragConfig) {
        self.velocity = velocity;
        if self.out_of_bounds(self.offset) {
            self.bounce(config);
            return;
        }
        let amplitude = config.power * velocity;
        if amplitude.abs() <= config.rest_delta {
            self.velocity = 0.0;
            self.motion = AxisMotion::Rest;
            return;
        }
        self.motion = AxisMotion::Inertia {
            origin: self.offset,
            amplitude,
            elapsed_ms: 0.0,
        };
    }

    /// Advance; returns true when the axis switched to a bounce
    fn tick(&mut self, dt_ms: f32, config: &DragConfig) -> bool {
        match &mut self.motion {
            AxisMotion::Rest => false,
            AxisMotion::Inertia {
                origin,
                amplitude,
                elapsed_ms,
            } => {
                *elapsed_ms += dt_ms;
                let (origin, amplitude, elapsed_ms) = (*origin, *amplitude, *elapsed_ms);
                let remaining = amplitude * (-elapsed_ms / config.time_constant_ms).exp();
                self.offset = origin + amplitude - remaining;
                self.velocity = remaining / config.time_constant_ms * 1000.0;

                if self.out_of_bounds(self.offset) {
                    self.bounce(config);
                    return true;
                }
                if remaining.abs() <= config.rest_delta {
                    self.offset = origin + amplitude;
                    self.velocity = 0.0;
                    self.motion = AxisMotion::Rest;
                }
                false
            }
            AxisMotion::Bounce(spring) => {
                spring.advance(dt_ms / 1000.0);
                self.offset = spring.value();
                self.velocity = spring.velocity();
                if spring.is_settled() {
                    self.offset = spring.target();
                    self.velocity = 0.0;
                    self.motion = AxisMotion::Rest;
                }
                false
            }
        }
    }

    fn is_moving(&self) -> bool {
        !matches!(self.motion, AxisMotion::Rest)
    }

    fn is_bouncing(&self) -> bool {
        matches!(self.motion, AxisMotion::Bounce(_))
    }
}

/// Drag state of one element
#[derive(Clone, Debug)]
pub struct DragController {
    config: DragConfig,
    phase: DragPhase,
    x: Axis,
    y: Axis,
    clock_ms: f64,
    /// Pointer position at press, minus the offset held then
    anchor: Point,
    samples: VecDeque<(f64, Point)>,
}

impl DragController {
    pub fn new(config: DragConfig) -> Self {
        let c = config.constraints;
        Self {
            config,
            phase: DragPhase::Idle,
            x: Axis::new(c.left, c.right),
            y: Axis::new(c.top, c.bottom),
            clock_ms: 0.0,
            anchor: Point::ZERO,
            samples: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Rendered offset from the rest position
    ///
    /// Without elasticity the offset never leaves the constraints, even while
    /// the bounce spring overshoots.
    pub fn offset(&self) -> Point {
        let raw = Point::new(self.x.offset, self.y.offset);
        if self.config.elastic > 0.0 {
            raw
        } else {
            self.config.constraints.clamp(raw)
        }
    }

    /// Velocity in pixels per second
    pub fn velocity(&self) -> Point {
        Point::new(self.x.velocity, self.y.velocity)
    }

    /// Press at a document position; grabs the element where it currently is
    pub fn start(&mut self, position: Point) {
        let offset = self.offset();
        self.x.offset = offset.x;
        self.y.offset = offset.y;
        self.x.motion = AxisMotion::Rest;
        self.y.motion = AxisMotion::Rest;
        self.anchor = Point::new(position.x - offset.x, position.y - offset.y);
        self.samples.clear();
        self.samples.push_back((self.clock_ms, offset));
        self.phase.apply(drag_events::START);
        tracing::debug!(?offset, "drag started");
    }

    /// Pointer moved while pressed
    pub fn update(&mut self, position: Point) {
        if self.phase != DragPhase::Dragging {
            return;
        }
        let elastic = self.config.elastic;
        self.x.follow(position.x - self.anchor.x, elastic);
        self.y.follow(position.y - self.anchor.y, elastic);

        let now = self.clock_ms;
        self.samples.push_back((now, Point::new(self.x.offset, self.y.offset)));
        while let Some(&(t, _)) = self.samples.front() {
            if now - t > VELOCITY_WINDOW_MS && self.samples.len() > 2 {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Pointer released; starts momentum
    pub fn release(&mut self) {
        if !self.phase.apply(drag_events::RELEASE) {
            return;
        }
        let velocity = self.sampled_velocity();
        self.x.release(velocity.x, &self.config);
        self.y.release(velocity.y, &self.config);
        self.samples.clear();
        tracing::debug!(?velocity, offset = ?self.offset(), "drag released");

        if self.x.is_bouncing() || self.y.is_bouncing() {
            self.phase.apply(drag_events::HIT_EDGE);
        }
        if !self.x.is_moving() && !self.y.is_moving() {
            self.phase.apply(drag_events::SETTLED);
        }
    }

    /// Advance release motion; returns true while still moving
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        self.clock_ms += dt_ms as f64;

        if !matches!(self.phase, DragPhase::Momentum | DragPhase::Bouncing) {
            return self.phase == DragPhase::Dragging;
        }

        let hit_x = self.x.tick(dt_ms, &self.config);
        let hit_y = self.y.tick(dt_ms, &self.config);
        if hit_x || hit_y {
            self.phase.apply(drag_events::HIT_EDGE);
        }

        if !self.x.is_moving() && !self.y.is_moving() {
            self.phase.apply(drag_events::SETTLED);
            tracing::debug!(offset = ?self.offset(), "drag settled");
            return false;
        }
        true
    }

    fn sampled_velocity(&self) -> Point {
        let (Some(&(t0, first)), Some(&(t1, last))) = (self.samples.front(), self.samples.back())
        else {
            return Point::ZERO;
        };
        let dt = ((t1 - t0) / 1000.0) as f32;
        if dt <= 0.0 {
            return Point::ZERO;
        }
        Point::new((last.x - first.x) / dt, (last.y - first.y) / dt)
    }
}
