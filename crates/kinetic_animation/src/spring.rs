//! Spring physics animation
//!
//! RK4-integrated spring physics for smooth, natural animations.
//! Supports preset configurations and custom spring parameters.

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Distance from target under which the spring may settle
    pub rest_delta: f32,
    /// Speed under which the spring may settle (units per second)
    pub rest_speed: f32,
}

impl SpringConfig {
    /// Being within 0.5px and moving under 5px/s is imperceptible
    const DEFAULT_REST_DELTA: f32 = 0.5;
    const DEFAULT_REST_SPEED: f32 = 5.0;

    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            rest_delta: Self::DEFAULT_REST_DELTA,
            rest_speed: Self::DEFAULT_REST_SPEED,
        }
    }

    /// A gentle, slow spring (good for page transitions)
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// A wobbly spring with overshoot (good for playful UI)
    pub fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// A stiff, snappy spring (good for buttons)
    pub fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Spring used for positional and rotational values without an explicit transition
    pub fn under_damped() -> Self {
        Self::new(500.0, 25.0, 1.0).with_rest(Self::DEFAULT_REST_DELTA, 10.0)
    }

    /// Spring used for scale values without an explicit transition
    ///
    /// Critically damped when animating to zero so the element does not
    /// invert on its way out.
    pub fn critically_damped(target: f32) -> Self {
        let damping = if target == 0.0 {
            2.0 * 550.0_f32.sqrt()
        } else {
            30.0
        };
        Self::new(550.0, damping, 1.0).with_rest(Self::DEFAULT_REST_DELTA, 10.0)
    }

    /// Override the settling thresholds
    pub fn with_rest(mut self, rest_delta: f32, rest_speed: f32) -> Self {
        self.rest_delta = rest_delta;
        self.rest_speed = rest_speed;
        self
    }

    /// Pick settling thresholds suited to the distance being animated
    ///
    /// Small spans (scale, opacity) need granular thresholds; pixel spans
    /// settle with the coarse defaults.
    pub fn with_rest_for_span(self, span: f32) -> Self {
        if span.abs() < 5.0 {
            self.with_rest(0.005, 0.01)
        } else {
            self.with_rest(Self::DEFAULT_REST_DELTA, self.rest_speed.max(2.0))
        }
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }

    /// Check if the spring is critically damped (no oscillation, fastest settling)
    pub fn is_critically_damped(&self) -> bool {
        (self.damping - self.critical_damping()).abs() < 0.01
    }

    /// Check if the spring is overdamped (slow settling, no oscillation)
    pub fn is_overdamped(&self) -> bool {
        self.damping > self.critical_damping()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::stiff()
    }
}

/// Longest single integration step (seconds)
const MAX_STEP_SECONDS: f32 = 1.0 / 120.0;

/// Most simulated time a single `advance` call integrates (seconds)
const MAX_ADVANCE_SECONDS: f32 = 10.0;

/// A spring-based animator
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Seed the spring with momentum (e.g. from a gesture or an interrupted animation)
    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    /// Check if the spring has settled (within rest delta of target with minimal velocity)
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < self.config.rest_delta
            && self.velocity.abs() < self.config.rest_speed
    }

    /// Step the spring simulation using RK4 integration
    ///
    /// A settled spring snaps onto its target and stops.
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        let k1_v = self.acceleration(self.value, self.velocity);
        let k1_x = self.velocity;

        let k2_v = self.acceleration(
            self.value + k1_x * dt * 0.5,
            self.velocity + k1_v * dt * 0.5,
        );
        let k2_x = self.velocity + k1_v * dt * 0.5;

        let k3_v = self.acceleration(
            self.value + k2_x * dt * 0.5,
            self.velocity + k2_v * dt * 0.5,
        );
        let k3_x = self.velocity + k2_v * dt * 0.5;

        let k4_v = self.acceleration(self.value + k3_x * dt, self.velocity + k3_v * dt);
        let k4_x = self.velocity + k3_v * dt;

        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    /// Advance by `dt` seconds in bounded sub-steps
    ///
    /// Gaps longer than ten seconds are cut short; a spring still moving after
    /// that picks up again on the next call. Non-finite gaps are ignored.
    pub fn advance(&mut self, dt: f32) {
        let span = if dt.is_finite() { dt.min(MAX_ADVANCE_SECONDS) } else { 0.0 };
        if span <= 0.0 {
            return;
        }

        let whole = (span / MAX_STEP_SECONDS).floor() as u32;
        for _ in 0..whole {
            self.step(MAX_STEP_SECONDS);
            if self.is_settled() {
                return;
            }
        }
        let rest = span - whole as f32 * MAX_STEP_SECONDS;
        if rest > 0.0 {
            self.step(rest);
        }
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_settles_to_target() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(100.0);

        // Simulate for 2 seconds at 60fps
        for _ in 0..120 {
            spring.step(1.0 / 60.0);
        }

        assert!(spring.is_settled());
        assert_eq!(spring.value(), 100.0);
    }

    #[test]
    fn test_spring_inherits_velocity() {
        let mut spring = Spring::new(SpringConfig::wobbly(), 0.0);
        spring.set_target(100.0);

        // Let it get some velocity
        for _ in 0..10 {
            spring.step(1.0 / 60.0);
        }

        let velocity = spring.velocity();
        assert!(velocity > 0.0);

        // Change target mid-flight - velocity should continue
        spring.set_target(50.0);
        assert_eq!(spring.velocity(), velocity);
    }

    #[test]
    fn test_spring_presets() {
        assert!(SpringConfig::wobbly().is_underdamped());
        assert!(SpringConfig::gentle().is_underdamped());
        assert!(SpringConfig::stiff().is_underdamped());
        assert!(SpringConfig::under_damped().is_underdamped());
        assert!(SpringConfig::critically_damped(0.0).is_critically_damped());
    }

    #[test]
    fn test_granular_rest_for_small_spans() {
        // 1.0 -> 1.1 must not count as settled before it moves
        let config = SpringConfig::under_damped().with_rest_for_span(0.1);
        let mut spring = Spring::new(config, 1.0);
        spring.set_target(1.1);
        assert!(!spring.is_settled());

        spring.step(1.0 / 120.0);
        assert!(spring.value() > 1.0);
    }

    #[test]
    fn test_spring_rk4_stability() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(1000.0);

        // Large time step that might cause instability with Euler integration
        for _ in 0..100 {
            spring.step(0.1);
            assert!(spring.value() < 2000.0);
            assert!(spring.value() > -500.0);
        }
    }

    #[test]
    fn test_advance_bounds_long_gaps() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(100.0);
        spring.advance(5.0e5);
        assert!(spring.is_settled());
        assert_eq!(spring.value(), 100.0);

        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(100.0);
        spring.advance(f32::INFINITY);
        spring.advance(f32::NAN);
        spring.advance(-1.0);
        assert_eq!(spring.value(), 0.0);
    }

    #[test]
    fn test_advance_matches_fixed_steps() {
        let mut stepped = Spring::new(SpringConfig::wobbly(), 0.0);
        stepped.set_target(100.0);
        let mut advanced = stepped;

        stepped.step(1.0 / 120.0);
        stepped.step(0.016 - 1.0 / 120.0);
        advanced.advance(0.016);
        assert!((stepped.value() - advanced.value()).abs() < 1e-4);
    }

    #[test]
    fn test_bounce_spring_overshoots() {
        // The drag bounce spring (600 / 10) is strongly underdamped
        let mut spring = Spring::new(SpringConfig::new(600.0, 10.0, 1.0), 0.0);
        spring.set_target(100.0);

        let mut peak: f32 = 0.0;
        for _ in 0..240 {
            spring.step(1.0 / 120.0);
            peak = peak.max(spring.value());
        }
        assert!(peak > 100.0);
    }
}
