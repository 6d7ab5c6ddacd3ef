//! Easing curves
//!
//! Named curves are cubic béziers with the control points used by CSS and
//! most declarative animation libraries. Curves are solved numerically:
//! Newton iterations on x(t), falling back to bisection when the slope
//! flattens out.

/// Timing curve applied to a 0..1 progress value
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// cubic-bezier(0.42, 0, 1, 1)
    EaseIn,
    /// cubic-bezier(0, 0, 0.58, 1)
    EaseOut,
    /// cubic-bezier(0.42, 0, 0.58, 1)
    EaseInOut,
    /// Arbitrary curve (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
}

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_MIN_SLOPE: f32 = 1e-3;
const BISECTION_PRECISION: f32 = 1e-6;
const BISECTION_MAX_ITERATIONS: usize = 32;

impl Easing {
    /// Curve used by value types that fall back to a short tween
    pub const DEFAULT_TWEEN: Easing = Easing::CubicBezier(0.25, 0.1, 0.35, 1.0);

    /// Bézier control points, or None for linear
    pub fn control_points(&self) -> Option<(f32, f32, f32, f32)> {
        match *self {
            Easing::Linear => None,
            Easing::EaseIn => Some((0.42, 0.0, 1.0, 1.0)),
            Easing::EaseOut => Some((0.0, 0.0, 0.58, 1.0)),
            Easing::EaseInOut => Some((0.42, 0.0, 0.58, 1.0)),
            Easing::CubicBezier(x1, y1, x2, y2) => Some((x1, y1, x2, y2)),
        }
    }

    /// Map linear progress onto the curve
    ///
    /// Input is clamped to 0..1. The endpoints are exact; interior values may
    /// overshoot for curves whose y control points leave 0..1.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match self.control_points() {
            None => t,
            // Straight diagonal
            Some((x1, y1, x2, y2)) if x1 == y1 && x2 == y2 => t,
            Some((x1, y1, x2, y2)) => {
                let curve_t = solve_curve_t(t, x1, x2);
                bezier(curve_t, y1, y2)
            }
        }
    }
}

/// One axis of a cubic bézier anchored at 0 and 1
fn bezier(t: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

fn bezier_slope(t: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

/// Find the curve parameter whose x coordinate equals `x`
fn solve_curve_t(x: f32, x1: f32, x2: f32) -> f32 {
    let mut t = x;
    for _ in 0..NEWTON_ITERATIONS {
        let slope = bezier_slope(t, x1, x2);
        if slope.abs() < NEWTON_MIN_SLOPE {
            break;
        }
        let error = bezier(t, x1, x2) - x;
        if error.abs() < BISECTION_PRECISION {
            return t;
        }
        t -= error / slope;
    }

    if (0.0..=1.0).contains(&t) && (bezier(t, x1, x2) - x).abs() < BISECTION_PRECISION {
        return t;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    t = x;
    for _ in 0..BISECTION_MAX_ITERATIONS {
        let current = bezier(t, x1, x2);
        if (current - x).abs() < BISECTION_PRECISION {
            break;
        }
        if current < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) * 0.5;
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::DEFAULT_TWEEN,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(-3.0), 0.0);
            assert_eq!(easing.apply(7.0), 1.0);
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let e = Easing::EaseInOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-4);
        let a = e.apply(0.25);
        let b = e.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_ease_in_starts_slow_ease_out_starts_fast() {
        assert!(Easing::EaseIn.apply(0.25) < 0.25);
        assert!(Easing::EaseOut.apply(0.25) > 0.25);
    }

    #[test]
    fn test_curves_are_monotonic() {
        for easing in [Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            let mut last = 0.0;
            for i in 1..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v >= last - 1e-5, "{easing:?} decreased at {i}");
                last = v;
            }
        }
    }
}
