//! Animatable style properties

use std::fmt;

use kinetic_core::Color;

use crate::easing::Easing;
use crate::spring::SpringConfig;
use crate::transition::Driver;
use crate::values::Value;

/// A visual property a motion element can animate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    Opacity,
    /// Vertical/horizontal translation in pixels
    X,
    Y,
    /// Horizontal translation in percent of the element's width
    TranslateX,
    Scale,
    ScaleX,
    ScaleY,
    /// Degrees
    Rotate,
    /// Percent of the element's size
    BorderRadius,
    BackgroundColor,
    Fill,
    /// Drawn fraction of an SVG path (0..1)
    PathLength,
}

impl Property {
    pub const ALL: [Property; 12] = [
        Property::Opacity,
        Property::X,
        Property::Y,
        Property::TranslateX,
        Property::Scale,
        Property::ScaleX,
        Property::ScaleY,
        Property::Rotate,
        Property::BorderRadius,
        Property::BackgroundColor,
        Property::Fill,
        Property::PathLength,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Property::Opacity => "opacity",
            Property::X => "x",
            Property::Y => "y",
            Property::TranslateX => "translateX",
            Property::Scale => "scale",
            Property::ScaleX => "scaleX",
            Property::ScaleY => "scaleY",
            Property::Rotate => "rotate",
            Property::BorderRadius => "borderRadius",
            Property::BackgroundColor => "backgroundColor",
            Property::Fill => "fill",
            Property::PathLength => "pathLength",
        }
    }

    pub fn from_name(name: &str) -> Option<Property> {
        Property::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Properties applied through the element transform
    pub fn is_transform(self) -> bool {
        matches!(
            self,
            Property::X
                | Property::Y
                | Property::TranslateX
                | Property::Scale
                | Property::ScaleX
                | Property::ScaleY
                | Property::Rotate
        )
    }

    pub fn is_scale(self) -> bool {
        matches!(self, Property::Scale | Property::ScaleX | Property::ScaleY)
    }

    /// Value of the property on an element nobody has styled
    pub fn initial_value(self) -> Value {
        match self {
            Property::Opacity | Property::Scale | Property::ScaleX | Property::ScaleY => {
                Value::Number(1.0)
            }
            Property::X | Property::Y | Property::Rotate => Value::Number(0.0),
            Property::TranslateX | Property::BorderRadius => Value::Percent(0.0),
            Property::BackgroundColor | Property::Fill => Value::Color(Color::TRANSPARENT),
            Property::PathLength => Value::Number(1.0),
        }
    }

    /// Driver used when a transition leaves the animation type unspecified
    ///
    /// Multi-keyframe animations always tween. Positional values use an
    /// underdamped spring, scales a critically damped one, and everything
    /// else a short tween.
    pub fn default_driver(self, target: Option<f32>, keyframe_count: usize) -> Driver {
        if keyframe_count > 2 {
            return Driver::Tween {
                duration_ms: 800.0,
                easing: Easing::EaseInOut,
                times: None,
            };
        }
        if self.is_scale() {
            return Driver::Spring(SpringConfig::critically_damped(target.unwrap_or(1.0)));
        }
        if self.is_transform() {
            return Driver::Spring(SpringConfig::under_damped());
        }
        Driver::Tween {
            duration_ms: 300.0,
            easing: Easing::DEFAULT_TWEEN,
            times: None,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
