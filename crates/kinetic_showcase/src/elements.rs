//! Page elements
//!
//! Builders for every animated element on the showcase page. Each returns an
//! unmounted [`MotionElement`]; `Showcase::mount` wires them to the scheduler.

use kinetic_animation::{Easing, Property, RangeTransform, RepeatType, TransitionSpec, Value};
use kinetic_core::{Color, Size};
use kinetic_layout::{
    AnimationControls, DragConfig, DragConstraints, MotionElement, MotionGroup, Target, Variant,
    Variants, GRID_CELLS,
};

use crate::config::DragSettings;
use crate::error::Result;

/// Lightning bolt drawn by the icon cell
pub const ICON_PATH: &str = "m3.75 13.5 10.5-11.25L12 10.5h8.25L9.75 21.75 12 13.5H3.75Z";
pub const ICON_VIEW_BOX: Size = Size::new(24.0, 24.0);

/// Button background (emerald 600)
pub const BUTTON_COLOR: u32 = 0x059669;
/// How far the drag handle may leave its rest position on each side
pub const DRAG_DISTANCE: f32 = 100.0;
/// Delay between consecutive grid cells
pub const GRID_STAGGER_MS: f32 = 250.0;

/// Icon fill (amber 300) at a given alpha
pub fn icon_fill(alpha: f32) -> Color {
    Color::rgba8(252, 211, 77, alpha)
}

fn fade_variants() -> Variants {
    Variants::new()
        .with("hidden", Target::new().with(Property::Opacity, 0.0))
        .with("show", Target::new().with(Property::Opacity, 1.0))
}

/// Grid container whose cells fade in one after another
pub fn grid() -> MotionGroup {
    let parent = MotionElement::new("grid")
        .variants(
            Variants::new()
                .with("hidden", Target::new().with(Property::Opacity, 0.0))
                .with(
                    "show",
                    Variant::new(Target::new().with(Property::Opacity, 1.0))
                        .with_transition(TransitionSpec::default().stagger_children(GRID_STAGGER_MS)),
                ),
        )
        .initial_label("hidden")
        .animate_label("show");

    let cells = (0..GRID_CELLS)
        .map(|index| MotionElement::new(format!("cell-{index}")).variants(fade_variants()))
        .collect();
    MotionGroup::new(parent, cells)
}

fn fade_box(name: &str, from_y: f32) -> MotionElement {
    MotionElement::new(name)
        .initial(
            Target::new()
                .with(Property::Opacity, 0.0)
                .with(Property::Y, from_y),
        )
        .animate(Target::new().with(Property::Opacity, 1.0).with(Property::Y, 0.0))
        .transition(TransitionSpec::tween(1000.0, Easing::EaseOut).delay(200.0))
}

/// Square rising into place
pub fn fade_square() -> MotionElement {
    fade_box("fade-square", 100.0)
}

/// Circle dropping into place
pub fn fade_circle() -> MotionElement {
    fade_box("fade-circle", -100.0)
}

/// Box that grows, turns and rounds off in a loop
pub fn shape() -> MotionElement {
    MotionElement::new("shape")
        .animate(
            Target::new()
                .with(Property::Scale, vec![1.0, 2.0, 2.0, 1.0])
                .with(Property::Rotate, vec![0.0, 90.0, 90.0, 0.0])
                .with(
                    Property::BorderRadius,
                    vec![
                        Value::Percent(10.0),
                        Value::Percent(10.0),
                        Value::Percent(50.0),
                        Value::Percent(10.0),
                    ],
                ),
        )
        .transition(
            TransitionSpec::tween(5000.0, Easing::EaseInOut)
                .repeat_forever(RepeatType::Loop)
                .repeat_delay(1000.0),
        )
}

/// Button reacting to hover and press
///
/// Its transition only names bounce parameters, which do not pick a spring,
/// so gestures run as the standard 300ms tween.
pub fn button() -> MotionElement {
    let background = Value::Color(Color::from_hex(BUTTON_COLOR));
    MotionElement::new("button")
        .initial(
            Target::new()
                .with(Property::Scale, 1.0)
                .with(Property::BackgroundColor, background),
        )
        .while_hover(
            Target::new()
                .with(Property::Scale, 1.1)
                .with(Property::BackgroundColor, background),
        )
        .while_tap(Target::new().with(Property::Scale, 0.9))
        .transition(TransitionSpec::default().bounce(600.0, 10.0))
}

/// Drag handle tuning
pub fn drag_config(settings: &DragSettings) -> DragConfig {
    DragConfig::new(DragConstraints::uniform(DRAG_DISTANCE))
        .elastic(settings.elastic)
        .bounce(600.0, 10.0)
}

/// Bar filled by page scroll progress
pub fn progress_fill() -> MotionElement {
    MotionElement::new("progress-fill").initial(Target::new().with(Property::ScaleY, 0.0))
}

/// Icon that draws its outline, then fills, back and forth
pub fn icon() -> MotionElement {
    let repeating = |spec: TransitionSpec| {
        spec.repeat_forever(RepeatType::Reverse)
            .repeat_delay(1000.0)
    };
    let transition = repeating(TransitionSpec::tween(2000.0, Easing::EaseInOut).delay(1000.0))
        .with_override(
            Property::Fill,
            repeating(TransitionSpec::tween(2000.0, Easing::EaseIn).delay(2000.0)),
        );

    MotionElement::new("icon")
        .variants(
            Variants::new()
                .with(
                    "hidden",
                    Target::new()
                        .with(Property::Opacity, 0.0)
                        .with(Property::PathLength, 0.0)
                        .with(Property::Fill, Value::Color(icon_fill(0.0))),
                )
                .with(
                    "visible",
                    Target::new()
                        .with(Property::Opacity, 1.0)
                        .with(Property::PathLength, 1.0)
                        .with(Property::Fill, Value::Color(icon_fill(1.0))),
                ),
        )
        .initial_label("hidden")
        .animate_label("visible")
        .transition(transition)
}

/// Section heading revealed through `controls`
pub fn heading(controls: &AnimationControls) -> MotionElement {
    MotionElement::new("heading")
        .variants(
            Variants::new()
                .with(
                    "hidden",
                    Target::new()
                        .with(Property::Opacity, 0.0)
                        .with(Property::Y, 75.0),
                )
                .with(
                    "visible",
                    Target::new()
                        .with(Property::Opacity, 1.0)
                        .with(Property::Y, 0.0),
                ),
        )
        .initial_label("hidden")
        .animate_controls(controls)
        .transition(TransitionSpec::delayed(300.0))
}

/// Scroll-linked paragraph; `slide` maps section progress to translateX
pub fn paragraph(index: usize, slide: &RangeTransform) -> MotionElement {
    MotionElement::new(format!("paragraph-{index}"))
        .initial(Target::new().with(Property::TranslateX, slide.apply(0.0)))
}

/// Paragraph slides: the first enters from the left, the second from the right
pub fn paragraph_slides() -> Result<[RangeTransform; 2]> {
    let from = |percent: f32| {
        RangeTransform::new(&[0.0, 1.0], vec![Value::Percent(percent), Value::Percent(0.0)])
    };
    Ok([from(-100.0)?, from(100.0)?])
}
