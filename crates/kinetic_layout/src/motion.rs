//! Motion elements
//!
//! A `MotionElement` binds animatable properties of one page element to
//! scheduler values. It applies its `initial` state at mount, then animates
//! towards `animate`, which may be a literal target, a variant label, or a
//! set of [`AnimationControls`] started later. Hover and tap targets layer on
//! top of the resting state while a gesture is active.
//!
//! A `MotionGroup` is a parent with children that inherit its variant labels.
//! Children without an `animate` of their own follow the parent, delayed by
//! the parent transition's stagger.

use indexmap::IndexMap;
use kinetic_animation::{AnimationScheduler, MotionValueId, Property, TransitionSpec, Value};

use crate::error::Result;
use crate::gesture::GestureState;
use crate::variants::{AnimationControls, ControlsSubscription, Target, TargetValue, Variants};

/// State applied before the first frame
#[derive(Clone, Debug, Default)]
pub enum Initial {
    /// Start from the properties' unstyled values
    #[default]
    Unset,
    Target(Target),
    Label(String),
}

/// What the element animates towards after mount
#[derive(Clone, Debug, Default)]
pub enum Animate {
    /// Nothing of its own (group children follow their parent)
    #[default]
    None,
    Target(Target),
    Label(String),
    Controls(AnimationControls),
}

/// An animated page element
#[derive(Debug, Default)]
pub struct MotionElement {
    name: String,
    initial: Initial,
    animate: Animate,
    variants: Variants,
    transition: TransitionSpec,
    hover: Option<Target>,
    tap: Option<Target>,

    values: IndexMap<Property, MotionValueId>,
    /// Resting values gesture targets return to
    base: Target,
    /// Last target applied for gestures
    gesture_target: Target,
    label: Option<String>,
    subscription: Option<ControlsSubscription>,
}

impl MotionElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn initial(mut self, target: Target) -> Self {
        self.initial = Initial::Target(target);
        self
    }

    pub fn initial_label(mut self, label: impl Into<String>) -> Self {
        self.initial = Initial::Label(label.into());
        self
    }

    pub fn animate(mut self, target: Target) -> Self {
        self.animate = Animate::Target(target);
        self
    }

    pub fn animate_label(mut self, label: impl Into<String>) -> Self {
        self.animate = Animate::Label(label.into());
        self
    }

    /// Animate whenever `controls` starts a label
    pub fn animate_controls(mut self, controls: &AnimationControls) -> Self {
        self.animate = Animate::Controls(controls.clone());
        self
    }

    pub fn variants(mut self, variants: Variants) -> Self {
        self.variants = variants;
        self
    }

    /// Default transition for every animation of this element
    pub fn transition(mut self, transition: TransitionSpec) -> Self {
        self.transition = transition;
        self
    }

    pub fn while_hover(mut self, target: Target) -> Self {
        self.hover = Some(target);
        self
    }

    pub fn while_tap(mut self, target: Target) -> Self {
        self.tap = Some(target);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variant label most recently started
    pub fn current_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Whether this element follows its group parent's labels
    pub fn inherits(&self) -> bool {
        matches!(self.animate, Animate::None)
    }

    /// Scheduler handle of a bound property
    pub fn id(&self, property: Property) -> Option<MotionValueId> {
        self.values.get(&property).copied()
    }

    pub fn value(&self, property: Property, scheduler: &AnimationScheduler) -> Option<Value> {
        self.id(property).and_then(|id| scheduler.get(id))
    }

    /// Numeric value, falling back to the property's unstyled value
    pub fn scalar(&self, property: Property, scheduler: &AnimationScheduler) -> f32 {
        self.value(property, scheduler)
            .unwrap_or_else(|| property.initial_value())
            .scalar()
            .unwrap_or(0.0)
    }

    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.values.keys().copied()
    }

    pub fn is_animating(&self, scheduler: &AnimationScheduler) -> bool {
        self.values.values().any(|id| scheduler.is_animating(*id))
    }

    /// Register values, apply the initial state and start `animate`
    pub fn mount(&mut self, scheduler: &mut AnimationScheduler) -> Result<()> {
        self.prepare(scheduler, None)?;
        self.run_animate(scheduler)
    }

    /// Register values and apply the initial state, or `inherited` (a parent's
    /// initial label) when this element has none of its own
    pub(crate) fn prepare(
        &mut self,
        scheduler: &mut AnimationScheduler,
        inherited: Option<&str>,
    ) -> Result<()> {
        let mut properties: Vec<Property> = self.variants.properties().collect();
        for target in [
            match &self.initial {
                Initial::Target(t) => Some(t),
                _ => None,
            },
            match &self.animate {
                Animate::Target(t) => Some(t),
                _ => None,
            },
            self.hover.as_ref(),
            self.tap.as_ref(),
        ]
        .into_iter()
        .flatten()
        {
            properties.extend(target.properties());
        }
        for property in properties {
            self.ensure_value(property, scheduler);
        }

        let initial = match (&self.initial, inherited) {
            (Initial::Target(target), _) => Some(target.clone()),
            (Initial::Label(label), _) => self.variants.get(label).map(|v| v.target.clone()),
            (Initial::Unset, Some(label)) => self.variants.get(label).map(|v| v.target.clone()),
            (Initial::Unset, None) => None,
        };
        if let Some(target) = initial {
            for (property, value) in target.iter() {
                if let Some(value) = value.final_value() {
                    let id = self.ensure_value(property, scheduler);
                    scheduler.set_immediate(id, value)?;
                }
            }
        }

        // Gesture targets return to whatever the element showed at mount
        self.base = Target::new();
        for (&property, &id) in &self.values {
            if let Some(value) = scheduler.get(id) {
                self.base.set(property, value);
            }
        }
        self.gesture_target = Target::new();

        tracing::debug!(element = %self.name, values = self.values.len(), "motion element mounted");
        Ok(())
    }

    pub(crate) fn run_animate(&mut self, scheduler: &mut AnimationScheduler) -> Result<()> {
        match self.animate.clone() {
            Animate::None => Ok(()),
            Animate::Target(target) => {
                let transition = self.transition.clone();
                self.run(&target, &transition, 0.0, true, scheduler)
            }
            Animate::Label(label) => self.start_label(&label, 0.0, scheduler).map(|_| ()),
            Animate::Controls(controls) => {
                self.subscription = Some(controls.subscribe());
                Ok(())
            }
        }
    }

    /// Animate to a variant; false when the label is unknown
    pub fn start_label(
        &mut self,
        label: &str,
        extra_delay_ms: f32,
        scheduler: &mut AnimationScheduler,
    ) -> Result<bool> {
        let Some(variant) = self.variants.get(label) else {
            tracing::warn!(element = %self.name, label, "unknown variant label");
            return Ok(false);
        };
        let target = variant.target.clone();
        let transition = variant
            .transition
            .clone()
            .unwrap_or_else(|| self.transition.clone());

        tracing::debug!(element = %self.name, label, delay_ms = extra_delay_ms, "variant started");
        self.run(&target, &transition, extra_delay_ms, true, scheduler)?;
        self.label = Some(label.to_string());
        Ok(true)
    }

    /// Transition that orchestrates children for `label`
    pub fn transition_for(&self, label: &str) -> &TransitionSpec {
        self.variants
            .get(label)
            .and_then(|v| v.transition.as_ref())
            .unwrap_or(&self.transition)
    }

    /// Start labels queued through bound controls; returns how many ran
    pub fn poll_controls(&mut self, scheduler: &mut AnimationScheduler) -> Result<usize> {
        let labels = match &self.subscription {
            Some(subscription) => subscription.drain(),
            None => return Ok(0),
        };
        let mut started = 0;
        for label in labels {
            if self.start_label(&label, 0.0, scheduler)? {
                started += 1;
            }
        }
        Ok(started)
    }

    /// Layer hover and tap targets for a gesture state over the resting values
    ///
    /// Only properties whose destination changed are re-animated. Returns
    /// true when anything started.
    pub fn apply_gesture(
        &mut self,
        state: GestureState,
        scheduler: &mut AnimationScheduler,
    ) -> Result<bool> {
        let gesture_properties: Vec<Property> = self
            .hover
            .iter()
            .chain(self.tap.iter())
            .flat_map(|t| t.properties())
            .collect();
        if gesture_properties.is_empty() {
            return Ok(false);
        }

        let mut target = Target::new();
        for &property in &gesture_properties {
            let resting = self
                .base
                .get(property)
                .cloned()
                .unwrap_or_else(|| TargetValue::Single(property.initial_value()));
            target.set(property, resting);
        }
        if state.is_hovered() {
            if let Some(hover) = &self.hover {
                target = target.merged(hover);
            }
        }
        if state.is_pressed() {
            if let Some(tap) = &self.tap {
                target = target.merged(tap);
            }
        }

        let mut changed = Target::new();
        for (property, value) in target.iter() {
            if self.gesture_target.get(property) != Some(value) {
                changed.set(property, value.clone());
            }
        }
        self.gesture_target = target;
        if changed.is_empty() {
            return Ok(false);
        }

        tracing::debug!(element = %self.name, ?state, properties = changed.len(), "gesture target applied");
        let transition = self.transition.clone();
        self.run(&changed, &transition, 0.0, false, scheduler)?;
        Ok(true)
    }

    /// Jump a property to a value (for values driven from outside, such as
    /// scroll-linked transforms)
    pub fn set_value(
        &mut self,
        property: Property,
        value: Value,
        scheduler: &mut AnimationScheduler,
    ) -> Result<()> {
        let id = self.ensure_value(property, scheduler);
        scheduler.set_immediate(id, value)?;
        Ok(())
    }

    /// Drop every bound value; returns how many were removed
    pub fn unmount(&mut self, scheduler: &mut AnimationScheduler) -> usize {
        let removed = self
            .values
            .drain(..)
            .filter(|(_, id)| scheduler.remove(*id).is_some())
            .count();
        self.subscription = None;
        self.label = None;
        tracing::debug!(element = %self.name, removed, "motion element unmounted");
        removed
    }

    fn ensure_value(
        &mut self,
        property: Property,
        scheduler: &mut AnimationScheduler,
    ) -> MotionValueId {
        if let Some(id) = self.values.get(&property) {
            if scheduler.get(*id).is_some() {
                return *id;
            }
        }
        let id = scheduler.create(property.initial_value());
        self.values.insert(property, id);
        id
    }

    fn run(
        &mut self,
        target: &Target,
        transition: &TransitionSpec,
        extra_delay_ms: f32,
        update_base: bool,
        scheduler: &mut AnimationScheduler,
    ) -> Result<()> {
        for (property, value) in target.iter() {
            let id = self.ensure_value(property, scheduler);
            let end = value.final_value();
            let resolved = transition
                .resolve(
                    property,
                    end.and_then(|v| v.scalar()),
                    value.keyframe_count(),
                )
                .with_extra_delay(extra_delay_ms);

            match value {
                TargetValue::Single(v) => scheduler.animate_to(id, *v, &resolved)?,
                TargetValue::Keyframes(frames) if frames.len() == 1 => {
                    scheduler.animate_to(id, frames[0], &resolved)?
                }
                TargetValue::Keyframes(frames) => {
                    scheduler.animate_keyframes(id, frames.clone(), &resolved)?
                }
            }

            if update_base {
                if let Some(end) = end {
                    self.base.set(property, end);
                }
            }
        }
        Ok(())
    }
}

/// A parent element whose variant labels propagate to its children
#[derive(Debug)]
pub struct MotionGroup {
    parent: MotionElement,
    children: Vec<MotionElement>,
}

impl MotionGroup {
    pub fn new(parent: MotionElement, children: Vec<MotionElement>) -> Self {
        Self { parent, children }
    }

    pub fn parent(&self) -> &MotionElement {
        &self.parent
    }

    pub fn children(&self) -> &[MotionElement] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&MotionElement> {
        self.children.get(index)
    }

    /// Mount parent and children; children inherit the parent's initial and
    /// animate labels
    pub fn mount(&mut self, scheduler: &mut AnimationScheduler) -> Result<()> {
        self.parent.prepare(scheduler, None)?;
        let inherited = match &self.parent.initial {
            Initial::Label(label) => Some(label.clone()),
            _ => None,
        };
        for child in &mut self.children {
            let from_parent = if child.inherits() {
                inherited.as_deref()
            } else {
                None
            };
            child.prepare(scheduler, from_parent)?;
            child.run_animate(scheduler)?;
        }

        match self.parent.animate.clone() {
            Animate::Label(label) => self.start(&label, scheduler).map(|_| ()),
            _ => self.parent.run_animate(scheduler),
        }
    }

    /// Start a label on the parent and, staggered, on inheriting children
    pub fn start(&mut self, label: &str, scheduler: &mut AnimationScheduler) -> Result<bool> {
        let started = self.parent.start_label(label, 0.0, scheduler)?;
        let stagger = self.parent.transition_for(label).stagger();
        let total = self.children.len();

        for (index, child) in self.children.iter_mut().enumerate() {
            if !child.inherits() {
                continue;
            }
            let delay = stagger
                .map(|s| s.delay_for_index(index, total))
                .unwrap_or(0.0);
            child.start_label(label, delay, scheduler)?;
        }
        Ok(started)
    }

    pub fn is_animating(&self, scheduler: &AnimationScheduler) -> bool {
        self.parent.is_animating(scheduler)
            || self.children.iter().any(|c| c.is_animating(scheduler))
    }

    pub fn unmount(&mut self, scheduler: &mut AnimationScheduler) -> usize {
        let children: usize = self
            .children
            .iter_mut()
            .map(|child| child.unmount(scheduler))
            .sum();
        children + self.parent.unmount(scheduler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_animation::Easing;

    fn run(scheduler: &mut AnimationScheduler, ms: f32) {
        let mut elapsed = 0.0;
        while elapsed < ms {
            scheduler.tick(16.0);
            elapsed += 16.0;
        }
    }

    fn fade_variants() -> Variants {
        Variants::new()
            .with("hidden", Target::new().with(Property::Opacity, 0.0))
            .with("show", Target::new().with(Property::Opacity, 1.0))
    }

    #[test]
    fn test_initial_then_animate() {
        let mut scheduler = AnimationScheduler::new();
        let mut element = MotionElement::new("box")
            .initial(Target::new().with(Property::Opacity, 0.0).with(Property::Y, 100.0))
            .animate(Target::new().with(Property::Opacity, 1.0).with(Property::Y, 0.0))
            .transition(TransitionSpec::tween(1000.0, Easing::EaseOut).delay(200.0));
        element.mount(&mut scheduler).unwrap();

        assert_eq!(element.scalar(Property::Opacity, &scheduler), 0.0);
        assert_eq!(element.scalar(Property::Y, &scheduler), 100.0);

        run(&mut scheduler, 150.0);
        assert_eq!(element.scalar(Property::Opacity, &scheduler), 0.0);

        run(&mut scheduler, 1100.0);
        assert_eq!(element.scalar(Property::Opacity, &scheduler), 1.0);
        assert_eq!(element.scalar(Property::Y, &scheduler), 0.0);
        assert!(!element.is_animating(&scheduler));
    }

    #[test]
    fn test_unknown_label_is_ignored() {
        let mut scheduler = AnimationScheduler::new();
        let mut element = MotionElement::new("box").variants(fade_variants());
        element.mount(&mut scheduler).unwrap();
        assert!(!element.start_label("missing", 0.0, &mut scheduler).unwrap());
        assert!(element.current_label().is_none());
    }

    #[test]
    fn test_controls_start_variant() {
        let mut scheduler = AnimationScheduler::new();
        let controls = AnimationControls::new();
        let mut heading = MotionElement::new("heading")
            .variants(
                Variants::new()
                    .with("hidden", Target::new().with(Property::Opacity, 0.0).with(Property::Y, 75.0))
                    .with("visible", Target::new().with(Property::Opacity, 1.0).with(Property::Y, 0.0)),
            )
            .initial_label("hidden")
            .animate_controls(&controls)
            .transition(TransitionSpec::delayed(300.0));
        heading.mount(&mut scheduler).unwrap();

        run(&mut scheduler, 500.0);
        assert_eq!(heading.poll_controls(&mut scheduler).unwrap(), 0);
        assert_eq!(heading.scalar(Property::Y, &scheduler), 75.0);

        controls.start("visible");
        assert_eq!(heading.poll_controls(&mut scheduler).unwrap(), 1);
        assert_eq!(heading.current_label(), Some("visible"));

        run(&mut scheduler, 2000.0);
        assert_eq!(heading.scalar(Property::Opacity, &scheduler), 1.0);
        assert_eq!(heading.scalar(Property::Y, &scheduler), 0.0);
    }

    #[test]
    fn test_gesture_layers() {
        let mut scheduler = AnimationScheduler::new();
        let emerald = Value::Color(kinetic_core::Color::from_hex(0x059669));
        let mut button = MotionElement::new("button")
            .initial(
                Target::new()
                    .with(Property::Scale, 1.0)
                    .with(Property::BackgroundColor, emerald),
            )
            .while_hover(
                Target::new()
                    .with(Property::Scale, 1.1)
                    .with(Property::BackgroundColor, emerald),
            )
            .while_tap(Target::new().with(Property::Scale, 0.9))
            .transition(TransitionSpec::default().bounce(600.0, 10.0));
        button.mount(&mut scheduler).unwrap();

        assert!(button.apply_gesture(GestureState::Hovered, &mut scheduler).unwrap());
        run(&mut scheduler, 400.0);
        assert!((button.scalar(Property::Scale, &scheduler) - 1.1).abs() < 1e-5);

        button.apply_gesture(GestureState::Pressed, &mut scheduler).unwrap();
        run(&mut scheduler, 400.0);
        assert!((button.scalar(Property::Scale, &scheduler) - 0.9).abs() < 1e-5);

        // Unchanged destinations are not restarted
        assert!(!button.apply_gesture(GestureState::Pressed, &mut scheduler).unwrap());

        button.apply_gesture(GestureState::Idle, &mut scheduler).unwrap();
        run(&mut scheduler, 400.0);
        assert!((button.scalar(Property::Scale, &scheduler) - 1.0).abs() < 1e-5);
        assert_eq!(button.value(Property::BackgroundColor, &scheduler), Some(emerald));
    }

    #[test]
    fn test_group_staggers_children() {
        let mut scheduler = AnimationScheduler::new();
        let parent = MotionElement::new("grid")
            .variants(
                Variants::new()
                    .with("hidden", Target::new().with(Property::Opacity, 0.0))
                    .with(
                        "show",
                        crate::variants::Variant::new(Target::new().with(Property::Opacity, 1.0))
                            .with_transition(TransitionSpec::default().stagger_children(250.0)),
                    ),
            )
            .initial_label("hidden")
            .animate_label("show");
        let children = (0..3)
            .map(|i| MotionElement::new(format!("cell-{i}")).variants(fade_variants()))
            .collect();
        let mut group = MotionGroup::new(parent, children);
        group.mount(&mut scheduler).unwrap();

        for child in group.children() {
            assert_eq!(child.scalar(Property::Opacity, &scheduler), 0.0);
            assert_eq!(child.current_label(), Some("show"));
        }

        // Child 0 runs 0..300ms, child 1 250..550ms, child 2 500..800ms
        run(&mut scheduler, 320.0);
        let opacity: Vec<f32> = group
            .children()
            .iter()
            .map(|c| c.scalar(Property::Opacity, &scheduler))
            .collect();
        assert_eq!(opacity[0], 1.0);
        assert!(opacity[1] > 0.0 && opacity[1] < 1.0);
        assert_eq!(opacity[2], 0.0);

        run(&mut scheduler, 600.0);
        for child in group.children() {
            assert_eq!(child.scalar(Property::Opacity, &scheduler), 1.0);
        }
        assert_eq!(group.unmount(&mut scheduler), 4);
        assert!(scheduler.is_empty());
    }
}
