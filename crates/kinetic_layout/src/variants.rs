//! Animation targets, named variants and imperative controls

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use indexmap::IndexMap;
use kinetic_animation::{Property, TransitionSpec, Value};
use rustc_hash::FxHashMap;

/// Destination of one property: a value or a keyframe sequence
#[derive(Clone, Debug, PartialEq)]
pub enum TargetValue {
    Single(Value),
    Keyframes(Vec<Value>),
}

impl TargetValue {
    /// Final value the property rests at
    pub fn final_value(&self) -> Option<Value> {
        match self {
            TargetValue::Single(v) => Some(*v),
            TargetValue::Keyframes(frames) => frames.last().copied(),
        }
    }

    pub fn keyframe_count(&self) -> usize {
        match self {
            TargetValue::Single(_) => 2,
            TargetValue::Keyframes(frames) => frames.len(),
        }
    }
}

impl From<Value> for TargetValue {
    fn from(value: Value) -> Self {
        TargetValue::Single(value)
    }
}

impl From<f32> for TargetValue {
    fn from(value: f32) -> Self {
        TargetValue::Single(Value::Number(value))
    }
}

impl From<Vec<Value>> for TargetValue {
    fn from(frames: Vec<Value>) -> Self {
        TargetValue::Keyframes(frames)
    }
}

impl From<Vec<f32>> for TargetValue {
    fn from(frames: Vec<f32>) -> Self {
        TargetValue::Keyframes(frames.into_iter().map(Value::Number).collect())
    }
}

/// Ordered set of property destinations
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Target {
    values: IndexMap<Property, TargetValue>,
}

impl Target {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Target::set`]
    pub fn with(mut self, property: Property, value: impl Into<TargetValue>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: Property, value: impl Into<TargetValue>) {
        self.values.insert(property, value.into());
    }

    pub fn get(&self, property: Property) -> Option<&TargetValue> {
        self.values.get(&property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, &TargetValue)> {
        self.values.iter().map(|(p, v)| (*p, v))
    }

    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.values.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Layer `other` on top, its entries winning
    pub fn merged(&self, other: &Target) -> Target {
        let mut merged = self.clone();
        for (property, value) in other.iter() {
            merged.values.insert(property, value.clone());
        }
        merged
    }
}

/// A named visual state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Variant {
    pub target: Target,
    /// Overrides the element's transition when present
    pub transition: Option<TransitionSpec>,
}

impl Variant {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            transition: None,
        }
    }

    pub fn with_transition(mut self, transition: TransitionSpec) -> Self {
        self.transition = Some(transition);
        self
    }
}

impl From<Target> for Variant {
    fn from(target: Target) -> Self {
        Variant::new(target)
    }
}

/// Label to variant mapping
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Variants {
    variants: IndexMap<String, Variant>,
}

impl Variants {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, label: impl Into<String>, variant: impl Into<Variant>) -> Self {
        self.variants.insert(label.into(), variant.into());
        self
    }

    pub fn get(&self, label: &str) -> Option<&Variant> {
        self.variants.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    /// Every property any variant animates
    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.variants.values().flat_map(|v| v.target.properties())
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[derive(Debug, Default)]
struct ControlsInner {
    queues: FxHashMap<u64, VecDeque<String>>,
    next_id: u64,
}

/// Cloneable handle that starts variants on every bound element
///
/// Labels are queued and picked up by each element on its next update.
#[derive(Clone, Debug, Default)]
pub struct AnimationControls {
    inner: Arc<Mutex<ControlsInner>>,
}

impl AnimationControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `label` for every bound element; returns how many received it
    pub fn start(&self, label: &str) -> usize {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        for queue in inner.queues.values_mut() {
            queue.push_back(label.to_string());
        }
        tracing::debug!(label, subscribers = inner.queues.len(), "controls started");
        inner.queues.len()
    }

    /// Bind a new element
    pub fn subscribe(&self) -> ControlsSubscription {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.queues.insert(id, VecDeque::new());
        ControlsSubscription {
            id,
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .queues
            .len()
    }
}

/// One element's binding to [`AnimationControls`]; unbinds on drop
#[derive(Debug)]
pub struct ControlsSubscription {
    id: u64,
    inner: Arc<Mutex<ControlsInner>>,
}

impl ControlsSubscription {
    /// Labels started since the last call, oldest first
    pub fn drain(&self) -> Vec<String> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner
            .queues
            .get_mut(&self.id)
            .map(|queue| queue.drain(..).collect())
            .unwrap_or_default()
    }
}

impl Drop for ControlsSubscription {
    fn drop(&mut self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.queues.remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_merge_priority() {
        let base = Target::new()
            .with(Property::Scale, 1.0)
            .with(Property::Opacity, 1.0);
        let hover = Target::new().with(Property::Scale, 1.1);

        let merged = base.merged(&hover);
        assert_eq!(
            merged.get(Property::Scale),
            Some(&TargetValue::Single(Value::Number(1.1)))
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_keyframe_target() {
        let value: TargetValue = vec![1.0, 2.0, 2.0, 1.0].into();
        assert_eq!(value.keyframe_count(), 4);
        assert_eq!(value.final_value(), Some(Value::Number(1.0)));
    }

    #[test]
    fn test_variants_lookup() {
        let variants = Variants::new()
            .with("hidden", Target::new().with(Property::Opacity, 0.0))
            .with(
                "visible",
                Variant::new(Target::new().with(Property::Opacity, 1.0).with(Property::Y, 0.0))
                    .with_transition(TransitionSpec::delayed(300.0)),
            );

        assert_eq!(variants.labels().collect::<Vec<_>>(), ["hidden", "visible"]);
        assert!(variants.get("visible").unwrap().transition.is_some());
        assert!(variants.get("missing").is_none());
        assert_eq!(variants.properties().count(), 3);
    }

    #[test]
    fn test_controls_fan_out() {
        let controls = AnimationControls::new();
        let a = controls.subscribe();
        let b = controls.clone().subscribe();

        assert_eq!(controls.start("visible"), 2);
        assert_eq!(a.drain(), vec!["visible".to_string()]);
        assert!(a.drain().is_empty());
        assert_eq!(b.drain(), vec!["visible".to_string()]);

        drop(b);
        assert_eq!(controls.subscriber_count(), 1);
        assert_eq!(controls.start("hidden"), 1);
    }

    #[test]
    fn test_start_without_subscribers() {
        let controls = AnimationControls::new();
        assert_eq!(controls.start("visible"), 0);
    }
}
