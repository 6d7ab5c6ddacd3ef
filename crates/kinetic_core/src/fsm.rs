//! State machine trait shared by interaction states
//!
//! Interaction states (gestures, viewport visibility, drag) are small enums
//! that react to numeric event codes. Returning `None` means the event does
//! not cause a transition from the current state.

use std::hash::Hash;

/// Trait for enum-based state machines driven by event codes
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;

    /// Apply an event in place, returning true when the state changed
    fn apply(&mut self, event: u32) -> bool {
        match self.on_event(event) {
            Some(next) if next != *self => {
                *self = next;
                true
            }
            _ => false,
        }
    }
}
