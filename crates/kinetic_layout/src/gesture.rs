//! Hover and tap gestures
//!
//! ```text
//!            ENTER              DOWN
//!   Idle ─────────▶ Hovered ─────────▶ Pressed
//!     ▲  ◀───────── LEAVE   ◀───────── UP (tap)
//!     │                                  │ LEAVE   ▲ ENTER
//!     │           UP (cancelled)         ▼         │
//!     └────────────────────────────── PressedOutside
//! ```

use kinetic_core::events::pointer;
use kinetic_core::{PointerEvent, PointerKind, Rect, StateTransitions};
use serde::{Deserialize, Serialize};

/// Pointer interaction state of one element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureState {
    #[default]
    Idle,
    Hovered,
    Pressed,
    /// Pressed, then dragged off the element
    PressedOutside,
}

impl GestureState {
    /// Pointer is over the element
    pub fn is_hovered(&self) -> bool {
        matches!(self, GestureState::Hovered | GestureState::Pressed)
    }

    /// A press that started on the element is still held
    pub fn is_pressed(&self) -> bool {
        matches!(self, GestureState::Pressed | GestureState::PressedOutside)
    }

    /// Which gesture target applies
    pub fn layer(&self) -> GestureLayer {
        if self.is_pressed() {
            GestureLayer::Tap
        } else if self.is_hovered() {
            GestureLayer::Hover
        } else {
            GestureLayer::Base
        }
    }
}

impl StateTransitions for GestureState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use pointer::*;

        match (self, event) {
            (GestureState::Idle, ENTER) => Some(GestureState::Hovered),
            // Touch input presses without hovering first
            (GestureState::Idle, DOWN) => Some(GestureState::Pressed),

            (GestureState::Hovered, LEAVE) => Some(GestureState::Idle),
            (GestureState::Hovered, DOWN) => Some(GestureState::Pressed),

            (GestureState::Pressed, UP) => Some(GestureState::Hovered),
            (GestureState::Pressed, LEAVE) => Some(GestureState::PressedOutside),
            (GestureState::Pressed, CANCEL) => Some(GestureState::Hovered),

            (GestureState::PressedOutside, ENTER) => Some(GestureState::Pressed),
            (GestureState::PressedOutside, UP | CANCEL) => Some(GestureState::Idle),

            _ => None,
        }
    }
}

/// Gesture target priority: tap over hover over base
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GestureLayer {
    #[default]
    Base,
    Hover,
    Tap,
}

/// Turns positioned pointer events into gesture state for one element
#[derive(Clone, Debug)]
pub struct GestureRecognizer {
    bounds: Rect,
    state: GestureState,
    taps: u32,
}

impl GestureRecognizer {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            state: GestureState::Idle,
            taps: 0,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Update the hit area after a relayout
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Completed taps (press and release on the element)
    pub fn taps(&self) -> u32 {
        self.taps
    }

    /// Feed an event; returns the new state when it changed
    pub fn handle(&mut self, event: &PointerEvent) -> Option<GestureState> {
        let inside = self.bounds.contains(event.position);
        let code = match event.kind {
            PointerKind::Move | PointerKind::Enter | PointerKind::Leave => {
                match (inside, self.state) {
                    (true, GestureState::Idle | GestureState::PressedOutside) => pointer::ENTER,
                    (false, GestureState::Hovered | GestureState::Pressed) => pointer::LEAVE,
                    _ => return None,
                }
            }
            PointerKind::Down if !inside => return None,
            kind => kind.code(),
        };

        let before = self.state;
        if !self.state.apply(code) {
            return None;
        }
        if before == GestureState::Pressed && event.kind == PointerKind::Up {
            self.taps += 1;
        }

        tracing::debug!(from = ?before, to = ?self.state, "gesture state changed");
        Some(self.state)
    }
}
