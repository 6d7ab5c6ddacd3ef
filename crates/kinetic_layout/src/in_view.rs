//! Viewport intersection
//!
//! An `InViewObserver` watches one element and reports when it enters or
//! leaves the viewport. With `once` set, the first entry is final: the
//! observer disconnects and keeps reporting the element as visible.

use kinetic_core::{Rect, StateTransitions};
use serde::{Deserialize, Serialize};

/// Visibility of the observed element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InViewState {
    #[default]
    NotVisible,
    Visible,
}

/// Events driving [`InViewState`]
pub mod in_view_events {
    /// Enough of the element entered the viewport
    pub const ENTER: u32 = 20;
    /// The element left the viewport
    pub const LEAVE: u32 = 21;
}

impl StateTransitions for InViewState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use in_view_events::*;

        match (self, event) {
            (InViewState::NotVisible, ENTER) => Some(InViewState::Visible),
            (InViewState::Visible, LEAVE) => Some(InViewState::NotVisible),
            _ => None,
        }
    }
}

/// How much of the element must be visible to count as in view
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Amount {
    /// Any overlap
    #[default]
    Some,
    /// The whole element
    All,
    /// At least this fraction of the element's area
    Fraction(f32),
}

/// Observer settings
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InViewOptions {
    /// Stop observing after the first entry
    pub once: bool,
    pub amount: Amount,
    /// Grows the viewport on every side (negative shrinks it)
    pub margin: f32,
}

impl Default for InViewOptions {
    fn default() -> Self {
        Self {
            once: false,
            amount: Amount::Some,
            margin: 0.0,
        }
    }
}

impl InViewOptions {
    pub fn once() -> Self {
        Self {
            once: true,
            ..Default::default()
        }
    }
}

/// Reported visibility change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InViewChange {
    Entered,
    Left,
}

/// Tracks one element against the viewport
#[derive(Clone, Debug, Default)]
pub struct InViewObserver {
    options: InViewOptions,
    state: InViewState,
    disconnected: bool,
}

impl InViewObserver {
    pub fn new(options: InViewOptions) -> Self {
        Self {
            options,
            state: InViewState::NotVisible,
            disconnected: false,
        }
    }

    pub fn options(&self) -> &InViewOptions {
        &self.options
    }

    pub fn state(&self) -> InViewState {
        self.state
    }

    pub fn is_in_view(&self) -> bool {
        self.state == InViewState::Visible
    }

    /// A `once` observer stops after its first entry
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    /// Check the element against the viewport, both in document coordinates
    pub fn observe(&mut self, element: Rect, viewport: Rect) -> Option<InViewChange> {
        if self.disconnected {
            return None;
        }

        let inside = self.intersects(element, viewport);
        let event = if inside {
            in_view_events::ENTER
        } else {
            in_view_events::LEAVE
        };
        if !self.state.apply(event) {
            return None;
        }

        tracing::debug!(state = ?self.state, ?element, "in-view state changed");
        if self.state == InViewState::Visible {
            if self.options.once {
                self.disconnected = true;
            }
            Some(InViewChange::Entered)
        } else {
            Some(InViewChange::Left)
        }
    }

    fn intersects(&self, element: Rect, viewport: Rect) -> bool {
        let root = viewport.inflate(self.options.margin);
        let area = element.size.area();

        // Zero-area elements are in view when they touch the root
        if area <= 0.0 {
            let e = element;
            return e.x() <= root.right()
                && e.right() >= root.x()
                && e.y() <= root.bottom()
                && e.bottom() >= root.y();
        }

        let visible = element
            .intersection(&root)
            .map(|overlap| overlap.size.area() / area)
            .unwrap_or(0.0);

        match self.options.amount {
            Amount::Some => visible > 0.0,
            Amount::All => visible >= 1.0 - 1e-4,
            Amount::Fraction(threshold) => visible > 0.0 && visible >= threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport_at(scroll_y: f32) -> Rect {
        Rect::new(0.0, scroll_y, 1280.0, 800.0)
    }

    #[test]
    fn test_fsm_transitions() {
        let state = InViewState::NotVisible;
        assert_eq!(
            state.on_event(in_view_events::ENTER),
            Some(InViewState::Visible)
        );
        assert_eq!(state.on_event(in_view_events::LEAVE), None);
        assert_eq!(
            InViewState::Visible.on_event(in_view_events::LEAVE),
            Some(InViewState::NotVisible)
        );
    }

    #[test]
    fn test_once_fires_a_single_time() {
        let section = Rect::new(0.0, 1000.0, 1280.0, 400.0);
        let mut observer = InViewObserver::new(InViewOptions::once());

        assert_eq!(observer.observe(section, viewport_at(0.0)), None);
        assert_eq!(
            observer.observe(section, viewport_at(300.0)),
            Some(InViewChange::Entered)
        );
        assert!(observer.is_disconnected());

        // Scrolling back up never reverts
        assert_eq!(observer.observe(section, viewport_at(0.0)), None);
        assert!(observer.is_in_view());
        assert_eq!(observer.observe(section, viewport_at(300.0)), None);
    }

    #[test]
    fn test_toggles_without_once() {
        let section = Rect::new(0.0, 1000.0, 1280.0, 400.0);
        let mut observer = InViewObserver::new(InViewOptions::default());

        assert_eq!(
            observer.observe(section, viewport_at(300.0)),
            Some(InViewChange::Entered)
        );
        assert_eq!(observer.observe(section, viewport_at(300.0)), None);
        assert_eq!(
            observer.observe(section, viewport_at(0.0)),
            Some(InViewChange::Left)
        );
        assert!(!observer.is_in_view());
    }

    #[test]
    fn test_touching_edge_is_not_in_view() {
        let section = Rect::new(0.0, 800.0, 1280.0, 400.0);
        let mut observer = InViewObserver::new(InViewOptions::once());
        assert_eq!(observer.observe(section, viewport_at(0.0)), None);
        assert!(observer.observe(section, viewport_at(1.0)).is_some());
    }

    #[test]
    fn test_amount_thresholds() {
        let section = Rect::new(0.0, 1000.0, 1280.0, 400.0);

        let mut all = InViewObserver::new(InViewOptions {
            amount: Amount::All,
            ..Default::default()
        });
        assert_eq!(all.observe(section, viewport_at(300.0)), None);
        assert_eq!(
            all.observe(section, viewport_at(600.0)),
            Some(InViewChange::Entered)
        );

        let mut half = InViewObserver::new(InViewOptions {
            amount: Amount::Fraction(0.5),
            ..Default::default()
        });
        assert_eq!(half.observe(section, viewport_at(399.0)), None);
        assert_eq!(
            half.observe(section, viewport_at(400.0)),
            Some(InViewChange::Entered)
        );
    }

    #[test]
    fn test_margin_grows_viewport() {
        let section = Rect::new(0.0, 850.0, 1280.0, 400.0);
        let mut observer = InViewObserver::new(InViewOptions {
            margin: 100.0,
            ..Default::default()
        });
        assert_eq!(
            observer.observe(section, viewport_at(0.0)),
            Some(InViewChange::Entered)
        );
    }
}
