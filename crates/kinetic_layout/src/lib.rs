//! Kinetic Layout
//!
//! Page geometry and everything that reacts to it:
//!
//! - **Layout**: the showcase page as a taffy flexbox tree, resolved to
//!   absolute rectangles
//! - **Scroll**: `"start end"`-style scroll offsets, clamped element and page
//!   progress
//! - **In View**: fire-once viewport intersection
//! - **Gestures**: hover / tap state machine with hit testing
//! - **Drag**: constrained drag with release inertia and bounce
//! - **Motion**: variants, animation controls and the elements that bind
//!   properties to scheduler values

pub mod drag;
pub mod error;
pub mod gesture;
pub mod in_view;
pub mod motion;
pub mod scroll;
pub mod tree;
pub mod variants;

pub use drag::{DragConfig, DragConstraints, DragController, DragPhase};
pub use error::{LayoutError, Result};
pub use gesture::{GestureLayer, GestureRecognizer, GestureState};
pub use in_view::{Amount, InViewChange, InViewObserver, InViewOptions, InViewState};
pub use motion::{Animate, Initial, MotionElement, MotionGroup};
pub use scroll::{page_progress, Edge, ScrollOffset, ScrollRange, ScrollTracker};
pub use tree::{LayoutConfig, PageLayout, PageNode, GRID_CELLS, GRID_COLUMNS};
pub use variants::{
    AnimationControls, ControlsSubscription, Target, TargetValue, Variant, Variants,
};
