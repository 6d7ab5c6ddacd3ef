//! Kinetic Core
//!
//! Foundational types shared by every Kinetic crate:
//!
//! - **Color**: RGBA colors with CSS-style parsing and interpolation
//! - **Geometry**: points, sizes and rectangles in page coordinates
//! - **Events**: pointer events and their numeric codes
//! - **State Machines**: the `StateTransitions` trait used by interaction FSMs

pub mod color;
pub mod error;
pub mod events;
pub mod fsm;
pub mod geometry;

pub use color::Color;
pub use error::{ParseError, Result};
pub use events::{PointerEvent, PointerKind};
pub use fsm::StateTransitions;
pub use geometry::{Point, Rect, Size};
