//! Kinetic SVG
//!
//! Loads SVG path data through `usvg` and measures it, so a `pathLength`
//! animation (0 = nothing drawn, 1 = full outline) can be turned into a
//! stroke dash pattern.

pub mod document;
pub mod error;
pub mod path;

pub use document::IconDocument;
pub use error::{Result, SvgError};
pub use path::{IconPath, PathCommand, StrokeDash};
