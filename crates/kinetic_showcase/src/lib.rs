//! Kinetic Showcase
//!
//! A headless demonstration page built on the Kinetic crates: a grid of six
//! animated cells (fade, looping shape, gesture button, drag handle, scroll
//! progress and a self-drawing icon) followed by a scroll-linked section.
//!
//! The host owns time. It mounts the page, then feeds frame ticks, scroll
//! positions and pointer events, and reads back snapshots:
//!
//! ```rust
//! use kinetic_showcase::{Showcase, ShowcaseConfig};
//!
//! let mut page = Showcase::mount(ShowcaseConfig::default()).unwrap();
//! for _ in 0..120 {
//!     page.tick(16.0).unwrap();
//! }
//! page.scroll_to(400.0).unwrap();
//! assert!(page.heading_visible());
//! println!("{}", page.snapshot());
//! ```

pub mod config;
pub mod elements;
pub mod error;
pub mod showcase;
pub mod simulation;
pub mod snapshot;

pub use config::{DragSettings, RevealConfig, ShowcaseConfig, ViewportConfig, CONFIG_FILE};
pub use error::{Result, ShowcaseError};
pub use showcase::Showcase;
pub use simulation::{ScrollStep, Simulation};
pub use snapshot::{
    CellContent, CellSnapshot, FrameSnapshot, HeadingSnapshot, ParagraphSnapshot, ScrollSnapshot,
};
