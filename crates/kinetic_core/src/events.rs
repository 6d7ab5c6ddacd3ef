//! Pointer events
//!
//! Hosts translate their native input into `PointerEvent`s. Each kind maps to
//! a stable numeric code consumed by `StateTransitions` implementations.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Numeric event codes for pointer input
pub mod pointer {
    /// Pointer moved over an element
    pub const ENTER: u32 = 1;
    /// Pointer left an element
    pub const LEAVE: u32 = 2;
    /// Pointer moved
    pub const MOVE: u32 = 3;
    /// Primary button pressed
    pub const DOWN: u32 = 4;
    /// Primary button released
    pub const UP: u32 = 5;
    /// Gesture cancelled by the host
    pub const CANCEL: u32 = 6;
}

/// Kind of pointer event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Enter,
    Leave,
    Move,
    Down,
    Up,
    Cancel,
}

impl PointerKind {
    pub fn code(self) -> u32 {
        match self {
            PointerKind::Enter => pointer::ENTER,
            PointerKind::Leave => pointer::LEAVE,
            PointerKind::Move => pointer::MOVE,
            PointerKind::Down => pointer::DOWN,
            PointerKind::Up => pointer::UP,
            PointerKind::Cancel => pointer::CANCEL,
        }
    }
}

/// A pointer event at a document-space position
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, position: Point) -> Self {
        Self { kind, position }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Move, Point::new(x, y))
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Down, Point::new(x, y))
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Up, Point::new(x, y))
    }

    pub fn code(&self) -> u32 {
        self.kind.code()
    }
}
