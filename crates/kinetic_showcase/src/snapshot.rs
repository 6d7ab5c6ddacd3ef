//! Frame snapshots
//!
//! A `FrameSnapshot` captures every animated value on the page at one
//! instant. It serializes to JSON for tooling and prints as a compact text
//! report for the CLI.

use std::fmt;

use kinetic_layout::{DragPhase, GestureState};
use serde::{Deserialize, Serialize};

/// Everything visible at one frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Time since mount
    pub time_ms: f64,
    pub scroll: ScrollSnapshot,
    pub grid_opacity: f32,
    pub cells: Vec<CellSnapshot>,
    pub heading: HeadingSnapshot,
    pub paragraphs: Vec<ParagraphSnapshot>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollSnapshot {
    pub y: f32,
    /// Whole-page progress (0..1)
    pub page_progress: f32,
    /// Progress through the scroll section's range (0..1)
    pub section_progress: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub index: usize,
    pub opacity: f32,
    /// Own opacity multiplied by the grid's
    pub effective_opacity: f32,
    pub content: CellContent,
}

/// Animated state inside a grid cell
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CellContent {
    Fade {
        square_opacity: f32,
        square_y: f32,
        circle_opacity: f32,
        circle_y: f32,
    },
    Shape {
        scale: f32,
        rotate: f32,
        border_radius_percent: f32,
    },
    Button {
        scale: f32,
        /// CSS `rgba(...)` text
        background: String,
        gesture: GestureState,
    },
    Drag {
        x: f32,
        y: f32,
        phase: DragPhase,
    },
    ScrollProgress {
        scale_y: f32,
    },
    Icon {
        opacity: f32,
        path_length: f32,
        /// Stroke dash pattern for `path_length`, in viewBox units
        dash: f32,
        gap: f32,
        fill: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeadingSnapshot {
    /// The reveal has been triggered
    pub visible: bool,
    pub opacity: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParagraphSnapshot {
    pub index: usize,
    pub translate_x_percent: f32,
}

impl FrameSnapshot {
    pub fn cell(&self, index: usize) -> Option<&CellSnapshot> {
        self.cells.iter().find(|cell| cell.index == index)
    }
}

impl fmt::Display for CellContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellContent::Fade {
                square_opacity,
                square_y,
                circle_opacity,
                circle_y,
            } => write!(
                f,
                "fade square {square_opacity:.2}@{square_y:.1} circle {circle_opacity:.2}@{circle_y:.1}"
            ),
            CellContent::Shape {
                scale,
                rotate,
                border_radius_percent,
            } => write!(
                f,
                "shape scale {scale:.3} rotate {rotate:.1} radius {border_radius_percent:.1}%"
            ),
            CellContent::Button {
                scale,
                background,
                gesture,
            } => write!(f, "button scale {scale:.3} {background} {gesture:?}"),
            CellContent::Drag { x, y, phase } => write!(f, "drag ({x:.1}, {y:.1}) {phase:?}"),
            CellContent::ScrollProgress { scale_y } => write!(f, "progress {scale_y:.3}"),
            CellContent::Icon {
                opacity,
                path_length,
                dash,
                gap,
                fill,
            } => write!(
                f,
                "icon opacity {opacity:.2} path {path_length:.3} dash {dash:.2}/{gap:.2} fill {fill}"
            ),
        }
    }
}

impl fmt::Display for FrameSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "t={:.0}ms scroll={:.1} page={:.3} section={:.3} grid={:.2}",
            self.time_ms,
            self.scroll.y,
            self.scroll.page_progress,
            self.scroll.section_progress,
            self.grid_opacity
        )?;
        for cell in &self.cells {
            writeln!(
                f,
                "  cell-{} {:.2} (eff {:.2}) {}",
                cell.index, cell.opacity, cell.effective_opacity, cell.content
            )?;
        }
        writeln!(
            f,
            "  heading {} opacity {:.2} y {:.1}",
            if self.heading.visible { "shown" } else { "hidden" },
            self.heading.opacity,
            self.heading.y
        )?;
        for paragraph in &self.paragraphs {
            writeln!(
                f,
                "  paragraph-{} translateX {:.1}%",
                paragraph.index, paragraph.translate_x_percent
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> FrameSnapshot {
        FrameSnapshot {
            time_ms: 16.0,
            scroll: ScrollSnapshot {
                y: 0.0,
                page_progress: 0.0,
                section_progress: 0.0,
            },
            grid_opacity: 0.5,
            cells: vec![CellSnapshot {
                index: 3,
                opacity: 1.0,
                effective_opacity: 0.5,
                content: CellContent::Drag {
                    x: 12.0,
                    y: -4.0,
                    phase: DragPhase::Momentum,
                },
            }],
            heading: HeadingSnapshot {
                visible: false,
                opacity: 0.0,
                y: 75.0,
            },
            paragraphs: vec![ParagraphSnapshot {
                index: 0,
                translate_x_percent: -100.0,
            }],
        }
    }

    #[test]
    fn test_cell_content_is_tagged() {
        let json = serde_json::to_value(snapshot()).unwrap();
        let content = &json["cells"][0]["content"];
        assert_eq!(content["type"], "drag");
        assert_eq!(content["phase"], "momentum");
    }

    #[test]
    fn test_text_report() {
        let text = snapshot().to_string();
        assert!(text.starts_with("t=16ms"));
        assert!(text.contains("cell-3 1.00 (eff 0.50) drag (12.0, -4.0) Momentum"));
        assert!(text.contains("heading hidden"));
        assert!(text.contains("paragraph-0 translateX -100.0%"));
    }

    #[test]
    fn test_cell_lookup() {
        let snapshot = snapshot();
        assert!(snapshot.cell(3).is_some());
        assert!(snapshot.cell(0).is_none());
    }
}
