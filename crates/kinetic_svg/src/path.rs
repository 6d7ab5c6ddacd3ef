//! Path geometry and stroke measurement

use kinetic_core::{Point, Size};

use crate::document::IconDocument;
use crate::error::Result;

/// Curves are measured as this many chords
const CURVE_SUBDIVISIONS: usize = 24;

/// A single path command in absolute coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { control: Point, end: Point },
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    Close,
}

/// Stroke dash pattern drawing the leading part of a path
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeDash {
    /// Drawn length
    pub dash: f32,
    /// Undrawn remainder
    pub gap: f32,
}

/// A measured path, flattened to polylines
#[derive(Clone, Debug)]
pub struct IconPath {
    commands: Vec<PathCommand>,
    /// Flattened subpaths (each a list of points)
    polylines: Vec<Vec<Point>>,
    view_box: Size,
    length: f32,
}

impl IconPath {
    /// Parse path data (`d` attribute) within a viewBox
    pub fn parse(d: &str, view_box: Size) -> Result<Self> {
        let document = IconDocument::from_path_data(d, view_box)?;
        document.first_path().cloned()
    }

    /// Build from absolute commands; None when there is no geometry
    pub fn from_commands(commands: Vec<PathCommand>, view_box: Size) -> Option<Self> {
        let polylines = flatten(&commands);
        if polylines.iter().all(|line| line.len() < 2) {
            return None;
        }
        let length = polylines.iter().map(|line| polyline_length(line)).sum();
        Some(Self {
            commands,
            polylines,
            view_box,
            length,
        })
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn view_box(&self) -> Size {
        self.view_box
    }

    /// Total stroke length in viewBox units
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Dash pattern that draws `path_length` (0..1, clamped) of the outline
    pub fn dash_for(&self, path_length: f32) -> StrokeDash {
        let dash = self.length * path_length.clamp(0.0, 1.0);
        StrokeDash {
            dash,
            gap: self.length - dash,
        }
    }

    /// Position of the drawing head after `path_length` of the outline
    pub fn point_at(&self, path_length: f32) -> Option<Point> {
        let mut remaining = self.length * path_length.clamp(0.0, 1.0);
        let mut last = None;

        for line in &self.polylines {
            for pair in line.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let segment = distance(a, b);
                if remaining <= segment && segment > 0.0 {
                    let t = remaining / segment;
                    return Some(Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t));
                }
                remaining -= segment;
                last = Some(b);
            }
        }
        last
    }
}

fn distance(a: Point, b: Point) -> f32 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

fn polyline_length(points: &[Point]) -> f32 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

fn flatten(commands: &[PathCommand]) -> Vec<Vec<Point>> {
    let mut lines: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    let mut start = Point::ZERO;
    let mut pen = Point::ZERO;

    for command in commands {
        match *command {
            PathCommand::MoveTo(p) => {
                if current.len() > 1 {
                    lines.push(std::mem::take(&mut current));
                }
                current.clear();
                current.push(p);
                start = p;
                pen = p;
            }
            PathCommand::LineTo(p) => {
                if current.is_empty() {
                    current.push(pen);
                }
                current.push(p);
                pen = p;
            }
            PathCommand::QuadTo { control, end } => {
                if current.is_empty() {
                    current.push(pen);
                }
                let from = pen;
                for i in 1..=CURVE_SUBDIVISIONS {
                    let t = i as f32 / CURVE_SUBDIVISIONS as f32;
                    let u = 1.0 - t;
                    current.push(Point::new(
                        u * u * from.x + 2.0 * u * t * control.x + t * t * end.x,
                        u * u * from.y + 2.0 * u * t * control.y + t * t * end.y,
                    ));
                }
                pen = end;
            }
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => {
                if current.is_empty() {
                    current.push(pen);
                }
                let from = pen;
                for i in 1..=CURVE_SUBDIVISIONS {
                    let t = i as f32 / CURVE_SUBDIVISIONS as f32;
                    let u = 1.0 - t;
                    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
                    current.push(Point::new(
                        a * from.x + b * control1.x + c * control2.x + d * end.x,
                        a * from.y + b * control1.y + c * control2.y + d * end.y,
                    ));
                }
                pen = end;
            }
            PathCommand::Close => {
                if !current.is_empty() && pen != start {
                    current.push(start);
                }
                if current.len() > 1 {
                    lines.push(std::mem::take(&mut current));
                }
                current.clear();
                pen = start;
            }
        }
    }

    if current.len() > 1 {
        lines.push(current);
    }
    lines
}
