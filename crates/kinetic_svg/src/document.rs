//! SVG document loading

use kinetic_core::{Point, Size};
use usvg::{Options, Tree};

use crate::error::{Result, SvgError};
use crate::path::{IconPath, PathCommand};

/// A parsed SVG document reduced to its path geometry
#[derive(Clone, Debug)]
pub struct IconDocument {
    /// Document size (the viewBox when width/height match it)
    pub size: Size,
    /// Every path in document order
    pub paths: Vec<IconPath>,
}

impl IconDocument {
    /// Load an SVG document from a string
    pub fn from_str(svg: &str) -> Result<Self> {
        Self::from_data(svg.as_bytes())
    }

    /// Load an SVG document from raw bytes
    pub fn from_data(data: &[u8]) -> Result<Self> {
        let options = Options::default();
        let tree = Tree::from_data(data, &options).map_err(|e| SvgError::Parse(e.to_string()))?;

        let tree_size = tree.size();
        let size = Size::new(tree_size.width(), tree_size.height());

        let mut paths = Vec::new();
        collect_paths(tree.root(), size, &mut paths);
        tracing::debug!(paths = paths.len(), "svg document loaded");

        Ok(Self { size, paths })
    }

    /// Wrap bare path data (`d` attribute) in a document with the given viewBox
    pub fn from_path_data(d: &str, view_box: Size) -> Result<Self> {
        let svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><path d="{d}" fill="none" stroke="black"/></svg>"#,
            w = view_box.width,
            h = view_box.height,
            d = d,
        );
        Self::from_str(&svg)
    }

    /// First path in the document
    pub fn first_path(&self) -> Result<&IconPath> {
        self.paths.first().ok_or(SvgError::EmptyPath)
    }
}

/// Recursively extract path geometry from the node tree
fn collect_paths(group: &usvg::Group, view_box: Size, out: &mut Vec<IconPath>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(child) => collect_paths(child, view_box, out),
            usvg::Node::Path(path) => {
                let commands = convert_path(path.data());
                if let Some(icon) = IconPath::from_commands(commands, view_box) {
                    out.push(icon);
                }
            }
            _ => {}
        }
    }
}

/// Convert usvg path data to our command list
fn convert_path(data: &usvg::tiny_skia_path::Path) -> Vec<PathCommand> {
    use usvg::tiny_skia_path::PathSegment;

    data.segments()
        .map(|segment| match segment {
            PathSegment::MoveTo(p) => PathCommand::MoveTo(Point::new(p.x, p.y)),
            PathSegment::LineTo(p) => PathCommand::LineTo(Point::new(p.x, p.y)),
            PathSegment::QuadTo(c, e) => PathCommand::QuadTo {
                control: Point::new(c.x, c.y),
                end: Point::new(e.x, e.y),
            },
            PathSegment::CubicTo(c1, c2, e) => PathCommand::CubicTo {
                control1: Point::new(c1.x, c1.y),
                control2: Point::new(c2.x, c2.y),
                end: Point::new(e.x, e.y),
            },
            PathSegment::Close => PathCommand::Close,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_svg() {
        assert!(matches!(
            IconDocument::from_str("<svg"),
            Err(SvgError::Parse(_))
        ));
    }

    #[test]
    fn test_document_without_paths() {
        let doc = IconDocument::from_str(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"></svg>"#,
        )
        .unwrap();
        assert!(doc.paths.is_empty());
        assert!(matches!(doc.first_path(), Err(SvgError::EmptyPath)));
    }

    #[test]
    fn test_path_data_round_trip() {
        let doc = IconDocument::from_path_data("M0 0 L10 0 L10 10", Size::new(24.0, 24.0)).unwrap();
        let path = doc.first_path().unwrap();
        assert!((path.length() - 20.0).abs() < 1e-3);
        assert_eq!(doc.size, Size::new(24.0, 24.0));
    }
}
