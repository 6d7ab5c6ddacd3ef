//! Page layout
//!
//! Builds the showcase page as a taffy flexbox tree and resolves every named
//! node to an absolute rectangle in document coordinates (origin at the top
//! of the page, y growing downwards).

use std::fmt;

use indexmap::IndexMap;
use kinetic_core::{Point, Rect, Size};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use taffy::prelude::{
    AlignItems, AvailableSpace, Dimension, FlexDirection, JustifyContent, LengthPercentage,
    LengthPercentageAuto, NodeId, Style, TaffyTree,
};

use crate::error::Result;

/// Number of cells in the demonstration grid
pub const GRID_CELLS: usize = 6;
/// Cells per grid row
pub const GRID_COLUMNS: usize = 3;

/// A node of the page that callers can look up by name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageNode {
    Root,
    Grid,
    /// Grid cell by index, row-major
    Cell(usize),
    FadeSquare,
    FadeCircle,
    Shape,
    Button,
    DragHandle,
    ProgressTrack,
    ProgressFill,
    Icon,
    ScrollSection,
    Heading,
    /// Scroll-section paragraph by index
    Paragraph(usize),
}

impl fmt::Display for PageNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageNode::Root => write!(f, "root"),
            PageNode::Grid => write!(f, "grid"),
            PageNode::Cell(i) => write!(f, "cell-{i}"),
            PageNode::FadeSquare => write!(f, "fade-square"),
            PageNode::FadeCircle => write!(f, "fade-circle"),
            PageNode::Shape => write!(f, "shape"),
            PageNode::Button => write!(f, "button"),
            PageNode::DragHandle => write!(f, "drag-handle"),
            PageNode::ProgressTrack => write!(f, "progress-track"),
            PageNode::ProgressFill => write!(f, "progress-fill"),
            PageNode::Icon => write!(f, "icon"),
            PageNode::ScrollSection => write!(f, "scroll-section"),
            PageNode::Heading => write!(f, "heading"),
            PageNode::Paragraph(i) => write!(f, "paragraph-{i}"),
        }
    }
}

/// Page metrics in pixels
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Padding around the grid
    pub padding: f32,
    /// Gap between page sections, grid cells and scroll-section children
    pub gap: f32,
    /// Gap between the two boxes of the fade cell
    pub fade_gap: f32,
    pub fade_box_size: f32,
    pub button_height: f32,
    pub progress_size: f32,
    pub heading_height: f32,
    pub paragraph_height: f32,
    /// Paragraph width as a fraction of the page width
    pub paragraph_width: f32,
    /// Space below the scroll section
    pub section_margin_bottom: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 40.0,
            gap: 40.0,
            fade_gap: 16.0,
            fade_box_size: 80.0,
            button_height: 52.0,
            progress_size: 160.0,
            heading_height: 48.0,
            paragraph_height: 128.0,
            paragraph_width: 2.0 / 3.0,
            section_margin_bottom: 40.0,
        }
    }
}

impl LayoutConfig {
    /// Side of a square grid cell for a page `width` pixels wide
    pub fn cell_size(&self, width: f32) -> f32 {
        let columns = GRID_COLUMNS as f32;
        let spacing = 2.0 * self.padding + (columns - 1.0) * self.gap;
        ((width - spacing) / columns).max(0.0)
    }
}

/// Computed page geometry
#[derive(Clone, Debug)]
pub struct PageLayout {
    viewport: Size,
    cell_size: f32,
    document_height: f32,
    rects: IndexMap<PageNode, Rect>,
}

impl PageLayout {
    /// Lay the page out for a viewport
    pub fn compute(config: &LayoutConfig, viewport: Size) -> Result<Self> {
        let cell_size = config.cell_size(viewport.width);
        let mut builder = PageBuilder::new();

        let cells = (0..GRID_CELLS)
            .map(|index| builder.cell(config, index, cell_size))
            .collect::<Result<Vec<_>>>()?;

        let rows = cells
            .chunks(GRID_COLUMNS)
            .map(|row| {
                builder.container(
                    None,
                    Style {
                        flex_direction: FlexDirection::Row,
                        gap: gap(config.gap),
                        ..Default::default()
                    },
                    row,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let grid = builder.container(
            Some(PageNode::Grid),
            Style {
                flex_direction: FlexDirection::Column,
                padding: taffy::Rect {
                    left: LengthPercentage::Length(config.padding),
                    right: LengthPercentage::Length(config.padding),
                    top: LengthPercentage::Length(config.padding),
                    bottom: LengthPercentage::Length(config.padding),
                },
                gap: gap(config.gap),
                ..Default::default()
            },
            &rows,
        )?;

        let heading = builder.leaf(
            PageNode::Heading,
            fixed(Dimension::Percent(1.0), Dimension::Length(config.heading_height)),
        )?;
        let paragraphs = (0..2)
            .map(|i| {
                builder.leaf(
                    PageNode::Paragraph(i),
                    fixed(
                        Dimension::Percent(config.paragraph_width),
                        Dimension::Length(config.paragraph_height),
                    ),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let mut section_children = vec![heading];
        section_children.extend(paragraphs);
        let section = builder.container(
            Some(PageNode::ScrollSection),
            Style {
                flex_direction: FlexDirection::Column,
                align_items: Some(AlignItems::Center),
                gap: gap(config.gap),
                margin: taffy::Rect {
                    left: LengthPercentageAuto::Length(0.0),
                    right: LengthPercentageAuto::Length(0.0),
                    top: LengthPercentageAuto::Length(0.0),
                    bottom: LengthPercentageAuto::Length(config.section_margin_bottom),
                },
                ..Default::default()
            },
            &section_children,
        )?;

        let root = builder.container(
            Some(PageNode::Root),
            Style {
                flex_direction: FlexDirection::Column,
                size: taffy::Size {
                    width: Dimension::Length(viewport.width),
                    height: Dimension::Auto,
                },
                gap: gap(config.gap),
                ..Default::default()
            },
            &[grid, section],
        )?;

        builder.taffy.compute_layout(
            root,
            taffy::Size {
                width: AvailableSpace::Definite(viewport.width),
                height: AvailableSpace::MaxContent,
            },
        )?;

        let mut absolute = FxHashMap::default();
        collect_rects(&builder.taffy, root, Point::ZERO, &mut absolute)?;

        let rects: IndexMap<PageNode, Rect> = builder
            .named
            .iter()
            .filter_map(|(name, node)| absolute.get(node).map(|rect| (*name, *rect)))
            .collect();
        let document_height = rects
            .get(&PageNode::Root)
            .map(|rect| rect.height())
            .unwrap_or(0.0);

        tracing::debug!(
            width = viewport.width,
            cell_size,
            document_height,
            nodes = rects.len(),
            "page layout computed"
        );

        Ok(Self {
            viewport,
            cell_size,
            document_height,
            rects,
        })
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Height of the whole page
    pub fn document_height(&self) -> f32 {
        self.document_height
    }

    /// Furthest the page can scroll
    pub fn max_scroll(&self) -> f32 {
        (self.document_height - self.viewport.height).max(0.0)
    }

    /// Absolute rectangle of a node
    pub fn rect(&self, node: PageNode) -> Option<Rect> {
        self.rects.get(&node).copied()
    }

    /// Named nodes, innermost first within each subtree
    pub fn iter(&self) -> impl Iterator<Item = (PageNode, Rect)> + '_ {
        self.rects.iter().map(|(node, rect)| (*node, *rect))
    }
}

/// Taffy tree under construction, remembering which nodes have names
struct PageBuilder {
    taffy: TaffyTree<()>,
    named: Vec<(PageNode, NodeId)>,
}

impl PageBuilder {
    fn new() -> Self {
        let mut taffy = TaffyTree::new();
        // Fractional cell sizes must survive so scroll ranges stay exact
        taffy.disable_rounding();
        Self {
            taffy,
            named: Vec::new(),
        }
    }

    fn leaf(&mut self, name: PageNode, style: Style) -> Result<NodeId> {
        let node = self.taffy.new_leaf(style)?;
        self.named.push((name, node));
        Ok(node)
    }

    fn container(
        &mut self,
        name: Option<PageNode>,
        style: Style,
        children: &[NodeId],
    ) -> Result<NodeId> {
        let node = self.taffy.new_with_children(style, children)?;
        if let Some(name) = name {
            self.named.push((name, node));
        }
        Ok(node)
    }

    /// A square grid cell with its demonstration content centered inside
    fn cell(&mut self, config: &LayoutConfig, index: usize, size: f32) -> Result<NodeId> {
        let third = Dimension::Percent(1.0 / 3.0);
        let (children, spacing) = match index {
            0 => {
                let side = Dimension::Length(config.fade_box_size);
                let square = self.leaf(PageNode::FadeSquare, fixed(side, side))?;
                let circle = self.leaf(PageNode::FadeCircle, fixed(side, side))?;
                (vec![square, circle], config.fade_gap)
            }
            1 => (vec![self.leaf(PageNode::Shape, fixed(third, third))?], config.gap),
            2 => {
                let button = self.leaf(
                    PageNode::Button,
                    fixed(
                        Dimension::Percent(0.5),
                        Dimension::Length(config.button_height),
                    ),
                )?;
                (vec![button], config.gap)
            }
            3 => (vec![self.leaf(PageNode::DragHandle, fixed(third, third))?], config.gap),
            4 => {
                let full = Dimension::Percent(1.0);
                let fill = self.leaf(PageNode::ProgressFill, fixed(full, full))?;
                let side = Dimension::Length(config.progress_size);
                let track = self.container(Some(PageNode::ProgressTrack), fixed(side, side), &[fill])?;
                (vec![track], config.gap)
            }
            _ => {
                // Square icon half as wide as the cell
                let icon = self.leaf(
                    PageNode::Icon,
                    fixed(
                        Dimension::Percent(0.5),
                        Dimension::Length(size * 0.5),
                    ),
                )?;
                (vec![icon], config.gap)
            }
        };

        self.container(
            Some(PageNode::Cell(index)),
            Style {
                flex_direction: FlexDirection::Row,
                justify_content: Some(JustifyContent::Center),
                align_items: Some(AlignItems::Center),
                gap: gap(spacing),
                size: taffy::Size {
                    width: Dimension::Length(size),
                    height: Dimension::Length(size),
                },
                flex_shrink: 0.0,
                ..Default::default()
            },
            &children,
        )
    }
}

fn gap(px: f32) -> taffy::Size<LengthPercentage> {
    taffy::Size {
        width: LengthPercentage::Length(px),
        height: LengthPercentage::Length(px),
    }
}

/// Non-shrinking box of the given size
fn fixed(width: Dimension, height: Dimension) -> Style {
    Style {
        size: taffy::Size { width, height },
        flex_shrink: 0.0,
        ..Default::default()
    }
}

/// Accumulate parent offsets into absolute rectangles
fn collect_rects(
    taffy: &TaffyTree<()>,
    node: NodeId,
    parent: Point,
    out: &mut FxHashMap<NodeId, Rect>,
) -> Result<()> {
    let layout = taffy.layout(node)?;
    let origin = parent.offset(layout.location.x, layout.location.y);
    out.insert(
        node,
        Rect::from_origin_size(origin, Size::new(layout.size.width, layout.size.height)),
    );
    for child in taffy.children(node)? {
        collect_rects(taffy, child, origin, out)?;
    }
    Ok(())
}
