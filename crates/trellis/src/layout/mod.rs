//! Layout strategies.
//!
//! A container carries at most one [`Layout`]. Each strategy is a pure
//! function from the container's content area and its visible children's
//! intrinsic sizes to one absolute rectangle per child. The bounds resolver
//! writes these rectangles into a per-child slot cache and applies margins on
//! top, so strategies never see margins.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    anchor::Anchor,
    error::{Error, Result},
    geom::{Point, Rect, Size},
};

/// Absolute/anchored placement.
mod absolute;
/// Sequential flow along one axis.
mod flow;
/// Equal-cell grid placement.
mod grid;
/// Layered placement over a shared area.
mod stack;

pub use absolute::{Absolute, AbsoluteItem, Breakpoint};
pub use flow::Flow;
pub use grid::{Grid, GridArea};
pub use stack::{HAlign, Stack, StackLayer, VAlign};

/// Alignment of a child along one axis of the space it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Align {
    /// Leading edge.
    #[default]
    Start,
    /// Centered.
    Center,
    /// Trailing edge.
    End,
    /// Fill the available extent.
    Stretch,
}

impl Align {
    /// Return the offset and extent of an item of length `len` placed in
    /// `avail`.
    pub(crate) fn place(self, avail: f32, len: f32) -> (f32, f32) {
        match self {
            Self::Start => (0.0, len),
            Self::Center => ((avail - len) / 2.0, len),
            Self::End => (avail - len, len),
            Self::Stretch => (0.0, avail),
        }
    }
}

/// Main axis of a flow layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl Axis {
    /// Extent of `size` along the main axis.
    fn main(self, size: Size) -> f32 {
        match self {
            Self::Horizontal => size.w,
            Self::Vertical => size.h,
        }
    }

    /// Extent of `size` along the cross axis.
    fn cross(self, size: Size) -> f32 {
        match self {
            Self::Horizontal => size.h,
            Self::Vertical => size.w,
        }
    }

    /// Build a rectangle from main/cross coordinates relative to `content`.
    fn rect(self, content: Rect, main: f32, cross: f32, main_len: f32, cross_len: f32) -> Rect {
        match self {
            Self::Horizontal => Rect::new(content.x + main, content.y + cross, main_len, cross_len),
            Self::Vertical => Rect::new(content.x + cross, content.y + main, cross_len, main_len),
        }
    }
}

/// The strategy names accepted at assignment time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Children are positioned by their own anchor and local offset.
    None,
    /// Sequential, left to right.
    FlowHorizontal,
    /// Sequential, top to bottom.
    FlowVertical,
    /// Equal-cell grid.
    Grid,
    /// Explicit per-child rectangles with anchors and breakpoints.
    Absolute,
    /// Layers sharing the content area.
    Stack,
}

impl LayoutKind {
    /// All strategy kinds.
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::FlowHorizontal,
        Self::FlowVertical,
        Self::Grid,
        Self::Absolute,
        Self::Stack,
    ];

    /// Canonical strategy name.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::FlowHorizontal => "flow-horizontal",
            Self::FlowVertical => "flow-vertical",
            Self::Grid => "grid",
            Self::Absolute => "absolute",
            Self::Stack => "stack",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == key)
            .ok_or_else(|| Error::Configuration(format!("unknown layout strategy: {s:?}")))
    }
}

/// A container's active layout strategy and its parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Layout {
    /// No strategy; children use anchor resolution.
    #[default]
    None,
    /// Horizontal flow.
    FlowHorizontal(Flow),
    /// Vertical flow.
    FlowVertical(Flow),
    /// Grid.
    Grid(Grid),
    /// Absolute/anchored.
    Absolute(Absolute),
    /// Layered stack.
    Stack(Stack),
}

impl Layout {
    /// A strategy of the given kind with default parameters.
    pub fn from_kind(kind: LayoutKind) -> Self {
        match kind {
            LayoutKind::None => Self::None,
            LayoutKind::FlowHorizontal => Self::FlowHorizontal(Flow::default()),
            LayoutKind::FlowVertical => Self::FlowVertical(Flow::default()),
            LayoutKind::Grid => Self::Grid(Grid::default()),
            LayoutKind::Absolute => Self::Absolute(Absolute::default()),
            LayoutKind::Stack => Self::Stack(Stack::default()),
        }
    }

    /// Build a strategy from its configuration form. Fails with
    /// [`Error::Configuration`] on an unknown strategy name.
    pub fn from_config(config: &LayoutConfig) -> Result<Self> {
        let kind: LayoutKind = config.strategy.parse()?;
        let flow = Flow {
            spacing: config.spacing,
            line_spacing: config.line_spacing,
            wrap: config.wrap,
            align: config.align,
        };
        Ok(match kind {
            LayoutKind::None => Self::None,
            LayoutKind::FlowHorizontal => Self::FlowHorizontal(flow),
            LayoutKind::FlowVertical => Self::FlowVertical(flow),
            LayoutKind::Grid => Self::Grid(Grid {
                columns: config.columns.max(1),
                rows: config.rows,
                gap: config.gap,
                align_x: config.align_x,
                align_y: config.align_y,
                areas: config.areas.clone(),
            }),
            LayoutKind::Absolute => Self::Absolute(Absolute {
                clamp_inside: config.clamp_inside,
            }),
            LayoutKind::Stack => Self::Stack(Stack {
                depth_spacing: config.depth_spacing,
            }),
        })
    }

    /// The strategy kind.
    pub fn kind(&self) -> LayoutKind {
        match self {
            Self::None => LayoutKind::None,
            Self::FlowHorizontal(_) => LayoutKind::FlowHorizontal,
            Self::FlowVertical(_) => LayoutKind::FlowVertical,
            Self::Grid(_) => LayoutKind::Grid,
            Self::Absolute(_) => LayoutKind::Absolute,
            Self::Stack(_) => LayoutKind::Stack,
        }
    }

    /// True if children are positioned by anchor resolution alone.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Compute one rectangle per child, in input order.
    pub fn apply(&self, content: Rect, children: &[LayoutChild<'_>]) -> Vec<Rect> {
        match self {
            Self::None => children
                .iter()
                .map(|c| c.anchor.place(content, c.size, c.local))
                .collect(),
            Self::FlowHorizontal(f) => flow::apply(f, Axis::Horizontal, content, children),
            Self::FlowVertical(f) => flow::apply(f, Axis::Vertical, content, children),
            Self::Grid(g) => grid::apply(g, content, children),
            Self::Absolute(a) => absolute::apply(a, content, children),
            Self::Stack(s) => stack::apply(s, content, children),
        }
    }
}

/// Layout input for a single visible child.
#[derive(Debug, Clone, Copy)]
pub struct LayoutChild<'a> {
    /// Intrinsic size.
    pub size: Size,
    /// Local position.
    pub local: Point,
    /// The child's own anchor.
    pub anchor: Anchor,
    /// Per-child layout parameters.
    pub item: &'a LayoutItem,
}

/// Per-child parameters read by the parent's strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutItem {
    /// Sort key for flow and grid placement; ties keep sequence order.
    pub order: i32,
    /// Explicit grid cell as `(column, row)`.
    pub cell: Option<(u32, u32)>,
    /// Named grid template area.
    pub area: Option<String>,
    /// Number of grid columns spanned.
    pub column_span: u32,
    /// Number of grid rows spanned.
    pub row_span: u32,
    /// Absolute-layout parameters.
    pub absolute: AbsoluteItem,
    /// Stack-layout parameters.
    pub layer: StackLayer,
}

impl Default for LayoutItem {
    fn default() -> Self {
        Self {
            order: 0,
            cell: None,
            area: None,
            column_span: 1,
            row_span: 1,
            absolute: AbsoluteItem::default(),
            layer: StackLayer::default(),
        }
    }
}

/// Indices of `children` stably sorted by their `order` override.
pub(crate) fn ordered(children: &[LayoutChild<'_>]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..children.len()).collect();
    idx.sort_by_key(|i| children[*i].item.order);
    idx
}

/// Flat configuration form of a [`Layout`], as found in JSON node configs.
///
/// Only the fields relevant to `strategy` are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Strategy name, e.g. `flow-horizontal`.
    pub strategy: String,
    /// Flow spacing between consecutive children.
    pub spacing: f32,
    /// Flow spacing between wrapped lines.
    pub line_spacing: f32,
    /// Flow wrapping.
    pub wrap: bool,
    /// Flow cross-axis alignment.
    pub align: Align,
    /// Grid column count.
    pub columns: u32,
    /// Grid row count; zero means auto.
    pub rows: u32,
    /// Grid gap between cells.
    pub gap: f32,
    /// Grid horizontal alignment in a cell.
    pub align_x: Align,
    /// Grid vertical alignment in a cell.
    pub align_y: Align,
    /// Grid template areas.
    pub areas: Vec<GridArea>,
    /// Absolute: keep children inside the container.
    pub clamp_inside: bool,
    /// Stack: cumulative offset per layer.
    pub depth_spacing: Point,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            strategy: LayoutKind::None.name().to_string(),
            spacing: 0.0,
            line_spacing: 0.0,
            wrap: false,
            align: Align::Start,
            columns: 1,
            rows: 0,
            gap: 0.0,
            align_x: Align::Stretch,
            align_y: Align::Stretch,
            areas: Vec::new(),
            clamp_inside: false,
            depth_spacing: Point::zero(),
        }
    }
}
