use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Align, LayoutChild, ordered};
use crate::geom::{Rect, extent};

/// A named rectangular region of grid cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridArea {
    /// Area name referenced by [`LayoutItem::area`](super::LayoutItem::area).
    pub name: String,
    /// First column.
    pub column: u32,
    /// First row.
    pub row: u32,
    /// Columns covered.
    pub column_span: u32,
    /// Rows covered.
    pub row_span: u32,
}

impl Default for GridArea {
    fn default() -> Self {
        Self {
            name: String::new(),
            column: 0,
            row: 0,
            column_span: 1,
            row_span: 1,
        }
    }
}

impl GridArea {
    /// An area covering `column_span × row_span` cells from `(column, row)`.
    pub fn new(name: &str, column: u32, row: u32, column_span: u32, row_span: u32) -> Self {
        Self {
            name: name.to_string(),
            column,
            row,
            column_span,
            row_span,
        }
    }
}

/// Parameters for equal-cell grid placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grid {
    /// Column count; zero is treated as one.
    pub columns: u32,
    /// Row count. Zero means auto: `ceil(children / columns)` rows whose
    /// height equals the column width.
    pub rows: u32,
    /// Gap between adjacent cells on both axes.
    pub gap: f32,
    /// Horizontal alignment inside a cell.
    pub align_x: Align,
    /// Vertical alignment inside a cell.
    pub align_y: Align,
    /// Named template areas.
    pub areas: Vec<GridArea>,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            columns: 1,
            rows: 0,
            gap: 0.0,
            align_x: Align::Stretch,
            align_y: Align::Stretch,
            areas: Vec::new(),
        }
    }
}

impl Grid {
    /// A grid with `columns` columns and `rows` rows (zero for auto).
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            ..Default::default()
        }
    }

    /// Set the cell gap.
    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Set alignment inside cells.
    pub fn align(mut self, align_x: Align, align_y: Align) -> Self {
        self.align_x = align_x;
        self.align_y = align_y;
        self
    }

    /// Add a named template area.
    pub fn area(mut self, area: GridArea) -> Self {
        self.areas.push(area);
        self
    }

    /// Cell width and height inside `content`.
    pub fn cell_size(&self, content: Rect) -> (f32, f32) {
        let cols = self.columns.max(1);
        let cell_w = extent((content.w - self.gap * (cols - 1) as f32) / cols as f32);
        let cell_h = if self.rows == 0 {
            // Auto rows reuse the column width, producing square cells.
            cell_w
        } else {
            extent((content.h - self.gap * (self.rows - 1) as f32) / self.rows as f32)
        };
        (cell_w, cell_h)
    }

    /// Number of rows the grid will use for `count` children.
    pub fn row_count(&self, count: usize) -> u32 {
        if self.rows == 0 {
            let cols = self.columns.max(1) as usize;
            count.div_ceil(cols) as u32
        } else {
            self.rows
        }
    }
}

/// Place children into grid cells.
pub(super) fn apply(grid: &Grid, content: Rect, children: &[LayoutChild<'_>]) -> Vec<Rect> {
    let mut out = vec![Rect::zero(); children.len()];
    let cols = grid.columns.max(1);
    let (cell_w, cell_h) = grid.cell_size(content);

    // Only automatically placed children advance the sequence.
    let mut next = 0u32;
    for i in ordered(children) {
        let child = &children[i];
        let item = child.item;
        let named = item.area.as_deref().and_then(|name| {
            let found = grid.areas.iter().find(|a| a.name == name);
            if found.is_none() {
                warn!("grid area {name:?} not defined; using automatic placement");
            }
            found
        });
        let (col, row, col_span, row_span) = match (named, item.cell) {
            (Some(a), _) => (a.column, a.row, a.column_span, a.row_span),
            (None, Some((c, r))) => (c, r, item.column_span, item.row_span),
            (None, None) => {
                let seq = next;
                next += 1;
                (seq % cols, seq / cols, item.column_span, item.row_span)
            }
        };
        let col_span = col_span.max(1);
        let row_span = row_span.max(1);

        let cell = Rect::new(
            content.x + col as f32 * (cell_w + grid.gap),
            content.y + row as f32 * (cell_h + grid.gap),
            col_span as f32 * cell_w + (col_span - 1) as f32 * grid.gap,
            row_span as f32 * cell_h + (row_span - 1) as f32 * grid.gap,
        );
        let (dx, w) = grid.align_x.place(cell.w, child.size.w);
        let (dy, h) = grid.align_y.place(cell.h, child.size.h);
        out[i] = Rect::new(cell.x + dx, cell.y + dy, w, h);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        anchor::Anchor,
        geom::{Point, Size},
        layout::LayoutItem,
    };

    fn child(item: &LayoutItem) -> LayoutChild<'_> {
        LayoutChild {
            size: Size::new(10.0, 10.0),
            local: Point::zero(),
            anchor: Anchor::TopLeft,
            item,
        }
    }

    #[test]
    fn auto_rows_reuse_column_width() {
        let item = LayoutItem::default();
        let kids = [child(&item), child(&item), child(&item), child(&item)];
        let grid = Grid::new(3, 0);
        let content = Rect::new(0.0, 0.0, 300.0, 200.0);
        assert_eq!(grid.cell_size(content), (100.0, 100.0));
        assert_eq!(grid.row_count(4), 2);
        let out = apply(&grid, content, &kids);
        assert_eq!(out[0], Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(out[2], Rect::new(200.0, 0.0, 100.0, 100.0));
        assert_eq!(out[3], Rect::new(0.0, 100.0, 100.0, 100.0));
    }

    #[test]
    fn explicit_rows_divide_height() {
        let item = LayoutItem::default();
        let kids = [child(&item), child(&item)];
        let grid = Grid::new(2, 4).gap(10.0);
        let out = apply(&grid, Rect::new(0.0, 0.0, 210.0, 430.0), &kids);
        assert_eq!(out[1], Rect::new(110.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn cell_and_span_overrides() {
        let spanned = LayoutItem {
            cell: Some((1, 1)),
            column_span: 2,
            ..Default::default()
        };
        let plain = LayoutItem::default();
        let kids = [child(&plain), child(&spanned)];
        let grid = Grid::new(3, 3);
        let out = apply(&grid, Rect::new(0.0, 0.0, 300.0, 300.0), &kids);
        assert_eq!(out[0], Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(out[1], Rect::new(100.0, 100.0, 200.0, 100.0));
    }

    #[test]
    fn template_areas() {
        let header = LayoutItem {
            area: Some("header".into()),
            ..Default::default()
        };
        let missing = LayoutItem {
            area: Some("footer".into()),
            ..Default::default()
        };
        let kids = [child(&header), child(&missing)];
        let grid = Grid::new(4, 2).area(GridArea::new("header", 0, 0, 4, 1));
        let out = apply(&grid, Rect::new(0.0, 0.0, 400.0, 200.0), &kids);
        assert_eq!(out[0], Rect::new(0.0, 0.0, 400.0, 100.0));
        // Unknown areas fall back to the first automatic cell.
        assert_eq!(out[1], Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn explicit_cells_do_not_consume_automatic_slots() {
        let pinned = LayoutItem {
            cell: Some((2, 2)),
            ..Default::default()
        };
        let plain = LayoutItem::default();
        let kids = [child(&plain), child(&pinned), child(&plain), child(&plain)];
        let grid = Grid::new(3, 3);
        let out = apply(&grid, Rect::new(0.0, 0.0, 300.0, 300.0), &kids);
        assert_eq!(out[0], Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(out[1], Rect::new(200.0, 200.0, 100.0, 100.0));
        assert_eq!(out[2], Rect::new(100.0, 0.0, 100.0, 100.0));
        assert_eq!(out[3], Rect::new(200.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn alignment_inside_cell() {
        let item = LayoutItem::default();
        let kids = [child(&item)];
        let grid = Grid::new(1, 1).align(Align::Center, Align::End);
        let out = apply(&grid, Rect::new(0.0, 0.0, 50.0, 50.0), &kids);
        assert_eq!(out[0], Rect::new(20.0, 40.0, 10.0, 10.0));
    }

    #[test]
    fn zero_columns_treated_as_one() {
        let item = LayoutItem::default();
        let kids = [child(&item), child(&item)];
        let grid = Grid::new(0, 0);
        let out = apply(&grid, Rect::new(0.0, 0.0, 40.0, 100.0), &kids);
        assert_eq!(out[1], Rect::new(0.0, 40.0, 40.0, 40.0));
    }
}
