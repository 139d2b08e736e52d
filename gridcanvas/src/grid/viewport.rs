//! Frame layout: where every column lands on the surface, and which rows fit.
//!
//! Horizontal geometry is kept in surface cells; column widths arrive in pixels
//! and are mapped with [`CELL_WIDTH_PX`]. Each data row occupies one line.

use std::ops::Range;

use super::{GridProps, CELL_WIDTH_PX};

/// Visible window over the grid content, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Half-open ranges of the columns and rows currently on screen.
///
/// Frozen columns are always visible and are not part of `start_col..end_col`
/// unless the grid has no scrolling columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRange {
    pub start_col: usize,
    pub end_col: usize,
    pub start_row: usize,
    pub end_row: usize,
}

impl CellRange {
    pub fn cols(&self) -> Range<usize> {
        self.start_col..self.end_col
    }

    pub fn rows(&self) -> Range<usize> {
        self.start_row..self.end_row
    }
}

/// Pixel width to surface cells; a column is never narrower than one cell.
pub fn px_to_cells(px: u16) -> u16 {
    (px.saturating_add(CELL_WIDTH_PX / 2) / CELL_WIDTH_PX).max(1)
}

/// Layout computed on every render and kept for hit testing and scrolling.
#[derive(Debug, Clone)]
pub(crate) struct FrameLayout {
    pub width: u16,
    pub height: u16,
    pub group_depth: usize,
    pub column_count: usize,
    pub row_count: usize,
    pub frozen: usize,
    pub frozen_cells: u16,
    /// Start of each column in its region (frozen or scrolling), in cells.
    pub column_x: Vec<u32>,
    pub column_w: Vec<u16>,
    pub group_depths: Vec<usize>,
    /// Total width of the scrolling columns, in cells.
    pub scroll_content: u32,
    pub row_height: u16,
    pub header_height: u16,
}

impl FrameLayout {
    pub fn compute(props: &GridProps<'_>, width: u16, height: u16) -> Self {
        let column_count = props.columns.len();
        let frozen = props.freeze_columns.min(column_count);

        let mut column_x = Vec::with_capacity(column_count);
        let mut column_w = Vec::with_capacity(column_count);
        let mut cursor: u32 = 0;
        let mut frozen_cells: u32 = 0;
        for (index, column) in props.columns.iter().enumerate() {
            if index == frozen {
                frozen_cells = cursor;
                cursor = 0;
            }
            let w = px_to_cells(column.width);
            column_x.push(cursor);
            column_w.push(w);
            cursor += w as u32;
        }
        if frozen == column_count {
            frozen_cells = cursor;
            cursor = 0;
        }

        let group_depths: Vec<usize> = props.columns.iter().map(|c| c.group_path.len()).collect();
        let group_depth = group_depths.iter().copied().max().unwrap_or(0);

        Self {
            width,
            height,
            group_depth,
            column_count,
            row_count: props.rows,
            frozen,
            frozen_cells: frozen_cells.min(u16::MAX as u32) as u16,
            column_x,
            column_w,
            group_depths,
            scroll_content: cursor,
            row_height: props.row_height.max(1),
            header_height: props.header_height,
        }
    }

    /// Group header lines plus the column header line.
    pub fn header_lines(&self) -> u16 {
        (self.group_depth as u16).saturating_add(1)
    }

    pub fn body_lines(&self) -> u16 {
        self.height.saturating_sub(self.header_lines())
    }

    /// Width available to the scrolling columns, in cells.
    pub fn scroll_width(&self) -> u32 {
        self.width.saturating_sub(self.frozen_cells) as u32
    }

    pub fn max_scroll_x(&self) -> u32 {
        self.scroll_content.saturating_sub(self.scroll_width())
    }

    pub fn max_scroll_row(&self) -> usize {
        self.row_count.saturating_sub(self.body_lines() as usize)
    }

    /// Screen x of a column's left edge; negative when scrolled out to the left.
    pub fn screen_x(&self, col: usize, scroll_x: u32) -> i32 {
        if col < self.frozen {
            self.column_x[col] as i32
        } else {
            self.frozen_cells as i32 + self.column_x[col] as i32 - scroll_x as i32
        }
    }

    /// Columns with at least one cell on screen, frozen first.
    pub fn visible_columns(&self, scroll_x: u32) -> Vec<usize> {
        let mut cols: Vec<usize> = (0..self.frozen).collect();
        let left = scroll_x;
        let right = scroll_x + self.scroll_width();
        for col in self.frozen..self.column_count {
            let start = self.column_x[col];
            let end = start + self.column_w[col] as u32;
            if end > left && start < right {
                cols.push(col);
            }
        }
        cols
    }

    /// Column under screen column `x`.
    pub fn column_at(&self, x: u16, scroll_x: u32) -> Option<usize> {
        if x < self.frozen_cells {
            return (0..self.frozen).find(|&c| {
                let start = self.column_x[c];
                (x as u32) >= start && (x as u32) < start + self.column_w[c] as u32
            });
        }
        let content = (x - self.frozen_cells) as u32 + scroll_x;
        let scrolling = &self.column_x[self.frozen..];
        let index = scrolling.partition_point(|&start| start <= content).checked_sub(1)?;
        let col = self.frozen + index;
        (content < self.column_x[col] + self.column_w[col] as u32).then_some(col)
    }

    /// Start of the scrolling column containing `scroll_x`.
    pub fn snap_scroll_x(&self, scroll_x: u32) -> u32 {
        let starts = &self.column_x[self.frozen..];
        match starts.partition_point(|&start| start <= scroll_x) {
            0 => 0,
            index => starts[index - 1],
        }
    }

    /// Start of the next (or previous) scrolling column from `scroll_x`.
    pub fn step_column(&self, scroll_x: u32, forward: bool) -> u32 {
        let starts = &self.column_x[self.frozen..];
        if forward {
            starts
                .iter()
                .copied()
                .find(|&start| start > scroll_x)
                .unwrap_or(scroll_x)
        } else {
            starts
                .iter()
                .copied()
                .rev()
                .find(|&start| start < scroll_x)
                .unwrap_or(0)
        }
    }

    pub fn visible_rows(&self, scroll_row: usize) -> Range<usize> {
        let end = (scroll_row + self.body_lines() as usize).min(self.row_count);
        scroll_row.min(end)..end
    }
}
