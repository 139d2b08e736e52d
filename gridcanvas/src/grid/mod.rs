//! Canvas data grid: draws columns, group headers and cells onto a [`Buffer`]
//! and turns host input into grid interactions.

mod cell;
mod column;
mod hit;
mod render;
mod selection;
mod viewport;

pub use cell::{GridCell, Item};
pub use column::{GridColumn, GroupDetails, GroupHeader};
pub use hit::GridHit;
pub use selection::{CellRect, CompactSelection, CurrentCell, GridSelection};
pub use viewport::{px_to_cells, CellRange, Viewport};

use log::trace;

use crate::buffer::Buffer;
use crate::event::{HostEvent, Key};
use crate::types::Theme;
use viewport::FrameLayout;

/// Horizontal pixels represented by one surface cell.
pub const CELL_WIDTH_PX: u16 = 8;

/// Cells moved per horizontal scroll tick.
const SCROLL_STEP_COLUMNS: i64 = 4;
/// Rows moved per vertical scroll tick.
const SCROLL_STEP_ROWS: i64 = 3;

/// Everything the canvas needs to draw one frame.
pub struct GridProps<'a> {
    pub columns: &'a [GridColumn],
    pub rows: usize,
    pub cell_content: &'a dyn Fn(Item) -> GridCell,
    pub selection: Option<&'a GridSelection>,
    pub freeze_columns: usize,
    /// Row height in pixels.
    pub row_height: u16,
    /// Height of one header line in pixels.
    pub header_height: u16,
    pub smooth_scroll_x: bool,
    pub smooth_scroll_y: bool,
    pub theme: &'a Theme,
    pub group_details: &'a dyn Fn(&GroupHeader<'_>) -> GroupDetails,
    /// Whether the current-cell marker is drawn this frame.
    pub cursor_visible: bool,
}

/// Something the user did to the grid, reported back to the owner.
#[derive(Debug, Clone, PartialEq)]
pub enum GridInteraction {
    CellClicked(Item),
    SelectionChanged(GridSelection),
    GroupHeaderClicked { col: usize, depth: usize },
    Scrolled(Viewport),
    CellEdited { cell: Item, value: GridCell },
    Resized { width: u16, height: u16 },
}

/// Scroll state and the most recent layout of a canvas grid.
#[derive(Debug, Clone)]
pub struct CanvasGrid {
    width: u16,
    height: u16,
    /// Horizontal scroll of the non-frozen region, in cells.
    scroll_x: u32,
    scroll_row: usize,
    smooth_scroll_x: bool,
    layout: Option<FrameLayout>,
}

impl CanvasGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            scroll_x: 0,
            scroll_row: 0,
            smooth_scroll_x: true,
            layout: None,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        if let Some(layout) = &mut self.layout {
            layout.width = width;
            layout.height = height;
        }
        self.clamp_scroll();
    }

    /// Recompute the layout for `props` without drawing.
    pub fn update_layout(&mut self, props: &GridProps<'_>) {
        self.layout = Some(FrameLayout::compute(props, self.width, self.height));
        self.smooth_scroll_x = props.smooth_scroll_x;
        self.clamp_scroll();
    }

    /// Draw a full frame into `buf`, resizing it to the grid size if needed.
    pub fn render(&mut self, props: &GridProps<'_>, buf: &mut Buffer) {
        self.update_layout(props);
        if buf.width() != self.width || buf.height() != self.height {
            *buf = Buffer::new(self.width, self.height);
        }
        if let Some(layout) = &self.layout {
            render::render_grid(layout, self.scroll_x, self.scroll_row, props, buf);
        }
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<GridHit> {
        self.layout
            .as_ref()?
            .hit(x, y, self.scroll_x, self.scroll_row)
    }

    /// Translate one host event into grid interactions, updating scroll state.
    pub fn interpret(&mut self, props: &GridProps<'_>, event: &HostEvent) -> Vec<GridInteraction> {
        self.update_layout(props);
        let mut out = Vec::new();

        match event {
            HostEvent::Click { x, y, .. } => match self.hit_test(*x, *y) {
                Some(GridHit::Cell(item)) => {
                    out.push(GridInteraction::SelectionChanged(GridSelection::cell(
                        item.0, item.1,
                    )));
                    out.push(GridInteraction::CellClicked(item));
                }
                Some(GridHit::ColumnHeader(col)) => {
                    out.push(GridInteraction::SelectionChanged(GridSelection::column(col)));
                }
                Some(GridHit::GroupHeader { col, depth }) => {
                    out.push(GridInteraction::GroupHeaderClicked { col, depth });
                }
                None => {}
            },
            HostEvent::Scroll {
                delta_x, delta_y, ..
            } => {
                let dx = *delta_x as i64 * SCROLL_STEP_COLUMNS;
                let dy = *delta_y as i64 * SCROLL_STEP_ROWS;
                if self.scroll_by(dx, dy) {
                    out.push(GridInteraction::Scrolled(self.viewport()));
                }
            }
            HostEvent::Key { key, .. } => {
                let current = props.selection.and_then(|s| s.current_cell());
                if let Some(target) = self.navigate(*key, current) {
                    if current != Some(target) {
                        out.push(GridInteraction::SelectionChanged(GridSelection::cell(
                            target.0, target.1,
                        )));
                    }
                    if self.scroll_to_cell(target.0, target.1) {
                        out.push(GridInteraction::Scrolled(self.viewport()));
                    }
                }
            }
            HostEvent::Paste(text) => {
                if let Some(cell) = props.selection.and_then(|s| s.current_cell()) {
                    out.push(GridInteraction::CellEdited {
                        cell,
                        value: GridCell::text(text.clone()),
                    });
                }
            }
            HostEvent::Resize { width, height } => {
                self.resize(*width, *height);
                out.push(GridInteraction::Resized {
                    width: *width,
                    height: *height,
                });
            }
        }

        trace!("grid: {:?} -> {} interactions", event.kind(), out.len());
        out
    }

    /// Cell a navigation key moves the current cell to.
    fn navigate(&self, key: Key, current: Option<Item>) -> Option<Item> {
        let layout = self.layout.as_ref()?;
        if layout.column_count == 0 || layout.row_count == 0 {
            return None;
        }
        let last_col = layout.column_count - 1;
        let last_row = layout.row_count - 1;
        let page = (layout.body_lines() as usize).max(1);

        let Some((col, row)) = current else {
            return matches!(
                key,
                Key::Up
                    | Key::Down
                    | Key::Left
                    | Key::Right
                    | Key::Tab
                    | Key::BackTab
                    | Key::Home
                    | Key::End
                    | Key::PageUp
                    | Key::PageDown
            )
            .then_some((0, 0));
        };
        let (col, row) = (col.min(last_col), row.min(last_row));

        let target = match key {
            Key::Up => (col, row.saturating_sub(1)),
            Key::Down => (col, (row + 1).min(last_row)),
            Key::Left | Key::BackTab => (col.saturating_sub(1), row),
            Key::Right | Key::Tab => ((col + 1).min(last_col), row),
            Key::Home => (0, row),
            Key::End => (last_col, row),
            Key::PageUp => (col, row.saturating_sub(page)),
            Key::PageDown => (col, (row + page).min(last_row)),
            _ => return None,
        };
        Some(target)
    }

    /// Scroll to a content position in pixels. Returns true if the view moved.
    pub fn scroll_to(&mut self, x_px: u32, y_px: u32) -> bool {
        let before = (self.scroll_x, self.scroll_row);
        self.scroll_x = x_px / CELL_WIDTH_PX as u32;
        let row_height = self.layout.as_ref().map_or(1, |l| l.row_height) as u32;
        self.scroll_row = (y_px / row_height) as usize;
        self.clamp_scroll();
        before != (self.scroll_x, self.scroll_row)
    }

    /// Scroll by `dx` cells and `dy` rows. Returns true if the view moved.
    pub fn scroll_by(&mut self, dx: i64, dy: i64) -> bool {
        let before = (self.scroll_x, self.scroll_row);
        match (&self.layout, self.smooth_scroll_x) {
            // Without smooth scrolling a tick moves one whole column.
            (Some(layout), false) if dx != 0 => {
                self.scroll_x = layout.step_column(self.scroll_x, dx > 0);
            }
            _ => self.scroll_x = (self.scroll_x as i64 + dx).max(0) as u32,
        }
        self.scroll_row = (self.scroll_row as i64 + dy).max(0) as usize;
        self.clamp_scroll();
        before != (self.scroll_x, self.scroll_row)
    }

    /// Scroll the minimum distance that brings a cell fully into view.
    pub fn scroll_to_cell(&mut self, col: usize, row: usize) -> bool {
        match self.cell_scroll_target(col, row) {
            Some((x, y)) => self.scroll_to(x, y),
            None => false,
        }
    }

    /// Pixel scroll position at which a cell is fully in view, moving as
    /// little as possible from the current position.
    pub fn cell_scroll_target(&self, col: usize, row: usize) -> Option<(u32, u32)> {
        let layout = self.layout.as_ref()?;
        if col >= layout.column_count {
            return None;
        }

        let mut x = self.scroll_x;
        if col >= layout.frozen {
            let start = layout.column_x[col];
            let end = start + layout.column_w[col] as u32;
            let view = layout.scroll_width();
            if start < x || end - start > view {
                x = start;
            } else if end > x + view {
                x = end - view;
            }
        }
        x = x.min(layout.max_scroll_x());

        let mut y = self.scroll_row;
        let body = layout.body_lines() as usize;
        if row < y {
            y = row;
        } else if body > 0 && row >= y + body {
            y = row + 1 - body;
        }
        y = y.min(layout.max_scroll_row());

        Some((x * CELL_WIDTH_PX as u32, y as u32 * layout.row_height as u32))
    }

    /// Current scroll position as (cells, rows).
    pub fn scroll_position(&self) -> (u32, usize) {
        (self.scroll_x, self.scroll_row)
    }

    /// Visible window over the content, in pixels.
    pub fn viewport(&self) -> Viewport {
        match &self.layout {
            Some(layout) => Viewport {
                x: self.scroll_x * CELL_WIDTH_PX as u32,
                y: self.scroll_row as u32 * layout.row_height as u32,
                width: self.width as u32 * CELL_WIDTH_PX as u32,
                height: layout.header_lines() as u32 * layout.header_height as u32
                    + layout.body_lines() as u32 * layout.row_height as u32,
            },
            None => Viewport {
                x: 0,
                y: 0,
                width: self.width as u32 * CELL_WIDTH_PX as u32,
                height: self.height as u32,
            },
        }
    }

    /// Columns and rows with at least one cell on screen.
    pub fn visible_cell_range(&self) -> CellRange {
        let Some(layout) = &self.layout else {
            return CellRange::default();
        };
        let visible = layout.visible_columns(self.scroll_x);
        let scrolling: Vec<usize> = visible
            .iter()
            .copied()
            .filter(|&c| c >= layout.frozen)
            .collect();
        let (start_col, end_col) = match (scrolling.first(), scrolling.last()) {
            (Some(&first), Some(&last)) => (first, last + 1),
            _ => (0, layout.frozen),
        };
        let rows = layout.visible_rows(self.scroll_row);
        CellRange {
            start_col,
            end_col,
            start_row: rows.start,
            end_row: rows.end,
        }
    }

    fn clamp_scroll(&mut self) {
        let Some(layout) = &self.layout else {
            return;
        };
        self.scroll_x = self.scroll_x.min(layout.max_scroll_x());
        self.scroll_row = self.scroll_row.min(layout.max_scroll_row());
        if !self.smooth_scroll_x {
            self.scroll_x = layout.snap_scroll_x(self.scroll_x);
        }
    }
}
