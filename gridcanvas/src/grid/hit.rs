use super::viewport::FrameLayout;
use super::Item;

/// What lies under a surface position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridHit {
    Cell(Item),
    ColumnHeader(usize),
    /// Group header line at nesting `depth` (1 = outermost), over column `col`.
    GroupHeader { col: usize, depth: usize },
}

impl FrameLayout {
    pub fn hit(&self, x: u16, y: u16, scroll_x: u32, scroll_row: usize) -> Option<GridHit> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let col = self.column_at(x, scroll_x)?;
        let line = y as usize;

        if line < self.group_depth {
            let depth = line + 1;
            return (self.group_depths[col] >= depth).then_some(GridHit::GroupHeader { col, depth });
        }
        if line == self.group_depth {
            return Some(GridHit::ColumnHeader(col));
        }

        let row = scroll_row + (y - self.header_lines()) as usize;
        (row < self.row_count).then_some(GridHit::Cell((col, row)))
    }
}
