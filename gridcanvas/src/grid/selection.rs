//! Grid selection: a current cell plus whole-column and whole-row picks.

use std::ops::Range;

use super::Item;

/// Sorted, non-overlapping set of index ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompactSelection {
    ranges: Vec<Range<usize>>,
}

impl CompactSelection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(index: usize) -> Self {
        Self {
            ranges: vec![index..index + 1],
        }
    }

    /// Add `range`, merging with any range it touches.
    pub fn add(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let mut merged = range;
        let mut kept = Vec::with_capacity(self.ranges.len() + 1);
        for existing in self.ranges.drain(..) {
            if existing.end < merged.start || existing.start > merged.end {
                kept.push(existing);
            } else {
                merged = merged.start.min(existing.start)..merged.end.max(existing.end);
            }
        }
        kept.push(merged);
        kept.sort_by_key(|r| r.start);
        self.ranges = kept;
    }

    pub fn with(mut self, range: Range<usize>) -> Self {
        self.add(range);
        self
    }

    pub fn has(&self, index: usize) -> bool {
        self.ranges.iter().any(|r| r.contains(&index))
    }

    pub fn len(&self) -> usize {
        self.ranges.iter().map(|r| r.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn first(&self) -> Option<usize> {
        self.ranges.first().map(|r| r.start)
    }

    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }
}

/// Rectangle of cells, `x`/`y` being the top-left column/row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// The focused cell and the range extending from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentCell {
    pub cell: Item,
    pub range: CellRect,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridSelection {
    pub current: Option<CurrentCell>,
    pub columns: CompactSelection,
    pub rows: CompactSelection,
}

impl GridSelection {
    /// Selection focused on a single cell.
    pub fn cell(col: usize, row: usize) -> Self {
        Self {
            current: Some(CurrentCell {
                cell: (col, row),
                range: CellRect {
                    x: col,
                    y: row,
                    width: 1,
                    height: 1,
                },
            }),
            ..Default::default()
        }
    }

    /// Selection of one whole column, without a current cell.
    pub fn column(col: usize) -> Self {
        Self {
            columns: CompactSelection::single(col),
            ..Default::default()
        }
    }

    pub fn current_cell(&self) -> Option<Item> {
        self.current.map(|c| c.cell)
    }

    pub fn is_cell_selected(&self, (col, row): Item) -> bool {
        let in_range = self.current.is_some_and(|c| {
            let r = c.range;
            col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
        });
        in_range || self.columns.has(col) || self.rows.has(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_merges_touching_ranges() {
        let sel = CompactSelection::empty().with(0..2).with(5..6).with(2..5);
        assert_eq!(sel.ranges(), &[0..6]);
        assert_eq!(sel.len(), 6);
    }

    #[test]
    fn test_cell_selection_covers_only_its_cell() {
        let sel = GridSelection::cell(2, 3);
        assert!(sel.is_cell_selected((2, 3)));
        assert!(!sel.is_cell_selected((2, 4)));
        assert_eq!(sel.current_cell(), Some((2, 3)));
    }
}
