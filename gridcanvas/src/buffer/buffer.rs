use super::Cell;
use crate::geometry::Rect;
use crate::text::char_width;
use crate::types::{Rgb, TextStyle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        let i = self.index(x, y)?;
        self.cells.get_mut(i)
    }

    /// Replace the cell at (x, y). Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Fill the background of every cell inside `rect`, clearing its glyph.
    pub fn fill(&mut self, rect: Rect, bg: Rgb) {
        let clipped = rect.intersection(&self.area());
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set(x, y, Cell::blank(bg));
            }
        }
    }

    /// Write `text` starting at (x, y), never drawing at or past `max_x`.
    ///
    /// Returns the column after the last written glyph.
    pub fn set_string(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        max_x: u16,
        fg: Rgb,
        style: TextStyle,
    ) -> u16 {
        let limit = max_x.min(self.width);
        let mut cursor = x;
        for ch in text.chars() {
            let width = char_width(ch).max(1) as u16;
            if cursor + width > limit || y >= self.height {
                break;
            }
            let bg = self.get(cursor, y).map(|c| c.bg).unwrap_or_default();
            self.set(
                cursor,
                y,
                Cell::new(ch).colored(fg, bg).styled(style),
            );
            for offset in 1..width {
                if let Some(cell) = self.get_mut(cursor + offset, y) {
                    cell.wide_continuation = true;
                }
            }
            cursor += width;
        }
        cursor
    }

    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    /// Read back one line of glyphs, skipping wide-character continuations.
    pub fn line(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect()
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
    }
}
