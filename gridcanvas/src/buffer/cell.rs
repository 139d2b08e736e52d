use crate::types::{Rgb, TextStyle};

/// One character position of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: TextStyle,
    /// Right half of a double-width glyph drawn in the cell to the left.
    pub wide_continuation: bool,
}

impl Cell {
    /// Black on white space.
    pub const BLANK: Cell = Cell {
        char: ' ',
        fg: Rgb::new(0, 0, 0),
        bg: Rgb::new(255, 255, 255),
        style: TextStyle::new(),
        wide_continuation: false,
    };

    pub fn new(char: char) -> Self {
        Self { char, ..Self::BLANK }
    }

    /// A space filled with `bg`.
    pub fn blank(bg: Rgb) -> Self {
        Self { bg, ..Self::BLANK }
    }

    pub fn colored(mut self, fg: Rgb, bg: Rgb) -> Self {
        self.fg = fg;
        self.bg = bg;
        self
    }

    pub fn styled(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}
