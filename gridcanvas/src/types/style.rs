/// Glyph attributes the grid draws with: bold headers and the underlined
/// cursor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub underline: bool,
}

impl TextStyle {
    pub const PLAIN: TextStyle = TextStyle {
        bold: false,
        underline: false,
    };

    pub const fn new() -> Self {
        Self::PLAIN
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn underline(self) -> Self {
        Self {
            underline: true,
            ..self
        }
    }
}
