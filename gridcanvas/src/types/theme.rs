use super::Color;

/// Colour tokens used when drawing the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent_color: Color,
    pub accent_light: Color,
    pub text_dark: Color,
    pub text_medium: Color,
    pub text_header: Color,
    pub text_group_header: Color,
    pub bg_cell: Color,
    pub bg_cell_medium: Color,
    pub bg_header: Color,
    pub bg_header_has_focus: Color,
    pub bg_header_hovered: Color,
    pub border_color: Color,
}

impl Theme {
    pub const fn new() -> Self {
        Self {
            accent_color: Color::rgb(140, 150, 255),
            accent_light: Color::rgb(241, 242, 255),
            text_dark: Color::rgb(49, 49, 57),
            text_medium: Color::rgb(115, 115, 131),
            text_header: Color::rgb(49, 49, 57),
            text_group_header: Color::rgb(49, 49, 57),
            bg_cell: Color::rgb(255, 255, 255),
            bg_cell_medium: Color::rgb(250, 250, 251),
            bg_header: Color::rgb(247, 247, 248),
            bg_header_has_focus: Color::rgb(233, 233, 234),
            bg_header_hovered: Color::rgb(239, 239, 241),
            border_color: Color::rgb(234, 234, 237),
        }
    }

    /// Apply the tokens set in `over` on top of this theme.
    pub fn merged(&self, over: &ThemeOverride) -> Theme {
        let mut theme = self.clone();
        if let Some(c) = over.accent_color {
            theme.accent_color = c;
        }
        if let Some(c) = over.text_dark {
            theme.text_dark = c;
        }
        if let Some(c) = over.text_header {
            theme.text_header = c;
        }
        if let Some(c) = over.bg_cell {
            theme.bg_cell = c;
        }
        if let Some(c) = over.bg_header {
            theme.bg_header = c;
        }
        theme
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial theme attached to a column or a group header.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThemeOverride {
    pub accent_color: Option<Color>,
    pub text_dark: Option<Color>,
    pub text_header: Option<Color>,
    pub bg_cell: Option<Color>,
    pub bg_header: Option<Color>,
}

impl ThemeOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bg_cell(mut self, color: Color) -> Self {
        self.bg_cell = Some(color);
        self
    }

    pub fn bg_header(mut self, color: Color) -> Self {
        self.bg_header = Some(color);
        self
    }

    pub fn text_dark(mut self, color: Color) -> Self {
        self.text_dark = Some(color);
        self
    }

    /// Combine two overrides; tokens set in `other` win.
    pub fn merge(self, other: ThemeOverride) -> ThemeOverride {
        ThemeOverride {
            accent_color: other.accent_color.or(self.accent_color),
            text_dark: other.text_dark.or(self.text_dark),
            text_header: other.text_header.or(self.text_header),
            bg_cell: other.bg_cell.or(self.bg_cell),
            bg_header: other.bg_header.or(self.bg_header),
        }
    }
}
