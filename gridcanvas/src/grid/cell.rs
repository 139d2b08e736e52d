use std::borrow::Cow;

/// Address of a cell as `(column, row)`.
pub type Item = (usize, usize);

/// Content of one grid cell.
#[derive(Debug, Clone, PartialEq)]
pub enum GridCell {
    Text {
        data: String,
        display: String,
        allow_overlay: bool,
    },
    Number {
        data: Option<f64>,
        display: String,
    },
    Boolean(Option<bool>),
}

impl GridCell {
    /// Editable text cell displaying its own data.
    pub fn text(data: impl Into<String>) -> Self {
        let data = data.into();
        GridCell::Text {
            display: data.clone(),
            data,
            allow_overlay: true,
        }
    }

    pub fn number(value: f64) -> Self {
        GridCell::Number {
            data: Some(value),
            display: value.to_string(),
        }
    }

    /// The cell drawn wherever the data has no value.
    pub fn empty() -> Self {
        GridCell::Text {
            data: String::new(),
            display: String::new(),
            allow_overlay: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, GridCell::Text { data, display, .. } if data.is_empty() && display.is_empty())
    }

    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            GridCell::Text { display, .. } | GridCell::Number { display, .. } => {
                Cow::Borrowed(display)
            }
            GridCell::Boolean(Some(true)) => Cow::Borrowed("☑"),
            GridCell::Boolean(Some(false)) => Cow::Borrowed("☐"),
            GridCell::Boolean(None) => Cow::Borrowed("–"),
        }
    }
}

impl Default for GridCell {
    fn default() -> Self {
        Self::empty()
    }
}
