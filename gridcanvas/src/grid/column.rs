use crate::types::ThemeOverride;

/// A column as the canvas draws it.
///
/// `group_path` is the normalized nesting path, outermost group first. An
/// empty path means the column has no group header.
#[derive(Debug, Clone, PartialEq)]
pub struct GridColumn {
    pub id: String,
    pub title: String,
    /// Width in pixels; the canvas maps pixels to cells with [`super::CELL_WIDTH_PX`].
    pub width: u16,
    pub group_path: Vec<String>,
    pub theme_override: Option<ThemeOverride>,
}

impl GridColumn {
    pub fn new(id: impl Into<String>, title: impl Into<String>, width: u16) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            width,
            group_path: Vec::new(),
            theme_override: None,
        }
    }

    pub fn group_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_path = path.into_iter().map(Into::into).collect();
        self
    }
}

/// One run of group header drawn at a nesting depth.
#[derive(Debug, Clone, Copy)]
pub struct GroupHeader<'a> {
    /// Label shown in the header (the path segment at this depth).
    pub name: &'a str,
    /// Path from the outermost group down to this header, inclusive.
    pub path: &'a [String],
}

impl GroupHeader<'_> {
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

/// Presentation details resolved for a group header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupDetails {
    pub name: String,
    pub icon: Option<String>,
    pub override_theme: Option<ThemeOverride>,
}

impl GroupDetails {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
