//! Column definitions as callers supply them.

use gridcanvas::ThemeOverride;
use serde::{Deserialize, Serialize};

/// One column of the grid.
///
/// A column belongs to no group when both `group` and `group_path` are absent.
/// `group_path` wins over the legacy single-level `group` when both are set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub title: String,
    /// Width in pixels.
    pub width: u16,
    #[serde(alias = "identifier")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_path: Option<Vec<String>>,
    #[serde(skip)]
    pub theme_override: Option<ThemeOverride>,
}

impl ColumnDef {
    pub fn new(id: impl Into<String>, title: impl Into<String>, width: u16) -> Self {
        Self {
            title: title.into(),
            width,
            id: id.into(),
            group: None,
            group_path: None,
            theme_override: None,
        }
    }

    /// Set the legacy single-level group label.
    pub fn group(mut self, label: impl Into<String>) -> Self {
        self.group = Some(label.into());
        self
    }

    /// Set the nested group path, outermost group first.
    pub fn group_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_path = Some(path.into_iter().map(Into::into).collect());
        self
    }

    pub fn theme_override(mut self, theme: ThemeOverride) -> Self {
        self.theme_override = Some(theme);
        self
    }
}
