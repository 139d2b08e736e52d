//! Group identity for a column: key, depth and ancestor keys.
//!
//! The legacy single `group` label and the nested `group_path` are both read
//! through [`GroupPath`], so every function here is written once.

use crate::column::ColumnDef;

/// Separator between path segments in a group key.
pub const GROUP_DELIMITER: &str = "|";

/// Normalized grouping of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupPath<'a> {
    None,
    Legacy(&'a str),
    Nested(&'a [String]),
}

fn valid_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains(GROUP_DELIMITER)
}

impl<'a> GroupPath<'a> {
    /// Read a column's grouping. A path or label with an empty segment, or a
    /// segment containing the delimiter, counts as no group.
    pub fn of(column: &'a ColumnDef) -> Self {
        if let Some(path) = column.group_path.as_deref().filter(|p| !p.is_empty()) {
            return if path.iter().all(|s| valid_segment(s)) {
                GroupPath::Nested(path)
            } else {
                GroupPath::None
            };
        }
        match column.group.as_deref() {
            Some(label) if valid_segment(label) => GroupPath::Legacy(label),
            _ => GroupPath::None,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            GroupPath::None => 0,
            GroupPath::Legacy(_) => 1,
            GroupPath::Nested(path) => path.len(),
        }
    }

    /// Key of the group node `depth` levels down.
    ///
    /// A nested path longer than `depth` is cut; a shorter one yields the full
    /// path. A legacy label only has a key at depth 1.
    pub fn key_at(&self, depth: usize) -> String {
        match self {
            GroupPath::None => String::new(),
            GroupPath::Legacy(label) if depth == 1 => (*label).to_string(),
            GroupPath::Legacy(_) => String::new(),
            GroupPath::Nested(path) => {
                let end = depth.min(path.len());
                path[..end].join(GROUP_DELIMITER)
            }
        }
    }

    /// Key of the column's own (innermost) group.
    pub fn key(&self) -> String {
        self.key_at(self.depth())
    }

    /// Keys of every group containing the column, outermost first.
    pub fn ancestor_keys(&self) -> impl Iterator<Item = String> + '_ {
        (1..=self.depth()).map(|d| self.key_at(d))
    }

    /// Segments as the canvas draws them, one header line per segment.
    pub fn segments(&self) -> Vec<String> {
        match self {
            GroupPath::None => Vec::new(),
            GroupPath::Legacy(label) => vec![(*label).to_string()],
            GroupPath::Nested(path) => path.to_vec(),
        }
    }
}

pub fn group_key_of(column: &ColumnDef) -> String {
    GroupPath::of(column).key()
}

pub fn group_depth_of(column: &ColumnDef) -> usize {
    GroupPath::of(column).depth()
}

pub fn group_key_at_depth(column: &ColumnDef, depth: usize) -> String {
    GroupPath::of(column).key_at(depth)
}
