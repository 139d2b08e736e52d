//! Multi-level collapsible column groups.

pub mod collapse;
pub mod details;
pub mod model;
pub mod reconcile;
pub mod spans;

pub use collapse::CollapseSet;
pub use details::{group_details, is_header_collapsed, GroupDetailsFn};
pub use model::{group_depth_of, group_key_at_depth, group_key_of, GroupPath, GROUP_DELIMITER};
pub use reconcile::{keys_to_reveal, reveal_selection};
pub use spans::{compact, compute_spans, Compaction, Span, COLLAPSED_LAST_WIDTH, COLLAPSED_WIDTH};

use gridcanvas::{GridSelection, GroupDetails, GroupHeader, Theme};
use log::debug;

use crate::column::ColumnDef;

/// Collapse state of one grid plus the operations that read and change it.
#[derive(Debug, Clone, Default)]
pub struct CollapsingGroups {
    collapsed: CollapseSet,
    strict_matching: bool,
}

impl CollapsingGroups {
    pub fn new(strict_matching: bool) -> Self {
        Self {
            collapsed: CollapseSet::new(),
            strict_matching,
        }
    }

    pub fn collapsed(&self) -> &CollapseSet {
        &self.collapsed
    }

    pub fn set_strict_matching(&mut self, strict: bool) {
        self.strict_matching = strict;
    }

    pub fn toggle(&mut self, key: &str) -> bool {
        self.collapsed.toggle(key)
    }

    pub fn reset(&mut self) {
        self.collapsed.clear();
    }

    pub fn compact(&self, columns: &[ColumnDef], freeze_columns: usize, theme: &Theme) -> Compaction {
        spans::compact(columns, freeze_columns, &self.collapsed, theme)
    }

    /// Handle a click on the group header at `depth` above column `col` of
    /// the compacted list.
    ///
    /// Clicking a header whose column sits inside a collapsed band opens that
    /// band; otherwise the group at the clicked depth is toggled.
    pub fn header_clicked(&mut self, columns: &[ColumnDef], col: usize, depth: usize) -> bool {
        let Some(column) = columns.get(col) else {
            return false;
        };
        let group = GroupPath::of(column);
        let hidden: Vec<String> = group
            .ancestor_keys()
            .filter(|key| self.collapsed.contains(key))
            .collect();
        if !hidden.is_empty() {
            debug!("Header click on column {} opens {:?}", col, hidden);
            return self.collapsed.force_expand(hidden) > 0;
        }
        self.collapsed.toggle(&group.key_at(depth))
    }

    /// Reveal the selected cell. Returns how many groups were expanded.
    pub fn selection_changed(&mut self, columns: &[ColumnDef], selection: &GridSelection) -> usize {
        reveal_selection(columns, selection, &mut self.collapsed)
    }

    pub fn group_details(
        &self,
        header: &GroupHeader<'_>,
        resolver: Option<&GroupDetailsFn>,
        theme: &Theme,
    ) -> GroupDetails {
        details::group_details(header, &self.collapsed, resolver, theme, self.strict_matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("a", "A", 100).group_path(["G", "S1"]),
            ColumnDef::new("b", "B", 100).group_path(["G", "S1"]),
            ColumnDef::new("c", "C", 100).group_path(["G", "S2"]),
        ]
    }

    #[test]
    fn test_header_click_toggles_clicked_depth() {
        let mut groups = CollapsingGroups::default();

        assert!(groups.header_clicked(&columns(), 0, 2));
        assert!(groups.collapsed().contains("G|S1"));

        assert!(groups.header_clicked(&columns(), 2, 1));
        assert!(groups.collapsed().contains("G"));
    }

    #[test]
    fn test_header_click_inside_band_expands() {
        let mut groups = CollapsingGroups::default();
        groups.toggle("G|S1");

        // Clicking the outer header over a collapsed column opens the band
        assert!(groups.header_clicked(&columns(), 1, 1));
        assert!(groups.collapsed().is_empty());
    }

    #[test]
    fn test_header_click_without_group_is_noop() {
        let mut groups = CollapsingGroups::default();
        let plain = vec![ColumnDef::new("x", "X", 100)];

        assert!(!groups.header_clicked(&plain, 0, 1));
        assert!(!groups.header_clicked(&plain, 7, 1));
    }
}
