//! Collapsed bands: which column runs render narrowed, and the narrowed columns.

use std::ops::Range;

use gridcanvas::{Theme, ThemeOverride};

use super::collapse::CollapseSet;
use super::model::GroupPath;
use crate::column::ColumnDef;

/// Width of a column inside a collapsed band.
pub const COLLAPSED_WIDTH: u16 = 8;
/// Width of the last column of a band, which stays wide enough to click.
pub const COLLAPSED_LAST_WIDTH: u16 = 36;

/// Run of consecutive columns drawn as one collapsed band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

/// Columns after compaction together with the bands that produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compaction {
    pub spans: Vec<Span>,
    pub columns: Vec<ColumnDef>,
}

/// Whether any group containing `column` is collapsed.
pub fn is_collapsed(column: &ColumnDef, collapsed: &CollapseSet) -> bool {
    GroupPath::of(column)
        .ancestor_keys()
        .any(|key| collapsed.contains(&key))
}

/// Scan the non-frozen columns for collapsed runs.
///
/// A run only continues while the full group key stays the same, so two
/// collapsed sibling groups next to each other form two bands.
pub fn compute_spans(columns: &[ColumnDef], freeze_columns: usize, collapsed: &CollapseSet) -> Vec<Span> {
    let mut spans = Vec::new();
    if collapsed.is_empty() {
        return spans;
    }

    let mut open: Option<(usize, String)> = None;
    for (index, column) in columns.iter().enumerate().skip(freeze_columns) {
        let key = GroupPath::of(column).key();
        let folded = is_collapsed(column, collapsed);

        let continues = folded && open.as_ref().is_some_and(|(_, open_key)| *open_key == key);
        if continues {
            continue;
        }
        if let Some((start, _)) = open.take() {
            spans.push(Span::new(start, index - start));
        }
        if folded {
            open = Some((index, key));
        }
    }
    if let Some((start, _)) = open {
        spans.push(Span::new(start, columns.len() - start));
    }
    spans
}

/// Narrow the columns covered by collapsed bands.
///
/// Inside a band every column is [`COLLAPSED_WIDTH`] wide except the last,
/// which is [`COLLAPSED_LAST_WIDTH`], and cells use the medium background.
pub fn compact(
    columns: &[ColumnDef],
    freeze_columns: usize,
    collapsed: &CollapseSet,
    theme: &Theme,
) -> Compaction {
    let spans = compute_spans(columns, freeze_columns, collapsed);
    let mut compacted = columns.to_vec();

    let band = ThemeOverride::new().bg_cell(theme.bg_cell_medium);
    for span in &spans {
        for index in span.range() {
            let column = &mut compacted[index];
            column.width = if index + 1 == span.end() {
                COLLAPSED_LAST_WIDTH
            } else {
                COLLAPSED_WIDTH
            };
            column.theme_override = Some(column.theme_override.unwrap_or_default().merge(band));
        }
    }

    Compaction {
        spans,
        columns: compacted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(id: &str, path: &[&str]) -> ColumnDef {
        ColumnDef::new(id, id, 120).group_path(path.iter().copied())
    }

    #[test]
    fn test_adjacent_collapsed_groups_stay_separate() {
        let columns = vec![
            column("a", &["G", "S1"]),
            column("b", &["G", "S2"]),
            column("c", &["G", "S2"]),
        ];
        let collapsed: CollapseSet = ["G|S1", "G|S2"].into_iter().collect();

        assert_eq!(
            compute_spans(&columns, 0, &collapsed),
            vec![Span::new(0, 1), Span::new(1, 2)]
        );
    }

    #[test]
    fn test_outer_collapse_covers_subgroups_per_key() {
        let columns = vec![column("a", &["G", "S1"]), column("b", &["G", "S2"])];
        let collapsed: CollapseSet = ["G"].into_iter().collect();

        // Full keys differ, so the outer collapse still yields two bands
        assert_eq!(
            compute_spans(&columns, 0, &collapsed),
            vec![Span::new(0, 1), Span::new(1, 1)]
        );
    }

    #[test]
    fn test_span_closed_at_end_of_columns() {
        let columns = vec![column("x", &[]), column("a", &["G"]), column("b", &["G"])];
        let collapsed: CollapseSet = ["G"].into_iter().collect();

        assert_eq!(compute_spans(&columns, 0, &collapsed), vec![Span::new(1, 2)]);
    }

    #[test]
    fn test_no_spans_leaves_columns_untouched() {
        let columns = vec![column("a", &["G"]), column("b", &["H"])];
        let collapsed: CollapseSet = ["Z"].into_iter().collect();

        let result = compact(&columns, 0, &collapsed, &Theme::new());
        assert!(result.spans.is_empty());
        assert_eq!(result.columns, columns);
    }

    #[test]
    fn test_band_columns_get_medium_background() {
        let theme = Theme::new();
        let columns = vec![column("a", &["G"]), column("b", &["G"])];
        let collapsed: CollapseSet = ["G"].into_iter().collect();

        let result = compact(&columns, 0, &collapsed, &theme);
        for column in &result.columns {
            let over = column.theme_override.unwrap_or_default();
            assert_eq!(over.bg_cell, Some(theme.bg_cell_medium));
        }
        assert_eq!(result.columns[0].width, COLLAPSED_WIDTH);
        assert_eq!(result.columns[1].width, COLLAPSED_LAST_WIDTH);
    }
}
