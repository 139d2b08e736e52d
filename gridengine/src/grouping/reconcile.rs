use gridcanvas::GridSelection;

use super::collapse::CollapseSet;
use super::model::GroupPath;
use crate::column::ColumnDef;

/// Collapsed keys hiding the current cell of `selection`, outermost first.
///
/// `columns` is the compacted column list the grid is drawing.
pub fn keys_to_reveal(
    columns: &[ColumnDef],
    selection: &GridSelection,
    collapsed: &CollapseSet,
) -> Vec<String> {
    let Some((col, _)) = selection.current_cell() else {
        return Vec::new();
    };
    let Some(column) = columns.get(col) else {
        return Vec::new();
    };
    GroupPath::of(column)
        .ancestor_keys()
        .filter(|key| collapsed.contains(key))
        .collect()
}

/// Expand every collapsed group containing the selected cell, at all depths.
/// Returns how many groups were expanded.
pub fn reveal_selection(
    columns: &[ColumnDef],
    selection: &GridSelection,
    collapsed: &mut CollapseSet,
) -> usize {
    let keys = keys_to_reveal(columns, selection, collapsed);
    collapsed.force_expand(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_reveals_every_depth() {
        let columns = vec![ColumnDef::new("a", "A", 100).group_path(["G", "S1"])];
        let mut collapsed: CollapseSet = ["G", "G|S1", "H"].into_iter().collect();

        let expanded = reveal_selection(&columns, &GridSelection::cell(0, 4), &mut collapsed);

        assert_eq!(expanded, 2);
        assert_eq!(collapsed.to_vec(), vec!["H".to_string()]);
    }

    #[test]
    fn test_column_selection_reveals_nothing() {
        let columns = vec![ColumnDef::new("a", "A", 100).group("G")];
        let mut collapsed: CollapseSet = ["G"].into_iter().collect();

        assert_eq!(reveal_selection(&columns, &GridSelection::column(0), &mut collapsed), 0);
        assert!(collapsed.contains("G"));
    }

    #[test]
    fn test_index_past_end_reveals_nothing() {
        let columns = vec![ColumnDef::new("a", "A", 100).group("G")];
        let collapsed: CollapseSet = ["G"].into_iter().collect();

        assert!(keys_to_reveal(&columns, &GridSelection::cell(5, 0), &collapsed).is_empty());
    }
}
