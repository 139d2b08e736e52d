use std::collections::{BTreeSet, HashMap};

use gridcanvas::{
    CanvasGrid, GridCell, GridColumn, GridProps, GridSelection, GroupDetails, GroupHeader, Item,
};
use log::trace;

use super::{cell_at, EngineInner, GridEngine};
use crate::adapter::FrameworkAdapter;
use crate::column::ColumnDef;
use crate::grouping::GroupPath;

/// Resolved details for every group header, keyed by header path.
pub(super) type HeaderDetails = HashMap<Vec<String>, GroupDetails>;

fn grid_column(column: &ColumnDef) -> GridColumn {
    GridColumn {
        id: column.id.clone(),
        title: column.title.clone(),
        width: column.width,
        group_path: GroupPath::of(column).segments(),
        theme_override: column.theme_override,
    }
}

impl EngineInner {
    pub(super) fn refresh_compaction(&mut self) {
        self.compaction = self.groups.compact(
            &self.config.columns,
            self.config.options.freeze_columns,
            &self.config.theme,
        );
    }

    /// Distinct header paths of the compacted columns, every depth included.
    fn header_paths(&self) -> BTreeSet<Vec<String>> {
        let mut paths = BTreeSet::new();
        for column in &self.compaction.columns {
            let segments = GroupPath::of(column).segments();
            for depth in 1..=segments.len() {
                paths.insert(segments[..depth].to_vec());
            }
        }
        paths
    }

    /// Build canvas props from the current state and hand them, with the
    /// canvas, to `f`. Headers missing from `details` show their bare label.
    /// `None` when not mounted.
    pub(super) fn with_canvas<R>(
        &mut self,
        selection: &GridSelection,
        details: &HeaderDetails,
        f: impl FnOnce(&mut CanvasGrid, &GridProps<'_>) -> R,
    ) -> Option<R> {
        self.canvas.as_ref()?;
        self.refresh_compaction();

        let columns: Vec<GridColumn> = self.compaction.columns.iter().map(grid_column).collect();
        let config = &self.config;

        let cell_content = |(col, row): Item| -> GridCell {
            cell_at(&config.data, col, row).cloned().unwrap_or_default()
        };
        let group_details = |header: &GroupHeader<'_>| -> GroupDetails {
            details.get(header.path).cloned().unwrap_or_else(|| GroupDetails {
                name: header.name.to_string(),
                ..GroupDetails::default()
            })
        };

        let props = GridProps {
            columns: &columns,
            rows: config.row_count(),
            cell_content: &cell_content,
            selection: Some(selection),
            freeze_columns: config.options.freeze_columns,
            row_height: config.options.row_height,
            header_height: config.options.header_height,
            smooth_scroll_x: config.options.smooth_scroll_x,
            smooth_scroll_y: config.options.smooth_scroll_y,
            theme: &config.theme,
            group_details: &group_details,
            cursor_visible: self.frames.cursor_visible,
        };

        let canvas = self.canvas.as_mut()?;
        Some(f(canvas, &props))
    }
}

impl<A: FrameworkAdapter> GridEngine<A> {
    /// Resolve every group header through the host resolver with no engine
    /// borrow held, so the resolver may read the engine.
    fn header_details(&self) -> HeaderDetails {
        let (paths, groups, resolver, theme) = {
            let mut inner = self.shared.inner.borrow_mut();
            inner.refresh_compaction();
            (
                inner.header_paths(),
                inner.groups.clone(),
                inner.config.callbacks.get_group_details.clone(),
                inner.config.theme.clone(),
            )
        };

        let mut details = HeaderDetails::with_capacity(paths.len());
        for path in paths {
            let Some(name) = path.last() else {
                continue;
            };
            let header = GroupHeader {
                name: name.as_str(),
                path: &path,
            };
            let resolved = groups.group_details(&header, resolver.as_deref(), &theme);
            details.insert(path, resolved);
        }
        details
    }

    /// Draw a full frame onto the mounted element's surface.
    pub(crate) fn render(&self) {
        if self.shared.inner.borrow().element.is_none() {
            return;
        }
        let selection = self.current_selection();
        let details = self.header_details();
        let mut inner = self.shared.inner.borrow_mut();
        let Some(element) = inner.element.clone() else {
            return;
        };

        let (width, height) = element.size();
        if let Some(canvas) = inner.canvas.as_mut()
            && canvas.size() != (width, height)
        {
            canvas.resize(width, height);
        }

        let mut surface = element.surface_mut();
        inner.with_canvas(&selection, &details, |canvas, props| canvas.render(props, &mut surface));
        trace!(
            "Rendered {} column(s) x {} row(s) onto '{}'",
            inner.compaction.columns.len(),
            inner.config.row_count(),
            element.tag()
        );
    }
}
