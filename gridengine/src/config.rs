//! Engine configuration: data, columns, options, theme and callbacks.

use std::rc::Rc;

use gridcanvas::{GridCell, GridSelection, GroupDetails, Theme, Viewport};
use serde::{Deserialize, Serialize};

use crate::column::ColumnDef;

/// Cell data indexed as `data[row][col]`.
pub type DataMatrix = Vec<Vec<GridCell>>;

pub type SelectionCallback = Rc<dyn Fn(&GridSelection)>;
/// Called with `(col, row, cell)`.
pub type CellCallback = Rc<dyn Fn(usize, usize, &GridCell)>;
pub type ColumnCallback = Rc<dyn Fn(usize)>;
pub type ViewportCallback = Rc<dyn Fn(&Viewport)>;
pub type NotifyCallback = Rc<dyn Fn()>;
pub type GroupDetailsCallback = Rc<dyn Fn(&str) -> GroupDetails>;

pub const DEFAULT_ROW_HEIGHT: u16 = 34;
pub const DEFAULT_HEADER_HEIGHT: u16 = 36;

/// Behaviour flags handed to the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridOptions {
    /// Row count; defaults to the number of data rows.
    pub rows: Option<usize>,
    /// Leading columns pinned while scrolling. They never collapse.
    pub freeze_columns: usize,
    pub row_height: u16,
    pub header_height: u16,
    pub smooth_scroll_x: bool,
    pub smooth_scroll_y: bool,
    /// Mark a group header collapsed only on an exact key match.
    pub strict_group_matching: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            rows: None,
            freeze_columns: 0,
            row_height: DEFAULT_ROW_HEIGHT,
            header_height: DEFAULT_HEADER_HEIGHT,
            smooth_scroll_x: true,
            smooth_scroll_y: true,
            strict_group_matching: false,
        }
    }
}

/// Outbound callbacks. Each one is optional.
#[derive(Clone, Default)]
pub struct GridCallbacks {
    pub on_selection_change: Option<SelectionCallback>,
    pub on_cell_edit: Option<CellCallback>,
    pub on_cell_click: Option<CellCallback>,
    /// Runs before the engine toggles the clicked group.
    pub on_group_header_clicked: Option<ColumnCallback>,
    pub on_viewport_change: Option<ViewportCallback>,
    pub on_data_change: Option<NotifyCallback>,
    pub get_group_details: Option<GroupDetailsCallback>,
}

impl GridCallbacks {
    /// Combine two callback sets; callbacks set in `other` win.
    pub fn merge(self, other: GridCallbacks) -> GridCallbacks {
        GridCallbacks {
            on_selection_change: other.on_selection_change.or(self.on_selection_change),
            on_cell_edit: other.on_cell_edit.or(self.on_cell_edit),
            on_cell_click: other.on_cell_click.or(self.on_cell_click),
            on_group_header_clicked: other
                .on_group_header_clicked
                .or(self.on_group_header_clicked),
            on_viewport_change: other.on_viewport_change.or(self.on_viewport_change),
            on_data_change: other.on_data_change.or(self.on_data_change),
            get_group_details: other.get_group_details.or(self.get_group_details),
        }
    }
}

impl std::fmt::Debug for GridCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridCallbacks")
            .field("on_selection_change", &self.on_selection_change.is_some())
            .field("on_cell_edit", &self.on_cell_edit.is_some())
            .field("on_cell_click", &self.on_cell_click.is_some())
            .field("on_group_header_clicked", &self.on_group_header_clicked.is_some())
            .field("on_viewport_change", &self.on_viewport_change.is_some())
            .field("on_data_change", &self.on_data_change.is_some())
            .field("get_group_details", &self.get_group_details.is_some())
            .finish()
    }
}

/// Everything an engine is built from.
///
/// The engine keeps its own copy; later changes to the value a caller built
/// never reach it.
#[derive(Debug, Clone)]
pub struct GridEngineConfig {
    pub data: DataMatrix,
    pub columns: Vec<ColumnDef>,
    /// Width in pixels, used while no element is mounted.
    pub width: u32,
    /// Height in pixels, used while no element is mounted.
    pub height: u32,
    /// Host-owned selection. `None` lets the engine keep its own.
    pub selection: Option<GridSelection>,
    pub options: GridOptions,
    pub theme: Theme,
    pub callbacks: GridCallbacks,
}

impl Default for GridEngineConfig {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            columns: Vec::new(),
            width: 800,
            height: 600,
            selection: None,
            options: GridOptions::default(),
            theme: Theme::new(),
            callbacks: GridCallbacks::default(),
        }
    }
}

impl GridEngineConfig {
    pub fn new(columns: Vec<ColumnDef>, data: DataMatrix) -> Self {
        Self {
            columns,
            data,
            ..Default::default()
        }
    }

    /// Rows the grid shows: the override, else the data length.
    pub fn row_count(&self) -> usize {
        self.options.rows.unwrap_or(self.data.len())
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn selection(mut self, selection: GridSelection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn options(mut self, options: GridOptions) -> Self {
        self.options = options;
        self
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.options.rows = Some(rows);
        self
    }

    pub fn freeze_columns(mut self, count: usize) -> Self {
        self.options.freeze_columns = count;
        self
    }

    pub fn row_height(mut self, height: u16) -> Self {
        self.options.row_height = height;
        self
    }

    pub fn header_height(mut self, height: u16) -> Self {
        self.options.header_height = height;
        self
    }

    pub fn strict_group_matching(mut self) -> Self {
        self.options.strict_group_matching = true;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn on_selection_change(mut self, f: impl Fn(&GridSelection) + 'static) -> Self {
        self.callbacks.on_selection_change = Some(Rc::new(f));
        self
    }

    pub fn on_cell_edit(mut self, f: impl Fn(usize, usize, &GridCell) + 'static) -> Self {
        self.callbacks.on_cell_edit = Some(Rc::new(f));
        self
    }

    pub fn on_cell_click(mut self, f: impl Fn(usize, usize, &GridCell) + 'static) -> Self {
        self.callbacks.on_cell_click = Some(Rc::new(f));
        self
    }

    pub fn on_group_header_clicked(mut self, f: impl Fn(usize) + 'static) -> Self {
        self.callbacks.on_group_header_clicked = Some(Rc::new(f));
        self
    }

    pub fn on_viewport_change(mut self, f: impl Fn(&Viewport) + 'static) -> Self {
        self.callbacks.on_viewport_change = Some(Rc::new(f));
        self
    }

    pub fn on_data_change(mut self, f: impl Fn() + 'static) -> Self {
        self.callbacks.on_data_change = Some(Rc::new(f));
        self
    }

    pub fn get_group_details(mut self, f: impl Fn(&str) -> GroupDetails + 'static) -> Self {
        self.callbacks.get_group_details = Some(Rc::new(f));
        self
    }
}

/// Partial configuration update. Unset fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct ConfigPatch {
    pub data: Option<DataMatrix>,
    pub columns: Option<Vec<ColumnDef>>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// `Some(None)` hands selection back to the engine.
    pub selection: Option<Option<GridSelection>>,
    pub rows: Option<Option<usize>>,
    pub freeze_columns: Option<usize>,
    pub row_height: Option<u16>,
    pub header_height: Option<u16>,
    pub smooth_scroll_x: Option<bool>,
    pub smooth_scroll_y: Option<bool>,
    pub strict_group_matching: Option<bool>,
    pub theme: Option<Theme>,
    /// Callbacks set here replace the current ones.
    pub callbacks: GridCallbacks,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(mut self, data: DataMatrix) -> Self {
        self.data = Some(data);
        self
    }

    pub fn columns(mut self, columns: Vec<ColumnDef>) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn selection(mut self, selection: Option<GridSelection>) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn rows(mut self, rows: Option<usize>) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn freeze_columns(mut self, count: usize) -> Self {
        self.freeze_columns = Some(count);
        self
    }

    pub fn row_height(mut self, height: u16) -> Self {
        self.row_height = Some(height);
        self
    }

    pub fn header_height(mut self, height: u16) -> Self {
        self.header_height = Some(height);
        self
    }

    pub fn smooth_scroll(mut self, x: bool, y: bool) -> Self {
        self.smooth_scroll_x = Some(x);
        self.smooth_scroll_y = Some(y);
        self
    }

    pub fn strict_group_matching(mut self, strict: bool) -> Self {
        self.strict_group_matching = Some(strict);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn callbacks(mut self, callbacks: GridCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Merge into `config`. Returns true if the data was replaced.
    pub fn apply(self, config: &mut GridEngineConfig) -> bool {
        let data_changed = self.data.is_some();
        if let Some(data) = self.data {
            config.data = data;
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(selection) = self.selection {
            config.selection = selection;
        }

        let options = &mut config.options;
        if let Some(rows) = self.rows {
            options.rows = rows;
        }
        if let Some(count) = self.freeze_columns {
            options.freeze_columns = count;
        }
        if let Some(height) = self.row_height {
            options.row_height = height;
        }
        if let Some(height) = self.header_height {
            options.header_height = height;
        }
        if let Some(smooth) = self.smooth_scroll_x {
            options.smooth_scroll_x = smooth;
        }
        if let Some(smooth) = self.smooth_scroll_y {
            options.smooth_scroll_y = smooth;
        }
        if let Some(strict) = self.strict_group_matching {
            options.strict_group_matching = strict;
        }

        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        let current = std::mem::take(&mut config.callbacks);
        config.callbacks = current.merge(self.callbacks);
        data_changed
    }
}
