//! The grid engine: a framework-neutral facade over the canvas grid.
//!
//! [`GridEngine`] owns a copy of the configuration, the collapse state and the
//! canvas, and reaches its host only through a [`FrameworkAdapter`]. Every
//! mutator re-renders synchronously. Callbacks run after the engine's internal
//! borrow is released, so they may call back into the engine.

mod frames;
mod interaction;
mod render;

pub use frames::{BLINK_INTERVAL, SCROLL_ANIMATION_FRAMES};

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gridcanvas::{CanvasGrid, CellRange, GridCell, GridSelection, Viewport};
use log::{debug, warn};

use crate::adapter::{FontSpec, FrameworkAdapter, HostElement, ListenerId, TextMetrics};
use crate::config::{ConfigPatch, DataMatrix, GridEngineConfig};
use crate::grouping::{CollapsingGroups, Compaction, Span};
use crate::state::State;
use frames::FrameState;

/// Operations every grid engine offers, whatever adapter it runs on.
pub trait DataGrid {
    /// Attach to `element` and start rendering. Ignored when already mounted.
    fn mount(&self, element: &HostElement);
    /// Detach, dropping every listener and scheduled frame. Safe when not mounted.
    fn unmount(&self);
    fn destroy(&self) {
        self.unmount();
    }
    fn is_mounted(&self) -> bool;

    fn update_config(&self, patch: ConfigPatch);
    fn config(&self) -> GridEngineConfig;

    fn data(&self) -> DataMatrix;
    fn set_data(&self, data: DataMatrix);
    /// Cell at `(col, row)`, or the empty cell past the data.
    fn cell_value(&self, col: usize, row: usize) -> GridCell;
    /// Store a cell, growing the data with empty cells as needed.
    fn set_cell_value(&self, col: usize, row: usize, value: GridCell);

    fn selection(&self) -> GridSelection;
    fn set_selection(&self, selection: GridSelection);

    /// Scroll to a content position in pixels.
    fn scroll_to(&self, x: u32, y: u32, animated: bool);
    fn scroll_to_cell(&self, col: usize, row: usize, animated: bool);
    fn viewport(&self) -> Viewport;
    fn visible_cell_range(&self) -> CellRange;

    fn invalidate(&self);

    /// Collapsed group keys, sorted.
    fn collapsed_groups(&self) -> Vec<String>;
    fn toggle_group(&self, key: &str) -> bool;
    fn spans(&self) -> Vec<Span>;

    fn measure_text(&self, text: &str, font: &FontSpec) -> TextMetrics;
    fn create_element(&self, tag: &str) -> HostElement;
}

pub(crate) struct EngineInner {
    config: GridEngineConfig,
    groups: CollapsingGroups,
    canvas: Option<CanvasGrid>,
    element: Option<HostElement>,
    listeners: Vec<ListenerId>,
    compaction: Compaction,
    frames: FrameState,
}

pub(crate) struct EngineShared<A> {
    adapter: A,
    inner: RefCell<EngineInner>,
    /// Selection kept by the engine while the host supplies none.
    fallback_selection: State<GridSelection>,
}

/// Grid engine bound to one adapter. Cloning yields another handle to the
/// same engine.
pub struct GridEngine<A: FrameworkAdapter> {
    shared: Rc<EngineShared<A>>,
}

impl<A: FrameworkAdapter> Clone for GridEngine<A> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<A: FrameworkAdapter> GridEngine<A> {
    pub fn new(config: GridEngineConfig, adapter: A) -> Self {
        let fallback_selection = adapter.create_state(GridSelection::default());
        let groups = CollapsingGroups::new(config.options.strict_group_matching);
        Self {
            shared: Rc::new(EngineShared {
                adapter,
                inner: RefCell::new(EngineInner {
                    config,
                    groups,
                    canvas: None,
                    element: None,
                    listeners: Vec::new(),
                    compaction: Compaction::default(),
                    frames: FrameState::new(),
                }),
                fallback_selection,
            }),
        }
    }

    pub fn adapter(&self) -> &A {
        &self.shared.adapter
    }

    /// The engine-held selection, observable by the host.
    pub fn selection_state(&self) -> State<GridSelection> {
        self.shared.fallback_selection.clone()
    }

    pub fn element(&self) -> Option<HostElement> {
        self.shared.inner.borrow().element.clone()
    }

    /// Whether the current-cell marker is in the visible phase of its blink.
    pub fn cursor_visible(&self) -> bool {
        self.shared.inner.borrow().frames.cursor_visible
    }

    /// Let the adapter's lifecycle drive this engine: mount on mount, unmount
    /// on unmount, re-render on update.
    pub fn bind_lifecycle(&self) {
        let weak = self.downgrade();
        self.shared.adapter.on_mount(Rc::new(move |element| {
            if let Some(engine) = Self::upgrade(&weak) {
                engine.mount(element);
            }
        }));
        let weak = self.downgrade();
        self.shared.adapter.on_unmount(Rc::new(move || {
            if let Some(engine) = Self::upgrade(&weak) {
                engine.unmount();
            }
        }));
        let weak = self.downgrade();
        self.shared.adapter.on_update(Rc::new(move || {
            if let Some(engine) = Self::upgrade(&weak) {
                engine.invalidate();
            }
        }));
    }

    pub(crate) fn downgrade(&self) -> Weak<EngineShared<A>> {
        Rc::downgrade(&self.shared)
    }

    pub(crate) fn upgrade(weak: &Weak<EngineShared<A>>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    /// Host selection if there is one, else the engine's own.
    fn current_selection(&self) -> GridSelection {
        let host = self.shared.inner.borrow().config.selection.clone();
        host.unwrap_or_else(|| self.shared.fallback_selection.get())
    }

    fn notify_data_change(&self) {
        let callback = self.shared.inner.borrow().config.callbacks.on_data_change.clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    fn notify_viewport_change(&self) {
        let (callback, viewport) = {
            let inner = self.shared.inner.borrow();
            (inner.config.callbacks.on_viewport_change.clone(), inner.viewport())
        };
        if let Some(callback) = callback {
            callback(&viewport);
        }
    }
}

impl EngineInner {
    fn viewport(&self) -> Viewport {
        match &self.canvas {
            Some(canvas) => canvas.viewport(),
            None => Viewport {
                x: 0,
                y: 0,
                width: self.config.width,
                height: self.config.height,
            },
        }
    }

    /// Without a canvas, estimate from the configured height.
    fn visible_cell_range(&self) -> CellRange {
        if let Some(canvas) = &self.canvas {
            return canvas.visible_cell_range();
        }
        let row_height = self.config.options.row_height.max(1) as u32;
        let fits = self.config.height.div_ceil(row_height) as usize;
        CellRange {
            start_col: 0,
            end_col: self.config.columns.len(),
            start_row: 0,
            end_row: fits.min(self.config.row_count()),
        }
    }
}

pub(crate) fn cell_at(data: &DataMatrix, col: usize, row: usize) -> Option<&GridCell> {
    data.get(row).and_then(|cells| cells.get(col))
}

fn put_cell(data: &mut DataMatrix, col: usize, row: usize, value: GridCell) {
    if data.len() <= row {
        data.resize_with(row + 1, Vec::new);
    }
    let cells = &mut data[row];
    if cells.len() <= col {
        cells.resize_with(col + 1, GridCell::empty);
    }
    cells[col] = value;
}

impl<A: FrameworkAdapter> DataGrid for GridEngine<A> {
    fn mount(&self, element: &HostElement) {
        let (width, height) = element.size();
        {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.element.is_some() {
                warn!("Grid engine already mounted; ignoring mount on '{}'", element.tag());
                return;
            }
            inner.element = Some(element.clone());
            inner.canvas = Some(CanvasGrid::new(width, height));
            inner.groups.reset();
            inner.frames = FrameState::new();
        }

        let listeners = self.attach_listeners(element);
        self.shared.inner.borrow_mut().listeners = listeners;
        self.schedule_blink();

        debug!(
            "Grid engine mounted on '{}' ({}x{}) via {} adapter",
            element.tag(),
            width,
            height,
            self.shared.adapter.name()
        );
        self.render();
    }

    fn unmount(&self) {
        let (element, listeners, frames) = {
            let mut inner = self.shared.inner.borrow_mut();
            let Some(element) = inner.element.take() else {
                return;
            };
            inner.canvas = None;
            let listeners = std::mem::take(&mut inner.listeners);
            let frames = inner.frames.take_scheduled();
            (element, listeners, frames)
        };

        for id in &listeners {
            self.shared.adapter.remove_event_listener(&element, *id);
        }
        for id in &frames {
            self.shared.adapter.cancel_animation_frame(*id);
        }
        debug!(
            "Grid engine unmounted from '{}': {} listener(s), {} frame(s) released",
            element.tag(),
            listeners.len(),
            frames.len()
        );
    }

    fn is_mounted(&self) -> bool {
        self.shared.inner.borrow().element.is_some()
    }

    fn update_config(&self, patch: ConfigPatch) {
        let data_changed = {
            let mut inner = self.shared.inner.borrow_mut();
            let changed = patch.apply(&mut inner.config);
            let strict = inner.config.options.strict_group_matching;
            inner.groups.set_strict_matching(strict);
            changed
        };
        self.render();
        if data_changed {
            self.notify_data_change();
        }
    }

    fn config(&self) -> GridEngineConfig {
        self.shared.inner.borrow().config.clone()
    }

    fn data(&self) -> DataMatrix {
        self.shared.inner.borrow().config.data.clone()
    }

    fn set_data(&self, data: DataMatrix) {
        self.shared.inner.borrow_mut().config.data = data;
        self.render();
        self.notify_data_change();
    }

    fn cell_value(&self, col: usize, row: usize) -> GridCell {
        let inner = self.shared.inner.borrow();
        cell_at(&inner.config.data, col, row).cloned().unwrap_or_default()
    }

    fn set_cell_value(&self, col: usize, row: usize, value: GridCell) {
        put_cell(&mut self.shared.inner.borrow_mut().config.data, col, row, value);
        self.render();
        self.notify_data_change();
    }

    fn selection(&self) -> GridSelection {
        self.current_selection()
    }

    fn set_selection(&self, selection: GridSelection) {
        self.shared.inner.borrow_mut().config.selection = Some(selection);
        self.render();
    }

    fn scroll_to(&self, x: u32, y: u32, animated: bool) {
        if !self.is_mounted() {
            debug!("scroll_to({}, {}) ignored: engine not mounted", x, y);
            return;
        }
        if animated {
            self.start_scroll_animation((x, y));
        } else {
            self.cancel_scroll_animation();
            if self.apply_scroll(x, y) {
                self.notify_viewport_change();
            }
        }
    }

    fn scroll_to_cell(&self, col: usize, row: usize, animated: bool) {
        let target = {
            let inner = self.shared.inner.borrow();
            inner.canvas.as_ref().and_then(|c| c.cell_scroll_target(col, row))
        };
        match target {
            Some((x, y)) => self.scroll_to(x, y, animated),
            None => debug!("scroll_to_cell({}, {}) ignored: no target", col, row),
        }
    }

    fn viewport(&self) -> Viewport {
        self.shared.inner.borrow().viewport()
    }

    fn visible_cell_range(&self) -> CellRange {
        self.shared.inner.borrow().visible_cell_range()
    }

    fn invalidate(&self) {
        self.render();
    }

    fn collapsed_groups(&self) -> Vec<String> {
        self.shared.inner.borrow().groups.collapsed().to_vec()
    }

    fn toggle_group(&self, key: &str) -> bool {
        let changed = self.shared.inner.borrow_mut().groups.toggle(key);
        if changed {
            self.render();
        }
        changed
    }

    fn spans(&self) -> Vec<Span> {
        let inner = self.shared.inner.borrow();
        let options = &inner.config.options;
        inner
            .groups
            .compact(&inner.config.columns, options.freeze_columns, &inner.config.theme)
            .spans
    }

    fn measure_text(&self, text: &str, font: &FontSpec) -> TextMetrics {
        if !self.is_mounted() {
            return TextMetrics::default();
        }
        self.shared.adapter.measure_text(text, font)
    }

    fn create_element(&self, tag: &str) -> HostElement {
        self.shared.adapter.create_element(tag)
    }
}

impl<A: FrameworkAdapter> std::fmt::Debug for GridEngine<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.shared.inner.borrow();
        f.debug_struct("GridEngine")
            .field("adapter", &self.shared.adapter.name())
            .field("mounted", &inner.element.is_some())
            .field("columns", &inner.config.columns.len())
            .field("rows", &inner.config.row_count())
            .field("collapsed", &inner.groups.collapsed().len())
            .finish()
    }
}
