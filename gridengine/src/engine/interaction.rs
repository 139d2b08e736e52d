use std::rc::Rc;

use gridcanvas::{EventKind, GridCell, GridInteraction, GridSelection, HostEvent};
use log::{debug, trace};

use super::render::HeaderDetails;
use super::{put_cell, EngineInner, GridEngine};
use crate::adapter::{FrameworkAdapter, HostElement, Listener, ListenerId};

impl<A: FrameworkAdapter> GridEngine<A> {
    /// Listen for every kind of host event on `element`.
    pub(super) fn attach_listeners(&self, element: &HostElement) -> Vec<ListenerId> {
        EventKind::ALL
            .iter()
            .map(|&kind| {
                let weak = self.downgrade();
                let listener: Listener = Rc::new(move |event: &HostEvent| {
                    if let Some(engine) = Self::upgrade(&weak) {
                        engine.handle_event(event);
                    }
                });
                self.shared.adapter.add_event_listener(element, kind, listener)
            })
            .collect()
    }

    pub(crate) fn handle_event(&self, event: &HostEvent) {
        let selection = self.current_selection();
        let interactions = {
            let mut inner = self.shared.inner.borrow_mut();
            inner
                .with_canvas(&selection, &HeaderDetails::new(), |canvas, props| {
                    canvas.interpret(props, event)
                })
                .unwrap_or_default()
        };
        trace!("{:?} -> {} interaction(s)", event.kind(), interactions.len());

        for interaction in interactions {
            self.apply_interaction(interaction);
        }
        self.render();
    }

    fn apply_interaction(&self, interaction: GridInteraction) {
        match interaction {
            GridInteraction::SelectionChanged(selection) => self.change_selection(selection),
            GridInteraction::CellClicked((col, row)) => {
                let (cell, callback) = {
                    let inner = self.shared.inner.borrow();
                    (
                        super::cell_at(&inner.config.data, col, row).cloned(),
                        inner.config.callbacks.on_cell_click.clone(),
                    )
                };
                if let (Some(cell), Some(callback)) = (cell, callback) {
                    callback(col, row, &cell);
                }
            }
            GridInteraction::GroupHeaderClicked { col, depth } => {
                let callback = self.shared.inner.borrow().config.callbacks.on_group_header_clicked.clone();
                if let Some(callback) = callback {
                    callback(col);
                }
                let changed = {
                    let mut inner = self.shared.inner.borrow_mut();
                    inner.refresh_compaction();
                    let EngineInner { groups, compaction, .. } = &mut *inner;
                    groups.header_clicked(&compaction.columns, col, depth)
                };
                debug!("Group header at column {} depth {} clicked (changed: {})", col, depth, changed);
            }
            GridInteraction::Scrolled(_) => self.notify_viewport_change(),
            GridInteraction::CellEdited { cell: (col, row), value } => self.edit_cell(col, row, value),
            // The next render picks up the element size.
            GridInteraction::Resized { .. } => {}
        }
    }

    /// Record a new selection, opening any collapsed group that hides it.
    ///
    /// A host that supplies a selection without a change callback has its
    /// copy updated in place; without a host selection the engine keeps it.
    pub(crate) fn change_selection(&self, selection: GridSelection) {
        let (callback, keep_locally) = {
            let mut inner = self.shared.inner.borrow_mut();
            inner.refresh_compaction();
            let EngineInner { groups, compaction, .. } = &mut *inner;
            let revealed = groups.selection_changed(&compaction.columns, &selection);
            if revealed > 0 {
                debug!("Selection revealed {} collapsed group(s)", revealed);
            }

            let callback = inner.config.callbacks.on_selection_change.clone();
            if inner.config.selection.is_some() && callback.is_none() {
                inner.config.selection = Some(selection.clone());
            }
            (callback, inner.config.selection.is_none())
        };

        if keep_locally {
            self.shared.fallback_selection.set(selection.clone());
        }
        if let Some(callback) = callback {
            callback(&selection);
        }
    }

    fn edit_cell(&self, col: usize, row: usize, value: GridCell) {
        let (on_edit, on_change) = {
            let mut inner = self.shared.inner.borrow_mut();
            put_cell(&mut inner.config.data, col, row, value.clone());
            let callbacks = &inner.config.callbacks;
            (callbacks.on_cell_edit.clone(), callbacks.on_data_change.clone())
        };
        if let Some(callback) = on_edit {
            callback(col, row, &value);
        }
        if let Some(callback) = on_change {
            callback();
        }
    }
}
