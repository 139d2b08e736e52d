use std::cell::RefCell;
use std::rc::Rc;

use gridcanvas::{CellRange, GridSelection, HostEvent, Key, Modifiers, Theme, Viewport};
use gridengine::engine::{BLINK_INTERVAL, SCROLL_ANIMATION_FRAMES};
use gridengine::grouping::Span;
use gridengine::prelude::*;

fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("a", "A", 80).group_path(["G", "S1"]),
        ColumnDef::new("b", "B", 80).group_path(["G", "S1"]),
        ColumnDef::new("c", "C", 80).group_path(["G", "S2"]),
    ]
}

fn data(rows: usize) -> DataMatrix {
    (0..rows)
        .map(|row| (0..3).map(|col| GridCell::text(format!("{col},{row}"))).collect())
        .collect()
}

fn config(rows: usize) -> GridEngineConfig {
    GridEngineConfig::new(columns(), data(rows))
}

/// Element of 40x8 cells: two group lines, the column header line and five
/// body lines. Each column is ten cells wide.
fn mounted(config: GridEngineConfig) -> (GridEngine<HeadlessAdapter>, HeadlessAdapter, HostElement) {
    let adapter = HeadlessAdapter::with_size(40, 8);
    let engine = GridFactory::create_engine(config, adapter.clone());
    let element = adapter.create_element("grid");
    engine.mount(&element);
    (engine, adapter, element)
}

fn bg(element: &HostElement, x: u16, y: u16) -> Option<gridcanvas::Rgb> {
    element.surface().get(x, y).map(|cell| cell.bg)
}

fn counter() -> (Rc<RefCell<usize>>, impl Fn() + 'static) {
    let count = Rc::new(RefCell::new(0));
    let inner = Rc::clone(&count);
    (count, move || *inner.borrow_mut() += 1)
}

// ============================================================================
// Mounting
// ============================================================================

#[test]
fn test_mount_renders_headers_and_cells() {
    let (engine, _adapter, element) = mounted(config(5));

    assert!(engine.is_mounted());
    assert!(element.line(0).starts_with(" G "));
    assert!(element.line(1).starts_with(&format!("{:<20}{:<10}", " S1", " S2")));
    assert!(element.line(2).starts_with(&format!("{:<10}{:<10}{:<10}", " A", " B", " C")));
    assert!(element.line(3).starts_with(&format!("{:<10}{:<10}", " 0,0", " 1,0")));
}

#[test]
fn test_mount_registers_listeners_and_blink() {
    let (_engine, adapter, element) = mounted(config(5));

    assert_eq!(element.listener_count(), 5);
    assert_eq!(adapter.pending_frames(), 1);
}

#[test]
fn test_second_mount_ignored() {
    let (engine, adapter, element) = mounted(config(5));
    let other = adapter.create_element("other");

    engine.mount(&element);
    engine.mount(&other);

    assert_eq!(element.listener_count(), 5);
    assert_eq!(other.listener_count(), 0);
    assert_eq!(engine.element(), Some(element));
}

#[test]
fn test_mount_resets_collapsed_groups() {
    let (engine, _adapter, element) = mounted(config(5));
    engine.toggle_group("G|S1");

    engine.unmount();
    engine.mount(&element);

    assert!(engine.collapsed_groups().is_empty());
}

// ============================================================================
// Unmounting
// ============================================================================

#[test]
fn test_unmount_releases_everything() {
    let (count, on_click) = counter();
    let config = config(5).on_cell_click(move |_, _, _| on_click());
    let (engine, adapter, element) = mounted(config);

    engine.unmount();

    assert!(!engine.is_mounted());
    assert_eq!(element.listener_count(), 0);
    assert_eq!(adapter.pending_frames(), 0);
    assert_eq!(adapter.dispatch(&element, &HostEvent::click(5, 3)), 0);
    assert_eq!(adapter.run_frames(50), 0);
    assert_eq!(*count.borrow(), 0);
}

#[test]
fn test_unmount_cancels_animated_scroll() {
    let (engine, adapter, _element) = mounted(config(50));
    engine.scroll_to(0, 340, true);
    assert_eq!(adapter.pending_frames(), 2);

    engine.destroy();

    assert_eq!(adapter.pending_frames(), 0);
}

#[test]
fn test_unmount_when_not_mounted_is_noop() {
    let engine = GridFactory::create_headless_engine(config(5));
    engine.unmount();
    engine.destroy();
    assert!(!engine.is_mounted());
}

// ============================================================================
// Group Headers
// ============================================================================

#[test]
fn test_group_header_click_collapses_band() {
    let (engine, _adapter, element) = mounted(config(5));
    let theme = Theme::new();

    adapter_click(&element, 0, 1);

    assert_eq!(engine.collapsed_groups(), vec!["G|S1".to_string()]);
    assert_eq!(engine.spans(), vec![Span::new(0, 2)]);
    // A shrinks to one cell and B to five, so C starts at x = 6
    assert!(element.line(2).starts_with("A B    C"));
    assert_eq!(bg(&element, 0, 1), Some(theme.bg_header_has_focus.to_rgb()));
    assert_eq!(bg(&element, 8, 1), Some(theme.bg_header.to_rgb()));
    assert_eq!(bg(&element, 0, 3), Some(theme.bg_cell_medium.to_rgb()));
    assert_eq!(bg(&element, 8, 3), Some(theme.bg_cell.to_rgb()));
}

#[test]
fn test_click_on_band_expands_it() {
    let (engine, _adapter, element) = mounted(config(5));
    engine.toggle_group("G|S1");

    // Outer header over a collapsed column opens the band instead of
    // collapsing the parent
    adapter_click(&element, 0, 0);

    assert!(engine.collapsed_groups().is_empty());
    assert!(engine.spans().is_empty());
}

#[test]
fn test_parent_header_collapses_every_subgroup() {
    let (engine, _adapter, element) = mounted(config(5));

    adapter_click(&element, 25, 0);

    assert_eq!(engine.collapsed_groups(), vec!["G".to_string()]);
    assert_eq!(engine.spans(), vec![Span::new(0, 2), Span::new(2, 1)]);
}

#[test]
fn test_header_callback_runs_before_toggle() {
    let slot: Rc<RefCell<Option<GridEngine<HeadlessAdapter>>>> = Rc::new(RefCell::new(None));
    let seen: Rc<RefCell<Vec<(usize, Vec<String>)>>> = Rc::new(RefCell::new(Vec::new()));

    let config = {
        let slot = Rc::clone(&slot);
        let seen = Rc::clone(&seen);
        config(5).on_group_header_clicked(move |col| {
            let collapsed = slot.borrow().as_ref().map(|e| e.collapsed_groups()).unwrap_or_default();
            seen.borrow_mut().push((col, collapsed));
        })
    };
    let (engine, _adapter, element) = mounted(config);
    *slot.borrow_mut() = Some(engine.clone());

    adapter_click(&element, 25, 1);

    assert_eq!(*seen.borrow(), vec![(2, Vec::new())]);
    assert_eq!(engine.collapsed_groups(), vec!["G|S2".to_string()]);
}

#[test]
fn test_group_details_resolver_icon_drawn() {
    let config = config(5).get_group_details(|name| GroupDetails {
        name: name.to_lowercase(),
        icon: Some("#".to_string()),
        override_theme: None,
    });
    let (_engine, _adapter, element) = mounted(config);

    // The label always comes from the header; the icon is kept
    assert!(element.line(0).starts_with(" # G"));
}

#[test]
fn test_group_details_resolver_reads_engine() {
    let slot: Rc<RefCell<Option<GridEngine<HeadlessAdapter>>>> = Rc::new(RefCell::new(None));
    let config = {
        let slot = Rc::clone(&slot);
        config(5).get_group_details(move |name| {
            let collapsed = slot
                .borrow()
                .as_ref()
                .map(|engine| engine.collapsed_groups().len())
                .unwrap_or_default();
            GroupDetails {
                name: name.to_string(),
                icon: Some(collapsed.to_string()),
                override_theme: None,
            }
        })
    };
    let adapter = HeadlessAdapter::with_size(40, 8);
    let engine = GridFactory::create_engine(config, adapter.clone());
    *slot.borrow_mut() = Some(engine.clone());
    let element = adapter.create_element("grid");

    engine.mount(&element);
    assert!(element.line(0).starts_with(" 0 G"));

    engine.toggle_group("G|S2");
    assert!(element.line(0).starts_with(" 1 G"));

    // Blink frames render through the resolver as well
    adapter.run_frames(40);
    assert!(engine.is_mounted());
    slot.borrow_mut().take();
}

#[test]
fn test_strict_matching_removes_trailing_segment_match() {
    let columns = vec![
        ColumnDef::new("x", "X", 80).group_path(["P", "Shared"]),
        ColumnDef::new("y", "Y", 80).group_path(["Q", "Shared"]),
    ];
    let theme = Theme::new();
    let (engine, _adapter, element) = mounted(GridEngineConfig::new(columns, Vec::new()));
    engine.toggle_group("P|Shared");

    // X is a five-cell band; Y's subgroup header starts at x = 5
    assert_eq!(bg(&element, 8, 1), Some(theme.bg_header_has_focus.to_rgb()));

    engine.update_config(ConfigPatch::new().strict_group_matching(true));

    assert_eq!(bg(&element, 8, 1), Some(theme.bg_header.to_rgb()));
    assert_eq!(bg(&element, 0, 1), Some(theme.bg_header_has_focus.to_rgb()));
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_cell_click_reveals_and_selects() {
    let clicks: Rc<RefCell<Vec<(usize, usize, GridCell)>>> = Rc::new(RefCell::new(Vec::new()));
    let config = {
        let clicks = Rc::clone(&clicks);
        config(5).on_cell_click(move |col, row, cell| clicks.borrow_mut().push((col, row, cell.clone())))
    };
    let (engine, _adapter, element) = mounted(config);
    engine.toggle_group("G|S1");

    adapter_click(&element, 0, 4);

    assert!(engine.collapsed_groups().is_empty());
    assert_eq!(engine.selection(), GridSelection::cell(0, 1));
    assert_eq!(*clicks.borrow(), vec![(0, 1, GridCell::text("0,1"))]);
}

#[test]
fn test_click_reveals_every_depth() {
    let (engine, _adapter, element) = mounted(config(5));
    engine.toggle_group("G");
    engine.toggle_group("G|S1");

    adapter_click(&element, 0, 3);

    assert!(engine.collapsed_groups().is_empty());
}

#[test]
fn test_click_beyond_data_does_not_fire_cell_click() {
    let (count, on_click) = counter();
    let config = config(2).rows(5).on_cell_click(move |_, _, _| on_click());
    let (engine, _adapter, element) = mounted(config);

    adapter_click(&element, 5, 6);

    assert_eq!(engine.selection(), GridSelection::cell(0, 3));
    assert_eq!(*count.borrow(), 0);
}

#[test]
fn test_column_header_click_selects_column() {
    let (engine, _adapter, element) = mounted(config(5));

    adapter_click(&element, 15, 2);

    assert!(engine.selection().columns.has(1));
    assert_eq!(engine.selection().current_cell(), None);
}

#[test]
fn test_fallback_selection_notifies_subscribers() {
    let (engine, _adapter, element) = mounted(config(5));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    engine.selection_state().subscribe(move |selection: &GridSelection| {
        sink.borrow_mut().push(selection.current_cell());
    });

    adapter_click(&element, 15, 5);

    assert_eq!(engine.selection_state().get(), GridSelection::cell(1, 2));
    assert_eq!(*seen.borrow(), vec![Some((1, 2))]);
}

#[test]
fn test_host_selection_with_callback_stays_host_owned() {
    let received = Rc::new(RefCell::new(Vec::new()));
    let config = {
        let received = Rc::clone(&received);
        config(5)
            .selection(GridSelection::default())
            .on_selection_change(move |selection| received.borrow_mut().push(selection.clone()))
    };
    let (engine, _adapter, element) = mounted(config);

    adapter_click(&element, 5, 3);

    assert_eq!(engine.selection(), GridSelection::default());
    assert_eq!(*received.borrow(), vec![GridSelection::cell(0, 0)]);
    assert_eq!(engine.selection_state().get(), GridSelection::default());
}

#[test]
fn test_host_selection_without_callback_updated() {
    let (engine, _adapter, element) = mounted(config(5).selection(GridSelection::cell(2, 2)));

    adapter_click(&element, 5, 3);

    assert_eq!(engine.selection(), GridSelection::cell(0, 0));
    assert_eq!(engine.config().selection, Some(GridSelection::cell(0, 0)));
}

#[test]
fn test_clearing_host_selection_falls_back() {
    let (engine, _adapter, _element) = mounted(config(5).selection(GridSelection::cell(2, 2)));

    engine.update_config(ConfigPatch::new().selection(None));

    assert_eq!(engine.selection(), GridSelection::default());
}

#[test]
fn test_set_selection_replaces_selection() {
    let (engine, _adapter, _element) = mounted(config(5));

    engine.set_selection(GridSelection::cell(2, 4));

    assert_eq!(engine.selection(), GridSelection::cell(2, 4));
}

#[test]
fn test_arrow_keys_move_current_cell() {
    let (engine, adapter, element) = mounted(config(5));
    adapter_click(&element, 5, 3);

    adapter.dispatch(&element, &HostEvent::key(Key::Down));
    adapter.dispatch(&element, &HostEvent::key(Key::Right));

    assert_eq!(engine.selection().current_cell(), Some((1, 1)));
}

#[test]
fn test_tab_moves_to_next_column() {
    let (engine, adapter, element) = mounted(config(5));
    adapter_click(&element, 5, 3);

    adapter.dispatch(
        &element,
        &HostEvent::Key {
            key: Key::Tab,
            modifiers: Modifiers::new(),
        },
    );

    assert_eq!(engine.selection().current_cell(), Some((1, 0)));
}

// ============================================================================
// Editing and Data
// ============================================================================

#[test]
fn test_paste_edits_current_cell() {
    let edits = Rc::new(RefCell::new(Vec::new()));
    let (changes, on_change) = counter();
    let config = {
        let edits = Rc::clone(&edits);
        config(5)
            .on_cell_edit(move |col, row, value| edits.borrow_mut().push((col, row, value.clone())))
            .on_data_change(on_change)
    };
    let (engine, adapter, element) = mounted(config);
    adapter_click(&element, 5, 3);

    adapter.dispatch(&element, &HostEvent::Paste("edited".to_string()));

    assert_eq!(engine.cell_value(0, 0), GridCell::text("edited"));
    assert_eq!(*edits.borrow(), vec![(0, 0, GridCell::text("edited"))]);
    assert_eq!(*changes.borrow(), 1);
    assert!(element.line(3).starts_with(" edited"));
}

#[test]
fn test_set_data_copies_matrix() {
    let (engine, _adapter, _element) = mounted(config(5));
    let mut matrix = data(2);

    engine.set_data(matrix.clone());
    matrix[0][0] = GridCell::text("changed");

    assert_eq!(engine.cell_value(0, 0), GridCell::text("0,0"));
    assert_eq!(engine.data().len(), 2);

    let mut copy = engine.data();
    copy[1][1] = GridCell::text("changed");
    assert_eq!(engine.cell_value(1, 1), GridCell::text("1,1"));
}

#[test]
fn test_set_cell_value_grows_matrix() {
    let (changes, on_change) = counter();
    let (engine, _adapter, _element) = mounted(config(2).on_data_change(on_change));

    engine.set_cell_value(4, 3, GridCell::number(7.0));

    let data = engine.data();
    assert_eq!(data.len(), 4);
    assert_eq!(data[3].len(), 5);
    assert!(data[3][0].is_empty());
    assert!(data[2].is_empty());
    assert_eq!(engine.cell_value(4, 3), GridCell::number(7.0));
    assert_eq!(*changes.borrow(), 1);
}

#[test]
fn test_cell_value_past_data_is_empty() {
    let engine = GridFactory::create_headless_engine(config(2));
    assert!(engine.cell_value(9, 9).is_empty());
}

#[test]
fn test_update_config_replaces_data_and_notifies() {
    let (changes, on_change) = counter();
    let (engine, _adapter, element) = mounted(config(5).on_data_change(on_change));

    engine.update_config(ConfigPatch::new().freeze_columns(1));
    assert_eq!(*changes.borrow(), 0);

    engine.update_config(ConfigPatch::new().data(vec![vec![GridCell::text("only")]]));

    assert_eq!(*changes.borrow(), 1);
    assert_eq!(engine.config().row_count(), 1);
    assert!(element.line(3).starts_with(" only"));
}

#[test]
fn test_frozen_column_stays_out_of_band() {
    let (engine, _adapter, _element) = mounted(config(5).freeze_columns(1));

    engine.toggle_group("G|S1");

    assert_eq!(engine.spans(), vec![Span::new(1, 1)]);
}

#[test]
fn test_callbacks_may_reenter_engine() {
    let slot: Rc<RefCell<Option<GridEngine<HeadlessAdapter>>>> = Rc::new(RefCell::new(None));
    let config = {
        let slot = Rc::clone(&slot);
        config(5).on_cell_click(move |col, row, _| {
            if let Some(engine) = slot.borrow().as_ref() {
                engine.set_cell_value(col, row, GridCell::text("seen"));
            }
        })
    };
    let (engine, _adapter, element) = mounted(config);
    *slot.borrow_mut() = Some(engine.clone());

    adapter_click(&element, 5, 3);

    assert_eq!(engine.cell_value(0, 0), GridCell::text("seen"));
}

// ============================================================================
// Scrolling
// ============================================================================

#[test]
fn test_wheel_scroll_reports_viewport() {
    let viewports = Rc::new(RefCell::new(Vec::new()));
    let config = {
        let viewports = Rc::clone(&viewports);
        config(50).on_viewport_change(move |viewport| viewports.borrow_mut().push(*viewport))
    };
    let (_engine, adapter, element) = mounted(config);

    adapter.dispatch(
        &element,
        &HostEvent::Scroll {
            x: 5,
            y: 4,
            delta_x: 0,
            delta_y: 1,
        },
    );

    let viewports = viewports.borrow();
    assert_eq!(viewports.len(), 1);
    assert_eq!(viewports[0].y, 3 * 34);
    assert!(element.line(3).starts_with(" 0,3"));
}

#[test]
fn test_scroll_to_moves_immediately() {
    let (count, on_change) = counter();
    let (engine, _adapter, element) = mounted(config(50).on_viewport_change(move |_| on_change()));

    engine.scroll_to(0, 340, false);

    assert_eq!(engine.viewport().y, 340);
    assert_eq!(engine.visible_cell_range().rows(), 10..15);
    assert_eq!(*count.borrow(), 1);
    assert!(element.line(3).starts_with(" 0,10"));
}

#[test]
fn test_scroll_to_cell_brings_row_into_view() {
    let (engine, _adapter, _element) = mounted(config(50));

    engine.scroll_to_cell(0, 49, false);

    assert_eq!(engine.viewport().y, 45 * 34);
    assert_eq!(engine.visible_cell_range().rows(), 45..50);
}

#[test]
fn test_animated_scroll_runs_on_frames() {
    let (count, on_change) = counter();
    let (engine, adapter, _element) = mounted(config(50).on_viewport_change(move |_| on_change()));

    engine.scroll_to(0, 340, true);
    assert_eq!(engine.viewport().y, 0);

    adapter.run_frame();
    let first = engine.viewport().y;
    assert!(first > 0 && first < 340);

    adapter.run_frames(SCROLL_ANIMATION_FRAMES as usize - 1);

    assert_eq!(engine.viewport().y, 340);
    assert_eq!(*count.borrow(), 1);
    // Only the blink frame is left
    assert_eq!(adapter.pending_frames(), 1);
}

#[test]
fn test_unmounted_defaults() {
    let engine = GridFactory::create_headless_engine(config(50));

    engine.scroll_to(100, 100, true);
    engine.scroll_to_cell(2, 40, false);

    assert_eq!(
        engine.viewport(),
        Viewport {
            x: 0,
            y: 0,
            width: 800,
            height: 600,
        }
    );
    // 600 px of 34 px rows
    assert_eq!(
        engine.visible_cell_range(),
        CellRange {
            start_col: 0,
            end_col: 3,
            start_row: 0,
            end_row: 18,
        }
    );
}

#[test]
fn test_resize_event_resizes_grid() {
    let (engine, adapter, element) = mounted(config(5));

    adapter.dispatch(
        &element,
        &HostEvent::Resize {
            width: 60,
            height: 10,
        },
    );

    assert_eq!(element.size(), (60, 10));
    assert_eq!(engine.viewport().width, 60 * 8);
}

// ============================================================================
// Frames and Measurement
// ============================================================================

#[test]
fn test_cursor_blinks_on_frames() {
    let (engine, adapter, _element) = mounted(config(5));
    assert!(engine.cursor_visible());

    // The first frame starts the blink clock one frame in
    let frames_to_toggle = (BLINK_INTERVAL.as_millis() / 16) as usize + 2;
    adapter.run_frames(frames_to_toggle - 1);
    assert!(engine.cursor_visible());

    adapter.run_frame();
    assert!(!engine.cursor_visible());
}

#[test]
fn test_measure_text_zero_until_mounted() {
    let adapter = HeadlessAdapter::with_size(40, 8);
    let engine = GridFactory::create_engine(config(5), adapter.clone());
    let font = FontSpec::new("monospace", 12.0);

    assert_eq!(engine.measure_text("abcd", &font), Default::default());

    engine.mount(&adapter.create_element("grid"));
    let metrics = engine.measure_text("abcd", &font);

    assert_eq!(metrics.width, 24.0);
    assert_eq!(metrics.height, 12.0);
}

#[test]
fn test_invalidate_redraws_surface() {
    let (engine, _adapter, element) = mounted(config(5));
    element.surface_mut().clear();
    assert!(element.line(2).trim().is_empty());

    engine.invalidate();

    assert!(element.line(2).starts_with(" A"));
}

fn adapter_click(element: &HostElement, x: u16, y: u16) {
    element.dispatch(&HostEvent::click(x, y));
}
