use gridcanvas::{
    Buffer, CanvasGrid, Color, GridCell, GridColumn, GridProps, GridSelection, GroupDetails,
    GroupHeader, Item, Rgb, Theme, ThemeOverride,
};

fn columns() -> Vec<GridColumn> {
    vec![
        GridColumn::new("name", "name", 80),
        GridColumn::new("a", "a", 80).group_path(["Metrics"]),
        GridColumn::new("b", "b", 80).group_path(["Metrics"]),
        GridColumn::new("c", "c", 80).group_path(["Other"]),
    ]
}

fn content(item: Item) -> GridCell {
    GridCell::text(format!("{}:{}", item.0, item.1))
}

fn details(header: &GroupHeader<'_>) -> GroupDetails {
    GroupDetails::named(header.name)
}

fn props<'a>(
    columns: &'a [GridColumn],
    theme: &'a Theme,
    selection: Option<&'a GridSelection>,
) -> GridProps<'a> {
    GridProps {
        columns,
        rows: 10,
        cell_content: &content,
        selection,
        freeze_columns: 1,
        row_height: 34,
        header_height: 36,
        smooth_scroll_x: true,
        smooth_scroll_y: true,
        theme,
        group_details: &details,
        cursor_visible: false,
    }
}

fn row(parts: &[&str]) -> String {
    parts.iter().map(|p| format!("{p:<10}")).collect()
}

// ============================================================================
// Headers
// ============================================================================

#[test]
fn test_group_header_spans_its_columns() {
    let columns = columns();
    let theme = Theme::new();
    let mut grid = CanvasGrid::new(30, 6);
    let mut buf = Buffer::new(30, 6);

    grid.render(&props(&columns, &theme, None), &mut buf);

    // One label for the whole "Metrics" run, not one per column
    assert_eq!(buf.line(0), format!("{}{:<20}", " ".repeat(10), " Metrics"));
    assert_eq!(buf.line(1), row(&[" name", " a", " b"]));
}

#[test]
fn test_no_group_line_without_groups() {
    let columns = vec![
        GridColumn::new("x", "x", 80),
        GridColumn::new("y", "y", 80),
    ];
    let theme = Theme::new();
    let mut grid = CanvasGrid::new(20, 4);
    let mut buf = Buffer::new(20, 4);

    grid.render(&props(&columns, &theme, None), &mut buf);

    assert_eq!(buf.line(0), row(&[" x", " y"]));
    assert_eq!(buf.line(1), row(&[" 0:0", " 1:0"]));
}

#[test]
fn test_header_title_truncated_with_ellipsis() {
    let columns = vec![GridColumn::new("rev", "Revenue", 40)];
    let theme = Theme::new();
    let mut grid = CanvasGrid::new(5, 3);
    let mut buf = Buffer::new(5, 3);

    grid.render(&props(&columns, &theme, None), &mut buf);

    assert_eq!(buf.line(0), " Re… ");
}

#[test]
fn test_group_details_override_colors_header() {
    let columns = columns();
    let theme = Theme::new();
    let tinted = |header: &GroupHeader<'_>| GroupDetails {
        name: header.name.to_string(),
        icon: None,
        override_theme: Some(ThemeOverride::new().bg_header(Color::rgb(1, 2, 3))),
    };
    let mut p = props(&columns, &theme, None);
    p.group_details = &tinted;
    let mut grid = CanvasGrid::new(30, 6);
    let mut buf = Buffer::new(30, 6);

    grid.render(&p, &mut buf);

    assert_eq!(buf.get(15, 0).map(|c| c.bg), Some(Rgb::new(1, 2, 3)));
    // Ungrouped header keeps the theme colour
    assert_eq!(buf.get(5, 0).map(|c| c.bg), Some(theme.bg_header.to_rgb()));
}

#[test]
fn test_group_details_name_and_icon_drawn() {
    let columns = columns();
    let theme = Theme::new();
    let renamed = |_: &GroupHeader<'_>| GroupDetails {
        name: "KPI".to_string(),
        icon: Some("#".to_string()),
        override_theme: None,
    };
    let mut p = props(&columns, &theme, None);
    p.group_details = &renamed;
    let mut grid = CanvasGrid::new(30, 6);
    let mut buf = Buffer::new(30, 6);

    grid.render(&p, &mut buf);

    assert_eq!(buf.line(0).trim(), "# KPI");
}

// ============================================================================
// Body
// ============================================================================

#[test]
fn test_body_rows_follow_headers() {
    let columns = columns();
    let theme = Theme::new();
    let mut grid = CanvasGrid::new(30, 6);
    let mut buf = Buffer::new(30, 6);

    grid.render(&props(&columns, &theme, None), &mut buf);

    assert_eq!(buf.line(2), row(&[" 0:0", " 1:0", " 2:0"]));
    assert_eq!(buf.line(5), row(&[" 0:3", " 1:3", " 2:3"]));
}

#[test]
fn test_frozen_column_stays_while_scrolling() {
    let columns = columns();
    let theme = Theme::new();
    let mut grid = CanvasGrid::new(30, 6);
    let mut buf = Buffer::new(30, 6);
    let p = props(&columns, &theme, None);

    grid.render(&p, &mut buf);
    assert!(grid.scroll_to(80, 34 * 2));
    grid.render(&p, &mut buf);

    assert_eq!(buf.line(0), format!("{}{:<10}{:<10}", " ".repeat(10), " Metrics", " Other"));
    assert_eq!(buf.line(1), row(&[" name", " b", " c"]));
    assert_eq!(buf.line(2), row(&[" 0:2", " 2:2", " 3:2"]));
}

#[test]
fn test_selected_column_header_highlighted() {
    let columns = columns();
    let theme = Theme::new();
    let selection = GridSelection::column(1);
    let mut grid = CanvasGrid::new(30, 6);
    let mut buf = Buffer::new(30, 6);

    grid.render(&props(&columns, &theme, Some(&selection)), &mut buf);

    assert_eq!(buf.get(12, 1).map(|c| c.bg), Some(theme.accent_light.to_rgb()));
    assert_eq!(buf.get(22, 1).map(|c| c.bg), Some(theme.bg_header.to_rgb()));
    // Every cell in the column is highlighted too
    assert_eq!(buf.get(12, 4).map(|c| c.bg), Some(theme.accent_light.to_rgb()));
}

#[test]
fn test_cursor_marker_follows_blink() {
    let columns = columns();
    let theme = Theme::new();
    let selection = GridSelection::cell(1, 0);
    let mut grid = CanvasGrid::new(30, 6);
    let mut buf = Buffer::new(30, 6);
    let mut p = props(&columns, &theme, Some(&selection));

    p.cursor_visible = true;
    grid.render(&p, &mut buf);
    assert_eq!(buf.get(11, 2).map(|c| c.style.underline), Some(true));

    p.cursor_visible = false;
    grid.render(&p, &mut buf);
    assert_eq!(buf.get(11, 2).map(|c| c.style.underline), Some(false));
}

#[test]
fn test_render_resizes_buffer() {
    let columns = columns();
    let theme = Theme::new();
    let mut grid = CanvasGrid::new(30, 6);
    let mut buf = Buffer::new(1, 1);

    grid.render(&props(&columns, &theme, None), &mut buf);

    assert_eq!((buf.width(), buf.height()), (30, 6));
}
