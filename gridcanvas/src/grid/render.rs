use crate::buffer::Buffer;
use crate::geometry::Rect;
use crate::text::truncate_to_width;
use crate::types::{Rgb, TextStyle, Theme};

use super::viewport::FrameLayout;
use super::{GridProps, GroupHeader};

pub(crate) fn render_grid(
    layout: &FrameLayout,
    scroll_x: u32,
    scroll_row: usize,
    props: &GridProps<'_>,
    buf: &mut Buffer,
) {
    buf.fill(buf.area(), props.theme.bg_cell.to_rgb());

    let visible = layout.visible_columns(scroll_x);

    for depth in 1..=layout.group_depth {
        render_group_line(layout, scroll_x, props, &visible, depth, buf);
    }
    render_column_headers(layout, scroll_x, props, &visible, buf);
    render_body(layout, scroll_x, scroll_row, props, &visible, buf);
}

fn column_rect(layout: &FrameLayout, col: usize, scroll_x: u32, y: u16) -> Option<Rect> {
    let (left, right) = if col < layout.frozen {
        (0, layout.frozen_cells)
    } else {
        (layout.frozen_cells, layout.width)
    };
    let sx = layout.screen_x(col, scroll_x);
    let start = sx.max(left as i32);
    let end = (sx + layout.column_w[col] as i32).min(right as i32);
    (end > start).then(|| Rect::new(start as u16, y, (end - start) as u16, 1))
}

/// Draw `text` inside a one-line rect, keeping a leading and trailing gap when
/// the rect is wide enough.
fn draw_label(buf: &mut Buffer, rect: Rect, text: &str, fg: Rgb, style: TextStyle) {
    if rect.is_empty() || text.is_empty() {
        return;
    }
    let (lead, trail) = if rect.width > 2 { (1, 1) } else { (0, 0) };
    let avail = rect.width.saturating_sub(lead + trail) as usize;
    let label = truncate_to_width(text, avail);
    buf.set_string(rect.x + lead, rect.y, &label, rect.right() - trail, fg, style);
}

fn column_theme(props: &GridProps<'_>, col: usize) -> Theme {
    match &props.columns[col].theme_override {
        Some(over) => props.theme.merged(over),
        None => props.theme.clone(),
    }
}

fn render_group_line(
    layout: &FrameLayout,
    scroll_x: u32,
    props: &GridProps<'_>,
    visible: &[usize],
    depth: usize,
    buf: &mut Buffer,
) {
    let y = (depth - 1) as u16;
    let mut i = 0;
    while i < visible.len() {
        let col = visible[i];
        let path = &props.columns[col].group_path;
        let grouped = path.len() >= depth;

        let mut j = i + 1;
        if grouped {
            while j < visible.len() {
                let next = visible[j];
                let next_path = &props.columns[next].group_path;
                let same_run = next == visible[j - 1] + 1
                    && (next < layout.frozen) == (col < layout.frozen)
                    && next_path.len() >= depth
                    && next_path[..depth] == path[..depth];
                if !same_run {
                    break;
                }
                j += 1;
            }
        }

        let rects: Vec<Rect> = visible[i..j]
            .iter()
            .filter_map(|&c| column_rect(layout, c, scroll_x, y))
            .collect();
        if let (Some(first), Some(last)) = (rects.first(), rects.last()) {
            let run = Rect::new(first.x, y, last.right() - first.x, 1);
            if grouped {
                let header = GroupHeader {
                    name: &path[depth - 1],
                    path: &path[..depth],
                };
                let details = (props.group_details)(&header);
                let theme = match &details.override_theme {
                    Some(over) => props.theme.merged(over),
                    None => props.theme.clone(),
                };
                buf.fill(run, theme.bg_header.to_rgb());
                let label = match &details.icon {
                    Some(icon) => format!("{icon} {}", details.name),
                    None => details.name.clone(),
                };
                draw_label(
                    buf,
                    run,
                    &label,
                    theme.text_group_header.to_rgb(),
                    TextStyle::new().bold(),
                );
            } else {
                buf.fill(run, props.theme.bg_header.to_rgb());
            }
        }
        i = j;
    }
}

fn render_column_headers(
    layout: &FrameLayout,
    scroll_x: u32,
    props: &GridProps<'_>,
    visible: &[usize],
    buf: &mut Buffer,
) {
    let y = layout.group_depth as u16;
    for &col in visible {
        let Some(rect) = column_rect(layout, col, scroll_x, y) else {
            continue;
        };
        let theme = column_theme(props, col);
        let selected = props.selection.is_some_and(|s| s.columns.has(col));
        let bg = if selected {
            theme.accent_light
        } else {
            theme.bg_header
        };
        buf.fill(rect, bg.to_rgb());
        draw_label(
            buf,
            rect,
            &props.columns[col].title,
            theme.text_header.to_rgb(),
            TextStyle::new().bold(),
        );
    }
}

fn render_body(
    layout: &FrameLayout,
    scroll_x: u32,
    scroll_row: usize,
    props: &GridProps<'_>,
    visible: &[usize],
    buf: &mut Buffer,
) {
    let top = layout.header_lines();
    let current = props.selection.and_then(|s| s.current_cell());
    let themes: Vec<(usize, Theme)> = visible.iter().map(|&c| (c, column_theme(props, c))).collect();

    for (line, row) in layout.visible_rows(scroll_row).enumerate() {
        let y = top + line as u16;
        for (col, theme) in &themes {
            let Some(rect) = column_rect(layout, *col, scroll_x, y) else {
                continue;
            };
            let item = (*col, row);
            let selected = props.selection.is_some_and(|s| s.is_cell_selected(item));
            let bg = if selected {
                theme.accent_light
            } else {
                theme.bg_cell
            };
            buf.fill(rect, bg.to_rgb());

            let mut style = TextStyle::new();
            if current == Some(item) && props.cursor_visible {
                style = style.underline();
            }
            let cell = (props.cell_content)(item);
            draw_label(buf, rect, &cell.display_text(), theme.text_dark.to_rgb(), style);
        }
    }
}
