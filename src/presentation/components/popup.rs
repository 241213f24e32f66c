use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::form::PopupHit;
use crate::form::popup::calendar::{CalendarCell, WEEK_DAYS, WEEKDAY_LABELS};

use super::super::view::{OptionRow, PopupView};
use super::layout::anchored_rect;

/// Most option rows shown before the list scrolls.
pub const MAX_OPTION_ROWS: u16 = 8;
const CELL_WIDTH: u16 = 3;
const CALENDAR_WIDTH: u16 = CELL_WIDTH * WEEK_DAYS as u16 + 2;
const CALENDAR_HEIGHT: u16 = 10;

pub struct RenderedPopup {
    pub area: Rect,
    pub targets: Vec<(Rect, PopupHit)>,
}

/// Rows available to the option list once the popup is placed.
pub fn option_rows(bounds: Rect, anchor: Rect, view: &PopupView) -> Option<usize> {
    let PopupView::Options { .. } = view else {
        return None;
    };
    let area = popup_area(bounds, anchor, view);
    Some(area.height.saturating_sub(chrome_rows(view)) as usize)
}

pub fn render_popup(
    frame: &mut Frame<'_>,
    bounds: Rect,
    anchor: Rect,
    view: &PopupView,
) -> RenderedPopup {
    let area = popup_area(bounds, anchor, view);
    frame.render_widget(Clear, area);
    let targets = match view {
        PopupView::Options {
            title,
            items,
            cursor,
            selected,
            scroll_offset,
            search,
        } => render_options(
            frame,
            area,
            title,
            items,
            *cursor,
            *selected,
            *scroll_offset,
            search.as_deref(),
        ),
        PopupView::Calendar {
            title,
            cells,
            cursor,
        } => render_calendar(frame, area, title, cells, *cursor),
        PopupView::Prompt {
            title,
            input,
            hint,
            rejected,
        } => {
            render_prompt(frame, area, title, input, hint, *rejected);
            Vec::new()
        }
    };
    RenderedPopup { area, targets }
}

fn chrome_rows(view: &PopupView) -> u16 {
    match view {
        PopupView::Options { search: Some(_), .. } => 3,
        _ => 2,
    }
}

fn popup_area(bounds: Rect, anchor: Rect, view: &PopupView) -> Rect {
    match view {
        PopupView::Options { items, .. } => {
            let widest = items
                .iter()
                .map(|item| {
                    UnicodeWidthStr::width(item.label.as_str())
                        + item.detail.as_deref().map_or(0, |detail| detail.width() + 2)
                })
                .max()
                .unwrap_or(10) as u16;
            let rows = (items.len() as u16).clamp(1, MAX_OPTION_ROWS);
            let width = widest.saturating_add(6).max(anchor.width.min(40));
            anchored_rect(bounds, anchor, width, rows + chrome_rows(view))
        }
        PopupView::Calendar { .. } => {
            anchored_rect(bounds, anchor, CALENDAR_WIDTH, CALENDAR_HEIGHT)
        }
        PopupView::Prompt { hint, .. } => {
            let width = (UnicodeWidthStr::width(hint.as_str()) as u16 + 4).max(40);
            anchored_rect(bounds, anchor, width, 4)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_options(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    items: &[OptionRow],
    cursor: Option<usize>,
    selected: Option<usize>,
    scroll_offset: usize,
    search: Option<&str>,
) -> Vec<(Rect, PopupHit)> {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let mut inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(query) = search {
        let search_row = Rect::new(inner.x, inner.bottom().saturating_sub(1), inner.width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Search: ", Style::default().fg(Color::Gray)),
                Span::styled(query.to_string(), Style::default().fg(Color::Yellow)),
            ])),
            search_row,
        );
        inner.height = inner.height.saturating_sub(1);
    }

    let list_items: Vec<ListItem<'static>> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mark = if Some(index) == selected { "✓ " } else { "  " };
            let mut spans = vec![Span::raw(mark), Span::raw(item.label.clone())];
            if let Some(detail) = &item.detail {
                spans.push(Span::styled(
                    format!("  {detail}"),
                    Style::default().fg(Color::Gray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut state = ListState::default();
    state.select(cursor);
    *state.offset_mut() = scroll_offset;
    let list = List::new(list_items).highlight_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_stateful_widget(list, inner, &mut state);

    let shown = (inner.height as usize).min(items.len().saturating_sub(scroll_offset));
    (0..shown)
        .map(|row| {
            (
                Rect::new(inner.x, inner.y + row as u16, inner.width, 1),
                PopupHit::Item(scroll_offset + row),
            )
        })
        .collect()
}

fn render_calendar(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    cells: &[CalendarCell],
    cursor: usize,
) -> Vec<(Rect, PopupHit)> {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 || inner.width < CELL_WIDTH {
        return Vec::new();
    }

    let mut targets = Vec::with_capacity(cells.len() + 2);
    let header = Rect::new(inner.x, inner.y, inner.width, 1);
    let nav_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let title_width = inner.width.saturating_sub(4) as usize;
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("‹ ", nav_style),
            Span::styled(
                format!("{title:^title_width$}"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ›", nav_style),
        ])),
        header,
    );
    targets.push((Rect::new(header.x, header.y, 2, 1), PopupHit::PreviousPage));
    targets.push((
        Rect::new(header.right().saturating_sub(2), header.y, 2, 1),
        PopupHit::NextPage,
    ));

    let weekdays = WEEKDAY_LABELS
        .iter()
        .map(|label| Span::styled(format!("{label} "), Style::default().fg(Color::Gray)))
        .collect::<Vec<_>>();
    frame.render_widget(
        Paragraph::new(Line::from(weekdays)),
        Rect::new(inner.x, inner.y + 1, inner.width, 1),
    );

    let grid_top = inner.y + 2;
    for (week, row) in cells.chunks(WEEK_DAYS).enumerate() {
        let y = grid_top + week as u16;
        if y >= inner.bottom() {
            break;
        }
        let spans = row
            .iter()
            .enumerate()
            .map(|(day, cell)| {
                let index = week * WEEK_DAYS + day;
                let text = format!("{:>2} ", chrono::Datelike::day(&cell.date));
                Span::styled(text, cell_style(cell, index == cursor))
            })
            .collect::<Vec<_>>();
        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(inner.x, y, inner.width, 1),
        );
        for day in 0..row.len() {
            let index = week * WEEK_DAYS + day;
            let x = inner.x + day as u16 * CELL_WIDTH;
            targets.push((Rect::new(x, y, CELL_WIDTH, 1), PopupHit::Item(index)));
        }
    }
    targets
}

fn cell_style(cell: &CalendarCell, focused: bool) -> Style {
    let mut style = if cell.disabled {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if cell.outside {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::White)
    };
    if cell.today {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if cell.selected {
        style = style.fg(Color::Black).bg(Color::Cyan);
    }
    if focused {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }
    style
}

fn render_prompt(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    input: &str,
    hint: &str,
    rejected: bool,
) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(input.to_string()),
        ])),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );
    let column = (UnicodeWidthStr::width(input) as u16 + 2).min(inner.width.saturating_sub(1));
    frame.set_cursor_position((inner.x + column, inner.y));

    if inner.height > 1 {
        let (text, color) = if rejected {
            (format!("Not accepted. {hint}"), Color::Red)
        } else {
            (hint.to_string(), Color::Gray)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(color))),
            Rect::new(inner.x, inner.y + 1, inner.width, 1),
        );
    }
}
