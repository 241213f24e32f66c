use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::{InputVariant, Severity, VisualState};
use crate::form::{FormState, InputField};

use super::layout::stack_rows;

/// Label, a bordered value box, and one message row.
pub const FIELD_HEIGHT: u16 = 5;

pub fn render_fields(
    frame: &mut Frame<'_>,
    area: Rect,
    form_state: &mut FormState,
    enable_cursor: bool,
) -> Vec<(usize, Rect)> {
    let title = form_state.title.clone().unwrap_or_else(|| "Form".to_string());
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if form_state.is_empty() {
        frame.render_widget(Paragraph::new("No fields in form"), inner);
        return Vec::new();
    }

    let visible = (inner.height / FIELD_HEIGHT) as usize;
    form_state.adjust_scroll(visible);
    let offset = form_state.scroll_offset();
    let focus = form_state.focus_index();

    let rows = stack_rows(inner, FIELD_HEIGHT, form_state.len().saturating_sub(offset));
    let mut placed = Vec::with_capacity(rows.len());
    for (row, rect) in rows.into_iter().enumerate() {
        let index = offset + row;
        let Some(field) = form_state.field(index) else {
            break;
        };
        let focused = index == focus;
        render_field(frame, rect, field, focused, enable_cursor && focused);
        placed.push((index, rect));
    }
    placed
}

/// The value box inside a field row; popups hang off it.
pub fn value_box(field_area: Rect) -> Rect {
    Rect::new(
        field_area.x,
        field_area.y.saturating_add(1),
        field_area.width,
        3.min(field_area.height.saturating_sub(1)),
    )
}

pub fn state_color(state: VisualState) -> Color {
    match state {
        VisualState::Default => Color::Gray,
        VisualState::Active => Color::Yellow,
        VisualState::Error => Color::Red,
        VisualState::Warning => Color::LightYellow,
        VisualState::Idle => Color::Green,
        VisualState::Disabled => Color::DarkGray,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::LightYellow,
    }
}

fn render_field(
    frame: &mut Frame<'_>,
    area: Rect,
    field: &InputField,
    focused: bool,
    show_cursor: bool,
) {
    let state = field.display_state();
    let color = state_color(state);

    let mut label = field.label().to_string();
    if field.config().required {
        label.push_str(" *");
    }
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };
    let label_area = Rect::new(area.x, area.y, area.width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(label, label_style),
            Span::styled(
                format!("  [{state}]"),
                Style::default().fg(color).add_modifier(Modifier::ITALIC),
            ),
        ])),
        label_area,
    );

    let box_area = value_box(area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let content_area = block.inner(box_area);
    frame.render_widget(block, box_area);

    let decorations = field.decorations();
    let mut spans = Vec::new();
    let mut lead_width = 0usize;
    for lead in [&decorations.icon, &decorations.prefix].into_iter().flatten() {
        lead_width += UnicodeWidthStr::width(lead.as_str()) + 1;
        spans.push(Span::styled(
            format!("{lead} "),
            Style::default().fg(Color::Cyan),
        ));
    }

    let value = field.display_value();
    let value_width = UnicodeWidthStr::width(value.as_str());
    if value.is_empty() {
        let placeholder = field.placeholder().unwrap_or_default().to_string();
        spans.push(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        let value_style = if state == VisualState::Disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(value, value_style));
    }
    if let Some(suffix) = &decorations.suffix {
        spans.push(Span::styled(
            format!(" {suffix}"),
            Style::default().fg(Color::Cyan),
        ));
    }
    if field.variant().has_popup() && state != VisualState::Disabled {
        let marker = if field.popup_open() { " ▴" } else { " ▾" };
        spans.push(Span::styled(marker, Style::default().fg(color)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), content_area);

    if show_cursor && !field.popup_open() && accepts_text(field.variant()) {
        let column = (lead_width + value_width).min(content_area.width.saturating_sub(1) as usize);
        frame.set_cursor_position((content_area.x + column as u16, content_area.y));
    }

    if let Some(message) = field.surfaced_message()
        && area.height > 4
    {
        let width = area.width.saturating_sub(2) as usize;
        let text = textwrap::wrap(&message.text, width.max(1))
            .into_iter()
            .next()
            .map(|line| line.into_owned())
            .unwrap_or_default();
        let glyph = match message.severity {
            Severity::Error => "✗",
            Severity::Warning => "!",
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("{glyph} {text}"),
                Style::default().fg(severity_color(message.severity)),
            )),
            Rect::new(area.x, area.y + 4, area.width, 1),
        );
    }
}

fn accepts_text(variant: InputVariant) -> bool {
    !matches!(variant, InputVariant::Select | InputVariant::File)
}
