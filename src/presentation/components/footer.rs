use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Paragraph, Wrap},
};

use crate::form::FormState;

use super::super::view::UiContext;

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, form_state: &FormState, ctx: &UiContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let actions = ctx.help.unwrap_or(" ");
    let actions_widget = Paragraph::new(format!("Actions: {actions}"))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(actions_widget, rows[0]);

    let error_count = form_state.error_count();
    let mut status = ctx.status_message.to_string();
    if ctx.dirty {
        status.push_str(" • edited");
    }
    if let Some(field) = form_state.focused_field() {
        status.push_str(" • focus: ");
        status.push_str(field.label());
        if let Some(code) = field.dial_code() {
            status.push_str(&format!(" ({code})"));
        }
    }
    if status.trim().is_empty() {
        status = "Ready".to_string();
    }

    let badge = if error_count > 0 {
        Span::styled(
            format!("[! {error_count}]"),
            Style::default().fg(Color::Red).bg(Color::Black),
        )
    } else {
        Span::styled("[ok]", Style::default().fg(Color::Green))
    };

    let status_widget = Paragraph::new(ratatui::text::Line::from(vec![
        Span::raw("Status: "),
        Span::raw(status),
        Span::raw(" "),
        badge,
    ]))
    .wrap(Wrap { trim: true });
    frame.render_widget(status_widget, rows[1]);
}
