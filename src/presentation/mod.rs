//! ratatui rendering for a [`FormState`](crate::form::FormState).
//!
//! Drawing also feeds geometry back into the form: open popups learn their
//! on-screen regions (so outside presses can be detected) and option lists
//! learn how many rows they have (so the cursor can scroll into view).

mod components;
mod view;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::form::FormState;

pub use components::{FIELD_HEIGHT, MAX_OPTION_ROWS, anchored_rect, state_color};
pub use view::{FieldView, FrameLayout, OptionRow, PopupLayout, PopupView, UiContext};

pub fn draw(frame: &mut Frame<'_>, form_state: &mut FormState, ctx: &UiContext<'_>) -> FrameLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(FIELD_HEIGHT + 2), Constraint::Length(4)])
        .split(frame.area());

    let cursor_enabled = !form_state.popup_open();
    let fields = components::render_fields(frame, chunks[0], form_state, cursor_enabled);
    components::render_footer(frame, chunks[1], form_state, ctx);

    let popup = draw_popup(frame, form_state, &fields);
    FrameLayout { fields, popup }
}

fn draw_popup(
    frame: &mut Frame<'_>,
    form_state: &mut FormState,
    fields: &[(usize, ratatui::layout::Rect)],
) -> Option<PopupLayout> {
    let bounds = frame.area();
    let index = form_state.fields().iter().position(|field| field.popup_open())?;
    let field_area = fields
        .iter()
        .find(|(placed, _)| *placed == index)
        .map(|(_, area)| *area)?;
    let anchor = components::value_box(field_area);

    let field = form_state.field_mut(index)?;
    let view = field.popup_view()?;
    let view = match components::option_rows(bounds, anchor, &view) {
        Some(rows) => {
            field.set_popup_viewport(rows);
            field.popup_view()?
        }
        None => view,
    };

    let rendered = components::render_popup(frame, bounds, anchor, &view);
    field.set_popup_regions(vec![rendered.area, field_area]);
    Some(PopupLayout {
        field: index,
        listener: field.listener_id(),
        area: rendered.area,
        targets: rendered.targets,
    })
}
