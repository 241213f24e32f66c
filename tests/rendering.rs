use chrono::NaiveDate;
use formkit::form::PopupHit;
use formkit::presentation::{FrameLayout, UiContext, draw};
use formkit::{
    FieldConfig, FieldView, FormConfig, FormState, InputField, InputVariant, PointerListeners,
    SelectOption, VisualState,
};
use ratatui::{Terminal, backend::TestBackend, layout::Position};

fn render(form: &mut FormState, width: u16, height: u16) -> (FrameLayout, String) {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    let ctx = UiContext {
        status_message: "Ready",
        help: Some("Ctrl+S Submit"),
        dirty: false,
    };
    let mut layout = FrameLayout::default();
    terminal
        .draw(|frame| layout = draw(frame, form, &ctx))
        .unwrap();
    let buffer = terminal.backend().buffer();
    let text = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n");
    (layout, text)
}

fn plan_form() -> FormState {
    FormState::from_config(
        FormConfig::new([
            FieldConfig::new(InputVariant::Text, "Name", "name").with_required(true),
            FieldConfig::new(InputVariant::Select, "Plan", "plan").with_options([
                SelectOption::new("Free", "free"),
                SelectOption::new("Pro", "pro"),
            ]),
        ])
        .with_title("Sign up"),
    )
    .unwrap()
}

#[test]
fn field_view_exposes_data_state_and_message() {
    let mut field = InputField::new(
        FieldConfig::new(InputVariant::Text, "Name", "name").with_required(true),
    )
    .unwrap();
    field.focus();
    field.blur();

    let view = FieldView::of(&field);
    assert_eq!(view.data_state, VisualState::Error);
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["data-state"], "error");
    assert_eq!(json["displayValue"], "");
    assert_eq!(json["message"]["text"], "This field is required");
    assert_eq!(json["message"]["severity"], "error");
}

#[test]
fn draws_every_field_with_labels_and_status() {
    let mut form = plan_form();
    let (layout, text) = render(&mut form, 60, 30);

    assert_eq!(
        layout.fields.iter().map(|(index, _)| *index).collect::<Vec<_>>(),
        vec![0, 1]
    );
    assert!(layout.popup.is_none());
    assert!(text.contains("Sign up"));
    assert!(text.contains("Name *"));
    assert!(text.contains("[active]"));
    assert!(text.contains("Plan"));
    assert!(text.contains("Ctrl+S Submit"));

    let (_, second) = layout.fields[1];
    assert_eq!(layout.field_at(second.x + 1, second.y + 1), Some(1));
}

#[test]
fn open_select_popup_maps_rows_to_options() {
    let mut form = plan_form();
    form.focus_field(1);
    form.field_mut(1).unwrap().toggle_popup();

    let (layout, text) = render(&mut form, 60, 30);
    let popup = layout.popup.expect("popup drawn");
    assert_eq!(popup.field, 1);
    assert_eq!(popup.listener, form.field(1).unwrap().listener_id());
    assert!(text.contains("Free"));
    assert!(text.contains("Pro"));

    let (row, hit) = popup.targets[1];
    assert_eq!(hit, PopupHit::Item(1));
    assert_eq!(popup.hit(row.x, row.y), Some(PopupHit::Item(1)));

    let inside = Position::new(popup.area.x + 1, popup.area.y + 1);
    assert!(form.listeners().outside(inside).is_empty());
    assert!(!form.pointer_down(inside));
    assert!(form.field_mut(1).unwrap().popup_click(hit));
    assert_eq!(form.field(1).unwrap().value(), "pro");
}

#[test]
fn calendar_popup_exposes_navigation_targets() {
    let listeners = PointerListeners::new();
    let field = InputField::with_today(
        FieldConfig::new(InputVariant::Date, "Start", "start"),
        NaiveDate::from_ymd_opt(2025, 6, 18).unwrap(),
    )
    .unwrap()
    .with_pointer_listeners(listeners.clone());
    let mut form = FormState::from_fields(None, vec![field], listeners);
    form.field_mut(0).unwrap().toggle_popup();

    let (layout, text) = render(&mut form, 60, 30);
    let popup = layout.popup.expect("calendar drawn");
    assert!(text.contains("June 2025"));
    assert!(text.contains("Mo Tu We Th Fr Sa Su"));
    assert!(popup.targets.iter().any(|(_, hit)| *hit == PopupHit::PreviousPage));
    assert!(popup.targets.iter().any(|(_, hit)| *hit == PopupHit::NextPage));
    let days = popup
        .targets
        .iter()
        .filter(|(_, hit)| matches!(hit, PopupHit::Item(_)))
        .count();
    assert_eq!(days, 42);
}
