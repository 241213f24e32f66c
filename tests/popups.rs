use std::path::Path;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formkit::form::popup::calendar::format_date;
use formkit::form::{COUNTRIES, PointerListeners, PopupHit, VariantComponent};
use formkit::presentation::PopupView;
use formkit::{FieldConfig, InputField, InputVariant, SelectOption, VisualState};
use ratatui::layout::{Position, Rect};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn select_field() -> InputField {
    InputField::new(
        FieldConfig::new(InputVariant::Select, "Plan", "plan").with_options([
            SelectOption::new("Free", "free"),
            SelectOption::new("Pro", "pro"),
            SelectOption::new("Team", "team"),
        ]),
    )
    .unwrap()
}

fn select_cursor(field: &InputField) -> Option<usize> {
    match field.component() {
        VariantComponent::Select(select) => select.cursor(),
        _ => None,
    }
}

fn phone_cursor(field: &InputField) -> Option<usize> {
    match field.component() {
        VariantComponent::Phone(phone) => phone.cursor(),
        _ => None,
    }
}

#[test]
fn phone_type_ahead_jumps_to_germany_then_resets_after_idle() {
    let mut field = InputField::new(FieldConfig::new(InputVariant::Phone, "Mobile", "mobile"))
        .unwrap();
    let start = Instant::now();
    field.handle_key_at(&key(KeyCode::Down), start);
    assert!(field.popup_open());

    field.handle_key_at(&key(KeyCode::Char('g')), start);
    field.handle_key_at(&key(KeyCode::Char('e')), start + Duration::from_millis(200));
    field.handle_key_at(&key(KeyCode::Char('r')), start + Duration::from_millis(400));
    assert_eq!(phone_cursor(&field), Some(5));
    assert_eq!(COUNTRIES[5].name, "Germany");

    field.handle_key_at(&key(KeyCode::Char('u')), start + Duration::from_millis(1200));
    assert_eq!(phone_cursor(&field), Some(0));
    assert_eq!(COUNTRIES[0].name, "United Kingdom");
}

#[test]
fn phone_commit_changes_country_not_value() {
    let mut field = InputField::new(
        FieldConfig::new(InputVariant::Phone, "Mobile", "mobile").with_country_code("+44"),
    )
    .unwrap();
    field.focus();
    field.handle_key(&key(KeyCode::Enter));
    field.handle_key(&key(KeyCode::Down));
    field.handle_key(&key(KeyCode::Enter));

    assert!(!field.popup_open());
    assert_eq!(field.dial_code(), Some("+1"));
    assert_eq!(field.value(), "");
    assert_eq!(field.state(), VisualState::Active);
}

#[test]
fn select_opens_seeds_commits_and_blurs() {
    let mut field = select_field();
    assert!(!field.handle_key(&key(KeyCode::Up)));
    assert!(!field.popup_open());

    field.handle_key(&key(KeyCode::Char(' ')));
    assert!(field.popup_open());
    assert_eq!(field.state(), VisualState::Active);
    assert_eq!(select_cursor(&field), None);

    field.handle_key(&key(KeyCode::Down));
    field.handle_key(&key(KeyCode::Down));
    field.handle_key(&key(KeyCode::Down));
    field.handle_key(&key(KeyCode::Down));
    assert_eq!(select_cursor(&field), Some(2));

    field.handle_key(&key(KeyCode::Enter));
    assert!(!field.popup_open());
    assert_eq!(field.value(), "team");
    assert_eq!(field.display_value(), "Team");
    assert!(field.is_touched());
    assert_eq!(field.state(), VisualState::Idle);

    field.handle_key(&key(KeyCode::Enter));
    assert_eq!(select_cursor(&field), Some(2));
}

#[test]
fn escape_and_tab_close_without_committing() {
    for close in [KeyCode::Esc, KeyCode::Tab] {
        let mut field = select_field();
        field.handle_key(&key(KeyCode::Enter));
        field.handle_key(&key(KeyCode::Down));
        field.handle_key(&key(close));
        assert!(!field.popup_open());
        assert_eq!(field.value(), "");
        assert!(field.is_touched());
    }
}

#[test]
fn hover_moves_cursor_and_click_commits() {
    let mut field = select_field();
    field.toggle_popup();
    assert!(field.popup_hover(1));
    assert_eq!(select_cursor(&field), Some(1));
    assert_eq!(field.value(), "");

    assert!(field.popup_click(PopupHit::Item(1)));
    assert_eq!(field.value(), "pro");
    assert!(!field.popup_open());
}

#[test]
fn outside_press_closes_and_releases_listener() {
    let listeners = PointerListeners::new();
    let mut field = select_field().with_pointer_listeners(listeners.clone());
    field.toggle_popup();
    let id = field.listener_id().unwrap();
    assert!(listeners.is_registered(id));

    field.set_popup_regions(vec![Rect::new(0, 0, 20, 5)]);
    assert!(listeners.outside(Position::new(3, 3)).is_empty());
    assert_eq!(listeners.outside(Position::new(40, 10)), vec![id]);

    field.dismiss_popup();
    assert!(!listeners.is_registered(id));
    assert!(listeners.is_empty());
}

#[test]
fn dropping_a_field_with_open_popup_unregisters() {
    let listeners = PointerListeners::new();
    {
        let mut field = select_field().with_pointer_listeners(listeners.clone());
        field.toggle_popup();
        assert_eq!(listeners.len(), 1);
    }
    assert!(listeners.is_empty());
}

#[test]
fn date_popup_seeds_from_value_and_picks_day() {
    let mut field = InputField::with_today(
        FieldConfig::new(InputVariant::Date, "Start", "start").with_value("2024/02/10"),
        ymd(2025, 6, 1),
    )
    .unwrap();
    field.set_controlled_value(None);
    field.handle_key(&key(KeyCode::Enter));

    let VariantComponent::Date(date) = field.component() else {
        panic!("date component expected");
    };
    assert_eq!(date.view().month(), 2);
    assert_eq!(date.cursor_date(), Some(ymd(2024, 2, 10)));

    field.handle_key(&key(KeyCode::Right));
    field.handle_key(&key(KeyCode::Down));
    field.handle_key(&key(KeyCode::Enter));
    assert!(!field.popup_open());
    assert_eq!(field.value(), "2024/02/18");
    assert!(field.is_touched());
    assert_eq!(field.state(), VisualState::Idle);
}

#[test]
fn space_opens_the_calendar_but_types_into_a_phone_number() {
    let mut date = InputField::with_today(
        FieldConfig::new(InputVariant::Date, "Start", "start").with_value("2024/02/10"),
        ymd(2025, 6, 1),
    )
    .unwrap();
    date.focus();
    date.handle_key(&key(KeyCode::Char(' ')));
    assert!(date.popup_open());
    assert_eq!(date.value(), "2024/02/10");

    let mut phone = InputField::new(
        FieldConfig::new(InputVariant::Phone, "Mobile", "mobile").with_value("7700"),
    )
    .unwrap();
    phone.set_controlled_value(None);
    phone.focus();
    phone.handle_key(&key(KeyCode::Char(' ')));
    assert!(!phone.popup_open());
    assert_eq!(phone.value(), "7700 ");
}

#[test]
fn date_popup_falls_back_to_today() {
    let mut field = InputField::with_today(
        FieldConfig::new(InputVariant::Date, "Start", "start"),
        ymd(2025, 6, 18),
    )
    .unwrap();
    field.toggle_popup();
    let Some(PopupView::Calendar { title, cells, cursor }) = field.popup_view() else {
        panic!("calendar expected");
    };
    assert_eq!(title, "June 2025");
    assert_eq!(cells.len(), 42);
    assert!(cells[cursor].today);
    let in_month = cells.iter().filter(|cell| !cell.outside).count();
    assert_eq!(in_month, 30);
}

#[test]
fn out_of_bounds_day_is_rejected_without_state_change() {
    let mut field = InputField::with_today(
        FieldConfig::new(InputVariant::Date, "Start", "start")
            .with_min_date("2025-06-10")
            .with_max_date("2025/06/20"),
        ymd(2025, 6, 15),
    )
    .unwrap();
    field.toggle_popup();
    let Some(PopupView::Calendar { cells, .. }) = field.popup_view() else {
        panic!("calendar expected");
    };
    let early = cells
        .iter()
        .position(|cell| cell.date == ymd(2025, 6, 9))
        .unwrap();
    assert!(cells[early].disabled);
    let last_ok = cells
        .iter()
        .position(|cell| cell.date == ymd(2025, 6, 20))
        .unwrap();
    assert!(!cells[last_ok].disabled);

    assert!(!field.popup_click(PopupHit::Item(early)));
    assert!(field.popup_open());
    assert_eq!(field.value(), "");

    assert!(field.popup_click(PopupHit::Item(last_ok)));
    assert_eq!(field.value(), format_date(ymd(2025, 6, 20)));
}

#[test]
fn calendar_header_steps_months() {
    let mut field = InputField::with_today(
        FieldConfig::new(InputVariant::Date, "Start", "start"),
        ymd(2025, 1, 31),
    )
    .unwrap();
    field.toggle_popup();
    field.popup_click(PopupHit::PreviousPage);
    let VariantComponent::Date(date) = field.component() else {
        panic!("date component expected");
    };
    assert_eq!((date.view().year(), date.view().month()), (2024, 12));
    assert_eq!(date.cursor_date(), Some(ymd(2024, 12, 31)));

    field.handle_key(&key(KeyCode::PageDown));
    field.handle_key(&key(KeyCode::PageDown));
    let VariantComponent::Date(date) = field.component() else {
        panic!("date component expected");
    };
    assert_eq!(date.cursor_date(), Some(ymd(2025, 2, 28)));
}

#[test]
fn file_prompt_honours_accept_filter() {
    let mut field = InputField::new(
        FieldConfig::new(InputVariant::File, "Resume", "resume").with_accept(".pdf,.docx"),
    )
    .unwrap();
    field.handle_key(&key(KeyCode::Enter));
    for ch in "/tmp/cv.txt".chars() {
        field.handle_key(&key(KeyCode::Char(ch)));
    }
    field.handle_key(&key(KeyCode::Enter));
    assert!(field.popup_open());
    assert!(matches!(
        field.popup_view(),
        Some(PopupView::Prompt { rejected: true, .. })
    ));
    assert_eq!(field.value(), "");

    assert!(field.select_file(Path::new("/home/ada/cv.PDF")));
    assert!(!field.popup_open());
    assert_eq!(field.value(), "cv.PDF");

    field.handle_key(&key(KeyCode::Delete));
    assert_eq!(field.value(), "");
}

#[test]
fn native_select_steps_in_place() {
    let mut field = InputField::new(
        FieldConfig::new(InputVariant::Select, "Plan", "plan")
            .with_options([SelectOption::new("Free", "free"), SelectOption::new("Pro", "pro")])
            .with_mode(formkit::RenderMode::Native),
    )
    .unwrap();
    field.handle_key(&key(KeyCode::Down));
    assert_eq!(field.value(), "free");
    field.handle_key(&key(KeyCode::Down));
    field.handle_key(&key(KeyCode::Down));
    assert_eq!(field.value(), "pro");
    assert!(!field.popup_open());
    assert!(!field.toggle_popup());
}

#[test]
fn form_pointer_down_closes_only_popups_it_misses() {
    let config = formkit::FormConfig::new([
        FieldConfig::new(InputVariant::Select, "Plan", "plan")
            .with_options([SelectOption::new("Free", "free")]),
        FieldConfig::new(InputVariant::Phone, "Mobile", "mobile"),
    ]);
    let mut form = formkit::FormState::from_config(config).unwrap();
    form.field_mut(0).unwrap().toggle_popup();
    form.field_mut(0)
        .unwrap()
        .set_popup_regions(vec![Rect::new(0, 0, 30, 8)]);
    assert_eq!(form.listeners().len(), 1);

    assert!(!form.pointer_down(Position::new(5, 5)));
    assert!(form.popup_open());

    assert!(form.pointer_down(Position::new(50, 20)));
    assert!(!form.popup_open());
    assert!(form.listeners().is_empty());
    assert!(form.field(0).unwrap().is_touched());
}

#[test]
fn leaving_a_field_closes_its_popup() {
    let config = formkit::FormConfig::new([
        FieldConfig::new(InputVariant::Phone, "Mobile", "mobile"),
        FieldConfig::new(InputVariant::Text, "Name", "name"),
    ]);
    let mut form = formkit::FormState::from_config(config).unwrap();
    form.handle_key(&key(KeyCode::Down));
    assert!(form.popup_open());

    form.focus_next_field();
    assert!(!form.popup_open());
    assert_eq!(form.focus_index(), 1);
    assert_eq!(form.field(0).unwrap().state(), VisualState::Default);
    assert_eq!(form.field(1).unwrap().state(), VisualState::Active);
}
