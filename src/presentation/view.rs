use ratatui::layout::Rect;
use serde::Serialize;

use crate::domain::{InputVariant, ValidationMessage, VisualState};
use crate::form::popup::calendar::CalendarCell;
use crate::form::{InputField, ListenerId, PopupHit};

/// Render-ready description of an open popup.
#[derive(Debug, Clone, PartialEq)]
pub enum PopupView {
    Options {
        title: String,
        items: Vec<OptionRow>,
        cursor: Option<usize>,
        selected: Option<usize>,
        scroll_offset: usize,
        search: Option<String>,
    },
    Calendar {
        title: String,
        cells: Vec<CalendarCell>,
        cursor: usize,
    },
    Prompt {
        title: String,
        input: String,
        hint: String,
        rejected: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    pub label: String,
    pub detail: Option<String>,
}

/// Host-facing snapshot of one field: the attributes a renderer styles on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub variant: InputVariant,
    pub required: bool,
    pub display_value: String,
    pub placeholder: Option<String>,
    #[serde(rename = "data-state")]
    pub data_state: VisualState,
    /// Surfaced message; its `severity` is the styling hook.
    pub message: Option<ValidationMessage>,
    pub popup_open: bool,
}

impl FieldView {
    pub fn of(field: &InputField) -> Self {
        Self {
            name: field.name().to_string(),
            label: field.label().to_string(),
            variant: field.variant(),
            required: field.config().required,
            display_value: field.display_value(),
            placeholder: field.placeholder().map(str::to_string),
            data_state: field.display_state(),
            message: field.surfaced_message().cloned(),
            popup_open: field.popup_open(),
        }
    }
}

pub struct UiContext<'a> {
    pub status_message: &'a str,
    pub help: Option<&'a str>,
    pub dirty: bool,
}

/// Where things landed on screen, for pointer routing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameLayout {
    pub fields: Vec<(usize, Rect)>,
    pub popup: Option<PopupLayout>,
}

impl FrameLayout {
    pub fn field_at(&self, column: u16, row: u16) -> Option<usize> {
        self.fields
            .iter()
            .find(|(_, area)| area.contains((column, row).into()))
            .map(|(index, _)| *index)
    }
}

/// Geometry of the open popup, mapping screen cells back to popup targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupLayout {
    pub field: usize,
    pub listener: Option<ListenerId>,
    pub area: Rect,
    pub targets: Vec<(Rect, PopupHit)>,
}

impl PopupLayout {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains((column, row).into())
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<PopupHit> {
        self.targets
            .iter()
            .find(|(area, _)| area.contains((column, row).into()))
            .map(|(_, hit)| *hit)
    }
}
