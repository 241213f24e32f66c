use crossterm::event::{KeyCode, KeyEvent};

use super::FieldComponent;
use super::helpers::{dismisses_popup, opens_popup};
use crate::domain::{RenderMode, SelectOption};
use crate::form::events::{ComponentContext, FieldEvent, FieldEvents};
use crate::form::popup::{Listbox, ListenerId, PopupHit, PopupLifetime};
use crate::presentation::{OptionRow, PopupView};

/// Custom listbox standing in for a native `<select>`.
///
/// The committed value lives in the orchestrator (and in the hidden form
/// value); this component only owns the open flag and the focused-index
/// cursor. Every close path emits `Blur`.
#[derive(Debug)]
pub struct SelectComponent {
    options: Vec<SelectOption>,
    mode: RenderMode,
    listbox: Listbox,
    popup: PopupLifetime,
}

impl SelectComponent {
    pub fn new(options: Vec<SelectOption>, mode: RenderMode) -> Self {
        let listbox = Listbox::new(options.len());
        Self {
            options,
            mode,
            listbox,
            popup: PopupLifetime::default(),
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn cursor(&self) -> Option<usize> {
        self.listbox.cursor()
    }

    pub fn selected_index(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|option| option.value == value)
    }

    pub fn selected_label(&self, value: &str) -> Option<&str> {
        self.selected_index(value)
            .and_then(|index| self.options.get(index))
            .map(|option| option.label.as_str())
    }

    fn open(&mut self, ctx: &ComponentContext<'_>, events: &mut FieldEvents) {
        self.popup.begin(ctx.listeners);
        self.listbox.seed(self.selected_index(ctx.value));
        tracing::debug!(cursor = ?self.listbox.cursor(), "select popup opened");
        events.push(FieldEvent::Focus);
    }

    fn close(&mut self, events: &mut FieldEvents) -> bool {
        if !self.popup.end() {
            return false;
        }
        self.listbox.reset();
        tracing::debug!("select popup closed");
        events.push(FieldEvent::Blur);
        true
    }

    fn commit(&mut self, index: usize, events: &mut FieldEvents) -> bool {
        let Some(option) = self.options.get(index) else {
            return false;
        };
        events.push(FieldEvent::Change(option.value.clone()));
        self.close(events);
        true
    }

    /// Native-like stepping: arrows change the selection in place.
    fn step_native(&self, value: &str, delta: isize, events: &mut FieldEvents) -> bool {
        if self.options.is_empty() {
            return false;
        }
        let last = self.options.len() as isize - 1;
        let next = match self.selected_index(value) {
            None => 0,
            Some(current) => (current as isize + delta).clamp(0, last) as usize,
        };
        if self.selected_index(value) == Some(next) {
            return false;
        }
        events.push(FieldEvent::Change(self.options[next].value.clone()));
        true
    }
}

impl FieldComponent for SelectComponent {
    fn handle_key(
        &mut self,
        ctx: &ComponentContext<'_>,
        key: &KeyEvent,
        events: &mut FieldEvents,
    ) -> bool {
        if self.mode == RenderMode::Native {
            return match key.code {
                KeyCode::Up => self.step_native(ctx.value, -1, events),
                KeyCode::Down => self.step_native(ctx.value, 1, events),
                _ => false,
            };
        }

        if !self.popup.is_open() {
            if opens_popup(key) {
                self.open(ctx, events);
                return true;
            }
            return false;
        }

        match key.code {
            KeyCode::Down => self.listbox.move_by(1),
            KeyCode::Up => self.listbox.move_by(-1),
            KeyCode::Enter => match self.listbox.cursor() {
                Some(index) => {
                    self.commit(index, events);
                }
                None => {
                    self.close(events);
                }
            },
            _ if dismisses_popup(key) => {
                self.close(events);
            }
            _ => {}
        }
        true
    }

    fn popup_open(&self) -> bool {
        self.popup.is_open()
    }

    fn open_popup(&mut self, ctx: &ComponentContext<'_>, events: &mut FieldEvents) -> bool {
        if self.mode == RenderMode::Native || self.popup.is_open() {
            return false;
        }
        self.open(ctx, events);
        true
    }

    fn dismiss_popup(&mut self, events: &mut FieldEvents) -> bool {
        self.close(events)
    }

    fn popup_hover(&mut self, index: usize) -> bool {
        self.popup.is_open() && self.listbox.set_cursor(index)
    }

    fn popup_click(
        &mut self,
        _ctx: &ComponentContext<'_>,
        hit: PopupHit,
        events: &mut FieldEvents,
    ) -> bool {
        match hit {
            PopupHit::Item(index) if self.popup.is_open() => self.commit(index, events),
            _ => false,
        }
    }

    fn listener_id(&self) -> Option<ListenerId> {
        self.popup.listener_id()
    }

    fn set_popup_regions(&self, regions: Vec<ratatui::layout::Rect>) {
        self.popup.set_regions(regions);
    }

    fn set_popup_viewport(&mut self, rows: usize) {
        self.listbox.set_viewport(rows);
    }

    fn display_value(&self, value: &str) -> String {
        self.selected_label(value).unwrap_or(value).to_string()
    }

    fn popup_view(&self, ctx: &ComponentContext<'_>) -> Option<PopupView> {
        if !self.popup.is_open() {
            return None;
        }
        Some(PopupView::Options {
            title: "Select".to_string(),
            items: self
                .options
                .iter()
                .map(|option| OptionRow {
                    label: option.label.clone(),
                    detail: None,
                })
                .collect(),
            cursor: self.listbox.cursor(),
            selected: self.selected_index(ctx.value),
            scroll_offset: self.listbox.scroll_offset(),
            search: None,
        })
    }
}
