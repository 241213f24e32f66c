use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::layout::Position;
use serde_json::{Map, Value};

use crate::domain::{ConfigError, FormConfig, VisualState};

use super::error::SubmitError;
use super::input::InputField;
use super::popup::PointerListeners;

/// A vertical stack of fields sharing one outside-pointer registry.
#[derive(Debug)]
pub struct FormState {
    pub title: Option<String>,
    fields: Vec<InputField>,
    focus: usize,
    scroll_offset: usize,
    listeners: PointerListeners,
}

impl FormState {
    pub fn from_config(config: FormConfig) -> Result<Self, ConfigError> {
        let listeners = PointerListeners::new();
        let fields = config
            .fields
            .into_iter()
            .map(|field| {
                InputField::new(field).map(|input| input.with_pointer_listeners(listeners.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_fields(config.title, fields, listeners))
    }

    /// Assemble from prepared fields. Fields must already share `listeners`.
    pub fn from_fields(
        title: Option<String>,
        fields: Vec<InputField>,
        listeners: PointerListeners,
    ) -> Self {
        let mut state = Self {
            title,
            fields,
            focus: 0,
            scroll_offset: 0,
            listeners,
        };
        if let Some(first) = state.fields.iter().position(|field| !field.is_disabled()) {
            state.focus = first;
            state.fields[first].focus();
        }
        state
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[InputField] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&InputField> {
        self.fields.get(index)
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut InputField> {
        self.fields.get_mut(index)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&InputField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn field_by_name_mut(&mut self, name: &str) -> Option<&mut InputField> {
        self.fields.iter_mut().find(|field| field.name() == name)
    }

    pub fn listeners(&self) -> &PointerListeners {
        &self.listeners
    }

    pub fn focus_index(&self) -> usize {
        self.focus
    }

    /// First field shown when the form is taller than its viewport.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Keep the focused field inside a window of `visible` fields.
    pub fn adjust_scroll(&mut self, visible: usize) {
        if visible == 0 {
            self.scroll_offset = 0;
            return;
        }
        if self.focus < self.scroll_offset {
            self.scroll_offset = self.focus;
        } else if self.focus >= self.scroll_offset + visible {
            self.scroll_offset = self.focus + 1 - visible;
        }
        let max_offset = self.fields.len().saturating_sub(visible);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    pub fn focused_field(&self) -> Option<&InputField> {
        self.fields.get(self.focus)
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut InputField> {
        self.fields.get_mut(self.focus)
    }

    pub fn focus_next_field(&mut self) {
        self.step_focus(1);
    }

    pub fn focus_prev_field(&mut self) {
        self.step_focus(-1);
    }

    /// Move focus to `index`, blurring the field that loses it.
    pub fn focus_field(&mut self, index: usize) -> bool {
        let Some(target) = self.fields.get(index) else {
            return false;
        };
        if target.is_disabled() {
            return false;
        }
        if index == self.focus && target.is_focused() {
            return true;
        }
        self.leave_focused();
        self.focus = index;
        self.fields[index].focus();
        true
    }

    fn step_focus(&mut self, delta: isize) {
        let len = self.fields.len() as isize;
        if len == 0 {
            return;
        }
        let mut next = self.focus as isize;
        for _ in 0..len {
            next = (next + delta).rem_euclid(len);
            if !self.fields[next as usize].is_disabled() {
                self.focus_field(next as usize);
                return;
            }
        }
    }

    fn leave_focused(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.release();
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        self.handle_key_at(key, Instant::now())
    }

    pub fn handle_key_at(&mut self, key: &KeyEvent, now: Instant) -> bool {
        self.fields
            .get_mut(self.focus)
            .is_some_and(|field| field.handle_key_at(key, now))
    }

    pub fn popup_open(&self) -> bool {
        self.fields.iter().any(InputField::popup_open)
    }

    /// A pointer press anywhere: every popup whose regions miss it closes.
    pub fn pointer_down(&mut self, position: Position) -> bool {
        let outside = self.listeners.outside(position);
        if outside.is_empty() {
            return false;
        }
        let mut closed = false;
        for field in &mut self.fields {
            if field.listener_id().is_some_and(|id| outside.contains(&id)) {
                closed |= field.dismiss_popup();
            }
        }
        closed
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.fields
            .iter_mut()
            .fold(false, |changed, field| field.tick(now) | changed)
    }

    /// Blur every enabled field and collect `name → value`.
    ///
    /// Disabled fields are left out of the result. Warnings never block.
    pub fn submit(&mut self) -> Result<Map<String, Value>, SubmitError> {
        for field in &mut self.fields {
            if field.is_disabled() {
                continue;
            }
            if field.is_focused() {
                field.release();
            } else {
                field.blur();
            }
        }

        let invalid = self
            .fields
            .iter()
            .enumerate()
            .filter(|(_, field)| !field.is_disabled() && !field.is_valid())
            .map(|(index, _)| index)
            .collect::<Vec<_>>();
        if let Some(&index) = invalid.first() {
            let field = &self.fields[index];
            let error = SubmitError {
                index,
                name: field.name().to_string(),
                message: field
                    .surfaced_message()
                    .map(|message| message.text.clone())
                    .unwrap_or_default(),
                invalid: invalid.len(),
            };
            self.focus = index;
            tracing::info!(field = %error.name, invalid = error.invalid, "submit blocked");
            return Err(error);
        }

        let values = self
            .fields
            .iter()
            .filter(|field| !field.is_disabled())
            .map(|field| (field.name().to_string(), Value::String(field.value().to_string())))
            .collect::<Map<_, _>>();
        tracing::info!(fields = values.len(), "form submitted");
        Ok(values)
    }

    pub fn error_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|field| field.display_state() == VisualState::Error)
            .count()
    }
}
