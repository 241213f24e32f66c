use std::time::Instant;

use anyhow::{Result, anyhow};
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use serde_json::{Map, Value};

use crate::form::{FormState, PopupHit};
use crate::presentation::{self, FrameLayout, UiContext};

use super::{
    keymap::{self, KeyAction, KeymapContext},
    options::UiOptions,
    status::StatusLine,
    terminal::TerminalGuard,
};

pub(crate) struct App {
    form_state: FormState,
    options: UiOptions,
    status: StatusLine,
    layout: FrameLayout,
    dirty: bool,
    exit_armed: bool,
    should_quit: bool,
    result: Option<Map<String, Value>>,
}

impl App {
    pub fn new(form_state: FormState, options: UiOptions) -> Self {
        Self {
            form_state,
            options,
            status: StatusLine::new(),
            layout: FrameLayout::default(),
            dirty: false,
            exit_armed: false,
            should_quit: false,
            result: None,
        }
    }

    pub fn run(&mut self) -> Result<Map<String, Value>> {
        let mut terminal = TerminalGuard::new(self.options.mouse)?;
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(self.options.tick_rate)? {
                match event::read()? {
                    Event::Resize(width, height) => {
                        terminal.resize(Rect::new(0, 0, width, height))?;
                    }
                    other => self.handle_event(other, Instant::now()),
                }
            }
            self.form_state.tick(Instant::now());
        }

        self.result
            .take()
            .ok_or_else(|| anyhow!("user exited without submitting"))
    }

    fn context(&self) -> KeymapContext {
        if self.form_state.popup_open() {
            KeymapContext::Popup
        } else {
            KeymapContext::Form
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let help = if self.options.show_help {
            keymap::help_text(self.context())
        } else {
            None
        };
        let ctx = UiContext {
            status_message: self.status.message(),
            help: help.as_deref(),
            dirty: self.dirty,
        };
        self.layout = presentation::draw(frame, &mut self.form_state, &ctx);
    }

    pub(crate) fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match keymap::classify_key(&key, self.context()) {
            Some(KeyAction::Submit) => {
                self.exit_armed = false;
                self.on_submit();
            }
            Some(KeyAction::Quit) => self.on_exit(),
            Some(KeyAction::ResetStatus) => {
                self.exit_armed = false;
                self.status.ready();
            }
            Some(KeyAction::FieldStep(delta)) => {
                self.exit_armed = false;
                if delta < 0 {
                    self.form_state.focus_prev_field();
                } else {
                    self.form_state.focus_next_field();
                }
            }
            None => self.handle_field_input(&key, now),
        }
    }

    fn handle_field_input(&mut self, key: &KeyEvent, now: Instant) {
        let Some(field) = self.form_state.focused_field_mut() else {
            return;
        };
        let before = field.value().to_string();
        if field.handle_key_at(key, now) && field.value() != before {
            self.dirty = true;
            self.exit_armed = false;
            self.status.editing(field.label());
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pointer_down(column, row),
            MouseEventKind::Moved => {
                if let Some(popup) = &self.layout.popup
                    && let Some(PopupHit::Item(index)) = popup.hit(column, row)
                    && let Some(field) = self.form_state.field_mut(popup.field)
                {
                    field.popup_hover(index);
                }
            }
            _ => {}
        }
    }

    fn pointer_down(&mut self, column: u16, row: u16) {
        if let Some(popup) = self.layout.popup.clone()
            && popup.contains(column, row)
        {
            if let Some(hit) = popup.hit(column, row)
                && let Some(field) = self.form_state.field_mut(popup.field)
                && field.popup_click(hit)
            {
                self.dirty = true;
            }
            return;
        }

        self.form_state.pointer_down(Position::new(column, row));
        if let Some(index) = self.layout.field_at(column, row) {
            self.form_state.focus_field(index);
            if let Some(field) = self.form_state.field_mut(index)
                && field.variant().has_popup()
            {
                field.toggle_popup();
            }
        }
    }

    fn on_submit(&mut self) {
        match self.form_state.submit() {
            Ok(values) => {
                self.result = Some(values);
                self.should_quit = true;
            }
            Err(error) => {
                let label = self
                    .form_state
                    .field(error.index)
                    .map(|field| field.label().to_string())
                    .unwrap_or(error.name);
                self.status
                    .submit_blocked(&label, &error.message, error.invalid);
            }
        }
    }

    fn on_exit(&mut self) {
        if self.options.confirm_exit && self.dirty && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use crate::domain::{FieldConfig, FormConfig, InputVariant};

    fn app() -> App {
        let form = FormConfig::new([
            FieldConfig::new(InputVariant::Text, "Name", "name").with_required(true),
            FieldConfig::new(InputVariant::Currency, "Budget", "budget"),
        ]);
        App::new(FormState::from_config(form).unwrap(), UiOptions::default())
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_event(Event::Key(KeyEvent::new(code, modifiers)), Instant::now());
    }

    #[test]
    fn blocked_submit_reports_first_invalid_field() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(!app.should_quit);
        assert_eq!(app.status.message(), "Name: This field is required");
    }

    #[test]
    fn successful_submit_stores_values_and_quits() {
        let mut app = app();
        for ch in "Ada".chars() {
            press(&mut app, KeyCode::Char(ch), KeyModifiers::NONE);
        }
        press(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
        let values = app.result.take().unwrap();
        assert_eq!(values["name"], "Ada");
        assert_eq!(values["budget"], "");
    }

    #[test]
    fn quitting_with_edits_needs_confirmation() {
        let mut app = app();
        press(&mut app, KeyCode::Char('x'), KeyModifiers::NONE);
        press(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
        assert!(app.result.is_none());
    }

    #[test]
    fn tab_moves_focus_and_blurs() {
        let mut app = app();
        press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.form_state.focus_index(), 1);
        let name = app.form_state.field(0).unwrap();
        assert!(name.is_touched());
        assert_eq!(name.surfaced_message().unwrap().text, "This field is required");
    }
}
