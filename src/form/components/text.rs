use crossterm::event::KeyEvent;

use super::helpers::{Decorations, edit_text};
use super::FieldComponent;
use crate::form::events::{ComponentContext, FieldEvent, FieldEvents};

/// Plain single-line field with optional prefix, suffix and icon.
#[derive(Debug, Clone, Default)]
pub struct TextComponent {
    decorations: Decorations,
}

impl TextComponent {
    pub fn new(decorations: Decorations) -> Self {
        Self { decorations }
    }
}

impl FieldComponent for TextComponent {
    fn handle_key(
        &mut self,
        ctx: &ComponentContext<'_>,
        key: &KeyEvent,
        events: &mut FieldEvents,
    ) -> bool {
        match edit_text(ctx.value, key) {
            Some(next) => {
                events.push(FieldEvent::Change(next));
                true
            }
            None => false,
        }
    }

    fn decorations(&self) -> Decorations {
        self.decorations.clone()
    }
}
