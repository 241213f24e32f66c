use crossterm::event::KeyEvent;

use super::helpers::{Decorations, edit_text};
use super::FieldComponent;
use crate::form::events::{ComponentContext, FieldEvent, FieldEvents};

/// Decimal-oriented entry. The raw text is reported as typed; the built-in
/// pattern rule decides whether it is a number.
#[derive(Debug, Clone, Default)]
pub struct CurrencyComponent {
    prefix: Option<String>,
    suffix: Option<String>,
}

impl CurrencyComponent {
    pub fn new(prefix: Option<String>, suffix: Option<String>) -> Self {
        Self { prefix, suffix }
    }
}

impl FieldComponent for CurrencyComponent {
    fn handle_key(
        &mut self,
        ctx: &ComponentContext<'_>,
        key: &KeyEvent,
        events: &mut FieldEvents,
    ) -> bool {
        let Some(next) = edit_text(ctx.value, key) else {
            return false;
        };
        events.push(FieldEvent::Change(next));
        true
    }

    fn default_placeholder(&self) -> Option<&'static str> {
        Some("0")
    }

    fn decorations(&self) -> Decorations {
        Decorations {
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
            icon: None,
        }
    }
}
