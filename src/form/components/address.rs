use crossterm::event::KeyEvent;

use super::helpers::{Decorations, edit_text};
use super::FieldComponent;
use crate::form::events::{ComponentContext, FieldEvent, FieldEvents};

pub const LOCATION_ICON: &str = "⌖";

/// Street address entry. No lookup happens here; the variant only carries a
/// minimum-length built-in rule.
#[derive(Debug, Clone, Default)]
pub struct AddressComponent {
    icon: Option<String>,
}

impl AddressComponent {
    pub fn new(icon: Option<String>) -> Self {
        Self { icon }
    }
}

impl FieldComponent for AddressComponent {
    fn handle_key(
        &mut self,
        ctx: &ComponentContext<'_>,
        key: &KeyEvent,
        events: &mut FieldEvents,
    ) -> bool {
        edit_text(ctx.value, key)
            .map(|next| events.push(FieldEvent::Change(next)))
            .is_some()
    }

    fn default_placeholder(&self) -> Option<&'static str> {
        Some("Start typing an address...")
    }

    fn decorations(&self) -> Decorations {
        Decorations {
            prefix: None,
            suffix: None,
            icon: Some(
                self.icon
                    .clone()
                    .unwrap_or_else(|| LOCATION_ICON.to_string()),
            ),
        }
    }
}
