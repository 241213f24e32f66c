//! The seven variant renderers.
//!
//! Each component translates its own interaction model into
//! [`FieldEvent`](crate::form::FieldEvent)s and holds no validation logic.
//! Dispatch is a closed enum: adding a variant means adding a case.

mod address;
mod currency;
mod date;
mod file;
pub(crate) mod helpers;
mod phone;
mod select;
mod text;

use std::time::Instant;

use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use crate::domain::{ConfigError, FieldConfig, InputVariant};
use crate::form::events::{ComponentContext, FieldEvents};
use crate::form::popup::calendar::DateBounds;
use crate::form::popup::{ListenerId, PopupHit};
use crate::presentation::PopupView;

pub use address::{AddressComponent, LOCATION_ICON};
pub use currency::CurrencyComponent;
pub use date::DateComponent;
pub use file::{AcceptFilter, FileComponent};
pub use helpers::Decorations;
pub use phone::{COUNTRIES, Country, PhoneComponent, country_index};
pub use select::SelectComponent;
pub use text::TextComponent;

pub(crate) trait FieldComponent: std::fmt::Debug {
    fn handle_key(
        &mut self,
        ctx: &ComponentContext<'_>,
        key: &KeyEvent,
        events: &mut FieldEvents,
    ) -> bool;

    fn popup_open(&self) -> bool {
        false
    }

    fn open_popup(&mut self, _ctx: &ComponentContext<'_>, _events: &mut FieldEvents) -> bool {
        false
    }

    fn dismiss_popup(&mut self, _events: &mut FieldEvents) -> bool {
        false
    }

    fn popup_hover(&mut self, _index: usize) -> bool {
        false
    }

    fn popup_click(
        &mut self,
        _ctx: &ComponentContext<'_>,
        _hit: PopupHit,
        _events: &mut FieldEvents,
    ) -> bool {
        false
    }

    fn tick(&mut self, _now: Instant) -> bool {
        false
    }

    fn listener_id(&self) -> Option<ListenerId> {
        None
    }

    fn set_popup_regions(&self, _regions: Vec<Rect>) {}

    fn set_popup_viewport(&mut self, _rows: usize) {}

    fn display_value(&self, value: &str) -> String {
        value.to_string()
    }

    fn default_placeholder(&self) -> Option<&'static str> {
        None
    }

    fn decorations(&self) -> Decorations {
        Decorations::default()
    }

    fn popup_view(&self, _ctx: &ComponentContext<'_>) -> Option<PopupView> {
        None
    }
}

#[derive(Debug)]
pub enum VariantComponent {
    Text(TextComponent),
    Phone(PhoneComponent),
    Date(DateComponent),
    File(FileComponent),
    Address(AddressComponent),
    Select(SelectComponent),
    Currency(CurrencyComponent),
}

impl VariantComponent {
    pub(crate) fn build(config: &FieldConfig, today: NaiveDate) -> Result<Self, ConfigError> {
        let component = match config.variant {
            InputVariant::Text => VariantComponent::Text(TextComponent::new(Decorations {
                prefix: config.prefix.clone(),
                suffix: config.suffix.clone(),
                icon: config.icon.clone(),
            })),
            InputVariant::Phone => VariantComponent::Phone(PhoneComponent::new(
                config.country_code.as_deref(),
                config.mode,
            )),
            InputVariant::Date => {
                let bounds =
                    DateBounds::parse(config.min_date.as_deref(), config.max_date.as_deref())?;
                VariantComponent::Date(DateComponent::new(bounds, config.mode, today))
            }
            InputVariant::File => VariantComponent::File(FileComponent::new(config.accept.as_deref())),
            InputVariant::Address => {
                VariantComponent::Address(AddressComponent::new(config.icon.clone()))
            }
            InputVariant::Select => {
                VariantComponent::Select(SelectComponent::new(config.options.clone(), config.mode))
            }
            InputVariant::Currency => VariantComponent::Currency(CurrencyComponent::new(
                config.prefix.clone(),
                config.suffix.clone(),
            )),
        };
        Ok(component)
    }

    pub fn variant(&self) -> InputVariant {
        match self {
            VariantComponent::Text(_) => InputVariant::Text,
            VariantComponent::Phone(_) => InputVariant::Phone,
            VariantComponent::Date(_) => InputVariant::Date,
            VariantComponent::File(_) => InputVariant::File,
            VariantComponent::Address(_) => InputVariant::Address,
            VariantComponent::Select(_) => InputVariant::Select,
            VariantComponent::Currency(_) => InputVariant::Currency,
        }
    }

    pub(crate) fn as_component(&self) -> &dyn FieldComponent {
        match self {
            VariantComponent::Text(inner) => inner,
            VariantComponent::Phone(inner) => inner,
            VariantComponent::Date(inner) => inner,
            VariantComponent::File(inner) => inner,
            VariantComponent::Address(inner) => inner,
            VariantComponent::Select(inner) => inner,
            VariantComponent::Currency(inner) => inner,
        }
    }

    pub(crate) fn as_component_mut(&mut self) -> &mut dyn FieldComponent {
        match self {
            VariantComponent::Text(inner) => inner,
            VariantComponent::Phone(inner) => inner,
            VariantComponent::Date(inner) => inner,
            VariantComponent::File(inner) => inner,
            VariantComponent::Address(inner) => inner,
            VariantComponent::Select(inner) => inner,
            VariantComponent::Currency(inner) => inner,
        }
    }
}
