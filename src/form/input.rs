use std::fmt;
use std::path::Path;
use std::time::Instant;

use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use crate::domain::{
    ConfigError, FieldConfig, InputVariant, ValidationMessage, ValidationResult, ValidationRule,
    VisualState,
};
use crate::presentation::PopupView;
use crate::validation::{field_rules, validate};

use super::components::{Decorations, VariantComponent};
use super::events::{ComponentContext, FieldEvent, FieldEvents};
use super::popup::{ListenerId, PointerListeners, PopupHit};

pub type ChangeCallback = Box<dyn FnMut(&str)>;
pub type ValidateCallback = Box<dyn FnMut(&ValidationResult)>;

/// One polymorphic input: shared field state plus the active variant.
///
/// The field is controlled when its configuration (or a later
/// [`set_controlled_value`](Self::set_controlled_value)) supplies a value; edits
/// are then forwarded through `on_change` and the host decides what the field
/// shows. Validation never runs before the first blur; after it, every change
/// re-validates.
pub struct InputField {
    config: FieldConfig,
    rules: Vec<ValidationRule>,
    internal_value: String,
    controlled_value: Option<String>,
    state: VisualState,
    disabled: bool,
    touched: bool,
    focused: bool,
    validation: Option<ValidationResult>,
    component: VariantComponent,
    listeners: PointerListeners,
    today: Option<NaiveDate>,
    on_change: Option<ChangeCallback>,
    on_validate: Option<ValidateCallback>,
}

impl InputField {
    pub fn new(config: FieldConfig) -> Result<Self, ConfigError> {
        Self::build(config, None)
    }

    /// Build with a fixed "today", used to seed the calendar.
    pub fn with_today(config: FieldConfig, today: NaiveDate) -> Result<Self, ConfigError> {
        Self::build(config, Some(today))
    }

    fn build(config: FieldConfig, today: Option<NaiveDate>) -> Result<Self, ConfigError> {
        let seed_today = today.unwrap_or_else(local_today);
        let component = VariantComponent::build(&config, seed_today)?;
        let rules = field_rules(config.required, &config.validation_rules);
        let disabled = config.disabled;
        Ok(Self {
            internal_value: config.value.clone().unwrap_or_default(),
            controlled_value: config.value.clone(),
            state: if disabled {
                VisualState::Disabled
            } else {
                VisualState::Default
            },
            disabled,
            touched: false,
            focused: false,
            validation: None,
            rules,
            component,
            listeners: PointerListeners::new(),
            today,
            on_change: None,
            on_validate: None,
            config,
        })
    }

    /// Share an outside-pointer registry with other fields of the same form.
    pub fn with_pointer_listeners(mut self, listeners: PointerListeners) -> Self {
        self.listeners = listeners;
        self
    }

    pub fn on_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn on_validate(mut self, callback: impl FnMut(&ValidationResult) + 'static) -> Self {
        self.on_validate = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    pub fn variant(&self) -> InputVariant {
        self.config.variant
    }

    pub fn component(&self) -> &VariantComponent {
        &self.component
    }

    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    /// The canonical value: the host's when controlled, else the local one.
    pub fn value(&self) -> &str {
        self.controlled_value
            .as_deref()
            .unwrap_or(&self.internal_value)
    }

    pub fn is_controlled(&self) -> bool {
        self.controlled_value.is_some()
    }

    /// Mirror a new host value (`None` hands ownership back to the field).
    pub fn set_controlled_value(&mut self, value: Option<String>) {
        if let Some(value) = &value {
            self.internal_value = value.clone();
        }
        self.controlled_value = value;
    }

    /// Underlying state-machine state, ignoring the disabled override.
    pub fn state(&self) -> VisualState {
        self.state
    }

    /// State exposed as `data-state`: `disabled` wins over everything.
    pub fn display_state(&self) -> VisualState {
        if self.disabled {
            VisualState::Disabled
        } else {
            self.state
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            let mut events = FieldEvents::new();
            self.component.as_component_mut().dismiss_popup(&mut events);
            self.focused = false;
        } else if self.state == VisualState::Disabled {
            self.state = VisualState::Default;
        }
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Focused since the last blur.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn validation(&self) -> Option<&ValidationResult> {
        self.validation.as_ref()
    }

    /// The single message shown under the field, once it has been touched.
    pub fn surfaced_message(&self) -> Option<&ValidationMessage> {
        if !self.touched {
            return None;
        }
        self.validation.as_ref().and_then(ValidationResult::first_message)
    }

    pub fn is_valid(&self) -> bool {
        self.validation.as_ref().is_none_or(|result| result.valid)
    }

    pub fn focus(&mut self) {
        if self.disabled {
            return;
        }
        self.focused = true;
        self.transition(VisualState::Active, "focus");
    }

    pub fn blur(&mut self) {
        if self.disabled {
            return;
        }
        self.focused = false;
        self.touched = true;
        let value = self.value().to_string();
        let result = self.run_validation(&value);
        let next = match result.state {
            Some(severity) => severity.into(),
            None if !value.is_empty() => VisualState::Idle,
            None => VisualState::Default,
        };
        self.transition(next, "blur");
    }

    pub fn change(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.internal_value = value.clone();
        if let Some(callback) = self.on_change.as_mut() {
            callback(&value);
        }
        if self.touched {
            let result = self.run_validation(&value);
            let next = result
                .state
                .map(VisualState::from)
                .unwrap_or(VisualState::Active);
            self.transition(next, "change");
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        self.handle_key_at(key, Instant::now())
    }

    /// Route a key to the active variant. Disabled fields ignore input.
    pub fn handle_key_at(&mut self, key: &KeyEvent, now: Instant) -> bool {
        if self.disabled {
            return false;
        }
        self.with_component(now, |component, ctx, events| {
            component.handle_key(ctx, key, events)
        })
    }

    pub fn popup_open(&self) -> bool {
        self.component.as_component().popup_open()
    }

    /// Pointer press on the trigger: opens a closed popup, closes an open one.
    pub fn toggle_popup(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        if self.popup_open() {
            return self.dismiss_popup();
        }
        self.with_component(Instant::now(), |component, ctx, events| {
            component.open_popup(ctx, events)
        })
    }

    /// Close without committing, as for Escape or a press outside the popup.
    pub fn dismiss_popup(&mut self) -> bool {
        let mut events = FieldEvents::new();
        let closed = self.component.as_component_mut().dismiss_popup(&mut events);
        self.apply_events(events);
        closed
    }

    /// Give up focus: close any popup and blur, validating once. A popup whose
    /// close already blurred is not blurred again.
    pub fn release(&mut self) {
        if self.disabled {
            return;
        }
        self.dismiss_popup();
        if self.focused {
            self.blur();
        }
    }

    pub fn popup_hover(&mut self, index: usize) -> bool {
        self.component.as_component_mut().popup_hover(index)
    }

    pub fn popup_click(&mut self, hit: PopupHit) -> bool {
        if self.disabled {
            return false;
        }
        self.with_component(Instant::now(), |component, ctx, events| {
            component.popup_click(ctx, hit, events)
        })
    }

    /// Fire due timers (the type-ahead idle reset).
    pub fn tick(&mut self, now: Instant) -> bool {
        self.component.as_component_mut().tick(now)
    }

    pub fn listener_id(&self) -> Option<ListenerId> {
        self.component.as_component().listener_id()
    }

    pub fn set_popup_regions(&self, regions: Vec<Rect>) {
        self.component.as_component().set_popup_regions(regions);
    }

    pub fn set_popup_viewport(&mut self, rows: usize) {
        self.component.as_component_mut().set_popup_viewport(rows);
    }

    /// Report a file chosen through a host dialog (file variant only).
    pub fn select_file(&mut self, path: &Path) -> bool {
        if self.disabled {
            return false;
        }
        let VariantComponent::File(file) = &mut self.component else {
            return false;
        };
        let mut events = FieldEvents::new();
        let accepted = file.select_path(path, &mut events);
        self.apply_events(events);
        accepted
    }

    /// Dial code of the locally selected country (phone variant only).
    pub fn dial_code(&self) -> Option<&'static str> {
        match &self.component {
            VariantComponent::Phone(phone) => Some(phone.country().dial_code),
            _ => None,
        }
    }

    pub fn display_value(&self) -> String {
        self.component.as_component().display_value(self.value())
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.config
            .placeholder
            .as_deref()
            .or_else(|| self.component.as_component().default_placeholder())
    }

    pub fn decorations(&self) -> Decorations {
        self.component.as_component().decorations()
    }

    pub fn popup_view(&self) -> Option<PopupView> {
        let ctx = ComponentContext {
            value: self.value(),
            now: Instant::now(),
            today: self.today(),
            listeners: &self.listeners,
        };
        self.component.as_component().popup_view(&ctx)
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(local_today)
    }

    fn with_component<F>(&mut self, now: Instant, action: F) -> bool
    where
        F: FnOnce(&mut dyn super::components::FieldComponent, &ComponentContext<'_>, &mut FieldEvents) -> bool,
    {
        let today = self.today();
        let value = self.value().to_string();
        let mut events = FieldEvents::new();
        let handled = {
            let ctx = ComponentContext {
                value: &value,
                now,
                today,
                listeners: &self.listeners,
            };
            action(self.component.as_component_mut(), &ctx, &mut events)
        };
        self.apply_events(events);
        handled
    }

    fn apply_events(&mut self, events: FieldEvents) {
        for event in events {
            match event {
                FieldEvent::Focus => self.focus(),
                FieldEvent::Blur => self.blur(),
                FieldEvent::Change(value) => self.change(value),
            }
        }
    }

    fn run_validation(&mut self, value: &str) -> ValidationResult {
        let result = validate(value, self.config.variant, &self.rules);
        if let Some(callback) = self.on_validate.as_mut() {
            callback(&result);
        }
        self.validation = Some(result.clone());
        result
    }

    fn transition(&mut self, next: VisualState, cause: &'static str) {
        if self.state != next {
            tracing::debug!(
                field = %self.config.name,
                from = %self.state,
                to = %next,
                cause,
                "visual state changed"
            );
        }
        self.state = next;
    }
}

impl fmt::Debug for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputField")
            .field("name", &self.config.name)
            .field("variant", &self.config.variant)
            .field("value", &self.value())
            .field("state", &self.state)
            .field("disabled", &self.disabled)
            .field("touched", &self.touched)
            .field("validation", &self.validation)
            .field("component", &self.component)
            .finish()
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
