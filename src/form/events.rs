use std::time::Instant;

use chrono::NaiveDate;

use super::popup::PointerListeners;

/// What a variant component asks of the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    Focus,
    Blur,
    Change(String),
}

/// Snapshot handed to a component for one interaction.
pub(crate) struct ComponentContext<'a> {
    pub value: &'a str,
    pub now: Instant,
    pub today: NaiveDate,
    pub listeners: &'a PointerListeners,
}

pub(crate) type FieldEvents = Vec<FieldEvent>;
