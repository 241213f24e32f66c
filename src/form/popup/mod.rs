//! Shared machinery for the date, phone and select popups.
//!
//! Every popup is `closed -> open -> closed`. Being open is the same thing as
//! holding an outside-pointer guard, so a popup cannot be open without a live
//! listener and cannot leak one after it closes.

pub mod calendar;
mod listbox;
mod listeners;
mod type_ahead;

use ratatui::layout::Rect;

use self::listeners::OutsidePointerGuard;

pub use listbox::Listbox;
pub use listeners::{ListenerId, PointerListeners};
pub use type_ahead::{TYPE_AHEAD_IDLE, TypeAhead, find_prefix};

/// Pointer target inside an open popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupHit {
    Item(usize),
    PreviousPage,
    NextPage,
}

#[derive(Debug, Default)]
pub(crate) struct PopupLifetime {
    guard: Option<OutsidePointerGuard>,
}

impl PopupLifetime {
    pub(crate) fn is_open(&self) -> bool {
        self.guard.is_some()
    }

    pub(crate) fn begin(&mut self, listeners: &PointerListeners) {
        if self.guard.is_none() {
            self.guard = Some(listeners.acquire());
        }
    }

    /// Returns whether the popup was open.
    pub(crate) fn end(&mut self) -> bool {
        self.guard.take().is_some()
    }

    pub(crate) fn listener_id(&self) -> Option<ListenerId> {
        self.guard.as_ref().map(OutsidePointerGuard::id)
    }

    pub(crate) fn set_regions(&self, regions: Vec<Rect>) {
        if let Some(guard) = &self.guard {
            guard.set_regions(regions);
        }
    }
}
