use crossterm::event::{KeyCode, KeyEvent};

use super::FieldComponent;
use super::helpers::{dismisses_popup, edit_text, printable};
use crate::domain::RenderMode;
use crate::form::events::{ComponentContext, FieldEvent, FieldEvents};
use crate::form::popup::{Listbox, ListenerId, PopupHit, PopupLifetime, TypeAhead, find_prefix};
use crate::presentation::{OptionRow, PopupView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub iso: &'static str,
    pub name: &'static str,
    pub dial_code: &'static str,
    pub flag: &'static str,
}

const fn country(
    iso: &'static str,
    name: &'static str,
    dial_code: &'static str,
    flag: &'static str,
) -> Country {
    Country {
        iso,
        name,
        dial_code,
        flag,
    }
}

pub const COUNTRIES: [Country; 15] = [
    country("GB", "United Kingdom", "+44", "🇬🇧"),
    country("US", "United States", "+1", "🇺🇸"),
    country("IE", "Ireland", "+353", "🇮🇪"),
    country("IN", "India", "+91", "🇮🇳"),
    country("AU", "Australia", "+61", "🇦🇺"),
    country("DE", "Germany", "+49", "🇩🇪"),
    country("FR", "France", "+33", "🇫🇷"),
    country("ES", "Spain", "+34", "🇪🇸"),
    country("IT", "Italy", "+39", "🇮🇹"),
    country("NL", "Netherlands", "+31", "🇳🇱"),
    country("JP", "Japan", "+81", "🇯🇵"),
    country("BR", "Brazil", "+55", "🇧🇷"),
    country("ZA", "South Africa", "+27", "🇿🇦"),
    country("NZ", "New Zealand", "+64", "🇳🇿"),
    country("AE", "United Arab Emirates", "+971", "🇦🇪"),
];

/// Index of the country matching a dial code (`+44`) or ISO code (`GB`).
pub fn country_index(code: &str) -> Option<usize> {
    let code = code.trim();
    COUNTRIES
        .iter()
        .position(|country| country.dial_code == code || country.iso.eq_ignore_ascii_case(code))
}

/// Country-code picker plus telephone number.
///
/// Only the number flows through `Change`; the country is local state. The
/// picker closes without a `Blur` because the number keeps focus.
#[derive(Debug)]
pub struct PhoneComponent {
    mode: RenderMode,
    selected: usize,
    listbox: Listbox,
    popup: PopupLifetime,
    search: TypeAhead,
}

impl PhoneComponent {
    pub fn new(country_code: Option<&str>, mode: RenderMode) -> Self {
        let selected = country_code.and_then(country_index).unwrap_or(0);
        Self {
            mode,
            selected,
            listbox: Listbox::new(COUNTRIES.len()),
            popup: PopupLifetime::default(),
            search: TypeAhead::default(),
        }
    }

    pub fn country(&self) -> &'static Country {
        &COUNTRIES[self.selected]
    }

    pub fn cursor(&self) -> Option<usize> {
        self.listbox.cursor()
    }

    pub fn search_buffer(&self) -> &str {
        self.search.buffer()
    }

    fn open(&mut self, ctx: &ComponentContext<'_>, events: &mut FieldEvents) {
        self.popup.begin(ctx.listeners);
        self.listbox.seed(Some(self.selected));
        tracing::debug!(country = self.country().iso, "country picker opened");
        events.push(FieldEvent::Focus);
    }

    fn close(&mut self) -> bool {
        if !self.popup.end() {
            return false;
        }
        self.listbox.reset();
        self.search.cancel();
        tracing::debug!(country = self.country().iso, "country picker closed");
        true
    }

    fn commit(&mut self, index: usize) -> bool {
        if index >= COUNTRIES.len() {
            return false;
        }
        self.selected = index;
        self.close();
        true
    }

    fn type_ahead(&mut self, ch: char, ctx: &ComponentContext<'_>) {
        let query = self.search.push(ch, ctx.now).to_string();
        let entries = COUNTRIES
            .iter()
            .map(|country| (country.name, country.dial_code));
        if let Some(index) = find_prefix(entries, &query) {
            self.listbox.set_cursor(index);
        }
        tracing::trace!(%query, cursor = ?self.listbox.cursor(), "country type-ahead");
    }

    fn cycle_native(&mut self, delta: isize) -> bool {
        let last = COUNTRIES.len() as isize - 1;
        let next = (self.selected as isize + delta).clamp(0, last) as usize;
        let changed = next != self.selected;
        self.selected = next;
        changed
    }
}

impl FieldComponent for PhoneComponent {
    fn handle_key(
        &mut self,
        ctx: &ComponentContext<'_>,
        key: &KeyEvent,
        events: &mut FieldEvents,
    ) -> bool {
        if self.popup.is_open() {
            match key.code {
                KeyCode::Down => self.listbox.move_by(1),
                KeyCode::Up => self.listbox.move_by(-1),
                KeyCode::Enter => {
                    match self.listbox.cursor() {
                        Some(index) => self.commit(index),
                        None => self.close(),
                    };
                }
                _ if dismisses_popup(key) => {
                    self.close();
                }
                _ => {
                    if let Some(ch) = printable(key) {
                        self.type_ahead(ch, ctx);
                    }
                }
            }
            return true;
        }

        match (self.mode, key.code) {
            (RenderMode::Native, KeyCode::Up) => return self.cycle_native(-1),
            (RenderMode::Native, KeyCode::Down) => return self.cycle_native(1),
            (RenderMode::Custom, KeyCode::Down | KeyCode::Enter) => {
                self.open(ctx, events);
                return true;
            }
            _ => {}
        }

        match edit_text(ctx.value, key) {
            Some(next) => {
                events.push(FieldEvent::Change(next));
                true
            }
            None => false,
        }
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

    fn dismiss_popup(&mut self, _events: &mut FieldEvents) -> bool {
        self.close()
    }

    fn popup_hover(&mut self, index: usize) -> bool {
        self.popup.is_open() && self.listbox.set_cursor(index)
    }

    fn popup_click(
        &mut self,
        _ctx: &ComponentContext<'_>,
        hit: PopupHit,
        _events: &mut FieldEvents,
    ) -> bool {
        match hit {
            PopupHit::Item(index) if self.popup.is_open() => self.commit(index),
            _ => false,
        }
    }

    fn tick(&mut self, now: std::time::Instant) -> bool {
        self.search.tick(now)
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

    fn default_placeholder(&self) -> Option<&'static str> {
        Some("7904567670")
    }

    fn decorations(&self) -> super::Decorations {
        let country = self.country();
        super::Decorations {
            prefix: Some(format!("{} {}", country.flag, country.dial_code)),
            suffix: None,
            icon: None,
        }
    }

    fn popup_view(&self, _ctx: &ComponentContext<'_>) -> Option<PopupView> {
        if !self.popup.is_open() {
            return None;
        }
        Some(PopupView::Options {
            title: "Country code".to_string(),
            items: COUNTRIES
                .iter()
                .map(|country| OptionRow {
                    label: format!("{} {}", country.flag, country.name),
                    detail: Some(country.dial_code.to_string()),
                })
                .collect(),
            cursor: self.listbox.cursor(),
            selected: Some(self.selected),
            scroll_offset: self.listbox.scroll_offset(),
            search: Some(self.search.buffer().to_string()).filter(|buffer| !buffer.is_empty()),
        })
    }
}
