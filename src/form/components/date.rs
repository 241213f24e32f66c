use chrono::{Datelike, Days, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};

use super::FieldComponent;
use super::helpers::{dismisses_popup, edit_text, opens_popup};
use crate::domain::RenderMode;
use crate::form::events::{ComponentContext, FieldEvent, FieldEvents};
use crate::form::popup::calendar::{DateBounds, GRID_CELLS, MonthView, WEEK_DAYS, format_date, parse_date};
use crate::form::popup::{ListenerId, PopupHit, PopupLifetime};
use crate::presentation::PopupView;

/// Free-text `yyyy/mm/dd` field with a calendar popup.
///
/// The displayed month is independent of the value until the popup opens,
/// at which point it is seeded from the parsed value (or today). Picking a
/// day emits the formatted date, closes the popup and blurs. Space opens
/// the calendar since dates never contain one; the phone field types it.
#[derive(Debug)]
pub struct DateComponent {
    mode: RenderMode,
    bounds: DateBounds,
    view: MonthView,
    cursor: usize,
    popup: PopupLifetime,
}

impl DateComponent {
    pub fn new(bounds: DateBounds, mode: RenderMode, today: NaiveDate) -> Self {
        let view = MonthView::of(today);
        let cursor = view.index_of(today).unwrap_or(0);
        Self {
            mode,
            bounds,
            view,
            cursor,
            popup: PopupLifetime::default(),
        }
    }

    pub fn bounds(&self) -> &DateBounds {
        &self.bounds
    }

    pub fn view(&self) -> MonthView {
        self.view
    }

    pub fn cursor_date(&self) -> Option<NaiveDate> {
        self.view.date_at(self.cursor)
    }

    fn open(&mut self, ctx: &ComponentContext<'_>, events: &mut FieldEvents) {
        let seed = parse_date(ctx.value).unwrap_or(ctx.today);
        self.view = MonthView::of(seed);
        self.cursor = self.view.index_of(seed).unwrap_or(0);
        self.popup.begin(ctx.listeners);
        tracing::debug!(month = %self.view.title(), "calendar opened");
        events.push(FieldEvent::Focus);
    }

    fn close(&mut self, events: &mut FieldEvents) -> bool {
        if !self.popup.end() {
            return false;
        }
        tracing::debug!("calendar closed");
        events.push(FieldEvent::Blur);
        true
    }

    fn move_cursor(&mut self, delta: isize) {
        let last = GRID_CELLS as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, last) as usize;
    }

    /// Show another month, keeping the cursor on the same day where possible.
    fn step_month(&mut self, delta: i32) {
        let day = self.cursor_date().map(|date| date.day()).unwrap_or(1);
        self.view = if delta < 0 {
            self.view.previous()
        } else {
            self.view.next()
        };
        let day = day.min(self.view.days_in_month()).max(1);
        self.cursor = self
            .view
            .first_day()
            .checked_add_days(Days::new(u64::from(day - 1)))
            .and_then(|date| self.view.index_of(date))
            .unwrap_or(0);
    }

    fn pick(&mut self, index: usize, events: &mut FieldEvents) -> bool {
        let Some(date) = self.view.date_at(index) else {
            return false;
        };
        if !self.bounds.contains(date) {
            tracing::warn!(date = %format_date(date), "rejected date outside bounds");
            return false;
        }
        events.push(FieldEvent::Change(format_date(date)));
        self.close(events);
        true
    }
}

impl FieldComponent for DateComponent {
    fn handle_key(
        &mut self,
        ctx: &ComponentContext<'_>,
        key: &KeyEvent,
        events: &mut FieldEvents,
    ) -> bool {
        if self.popup.is_open() {
            match key.code {
                KeyCode::Left => self.move_cursor(-1),
                KeyCode::Right => self.move_cursor(1),
                KeyCode::Up => self.move_cursor(-(WEEK_DAYS as isize)),
                KeyCode::Down => self.move_cursor(WEEK_DAYS as isize),
                KeyCode::PageUp => self.step_month(-1),
                KeyCode::PageDown => self.step_month(1),
                KeyCode::Enter => {
                    self.pick(self.cursor, events);
                }
                _ if dismisses_popup(key) => {
                    self.close(events);
                }
                _ => {}
            }
            return true;
        }

        if self.mode == RenderMode::Custom && opens_popup(key) {
            self.open(ctx, events);
            return true;
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

    fn dismiss_popup(&mut self, events: &mut FieldEvents) -> bool {
        self.close(events)
    }

    fn popup_hover(&mut self, index: usize) -> bool {
        if !self.popup.is_open() || index >= GRID_CELLS || index == self.cursor {
            return false;
        }
        self.cursor = index;
        true
    }

    fn popup_click(
        &mut self,
        _ctx: &ComponentContext<'_>,
        hit: PopupHit,
        events: &mut FieldEvents,
    ) -> bool {
        if !self.popup.is_open() {
            return false;
        }
        match hit {
            PopupHit::Item(index) => self.pick(index, events),
            PopupHit::PreviousPage => {
                self.step_month(-1);
                true
            }
            PopupHit::NextPage => {
                self.step_month(1);
                true
            }
        }
    }

    fn listener_id(&self) -> Option<ListenerId> {
        self.popup.listener_id()
    }

    fn set_popup_regions(&self, regions: Vec<ratatui::layout::Rect>) {
        self.popup.set_regions(regions);
    }

    fn default_placeholder(&self) -> Option<&'static str> {
        Some("yyyy/mm/dd")
    }

    fn popup_view(&self, ctx: &ComponentContext<'_>) -> Option<PopupView> {
        if !self.popup.is_open() {
            return None;
        }
        Some(PopupView::Calendar {
            title: self.view.title(),
            cells: self.view.grid(&self.bounds, parse_date(ctx.value), ctx.today),
            cursor: self.cursor,
        })
    }
}
