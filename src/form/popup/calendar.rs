use chrono::{Datelike, Days, Months, NaiveDate};

use crate::domain::ConfigError;

/// Six Monday-first weeks.
pub const GRID_CELLS: usize = 42;
pub const WEEK_DAYS: usize = 7;
pub const WEEKDAY_LABELS: [&str; WEEK_DAYS] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

const DISPLAY_FORMAT: &str = "%Y/%m/%d";
const ACCEPTED_FORMATS: [&str; 2] = ["%Y/%m/%d", "%Y-%m-%d"];

/// Parse `yyyy/mm/dd` or `yyyy-mm-dd`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Inclusive calendar-date range; missing ends are open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateBounds {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

impl DateBounds {
    pub fn new(min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        Self { min, max }
    }

    pub fn parse(min: Option<&str>, max: Option<&str>) -> Result<Self, ConfigError> {
        let parse_bound = |raw: Option<&str>| -> Result<Option<NaiveDate>, ConfigError> {
            match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
                None => Ok(None),
                Some(raw) => parse_date(raw)
                    .map(Some)
                    .ok_or_else(|| ConfigError::InvalidDate(raw.to_string())),
            }
        };
        Ok(Self::new(parse_bound(min)?, parse_bound(max)?))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min.is_none_or(|min| date >= min) && self.max.is_none_or(|max| date <= max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// Belongs to the previous or next month.
    pub outside: bool,
    /// Outside the configured bounds; clicks are rejected.
    pub disabled: bool,
    pub selected: bool,
    pub today: bool,
}

/// The month currently displayed by the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthView {
    first: NaiveDate,
}

impl MonthView {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn days_in_month(&self) -> u32 {
        self.first
            .checked_add_months(Months::new(1))
            .map(|next| next.signed_duration_since(self.first).num_days() as u32)
            .unwrap_or(31)
    }

    pub fn previous(&self) -> Self {
        Self {
            first: self
                .first
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.first),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            first: self
                .first
                .checked_add_months(Months::new(1))
                .unwrap_or(self.first),
        }
    }

    /// First cell of the grid: the Monday on or before the 1st.
    pub fn grid_start(&self) -> NaiveDate {
        let lead = u64::from(self.first.weekday().num_days_from_monday());
        self.first
            .checked_sub_days(Days::new(lead))
            .unwrap_or(self.first)
    }

    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        if index >= GRID_CELLS {
            return None;
        }
        self.grid_start().checked_add_days(Days::new(index as u64))
    }

    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = date.signed_duration_since(self.grid_start()).num_days();
        usize::try_from(offset).ok().filter(|index| *index < GRID_CELLS)
    }

    pub fn grid(
        &self,
        bounds: &DateBounds,
        selected: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Vec<CalendarCell> {
        (0..GRID_CELLS)
            .filter_map(|index| self.date_at(index))
            .map(|date| CalendarCell {
                date,
                outside: date.month() != self.month() || date.year() != self.year(),
                disabled: !bounds.contains(date),
                selected: selected == Some(date),
                today: date == today,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn parses_both_separators() {
        assert_eq!(parse_date("2024/03/09"), Some(ymd(2024, 3, 9)));
        assert_eq!(parse_date(" 2024-03-09 "), Some(ymd(2024, 3, 9)));
        assert_eq!(parse_date("2024/02/30"), None);
        assert_eq!(parse_date("09/03/2024"), None);
    }

    #[test]
    fn format_parse_round_trip() {
        for (year, month, day) in [(2024, 2, 29), (1999, 12, 31), (2000, 1, 1), (987, 6, 15)] {
            let date = ymd(year, month, day);
            assert_eq!(parse_date(&format_date(date)), Some(date));
        }
        assert_eq!(format_date(ymd(2024, 3, 9)), "2024/03/09");
    }

    #[test]
    fn grid_has_42_cells_starting_monday() {
        // March 2024 starts on a Friday.
        let view = MonthView::of(ymd(2024, 3, 20));
        let cells = view.grid(&DateBounds::default(), None, ymd(2024, 3, 20));
        assert_eq!(cells.len(), GRID_CELLS);
        assert_eq!(cells[0].date, ymd(2024, 2, 26));
        assert!(cells[0].outside);
        assert_eq!(cells[4].date, ymd(2024, 3, 1));
        assert!(!cells[4].outside);
        let inside = cells.iter().filter(|cell| !cell.outside).count();
        assert_eq!(inside as u32, view.days_in_month());
        assert_eq!(inside, 31);
        assert_eq!(cells.iter().filter(|cell| cell.today).count(), 1);
    }

    #[test]
    fn inside_cells_match_month_length() {
        let mut view = MonthView::of(ymd(2023, 1, 1));
        for _ in 0..24 {
            let cells = view.grid(&DateBounds::default(), None, ymd(2000, 1, 1));
            assert_eq!(cells.len(), GRID_CELLS);
            let inside = cells.iter().filter(|cell| !cell.outside).count() as u32;
            assert_eq!(inside, view.days_in_month());
            view = view.next();
        }
    }

    #[test]
    fn bounds_disable_cells_by_calendar_date() {
        let bounds = DateBounds::parse(Some("2024-03-05"), Some("2024/03/25")).unwrap();
        let view = MonthView::of(ymd(2024, 3, 1));
        let cells = view.grid(&bounds, None, ymd(2024, 3, 1));
        let disabled = |date| cells.iter().find(|cell| cell.date == date).unwrap().disabled;
        assert!(disabled(ymd(2024, 3, 4)));
        assert!(!disabled(ymd(2024, 3, 5)));
        assert!(!disabled(ymd(2024, 3, 25)));
        assert!(disabled(ymd(2024, 3, 26)));
    }

    #[test]
    fn invalid_bound_is_reported() {
        let err = DateBounds::parse(Some("tomorrow"), None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDate(raw) if raw == "tomorrow"));
    }

    #[test]
    fn month_navigation_crosses_years() {
        let view = MonthView::of(ymd(2024, 1, 15));
        assert_eq!(view.previous().year(), 2023);
        assert_eq!(view.previous().month(), 12);
        assert_eq!(view.next().month(), 2);
        assert_eq!(view.title(), "January 2024");
    }
}
