use std::iter::successors;
use time::{Date, Duration, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) const WEEKS_IN_GRID: usize = 6;

/// Number of day cells in a month page
pub(crate) const GRID_CELLS: usize = DAYS_IN_WEEK * WEEKS_IN_GRID;

/// Column headers of a month page, Monday first
pub(crate) static DAY_HEADERS: [&str; DAYS_IN_WEEK] = ["M", "T", "W", "T", "F", "S", "S"];

pub(crate) trait WeekdayExt {
    /// Position of the weekday in a Monday-first week
    fn index0(&self) -> u8;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        (self.number_days_from_sunday() + 6) % 7
    }
}

/// Returns the date shown in the top-left cell of the page for the given
/// month, i.e., the Monday on or before the first of the month.  Returns
/// `None` if that date cannot be represented.
pub(super) fn grid_start(year: i32, month: Month) -> Option<Date> {
    let first = Date::from_calendar_date(year, month, 1).ok()?;
    let offset = first.weekday().index0();
    first.checked_sub(Duration::days(offset.into()))
}

/// Returns the date shown in the bottom-right cell of a page starting at
/// `start`, if representable
pub(super) fn grid_end(start: Date) -> Option<Date> {
    iter_days_from(start).nth(GRID_CELLS - 1)
}

/// Iterate over `date` and every day after it
pub(super) fn iter_days_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day())
}

/// Format a date as an ISO 8601 calendar date (`YYYY-MM-DD`)
pub(crate) fn iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
