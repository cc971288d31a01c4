use super::util::{grid_end, grid_start, iter_days_from, DAYS_IN_WEEK, GRID_CELLS};
use std::slice::ChunksExact;
use thiserror::Error;
use time::{Date, Month};

/// The month & year whose page is currently displayed
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct NavPosition {
    year: i32,
    month: Month,
    // Invariant: all `GRID_CELLS` days starting at `start` are representable
    start: Date,
}

impl NavPosition {
    pub(crate) fn new(year: i32, month: Month) -> Result<NavPosition, OutOfTimeError> {
        let start = grid_start(year, month).ok_or(OutOfTimeError)?;
        grid_end(start).ok_or(OutOfTimeError)?;
        Ok(NavPosition { year, month, start })
    }

    /// Returns the position whose page displays `date` as part of its month
    pub(crate) fn containing(date: Date) -> Result<NavPosition, OutOfTimeError> {
        NavPosition::new(date.year(), date.month())
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn month(&self) -> Month {
        self.month
    }

    pub(crate) fn with_month(self, month: Month) -> Result<NavPosition, OutOfTimeError> {
        NavPosition::new(self.year, month)
    }

    pub(crate) fn with_year(self, year: i32) -> Result<NavPosition, OutOfTimeError> {
        NavPosition::new(year, self.month)
    }

    /// Returns whether `date` falls within the displayed month
    pub(crate) fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct DayCell {
    pub(crate) date: Date,
    /// Whether the date belongs to the month being displayed
    pub(crate) in_month: bool,
    pub(crate) is_today: bool,
    pub(crate) is_selected: bool,
}

impl DayCell {
    pub(crate) fn day(&self) -> u8 {
        self.date.day()
    }
}

/// A page of six Monday-to-Sunday weeks covering a month.
///
/// The page always contains exactly `GRID_CELLS` consecutive days, starting
/// with the Monday on or before the first of the month; days before and after
/// the month pad out the first and last weeks.  Flags on the cells are
/// computed when the page is built and are not updated afterwards, so a new
/// page should be built whenever the position, the selection, or the current
/// date changes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    position: NavPosition,
    cells: Vec<DayCell>,
}

impl MonthGrid {
    pub(crate) fn new(position: NavPosition, today: Date, selection: Option<Date>) -> MonthGrid {
        let cells = iter_days_from(position.start)
            .take(GRID_CELLS)
            .map(|date| DayCell {
                date,
                in_month: position.contains(date),
                is_today: date == today,
                is_selected: selection == Some(date),
            })
            .collect::<Vec<_>>();
        debug_assert_eq!(cells.len(), GRID_CELLS, "page should be fully populated");
        MonthGrid { position, cells }
    }

    pub(crate) fn position(&self) -> NavPosition {
        self.position
    }

    pub(crate) fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub(crate) fn weeks(&self) -> ChunksExact<'_, DayCell> {
        self.cells().chunks_exact(DAYS_IN_WEEK)
    }

    /// Returns the cell in the given week (0-based) and weekday column
    /// (0-based, Monday first)
    pub(crate) fn cell(&self, row: usize, col: usize) -> Option<&DayCell> {
        if col < DAYS_IN_WEEK {
            self.cells.get(row * DAYS_IN_WEEK + col)
        } else {
            None
        }
    }
}
