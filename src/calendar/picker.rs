use super::grid::{DayCell, MonthGrid, NavPosition, OutOfTimeError};
use super::util::iso_date;
use time::{Date, Month};
use tracing::debug;

/// Number of years offered by the year selector
const YEAR_WINDOW: i32 = 10;

/// The years offered by the year selector.
///
/// The window starts at the current year as of when the picker was created
/// and does not move afterwards, even if the picker outlives the year.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct YearWindow {
    first: i32,
}

impl YearWindow {
    pub(crate) fn starting(first: i32) -> YearWindow {
        YearWindow { first }
    }

    pub(crate) fn first(&self) -> i32 {
        self.first
    }

    pub(crate) fn last(&self) -> i32 {
        self.first.saturating_add(YEAR_WINDOW - 1)
    }

    /// Returns the year after `year`, wrapping around to the start of the
    /// window.  Years outside the window are followed by the first year.
    pub(crate) fn next_after(&self, year: i32) -> i32 {
        if (self.first()..self.last()).contains(&year) {
            year + 1
        } else {
            self.first()
        }
    }

    /// Returns the year before `year`, wrapping around to the end of the
    /// window.  Years outside the window are preceded by the last year.
    pub(crate) fn prev_before(&self, year: i32) -> i32 {
        if year > self.first() && year <= self.last() {
            year - 1
        } else {
            self.last()
        }
    }
}

/// Events emitted to the host when the picker closes
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum PickerEvent {
    /// The user applied a selection, given as a `YYYY-MM-DD` string
    Committed(String),
    Cancelled,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Session {
    position: NavPosition,
    selection: Option<Date>,
}

/// Month/year navigation plus a tentative date selection that is either
/// applied (committed to the host) or cancelled.
///
/// All operations other than `open()` are no-ops while the picker is closed,
/// so duplicate dismissals are harmless.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DatePicker {
    years: YearWindow,
    session: Option<Session>,
}

impl DatePicker {
    /// Create a closed picker whose year selector starts at the year of
    /// `today`
    pub(crate) fn new(today: Date) -> DatePicker {
        DatePicker {
            years: YearWindow::starting(today.year()),
            session: None,
        }
    }

    pub(crate) fn years(&self) -> YearWindow {
        self.years
    }

    pub(crate) fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub(crate) fn position(&self) -> Option<NavPosition> {
        self.session.map(|s| s.position)
    }

    pub(crate) fn selection(&self) -> Option<Date> {
        self.session.and_then(|s| s.selection)
    }

    /// Open the picker, or reset it if it is already open.  If `initial` is
    /// given, its month is displayed and it becomes the tentative selection;
    /// otherwise, the month of `today` is displayed with nothing selected.
    pub(crate) fn open(
        &mut self,
        initial: Option<Date>,
        today: Date,
    ) -> Result<(), OutOfTimeError> {
        let position = NavPosition::containing(initial.unwrap_or(today))?;
        debug!(
            year = position.year(),
            month = %position.month(),
            initial = ?initial,
            "opening date picker"
        );
        self.session = Some(Session {
            position,
            selection: initial,
        });
        Ok(())
    }

    pub(crate) fn navigate_month(&mut self, month: Month) -> Result<(), OutOfTimeError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        session.position = session.position.with_month(month)?;
        debug!(month = %month, "navigated to month");
        Ok(())
    }

    pub(crate) fn navigate_year(&mut self, year: i32) -> Result<(), OutOfTimeError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        session.position = session.position.with_year(year)?;
        debug!(year, "navigated to year");
        Ok(())
    }

    /// Make the cell's date the tentative selection.  Cells that do not belong
    /// to the displayed month are ignored.
    pub(crate) fn pick_day(&mut self, cell: &DayCell) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if cell.in_month && session.position.contains(cell.date) {
            debug!(date = %cell.date, "picked day");
            session.selection = Some(cell.date);
        }
    }

    /// Commit the tentative selection and close.  If nothing has been
    /// selected, the picker stays open and nothing is emitted.
    pub(crate) fn apply(&mut self) -> Option<PickerEvent> {
        let date = self.selection()?;
        let committed = iso_date(date);
        debug!(date = %committed, "applying selection");
        self.session = None;
        Some(PickerEvent::Committed(committed))
    }

    /// Discard the tentative selection and close
    pub(crate) fn cancel(&mut self) -> Option<PickerEvent> {
        let session = self.session.take()?;
        debug!(selection = ?session.selection, "cancelling date picker");
        Some(PickerEvent::Cancelled)
    }

    /// Build the page for the current position, comparing each cell against
    /// `today` and the tentative selection.  Returns `None` if the picker is
    /// closed.
    pub(crate) fn grid(&self, today: Date) -> Option<MonthGrid> {
        self.session
            .map(|s| MonthGrid::new(s.position, today, s.selection))
    }
}
