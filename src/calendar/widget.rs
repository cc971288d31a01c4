use super::grid::{DayCell, NavPosition};
use super::picker::DatePicker;
use super::util::DAY_HEADERS;
use crate::theme::{
    buttons::{APPLY_STYLE, BACK_STYLE},
    ARROW_STYLE, BASE_STYLE, OUTSIDE_MONTH_STYLE, SELECTED_STYLE, SELECTOR_STYLE, TODAY_STYLE,
    WEEKDAY_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Position, Rect},
    style::Style,
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use std::iter::zip;
use std::ops::Range;
use time::Date;

/*
 * ..................................
 * .┌──────── Select Date ─────────┐.
 * .│‹ March     ›         ‹ 2024 ›│.
 * .│                              │.
 * .│   M   T   W   T   F   S   S  │.
 * .│  26  27  28  29   1   2   3  │.
 * .│   4   5   6   7   8   9  10  │.
 * .│  11  12  13  14  15  16  17  │.
 * .│  18  19 [20] 21  22  23  24  │.
 * .│  25  26  27  28  29  30  31  │.
 * .│   1   2   3   4   5   6   7  │.
 * .│                              │.
 * .│[ Back ]             [ Apply ]│.
 * .└──────────────────────────────┘.
 * ..................................
 */

static TITLE: &str = " Select Date ";

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

const GRID_WIDTH: u16 = DAY_WIDTH * 7;

/// Number of lines taken up by the weeks of a page, one per week
const WEEK_LINES: u16 = 6;

/// Columns between the inside of the border and the grid of days
const GRID_INDENT: u16 = 1;

const CONTENT_WIDTH: u16 = GRID_WIDTH + 2 * GRID_INDENT;

const CONTENT_HEIGHT: u16 = BUTTON_LINE + 1;

/// Border plus one column/line of padding, on each side of the content
const FRAME_SIZE: u16 = 2;

const OUTER_WIDTH: u16 = CONTENT_WIDTH + 2 * FRAME_SIZE;

const OUTER_HEIGHT: u16 = CONTENT_HEIGHT + 2 * FRAME_SIZE;

// Lines of the content area:
const SELECTOR_LINE: u16 = 0;
const HEADER_LINE: u16 = 2;
const FIRST_WEEK_LINE: u16 = 3;
const BUTTON_LINE: u16 = FIRST_WEEK_LINE + WEEK_LINES + 1;

static PREV_ARROW: &str = "‹";
static NEXT_ARROW: &str = "›";

/// Number of columns around a selector arrow that respond to clicks,
/// including the arrow itself
const ARROW_HIT_WIDTH: u16 = 2;

const LONGEST_MONTH_NAME_LEN: u16 = 9; // September

const MONTH_PREV_COL: u16 = 0;
const MONTH_NAME_COL: u16 = 2;
const MONTH_NEXT_COL: u16 = MONTH_NAME_COL + LONGEST_MONTH_NAME_LEN + 1;

const YEAR_LEN: u16 = 4;
const YEAR_NEXT_COL: u16 = CONTENT_WIDTH - 1;
const YEAR_COL: u16 = YEAR_NEXT_COL - 1 - YEAR_LEN;
const YEAR_PREV_COL: u16 = YEAR_COL - 2;

static BACK_LABEL: &str = "[ Back ]";
const BACK_LEN: u16 = 8;
const BACK_COL: u16 = 0;

static APPLY_LABEL: &str = "[ Apply ]";
const APPLY_LEN: u16 = 9;
const APPLY_COL: u16 = CONTENT_WIDTH - APPLY_LEN;

/// The things in or around the picker that can be clicked on
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Target {
    PrevMonth,
    NextMonth,
    PrevYear,
    NextYear,
    /// The day in the given week (0-based) and weekday column (0-based,
    /// Monday first) of the page
    Day {
        row: usize,
        col: usize,
    },
    Back,
    Apply,
    /// Anywhere outside of the popup
    Outside,
}

/// Placement of the picker popup within a given area.  Drawing and hit
/// testing both go through this so that clicks land on what was drawn.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct PickerLayout {
    outer: Rect,
    frame: Rect,
    content: Rect,
}

impl PickerLayout {
    pub(crate) fn new(area: Rect) -> PickerLayout {
        let [outer] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer);
        let frame = outer.inner(Margin::new(1, 1));
        let content = frame.inner(Margin::new(1, 1));
        PickerLayout {
            outer,
            frame,
            content,
        }
    }

    /// Returns what is drawn at the given screen coordinates, or `None` if
    /// it's a non-interactive part of the popup
    pub(crate) fn target_at(&self, column: u16, row: u16) -> Option<Target> {
        let pos = Position::new(column, row);
        if !self.outer.contains(pos) {
            return Some(Target::Outside);
        }
        if !self.content.contains(pos) {
            return None;
        }
        let x = column - self.content.x;
        let y = row - self.content.y;
        if y == SELECTOR_LINE {
            [
                (span(MONTH_PREV_COL, ARROW_HIT_WIDTH), Target::PrevMonth),
                (
                    span(MONTH_NEXT_COL + 1 - ARROW_HIT_WIDTH, ARROW_HIT_WIDTH),
                    Target::NextMonth,
                ),
                (span(YEAR_PREV_COL, ARROW_HIT_WIDTH), Target::PrevYear),
                (
                    span(YEAR_NEXT_COL + 1 - ARROW_HIT_WIDTH, ARROW_HIT_WIDTH),
                    Target::NextYear,
                ),
            ]
            .into_iter()
            .find_map(|(cols, target)| cols.contains(&x).then_some(target))
        } else if span(FIRST_WEEK_LINE, WEEK_LINES).contains(&y)
            && span(GRID_INDENT, GRID_WIDTH).contains(&x)
        {
            Some(Target::Day {
                row: usize::from(y - FIRST_WEEK_LINE),
                col: usize::from((x - GRID_INDENT) / DAY_WIDTH),
            })
        } else if y == BUTTON_LINE {
            if span(BACK_COL, BACK_LEN).contains(&x) {
                Some(Target::Back)
            } else if span(APPLY_COL, APPLY_LEN).contains(&x) {
                Some(Target::Apply)
            } else {
                None
            }
        } else {
            None
        }
    }
}

fn span(start: u16, width: u16) -> Range<u16> {
    start..start.saturating_add(width)
}

/// Draws the open picker's current page as a popup.  Nothing is drawn if the
/// picker is closed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PickerWidget {
    today: Date,
}

impl PickerWidget {
    /// `today` is used for every day on the page
    pub(crate) fn new(today: Date) -> PickerWidget {
        PickerWidget { today }
    }
}

impl StatefulWidget for PickerWidget {
    type State = DatePicker;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let Some(grid) = state.grid(self.today) else {
            return;
        };
        let layout = PickerLayout::new(area);
        Clear.render(layout.outer, buf);
        Block::new().style(BASE_STYLE).render(layout.outer, buf);
        Block::bordered()
            .title(TITLE)
            .title_alignment(Alignment::Center)
            .render(layout.frame, buf);
        let mut canvas = BufferCanvas::new(layout.content, buf);
        canvas.draw_selectors(grid.position());
        canvas.draw_header();
        for (i, week) in zip(0u16.., grid.weeks()) {
            for (j, cell) in zip(0u16.., week) {
                canvas.draw_day(i, j, cell);
            }
        }
        canvas.draw_buttons();
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_selectors(&mut self, position: NavPosition) {
        self.mvprint(SELECTOR_LINE, MONTH_PREV_COL, PREV_ARROW, ARROW_STYLE);
        self.mvprint(
            SELECTOR_LINE,
            MONTH_NAME_COL,
            position.month().to_string(),
            SELECTOR_STYLE,
        );
        self.mvprint(SELECTOR_LINE, MONTH_NEXT_COL, NEXT_ARROW, ARROW_STYLE);
        self.mvprint(SELECTOR_LINE, YEAR_PREV_COL, PREV_ARROW, ARROW_STYLE);
        self.mvprint(
            SELECTOR_LINE,
            YEAR_COL,
            format!("{:>4}", position.year()),
            SELECTOR_STYLE,
        );
        self.mvprint(SELECTOR_LINE, YEAR_NEXT_COL, NEXT_ARROW, ARROW_STYLE);
    }

    fn draw_header(&mut self) {
        for (j, header) in zip(0u16.., DAY_HEADERS) {
            self.mvprint(
                HEADER_LINE,
                day_col(j),
                format!("{header:>3} "),
                WEEKDAY_STYLE,
            );
        }
    }

    fn draw_day(&mut self, week_no: u16, col: u16, cell: &DayCell) {
        let mut style = if cell.in_month {
            BASE_STYLE
        } else {
            OUTSIDE_MONTH_STYLE
        };
        if cell.is_today {
            style = style.patch(TODAY_STYLE);
        }
        if cell.is_selected && cell.in_month {
            style = style.patch(SELECTED_STYLE);
        }
        let s = if cell.is_today {
            format!("[{:2}]", cell.day())
        } else {
            format!(" {:2} ", cell.day())
        };
        self.mvprint(FIRST_WEEK_LINE + week_no, day_col(col), s, style);
    }

    fn draw_buttons(&mut self) {
        self.mvprint(BUTTON_LINE, BACK_COL, BACK_LABEL, BACK_STYLE);
        self.mvprint(BUTTON_LINE, APPLY_COL, APPLY_LABEL, APPLY_STYLE);
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            self.buf.set_stringn(
                x + self.area.x,
                y + self.area.y,
                s,
                usize::from(self.area.width - x),
                style,
            );
        }
    }
}

/// Column of the content area at which the given weekday column starts
fn day_col(col: u16) -> u16 {
    GRID_INDENT + DAY_WIDTH * col
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::util::{DAYS_IN_WEEK, WEEKS_IN_GRID};
    use ratatui::style::{Color, Modifier};
    use time::macros::date;

    fn open_picker() -> DatePicker {
        let mut picker = DatePicker::new(date!(2024 - 03 - 20));
        picker
            .open(Some(date!(2024 - 03 - 07)), date!(2024 - 03 - 20))
            .expect("date should be in range");
        picker
    }

    fn lines(buffer: &Buffer, xs: Range<u16>, ys: Range<u16>) -> Vec<String> {
        ys.map(|y| xs.clone().map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(usize::from(WEEK_LINES), WEEKS_IN_GRID);
        assert_eq!(usize::from(GRID_WIDTH / DAY_WIDTH), DAYS_IN_WEEK);
        assert_eq!(usize::from(BACK_LEN), BACK_LABEL.chars().count());
        assert_eq!(usize::from(APPLY_LEN), APPLY_LABEL.chars().count());
        assert_eq!((OUTER_WIDTH, OUTER_HEIGHT), (34, 15));
    }

    #[test]
    fn test_render() {
        let mut picker = open_picker();
        let area = Rect::new(0, 0, OUTER_WIDTH, OUTER_HEIGHT);
        let mut buffer = Buffer::empty(area);
        PickerWidget::new(date!(2024 - 03 - 20)).render(area, &mut buffer, &mut picker);
        assert_eq!(
            lines(&buffer, 2..32, 2..13),
            [
                "‹ March     ›         ‹ 2024 ›",
                "                              ",
                "   M   T   W   T   F   S   S  ",
                "  26  27  28  29   1   2   3  ",
                "   4   5   6   7   8   9  10  ",
                "  11  12  13  14  15  16  17  ",
                "  18  19 [20] 21  22  23  24  ",
                "  25  26  27  28  29  30  31  ",
                "   1   2   3   4   5   6   7  ",
                "                              ",
                "[ Back ]             [ Apply ]",
            ]
        );
        let title = lines(&buffer, 0..34, 1..2).concat();
        assert!(title.contains("Select Date"), "{title:?}");
        // Selected: March 7
        assert_eq!(buffer[(16, 6)].bg, Color::Red);
        assert_eq!(buffer[(16, 6)].fg, Color::White);
        // Today: March 20
        assert_eq!(buffer[(12, 8)].fg, Color::LightBlue);
        assert!(buffer[(12, 8)].modifier.contains(Modifier::BOLD));
        // Leading days from February
        assert_eq!(buffer[(4, 5)].fg, Color::DarkGray);
        // An ordinary day
        assert_eq!(buffer[(8, 7)].fg, Color::White);
        assert_eq!(buffer[(8, 7)].bg, Color::Black);
        assert_eq!(buffer[(23, 12)].bg, Color::Blue);
    }

    #[test]
    fn test_render_other_page() {
        let mut picker = open_picker();
        picker
            .navigate_month(time::Month::April)
            .expect("month should be in range");
        let area = Rect::new(0, 0, OUTER_WIDTH, OUTER_HEIGHT);
        let mut buffer = Buffer::empty(area);
        PickerWidget::new(date!(2024 - 03 - 20)).render(area, &mut buffer, &mut picker);
        assert_eq!(
            lines(&buffer, 2..32, 2..11),
            [
                "‹ April     ›         ‹ 2024 ›",
                "                              ",
                "   M   T   W   T   F   S   S  ",
                "   1   2   3   4   5   6   7  ",
                "   8   9  10  11  12  13  14  ",
                "  15  16  17  18  19  20  21  ",
                "  22  23  24  25  26  27  28  ",
                "  29  30   1   2   3   4   5  ",
                "   6   7   8   9  10  11  12  ",
            ]
        );
        for y in 5..11 {
            for x in 2..32 {
                assert_ne!(buffer[(x, y)].bg, Color::Red, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_render_closed() {
        let mut picker = DatePicker::new(date!(2024 - 03 - 20));
        let area = Rect::new(0, 0, OUTER_WIDTH, OUTER_HEIGHT);
        let mut buffer = Buffer::empty(area);
        PickerWidget::new(date!(2024 - 03 - 20)).render(area, &mut buffer, &mut picker);
        assert_eq!(buffer, Buffer::empty(area));
    }

    #[test]
    fn test_render_in_small_area() {
        let mut picker = open_picker();
        let area = Rect::new(0, 0, 20, 6);
        let mut buffer = Buffer::empty(area);
        PickerWidget::new(date!(2024 - 03 - 20)).render(area, &mut buffer, &mut picker);
        assert_eq!(lines(&buffer, 2..18, 2..3), ["‹ March     ›   "]);
    }

    #[test]
    fn test_targets() {
        let layout = PickerLayout::new(Rect::new(0, 0, 80, 25));
        // The popup occupies columns 23-56 and lines 5-19, with its content
        // starting at (25, 7).
        assert_eq!(layout.target_at(0, 0), Some(Target::Outside));
        assert_eq!(layout.target_at(22, 10), Some(Target::Outside));
        assert_eq!(layout.target_at(57, 10), Some(Target::Outside));
        assert_eq!(layout.target_at(30, 20), Some(Target::Outside));
        assert_eq!(layout.target_at(23, 5), None);
        assert_eq!(layout.target_at(24, 6), None);
        assert_eq!(layout.target_at(25, 7), Some(Target::PrevMonth));
        assert_eq!(layout.target_at(26, 7), Some(Target::PrevMonth));
        assert_eq!(layout.target_at(30, 7), None);
        assert_eq!(layout.target_at(37, 7), Some(Target::NextMonth));
        assert_eq!(layout.target_at(47, 7), Some(Target::PrevYear));
        assert_eq!(layout.target_at(50, 7), None);
        assert_eq!(layout.target_at(54, 7), Some(Target::NextYear));
        assert_eq!(layout.target_at(30, 9), None);
        assert_eq!(layout.target_at(25, 10), None);
        assert_eq!(
            layout.target_at(26, 10),
            Some(Target::Day { row: 0, col: 0 })
        );
        assert_eq!(
            layout.target_at(29, 10),
            Some(Target::Day { row: 0, col: 0 })
        );
        assert_eq!(
            layout.target_at(30, 11),
            Some(Target::Day { row: 1, col: 1 })
        );
        assert_eq!(
            layout.target_at(53, 15),
            Some(Target::Day { row: 5, col: 6 })
        );
        assert_eq!(layout.target_at(54, 15), None);
        assert_eq!(layout.target_at(30, 16), None);
        assert_eq!(layout.target_at(25, 17), Some(Target::Back));
        assert_eq!(layout.target_at(32, 17), Some(Target::Back));
        assert_eq!(layout.target_at(40, 17), None);
        assert_eq!(layout.target_at(46, 17), Some(Target::Apply));
        assert_eq!(layout.target_at(54, 17), Some(Target::Apply));
    }
}
