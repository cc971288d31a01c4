use crate::calendar::{Clock, DatePicker, PickerEvent, PickerLayout, PickerWidget, Target};
use crate::help::Help;
use crate::theme::BASE_STYLE;
use crossterm::event::{
    read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::Month;
use tracing::trace;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<C> {
    picker: DatePicker,
    clock: C,
    state: AppState,
    // The area most recently drawn on, used for mapping clicks to targets
    area: Rect,
    outcome: Option<PickerEvent>,
}

impl<C: Clock> App<C> {
    pub(crate) fn new(picker: DatePicker, clock: C) -> App<C> {
        App {
            picker,
            clock,
            state: AppState::Picking,
            area: Rect::default(),
            outcome: None,
        }
    }

    /// Run the picker until it is closed, returning the event it closed
    /// with
    pub(crate) fn run<B: Backend>(
        mut self,
        mut terminal: Terminal<B>,
    ) -> io::Result<PickerEvent> {
        while self.picker.is_open() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(self.outcome.unwrap_or(PickerEvent::Cancelled))
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let event = read()?;
        trace!(?event, "input event");
        if !self.handle_event(&event) {
            self.beep()?;
        }
        Ok(())
    }

    // Returns `false` if the event should be met with a beep
    fn handle_event(&mut self, event: &Event) -> bool {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match *event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                    self.cancel();
                    true
                } else {
                    normal_modifiers.contains(modifiers) && self.handle_key(code)
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => self.handle_click(column, row),
            // Redraw on resize, and we might as well redraw on other stuff
            // too
            _ => true,
        }
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Picking => match key {
                KeyCode::Enter => {
                    self.apply();
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.cancel();
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
        }
    }

    // Returns `false` if navigation ran into the end of time
    fn handle_click(&mut self, column: u16, row: u16) -> bool {
        if self.state == AppState::Helping {
            self.state = AppState::Picking;
            return true;
        }
        let Some(target) = PickerLayout::new(self.area).target_at(column, row) else {
            return true;
        };
        match target {
            Target::PrevMonth => self.step_month(Month::previous),
            Target::NextMonth => self.step_month(Month::next),
            Target::PrevYear => {
                let years = self.picker.years();
                self.step_year(|year| years.prev_before(year))
            }
            Target::NextYear => {
                let years = self.picker.years();
                self.step_year(|year| years.next_after(year))
            }
            Target::Day { row, col } => {
                let today = self.clock.today();
                if let Some(cell) = self
                    .picker
                    .grid(today)
                    .and_then(|grid| grid.cell(row, col).copied())
                {
                    self.picker.pick_day(&cell);
                }
                true
            }
            Target::Apply => {
                self.apply();
                true
            }
            Target::Back | Target::Outside => {
                self.cancel();
                true
            }
        }
    }

    fn step_month<F: FnOnce(Month) -> Month>(&mut self, step: F) -> bool {
        match self.picker.position() {
            Some(position) => self.picker.navigate_month(step(position.month())).is_ok(),
            None => true,
        }
    }

    fn step_year<F: FnOnce(i32) -> i32>(&mut self, step: F) -> bool {
        match self.picker.position() {
            Some(position) => self.picker.navigate_year(step(position.year())).is_ok(),
            None => true,
        }
    }

    fn apply(&mut self) {
        if let Some(event) = self.picker.apply() {
            self.outcome = Some(event);
        }
    }

    fn cancel(&mut self) {
        if let Some(event) = self.picker.cancel() {
            self.outcome = Some(event);
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }
}

impl<C: Clock> Widget for &mut App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.area = area;
        buf.set_style(area, BASE_STYLE);
        PickerWidget::new(self.clock.today()).render(area, buf, &mut self.picker);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
}
