use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const SELECTOR_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const ARROW_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const OUTSIDE_MONTH_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

// The following are patched onto the style of the day they apply to:

pub(crate) const TODAY_STYLE: Style = Style::new()
    .fg(Color::LightBlue)
    .add_modifier(Modifier::BOLD);

pub(crate) const SELECTED_STYLE: Style = Style::new().fg(Color::White).bg(Color::Red);

pub(crate) mod buttons {
    use super::*;

    pub(crate) const BACK_STYLE: Style = BASE_STYLE.fg(Color::Gray);

    pub(crate) const APPLY_STYLE: Style = Style::new()
        .fg(Color::White)
        .bg(Color::Blue)
        .add_modifier(Modifier::BOLD);
}
