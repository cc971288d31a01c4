use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

/// Pairs of inputs and what they do
static COMMANDS: &[(&str, &str)] = &[
    ("Click ‹ or ›", "Change the month or year"),
    ("Click a day", "Select it"),
    ("ENTER, Apply", "Accept the selected date"),
    ("ESC, q, Back", "Close without a date"),
    ("Click outside", "Close without a date"),
    ("?", "Show this help"),
];

static DISMISS: &str = "Press the Any Key to dismiss.";

/// Columns between the longest input and its description
const GUTTER: usize = 3;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Help {
    fn text() -> Text<'static> {
        let key_width = COMMANDS
            .iter()
            .map(|(keys, _)| keys.chars().count())
            .max()
            .unwrap_or_default()
            + GUTTER;
        let mut lines = COMMANDS
            .iter()
            .map(|(keys, action)| Line::raw(format!("{keys:key_width$}{action}")))
            .collect::<Vec<_>>();
        lines.push(Line::raw(""));
        lines.push(Line::raw(DISMISS));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        // Text plus border, plus a column of padding on either side
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(area.width);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let [outer_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [outer_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Paragraph::new(text)
            .style(self.0)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center)
                    .padding(Padding::horizontal(1)),
            )
            .render(outer_area, buf);
    }
}
