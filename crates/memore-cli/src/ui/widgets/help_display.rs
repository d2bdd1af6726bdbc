use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// A key and what it does, e.g. `("Enter", "Start")`.
pub type KeyHelp = (&'static str, &'static str);

/// One centered line of key help.
#[derive(Debug)]
pub struct HelpDisplay<'a> {
    keys: &'a [KeyHelp],
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const TEXT_STYLE: Style = Style::new().fg(Color::Gray);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);

impl<'a> HelpDisplay<'a> {
    pub fn new(keys: &'a [KeyHelp]) -> Self {
        Self { keys }
    }
}

impl Widget for HelpDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let mut spans = vec![];
        for (i, (key, text)) in self.keys.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", SEPARATOR_STYLE));
            }
            spans.push(Span::styled(*key, KEY_STYLE));
            spans.push(Span::styled(format!(" {text}"), TEXT_STYLE));
        }
        Line::from(spans).centered().render(area, buf);
    }
}
