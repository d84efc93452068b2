use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Keys and the action they trigger, e.g. `("← →", "Move")`.
pub(crate) type KeyHelp = (&'static str, &'static str);

/// Single centered line listing the active key bindings.
#[derive(Debug)]
pub(crate) struct HelpLine<'a> {
    items: &'a [KeyHelp],
}

impl<'a> HelpLine<'a> {
    pub(crate) fn new(items: &'a [KeyHelp]) -> Self {
        Self { items }
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const ACTION_STYLE: Style = Style::new().fg(Color::Gray);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);

impl Widget for HelpLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![];
        for (i, (keys, action)) in self.items.iter().copied().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", SEPARATOR_STYLE));
            }
            spans.push(Span::styled(keys, KEY_STYLE));
            spans.push(Span::styled(format!(" {action}"), ACTION_STYLE));
        }
        Line::from(spans).centered().render(area, buf);
    }
}
