//! Left-aligned "typing…" bubble shown while a reply is pending.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::tui::theme::Palette;

pub const TYPING_INDICATOR_HEIGHT: u16 = 3;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const LABEL: &str = "typing...";

pub struct TypingIndicator {
    pub spinner_frame: usize,
    pub palette: Palette,
}

impl TypingIndicator {
    pub fn spinner_glyph(frame: usize) -> &'static str {
        SPINNER[frame % SPINNER.len()]
    }

    fn width() -> u16 {
        // glyph + space + label + borders + padding
        (1 + 1 + LABEL.len() as u16) + 4
    }
}

impl Widget for TypingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = Rect::new(
            area.x,
            area.y,
            Self::width().min(area.width),
            TYPING_INDICATOR_HEIGHT.min(area.height),
        );
        let body = Style::default().bg(self.palette.paper).fg(self.palette.text_muted);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.palette.secondary))
            .padding(Padding::horizontal(1))
            .style(body);

        let line = Line::from(vec![
            Span::styled(
                Self::spinner_glyph(self.spinner_frame),
                Style::default().fg(self.palette.secondary),
            ),
            Span::raw(" "),
            Span::raw(LABEL),
        ]);
        Paragraph::new(line).block(block).render(rect, buf);
    }
}
