//! # ErrorBanner Component
//!
//! Alert strip bound to `Conversation::error`. It has no dismiss action: the
//! next send clears the error, and a new failure replaces the text.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub struct ErrorBanner<'a> {
    pub message: &'a str,
    pub palette: Palette,
}

impl<'a> ErrorBanner<'a> {
    pub fn new(message: &'a str, palette: Palette) -> Self {
        Self { message, palette }
    }

    /// Rows needed for `message` at `width` (borders included).
    pub fn calculate_height(message: &str, width: u16) -> u16 {
        // 2 borders + "! " prefix
        let inner = usize::from(width.saturating_sub(4));
        if inner == 0 {
            return 3;
        }
        let lines = textwrap::wrap(message, inner).len().max(1) as u16;
        lines + 2
    }
}

impl<'a> Component for ErrorBanner<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default().fg(self.palette.error);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style)
            .style(Style::default().bg(self.palette.paper));

        let text = Line::from(vec![
            Span::styled("! ", style.add_modifier(Modifier::BOLD)),
            Span::styled(self.message, style),
        ]);
        let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
