//! # Landing Page Component
//!
//! Greeting shown in place of the message list while the conversation is empty.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme::Palette;

const GREETING: &str = "Hi! I'm Zakhar, your AI assistant.";
const CAPABILITIES: [&str; 3] = [
    "• Answer your questions",
    "• Chat about any topic",
    "• Speak many languages",
];
const PROMPT: &str = "Type a message below to get started.";

pub struct LandingPage {
    pub palette: Palette,
}

impl LandingPage {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let muted = Style::default().fg(self.palette.text_muted);
        let mut lines = vec![
            Line::from(Span::styled(
                "Zakhar AI",
                Style::default()
                    .fg(self.palette.secondary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(GREETING, Style::default().fg(self.palette.text))),
            Line::from(""),
        ];
        lines.extend(CAPABILITIES.iter().map(|c| Line::from(Span::styled(*c, muted))));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(PROMPT, muted)));
        lines.push(Line::from(Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            muted.add_modifier(Modifier::DIM),
        )));
        lines
    }
}

impl Component for LandingPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let height = lines.len() as u16;
        let [centered] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
    }
}
