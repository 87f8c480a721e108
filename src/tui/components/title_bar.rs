//! # TitleBar Component
//!
//! Single-row header: app name on the left, status and theme on the right.
//!
//! Purely presentational. The status string comes from `Conversation`, the
//! appearance and the "↓ New" flag come from TUI state; the bar only renders
//! what it is given.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ Zakhar AI               Sending... | ↓ New | dark · Ctrl+T │
//! └────────────────────────────────────────────────────────────┘
//! ```

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme::Appearance;

pub const APP_TITLE: &str = "Zakhar AI";
const THEME_HINT: &str = "Ctrl+T";

pub struct TitleBar<'a> {
    /// Transient status (e.g. "Ready", "Retrying (attempt 2 of 4)...")
    pub status: &'a str,
    pub appearance: Appearance,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(status: &'a str, appearance: Appearance, has_unseen_content: bool) -> Self {
        Self {
            status,
            appearance,
            has_unseen_content,
        }
    }

    fn right_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if !self.status.is_empty() {
            parts.push(self.status.to_string());
        }
        if self.has_unseen_content {
            parts.push("↓ New".to_string());
        }
        parts.push(format!("{} · {}", self.appearance.label(), THEME_HINT));
        format!("{} ", parts.join(" | "))
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = self.appearance.palette();
        let bar = Style::default().bg(palette.primary).fg(palette.on_primary);

        let title = Line::from(Span::styled(
            format!(" {}", APP_TITLE),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(title).style(bar), area);

        let right = Line::from(self.right_text());
        frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), area);
    }
}
