//! Replacement for a surface whose render panicked (see `tui::boundary`).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub struct RenderFallback<'a> {
    pub description: &'a str,
    pub palette: Palette,
}

impl<'a> Component for RenderFallback<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default().fg(self.palette.error);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style)
            .title(" Something went wrong ")
            .title_style(style.add_modifier(Modifier::BOLD));

        let paragraph = Paragraph::new(vec![
            Line::styled("Something went wrong", style.add_modifier(Modifier::BOLD)),
            Line::from(self.description),
        ])
        .block(block)
        .wrap(Wrap { trim: true });

        // The panicking render may have left partial output behind
        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }
}
