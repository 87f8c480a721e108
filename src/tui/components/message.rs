use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::core::ChatMessage;
use crate::tui::component::Component;
use crate::tui::theme::Palette;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
pub const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
pub const VERTICAL_OVERHEAD: u16 = 2;
/// Row reserved for the time label under the text.
const TIMESTAMP_ROWS: u16 = 1;
/// Bubbles never take more than this share of the row.
const MAX_WIDTH_PERCENT: u32 = 70;
/// Floor for the bubble width cap on narrow terminals.
const MIN_BUBBLE_WIDTH: u16 = 16;

const USER_LABEL: &str = "you";
const SYSTEM_LABEL: &str = "zakhar";

/// A single chat bubble: user turns hug the right edge in the primary colour,
/// system turns hug the left edge on the paper colour.
///
/// Like every list item this is created per frame; heights are predicted with
/// [`calculate_height`](Self::calculate_height) using the same `textwrap`
/// options the widget renders with, so scroll math and drawing always agree.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a ChatMessage,
    pub palette: Palette,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a ChatMessage, palette: Palette) -> Self {
        Self { message, palette }
    }

    /// Width of the bubble inside a row of `width` columns.
    pub fn bubble_width(message: &ChatMessage, width: u16) -> u16 {
        if width == 0 {
            return 0;
        }
        let cap = ((u32::from(width) * MAX_WIDTH_PERCENT) / 100) as u16;
        let cap = cap.max(MIN_BUBBLE_WIDTH).min(width);

        let longest_line = message
            .text()
            .trim()
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0);
        let label = message.time_label().width().max(author_label(message).width() + 2);
        let text_width = longest_line
            .max(label)
            .min(usize::from(u16::MAX - HORIZONTAL_OVERHEAD)) as u16;
        let natural = text_width + HORIZONTAL_OVERHEAD;

        natural.min(cap)
    }

    /// Rows needed to draw `message` in a row of `width` columns.
    pub fn calculate_height(message: &ChatMessage, width: u16) -> u16 {
        let inner = Self::bubble_width(message, width).saturating_sub(HORIZONTAL_OVERHEAD);
        if inner == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            return 1;
        }
        let lines = wrap(message.text(), inner).len() as u16;
        lines.max(1) + TIMESTAMP_ROWS + VERTICAL_OVERHEAD
    }

    fn styles(&self) -> (Style, Style) {
        if self.message.is_user() {
            (
                Style::default().bg(self.palette.primary).fg(self.palette.on_primary),
                Style::default().fg(self.palette.primary_light),
            )
        } else {
            (
                Style::default().bg(self.palette.paper).fg(self.palette.text),
                Style::default().fg(self.palette.secondary),
            )
        }
    }
}

fn author_label(message: &ChatMessage) -> &'static str {
    if message.is_user() { USER_LABEL } else { SYSTEM_LABEL }
}

fn wrap(text: &str, width: u16) -> Vec<String> {
    let content = text.trim();
    if content.is_empty() {
        return Vec::new();
    }
    let options = textwrap::Options::new(usize::from(width))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    textwrap::wrap(content, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

impl<'a> Widget for MessageBubble<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = Self::bubble_width(self.message, area.width);
        if width == 0 || area.height == 0 {
            return;
        }
        let x = if self.message.is_user() {
            area.x + area.width - width
        } else {
            area.x
        };
        let bubble = Rect::new(x, area.y, width, area.height);
        let (body_style, border_style) = self.styles();

        let block = Block::bordered()
            .title(author_label(self.message))
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style.add_modifier(Modifier::BOLD))
            .padding(Padding::horizontal(CONTENT_PAD_H))
            .style(body_style);

        let inner = block.inner(bubble);
        block.render(bubble, buf);
        if inner.width == 0 {
            return;
        }

        let mut lines: Vec<Line> = wrap(self.message.text(), inner.width)
            .into_iter()
            .map(Line::from)
            .collect();
        lines.push(
            Line::from(Span::styled(
                self.message.time_label(),
                body_style.add_modifier(Modifier::DIM),
            ))
            .alignment(Alignment::Right),
        );

        Paragraph::new(lines).style(body_style).render(inner, buf);
    }
}

impl<'a> Component for MessageBubble<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
