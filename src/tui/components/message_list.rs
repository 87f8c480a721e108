//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Display the message bubbles, oldest first
//! - Show the typing indicator below the newest message while a reply is pending
//! - Keep scroll position (stick to bottom until the user scrolls up)
//! - Cache per-message heights
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and `Messages` (props).
//! Because messages are immutable once appended, a cached height only goes
//! stale when the width changes.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::Messages;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageBubble;
use crate::tui::components::typing_indicator::{TYPING_INDICATOR_HEIGHT, TypingIndicator};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

/// Blank rows between consecutive bubbles.
const MESSAGE_GAP: u16 = 1;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
        }
    }

    fn total_height(&self) -> u16 {
        self.layout.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Whether content exists below the visible window.
    pub fn has_unseen_content(&self) -> bool {
        let max_y = self.total_height().saturating_sub(self.viewport_height);
        !self.stick_to_bottom && self.scroll_state.offset().y < max_y
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a Messages,
    pub is_typing: bool,
    pub spinner_frame: usize,
    pub palette: Palette,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a Messages,
        is_typing: bool,
        spinner_frame: usize,
        palette: Palette,
    ) -> Self {
        Self {
            state,
            messages,
            is_typing,
            spinner_frame,
            palette,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let count = self.messages.len();

        // 1. Update layout cache
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(count, content_width);
        layout.heights.truncate(reusable);
        for message in self.messages.as_slice().iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(MessageBubble::calculate_height(message, content_width) + MESSAGE_GAP);
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(count, content_width);

        let messages_height = self.state.total_height();
        let indicator_height = if self.is_typing { TYPING_INDICATOR_HEIGHT } else { 0 };
        // Prefix sums saturate at u16::MAX; rows past that are never drawn
        let canvas_height = messages_height.saturating_add(indicator_height);

        // 2. Clamp scroll offset to prevent overscrolling past content
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible bubbles into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let Some(message) = self.messages.get(i) else {
                break;
            };
            let height = self.state.layout.heights[i];
            let Some(next_offset) = y_offset.checked_add(height) else {
                break;
            };
            let bubble_rect = Rect::new(0, y_offset, content_width, height - MESSAGE_GAP);
            scroll_view.render_widget(MessageBubble::new(message, self.palette), bubble_rect);
            y_offset = next_offset;
        }

        let indicator_fits = messages_height
            .checked_add(TYPING_INDICATOR_HEIGHT)
            .is_some();
        if self.is_typing && indicator_fits {
            let rect = Rect::new(0, messages_height, content_width, TYPING_INDICATOR_HEIGHT);
            scroll_view.render_widget(
                TypingIndicator {
                    spinner_frame: self.spinner_frame,
                    palette: self.palette,
                },
                rect,
            );
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler is implemented on `MessageListState` rather than `MessageList`
/// because scroll position must outlive the per-frame component.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached layout measurements
pub struct LayoutCache {
    /// Height of each message including the trailing gap.
    pub heights: Vec<u16>,
    /// Running sum of `heights`; `prefix_heights[i]` is the bottom edge of message `i`.
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
        }
    }

    /// Number of cached heights still valid for `message_count` messages at `content_width`.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || message_count < self.message_count {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16) {
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    /// Indices worth drawing for a viewport at `scroll_offset`, padded by half a screen.
    pub fn visible_range(
        &self,
        scroll_offset: u16,
        viewport_height: u16,
    ) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChatMessage;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_layout_cache_reusable() {
        let mut cache = LayoutCache::new();
        cache.update_metadata(5, 80);
        cache.heights = vec![3; 5];

        // Same everything -> all reusable
        assert_eq!(cache.reusable_count(5, 80), 5);
        // New message appended -> existing 5 still valid
        assert_eq!(cache.reusable_count(6, 80), 5);
        // Width changed -> nothing reusable
        assert_eq!(cache.reusable_count(5, 40), 0);
        // Fewer messages than cached (new conversation) -> nothing reusable
        assert_eq!(cache.reusable_count(2, 80), 0);
    }

    #[test]
    fn test_prefix_heights() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![4, 5, 6];
        cache.rebuild_prefix_heights();
        assert_eq!(cache.prefix_heights, vec![4, 9, 15]);
    }

    #[test]
    fn test_visible_range_skips_far_items() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![10; 20]; // 200 rows total
        cache.rebuild_prefix_heights();

        // Viewport 20 rows at offset 100, buffered by 10 each side: rows 90..130
        let range = cache.visible_range(100, 20);
        assert_eq!(range, 9..13);
    }

    #[test]
    fn test_scroll_up_unpins() {
        let mut state = MessageListState::new();
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
    }

    #[test]
    fn test_scroll_down_at_bottom_repins() {
        let mut state = MessageListState::new();
        state.stick_to_bottom = false;
        state.layout.heights = vec![5];
        state.layout.rebuild_prefix_heights();
        state.viewport_height = 20;

        state.handle_event(&TuiEvent::ScrollDown);

        assert!(state.stick_to_bottom);
        assert_eq!(state.scroll_state.offset().y, 0);
    }

    #[test]
    fn test_render_shows_messages_and_typing_indicator() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut messages = Messages::new();
        messages.push(ChatMessage::user("ping"));
        let mut state = MessageListState::new();

        terminal
            .draw(|f| {
                MessageList::new(&mut state, &messages, true, 0, Palette::DARK)
                    .render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("ping"));
        assert!(text.contains("typing..."));
        assert_eq!(state.layout.heights.len(), 1);
    }

    #[test]
    fn test_render_without_typing_hides_indicator() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut messages = Messages::new();
        messages.push(ChatMessage::user("hi"));
        messages.push(ChatMessage::system("hello"));
        let mut state = MessageListState::new();

        terminal
            .draw(|f| {
                MessageList::new(&mut state, &messages, false, 0, Palette::LIGHT)
                    .render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("hello"));
        assert!(!text.contains("typing..."));
    }

    #[test]
    fn test_render_conversation_taller_than_u16_rows() {
        // Narrow terminal: each bubble wraps to roughly 90 rows
        let backend = TestBackend::new(20, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut messages = Messages::new();
        for _ in 0..1000 {
            messages.push(ChatMessage::user("x ".repeat(500)));
        }
        let mut state = MessageListState::new();

        terminal
            .draw(|f| {
                MessageList::new(&mut state, &messages, true, 0, Palette::DARK)
                    .render(f, f.area());
            })
            .unwrap();

        let natural: u32 = state.layout.heights.iter().map(|&h| u32::from(h)).sum();
        assert!(natural > u32::from(u16::MAX));
        assert_eq!(state.layout.prefix_heights.last(), Some(&u16::MAX));
        assert!(state.stick_to_bottom);
    }
}
