use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Components are built fresh each frame from props (the conversation, the
/// palette, persistent `*State` structs borrowed mutably). `render` takes
/// `&mut self` so a component can write back into borrowed state, e.g. the
/// message list updating its height cache and scroll offset.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Persistent presentation state that reacts to terminal events.
pub trait EventHandler {
    /// Higher-level event reported to the event loop.
    type Event;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
