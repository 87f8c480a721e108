use crate::core::state::Conversation;
use crate::tui::TuiState;
use crate::tui::boundary;
use crate::tui::component::Component;
use crate::tui::components::{
    ErrorBanner, InputBox, InputBoxState, LandingPage, MessageList, RenderFallback, TitleBar,
};
use crate::tui::theme::Palette;

use log::warn;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

/// Screen layout, top to bottom: header, conversation, error banner (only
/// when an error is set), input.
pub fn draw_ui(frame: &mut Frame, app: &Conversation, tui: &mut TuiState, spinner_frame: usize) {
    let palette = tui.appearance.palette();
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        area,
    );

    use Constraint::{Length, Min};
    let banner_height = app
        .error
        .as_deref()
        .map_or(0, |msg| ErrorBanner::calculate_height(msg, area.width));
    let input_height = InputBoxState::calculate_height(&app.input, area.width);
    let layout = Layout::vertical([
        Length(1),
        Min(0),
        Length(banner_height),
        Length(input_height),
    ]);
    let [title_area, main_area, banner_area, input_area] = layout.areas(area);

    render_guarded(frame, main_area, palette, |frame| {
        if app.messages.is_empty() && !app.is_typing {
            LandingPage::new(palette).render(frame, main_area);
        } else {
            MessageList::new(
                &mut tui.message_list,
                &app.messages,
                app.is_typing,
                spinner_frame,
                palette,
            )
            .render(frame, main_area);
        }
    });

    TitleBar::new(
        &app.status,
        tui.appearance,
        tui.message_list.has_unseen_content(),
    )
    .render(frame, title_area);

    if let Some(error) = app.error.as_deref() {
        ErrorBanner::new(error, palette).render(frame, banner_area);
    }

    InputBox::new(&mut tui.input_box, &app.input, app.is_loading, palette)
        .render(frame, input_area);
}

/// Draws `draw` into `area`; if it panics, the area shows a fallback instead
/// and the rest of the frame carries on.
fn render_guarded(
    frame: &mut Frame,
    area: Rect,
    palette: Palette,
    draw: impl FnOnce(&mut Frame),
) {
    if let Err(description) = boundary::guard(|| draw(frame)) {
        warn!("Conversation view failed to render: {}", description);
        RenderFallback {
            description: &description,
            palette,
        }
        .render(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChatMessage;
    use crate::tui::theme::Appearance;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &Conversation, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_empty_conversation_shows_landing() {
        let app = Conversation::new();
        let mut tui = TuiState::new(Appearance::Dark);
        let text = draw(&app, &mut tui);

        assert!(text.contains("Zakhar AI"));
        assert!(text.contains("Hi! I'm Zakhar"));
        assert!(text.contains("Type your message..."));
    }

    #[test]
    fn test_conversation_with_error_and_typing() {
        let mut app = Conversation::new();
        app.messages.push(ChatMessage::user("hello there"));
        app.is_loading = true;
        app.is_typing = true;
        app.error = Some("Message cannot be empty.".to_string());
        let mut tui = TuiState::new(Appearance::Light);

        let text = draw(&app, &mut tui);

        assert!(text.contains("hello there"));
        assert!(text.contains("typing..."));
        assert!(text.contains("Message cannot be empty."));
        assert!(text.contains("Waiting for reply..."));
        assert!(!text.contains("Hi! I'm Zakhar"));
    }

    #[test]
    fn test_background_follows_appearance() {
        let app = Conversation::new();
        let mut tui = TuiState::new(Appearance::Light);
        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, &app, &mut tui, 0)).unwrap();

        let cell = &terminal.backend().buffer()[(0, 5)];
        assert_eq!(cell.bg, Palette::LIGHT.background);
    }

    #[test]
    fn test_render_fault_shows_fallback() {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render_guarded(f, area, Palette::DARK, |_| panic!("layout exploded"));
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Something went wrong"));
        assert!(text.contains("layout exploded"));
    }
}
