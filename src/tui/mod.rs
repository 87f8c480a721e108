//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Sends run on the tokio runtime. The spawned task reports progress back
//! through a std `mpsc` channel as `Action`s, which the loop drains and feeds
//! to `core::update` between frames, so the conversation state is only ever
//! touched on this thread.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (reply pending): draws every ~80ms for the typing spinner.
//! - **Idle**: sleeps up to 500ms, only redraws on events or background actions.

pub mod boundary;
mod component;
pub mod components;
pub mod event;
pub mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::api::{ChatClient, HttpChatClient};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::retry::{RetryPolicy, send_with_retry};
use crate::core::state::Conversation;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBoxState, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::theme::Appearance;

/// TUI-specific presentation state (not part of the conversation)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBoxState,
    pub appearance: Appearance,
}

impl TuiState {
    pub fn new(appearance: Appearance) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBoxState::new(),
            appearance,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Keyboard enhancement lets Shift+Enter be told apart from Enter;
        // terminals without it ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn build_client(config: &ResolvedConfig) -> Arc<dyn ChatClient> {
    Arc::new(HttpChatClient::new(config.base_url.clone()))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client = build_client(&config);
    info!("Chat endpoint: {}", config.base_url);
    let retry = config.retry;

    let mut app = Conversation::new();
    let mut tui = TuiState::new(Appearance::resolve(config.theme));

    let mut terminal = ratatui::init();
    boundary::install_panic_hook();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.is_typing;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::Quit | TuiEvent::ForceQuit => {
                    if update(&mut app, Action::Quit) == Effect::Quit {
                        should_quit = true;
                    }
                }
                TuiEvent::ToggleTheme => {
                    tui.appearance = tui.appearance.toggled();
                    debug!("Theme toggled to {}", tui.appearance.label());
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    tui.message_list.handle_event(&event);
                }
                // Input is disabled while a reply is pending
                _ if app.is_loading => {}
                _ => {
                    let input_event = tui.input_box.handle_event(&event, &mut app.input);
                    if input_event == Some(InputEvent::Submit) {
                        let draft = app.input.clone();
                        let effect = update(&mut app, Action::Submit(draft));
                        handle_effect(effect, &retry, &client, &tx, &mut should_quit);
                        // Show the new message even if the user had scrolled up
                        tui.message_list.stick_to_bottom = true;
                    }
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            handle_effect(effect, &retry, &client, &tx, &mut should_quit);
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

fn handle_effect(
    effect: Effect,
    retry: &RetryPolicy,
    client: &Arc<dyn ChatClient>,
    tx: &mpsc::Sender<Action>,
    should_quit: &mut bool,
) {
    match effect {
        Effect::Dispatch(text) => spawn_send(client.clone(), text, *retry, tx.clone()),
        Effect::Rejected(reason) => debug!("Submit rejected: {}", reason),
        Effect::Quit => *should_quit = true,
        Effect::None => {}
    }
}

/// Run the request/retry chain on the runtime, reporting back as actions.
fn spawn_send(
    client: Arc<dyn ChatClient>,
    text: String,
    policy: RetryPolicy,
    tx: mpsc::Sender<Action>,
) {
    info!(
        "Spawning chat request via {} ({} chars)",
        client.name(),
        text.chars().count()
    );
    tokio::spawn(async move {
        let progress = tx.clone();
        let result = send_with_retry(client.as_ref(), &text, &policy, |failure| {
            let action = Action::AttemptFailed {
                attempt: failure.attempt,
                max_attempts: failure.max_attempts,
                will_retry: failure.will_retry,
            };
            if progress.send(action).is_err() {
                warn!("Failed to report attempt failure: receiver dropped");
            }
        })
        .await;

        let action = match result {
            Ok(reply) => Action::ReplyReceived(reply),
            Err(exhausted) => Action::SendFailed {
                attempts: exhausted.attempts,
                cause: exhausted.last_error.to_string(),
            },
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver chat result: receiver dropped");
        }
    });
}
