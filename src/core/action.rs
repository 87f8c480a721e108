//! # Actions
//!
//! Everything that can happen to a conversation becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Endpoint replies? That's `Action::ReplyReceived(text)`.
//!
//! `update()` takes the current state and an action, mutates the state, and
//! returns an `Effect` describing the I/O the caller must perform. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::message::ChatMessage;
use crate::core::state::{Conversation, READY_STATUS, SEND_FAILURE_MESSAGE};
use crate::core::validation::{ValidationError, validate};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// User asked to send this text.
    Submit(String),
    /// One attempt failed. `attempt` is 1-based.
    AttemptFailed {
        attempt: u32,
        max_attempts: u32,
        will_retry: bool,
    },
    /// The endpoint answered.
    ReplyReceived(String),
    /// Every attempt failed. `cause` is the last transport error (logged only).
    SendFailed { attempts: u32, cause: String },
    Quit,
}

/// Side effect requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Start the request/retry chain for this text.
    Dispatch(String),
    /// Input was refused; nothing was appended.
    Rejected(ValidationError),
    Quit,
}

pub fn update(state: &mut Conversation, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            if state.is_loading {
                debug!("Submit ignored: a send is already in flight");
                return Effect::None;
            }
            if let Err(e) = validate(&text) {
                info!("Input rejected: {:?}", e);
                state.error = Some(e.user_message().to_string());
                return Effect::Rejected(e);
            }

            state.messages.push(ChatMessage::user(text.clone()));
            state.input.clear();
            state.is_loading = true;
            state.is_typing = true;
            state.error = None;
            state.status = String::from("Sending...");
            info!("Dispatching message ({} chars)", text.chars().count());
            Effect::Dispatch(text)
        }
        Action::AttemptFailed {
            attempt,
            max_attempts,
            will_retry,
        } => {
            if will_retry {
                state.status = format!("Retrying (attempt {} of {})...", attempt + 1, max_attempts);
            }
            Effect::None
        }
        Action::ReplyReceived(text) => {
            state.messages.push(ChatMessage::system(text));
            finish(state);
            Effect::None
        }
        Action::SendFailed { attempts, cause } => {
            warn!("Send failed after {} attempts: {}", attempts, cause);
            state.error = Some(SEND_FAILURE_MESSAGE.to_string());
            finish(state);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn finish(state: &mut Conversation) {
    state.is_loading = false;
    state.is_typing = false;
    state.status = String::from(READY_STATUS);
}
