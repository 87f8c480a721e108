//! # Conversation Controller
//!
//! Drives one full send in a single `await`: validation and the optimistic
//! append go through `update()`, then the retry chain runs inline and its
//! outcome is fed back through `update()` as well.
//!
//! The TUI does the same thing split across a background task and a channel
//! (see `tui::spawn_send`); both paths share the reducer, so state
//! transitions are identical.

use std::sync::Arc;

use log::debug;

use crate::api::ChatClient;
use crate::core::action::{Action, Effect, update};
use crate::core::retry::{RetryPolicy, send_with_retry};
use crate::core::state::Conversation;
use crate::core::validation::ValidationError;

/// How a call to [`ConversationController::send`] ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Input failed validation; nothing was sent or appended.
    Rejected(ValidationError),
    /// A send was already in flight.
    Busy,
    /// The endpoint replied after `attempts` tries.
    Replied { attempts: u32 },
    /// Every attempt failed; the user message stays in the conversation.
    Failed { attempts: u32 },
}

pub struct ConversationController {
    pub state: Conversation,
    client: Arc<dyn ChatClient>,
    retry: RetryPolicy,
}

impl ConversationController {
    pub fn new(client: Arc<dyn ChatClient>, retry: RetryPolicy) -> Self {
        Self {
            state: Conversation::new(),
            client,
            retry,
        }
    }

    /// Validates `input`, appends it, and sends it with retries.
    pub async fn send(&mut self, input: &str) -> SendOutcome {
        let text = match update(&mut self.state, Action::Submit(input.to_string())) {
            Effect::Dispatch(text) => text,
            Effect::Rejected(e) => return SendOutcome::Rejected(e),
            Effect::None | Effect::Quit => return SendOutcome::Busy,
        };

        let state = &mut self.state;
        let mut attempts = 1;
        let result = send_with_retry(self.client.as_ref(), &text, &self.retry, |failure| {
            attempts = failure.attempt + 1;
            update(
                state,
                Action::AttemptFailed {
                    attempt: failure.attempt,
                    max_attempts: failure.max_attempts,
                    will_retry: failure.will_retry,
                },
            );
        })
        .await;

        match result {
            Ok(reply) => {
                debug!("Reply after {} attempt(s)", attempts);
                update(&mut self.state, Action::ReplyReceived(reply));
                SendOutcome::Replied { attempts }
            }
            Err(exhausted) => {
                let attempts = exhausted.attempts;
                update(
                    &mut self.state,
                    Action::SendFailed {
                        attempts,
                        cause: exhausted.last_error.to_string(),
                    },
                );
                SendOutcome::Failed { attempts }
            }
        }
    }
}
