//! # Conversation State
//!
//! Everything the conversation view renders, in one place. No TUI types here;
//! presentation state (scroll, cursor, theme) lives in the `tui` module.
//!
//! ```text
//! Conversation
//! ├── messages: Messages        // append-only, oldest first
//! ├── input: String             // input buffer
//! ├── is_loading: bool          // a send chain is in flight
//! ├── is_typing: bool           // typing indicator (tracks is_loading)
//! ├── error: Option<String>     // banner text
//! └── status: String            // status line text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::message::Messages;

/// Status line text when nothing is in flight.
pub const READY_STATUS: &str = "Ready";

/// Banner text once every retry has failed.
pub const SEND_FAILURE_MESSAGE: &str =
    "Sorry, something went wrong while processing your request. Please try again.";

#[derive(Debug, Clone)]
pub struct Conversation {
    pub messages: Messages,
    pub input: String,
    pub is_loading: bool,
    pub is_typing: bool,
    pub error: Option<String>,
    pub status: String,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: Messages::new(),
            input: String::new(),
            is_loading: false,
            is_typing: false,
            error: None,
            status: String::from(READY_STATUS),
        }
    }

    /// Whether the send affordance is enabled.
    pub fn can_send(&self) -> bool {
        !self.is_loading && !self.input.trim().is_empty()
    }
}
