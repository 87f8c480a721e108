//! # Messages
//!
//! One turn of the conversation and the append-only sequence that holds them.
//!
//! ```text
//! Messages
//! ├── [0] ChatMessage { "hi",    is_user: true  }   // oldest
//! ├── [1] ChatMessage { "hello", is_user: false }
//! └── ...                                           // newest last
//! ```
//!
//! `Messages` only grows. There is no removal, reordering, or `&mut` access
//! to an appended item.

use chrono::{DateTime, Local};

/// A single turn in the conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    text: String,
    is_user: bool,
    timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    fn new(text: impl Into<String>, is_user: bool) -> Self {
        Self {
            text: text.into(),
            is_user,
            timestamp: Local::now(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_user(&self) -> bool {
        self.is_user
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Wall-clock label shown under the message (e.g. `14:03:27`).
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

/// Ordered, append-only conversation sequence (oldest first).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Messages {
    items: Vec<ChatMessage>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends at the end. There is no way to remove or reorder.
    pub fn push(&mut self, message: ChatMessage) {
        self.items.push(message);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ChatMessage> {
        self.items.get(index)
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.items.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatMessage> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[ChatMessage] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a Messages {
    type Item = &'a ChatMessage;
    type IntoIter = std::slice::Iter<'a, ChatMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
