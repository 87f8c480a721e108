//! # Core Application Logic
//!
//! This module contains Zakhar's conversation logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Conversation (state) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • send_with_retry()    │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                         ┌──────────────┐
//!     │    TUI     │                         │  Controller  │
//!     │  Adapter   │                         │ (inline send)│
//!     │ (ratatui)  │                         │              │
//!     └────────────┘                         └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Conversation` struct holding all conversation state
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`validation`]: Input checks run before a message is accepted
//! - [`retry`]: Bounded sequential retry around the chat call
//! - [`controller`]: One-call `send()` composed from the above

pub mod action;
pub mod config;
pub mod controller;
pub mod message;
pub mod retry;
pub mod state;
pub mod validation;

pub use action::{Action, Effect, update};
pub use controller::{ConversationController, SendOutcome};
pub use message::{ChatMessage, Messages};
pub use retry::{RetryPolicy, send_with_retry};
pub use state::Conversation;
pub use validation::{MAX_MESSAGE_CHARS, ValidationError, validate};
