//! # TUI Components
//!
//! Every widget on screen, one file per component.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive everything they draw as struct fields and are rebuilt every frame:
//! - `TitleBar`: header with status and theme
//! - `MessageBubble`: one chat message
//! - `TypingIndicator`, `ErrorBanner`, `LandingPage`, `RenderFallback`
//!
//! ### Stateful Components (Event-Driven)
//!
//! Split into a persistent `*State` kept in `TuiState` and a transient
//! component that borrows it for one frame:
//! - `InputBox` / `InputBoxState`: draft editor (cursor and scroll)
//! - `MessageList` / `MessageListState`: scrollable conversation with layout caching
//!
//! Components take data as props rather than reaching into `Conversation`,
//! which keeps them testable against a `TestBackend`.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── message.rs           (single bubble)
//! ├── message_list.rs      (scrollable container)
//! ├── typing_indicator.rs
//! ├── error_banner.rs
//! ├── landing.rs
//! ├── fallback.rs          (shown when a render panics)
//! └── input_box/           (editor, cursor math, wrapping)
//! ```

pub mod error_banner;
pub mod fallback;
pub mod input_box;
pub mod landing;
pub mod message;
pub mod message_list;
mod title_bar;
pub mod typing_indicator;

pub use error_banner::ErrorBanner;
pub use fallback::RenderFallback;
pub use input_box::{InputBox, InputBoxState, InputEvent};
pub use landing::LandingPage;
pub use message::MessageBubble;
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
pub use typing_indicator::TypingIndicator;
