//! # Render Boundary
//!
//! Catches panics raised while drawing one part of the screen so the caller
//! can draw a fallback there instead of tearing down the whole UI.
//!
//! `ratatui::init()` installs a panic hook that restores the terminal. Inside
//! a boundary that would leave us drawing into a cooked terminal, so
//! [`install_panic_hook`] wraps the existing hook and skips it while a
//! boundary is active.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

use log::error;

thread_local! {
    static IN_BOUNDARY: Cell<bool> = const { Cell::new(false) };
}

/// Wraps the current panic hook. Call after `ratatui::init()`.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if IN_BOUNDARY.with(Cell::get) {
            error!("Render fault caught by boundary: {}", info);
            return;
        }
        previous(info);
    }));
}

/// Runs `f`, turning a panic into `Err(description)`.
pub fn guard<R>(f: impl FnOnce() -> R) -> Result<R, String> {
    let was_inside = IN_BOUNDARY.with(|flag| flag.replace(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    IN_BOUNDARY.with(|flag| flag.set(was_inside));
    result.map_err(|payload| panic_payload_message(payload.as_ref()))
}

pub fn panic_payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown render fault".to_string()
    }
}
