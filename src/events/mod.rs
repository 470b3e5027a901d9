//! Terminal event handling.
//!
//! Crossterm events are polled with a tick timeout and converted into the
//! application's own [`Event`] type.

mod handler;
mod keys;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;
pub use keys::{get_context_hints, get_keybindings_grouped, KeyBindings, KeyContext, Keybinding};

/// An input event for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// The terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Text pasted into the terminal.
    Paste(String),
    /// No input within the tick rate.
    Tick,
}
