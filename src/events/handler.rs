//! Event handler implementation.
//!
//! Polls for terminal events and converts them to application events.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};

use super::Event;
use crate::config::DEFAULT_TICK_RATE_MS;

/// Handles application events by polling crossterm for terminal events.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler with the default tick rate.
    pub fn new() -> Self {
        Self::with_tick_rate(DEFAULT_TICK_RATE_MS)
    }

    /// Create a new event handler with a custom tick rate.
    pub fn with_tick_rate(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event.
    ///
    /// Blocks until an event is available or the tick rate elapses, in which
    /// case `Event::Tick` is returned. Key releases and mouse or focus events
    /// are reported as ticks too.
    pub fn next(&self) -> std::io::Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }
        Ok(convert(event::read()?))
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn convert(event: CrosstermEvent) -> Event {
    match event {
        // Windows reports both press and release
        CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Event::Key(key),
        CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
        CrosstermEvent::Paste(text) => Event::Paste(text),
        _ => Event::Tick,
    }
}
