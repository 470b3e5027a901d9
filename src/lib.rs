//! LazyLogbook - a terminal admin console for trainees, divisions and
//! attendance logbooks.
//!
//! Records live in a JSON document store. Every list screen is a
//! [`ui::DataTable`]: searchable, paginated and with per-row actions.

pub mod app;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod forms;
pub mod logging;
pub mod models;
pub mod store;
pub mod tasks;
pub mod ui;

pub use app::{App, AppState};
pub use error::{AppError, Result};
