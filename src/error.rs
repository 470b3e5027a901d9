//! Centralized error types for LazyLogbook.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror` for
//! ergonomic error handling.

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

/// The main application error type.
///
/// This enum aggregates all error types that can occur in LazyLogbook,
/// providing user-friendly error messages while preserving the underlying
/// error context for debugging.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Document store errors.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    ///
    /// This returns a message suitable for showing to users in the UI,
    /// without technical jargon or stack traces.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create configuration directory. Check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file exists and is readable.".to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Store(e) => match e {
                StoreError::NotFound { .. } => {
                    "The record no longer exists. It may have been deleted.".to_string()
                }
                StoreError::Io(_) => {
                    "Could not access the data file. Please check file permissions.".to_string()
                }
                StoreError::Parse(_) => {
                    "The data file is corrupted and could not be read.".to_string()
                }
                StoreError::InvalidDocument { collection, id, .. } => {
                    format!("Record {}/{} has an unexpected format.", collection, id)
                }
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Check if this error is critical and requires user acknowledgment.
    ///
    /// Critical errors prevent the console from working with its data.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Config(_)
                | AppError::Store(StoreError::Io(_))
                | AppError::Store(StoreError::Parse(_))
                | AppError::Terminal(_)
        )
    }

    /// Check if this error is recoverable.
    ///
    /// Recoverable errors leave the console usable; reloading the screen is
    /// usually enough.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Store(StoreError::NotFound { .. })
                | AppError::Store(StoreError::InvalidDocument { .. })
                | AppError::Other(_)
        )
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::NoConfigDir)
            | AppError::Config(ConfigError::ReadError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Run 'lazylogbook init' to create a configuration file.")
            }
            AppError::Store(StoreError::NotFound { .. }) => {
                Some("Press 'r' to reload the list.")
            }
            AppError::Store(StoreError::Parse(_)) => {
                Some("Restore the data file from a backup or pass --data with another file.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
