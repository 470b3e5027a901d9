//! The signed-in operator.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};
use crate::models::Role;

/// The administrator using the console.
///
/// Sign-in itself is handled elsewhere; the console only needs to know who
/// is operating it and with which role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Operator {
    /// The operator's user document key.
    pub id: String,

    /// Display name shown in the status bar.
    #[serde(default)]
    pub name: String,

    /// Either `admin` or `super.admin`.
    pub role: Role,
}

impl Operator {
    /// Create a new operator.
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }

    /// Check whether the operator may manage other administrators.
    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }

    /// Name for display, falling back to the id.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Validate this operator.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` if the id is empty or contains
    /// whitespace, or if the role is not an administrator role.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(ConfigError::ValidationError(
                "operator id cannot be empty".to_string(),
            ));
        }

        if self.id.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "operator id '{}' cannot contain whitespace",
                self.id
            )));
        }

        if !self.role.is_staff() {
            return Err(ConfigError::ValidationError(format!(
                "operator '{}': role must be admin or super.admin",
                self.id
            )));
        }

        Ok(())
    }
}
