//! Divisions that users are assigned to.

use serde::{Deserialize, Serialize};

use super::Record;

/// An organizational division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    /// Document key.
    #[serde(default)]
    pub id: String,
    /// Sequential number assigned when the division is created.
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub name: String,
}

impl Division {
    /// Create a division that has not been stored yet.
    pub fn new(code: u32, name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            code,
            name: name.into(),
        }
    }
}

impl Record for Division {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone()]
    }
}
