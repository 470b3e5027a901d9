//! Application settings configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::store::Environment;
use crate::ui::PageSize;

/// Default UI tick rate in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 250;

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which set of collections to read and write.
    pub environment: Environment,
    /// Location of the JSON document store.
    ///
    /// Defaults to `store.json` in the local data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    /// Rows per table page. Must be 20, 40, 50 or 100.
    pub page_size: PageSize,
    /// Whether to use vim-style keybindings.
    pub vim_mode: bool,
    /// How often the UI redraws without input, in milliseconds.
    pub tick_rate_ms: u64,
}

impl Settings {
    /// Resolved path of the document store.
    pub fn data_file(&self) -> Option<PathBuf> {
        self.data_file.clone().or_else(default_data_file)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            data_file: None,
            page_size: PageSize::default(),
            vim_mode: true,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

/// `store.json` in the platform's local data directory.
pub fn default_data_file() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("lazylogbook").join("store.json"))
}
