//! JSON document store.
//!
//! The store keeps every collection of the current environment in a single
//! JSON file shaped as `{ collection: { document_id: document } }`. Each
//! document's key is injected as its `id` when it is read back, and stripped
//! again when it is written.
//!
//! All operations work on the in-memory copy; call [`DocumentStore::save`]
//! to persist.

mod error;

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use crate::models::{Division, Logbook, Role, User};

pub use error::{Result, StoreError};

/// Deployment environment, which selects the collection names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Collection names used in this environment.
    pub fn collections(&self) -> CollectionNames {
        match self {
            Environment::Development => CollectionNames {
                users: "DevUsers",
                divisions: "DevDivisions",
                logbooks: "DevLogbooks",
            },
            Environment::Production => CollectionNames {
                users: "Users",
                divisions: "Divisions",
                logbooks: "Logbooks",
            },
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// The collection names of one environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionNames {
    pub users: &'static str,
    pub divisions: &'static str,
    pub logbooks: &'static str,
}

/// Which users to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFilter {
    /// Users with the trainee role.
    Trainees,
    /// Everyone who is not a trainee.
    Staff,
    All,
}

impl UserFilter {
    fn accepts(&self, user: &User) -> bool {
        match self {
            UserFilter::Trainees => user.role == Role::Trainee,
            UserFilter::Staff => user.role != Role::Trainee,
            UserFilter::All => true,
        }
    }
}

type Collection = BTreeMap<String, Value>;

/// A document store backed by a JSON file.
#[derive(Debug)]
pub struct DocumentStore {
    path: PathBuf,
    environment: Environment,
    collections: BTreeMap<String, Collection>,
}

impl DocumentStore {
    /// Open the store at `path`.
    ///
    /// A missing file yields an empty store; it is created on the first save.
    pub fn open(path: impl Into<PathBuf>, environment: Environment) -> Result<Self> {
        let path = path.into();
        let collections = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Store file does not exist yet, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        info!(path = %path.display(), %environment, "Opened document store");
        Ok(Self {
            path,
            environment,
            collections,
        })
    }

    /// Write the store to disk as pretty JSON.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.collections)?;
        fs::write(&self.path, content)?;
        trace!(path = %self.path.display(), "Saved document store");
        Ok(())
    }

    /// Apply `change` and save the result.
    ///
    /// If either the change or the save fails, the in-memory collections are
    /// put back as they were, so memory never runs ahead of the file.
    pub fn commit<T, F>(&mut self, change: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let snapshot = self.collections.clone();
        let result = change(self).and_then(|value| self.save().map(|()| value));
        if let Err(e) = &result {
            warn!(error = %e, "Store change failed, rolling back");
            self.collections = snapshot;
        }
        result
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The environment this store reads from.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    fn names(&self) -> CollectionNames {
        self.environment.collections()
    }

    // ========================================================================
    // Generic document access
    // ========================================================================

    fn decode<T: DeserializeOwned>(collection: &str, id: &str, document: &Value) -> Result<T> {
        let mut document = document.clone();
        match document.as_object_mut() {
            Some(fields) => {
                fields.insert("id".to_string(), Value::String(id.to_string()));
            }
            None => {
                return Err(StoreError::InvalidDocument {
                    collection: collection.to_string(),
                    id: id.to_string(),
                    reason: "document is not an object".to_string(),
                })
            }
        }
        serde_json::from_value(document).map_err(|e| StoreError::InvalidDocument {
            collection: collection.to_string(),
            id: id.to_string(),
            reason: e.to_string(),
        })
    }

    /// Every well-formed document of a collection. Malformed ones are skipped.
    fn list<T: DeserializeOwned>(&self, collection: &str) -> Vec<T> {
        let Some(documents) = self.collections.get(collection) else {
            return Vec::new();
        };
        documents
            .iter()
            .filter_map(|(id, document)| match Self::decode(collection, id, document) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed document");
                    None
                }
            })
            .collect()
    }

    fn get<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<T> {
        let document = self
            .collections
            .get(collection)
            .and_then(|documents| documents.get(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        Self::decode(collection, id, document)
    }

    /// Insert or replace a document. An empty id gets a fresh key.
    fn put<T: Serialize>(&mut self, collection: &str, id: &str, record: &T) -> Result<String> {
        let id = if id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            id.to_string()
        };

        let mut document = serde_json::to_value(record)?;
        if let Some(fields) = document.as_object_mut() {
            fields.remove("id");
        }

        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), document);
        debug!(collection, id = %id, "Stored document");
        Ok(id)
    }

    fn remove(&mut self, collection: &str, id: &str) -> Result<()> {
        let removed = self
            .collections
            .get_mut(collection)
            .and_then(|documents| documents.remove(id));
        match removed {
            Some(_) => {
                debug!(collection, id, "Deleted document");
                Ok(())
            }
            None => Err(StoreError::not_found(collection, id)),
        }
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Users matching the filter, sorted by name.
    pub fn users(&self, filter: UserFilter) -> Vec<User> {
        let mut users: Vec<User> = self
            .list::<User>(self.names().users)
            .into_iter()
            .filter(|user| filter.accepts(user))
            .collect();
        users.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        users
    }

    /// A single user.
    pub fn user(&self, id: &str) -> Result<User> {
        self.get(self.names().users, id)
    }

    /// Insert or update a user, returning its key.
    pub fn upsert_user(&mut self, user: &User) -> Result<String> {
        self.put(self.names().users, &user.id, user)
    }

    /// Delete a user.
    pub fn delete_user(&mut self, id: &str) -> Result<()> {
        self.remove(self.names().users, id)
    }

    /// Count users satisfying a predicate.
    pub fn count_users<F>(&self, predicate: F) -> usize
    where
        F: Fn(&User) -> bool,
    {
        self.list::<User>(self.names().users)
            .iter()
            .filter(|user| predicate(user))
            .count()
    }

    // ========================================================================
    // Divisions
    // ========================================================================

    /// All divisions, ordered by code.
    pub fn divisions(&self) -> Vec<Division> {
        let mut divisions: Vec<Division> = self.list(self.names().divisions);
        divisions.sort_by_key(|d| d.code);
        divisions
    }

    /// Insert or update a division, returning its key.
    pub fn upsert_division(&mut self, division: &Division) -> Result<String> {
        self.put(self.names().divisions, &division.id, division)
    }

    /// Delete a division.
    pub fn delete_division(&mut self, id: &str) -> Result<()> {
        self.remove(self.names().divisions, id)
    }

    /// Code for the next new division: highest code plus one, or 1.
    ///
    /// Saturates at `u32::MAX`.
    pub fn next_division_code(&self) -> u32 {
        self.list::<Division>(self.names().divisions)
            .iter()
            .map(|d| d.code)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    // ========================================================================
    // Logbooks
    // ========================================================================

    /// Logbooks of one user, newest first.
    pub fn logbooks_for(&self, user_id: &str) -> Vec<Logbook> {
        let mut logbooks: Vec<Logbook> = self
            .list::<Logbook>(self.names().logbooks)
            .into_iter()
            .filter(|logbook| logbook.user_id == user_id)
            .collect();
        logbooks.sort_by(|a, b| b.date.cmp(&a.date));
        logbooks
    }

    /// A single logbook.
    pub fn logbook(&self, id: &str) -> Result<Logbook> {
        self.get(self.names().logbooks, id)
    }

    /// Insert or update a logbook, returning its key.
    pub fn upsert_logbook(&mut self, logbook: &Logbook) -> Result<String> {
        self.put(self.names().logbooks, &logbook.id, logbook)
    }

    /// Delete a logbook.
    pub fn delete_logbook(&mut self, id: &str) -> Result<()> {
        self.remove(self.names().logbooks, id)
    }

    /// Number of logbooks dated in `[start, end)`.
    pub fn count_logbooks_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> usize {
        self.list::<Logbook>(self.names().logbooks)
            .iter()
            .filter(|logbook| logbook.date >= start && logbook.date < end)
            .count()
    }

    /// Logbook count per calendar day, oldest day first.
    pub fn logbook_counts_by_date(&self) -> Vec<(NaiveDate, usize)> {
        let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for logbook in self.list::<Logbook>(self.names().logbooks) {
            *counts.entry(logbook.day()).or_default() += 1;
        }
        counts.into_iter().collect()
    }

    // ========================================================================
    // Attachments
    // ========================================================================

    /// Remove the file behind a resource locator.
    ///
    /// Remote locators are left alone. Returns whether a file was removed.
    pub fn remove_attachment(&self, locator: &str) -> Result<bool> {
        let locator = locator.trim();
        if locator.is_empty() || (locator.contains("://") && !locator.starts_with("file://")) {
            debug!(locator, "Not a local attachment, skipping removal");
            return Ok(false);
        }

        let path = Path::new(locator.strip_prefix("file://").unwrap_or(locator));
        match fs::remove_file(path) {
            Ok(()) => {
                info!(path = %path.display(), "Removed attachment");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
