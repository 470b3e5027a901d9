//! Background execution of document store requests.
//!
//! Store access is file IO, so it runs on tokio's blocking pool while the UI
//! keeps rendering. Results come back through an unbounded channel.
//!
//! # Architecture
//!
//! 1. A screen is entered or the operator confirms an action
//! 2. The app sends a [`StoreRequest`] to [`TaskSpawner::spawn`]
//! 3. The main loop continues rendering and handling events
//! 4. When the work completes, a [`StoreMessage`] is sent through the channel
//! 5. The main loop polls the channel with `try_recv()` and applies results
//!
//! Requests are neither retried nor deduplicated; responses are applied in
//! arrival order.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::dashboard::DashboardStats;
use crate::forms::{FormContext, FormDraft, FormError, FormRecord};
use crate::models::{Division, Logbook, RecordKind, User};
use crate::store::{DocumentStore, StoreError, UserFilter};

/// The store shared between background tasks.
pub type SharedStore = Arc<Mutex<DocumentStore>>;

/// Work the app asks the background to do.
#[derive(Debug, Clone)]
pub enum StoreRequest {
    LoadDashboard { today: NaiveDate },
    LoadTrainees,
    LoadAdmins,
    LoadDivisions,
    /// A trainee and their logbooks.
    LoadTraineeDetail { user_id: String },
    /// Validate a form against the store and save the record.
    Submit(FormDraft),
    /// Delete a record and its attachment, if any.
    Delete {
        kind: RecordKind,
        id: String,
        locator: Option<String>,
    },
}

/// Why a form could not be saved.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Invalid(#[from] FormError),

    #[error("{0}")]
    Store(#[from] StoreError),
}

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum StoreMessage {
    DashboardLoaded(DashboardStats),
    TraineesLoaded(Vec<User>),
    AdminsLoaded(Vec<User>),
    DivisionsLoaded(Vec<Division>),
    TraineeDetailLoaded {
        user_id: String,
        result: Result<(User, Vec<Logbook>), StoreError>,
    },
    Submitted {
        kind: RecordKind,
        /// Key of the saved record.
        result: Result<String, SubmitError>,
    },
    Deleted {
        kind: RecordKind,
        id: String,
        result: Result<(), StoreError>,
    },
}

/// Spawns store requests on the blocking pool.
#[derive(Clone)]
pub struct TaskSpawner {
    store: SharedStore,
    tx: mpsc::UnboundedSender<StoreMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner over a shared store.
    pub fn new(store: SharedStore, tx: mpsc::UnboundedSender<StoreMessage>) -> Self {
        Self { store, tx }
    }

    /// Run a request in the background.
    pub fn spawn(&self, request: StoreRequest) {
        let tx = self.tx.clone();
        let store = Arc::clone(&self.store);
        debug!(?request, "Spawning store request");
        tokio::task::spawn_blocking(move || {
            let message = execute(&store, request);
            if tx.send(message).is_err() {
                debug!("Store message dropped, receiver closed");
            }
        });
    }
}

fn lock(store: &SharedStore) -> MutexGuard<'_, DocumentStore> {
    // Every mutation is a single map operation, so poisoned data is still whole.
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Run a request against the store and produce its result message.
pub fn execute(store: &SharedStore, request: StoreRequest) -> StoreMessage {
    match request {
        StoreRequest::LoadDashboard { today } => {
            StoreMessage::DashboardLoaded(DashboardStats::collect(&lock(store), today))
        }
        StoreRequest::LoadTrainees => {
            StoreMessage::TraineesLoaded(lock(store).users(UserFilter::Trainees))
        }
        StoreRequest::LoadAdmins => StoreMessage::AdminsLoaded(lock(store).users(UserFilter::Staff)),
        StoreRequest::LoadDivisions => StoreMessage::DivisionsLoaded(lock(store).divisions()),
        StoreRequest::LoadTraineeDetail { user_id } => {
            let guard = lock(store);
            let result = guard
                .user(&user_id)
                .map(|user| (user, guard.logbooks_for(&user_id)));
            StoreMessage::TraineeDetailLoaded { user_id, result }
        }
        StoreRequest::Submit(draft) => {
            let kind = draft.kind();
            let result = submit(&mut lock(store), &draft);
            match &result {
                Ok(id) => info!(kind = kind.noun(), id = %id, "Saved record"),
                Err(e) => debug!(kind = kind.noun(), error = %e, "Form rejected"),
            }
            StoreMessage::Submitted { kind, result }
        }
        StoreRequest::Delete { kind, id, locator } => {
            let result = delete(&mut lock(store), kind, &id, locator.as_deref());
            match &result {
                Ok(()) => info!(kind = kind.noun(), id = %id, "Deleted record"),
                Err(e) => warn!(kind = kind.noun(), id = %id, error = %e, "Delete failed"),
            }
            StoreMessage::Deleted { kind, id, result }
        }
    }
}

fn submit(store: &mut DocumentStore, draft: &FormDraft) -> Result<String, SubmitError> {
    let divisions = store.divisions();
    let ctx = FormContext {
        divisions: &divisions,
        next_division_code: store.next_division_code(),
    };

    let record = draft.finish(&ctx)?;
    let id = store.commit(|store| match &record {
        FormRecord::User(user) => store.upsert_user(user),
        FormRecord::Division(division) => store.upsert_division(division),
        FormRecord::Logbook(logbook) => store.upsert_logbook(logbook),
    })?;
    Ok(id)
}

fn delete(
    store: &mut DocumentStore,
    kind: RecordKind,
    id: &str,
    locator: Option<&str>,
) -> Result<(), StoreError> {
    store.commit(|store| match kind {
        RecordKind::Trainee | RecordKind::Admin => store.delete_user(id),
        RecordKind::Division => store.delete_division(id),
        RecordKind::Logbook => store.delete_logbook(id),
    })?;

    if let Some(locator) = locator {
        // The record is already gone; a leftover file is only logged.
        if let Err(e) = store.remove_attachment(locator) {
            warn!(locator, error = %e, "Failed to remove attachment");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::store::Environment;
    use tempfile::TempDir;

    fn shared_store() -> (TempDir, SharedStore) {
        let dir = TempDir::new().unwrap();
        let store =
            DocumentStore::open(dir.path().join("store.json"), Environment::Development).unwrap();
        (dir, Arc::new(Mutex::new(store)))
    }

    #[test]
    fn test_submit_saves_and_persists() {
        let (dir, store) = shared_store();
        let mut draft = FormDraft::new_division();
        draft.set("Division Name", "IT");

        let StoreMessage::Submitted { kind, result } = execute(&store, StoreRequest::Submit(draft))
        else {
            panic!("expected a submit result");
        };
        assert_eq!(kind, RecordKind::Division);
        let id = tokio_test::assert_ok!(result);
        assert!(!id.is_empty());

        let reopened =
            DocumentStore::open(dir.path().join("store.json"), Environment::Development).unwrap();
        assert_eq!(reopened.divisions()[0].code, 1);
    }

    #[test]
    fn test_submit_invalid_form() {
        let (_dir, store) = shared_store();
        let draft = FormDraft::new_trainee();
        let StoreMessage::Submitted { result, .. } = execute(&store, StoreRequest::Submit(draft))
        else {
            panic!("expected a submit result");
        };
        assert!(matches!(result, Err(SubmitError::Invalid(FormError::Required("Name")))));
    }

    #[test]
    fn test_delete_missing_reports_not_found() {
        let (_dir, store) = shared_store();
        let message = execute(
            &store,
            StoreRequest::Delete {
                kind: RecordKind::Trainee,
                id: "ghost".to_string(),
                locator: None,
            },
        );
        assert!(matches!(
            message,
            StoreMessage::Deleted {
                result: Err(StoreError::NotFound { .. }),
                ..
            }
        ));
    }

    #[test]
    fn test_delete_removes_attachment() {
        let (dir, store) = shared_store();
        let photo = dir.path().join("photo.png");
        std::fs::write(&photo, b"png").unwrap();

        let mut user = User::new("Rina", "rina@example.com", Role::Trainee);
        user.photo_url = Some(photo.to_string_lossy().into_owned());
        let id = store.lock().unwrap().upsert_user(&user).unwrap();

        let message = execute(
            &store,
            StoreRequest::Delete {
                kind: RecordKind::Trainee,
                id,
                locator: user.photo_url.clone(),
            },
        );
        assert!(matches!(message, StoreMessage::Deleted { result: Ok(()), .. }));
        assert!(!photo.exists());
    }

    #[test]
    fn test_failed_save_leaves_store_unchanged() {
        let dir = TempDir::new().unwrap();
        let mut inner = DocumentStore::open(
            dir.path().join("blocker").join("store.json"),
            Environment::Development,
        )
        .unwrap();
        let id = inner
            .upsert_user(&User::new("Rina", "rina@example.com", Role::Trainee))
            .unwrap();
        std::fs::write(dir.path().join("blocker"), b"not a directory").unwrap();
        let store: SharedStore = Arc::new(Mutex::new(inner));

        let message = execute(
            &store,
            StoreRequest::Delete {
                kind: RecordKind::Trainee,
                id: id.clone(),
                locator: None,
            },
        );
        assert!(matches!(message, StoreMessage::Deleted { result: Err(_), .. }));
        assert!(store.lock().unwrap().user(&id).is_ok());

        let mut draft = FormDraft::new_division();
        draft.set("Division Name", "IT");
        let StoreMessage::Submitted { result, .. } = execute(&store, StoreRequest::Submit(draft))
        else {
            panic!("expected a submit result");
        };
        assert!(matches!(result, Err(SubmitError::Store(StoreError::Io(_)))));
        assert!(store.lock().unwrap().divisions().is_empty());
    }

    #[test]
    fn test_trainee_detail_missing_user() {
        let (_dir, store) = shared_store();
        let message = execute(
            &store,
            StoreRequest::LoadTraineeDetail {
                user_id: "nobody".to_string(),
            },
        );
        assert!(matches!(
            message,
            StoreMessage::TraineeDetailLoaded { result: Err(_), .. }
        ));
    }

    #[tokio::test]
    async fn test_spawn_sends_result() {
        let (_dir, store) = shared_store();
        store
            .lock()
            .unwrap()
            .upsert_user(&User::new("Ani", "ani@example.com", Role::Admin))
            .unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let spawner = TaskSpawner::new(store, tx);
        spawner.spawn(StoreRequest::LoadAdmins);

        match rx.recv().await {
            Some(StoreMessage::AdminsLoaded(admins)) => assert_eq!(admins.len(), 1),
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
