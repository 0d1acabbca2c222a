use std::path::PathBuf;

use crate::model::config::Config;
use crate::model::query::ListQuery;
use crate::model::task::Task;

use super::remote::HttpRemote;
use super::snapshot::Snapshot;

/// Error type for task store calls
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("task store returned HTTP {status}")]
    Status { status: u16 },
    #[error("could not decode task store response: {0}")]
    Decode(String),
    #[error("cannot {op} tasks: no task store is configured (read-only snapshot mode)")]
    ReadOnly { op: &'static str },
    #[error("could not read snapshot {path}: {source}")]
    SnapshotRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse snapshot {path}: {source}")]
    SnapshotParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The four operations of the task store.
///
/// Calls block; the TUI runs them on worker threads.
pub trait TaskService: Send + Sync {
    fn list(&self, query: &ListQuery) -> Result<Vec<Task>, StoreError>;
    fn create(&self, task: &Task) -> Result<Task, StoreError>;
    fn update(&self, id: u64, task: &Task) -> Result<Task, StoreError>;
    fn delete(&self, id: u64) -> Result<(), StoreError>;
}

/// Remote store with a read-only snapshot fallback.
///
/// Listing falls back to the snapshot when the remote is absent or fails.
/// Mutations never touch the snapshot: without a remote they fail.
pub struct StoreClient {
    remote: Option<Box<dyn TaskService>>,
    snapshot: Snapshot,
}

impl StoreClient {
    pub fn new(remote: Option<Box<dyn TaskService>>, snapshot: Snapshot) -> Self {
        StoreClient { remote, snapshot }
    }

    /// Build the client described by the config: an HTTP remote when a base
    /// URL is set, snapshot-only otherwise.
    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        let remote: Option<Box<dyn TaskService>> = match config.api.base_url() {
            Some(url) => Some(Box::new(HttpRemote::new(url, config.api.timeout())?)),
            None => {
                tracing::info!(
                    snapshot = %config.snapshot.path.display(),
                    "no task store configured, running read-only"
                );
                None
            }
        };
        Ok(StoreClient::new(
            remote,
            Snapshot::new(config.snapshot.path.clone()),
        ))
    }

    pub fn is_read_only(&self) -> bool {
        self.remote.is_none()
    }

    fn remote(&self, op: &'static str) -> Result<&dyn TaskService, StoreError> {
        self.remote.as_deref().ok_or(StoreError::ReadOnly { op })
    }
}

impl TaskService for StoreClient {
    fn list(&self, query: &ListQuery) -> Result<Vec<Task>, StoreError> {
        let Some(remote) = self.remote.as_deref() else {
            return self.snapshot.read();
        };
        match remote.list(query) {
            Ok(tasks) => Ok(tasks),
            Err(e) => {
                tracing::warn!(error = %e, "list request failed, falling back to snapshot");
                self.snapshot.read()
            }
        }
    }

    fn create(&self, task: &Task) -> Result<Task, StoreError> {
        self.remote("create")?.create(task)
    }

    fn update(&self, id: u64, task: &Task) -> Result<Task, StoreError> {
        self.remote("update")?.update(id, task)
    }

    fn delete(&self, id: u64) -> Result<(), StoreError> {
        self.remote("delete")?.delete(id)
    }
}
