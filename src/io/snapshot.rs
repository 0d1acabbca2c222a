use std::fs;
use std::path::{Path, PathBuf};

use crate::model::task::Task;

use super::store::StoreError;

/// Read-only JSON copy of the task collection
#[derive(Debug, Clone)]
pub struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Snapshot { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every task in the snapshot, in file order
    pub fn read(&self) -> Result<Vec<Task>, StoreError> {
        let text = fs::read_to_string(&self.path).map_err(|e| StoreError::SnapshotRead {
            path: self.path.clone(),
            source: e,
        })?;
        let tasks: Vec<Task> =
            serde_json::from_str(&text).map_err(|e| StoreError::SnapshotParse {
                path: self.path.clone(),
                source: e,
            })?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "read snapshot");
        Ok(tasks)
    }
}
