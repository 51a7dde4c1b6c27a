//! In-process storage.

use super::{BoxFuture, PersistedBoard, Storage, StorageError, StorageResult, ready};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Keeps boards as serialized JSON in memory, so loads go through the same
/// decoding as the file backend and hand out independent copies.
#[derive(Default)]
pub struct MemoryStorage {
    boards: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_boards<T>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> T) -> StorageResult<T> {
        let mut boards = self.boards.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(f(&mut boards))
    }

    fn read(&self, id: &str) -> StorageResult<PersistedBoard> {
        let json = self
            .with_boards(|boards| boards.get(id).cloned())?
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        Ok(PersistedBoard::from_json(&json)?)
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, board: &PersistedBoard) -> BoxFuture<'_, StorageResult<()>> {
        let result = board
            .to_json()
            .map_err(StorageError::from)
            .and_then(|json| self.with_boards(|boards| boards.insert(id.to_string(), json)).map(drop));
        ready(result)
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<PersistedBoard>> {
        ready(self.read(id))
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        ready(self.with_boards(|boards| boards.remove(id)).map(drop))
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        ready(self.with_boards(|boards| boards.keys().cloned().collect()))
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        ready(self.with_boards(|boards| boards.contains_key(id)))
    }
}
