//! Tracks unsaved edits of a [`Store`] and writes it through a backend.

use super::{Storage, StorageError, StorageResult};
use crate::config::BoardConfig;
use crate::store::{DispatchOutcome, Store};
use std::sync::Arc;

/// Id under which the most recently saved board is mirrored, so the next
/// session can resume it without knowing its id.
pub const LAST_BOARD_KEY: &str = "__last_board__";

pub struct AutoSaveManager<S: Storage> {
    storage: Arc<S>,
    /// Content changed since the last load or save.
    dirty: bool,
}

impl<S: Storage> AutoSaveManager<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            dirty: false,
        }
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Note the result of a dispatch; only content changes need saving.
    pub fn record(&mut self, outcome: DispatchOutcome) {
        self.dirty |= outcome.content_changed;
    }

    /// Open board `id`, or start an empty board under that id when none is
    /// stored. A new board counts as unsaved.
    pub async fn open(&mut self, id: &str, config: BoardConfig) -> StorageResult<Store> {
        match self.storage.load(id).await {
            Ok(persisted) => {
                self.dirty = false;
                Ok(Store::from_persisted(persisted, config))
            }
            Err(StorageError::NotFound(_)) => {
                log::info!("Creating board {}", id);
                let mut store = Store::new(config);
                store.set_id(id);
                self.dirty = true;
                Ok(store)
            }
            Err(e) => Err(e),
        }
    }

    /// Reopen the most recently saved board, or start a fresh one.
    pub async fn resume(&mut self, config: BoardConfig) -> StorageResult<Store> {
        match self.storage.load(LAST_BOARD_KEY).await {
            Ok(persisted) => {
                self.dirty = false;
                Ok(Store::from_persisted(persisted, config))
            }
            Err(StorageError::NotFound(_)) => {
                let store = Store::new(config);
                log::info!("No board to resume, creating {}", store.id());
                self.dirty = true;
                Ok(store)
            }
            Err(e) => Err(e),
        }
    }

    /// Write the board under its id and mirror it under [`LAST_BOARD_KEY`].
    pub async fn save(&mut self, store: &Store) -> StorageResult<()> {
        let persisted = store.persisted();
        self.storage.save(store.id(), &persisted).await?;
        if let Err(e) = self.storage.save(LAST_BOARD_KEY, &persisted).await {
            log::warn!("Failed to record {} as last board: {}", store.id(), e);
        }
        self.dirty = false;
        Ok(())
    }

    /// Save only when there are unsaved changes. Returns whether it saved.
    pub async fn save_if_dirty(&mut self, store: &Store) -> StorageResult<bool> {
        if !self.dirty {
            return Ok(false);
        }
        self.save(store).await?;
        Ok(true)
    }

    /// Stored board ids, without the last-board mirror.
    pub async fn list_boards(&self) -> StorageResult<Vec<String>> {
        let mut ids = self.storage.list().await?;
        ids.retain(|id| id != LAST_BOARD_KEY);
        Ok(ids)
    }

    pub async fn delete(&self, id: &str) -> StorageResult<()> {
        self.storage.delete(id).await
    }
}
