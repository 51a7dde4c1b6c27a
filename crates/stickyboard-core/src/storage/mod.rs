//! Persistence of boards.
//!
//! Only the board content is persisted. Selection, viewport and undo
//! history are editing state and start fresh on every load.

mod autosave;
mod file;
mod memory;

pub use autosave::{AutoSaveManager, LAST_BOARD_KEY};
pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::document::BoardContent;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use thiserror::Error;

/// Version written into every persisted board.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Board not found: {0}")]
    NotFound(String),
    #[error("Malformed board data: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Storage lock poisoned")]
    Poisoned,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Future returned by [`Storage`] methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// The persisted form of a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedBoard {
    pub id: String,
    pub name: String,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub content: BoardContent,
}

fn default_version() -> u32 {
    FORMAT_VERSION
}

impl PersistedBoard {
    pub fn new(id: &str, name: &str, content: BoardContent) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            version: FORMAT_VERSION,
            content,
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A place boards can be kept, keyed by id.
///
/// Methods return boxed futures so backends may do real async I/O; the
/// bundled backends complete immediately.
pub trait Storage: Send + Sync {
    fn save(&self, id: &str, board: &PersistedBoard) -> BoxFuture<'_, StorageResult<()>>;

    /// Fails with [`StorageError::NotFound`] for unknown ids.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<PersistedBoard>>;

    /// Deleting a missing board is not an error.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Stored ids in ascending order.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Wrap an already computed result as a storage future.
fn ready<'a, T: 'a>(result: StorageResult<T>) -> BoxFuture<'a, StorageResult<T>> {
    Box::pin(std::future::ready(result))
}
