//! File storage: one pretty-printed JSON file per board.

use super::{BoxFuture, PersistedBoard, Storage, StorageError, StorageResult, ready};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Stores boards as `<id>.json` files in one directory.
pub struct FileStorage {
    base_path: PathBuf,
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl FileStorage {
    /// Use `base_path`, creating it if needed.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&base_path).map_err(io_error(&base_path))?;
        Ok(Self { base_path })
    }

    /// `stickyboard/boards` under the platform's local data directory
    /// (falling back to the home directory).
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io {
                path: PathBuf::from("~"),
                source: io::Error::new(io::ErrorKind::NotFound, "no data or home directory"),
            })?;
        Self::new(base.join("stickyboard").join("boards"))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of a board's file. Characters outside `[A-Za-z0-9_-]` map to `_`.
    fn board_path(&self, id: &str) -> PathBuf {
        let file_stem: String = id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(file_stem).with_extension("json")
    }

    /// Write through a temporary file so a crash never leaves a truncated board.
    fn write(&self, id: &str, board: &PersistedBoard) -> StorageResult<()> {
        let path = self.board_path(id);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, board.to_json()?).map_err(io_error(&staging))?;
        fs::rename(&staging, &path).map_err(io_error(&path))?;
        log::debug!("Wrote board {} to {}", id, path.display());
        Ok(())
    }

    fn read(&self, id: &str) -> StorageResult<PersistedBoard> {
        let path = self.board_path(id);
        let json = match fs::read_to_string(&path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(id.to_string()));
            }
            other => other.map_err(io_error(&path))?,
        };
        Ok(PersistedBoard::from_json(&json)?)
    }

    fn remove(&self, id: &str) -> StorageResult<()> {
        let path = self.board_path(id);
        match fs::remove_file(&path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(io_error(&path)(e)),
            _ => Ok(()),
        }
    }

    fn ids(&self) -> StorageResult<Vec<String>> {
        let entries = fs::read_dir(&self.base_path).map_err(io_error(&self.base_path))?;
        let mut ids: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .collect();
        ids.sort();
        Ok(ids)
    }
}

impl Storage for FileStorage {
    fn save(&self, id: &str, board: &PersistedBoard) -> BoxFuture<'_, StorageResult<()>> {
        ready(self.write(id, board))
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<PersistedBoard>> {
        ready(self.read(id))
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        ready(self.remove(id))
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        ready(self.ids())
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        ready(Ok(self.board_path(id).is_file()))
    }
}
