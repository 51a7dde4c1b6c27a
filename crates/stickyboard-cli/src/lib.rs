//! Replays JSON command scripts against a persisted board.
//!
//! This is the interaction layer for scripted use: it owns board ids,
//! clamps zoom requests to the configured bounds, and decides when to save.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use stickyboard_core::storage::{AutoSaveManager, FileStorage, Storage, StorageError};
use stickyboard_core::viewport::Viewport;
use stickyboard_core::{BoardConfig, Command, ConfigError, Store};
use thiserror::Error;

/// Overrides the board storage directory.
pub const DATA_DIR_ENV: &str = "STICKYBOARD_DATA_DIR";
/// Path to a JSON [`BoardConfig`].
pub const CONFIG_ENV: &str = "STICKYBOARD_CONFIG";

const USAGE: &str = "usage: stickyboard <script.json> [board-id]";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid command script: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Resolved invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub script: PathBuf,
    /// Board to load and save. Without one, the last saved board is resumed.
    pub board_id: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

impl Options {
    /// Parse positional arguments (program name already skipped).
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, CliError> {
        let mut args = args.into_iter();
        let script = match args.next() {
            Some(arg) if arg == "-h" || arg == "--help" => {
                return Err(CliError::Usage(USAGE.to_string()));
            }
            Some(arg) => PathBuf::from(arg),
            None => return Err(CliError::Usage(USAGE.to_string())),
        };
        let board_id = args.next();
        if let Some(extra) = args.next() {
            return Err(CliError::Usage(format!("unexpected argument '{}'\n{}", extra, USAGE)));
        }
        Ok(Self {
            script,
            board_id,
            data_dir: None,
            config_path: None,
        })
    }

    /// Parse arguments and pick up the environment overrides.
    pub fn from_env(args: impl IntoIterator<Item = String>) -> Result<Self, CliError> {
        let mut options = Self::parse(args)?;
        options.data_dir = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
        options.config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Ok(options)
    }
}

/// What a run did, printed on success.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub board_id: String,
    pub commands: usize,
    pub notes: usize,
    pub drawings: usize,
    pub connectors: usize,
    pub dangling_connectors: usize,
    pub can_undo: bool,
    pub can_redo: bool,
    pub saved: bool,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "board {}: replayed {} command(s)", self.board_id, self.commands)?;
        writeln!(
            f,
            "  {} note(s), {} drawing(s), {} connector(s) ({} dangling)",
            self.notes, self.drawings, self.connectors, self.dangling_connectors
        )?;
        write!(
            f,
            "  undo: {}, redo: {}, saved: {}",
            yes_no(self.can_undo),
            yes_no(self.can_redo),
            yes_no(self.saved)
        )
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Load the configuration, falling back to defaults when it is rejected.
pub fn load_config(path: Option<&Path>) -> BoardConfig {
    let Some(path) = path else {
        return BoardConfig::default();
    };
    match BoardConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring config {}: {}", path.display(), e);
            BoardConfig::default()
        }
    }
}

/// Parse a script: a JSON array of commands.
pub fn read_script(path: &Path) -> Result<Vec<Command>, CliError> {
    let json = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}

/// Clamp zoom requests before they reach the reducer.
fn prepare(command: Command, config: &BoardConfig) -> Command {
    match command {
        Command::SetZoom { zoom } => Command::SetZoom {
            zoom: Viewport::clamp_zoom(zoom, config.min_zoom, config.max_zoom),
        },
        other => other,
    }
}

fn open_storage(data_dir: Option<&Path>) -> Result<Arc<FileStorage>, CliError> {
    let storage = match data_dir {
        Some(dir) => FileStorage::new(dir.to_path_buf())?,
        None => FileStorage::default_location()?,
    };
    log::debug!("Using board storage at {}", storage.base_path().display());
    Ok(Arc::new(storage))
}

/// Open the requested board (or the last one), replay the script, and save.
pub async fn run(options: &Options) -> Result<Summary, CliError> {
    let storage = open_storage(options.data_dir.as_deref())?;
    run_with(options, storage).await
}

/// [`run`] against an explicit storage backend.
pub async fn run_with<S: Storage>(options: &Options, storage: Arc<S>) -> Result<Summary, CliError> {
    let config = load_config(options.config_path.as_deref());
    let commands = read_script(&options.script)?;
    let mut autosave = AutoSaveManager::new(storage);

    let mut store = match &options.board_id {
        Some(id) => autosave.open(id, config.clone()).await?,
        None => autosave.resume(config.clone()).await?,
    };

    let count = commands.len();
    autosave.record(store.dispatch_all(commands.into_iter().map(|c| prepare(c, &config))));
    let saved = autosave.save_if_dirty(&store).await?;
    if saved {
        log::info!("Saved board {}", store.id());
    }

    let board = store.board();
    Ok(Summary {
        board_id: store.id().to_string(),
        commands: count,
        notes: board.content.notes.len(),
        drawings: board.content.drawing_elements.len(),
        connectors: board.content.connectors.len(),
        dangling_connectors: board.dangling_connectors().count(),
        can_undo: store.can_undo(),
        can_redo: store.can_redo(),
        saved,
    })
}
