//! Board store: owns the current board and runs commands through the reducer.
//!
//! A store is built explicitly and handed to whoever needs it; there is no
//! global instance.

use crate::command::Command;
use crate::config::BoardConfig;
use crate::document::{Board, BoardContent};
use crate::reducer::{DispatchContext, reduce};
use crate::storage::PersistedBoard;

/// What a dispatch did, for callers that react to edits (e.g. autosave).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The persisted part of the board changed.
    pub content_changed: bool,
}

/// Owner of a board and the configuration it is edited under.
pub struct Store {
    board: Board,
    config: BoardConfig,
    /// Board id and name used when persisting.
    id: String,
    name: String,
}

impl Store {
    /// Create a store with an empty, initialized board (one baseline snapshot).
    pub fn new(config: BoardConfig) -> Self {
        let mut store = Self {
            board: Board::new(),
            config,
            id: uuid::Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
        };
        store.dispatch(Command::InitializeBoard {
            content: BoardContent::new(),
        });
        store
    }

    /// Create a store around an existing board, keeping its history.
    pub fn with_board(board: Board, config: BoardConfig) -> Self {
        Self {
            board,
            config,
            id: uuid::Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
        }
    }

    /// Create a store from a persisted board. History restarts with a single
    /// snapshot of the loaded content.
    pub fn from_persisted(persisted: PersistedBoard, config: BoardConfig) -> Self {
        log::info!(
            "Loading board {} ({} notes, {} drawings, {} connectors)",
            persisted.id,
            persisted.content.notes.len(),
            persisted.content.drawing_elements.len(),
            persisted.content.connectors.len()
        );
        let mut store = Self {
            board: Board::new(),
            config,
            id: persisted.id,
            name: persisted.name,
        };
        store.dispatch(Command::InitializeBoard {
            content: persisted.content,
        });
        store
    }

    /// Run a command through the reducer.
    pub fn dispatch(&mut self, command: Command) -> DispatchOutcome {
        log::debug!("dispatch {}", command.label());
        let ctx = DispatchContext::now(&self.config);
        let board = std::mem::take(&mut self.board);
        let before = board.content.clone();
        self.board = reduce(board, command, &ctx);
        DispatchOutcome {
            content_changed: self.board.content != before,
        }
    }

    /// Run several commands in order. Returns whether any changed content.
    pub fn dispatch_all(&mut self, commands: impl IntoIterator<Item = Command>) -> DispatchOutcome {
        let mut content_changed = false;
        for command in commands {
            content_changed |= self.dispatch(command).content_changed;
        }
        DispatchOutcome { content_changed }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn can_undo(&self) -> bool {
        self.board.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.board.can_redo()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The persistable view of the board: content only.
    pub fn persisted(&self) -> PersistedBoard {
        PersistedBoard::new(&self.id, &self.name, self.board.content.clone())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}
