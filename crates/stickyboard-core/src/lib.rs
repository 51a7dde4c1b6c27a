//! StickyBoard Core Library
//!
//! Board model for a sticky-note whiteboard: notes, drawings and connectors,
//! edited through serializable commands with linear undo/redo.

pub mod command;
pub mod config;
pub mod document;
pub mod elements;
pub mod history;
pub mod reducer;
pub mod storage;
pub mod store;
pub mod viewport;

pub use command::{Command, SelectionTransform};
pub use config::{BoardConfig, ConfigError, ConnectorPolicy};
pub use document::{Board, BoardContent, Selection};
pub use elements::{
    BoardElement, Connector, ConnectorPatch, DrawingElement, DrawingPatch, DrawingShape,
    ElementId, ElementKind, Endpoint, Note, NotePatch, NoteStyle, SerializableColor,
};
pub use history::{History, HistorySnapshot};
pub use reducer::{DispatchContext, reduce};
pub use storage::{PersistedBoard, Storage, StorageError};
pub use store::{DispatchOutcome, Store};
pub use viewport::Viewport;
