//! Commands: every change to a board is one of these.

use crate::document::BoardContent;
use crate::elements::{
    Connector, ConnectorPatch, DrawingElement, DrawingPatch, ElementId, Note, NotePatch,
};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Additive transform applied to every selected note and drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionTransform {
    pub dx: f64,
    pub dy: f64,
    pub dw: f64,
    pub dh: f64,
    /// Radians. Notes ignore it.
    pub rotate: f64,
}

impl SelectionTransform {
    /// Pure translation.
    pub fn offset(dx: f64, dy: f64) -> Self {
        Self {
            dx,
            dy,
            ..Self::default()
        }
    }

    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }
}

/// A single intent to change a board.
///
/// Serialized with a `"type"` tag; tags this version does not know
/// deserialize to [`Command::Unknown`], which the reducer ignores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    AddNote { note: Note },
    UpdateNote { id: ElementId, patch: NotePatch },
    DeleteNote { id: ElementId },

    AddDrawingElement { element: DrawingElement },
    UpdateDrawingElement { id: ElementId, patch: DrawingPatch },
    DeleteDrawingElement { id: ElementId },

    AddConnector { connector: Connector },
    UpdateConnector { id: ElementId, patch: ConnectorPatch },
    DeleteConnector { id: ElementId },

    /// Replace the selection with a single id.
    Select { id: ElementId },
    AddToSelection { id: ElementId },
    ClearSelection,
    /// Select every note and drawing.
    SelectAll,

    ApplyTransformToSelected(SelectionTransform),
    /// Delete every selected note, drawing and connector as one edit.
    DeleteSelected,

    /// Put the element above every other note and drawing.
    BringToFront { id: ElementId },
    /// Put the element below every other note and drawing.
    SendToBack { id: ElementId },

    SetZoom { zoom: f64 },
    SetPan { pan: Vec2 },

    Undo,
    Redo,
    SaveSnapshot {
        #[serde(default)]
        label: Option<String>,
    },
    /// Replace the content wholesale and restart history from it.
    InitializeBoard { content: BoardContent },

    #[serde(other)]
    Unknown,
}

impl Command {
    /// Label recorded in the history snapshot this command produces.
    pub fn label(&self) -> &'static str {
        match self {
            Command::AddNote { .. } => "add_note",
            Command::UpdateNote { .. } => "update_note",
            Command::DeleteNote { .. } => "delete_note",
            Command::AddDrawingElement { .. } => "add_drawing_element",
            Command::UpdateDrawingElement { .. } => "update_drawing_element",
            Command::DeleteDrawingElement { .. } => "delete_drawing_element",
            Command::AddConnector { .. } => "add_connector",
            Command::UpdateConnector { .. } => "update_connector",
            Command::DeleteConnector { .. } => "delete_connector",
            Command::Select { .. } => "select",
            Command::AddToSelection { .. } => "add_to_selection",
            Command::ClearSelection => "clear_selection",
            Command::SelectAll => "select_all",
            Command::ApplyTransformToSelected(_) => "apply_transform_to_selected",
            Command::DeleteSelected => "delete_selected",
            Command::BringToFront { .. } => "bring_to_front",
            Command::SendToBack { .. } => "send_to_back",
            Command::SetZoom { .. } => "set_zoom",
            Command::SetPan { .. } => "set_pan",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::SaveSnapshot { .. } => "save_snapshot",
            Command::InitializeBoard { .. } => "initialize_board",
            Command::Unknown => "unknown",
        }
    }

    /// Whether the reducer records a history snapshot after applying this.
    pub fn is_content_mutating(&self) -> bool {
        matches!(
            self,
            Command::AddNote { .. }
                | Command::UpdateNote { .. }
                | Command::DeleteNote { .. }
                | Command::AddDrawingElement { .. }
                | Command::UpdateDrawingElement { .. }
                | Command::DeleteDrawingElement { .. }
                | Command::AddConnector { .. }
                | Command::UpdateConnector { .. }
                | Command::DeleteConnector { .. }
                | Command::ApplyTransformToSelected(_)
                | Command::DeleteSelected
                | Command::BringToFront { .. }
                | Command::SendToBack { .. }
        )
    }
}
