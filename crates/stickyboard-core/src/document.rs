//! Board document and its content collections.

use crate::elements::{
    BoardElement, Connector, DrawingElement, ElementId, ElementKind, Endpoint, Note,
};
use crate::history::History;
use crate::viewport::Viewport;
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The part of a board that is persisted and recorded in history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardContent {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub drawing_elements: Vec<DrawingElement>,
    #[serde(default)]
    pub connectors: Vec<Connector>,
}

impl BoardContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.drawing_elements.is_empty() && self.connectors.is_empty()
    }

    pub fn note(&self, id: &ElementId) -> Option<&Note> {
        self.notes.iter().find(|n| &n.id == id)
    }

    pub fn note_mut(&mut self, id: &ElementId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| &n.id == id)
    }

    pub fn drawing(&self, id: &ElementId) -> Option<&DrawingElement> {
        self.drawing_elements.iter().find(|d| &d.id == id)
    }

    pub fn drawing_mut(&mut self, id: &ElementId) -> Option<&mut DrawingElement> {
        self.drawing_elements.iter_mut().find(|d| &d.id == id)
    }

    pub fn connector(&self, id: &ElementId) -> Option<&Connector> {
        self.connectors.iter().find(|c| &c.id == id)
    }

    pub fn connector_mut(&mut self, id: &ElementId) -> Option<&mut Connector> {
        self.connectors.iter_mut().find(|c| &c.id == id)
    }

    /// Remove every note with this id. Returns how many were removed.
    pub fn remove_note(&mut self, id: &ElementId) -> usize {
        let before = self.notes.len();
        self.notes.retain(|n| &n.id != id);
        before - self.notes.len()
    }

    /// Remove every drawing element with this id. Returns how many were removed.
    pub fn remove_drawing(&mut self, id: &ElementId) -> usize {
        let before = self.drawing_elements.len();
        self.drawing_elements.retain(|d| &d.id != id);
        before - self.drawing_elements.len()
    }

    /// Remove every connector with this id. Returns how many were removed.
    pub fn remove_connector(&mut self, id: &ElementId) -> usize {
        let before = self.connectors.len();
        self.connectors.retain(|c| &c.id != id);
        before - self.connectors.len()
    }

    /// Remove connectors attached to `endpoint`. Returns how many were removed.
    pub fn remove_connectors_referencing(&mut self, endpoint: &Endpoint) -> usize {
        let before = self.connectors.len();
        self.connectors.retain(|c| !c.references(endpoint));
        before - self.connectors.len()
    }

    /// Check whether an endpoint points at an existing element.
    pub fn resolves(&self, endpoint: &Endpoint) -> bool {
        match endpoint.element_kind {
            ElementKind::Note => self.note(&endpoint.element_id).is_some(),
            ElementKind::Drawing => self.drawing(&endpoint.element_id).is_some(),
        }
    }

    /// Notes and drawings, back to front. Ties keep collection order,
    /// notes before drawings.
    pub fn elements_by_z(&self) -> Vec<&dyn BoardElement> {
        let mut elements: Vec<&dyn BoardElement> = self
            .notes
            .iter()
            .map(|n| n as &dyn BoardElement)
            .chain(self.drawing_elements.iter().map(|d| d as &dyn BoardElement))
            .collect();
        elements.sort_by_key(|e| e.z_index());
        elements
    }

    /// Bounding box of all notes and drawings.
    pub fn bounds(&self) -> Option<Rect> {
        self.elements_by_z()
            .into_iter()
            .map(|e| e.bounds())
            .reduce(|acc, b| acc.union(b))
    }
}

/// Set of selected element ids (notes, drawings and connectors alike).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeSet<ElementId>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with a single id.
    pub fn select(&mut self, id: ElementId) {
        self.0.clear();
        self.0.insert(id);
    }

    pub fn add(&mut self, id: ElementId) {
        self.0.insert(id);
    }

    pub fn remove(&mut self, id: &ElementId) -> bool {
        self.0.remove(id)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.0.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementId> {
        self.0.iter()
    }
}

impl FromIterator<ElementId> for Selection {
    fn from_iter<I: IntoIterator<Item = ElementId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A whiteboard: content plus transient editing state.
#[derive(Debug, Clone, Default)]
pub struct Board {
    pub content: BoardContent,
    /// Not persisted, not recorded in history.
    pub selection: Selection,
    /// Not persisted, not recorded in history.
    pub viewport: Viewport,
    pub history: History,
}

impl Board {
    /// Create an empty board with empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board around existing content. History starts empty.
    pub fn with_content(content: BoardContent) -> Self {
        Self {
            content,
            ..Self::default()
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selection.contains(id)
    }

    /// Connectors whose endpoints both exist, in collection order.
    pub fn resolved_connectors(&self) -> impl Iterator<Item = &Connector> {
        self.content
            .connectors
            .iter()
            .filter(|c| self.content.resolves(&c.from) && self.content.resolves(&c.to))
    }

    /// Connectors with at least one endpoint pointing at a missing element.
    pub fn dangling_connectors(&self) -> impl Iterator<Item = &Connector> {
        self.content
            .connectors
            .iter()
            .filter(|c| !self.content.resolves(&c.from) || !self.content.resolves(&c.to))
    }
}
