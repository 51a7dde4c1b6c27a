//! Sticky note element.

use super::{BoardElement, ElementId, ElementKind, SerializableColor};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Visual style of a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteStyle {
    /// Paper color.
    pub background: SerializableColor,
    pub text_color: SerializableColor,
    pub font_size: f64,
}

impl Default for NoteStyle {
    fn default() -> Self {
        Self {
            background: SerializableColor::note_yellow(),
            text_color: SerializableColor::black(),
            font_size: 14.0,
        }
    }
}

/// A sticky note.
///
/// Size is not validated on construction; the reducer enforces the
/// minimum size when a command commits the note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: ElementId,
    pub text: String,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub style: NoteStyle,
    /// Creation time, milliseconds since the Unix epoch.
    #[serde(default)]
    pub created_at: u64,
    /// Last update time, milliseconds since the Unix epoch.
    #[serde(default)]
    pub updated_at: u64,
}

impl Note {
    /// Create an empty note.
    pub fn new(id: impl Into<ElementId>, position: Point, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
            position,
            width,
            height,
            z_index: 0,
            locked: false,
            style: NoteStyle::default(),
            created_at: 0,
            updated_at: 0,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }

    /// Grow (or shrink, with negative deltas) the note.
    pub fn resize(&mut self, dw: f64, dh: f64) {
        self.width += dw;
        self.height += dh;
    }

    /// Raise width and height to at least `min`.
    pub fn clamp_size(&mut self, min: f64) {
        self.width = self.width.max(min);
        self.height = self.height.max(min);
    }
}

impl BoardElement for Note {
    fn id(&self) -> &ElementId {
        &self.id
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Note
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn z_index(&self) -> i32 {
        self.z_index
    }

    fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    fn is_locked(&self) -> bool {
        self.locked
    }
}

/// Partial update for a note. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotePatch {
    pub text: Option<String>,
    pub position: Option<Point>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub z_index: Option<i32>,
    pub locked: Option<bool>,
    pub style: Option<NoteStyle>,
}

impl NotePatch {
    /// Shallow-merge the set fields into `note`.
    pub fn apply_to(&self, note: &mut Note) {
        if let Some(text) = &self.text {
            note.text = text.clone();
        }
        if let Some(position) = self.position {
            note.position = position;
        }
        if let Some(width) = self.width {
            note.width = width;
        }
        if let Some(height) = self.height {
            note.height = height;
        }
        if let Some(z_index) = self.z_index {
            note.z_index = z_index;
        }
        if let Some(locked) = self.locked {
            note.locked = locked;
        }
        if let Some(style) = &self.style {
            note.style = style.clone();
        }
    }
}
