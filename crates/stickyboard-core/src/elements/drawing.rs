//! Freeform strokes and shapes.

use super::{BoardElement, ElementId, ElementKind, SerializableColor};
use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Geometry of a drawing element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawingShape {
    /// Freehand stroke.
    Path { points: Vec<Point> },
    Rectangle {
        /// Top-left corner position.
        position: Point,
        width: f64,
        height: f64,
    },
    Ellipse {
        center: Point,
        radius_x: f64,
        radius_y: f64,
    },
    Line { start: Point, end: Point },
    Arrow { start: Point, end: Point },
    Text {
        position: Point,
        content: String,
        font_size: f64,
    },
}

impl DrawingShape {
    /// Axis-aligned bounds, ignoring rotation.
    pub fn bounds(&self) -> Rect {
        match self {
            DrawingShape::Path { points } => {
                let mut iter = points.iter();
                let Some(first) = iter.next() else {
                    return Rect::ZERO;
                };
                iter.fold(Rect::from_points(*first, *first), |acc, p| {
                    acc.union_pt(*p)
                })
            }
            DrawingShape::Rectangle {
                position,
                width,
                height,
            } => Rect::new(
                position.x,
                position.y,
                position.x + width,
                position.y + height,
            ),
            DrawingShape::Ellipse {
                center,
                radius_x,
                radius_y,
            } => Rect::new(
                center.x - radius_x,
                center.y - radius_y,
                center.x + radius_x,
                center.y + radius_y,
            ),
            DrawingShape::Line { start, end } | DrawingShape::Arrow { start, end } => {
                Rect::from_points(*start, *end)
            }
            DrawingShape::Text {
                position,
                content,
                font_size,
            } => {
                // Rough estimate, no font metrics available here.
                let longest = content.lines().map(|l| l.chars().count()).max().unwrap_or(0);
                let lines = content.lines().count().max(1);
                let width = (longest as f64 * font_size * 0.6).max(20.0);
                let height = lines as f64 * font_size * 1.2;
                Rect::new(
                    position.x,
                    position.y,
                    position.x + width,
                    position.y + height,
                )
            }
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        match self {
            DrawingShape::Path { points } => {
                for point in points.iter_mut() {
                    *point += offset;
                }
            }
            DrawingShape::Rectangle { position, .. } | DrawingShape::Text { position, .. } => {
                *position += offset;
            }
            DrawingShape::Ellipse { center, .. } => *center += offset,
            DrawingShape::Line { start, end } | DrawingShape::Arrow { start, end } => {
                *start += offset;
                *end += offset;
            }
        }
    }

    /// Change the size of sized shapes, never below zero. Point-based
    /// shapes and text ignore it.
    ///
    /// Ellipses keep their center and grow by half the delta on each side.
    pub fn resize(&mut self, dw: f64, dh: f64) {
        match self {
            DrawingShape::Rectangle { width, height, .. } => {
                *width = (*width + dw).max(0.0);
                *height = (*height + dh).max(0.0);
            }
            DrawingShape::Ellipse {
                radius_x, radius_y, ..
            } => {
                *radius_x = (*radius_x + dw / 2.0).max(0.0);
                *radius_y = (*radius_y + dh / 2.0).max(0.0);
            }
            DrawingShape::Path { .. }
            | DrawingShape::Line { .. }
            | DrawingShape::Arrow { .. }
            | DrawingShape::Text { .. } => {}
        }
    }
}

/// A drawing element: a shape plus its stroke properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingElement {
    pub id: ElementId,
    pub shape: DrawingShape,
    pub color: SerializableColor,
    pub stroke_width: f64,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default)]
    pub locked: bool,
    /// Rotation angle in radians, around the center of the unrotated bounds.
    #[serde(default)]
    pub rotation: f64,
}

impl DrawingElement {
    pub fn new(id: impl Into<ElementId>, shape: DrawingShape) -> Self {
        Self {
            id: id.into(),
            shape,
            color: SerializableColor::black(),
            stroke_width: 2.0,
            z_index: 0,
            locked: false,
            rotation: 0.0,
        }
    }

    pub fn with_color(mut self, color: SerializableColor) -> Self {
        self.color = color;
        self
    }
}

impl BoardElement for DrawingElement {
    fn id(&self) -> &ElementId {
        &self.id
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Drawing
    }

    /// Bounds of the rotated shape.
    fn bounds(&self) -> Rect {
        let bounds = self.shape.bounds();
        if self.rotation == 0.0 {
            return bounds;
        }
        Affine::rotate_about(self.rotation, bounds.center()).transform_rect_bbox(bounds)
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

/// Partial update for a drawing element. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingPatch {
    /// Replaces the whole geometry.
    pub shape: Option<DrawingShape>,
    pub color: Option<SerializableColor>,
    pub stroke_width: Option<f64>,
    pub z_index: Option<i32>,
    pub locked: Option<bool>,
    pub rotation: Option<f64>,
}

impl DrawingPatch {
    /// Shallow-merge the set fields into `element`.
    pub fn apply_to(&self, element: &mut DrawingElement) {
        if let Some(shape) = &self.shape {
            element.shape = shape.clone();
        }
        if let Some(color) = self.color {
            element.color = color;
        }
        if let Some(stroke_width) = self.stroke_width {
            element.stroke_width = stroke_width;
        }
        if let Some(z_index) = self.z_index {
            element.z_index = z_index;
        }
        if let Some(locked) = self.locked {
            element.locked = locked;
        }
        if let Some(rotation) = self.rotation {
            element.rotation = rotation;
        }
    }
}
