//! Connectors linking two board elements.

use super::{ElementId, ElementKind, SerializableColor};
use serde::{Deserialize, Deserializer, Serialize};

fn default_stroke_width() -> f64 {
    2.0
}

/// One end of a connector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub element_id: ElementId,
    pub element_kind: ElementKind,
}

impl Endpoint {
    pub fn note(id: impl Into<ElementId>) -> Self {
        Self {
            element_id: id.into(),
            element_kind: ElementKind::Note,
        }
    }

    pub fn drawing(id: impl Into<ElementId>) -> Self {
        Self {
            element_id: id.into(),
            element_kind: ElementKind::Drawing,
        }
    }
}

/// A connector between two elements.
///
/// Endpoints may refer to elements that no longer exist; consumers are
/// expected to skip such connectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub id: ElementId,
    pub from: Endpoint,
    pub to: Endpoint,
    pub color: SerializableColor,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Connector {
    pub fn new(id: impl Into<ElementId>, from: Endpoint, to: Endpoint) -> Self {
        Self {
            id: id.into(),
            from,
            to,
            color: SerializableColor::black(),
            stroke_width: default_stroke_width(),
            label: None,
        }
    }

    /// Check if either endpoint is `endpoint` (same id and same kind).
    pub fn references(&self, endpoint: &Endpoint) -> bool {
        &self.from == endpoint || &self.to == endpoint
    }
}

/// Partial update for a connector. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorPatch {
    pub from: Option<Endpoint>,
    pub to: Option<Endpoint>,
    pub color: Option<SerializableColor>,
    pub stroke_width: Option<f64>,
    /// `Some(None)` (JSON `null`) clears the label.
    #[serde(
        deserialize_with = "deserialize_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<Option<String>>,
}

/// Distinguishes an absent `label` (left as `None` by `#[serde(default)]`)
/// from an explicit `null`.
fn deserialize_label<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl ConnectorPatch {
    /// Shallow-merge the set fields into `connector`.
    pub fn apply_to(&self, connector: &mut Connector) {
        if let Some(from) = &self.from {
            connector.from = from.clone();
        }
        if let Some(to) = &self.to {
            connector.to = to.clone();
        }
        if let Some(color) = self.color {
            connector.color = color;
        }
        if let Some(stroke_width) = self.stroke_width {
            connector.stroke_width = stroke_width;
        }
        if let Some(label) = &self.label {
            connector.label = label.clone();
        }
    }
}
