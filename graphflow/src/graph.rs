use serde::{Deserialize, Serialize};

/// Backend representation of diagram semantics: nodes and edges plus
/// optional layout and style hints. Distinct from the visual scene the
/// renderer consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<NodeData>,
    #[serde(default)]
    pub edges: Vec<EdgeData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_hints: Option<LayoutHints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_style: Option<GlobalStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decorations: Option<Vec<Decoration>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeData {
    pub id: String,
    pub label: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub style: NodeStyle,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdgeData {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub style: EdgeStyle,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeStyle {
    #[serde(default)]
    pub shape: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdgeStyle {
    #[serde(default)]
    pub line: String,
    #[serde(default)]
    pub arrow: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutHints {
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub algorithm: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalStyle {
    #[serde(default)]
    pub font: String,
    #[serde(default)]
    pub background: String,
}

/// A freestanding annotation placed on the scene, either anchored to a
/// node or at absolute coordinates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Decoration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<DecorationOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<DecorationSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builtin: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecorationOffset {
    pub dx: f32,
    pub dy: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecorationSize {
    pub w: f32,
    pub h: f32,
}
