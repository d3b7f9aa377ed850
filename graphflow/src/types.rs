use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message in the conversation history. Insertion order is chronology
/// and is preserved verbatim when the history is forwarded to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    User { content: String },
    Assistant { content: String },
    System { content: String },
}

impl Message {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: content.into(),
        }
    }

    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::User { content } | Self::Assistant { content } | Self::System { content } => {
                content
            }
        }
    }
}

/// The caller's service level. Affects quota upstream, not pipeline
/// behavior at this layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Pro,
}

/// Request body for the graph service's generate endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_images: Option<bool>,
}

/// Response body from the graph service's generate endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub graph_data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<Value>,
}

/// Output format of a render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    #[default]
    Svg,
    Png,
}

impl std::fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Svg => write!(f, "svg"),
            Self::Png => write!(f, "png"),
        }
    }
}

/// Request body for the graph service's render endpoint. Exactly one of
/// `scene` and `graph_data` is supplied by the caller; the service is
/// agnostic to which.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_data: Option<Value>,
    #[serde(default)]
    pub format: RenderFormat,
}

impl RenderRequest {
    #[must_use]
    pub fn from_scene(scene: Value, format: RenderFormat) -> Self {
        Self {
            scene: Some(scene),
            graph_data: None,
            format,
        }
    }

    #[must_use]
    pub fn from_graph_data(graph_data: Value, format: RenderFormat) -> Self {
        Self {
            scene: None,
            graph_data: Some(graph_data),
            format,
        }
    }
}

/// A rendered artifact, keyed by the format that was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderArtifact {
    /// SVG markup.
    Svg(String),
    /// Base64-encoded PNG bytes.
    Png(String),
}

/// The result of a generation request. Exactly one variant is populated
/// per response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GenerationOutput {
    Diagram(DiagramOutput),
    Image(ImageOutput),
}

/// A generated diagram: the raw model output plus the diagram syntax
/// extracted from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramOutput {
    pub content: String,
    #[serde(rename = "mermaidCode")]
    pub mermaid_code: String,
}

/// A generated image: the raw model output plus the first image URL, if
/// the model returned one. `image_url` serializes as an explicit null
/// when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageOutput {
    pub content: String,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}
