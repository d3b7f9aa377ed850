use crate::{RenderError, RenderResult};
use graphflow::{scene::scene_from_graph, GraphData};
use serde_json::Value;

/// The effective render payload: callers supply exactly one of a visual
/// scene or backend graph data; the engine is agnostic to which.
#[derive(Debug, Clone)]
pub enum RenderSource {
    Scene(Value),
    Graph(GraphData),
}

impl RenderSource {
    /// Build a source from the wire shape where both fields are optional.
    /// The scene wins when both are present; an empty payload is rejected
    /// here, before any rendering resource is touched.
    pub fn from_parts(scene: Option<Value>, graph_data: Option<GraphData>) -> RenderResult<Self> {
        match (scene, graph_data) {
            (Some(scene), _) => Ok(Self::Scene(scene)),
            (None, Some(graph)) => Ok(Self::Graph(graph)),
            (None, None) => Err(RenderError::InvalidInput(
                "Provide scene or graph_data".to_string(),
            )),
        }
    }

    /// Resolve to the scene document the engine consumes.
    #[must_use]
    pub fn into_scene(self) -> Value {
        match self {
            Self::Scene(scene) => scene,
            Self::Graph(graph) => scene_from_graph(&graph),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RenderSource;
    use crate::RenderError;
    use graphflow::{GraphData, NodeData};
    use serde_json::json;

    #[test]
    fn empty_payload_is_rejected() {
        let error = RenderSource::from_parts(None, None).unwrap_err();
        assert!(matches!(error, RenderError::InvalidInput(_)));
    }

    #[test]
    fn scene_wins_when_both_are_supplied() {
        let scene = json!({"elements": [], "marker": true});
        let source =
            RenderSource::from_parts(Some(scene.clone()), Some(GraphData::default())).unwrap();
        assert_eq!(source.into_scene(), scene);
    }

    #[test]
    fn graph_data_is_converted_to_a_scene() {
        let graph = GraphData {
            nodes: vec![NodeData {
                id: "a".to_string(),
                label: "Only".to_string(),
                ..NodeData::default()
            }],
            ..GraphData::default()
        };
        let scene = RenderSource::from_parts(None, Some(graph)).unwrap().into_scene();
        assert_eq!(scene["type"], "excalidraw");
        assert!(!scene["elements"].as_array().unwrap().is_empty());
    }
}
