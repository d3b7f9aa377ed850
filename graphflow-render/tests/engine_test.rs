use graphflow::{
    scene::scene_from_graph, EdgeData, GraphData, NodeData, RenderArtifact, RenderFormat,
};
use graphflow_render::{Renderer, RendererConfig};
use serde_json::Value;

fn sample_scene() -> Value {
    scene_from_graph(&GraphData {
        nodes: vec![
            NodeData {
                id: "a".to_string(),
                label: "Login".to_string(),
                x: 0.0,
                y: 0.0,
                ..NodeData::default()
            },
            NodeData {
                id: "b".to_string(),
                label: "Verify".to_string(),
                x: 220.0,
                y: 140.0,
                ..NodeData::default()
            },
        ],
        edges: vec![EdgeData {
            id: "e0".to_string(),
            source: "a".to_string(),
            target: "b".to_string(),
            ..EdgeData::default()
        }],
        ..GraphData::default()
    })
}

#[tokio::test]
#[ignore = "requires a local chromium install"]
async fn renders_svg_markup_for_a_valid_scene() {
    let renderer = Renderer::new(RendererConfig::default());
    let artifact = renderer
        .render(&sample_scene(), RenderFormat::Svg)
        .await
        .unwrap();

    let RenderArtifact::Svg(markup) = artifact else {
        panic!("expected an SVG artifact");
    };
    assert!(markup.trim_start().starts_with("<svg"));
    assert!(markup.contains("Login"));
    assert!(markup.contains("Verify"));
}

#[tokio::test]
#[ignore = "requires a local chromium install"]
async fn rendering_the_same_scene_twice_is_byte_identical() {
    let renderer = Renderer::new(RendererConfig::default());
    let scene = sample_scene();

    let first = renderer.render(&scene, RenderFormat::Svg).await.unwrap();
    let second = renderer.render(&scene, RenderFormat::Svg).await.unwrap();
    assert_eq!(first, second);
}
