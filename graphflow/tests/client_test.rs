mod common;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use graphflow::{
    GenerateRequest, GenerationError, GraphServiceClient, GraphServiceClientOptions,
    RenderArtifact, RenderFormat, RenderRequest, Tier,
};
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

fn client_for(addr: SocketAddr, headers: Option<HashMap<String, String>>) -> GraphServiceClient {
    GraphServiceClient::new(
        "http://unused-origin",
        GraphServiceClientOptions {
            base_url: Some(format!("http://{addr}")),
            headers,
            client: None,
        },
    )
}

#[tokio::test]
async fn generate_graph_posts_json_and_parses_the_response() {
    let app = Router::new().route(
        "/graph/generate",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["content"], "User login flow");
            assert_eq!(body["tier"], "pro");
            Json(json!({
                "graph_data": {"nodes": [], "edges": []},
                "scene": {"type": "excalidraw", "elements": []}
            }))
        }),
    );
    let addr = common::serve(app).await;

    let request = GenerateRequest {
        content: "User login flow".to_string(),
        tier: Some(Tier::Pro),
        allow_images: None,
    };
    let response = client_for(addr, None).generate_graph(&request).await.unwrap();

    assert!(response.graph_data.is_object());
    assert!(response.scene.is_some());
}

#[tokio::test]
async fn caller_headers_are_added_but_content_type_stays_json() {
    let seen = Arc::new(Mutex::new(HeaderMap::new()));
    let app = Router::new()
        .route(
            "/graph/generate",
            post(
                |State(seen): State<Arc<Mutex<HeaderMap>>>, headers: HeaderMap| async move {
                    *seen.lock().unwrap() = headers;
                    Json(json!({"graph_data": {}}))
                },
            ),
        )
        .with_state(seen.clone());
    let addr = common::serve(app).await;

    let mut extra = HashMap::new();
    extra.insert("authorization".to_string(), "Bearer caller-token".to_string());
    extra.insert("content-type".to_string(), "text/plain".to_string());

    let request = GenerateRequest {
        content: "anything".to_string(),
        tier: None,
        allow_images: None,
    };
    client_for(addr, Some(extra))
        .generate_graph(&request)
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen["authorization"], "Bearer caller-token");
    assert_eq!(seen["content-type"], "application/json");
}

#[tokio::test]
async fn render_scene_normalizes_an_inline_svg_response() {
    let app = Router::new().route(
        "/graph/render",
        post(|| async { Json(json!({"svg": "<svg xmlns=\"http://www.w3.org/2000/svg\"/>"})) }),
    );
    let addr = common::serve(app).await;

    let request = RenderRequest::from_scene(json!({"elements": []}), RenderFormat::Svg);
    let artifact = client_for(addr, None).render_scene(&request).await.unwrap();

    let RenderArtifact::Svg(markup) = artifact else {
        panic!("expected an SVG artifact");
    };
    assert!(markup.starts_with("<svg"));
}

#[tokio::test]
async fn render_scene_normalizes_an_inline_png_response() {
    let app = Router::new().route(
        "/graph/render",
        post(|| async { Json(json!({"png_base64": "iVBORw0KGgo="})) }),
    );
    let addr = common::serve(app).await;

    let request = RenderRequest::from_graph_data(json!({"nodes": []}), RenderFormat::Png);
    let artifact = client_for(addr, None).render_scene(&request).await.unwrap();

    assert_eq!(artifact, RenderArtifact::Png("iVBORw0KGgo=".to_string()));
}

#[tokio::test]
async fn non_2xx_surfaces_status_and_body_without_retry() {
    let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let app = Router::new()
        .route(
            "/graph/render",
            post(
                |State(calls): State<Arc<std::sync::atomic::AtomicUsize>>| async move {
                    calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                    (StatusCode::UNPROCESSABLE_ENTITY, "Provide scene or graph_data")
                },
            ),
        )
        .with_state(calls.clone());
    let addr = common::serve(app).await;

    let request = RenderRequest::from_scene(Value::Null, RenderFormat::Svg);
    let error = client_for(addr, None)
        .render_scene(&request)
        .await
        .unwrap_err();

    let GenerationError::StatusCode(status, body) = error else {
        panic!("expected a status error, got {error}");
    };
    assert_eq!(status.as_u16(), 422);
    assert!(body.contains("Provide scene or graph_data"));
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_render_payload_is_rejected_before_the_network_call() {
    // Unroutable base URL: the defensive check must fire first.
    let client = GraphServiceClient::new(
        "http://unused-origin",
        GraphServiceClientOptions {
            base_url: Some("http://127.0.0.1:9".to_string()),
            ..GraphServiceClientOptions::default()
        },
    );

    let error = client
        .render_scene(&RenderRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(error, GenerationError::InvalidInput(_)));
}
