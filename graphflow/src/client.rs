use crate::{
    client_utils, GenerateRequest, GenerateResponse, GenerationError, GenerationResult,
    RenderArtifact, RenderFormat, RenderRequest,
};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client,
};
use serde::Deserialize;
use std::{collections::HashMap, env, sync::OnceLock};

pub const SERVICE: &str = "graph-service";

/// Environment override for the graph service address.
pub const API_URL_ENV: &str = "GRAPHFLOW_API_URL";

/// The bundled interface description. Only the `servers` array matters
/// for endpoint resolution.
const API_DESCRIPTION: &str = include_str!("../openapi.json");

#[derive(Debug, Default, Deserialize)]
struct ApiDescription {
    #[serde(default)]
    servers: Vec<ApiServer>,
}

#[derive(Debug, Deserialize)]
struct ApiServer {
    url: String,
}

/// `servers[0].url` from the bundled interface description, if present.
fn description_server_url() -> Option<&'static str> {
    static URL: OnceLock<Option<String>> = OnceLock::new();
    URL.get_or_init(|| {
        serde_json::from_str::<ApiDescription>(API_DESCRIPTION)
            .unwrap_or_default()
            .servers
            .into_iter()
            .next()
            .map(|server| server.url)
    })
    .as_deref()
}

/// Resolve the graph service base address: the first non-empty, trimmed
/// value of (1) the interface description's first server URL, (2) the
/// environment override, (3) the caller's own origin. Total and
/// deterministic; `origin` is always available, so this never fails.
#[must_use]
pub fn resolve_endpoint(
    description_url: Option<&str>,
    env_url: Option<&str>,
    origin: &str,
) -> String {
    [description_url, env_url]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or_else(|| origin.trim())
        .to_string()
}

#[derive(Clone, Default)]
pub struct GraphServiceClientOptions {
    /// Overrides endpoint resolution entirely when set.
    pub base_url: Option<String>,
    /// Extra headers sent with every request (e.g. Authorization). The
    /// default Content-Type cannot be overridden.
    pub headers: Option<HashMap<String, String>>,
    pub client: Option<Client>,
}

/// Client for the graph service's generate and render endpoints.
///
/// Issues single JSON calls with no caching, no persistence, and no
/// retries; retry policy belongs to the caller.
pub struct GraphServiceClient {
    base_url: String,
    client: Client,
    headers: HashMap<String, String>,
}

impl GraphServiceClient {
    #[must_use]
    pub fn new(origin: impl Into<String>, options: GraphServiceClientOptions) -> Self {
        let GraphServiceClientOptions {
            base_url,
            headers,
            client,
        } = options;

        let origin: String = origin.into();
        let base_url = base_url
            .unwrap_or_else(|| {
                resolve_endpoint(
                    description_server_url(),
                    env::var(API_URL_ENV).ok().as_deref(),
                    &origin,
                )
            })
            .trim_end_matches('/')
            .to_string();

        Self {
            base_url,
            client: client.unwrap_or_else(Client::new),
            headers: headers.unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_headers(&self) -> GenerationResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (key, value) in &self.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                GenerationError::InvalidInput(format!("Invalid header name '{key}': {error}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                GenerationError::InvalidInput(format!("Invalid header value for '{key}': {error}"))
            })?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }

    /// Generate graph data (and optionally a scene) from user content.
    pub async fn generate_graph(
        &self,
        request: &GenerateRequest,
    ) -> GenerationResult<GenerateResponse> {
        let headers = self.request_headers()?;
        client_utils::send_json(
            &self.client,
            &format!("{}/graph/generate", self.base_url),
            request,
            headers,
        )
        .await
    }

    /// Render a scene (or graph data) and normalize the response into a
    /// single artifact keyed by the requested format.
    pub async fn render_scene(&self, request: &RenderRequest) -> GenerationResult<RenderArtifact> {
        if request.scene.is_none() && request.graph_data.is_none() {
            return Err(GenerationError::InvalidInput(
                "Provide scene or graph_data".to_string(),
            ));
        }

        let headers = self.request_headers()?;
        let body: RenderResponseBody = client_utils::send_json(
            &self.client,
            &format!("{}/graph/render", self.base_url),
            request,
            headers,
        )
        .await?;

        body.into_artifact(request.format)
    }
}

/// The heterogeneous render response shape: several optional fields, only
/// one populated depending on the backend contract.
#[derive(Debug, Default, Deserialize)]
struct RenderResponseBody {
    #[serde(default)]
    svg: Option<String>,
    #[serde(default)]
    png_base64: Option<String>,
    #[serde(default)]
    svg_url: Option<String>,
    #[serde(default)]
    png_url: Option<String>,
}

impl RenderResponseBody {
    /// Inline content for the requested format is required; URL-only
    /// responses do not satisfy the artifact contract.
    fn into_artifact(self, format: RenderFormat) -> GenerationResult<RenderArtifact> {
        match format {
            RenderFormat::Svg => self.svg.map(RenderArtifact::Svg).ok_or_else(|| {
                GenerationError::Invariant(SERVICE, "No inline SVG in render response".to_string())
            }),
            RenderFormat::Png => self.png_base64.map(RenderArtifact::Png).ok_or_else(|| {
                GenerationError::Invariant(SERVICE, "No inline PNG in render response".to_string())
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_url_wins_when_present() {
        let resolved = resolve_endpoint(Some("http://bundled:1"), Some("http://env:2"), "http://o:3");
        assert_eq!(resolved, "http://bundled:1");
    }

    #[test]
    fn blank_description_url_falls_through_to_env() {
        let resolved = resolve_endpoint(Some("   "), Some("http://env:2"), "http://o:3");
        assert_eq!(resolved, "http://env:2");
    }

    #[test]
    fn origin_is_the_final_fallback() {
        assert_eq!(resolve_endpoint(None, None, "http://o:3"), "http://o:3");
        assert_eq!(resolve_endpoint(Some(""), Some(""), "http://o:3"), "http://o:3");
    }

    #[test]
    fn resolved_values_are_trimmed() {
        let resolved = resolve_endpoint(Some(" http://bundled:1 "), None, "http://o:3");
        assert_eq!(resolved, "http://bundled:1");
    }

    #[test]
    fn bundled_description_carries_a_server_url() {
        assert_eq!(description_server_url(), Some("http://localhost:5173"));
    }

    #[test]
    fn url_only_render_response_is_an_invariant_error() {
        let body = RenderResponseBody {
            svg_url: Some("https://cdn.example.com/out.svg".to_string()),
            ..RenderResponseBody::default()
        };
        let error = body.into_artifact(RenderFormat::Svg).unwrap_err();
        assert!(matches!(error, GenerationError::Invariant(..)));
    }

    #[test]
    fn render_response_is_keyed_by_requested_format() {
        let body = RenderResponseBody {
            svg: Some("<svg/>".to_string()),
            png_base64: Some("aGVsbG8=".to_string()),
            ..RenderResponseBody::default()
        };
        let artifact = body.into_artifact(RenderFormat::Png).unwrap();
        assert_eq!(artifact, RenderArtifact::Png("aGVsbG8=".to_string()));
    }
}
