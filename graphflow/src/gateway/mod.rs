mod api;

pub use api::{
    ChatCompletionChoice, ChatCompletionImage, ChatCompletionImageUrl, ChatCompletionMessage,
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole, Modality,
};

use crate::{client_utils, GenerationError, GenerationResult};
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client,
};
use std::env;

pub const PROVIDER: &str = "model-gateway";

/// Environment variable holding the bearer credential for the model
/// gateway.
pub const GATEWAY_API_KEY_ENV: &str = "GATEWAY_API_KEY";
/// Optional environment overrides for the gateway address and model ids.
pub const GATEWAY_BASE_URL_ENV: &str = "GATEWAY_BASE_URL";
pub const GATEWAY_DIAGRAM_MODEL_ENV: &str = "GATEWAY_DIAGRAM_MODEL";
pub const GATEWAY_IMAGE_MODEL_ENV: &str = "GATEWAY_IMAGE_MODEL";

const DEFAULT_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";
const DEFAULT_DIAGRAM_MODEL: &str = "google/gemini-2.5-flash";
const DEFAULT_IMAGE_MODEL: &str = "google/gemini-2.5-flash-image-preview";

/// Configuration for the model gateway, validated once at construction.
/// A missing credential is a fatal configuration error, not a per-request
/// error.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub base_url: String,
    pub diagram_model: String,
    pub image_model: String,
}

impl GatewayConfig {
    pub fn new(api_key: impl Into<String>) -> GenerationResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenerationError::Configuration(format!(
                "{GATEWAY_API_KEY_ENV} not configured"
            )));
        }
        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            diagram_model: DEFAULT_DIAGRAM_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        })
    }

    /// Read the gateway configuration from the process environment.
    pub fn from_env() -> GenerationResult<Self> {
        let mut config = Self::new(env::var(GATEWAY_API_KEY_ENV).unwrap_or_default())?;
        if let Ok(base_url) = env::var(GATEWAY_BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        if let Ok(diagram_model) = env::var(GATEWAY_DIAGRAM_MODEL_ENV) {
            config.diagram_model = diagram_model;
        }
        if let Ok(image_model) = env::var(GATEWAY_IMAGE_MODEL_ENV) {
            config.image_model = image_model;
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Client for the OpenAI-compatible model gateway.
pub struct ModelGateway {
    api_key: String,
    base_url: String,
    client: Client,
}

impl ModelGateway {
    #[must_use]
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn request_headers(&self) -> GenerationResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let auth_header =
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|error| {
                GenerationError::InvalidInput(format!(
                    "Invalid gateway API key header value: {error}"
                ))
            })?;
        headers.insert(header::AUTHORIZATION, auth_header);
        Ok(headers)
    }

    /// Issue a single chat completion request. No retries; any non-2xx
    /// response surfaces as a status error carrying the body text.
    pub async fn chat(
        &self,
        request: &ChatCompletionRequest,
    ) -> GenerationResult<ChatCompletionResponse> {
        let headers = self.request_headers()?;
        client_utils::send_json(
            &self.client,
            &format!("{}/chat/completions", self.base_url),
            request,
            headers,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::{GatewayConfig, GenerationError};

    #[test]
    fn empty_credential_is_a_configuration_error() {
        let error = GatewayConfig::new("").unwrap_err();
        assert!(matches!(error, GenerationError::Configuration(_)));
    }

    #[test]
    fn base_url_override_trims_trailing_slash() {
        let config = GatewayConfig::new("key")
            .unwrap()
            .with_base_url("http://localhost:9999/");
        assert_eq!(config.base_url, "http://localhost:9999");
    }
}
