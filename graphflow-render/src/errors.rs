use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Usage: graphflow-render <scene.json> <out.svg|out.png>")]
    Usage,
    /// The scene file could not be read. Raised before any rendering
    /// resource is allocated.
    #[error("Failed to read scene {path}: {source}")]
    ReadScene {
        path: String,
        source: std::io::Error,
    },
    /// The scene file is not valid JSON. Raised before any rendering
    /// resource is allocated.
    #[error("Failed to parse scene {path}: {source}")]
    ParseScene {
        path: String,
        source: serde_json::Error,
    },
    #[error("Invalid render input: {0}")]
    InvalidInput(String),
    #[error("Harness page not found at {path}: {source}")]
    Harness {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to configure browser: {0}")]
    BrowserConfig(String),
    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),
    /// The harness failed to become ready or to signal completion within
    /// the render deadline. Fatal, not retryable.
    #[error("Timed out after {timeout:?} waiting for {waited}")]
    Timeout {
        waited: &'static str,
        timeout: Duration,
    },
    /// The harness signalled completion but its result globals did not
    /// hold the expected content.
    #[error("Invariant from harness: {0}")]
    Invariant(String),
    #[error("Failed to decode PNG data: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("Failed to write {path}: {source}")]
    WriteArtifact {
        path: String,
        source: std::io::Error,
    },
}

pub type RenderResult<T> = Result<T, RenderError>;
