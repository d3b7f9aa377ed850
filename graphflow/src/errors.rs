use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A required configuration value is missing. Fatal at startup, never
    /// recoverable per request.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// The caller's bearer token did not resolve to a user. Raised before
    /// any upstream call is made.
    #[error("User not authenticated")]
    Unauthenticated,
    /// The request to the upstream service failed or the parsing of the
    /// response failed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The upstream service returned a non-2xx status code. Carries the
    /// status and the response body text.
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The response from the upstream service was unexpected (e.g. no
    /// choices in a completion, or a render response without content for
    /// the requested format).
    #[error("Invariant from {0}: {1}")]
    Invariant(&'static str, String),
}

pub type GenerationResult<T> = Result<T, GenerationError>;
