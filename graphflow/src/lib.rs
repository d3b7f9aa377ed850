mod client;
mod client_utils;
mod errors;
mod extract;
pub mod gateway;
mod graph;
mod identity;
mod orchestrator;
pub mod scene;
mod types;

pub use client::{resolve_endpoint, GraphServiceClient, GraphServiceClientOptions, API_URL_ENV};
pub use errors::*;
pub use extract::extract_diagram_syntax;
pub use graph::*;
pub use identity::{IdentityResolver, UserIdentity};
pub use orchestrator::{GenerationOrchestrator, DEFAULT_DIAGRAM_TYPE, PICTURE_TYPE};
pub use types::*;
