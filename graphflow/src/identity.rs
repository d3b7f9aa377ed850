use crate::{GenerationResult, Tier};

/// A caller identity resolved from a bearer token.
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub user_id: String,
    pub tier: Tier,
}

/// Exchanges a bearer token for the user record it belongs to.
///
/// Identity resolution is an external collaborator; the orchestrator only
/// consumes the resolved record and never calls upstream before it is
/// established.
#[async_trait::async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Returns `None` when the token does not resolve to a user.
    async fn resolve(&self, bearer_token: &str) -> GenerationResult<Option<UserIdentity>>;
}
