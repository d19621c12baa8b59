// ABOUTME: SigningKeyService trait, the seam between the resource and GitHub.
// ABOUTME: Implemented by GitHubClient and by in-memory fakes in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Response, SigningKey};

/// Operations on the authenticated user's SSH signing keys.
///
/// Implementations report every non-success status as an error carrying
/// the status code, including `304 Not Modified` for conditional reads.
#[async_trait]
pub trait SigningKeyService: Send + Sync {
    /// Register a new signing key.
    async fn create_key(&self, title: &str, key: &str) -> Result<(SigningKey, Response)>;

    /// Fetch one key. When `etag` is given the request is conditional and
    /// an unchanged key yields a `304` error.
    async fn get_key(&self, id: i64, etag: Option<&str>) -> Result<(SigningKey, Response)>;

    /// Remove a key.
    async fn delete_key(&self, id: i64) -> Result<Response>;
}
