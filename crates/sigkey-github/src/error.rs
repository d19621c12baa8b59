// ABOUTME: Error types for the GitHub signing key client.
// ABOUTME: Non-2xx responses keep their status so callers can classify 304 and 404.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors returned by the GitHub client.
#[derive(Error, Debug)]
pub enum GitHubError {
    /// Transport failure: connection, timeout, TLS, or request building.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub answered with a non-success status.
    #[error("GitHub API error {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// Response body did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configured base URL cannot be used as an API root.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Token contains characters that cannot go in a header.
    #[error("invalid token: {0}")]
    InvalidToken(String),
}

/// GitHub's JSON error body (`{"message": "...", "documentation_url": "..."}`).
#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GitHubError {
    /// Build a status error from a response body, preferring GitHub's own message.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .map(|b| b.message)
            .ok()
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

        GitHubError::Status { status, message }
    }

    /// HTTP status carried by this error, if it came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GitHubError::Status { status, .. } => Some(*status),
            GitHubError::Http(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_not_modified(&self) -> bool {
        self.status() == Some(StatusCode::NOT_MODIFIED)
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, GitHubError>;
