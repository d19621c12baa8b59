// ABOUTME: Wire types for the /user/ssh_signing_keys endpoints.
// ABOUTME: SigningKey is the remote record; Response carries status and ETag.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// An SSH signing key as GitHub returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningKey {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body of `POST /user/ssh_signing_keys`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateSigningKeyRequest<'a> {
    pub title: &'a str,
    pub key: &'a str,
}

/// Metadata of the HTTP response behind a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    /// Value of the `ETag` header, when the server sent one.
    pub etag: Option<String>,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self { status, etag: None }
    }

    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }

    pub(crate) fn from_reqwest(response: &reqwest::Response) -> Self {
        let etag = response
            .headers()
            .get(reqwest::header::ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Self {
            status: response.status(),
            etag,
        }
    }

    /// ETag as stored in resource state; missing headers become an empty string.
    pub fn etag_or_empty(&self) -> &str {
        self.etag.as_deref().unwrap_or("")
    }
}
