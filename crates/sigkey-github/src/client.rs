// ABOUTME: reqwest-backed implementation of SigningKeyService.
// ABOUTME: Talks to /user/ssh_signing_keys with GitHub's versioned JSON media type.

use async_trait::async_trait;
use reqwest::{header, Client, Method, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{GitHubError, Result};
use crate::service::SigningKeyService;
use crate::types::{CreateSigningKeyRequest, Response, SigningKey};

/// Public GitHub API root.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Per-request timeout applied by the HTTP client.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_VERSION: &str = "2022-11-28";
const MEDIA_TYPE: &str = "application/vnd.github+json";
const SIGNING_KEYS_PATH: &str = "user/ssh_signing_keys";

/// Connection settings for [`GitHubClient`].
#[derive(Clone)]
pub struct ClientConfig {
    /// API root, e.g. `https://api.github.com` or `https://ghe.example.com/api/v3`.
    pub base_url: String,
    /// Personal access token or app token. Requests go out anonymously without one.
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP client for the signing key endpoints.
pub struct GitHubClient {
    client: Client,
    keys_url: Url,
}

impl GitHubClient {
    /// Build a client from `config`.
    ///
    /// # Errors
    /// Fails if the base URL is not an absolute http(s) URL, the token
    /// cannot be sent as a header, or the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let keys_url = signing_keys_url(&config.base_url)?;

        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(MEDIA_TYPE));
        headers.insert(
            header::HeaderName::from_static("x-github-api-version"),
            header::HeaderValue::from_static(API_VERSION),
        );
        if let Some(ref token) = config.token {
            let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| GitHubError::InvalidToken(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(format!("sigkey/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, keys_url })
    }

    /// URL of a single signing key.
    pub fn key_url(&self, id: i64) -> Url {
        let mut url = self.keys_url.clone();
        // keys_url is validated as a base URL at construction
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id.to_string());
        }
        url
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(status = %status, error = %e, "failed to read error body");
                String::new()
            }
        };
        debug!(status = %status, "GitHub returned non-success status");
        Err(GitHubError::from_response(status, &body))
    }

    async fn decode_key(response: reqwest::Response) -> Result<(SigningKey, Response)> {
        let meta = Response::from_reqwest(&response);
        let bytes = response.bytes().await?;
        let key: SigningKey = serde_json::from_slice(&bytes)?;
        Ok((key, meta))
    }
}

#[async_trait]
impl SigningKeyService for GitHubClient {
    async fn create_key(&self, title: &str, key: &str) -> Result<(SigningKey, Response)> {
        debug!(title, "creating SSH signing key");
        let request = self
            .client
            .request(Method::POST, self.keys_url.clone())
            .json(&CreateSigningKeyRequest { title, key });

        let response = self.send(request).await?;
        Self::decode_key(response).await
    }

    async fn get_key(&self, id: i64, etag: Option<&str>) -> Result<(SigningKey, Response)> {
        let mut request = self.client.request(Method::GET, self.key_url(id));
        if let Some(etag) = etag.filter(|e| !e.is_empty()) {
            debug!(ssh_signing_key_id = id, etag, "conditional fetch");
            request = request.header(header::IF_NONE_MATCH, etag);
        }

        let response = self.send(request).await?;
        Self::decode_key(response).await
    }

    async fn delete_key(&self, id: i64) -> Result<Response> {
        debug!(ssh_signing_key_id = id, "deleting SSH signing key");
        let request = self.client.request(Method::DELETE, self.key_url(id));
        let response = self.send(request).await?;
        let meta = Response::from_reqwest(&response);
        if meta.status != StatusCode::NO_CONTENT {
            debug!(status = %meta.status, "unexpected success status on delete");
        }
        Ok(meta)
    }
}

/// Resolve `{base}/user/ssh_signing_keys`, keeping any path prefix on the base.
fn signing_keys_url(base_url: &str) -> Result<Url> {
    let invalid = |reason: &str| GitHubError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: reason.to_string(),
    };

    let mut base = Url::parse(base_url.trim()).map_err(|e| invalid(&e.to_string()))?;
    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(invalid("scheme must be http or https"));
    }
    if base.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base"));
    }
    base.set_query(None);
    base.set_fragment(None);

    // Url::join replaces the last segment unless the path ends in '/'
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(SIGNING_KEYS_PATH)
        .map_err(|e| invalid(&e.to_string()))
}
