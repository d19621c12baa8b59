// ABOUTME: GitHub REST client for the authenticated user's SSH signing keys.
// ABOUTME: Exposes the SigningKeyService seam plus a reqwest-backed implementation.

pub mod client;
pub mod error;
pub mod service;
pub mod types;

pub use client::{ClientConfig, GitHubClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use error::{GitHubError, Result};
pub use service::SigningKeyService;
pub use types::{Response, SigningKey};

// Status codes appear in errors and response metadata
pub use reqwest::StatusCode;
