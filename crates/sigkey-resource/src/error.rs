// ABOUTME: Error types for the signing key resource.
// ABOUTME: Remote errors are wrapped verbatim; not-found and not-modified never reach here.

use sigkey_github::GitHubError;
use std::num::ParseIntError;
use thiserror::Error;

/// Errors surfaced by resource operations.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The stored identifier is not a base-10 integer.
    #[error("failed to convert ID {id}: {source}")]
    InvalidIdentifier {
        id: String,
        #[source]
        source: ParseIntError,
    },

    /// The remote service failed with something other than 304/404.
    #[error(transparent)]
    Remote(#[from] GitHubError),

    /// Declared configuration is unusable.
    #[error("invalid value for {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Create was called without a declared configuration.
    #[error("no configuration declared for resource")]
    MissingConfig,
}

/// Result type alias using ResourceError.
pub type Result<T> = std::result::Result<T, ResourceError>;
