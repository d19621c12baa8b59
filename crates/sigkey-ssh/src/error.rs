// ABOUTME: Error types for SSH public key handling using thiserror.
// ABOUTME: Covers reading key files and parsing OpenSSH public key lines.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while handling SSH public keys.
#[derive(Error, Debug)]
pub enum SshError {
    /// Failed to read a public key file from disk.
    #[error("failed to read SSH public key from {path}: {source}")]
    ReadKey {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key material is not a valid OpenSSH public key line.
    #[error("failed to parse SSH public key: {0}")]
    ParseKey(#[source] ssh_key::Error),

    /// Key material was empty after trimming whitespace.
    #[error("SSH public key is empty")]
    EmptyKey,
}

/// Result type alias using SshError.
pub type Result<T> = std::result::Result<T, SshError>;
