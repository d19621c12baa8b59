// ABOUTME: SSH public key loading and normalization.
// ABOUTME: Signing keys are compared with surrounding whitespace removed.

use crate::error::{Result, SshError};
use ssh_key::PublicKey;
use std::path::Path;

/// Trim the whitespace editors and `cat` leave around a key line.
pub fn normalize_key_material(material: &str) -> &str {
    material.trim()
}

/// True when `stored` and `declared` are the same key once the declared
/// value is normalized. Only the declared side is trimmed; a stored value
/// always comes from the server verbatim.
pub fn keys_equivalent(stored: &str, declared: &str) -> bool {
    stored == normalize_key_material(declared)
}

/// Parse an OpenSSH public key line (`ssh-ed25519 AAAA... comment`).
///
/// # Errors
/// Returns `SshError::EmptyKey` for blank input and `SshError::ParseKey`
/// when the line is not a valid public key.
pub fn parse_public_key(material: &str) -> Result<PublicKey> {
    let material = normalize_key_material(material);
    if material.is_empty() {
        return Err(SshError::EmptyKey);
    }
    PublicKey::from_openssh(material).map_err(SshError::ParseKey)
}

/// Read a `.pub` file and return its normalized key line.
///
/// The content is validated as a public key so a private key path passed
/// by mistake is rejected before it reaches the network.
///
/// # Errors
/// Returns an error if the file cannot be read or does not hold a public key.
pub fn read_public_key_file(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|e| SshError::ReadKey {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_public_key(&content)?;
    Ok(normalize_key_material(&content).to_string())
}
