// ABOUTME: SSH public key helpers for sigkey.
// ABOUTME: Parses, normalizes, and fingerprints the key material uploaded as signing keys.

pub mod error;
pub mod fingerprint;
pub mod key;

pub use error::{Result, SshError};
pub use fingerprint::fingerprint;
pub use key::{keys_equivalent, normalize_key_material, parse_public_key, read_public_key_file};
