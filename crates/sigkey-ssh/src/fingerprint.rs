// ABOUTME: SSH public key fingerprint computation.
// ABOUTME: Produces the SHA256:<base64> form shown by ssh-keygen -l and GitHub settings.

use ssh_key::{HashAlg, PublicKey};

/// Compute the SHA256 fingerprint of a public key.
///
/// The hash covers the key in SSH wire format, so the comment does not
/// affect it. Any algorithm GitHub accepts for signing keys is supported.
pub fn fingerprint(public_key: &PublicKey) -> String {
    public_key.fingerprint(HashAlg::Sha256).to_string()
}
