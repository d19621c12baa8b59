// ABOUTME: Create/read/delete/import for a GitHub user SSH signing key.
// ABOUTME: Mirrors remote fields into ResourceData using the numeric key ID as the join key.

use sigkey_github::SigningKeyService;
use tracing::{debug, info};

use crate::error::{ResourceError, Result};
use crate::state::ResourceData;

/// Type name the resource is registered under.
pub const RESOURCE_TYPE: &str = "github_user_ssh_signing_key";

/// Parse a stored identifier into GitHub's numeric key ID.
pub fn parse_id(id: &str) -> Result<i64> {
    id.parse::<i64>()
        .map_err(|source| ResourceError::InvalidIdentifier {
            id: id.to_string(),
            source,
        })
}

/// Adapter between declared signing key state and the GitHub API.
///
/// Holds no state of its own. The service is passed into every call and
/// each instance's `ResourceData` is borrowed mutably, so operations on one
/// instance are sequential while different instances may run concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct SshSigningKeyResource;

impl SshSigningKeyResource {
    pub fn new() -> Self {
        Self
    }

    pub fn type_name(&self) -> &'static str {
        RESOURCE_TYPE
    }

    /// Register the declared key with GitHub.
    ///
    /// On success the ID, title, key and ETag come from the response, not
    /// from the declaration, so server-side normalization is reflected.
    /// On failure `data` is left untouched.
    pub async fn create<S>(&self, client: &S, data: &mut ResourceData) -> Result<()>
    where
        S: SigningKeyService + ?Sized,
    {
        if !data.is_absent() {
            parse_id(data.id())?;
        }
        let config = data.config().cloned().ok_or(ResourceError::MissingConfig)?;

        let (created, response) = client.create_key(&config.title, &config.key).await?;

        let id = created.id.to_string();
        info!(ssh_signing_key_id = %id, title = %created.title, "created SSH signing key");

        data.set_id(id);
        data.set_remote(&created.title, &created.key, response.etag_or_empty());
        data.set_new_resource(true);
        Ok(())
    }

    /// Refresh `data` from GitHub.
    ///
    /// Established resources send their stored ETag, and an unchanged key
    /// leaves `data` exactly as it was. A key deleted outside this tool
    /// clears the ID without an error. Any other failure is returned as-is.
    pub async fn read<S>(&self, client: &S, data: &mut ResourceData) -> Result<()>
    where
        S: SigningKeyService + ?Sized,
    {
        let id = parse_id(data.id())?;
        let etag = (!data.is_new_resource()).then(|| data.etag().to_string());

        match client.get_key(id, etag.as_deref()).await {
            Ok((key, response)) => {
                data.set_remote(&key.title, &key.key, response.etag_or_empty());
                data.set_new_resource(false);
                Ok(())
            }
            Err(e) if e.is_not_modified() => {
                debug!(ssh_signing_key_id = id, "SSH signing key not modified");
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                info!(
                    ssh_signing_key_id = %data.id(),
                    "Removing user SSH signing key {} from state because it no longer exists in GitHub",
                    data.id()
                );
                data.clear_id();
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the key from GitHub. A key that is already gone counts as deleted.
    pub async fn delete<S>(&self, client: &S, data: &mut ResourceData) -> Result<()>
    where
        S: SigningKeyService + ?Sized,
    {
        let id = parse_id(data.id())?;

        match client.delete_key(id).await {
            Ok(_) => {
                info!(ssh_signing_key_id = id, "deleted SSH signing key");
            }
            Err(e) if e.is_not_found() => {
                debug!(ssh_signing_key_id = id, "SSH signing key already deleted");
            }
            Err(e) => return Err(e.into()),
        }

        data.clear_id();
        Ok(())
    }

    /// Adopt an existing key by ID. The caller follows up with [`read`](Self::read).
    pub fn import(&self, id: impl Into<String>) -> ResourceData {
        let mut data = ResourceData::from_id(id);
        data.set_new_resource(true);
        data
    }
}
