// ABOUTME: Per-instance state store for the signing key resource.
// ABOUTME: Holds the identifier, last-synced attributes, and the declared config.

use serde::{Deserialize, Serialize};

use crate::schema::SigningKeyConfig;

/// State of one resource instance.
///
/// An empty `id` means the resource is absent and should be dropped from
/// state. `title`, `key` and `etag` always hold the last values GitHub
/// returned. Only the persisted fields are serialized; the declared config
/// and the new-resource flag belong to the current run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    key: String,
    #[serde(default)]
    etag: String,

    #[serde(skip)]
    new_resource: bool,
    #[serde(skip)]
    config: Option<SigningKeyConfig>,
}

impl ResourceData {
    /// Empty state for a resource about to be created.
    pub fn new(config: SigningKeyConfig) -> Self {
        Self {
            config: Some(config),
            ..Default::default()
        }
    }

    /// State holding only an identifier, as produced by import.
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_config(mut self, config: SigningKeyConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn set_config(&mut self, config: SigningKeyConfig) {
        self.config = Some(config);
    }

    pub fn config(&self) -> Option<&SigningKeyConfig> {
        self.config.as_ref()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Drop the identifier, marking the resource as gone.
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    pub fn is_absent(&self) -> bool {
        self.id.is_empty()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn etag(&self) -> &str {
        &self.etag
    }

    /// Value of a stored attribute by schema name.
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "key" => Some(&self.key),
            "etag" => Some(&self.etag),
            _ => None,
        }
    }

    /// Overwrite the synced attributes with values from GitHub.
    pub fn set_remote(&mut self, title: &str, key: &str, etag: &str) {
        self.title = title.to_string();
        self.key = key.to_string();
        self.etag = etag.to_string();
    }

    /// True right after create or import, before the first refresh completes.
    pub fn is_new_resource(&self) -> bool {
        self.new_resource
    }

    pub fn set_new_resource(&mut self, new_resource: bool) {
        self.new_resource = new_resource;
    }
}
