// ABOUTME: On-disk state for the one managed signing key.
// ABOUTME: TOML document tagged with the resource type; absent resources remove the file.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use sigkey_resource::{ResourceData, RESOURCE_TYPE};
use std::fs;
use std::path::{Path, PathBuf};

const STATE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct StateDocument {
    version: u32,
    #[serde(rename = "type")]
    resource_type: String,
    instance: ResourceData,
}

/// State file for a single resource instance.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the default state path (~/.config/sigkey/state.toml)
    pub fn default_path() -> Result<PathBuf> {
        Ok(crate::config::FileConfig::config_dir()?.join("state.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load stored state. A missing file means nothing is managed yet.
    pub fn load(&self) -> Result<ResourceData> {
        if !self.path.exists() {
            return Ok(ResourceData::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read state file {}", self.path.display()))?;
        let doc: StateDocument = toml::from_str(&content).context("Failed to parse state file")?;

        if doc.version != STATE_VERSION {
            bail!(
                "Unsupported state version {} in {} (expected {})",
                doc.version,
                self.path.display(),
                STATE_VERSION
            );
        }
        if doc.resource_type != RESOURCE_TYPE {
            bail!(
                "State file {} holds a '{}' resource, not '{}'",
                self.path.display(),
                doc.resource_type,
                RESOURCE_TYPE
            );
        }

        Ok(doc.instance)
    }

    /// Persist `data`, or remove the file when the resource is absent.
    pub fn save(&self, data: &ResourceData) -> Result<()> {
        if data.is_absent() {
            return self.remove();
        }

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).context("Failed to create state directory")?;
        }

        let doc = StateDocument {
            version: STATE_VERSION,
            resource_type: RESOURCE_TYPE.to_string(),
            instance: data.clone(),
        };
        let content = toml::to_string_pretty(&doc).context("Failed to serialize state")?;

        // Write then rename so an interrupted save never truncates the state
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, content).context("Failed to write state file")?;
        fs::rename(&tmp, &self.path).context("Failed to replace state file")?;
        Ok(())
    }

    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("Failed to remove state file"),
        }
    }
}
