// ABOUTME: Field declarations for the signing key resource and the declared config type.
// ABOUTME: title and key are required and force replacement; etag is computed.

use serde::{Deserialize, Serialize};

use crate::error::{ResourceError, Result};

/// Returns true when the change from `old` to `new` should be ignored.
pub type DiffSuppressFn = fn(old: &str, new: &str) -> bool;

/// Declaration of one string attribute.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    /// A change replaces the remote object instead of updating it.
    pub force_new: bool,
    /// Set by the resource, never by the user.
    pub computed: bool,
    pub diff_suppress: Option<DiffSuppressFn>,
}

impl FieldSchema {
    /// Whether `old` and `new` count as the same value for planning.
    pub fn values_match(&self, old: &str, new: &str) -> bool {
        old == new || self.diff_suppress.is_some_and(|suppress| suppress(old, new))
    }
}

#[derive(Debug, Clone)]
pub struct Schema {
    pub fields: Vec<FieldSchema>,
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields the user declares, in declaration order.
    pub fn configurable(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter().filter(|f| !f.computed)
    }
}

/// Key material is compared after trimming the declared value only.
pub fn suppress_key_diff(old: &str, new: &str) -> bool {
    sigkey_ssh::keys_equivalent(old, new)
}

/// Schema of `github_user_ssh_signing_key`.
pub fn ssh_signing_key_schema() -> Schema {
    Schema {
        fields: vec![
            FieldSchema {
                name: "title",
                description: "A descriptive name for the new key.",
                required: true,
                force_new: true,
                computed: false,
                diff_suppress: None,
            },
            FieldSchema {
                name: "key",
                description: "The public SSH key to add to your GitHub account.",
                required: true,
                force_new: true,
                computed: false,
                diff_suppress: Some(suppress_key_diff),
            },
            FieldSchema {
                name: "etag",
                description: "Cache validator from the last read of the key.",
                required: false,
                force_new: false,
                computed: true,
                diff_suppress: None,
            },
        ],
    }
}

/// Declared configuration of one signing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningKeyConfig {
    pub title: String,
    pub key: String,
}

impl SigningKeyConfig {
    pub fn new(title: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            key: key.into(),
        }
    }

    /// Value of a declared attribute by schema name.
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "key" => Some(&self.key),
            _ => None,
        }
    }

    /// Reject blank required attributes.
    pub fn validate(&self) -> Result<()> {
        for field in ssh_signing_key_schema().configurable() {
            if !field.required {
                continue;
            }
            let blank = self.get(field.name).map_or(true, |v| v.trim().is_empty());
            if blank {
                return Err(ResourceError::Validation {
                    field: field.name,
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
