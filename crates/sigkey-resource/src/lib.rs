// ABOUTME: GitHub user SSH signing key as a declarative resource.
// ABOUTME: Schema, state store, plan, diagnostics, and the create/read/delete/import adapter.

pub mod diag;
pub mod error;
pub mod plan;
pub mod resource;
pub mod schema;
pub mod state;

pub use diag::{Diagnostic, Diagnostics, Severity};
pub use error::{ResourceError, Result};
pub use plan::{plan, Plan};
pub use resource::{parse_id, SshSigningKeyResource, RESOURCE_TYPE};
pub use schema::{ssh_signing_key_schema, suppress_key_diff, FieldSchema, Schema, SigningKeyConfig};
pub use state::ResourceData;

// Re-export the service seam so hosts need only this crate
pub use sigkey_github::{GitHubError, SigningKeyService};
