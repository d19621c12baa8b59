// ABOUTME: Plans the action needed to move stored state to the declared config.
// ABOUTME: Every user field forces replacement; the key field ignores whitespace changes.

use crate::schema::{ssh_signing_key_schema, SigningKeyConfig};
use crate::state::ResourceData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Nothing is managed yet.
    Create,
    /// Stored state already matches the declaration.
    NoOp,
    /// Delete the existing key and create a new one.
    Replace { fields: Vec<&'static str> },
}

/// Compare `state` against `config`.
///
/// There is no update path, so any real difference in a declared field
/// means replacement.
pub fn plan(state: &ResourceData, config: &SigningKeyConfig) -> Plan {
    if state.is_absent() {
        return Plan::Create;
    }

    let schema = ssh_signing_key_schema();
    let fields: Vec<&'static str> = schema
        .configurable()
        .filter(|field| {
            let old = state.get(field.name).unwrap_or_default();
            let new = config.get(field.name).unwrap_or_default();
            !field.values_match(old, new)
        })
        .map(|field| field.name)
        .collect();

    if fields.is_empty() {
        Plan::NoOp
    } else {
        Plan::Replace { fields }
    }
}
