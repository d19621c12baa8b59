// ABOUTME: Show command prints the stored signing key state
// ABOUTME: Includes the SHA256 fingerprint when the stored key parses

use anyhow::Result;
use colored::Colorize;
use sigkey_resource::ResourceData;

use crate::state_file::StateFile;

/// Fingerprint of the stored key, if it is a parseable OpenSSH public key.
pub fn stored_fingerprint(data: &ResourceData) -> Option<String> {
    sigkey_ssh::parse_public_key(data.key())
        .ok()
        .map(|key| sigkey_ssh::fingerprint(&key))
}

pub fn run(state: &StateFile) -> Result<()> {
    let data = state.load()?;

    if data.is_absent() {
        println!("{}", "No signing key is managed.".dimmed());
        println!("  {}: {}", "State".dimmed(), state.path().display());
        return Ok(());
    }

    println!("{}", "SSH signing key".bold());
    println!("  {}: {}", "ID".dimmed(), data.id());
    println!("  {}: {}", "Title".dimmed(), data.title());
    println!("  {}: {}", "Key".dimmed(), data.key());
    if let Some(fp) = stored_fingerprint(&data) {
        println!("  {}: {}", "Fingerprint".dimmed(), fp);
    }
    if !data.etag().is_empty() {
        println!("  {}: {}", "ETag".dimmed(), data.etag());
    }
    println!("  {}: {}", "State".dimmed(), state.path().display());

    Ok(())
}
