// ABOUTME: plan/apply/refresh/destroy/import driven through SshSigningKeyResource.
// ABOUTME: Each step takes the service explicitly so tests can swap in a fake GitHub.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use sigkey_github::SigningKeyService;
use sigkey_resource::{plan, Diagnostic, Plan, ResourceData, SigningKeyConfig, SshSigningKeyResource};
use std::future::Future;
use std::time::Duration;
use tracing::info;

use super::KeyArgs;
use crate::state_file::StateFile;

/// What apply changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Created,
    Replaced { fields: Vec<&'static str> },
    Unchanged,
}

/// What refresh observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Present,
    Gone,
}

/// Run `fut` with a deadline. Callers persist state after this returns,
/// so work a timed-out future already finished is still recorded.
pub async fn with_deadline<T, F>(deadline: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => bail!("Operation timed out after {:?}", deadline),
    }
}

/// Turn a resource error into the diagnostic text users see.
fn diagnose(err: sigkey_resource::ResourceError) -> anyhow::Error {
    let diag = Diagnostic::from(err);
    match diag.detail {
        Some(detail) => anyhow::anyhow!("{}\n  {}", diag.summary, detail),
        None => anyhow::anyhow!("{}", diag.summary),
    }
}

/// Build the declared config from flags, reading the key file when given.
pub fn declared_config(args: &KeyArgs) -> Result<SigningKeyConfig> {
    let key = match (&args.key, &args.key_file) {
        (Some(key), _) => key.clone(),
        (None, Some(path)) => sigkey_ssh::read_public_key_file(path)
            .with_context(|| format!("Failed to load key from {}", path.display()))?,
        (None, None) => bail!("Either --key or --key-file is required"),
    };

    let config = SigningKeyConfig::new(args.title.clone(), key);
    config.validate().map_err(diagnose)?;
    Ok(config)
}

/// Refresh existing state, then report the plan against `config`.
pub async fn plan_changes<S>(client: &S, data: &mut ResourceData, config: &SigningKeyConfig) -> Result<Plan>
where
    S: SigningKeyService + ?Sized,
{
    if !data.is_absent() {
        refresh(client, data).await?;
    }
    Ok(plan(data, config))
}

/// Make GitHub match `config`, replacing the key when a field changed.
pub async fn apply<S>(client: &S, data: &mut ResourceData, config: SigningKeyConfig) -> Result<ApplyOutcome>
where
    S: SigningKeyService + ?Sized,
{
    let resource = SshSigningKeyResource::new();
    let outcome = match plan_changes(client, data, &config).await? {
        Plan::NoOp => return Ok(ApplyOutcome::Unchanged),
        Plan::Create => ApplyOutcome::Created,
        Plan::Replace { fields } => {
            info!(ssh_signing_key_id = %data.id(), ?fields, "replacing SSH signing key");
            resource.delete(client, data).await.map_err(diagnose)?;
            ApplyOutcome::Replaced { fields }
        }
    };

    data.set_config(config);
    resource.create(client, data).await.map_err(diagnose)?;
    resource.read(client, data).await.map_err(diagnose)?;
    Ok(outcome)
}

/// Re-read the key; a key deleted on GitHub leaves `data` absent.
pub async fn refresh<S>(client: &S, data: &mut ResourceData) -> Result<RefreshOutcome>
where
    S: SigningKeyService + ?Sized,
{
    SshSigningKeyResource::new()
        .read(client, data)
        .await
        .map_err(diagnose)?;

    Ok(if data.is_absent() {
        RefreshOutcome::Gone
    } else {
        RefreshOutcome::Present
    })
}

/// Delete the managed key. Nothing managed is an error so typos in --state surface.
pub async fn destroy<S>(client: &S, data: &mut ResourceData) -> Result<()>
where
    S: SigningKeyService + ?Sized,
{
    if data.is_absent() {
        bail!("No signing key is managed by this state file");
    }
    SshSigningKeyResource::new()
        .delete(client, data)
        .await
        .map_err(diagnose)
}

/// Adopt an existing key by ID and read its fields.
pub async fn import<S>(client: &S, existing: &ResourceData, id: &str) -> Result<ResourceData>
where
    S: SigningKeyService + ?Sized,
{
    if !existing.is_absent() {
        bail!(
            "State already manages key {}; destroy it or use another --state file",
            existing.id()
        );
    }

    let resource = SshSigningKeyResource::new();
    let mut data = resource.import(id);
    resource.read(client, &mut data).await.map_err(diagnose)?;
    if data.is_absent() {
        bail!("Signing key {} does not exist on GitHub", id);
    }
    Ok(data)
}

// ============================================================================
// Command runners
// ============================================================================

pub async fn run_plan<S>(client: &S, state: &StateFile, args: KeyArgs, deadline: Duration) -> Result<()>
where
    S: SigningKeyService + ?Sized,
{
    let config = declared_config(&args)?;
    let mut data = state.load()?;

    let planned = with_deadline(deadline, plan_changes(client, &mut data, &config)).await?;
    match planned {
        Plan::NoOp => println!("{}", "No changes. The signing key matches.".green()),
        Plan::Create => println!("{} {}", "+ create".green().bold(), config.title),
        Plan::Replace { fields } => println!(
            "{} {} {}",
            "-/+ replace".yellow().bold(),
            data.id(),
            format!("(changed: {})", fields.join(", ")).dimmed()
        ),
    }
    Ok(())
}

pub async fn run_apply<S>(client: &S, state: &StateFile, args: KeyArgs, deadline: Duration) -> Result<()>
where
    S: SigningKeyService + ?Sized,
{
    let config = declared_config(&args)?;
    let mut data = state.load()?;

    let result = with_deadline(deadline, apply(client, &mut data, config)).await;
    // Persist whatever was reached, including a key created before a timeout
    state.save(&data)?;
    let outcome = result?;

    match outcome {
        ApplyOutcome::Unchanged => println!("{}", "No changes. The signing key matches.".green()),
        ApplyOutcome::Created => {
            println!("{} {}", "Signing key created:".green().bold(), data.id())
        }
        ApplyOutcome::Replaced { fields } => println!(
            "{} {} {}",
            "Signing key replaced:".green().bold(),
            data.id(),
            format!("(changed: {})", fields.join(", ")).dimmed()
        ),
    }
    Ok(())
}

pub async fn run_refresh<S>(client: &S, state: &StateFile, deadline: Duration) -> Result<()>
where
    S: SigningKeyService + ?Sized,
{
    let mut data = state.load()?;
    if data.is_absent() {
        bail!("No signing key is managed by {}", state.path().display());
    }
    let id = data.id().to_string();

    let outcome = with_deadline(deadline, refresh(client, &mut data)).await?;
    state.save(&data)?;

    match outcome {
        RefreshOutcome::Present => println!("{} {}", "Refreshed signing key".green(), id),
        RefreshOutcome::Gone => {
            let warning = Diagnostic::warning(format!("Signing key {} no longer exists on GitHub", id))
                .with_detail("It was removed from state; the next apply creates it again.");
            println!("{}", warning.to_string().yellow());
        }
    }
    Ok(())
}

pub async fn run_destroy<S>(client: &S, state: &StateFile, deadline: Duration) -> Result<()>
where
    S: SigningKeyService + ?Sized,
{
    let mut data = state.load()?;
    let id = data.id().to_string();

    with_deadline(deadline, destroy(client, &mut data)).await?;
    state.remove()?;

    println!("{} {}", "Signing key deleted:".green().bold(), id);
    Ok(())
}

pub async fn run_import<S>(client: &S, state: &StateFile, id: &str, deadline: Duration) -> Result<()>
where
    S: SigningKeyService + ?Sized,
{
    let existing = state.load()?;
    let data = with_deadline(deadline, import(client, &existing, id)).await?;
    state.save(&data)?;

    println!("{} {}", "Imported signing key".green().bold(), data.id());
    println!("  {}: {}", "Title".dimmed(), data.title());
    Ok(())
}
