// ABOUTME: End-to-end tests of the CLI command flows against an in-memory GitHub.
// ABOUTME: Exercises apply, refresh, destroy and import with a temporary state file.

use async_trait::async_trait;
use sigkey_cli::commands::lifecycle::{self, ApplyOutcome, RefreshOutcome};
use sigkey_cli::commands::KeyArgs;
use sigkey_cli::state_file::StateFile;
use sigkey_github::{GitHubError, Response, SigningKey, SigningKeyService, StatusCode};
use sigkey_resource::{Plan, ResourceData, SigningKeyConfig};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

const DEADLINE: Duration = Duration::from_secs(5);

const KEY: &str = "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJl";

#[derive(Default)]
struct Inner {
    next_id: i64,
    keys: HashMap<i64, SigningKey>,
    deletes: Vec<i64>,
}

/// Minimal GitHub: keys by id, fixed ETag per id, 404 for unknown ids.
#[derive(Default)]
struct MemoryGitHub {
    inner: Mutex<Inner>,
}

impl MemoryGitHub {
    fn seeded(id: i64, title: &str, key: &str) -> Self {
        let github = Self::default();
        github.inner.lock().unwrap().keys.insert(
            id,
            SigningKey {
                id,
                title: title.to_string(),
                key: key.to_string(),
                created_at: None,
            },
        );
        github
    }

    fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.inner.lock().unwrap().keys.keys().copied().collect();
        ids.sort();
        ids
    }

    fn deletes(&self) -> Vec<i64> {
        self.inner.lock().unwrap().deletes.clone()
    }

    fn forget(&self, id: i64) {
        self.inner.lock().unwrap().keys.remove(&id);
    }
}

fn etag_for(id: i64) -> String {
    format!("\"etag-{}\"", id)
}

#[async_trait]
impl SigningKeyService for MemoryGitHub {
    async fn create_key(&self, title: &str, key: &str) -> sigkey_github::Result<(SigningKey, Response)> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = 1000 + inner.next_id;
        let record = SigningKey {
            id,
            title: title.to_string(),
            key: key.trim().to_string(),
            created_at: None,
        };
        inner.keys.insert(id, record.clone());
        Ok((record, Response::new(StatusCode::CREATED).with_etag(etag_for(id))))
    }

    async fn get_key(&self, id: i64, etag: Option<&str>) -> sigkey_github::Result<(SigningKey, Response)> {
        let inner = self.inner.lock().unwrap();
        let Some(record) = inner.keys.get(&id).cloned() else {
            return Err(GitHubError::from_response(StatusCode::NOT_FOUND, ""));
        };
        if etag == Some(etag_for(id).as_str()) {
            return Err(GitHubError::from_response(StatusCode::NOT_MODIFIED, ""));
        }
        Ok((record, Response::new(StatusCode::OK).with_etag(etag_for(id))))
    }

    async fn delete_key(&self, id: i64) -> sigkey_github::Result<Response> {
        let mut inner = self.inner.lock().unwrap();
        inner.deletes.push(id);
        match inner.keys.remove(&id) {
            Some(_) => Ok(Response::new(StatusCode::NO_CONTENT)),
            None => Err(GitHubError::from_response(StatusCode::NOT_FOUND, "")),
        }
    }
}

fn state_in(dir: &TempDir) -> StateFile {
    StateFile::new(dir.path().join("state.toml"))
}

fn args(title: &str, key: &str) -> KeyArgs {
    KeyArgs {
        title: title.to_string(),
        key: Some(key.to_string()),
        key_file: None,
    }
}

#[tokio::test]
async fn test_apply_creates_and_persists() {
    let dir = TempDir::new().expect("should create temp dir");
    let state = state_in(&dir);
    let github = MemoryGitHub::default();

    lifecycle::run_apply(&github, &state, args("laptop-2024", KEY), DEADLINE)
        .await
        .expect("apply should succeed");

    let stored = state.load().expect("should load");
    assert_eq!(stored.id(), "1001");
    assert_eq!(stored.title(), "laptop-2024");
    assert_eq!(stored.key(), KEY);
    assert_eq!(stored.etag(), etag_for(1001));
    assert_eq!(github.ids(), vec![1001]);
}

#[tokio::test]
async fn test_second_apply_is_unchanged() {
    let github = MemoryGitHub::default();
    let mut data = ResourceData::default();

    let first = lifecycle::apply(&github, &mut data, SigningKeyConfig::new("laptop", KEY))
        .await
        .expect("first apply");
    assert_eq!(first, ApplyOutcome::Created);

    // Trailing whitespace in the declaration is not a change
    let padded = format!("{}\n", KEY);
    let second = lifecycle::apply(&github, &mut data, SigningKeyConfig::new("laptop", padded))
        .await
        .expect("second apply");
    assert_eq!(second, ApplyOutcome::Unchanged);
    assert_eq!(github.ids(), vec![1001]);
}

#[tokio::test]
async fn test_apply_replaces_on_title_change() {
    let github = MemoryGitHub::default();
    let mut data = ResourceData::default();

    lifecycle::apply(&github, &mut data, SigningKeyConfig::new("laptop", KEY))
        .await
        .expect("create");
    let outcome = lifecycle::apply(&github, &mut data, SigningKeyConfig::new("desktop", KEY))
        .await
        .expect("replace");

    assert_eq!(outcome, ApplyOutcome::Replaced { fields: vec!["title"] });
    assert_eq!(github.deletes(), vec![1001]);
    assert_eq!(github.ids(), vec![1002]);
    assert_eq!(data.id(), "1002");
    assert_eq!(data.title(), "desktop");
}

#[tokio::test]
async fn test_apply_recreates_key_deleted_out_of_band() {
    let github = MemoryGitHub::default();
    let mut data = ResourceData::default();

    lifecycle::apply(&github, &mut data, SigningKeyConfig::new("laptop", KEY))
        .await
        .expect("create");
    github.forget(1001);

    let outcome = lifecycle::apply(&github, &mut data, SigningKeyConfig::new("laptop", KEY))
        .await
        .expect("recreate");
    assert_eq!(outcome, ApplyOutcome::Created);
    assert_eq!(data.id(), "1002");
}

#[tokio::test]
async fn test_plan_does_not_touch_remote_or_state() {
    let github = MemoryGitHub::default();
    let mut data = ResourceData::default();

    let planned = lifecycle::plan_changes(&github, &mut data, &SigningKeyConfig::new("laptop", KEY))
        .await
        .expect("plan");
    assert_eq!(planned, Plan::Create);
    assert!(github.ids().is_empty());
}

#[tokio::test]
async fn test_refresh_removes_state_for_deleted_key() {
    let dir = TempDir::new().expect("should create temp dir");
    let state = state_in(&dir);
    let github = MemoryGitHub::default();

    lifecycle::run_apply(&github, &state, args("laptop", KEY), DEADLINE)
        .await
        .expect("apply");
    github.forget(1001);

    let mut data = state.load().expect("should load");
    let outcome = lifecycle::refresh(&github, &mut data).await.expect("refresh");
    assert_eq!(outcome, RefreshOutcome::Gone);

    lifecycle::run_refresh(&github, &state, DEADLINE)
        .await
        .expect("refresh command");
    assert!(!state.path().exists());
}

#[tokio::test]
async fn test_refresh_without_state_fails() {
    let dir = TempDir::new().expect("should create temp dir");
    let github = MemoryGitHub::default();

    let err = lifecycle::run_refresh(&github, &state_in(&dir), DEADLINE)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No signing key is managed"));
}

#[tokio::test]
async fn test_refresh_with_bad_id_reports_conversion_error() {
    let github = MemoryGitHub::default();
    let mut data = ResourceData::from_id("abc");

    let err = lifecycle::refresh(&github, &mut data).await.unwrap_err();
    assert!(err.to_string().contains("failed to convert ID abc"));
}

#[tokio::test]
async fn test_destroy_deletes_and_removes_state() {
    let dir = TempDir::new().expect("should create temp dir");
    let state = state_in(&dir);
    let github = MemoryGitHub::default();

    lifecycle::run_apply(&github, &state, args("laptop", KEY), DEADLINE)
        .await
        .expect("apply");
    lifecycle::run_destroy(&github, &state, DEADLINE)
        .await
        .expect("destroy");

    assert!(github.ids().is_empty());
    assert!(!state.path().exists());
}

#[tokio::test]
async fn test_destroy_tolerates_key_already_gone() {
    let dir = TempDir::new().expect("should create temp dir");
    let state = state_in(&dir);
    let github = MemoryGitHub::default();

    lifecycle::run_apply(&github, &state, args("laptop", KEY), DEADLINE)
        .await
        .expect("apply");
    github.forget(1001);

    lifecycle::run_destroy(&github, &state, DEADLINE)
        .await
        .expect("destroy should treat 404 as success");
    assert!(!state.path().exists());
}

#[tokio::test]
async fn test_destroy_without_state_fails() {
    let github = MemoryGitHub::default();
    let mut data = ResourceData::default();
    assert!(lifecycle::destroy(&github, &mut data).await.is_err());
    assert!(github.deletes().is_empty());
}

#[tokio::test]
async fn test_import_existing_key() {
    let dir = TempDir::new().expect("should create temp dir");
    let state = state_in(&dir);
    let github = MemoryGitHub::seeded(555, "laptop-2024", KEY);

    lifecycle::run_import(&github, &state, "555", DEADLINE)
        .await
        .expect("import");

    let stored = state.load().expect("should load");
    assert_eq!(stored.id(), "555");
    assert_eq!(stored.title(), "laptop-2024");
    assert_eq!(stored.etag(), etag_for(555));
}

#[tokio::test]
async fn test_import_missing_key_fails_without_state() {
    let dir = TempDir::new().expect("should create temp dir");
    let state = state_in(&dir);
    let github = MemoryGitHub::default();

    let err = lifecycle::run_import(&github, &state, "555", DEADLINE)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("does not exist"));
    assert!(!state.path().exists());
}

#[tokio::test]
async fn test_import_refuses_when_already_managed() {
    let github = MemoryGitHub::seeded(555, "laptop-2024", KEY);
    let existing = ResourceData::from_id("42");

    let err = lifecycle::import(&github, &existing, "555").await.unwrap_err();
    assert!(err.to_string().contains("already manages key 42"));
}

#[test]
fn test_declared_config_rejects_blank_title() {
    let err = lifecycle::declared_config(&args("  ", KEY)).unwrap_err();
    assert!(err.to_string().contains("title"));
}

#[test]
fn test_declared_config_reads_key_file() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join("id_ed25519.pub");
    std::fs::write(&path, format!("{} user@host\n", KEY)).expect("should write key");

    let config = lifecycle::declared_config(&KeyArgs {
        title: "laptop".to_string(),
        key: None,
        key_file: Some(path),
    })
    .expect("should load key file");
    assert!(config.key.starts_with("ssh-ed25519 AAAA"));
    assert!(!config.key.ends_with('\n'));
}

#[tokio::test]
async fn test_deadline_cancels_slow_operation() {
    let result: anyhow::Result<()> = lifecycle::with_deadline(Duration::from_millis(10), async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(())
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Operation timed out after 10ms");
}

/// Creates keys normally but never answers a read.
struct StallingReads {
    created: Mutex<Vec<i64>>,
}

#[async_trait]
impl SigningKeyService for StallingReads {
    async fn create_key(&self, title: &str, key: &str) -> sigkey_github::Result<(SigningKey, Response)> {
        self.created.lock().unwrap().push(555);
        let record = SigningKey {
            id: 555,
            title: title.to_string(),
            key: key.to_string(),
            created_at: None,
        };
        Ok((record, Response::new(StatusCode::CREATED).with_etag(etag_for(555))))
    }

    async fn get_key(&self, _id: i64, _etag: Option<&str>) -> sigkey_github::Result<(SigningKey, Response)> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Err(GitHubError::from_response(StatusCode::GATEWAY_TIMEOUT, ""))
    }

    async fn delete_key(&self, _id: i64) -> sigkey_github::Result<Response> {
        Ok(Response::new(StatusCode::NO_CONTENT))
    }
}

#[tokio::test]
async fn test_apply_timeout_after_create_keeps_created_key() {
    let dir = TempDir::new().expect("should create temp dir");
    let state = state_in(&dir);
    let github = StallingReads {
        created: Mutex::new(Vec::new()),
    };

    let err = lifecycle::run_apply(&github, &state, args("laptop", KEY), Duration::from_millis(50))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("timed out"));
    assert_eq!(*github.created.lock().unwrap(), vec![555]);

    let stored = state.load().expect("should load");
    assert_eq!(stored.id(), "555");
    assert_eq!(stored.title(), "laptop");
    assert_eq!(stored.etag(), etag_for(555));
}

#[tokio::test]
async fn test_refresh_timeout_leaves_state_untouched() {
    let dir = TempDir::new().expect("should create temp dir");
    let state = state_in(&dir);
    let mut data = ResourceData::from_id("555");
    data.set_remote("laptop", KEY, &etag_for(555));
    state.save(&data).expect("should save");

    let github = StallingReads {
        created: Mutex::new(Vec::new()),
    };
    let err = lifecycle::run_refresh(&github, &state, Duration::from_millis(50))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("timed out"));
    assert_eq!(state.load().expect("should load").id(), "555");
}
