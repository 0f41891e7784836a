use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use skillspark_lib::catalog::{Category, CustomTask, NewCustomTask};
use skillspark_lib::completions::CompletionRecord;
use skillspark_lib::error::SparkError;
use skillspark_lib::migration::migrate_legacy;
use skillspark_lib::store::{CompletionStore, MemoryStore, NewCompletion, UserProfile};

/// Memory store whose `add_completion` fails on the given call (1-based)
struct FailingStore {
    inner: MemoryStore,
    calls: AtomicUsize,
    fail_on: usize,
}

impl FailingStore {
    fn new(fail_on: usize) -> Self {
        FailingStore {
            inner: MemoryStore::new(),
            calls: AtomicUsize::new(0),
            fail_on,
        }
    }
}

#[async_trait]
impl CompletionStore for FailingStore {
    async fn list_completions(&self, account_id: &str) -> Result<Vec<CompletionRecord>, SparkError> {
        self.inner.list_completions(account_id).await
    }

    async fn add_completion(&self, completion: NewCompletion) -> Result<CompletionRecord, SparkError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) + 1 == self.fail_on {
            return Err(SparkError::new("backend down", "store"));
        }
        self.inner.add_completion(completion).await
    }

    async fn get_profile(&self, account_id: &str) -> Result<Option<UserProfile>, SparkError> {
        self.inner.get_profile(account_id).await
    }

    async fn upsert_profile(&self, profile: UserProfile) -> Result<(), SparkError> {
        self.inner.upsert_profile(profile).await
    }

    async fn list_custom_tasks(&self, account_id: &str) -> Result<Vec<CustomTask>, SparkError> {
        self.inner.list_custom_tasks(account_id).await
    }

    async fn add_custom_task(&self, task: NewCustomTask) -> Result<CustomTask, SparkError> {
        self.inner.add_custom_task(task).await
    }
}

fn write_legacy(dir: &std::path::Path) {
    std::fs::write(
        dir.join("user_preferences.json"),
        r#"{"interests": ["Communication", "Mindfulness", "Basket Weaving"], "notificationsEnabled": true}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("completed_skills.json"),
        r#"[
            {"id": "comm-1", "title": "Active Listening", "completedDate": "2024-03-13T08:00:00.000Z"},
            {"id": "mind-2", "title": "Mindful Breathing", "completedDate": "2024-03-14T08:00:00.000Z"},
            {"id": "comm-2", "title": "Clear Expression"}
        ]"#,
    )
    .unwrap();
    std::fs::write(dir.join("today_skill.json"), r#"{"id": "comm-3"}"#).unwrap();
}

#[tokio::test]
async fn test_imports_preferences_and_completions() {
    let dir = tempfile::tempdir().unwrap();
    write_legacy(dir.path());
    let store = MemoryStore::new();

    let report = migrate_legacy(&store, "acct-1", dir.path()).await.unwrap();
    assert!(!report.skipped);
    assert_eq!(report.interests_imported, 2);
    assert_eq!(report.completions_imported, 2);
    assert_eq!(report.completions_dropped, 1);
    assert_eq!(report.files_removed, 3);

    let profile = store.get_profile("acct-1").await.unwrap().unwrap();
    let expected: BTreeSet<Category> = [Category::Communication, Category::Mindfulness].into_iter().collect();
    assert_eq!(profile.interests, expected);

    let records = store.list_completions("acct-1").await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].entity_id, "mind-2");
    assert_eq!(
        records[0].notes.as_deref(),
        Some("Migrated from local storage: Mindful Breathing")
    );

    assert!(!dir.path().join("user_preferences.json").exists());
    assert!(!dir.path().join("completed_skills.json").exists());
    assert!(!dir.path().join("today_skill.json").exists());
}

#[tokio::test]
async fn test_skips_accounts_with_interests() {
    let dir = tempfile::tempdir().unwrap();
    write_legacy(dir.path());
    let store = MemoryStore::new();
    let mut profile = UserProfile::new("acct-1");
    profile.interests.insert(Category::Leadership);
    store.upsert_profile(profile).await.unwrap();

    let report = migrate_legacy(&store, "acct-1", dir.path()).await.unwrap();
    assert!(report.skipped);
    assert!(store.list_completions("acct-1").await.unwrap().is_empty());
    assert!(dir.path().join("completed_skills.json").exists());
}

#[tokio::test]
async fn test_second_run_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    write_legacy(dir.path());
    let store = MemoryStore::new();

    migrate_legacy(&store, "acct-1", dir.path()).await.unwrap();
    let again = migrate_legacy(&store, "acct-1", dir.path()).await.unwrap();
    assert!(again.skipped);
    assert_eq!(store.list_completions("acct-1").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_no_legacy_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = MemoryStore::new();

    let report = migrate_legacy(&store, "acct-1", dir.path()).await.unwrap();
    assert_eq!(report, Default::default());
    assert!(store.get_profile("acct-1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_corrupt_legacy_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("completed_skills.json"), "{not json").unwrap();
    let store = MemoryStore::new();

    let err = migrate_legacy(&store, "acct-1", dir.path()).await.unwrap_err();
    assert_eq!(err.stage, "migration");
    assert!(dir.path().join("completed_skills.json").exists());
}

#[tokio::test]
async fn test_interrupted_import_is_finished_on_retry() {
    let dir = tempfile::tempdir().unwrap();
    write_legacy(dir.path());
    // First completion lands, the second write fails
    let store = FailingStore::new(2);

    let err = migrate_legacy(&store, "acct-1", dir.path()).await.unwrap_err();
    assert_eq!(err.stage, "store");
    assert!(store.get_profile("acct-1").await.unwrap().is_none());
    assert_eq!(store.list_completions("acct-1").await.unwrap().len(), 1);
    assert!(dir.path().join("completed_skills.json").exists());

    let report = migrate_legacy(&store, "acct-1", dir.path()).await.unwrap();
    assert!(!report.skipped);
    assert_eq!(report.completions_present, 1);
    assert_eq!(report.completions_imported, 1);
    assert_eq!(report.interests_imported, 2);

    let records = store.list_completions("acct-1").await.unwrap();
    let ids: BTreeSet<&str> = records.iter().map(|r| r.entity_id.as_str()).collect();
    assert_eq!(ids, ["comm-1", "mind-2"].into_iter().collect());
    assert_eq!(records.len(), 2);
    assert!(!dir.path().join("completed_skills.json").exists());
}
