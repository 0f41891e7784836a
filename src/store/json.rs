use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::catalog::custom::{active_newest_first, custom_task_id};
use crate::catalog::{CustomTask, NewCustomTask};
use crate::completions::{CompletionRecord, CompletionRow};
use crate::error::SparkError;
use crate::store::{sort_newest_first, CompletionStore, NewCompletion, UserProfile};

/// On-disk shape of one account. Completions are kept in backend row form
/// so files written by older builds (`completed_date`) still load.
#[derive(Debug, Default, Serialize, Deserialize)]
struct AccountDocument {
    #[serde(default)]
    profile: Option<UserProfile>,
    #[serde(default)]
    completions: Vec<CompletionRow>,
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    custom_tasks: Vec<CustomTask>,
    #[serde(default)]
    next_task_id: u64,
}

/// One JSON file per account under `<root>/accounts/`
#[derive(Debug)]
pub struct JsonFileStore {
    root: PathBuf,
    // Serializes read-modify-write cycles on account files
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonFileStore {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn account_path(&self, account_id: &str) -> Result<PathBuf, SparkError> {
        let valid = !account_id.is_empty()
            && account_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SparkError::new("Invalid account id", "store").with_account(account_id));
        }
        Ok(self.root.join("accounts").join(format!("{}.json", account_id)))
    }

    async fn load(&self, account_id: &str) -> Result<AccountDocument, SparkError> {
        let path = self.account_path(account_id)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                SparkError::new(format!("Failed to parse account file: {}", e), "json_parse")
                    .with_account(account_id)
                    .with_context(format!("path: {:?}", path))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AccountDocument::default()),
            Err(e) => Err(SparkError::new(format!("Failed to read account file: {}", e), "io")
                .with_account(account_id)
                .with_context(format!("path: {:?}", path))),
        }
    }

    async fn save(&self, account_id: &str, doc: &AccountDocument) -> Result<(), SparkError> {
        let path = self.account_path(account_id)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                SparkError::new(format!("Failed to create directory: {}", e), "io")
                    .with_context(format!("path: {:?}", parent))
            })?;
        }

        let json = serde_json::to_string_pretty(doc).map_err(|e| {
            SparkError::new(format!("Failed to serialize account: {}", e), "json_serialize")
                .with_account(account_id)
        })?;

        // Readers never take the lock, so the file is replaced in one rename
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json).await.map_err(|e| {
            SparkError::new(format!("Failed to write account file: {}", e), "io")
                .with_account(account_id)
                .with_context(format!("path: {:?}", tmp_path))
        })?;
        tokio::fs::rename(&tmp_path, &path).await.map_err(|e| {
            SparkError::new(format!("Failed to replace account file: {}", e), "io")
                .with_account(account_id)
                .with_context(format!("path: {:?}", path))
        })?;

        Ok(())
    }
}

#[async_trait]
impl CompletionStore for JsonFileStore {
    async fn list_completions(&self, account_id: &str) -> Result<Vec<CompletionRecord>, SparkError> {
        let doc = self.load(account_id).await?;
        let mut records: Vec<CompletionRecord> = doc
            .completions
            .into_iter()
            .map(CompletionRow::into_record)
            .collect();
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn add_completion(&self, completion: NewCompletion) -> Result<CompletionRecord, SparkError> {
        let _guard = self.write_lock.lock().await;
        let account_id = completion.account_id.clone();
        let mut doc = self.load(&account_id).await?;

        // Rows written by hand or by older builds may carry ids past the counter
        let highest = doc.completions.iter().filter_map(|r| r.id).max().unwrap_or(0);
        let id = doc.next_id.max(highest) + 1;
        doc.next_id = id;

        let record = completion.into_record(id);
        doc.completions.push(CompletionRow::from_record(&account_id, &record));
        self.save(&account_id, &doc).await?;

        tracing::debug!(account = %account_id, id, entity_id = %record.entity_id, "Stored completion");
        Ok(record)
    }

    async fn get_profile(&self, account_id: &str) -> Result<Option<UserProfile>, SparkError> {
        Ok(self.load(account_id).await?.profile)
    }

    async fn upsert_profile(&self, profile: UserProfile) -> Result<(), SparkError> {
        let _guard = self.write_lock.lock().await;
        let account_id = profile.user_id.clone();
        let mut doc = self.load(&account_id).await?;
        doc.profile = Some(profile);
        self.save(&account_id, &doc).await
    }

    async fn list_custom_tasks(&self, account_id: &str) -> Result<Vec<CustomTask>, SparkError> {
        let doc = self.load(account_id).await?;
        Ok(active_newest_first(&doc.custom_tasks))
    }

    async fn add_custom_task(&self, task: NewCustomTask) -> Result<CustomTask, SparkError> {
        task.validate()?;
        let _guard = self.write_lock.lock().await;
        let account_id = task.user_id.clone();
        let mut doc = self.load(&account_id).await?;

        doc.next_task_id += 1;
        let task = task.into_task(custom_task_id(doc.next_task_id));
        doc.custom_tasks.push(task.clone());
        self.save(&account_id, &doc).await?;

        tracing::debug!(account = %account_id, id = %task.id, "Stored custom task");
        Ok(task)
    }
}
