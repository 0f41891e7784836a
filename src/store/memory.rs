use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::catalog::custom::{active_newest_first, custom_task_id};
use crate::catalog::{CustomTask, NewCustomTask};
use crate::completions::CompletionRecord;
use crate::error::SparkError;
use crate::store::{sort_newest_first, CompletionStore, NewCompletion, UserProfile};

/// In-process store. Used for tests and as the offline fallback.
#[derive(Debug, Default)]
pub struct MemoryStore {
    completions: RwLock<HashMap<String, Vec<CompletionRecord>>>,
    profiles: RwLock<HashMap<String, UserProfile>>,
    next_id: AtomicU64,
    custom_tasks: RwLock<HashMap<String, Vec<CustomTask>>>,
    next_task_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record exactly as given, malformed ones included
    pub fn insert_record(&self, account_id: &str, record: CompletionRecord) {
        self.next_id.fetch_max(record.id, Ordering::Relaxed);
        self.completions
            .write()
            .entry(account_id.to_string())
            .or_default()
            .push(record);
    }
}

#[async_trait]
impl CompletionStore for MemoryStore {
    async fn list_completions(&self, account_id: &str) -> Result<Vec<CompletionRecord>, SparkError> {
        let mut records = self
            .completions
            .read()
            .get(account_id)
            .cloned()
            .unwrap_or_default();
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn add_completion(&self, completion: NewCompletion) -> Result<CompletionRecord, SparkError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let account_id = completion.account_id.clone();
        let record = completion.into_record(id);
        self.completions
            .write()
            .entry(account_id)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn get_profile(&self, account_id: &str) -> Result<Option<UserProfile>, SparkError> {
        Ok(self.profiles.read().get(account_id).cloned())
    }

    async fn upsert_profile(&self, profile: UserProfile) -> Result<(), SparkError> {
        self.profiles.write().insert(profile.user_id.clone(), profile);
        Ok(())
    }

    async fn list_custom_tasks(&self, account_id: &str) -> Result<Vec<CustomTask>, SparkError> {
        Ok(self
            .custom_tasks
            .read()
            .get(account_id)
            .map(|tasks| active_newest_first(tasks))
            .unwrap_or_default())
    }

    async fn add_custom_task(&self, task: NewCustomTask) -> Result<CustomTask, SparkError> {
        task.validate()?;
        let id = custom_task_id(self.next_task_id.fetch_add(1, Ordering::Relaxed) + 1);
        let task = task.into_task(id);
        self.custom_tasks
            .write()
            .entry(task.user_id.clone())
            .or_default()
            .push(task.clone());
        Ok(task)
    }
}
