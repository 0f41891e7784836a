pub mod json;
pub mod memory;

use std::collections::{BTreeSet, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::{Category, CustomTask, NewCustomTask};
use crate::completions::CompletionRecord;
use crate::error::SparkError;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default, deserialize_with = "deserialize_interests")]
    pub interests: BTreeSet<Category>,
    #[serde(default = "default_notification_enabled")]
    pub notification_enabled: bool,
    #[serde(default = "default_notification_time")]
    pub notification_time: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

fn default_notification_enabled() -> bool {
    true
}

fn default_notification_time() -> String {
    "09:00:00".to_string()
}

fn default_theme() -> String {
    "dark".to_string()
}

// Backend rows may hold null, or labels this build does not know about.
fn deserialize_interests<'de, D>(deserializer: D) -> Result<BTreeSet<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let labels: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(parse_interests(labels.unwrap_or_default()))
}

/// Parse interest labels, dropping unknown ones
pub fn parse_interests<I, S>(labels: I) -> BTreeSet<Category>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .filter_map(|label| match label.as_ref().parse::<Category>() {
            Ok(category) => Some(category),
            Err(e) => {
                tracing::warn!(error = %e, "Dropping unknown interest");
                None
            }
        })
        .collect()
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>) -> Self {
        UserProfile {
            user_id: user_id.into(),
            interests: BTreeSet::new(),
            notification_enabled: default_notification_enabled(),
            notification_time: default_notification_time(),
            theme: default_theme(),
            display_name: None,
        }
    }

    pub fn interest_filter(&self) -> HashSet<Category> {
        self.interests.iter().copied().collect()
    }

    /// Nobody has picked interests yet
    pub fn is_new_user(&self) -> bool {
        self.interests.is_empty()
    }
}

/// Input for `add_completion`; the store assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompletion {
    pub account_id: String,
    pub entity_id: String,
    pub completed_at: DateTime<Utc>,
    /// Calendar date when the source had no time of day
    pub completed_on: Option<NaiveDate>,
    pub satisfaction: Option<u8>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
}

impl NewCompletion {
    pub fn new(account_id: &str, entity_id: &str, completed_at: DateTime<Utc>) -> Self {
        NewCompletion {
            account_id: account_id.to_string(),
            entity_id: entity_id.to_string(),
            completed_at,
            completed_on: None,
            satisfaction: None,
            duration_minutes: None,
            notes: None,
        }
    }

    fn into_record(self, id: u64) -> CompletionRecord {
        CompletionRecord {
            id,
            entity_id: self.entity_id,
            completed_at: Some(self.completed_at),
            completed_on: self.completed_on,
            satisfaction: self.satisfaction,
            duration_minutes: self.duration_minutes,
            notes: self.notes,
        }
    }
}

/// Profile and completion persistence, owned by whoever hosts the data.
#[async_trait]
pub trait CompletionStore: Send + Sync {
    /// All completions for the account, newest first
    async fn list_completions(&self, account_id: &str) -> Result<Vec<CompletionRecord>, SparkError>;

    async fn add_completion(&self, completion: NewCompletion) -> Result<CompletionRecord, SparkError>;

    async fn get_profile(&self, account_id: &str) -> Result<Option<UserProfile>, SparkError>;

    /// Insert or replace the profile keyed by `user_id`
    async fn upsert_profile(&self, profile: UserProfile) -> Result<(), SparkError>;

    /// Active custom tasks for the account, newest first
    async fn list_custom_tasks(&self, account_id: &str) -> Result<Vec<CustomTask>, SparkError>;

    /// Validate and store a new custom task
    async fn add_custom_task(&self, task: NewCustomTask) -> Result<CustomTask, SparkError>;
}

/// Newest first; records without a timestamp go last
pub(crate) fn sort_newest_first(records: &mut [CompletionRecord]) {
    records.sort_by(|a, b| match (a.completed_at, b.completed_at) {
        (Some(a_ts), Some(b_ts)) => b_ts.cmp(&a_ts).then(b.id.cmp(&a.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => b.id.cmp(&a.id),
    });
}
