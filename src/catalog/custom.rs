use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::item::{CatalogItem, Category};
use crate::error::SparkError;

pub const DIFFICULTY_RANGE: std::ops::RangeInclusive<u8> = 1..=5;
pub const ESTIMATED_MINUTES_RANGE: std::ops::RangeInclusive<u32> = 5..=120;

/// A skill an account wrote for itself. Never part of the daily rotation,
/// but can be completed and coached like a catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTask {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: u8,
    #[serde(default = "default_estimated_minutes")]
    pub estimated_time_minutes: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Extra coaching instructions, appended to the coach's system prompt
    #[serde(default)]
    pub ai_prompt: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn default_difficulty() -> u8 {
    1
}

fn default_estimated_minutes() -> u32 {
    15
}

fn default_active() -> bool {
    true
}

impl CustomTask {
    /// View as a catalog item, for the coach prompt and history titles
    pub fn as_item(&self) -> CatalogItem {
        CatalogItem::new(&self.id, &self.title, &self.description, self.category)
    }
}

/// Input for `add_custom_task`; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomTask {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub difficulty_level: u8,
    pub estimated_time_minutes: u32,
    pub image_url: Option<String>,
    pub ai_prompt: Option<String>,
}

impl NewCustomTask {
    pub fn new(
        user_id: &str,
        title: &str,
        description: &str,
        category: Category,
        created_at: DateTime<Utc>,
    ) -> Self {
        NewCustomTask {
            user_id: user_id.to_string(),
            created_at,
            title: title.to_string(),
            description: description.to_string(),
            category,
            difficulty_level: default_difficulty(),
            estimated_time_minutes: default_estimated_minutes(),
            image_url: None,
            ai_prompt: None,
        }
    }

    /// Same limits the task form enforces
    pub fn validate(&self) -> Result<(), SparkError> {
        let fail = |msg: String| {
            Err(SparkError::new(msg, "custom_task").with_account(self.user_id.clone()))
        };
        if self.title.trim().is_empty() {
            return fail("Task title is required".to_string());
        }
        if !DIFFICULTY_RANGE.contains(&self.difficulty_level) {
            return fail(format!(
                "Difficulty must be between 1 and 5, got {}",
                self.difficulty_level
            ));
        }
        if !ESTIMATED_MINUTES_RANGE.contains(&self.estimated_time_minutes) {
            return fail(format!(
                "Estimated time must be between 5 and 120 minutes, got {}",
                self.estimated_time_minutes
            ));
        }
        Ok(())
    }

    pub fn into_task(self, id: String) -> CustomTask {
        CustomTask {
            id,
            user_id: self.user_id,
            title: self.title.trim().to_string(),
            description: self.description,
            category: self.category,
            difficulty_level: self.difficulty_level,
            estimated_time_minutes: self.estimated_time_minutes,
            is_active: true,
            image_url: self.image_url.filter(|url| !url.trim().is_empty()),
            ai_prompt: self.ai_prompt.filter(|prompt| !prompt.trim().is_empty()),
            created_at: self.created_at,
        }
    }
}

/// Id for the `n`th custom task of an account
pub fn custom_task_id(n: u64) -> String {
    format!("custom-{}", n)
}

/// Active tasks only, newest first
pub(crate) fn active_newest_first(tasks: &[CustomTask]) -> Vec<CustomTask> {
    let mut active: Vec<CustomTask> = tasks.iter().filter(|t| t.is_active).cloned().collect();
    active.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    active
}
