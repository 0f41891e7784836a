use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::{Catalog, CatalogItem, Category, CustomTask, NewCustomTask};
use crate::clock::{Clock, LocalDay};
use crate::coach::CoachTarget;
use crate::completions::stats::CompletionStats;
use crate::completions::streak::{self, StreakPolicy};
use crate::completions::CompletionRecord;
use crate::error::SparkError;
use crate::metrics::Metrics;
use crate::store::{CompletionStore, NewCompletion, UserProfile};

/// Everything the home screen needs for one account on one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySnapshot {
    pub today: NaiveDate,
    pub skill: CatalogItem,
    pub completed_today: bool,
    pub streak: u32,
    pub completed_ids: BTreeSet<String>,
    pub stats: CompletionStats,
}

/// One row of the archive view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub record_id: u64,
    /// 1 for the oldest dated completion; `None` for rows with no date
    pub day_number: Option<usize>,
    pub entity_id: String,
    pub title: Option<String>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
    pub satisfaction: Option<u8>,
    pub notes: Option<String>,
}

/// Optional details captured when marking a skill complete
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionDetails {
    /// 1..=5
    pub rating: Option<u8>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
}

/// Profile/completion access layer. Reads from the store, recomputes streak
/// and today's skill from source data on every call.
#[derive(Clone)]
pub struct HabitTracker {
    store: Arc<dyn CompletionStore>,
    catalog: Arc<Catalog>,
    clock: Arc<dyn Clock>,
    policy: StreakPolicy,
    metrics: Metrics,
}

impl HabitTracker {
    pub fn new(
        store: Arc<dyn CompletionStore>,
        catalog: Arc<Catalog>,
        clock: Arc<dyn Clock>,
        policy: StreakPolicy,
    ) -> Self {
        HabitTracker {
            store,
            catalog,
            clock,
            policy,
            metrics: Metrics::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Stored profile, or a fresh default one for accounts that have none yet
    pub async fn profile(&self, account_id: &str) -> Result<UserProfile, SparkError> {
        let profile = self
            .store
            .get_profile(account_id)
            .await
            .map_err(|e| self.failed(e, account_id))?;
        Ok(profile.unwrap_or_else(|| UserProfile::new(account_id)))
    }

    pub async fn set_interests(
        &self,
        account_id: &str,
        interests: BTreeSet<Category>,
    ) -> Result<UserProfile, SparkError> {
        let mut profile = self.profile(account_id).await?;
        profile.interests = interests;
        self.store
            .upsert_profile(profile.clone())
            .await
            .map_err(|e| self.failed(e, account_id))?;
        tracing::info!(
            account = %account_id,
            interests = ?profile.interests,
            "Updated interests"
        );
        Ok(profile)
    }

    pub async fn snapshot(&self, account_id: &str) -> Result<DailySnapshot, SparkError> {
        let profile = self.profile(account_id).await?;
        let records = self
            .store
            .list_completions(account_id)
            .await
            .map_err(|e| self.failed(e, account_id))?;
        let today = self.clock.today();
        self.build_snapshot(&profile, &records, &today)
    }

    /// Mark a catalog item or custom task complete now, then re-read and recompute
    pub async fn complete(
        &self,
        account_id: &str,
        item_id: &str,
        details: CompletionDetails,
    ) -> Result<DailySnapshot, SparkError> {
        self.coach_target(account_id, item_id).await?;
        if let Some(rating) = details.rating {
            if !(1..=5).contains(&rating) {
                return Err(SparkError::new(
                    format!("Rating must be between 1 and 5, got {}", rating),
                    "tracker",
                )
                .with_account(account_id));
            }
        }

        let completion = NewCompletion {
            account_id: account_id.to_string(),
            entity_id: item_id.to_string(),
            completed_at: self.clock.now(),
            completed_on: None,
            satisfaction: details.rating,
            duration_minutes: details.duration_minutes,
            notes: details.notes,
        };
        let record = self
            .store
            .add_completion(completion)
            .await
            .map_err(|e| self.failed(e, account_id))?;
        self.metrics.record_completion();
        tracing::info!(
            account = %account_id,
            entity_id = %record.entity_id,
            id = record.id,
            "Recorded completion"
        );

        self.snapshot(account_id).await
    }

    /// Completions newest first, joined with catalog and custom task titles
    pub async fn history(&self, account_id: &str) -> Result<Vec<HistoryEntry>, SparkError> {
        let records = self
            .store
            .list_completions(account_id)
            .await
            .map_err(|e| self.failed(e, account_id))?;
        let custom = self.custom_tasks(account_id).await?;
        let today = self.clock.today();
        let dated = records
            .iter()
            .filter(|r| r.local_date(&today).is_some())
            .count();

        Ok(records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let date = record.local_date(&today);
                let (title, category) = match self.catalog.get(&record.entity_id) {
                    Some(item) => (Some(item.title.clone()), Some(item.category)),
                    None => match custom.iter().find(|t| t.id == record.entity_id) {
                        Some(task) => (Some(task.title.clone()), Some(task.category)),
                        None => (None, None),
                    },
                };
                HistoryEntry {
                    record_id: record.id,
                    // Undated rows sort after every dated one
                    day_number: date.map(|_| dated - index),
                    title,
                    category,
                    date,
                    entity_id: record.entity_id,
                    satisfaction: record.satisfaction,
                    notes: record.notes,
                }
            })
            .collect())
    }

    /// Active custom tasks for the account, newest first
    pub async fn custom_tasks(&self, account_id: &str) -> Result<Vec<CustomTask>, SparkError> {
        self.store
            .list_custom_tasks(account_id)
            .await
            .map_err(|e| self.failed(e, account_id))
    }

    /// Store a custom task for the account, stamped with the clock's now
    pub async fn add_custom_task(
        &self,
        account_id: &str,
        mut task: NewCustomTask,
    ) -> Result<CustomTask, SparkError> {
        task.user_id = account_id.to_string();
        task.created_at = self.clock.now();
        let task = self
            .store
            .add_custom_task(task)
            .await
            .map_err(|e| self.failed(e, account_id))?;
        tracing::info!(account = %account_id, id = %task.id, title = %task.title, "Added custom task");
        Ok(task)
    }

    /// What the coach should talk about: a catalog item, or one of the
    /// account's custom tasks together with its coaching instructions
    pub async fn coach_target(&self, account_id: &str, item_id: &str) -> Result<CoachTarget, SparkError> {
        if let Some(item) = self.catalog.get(item_id) {
            return Ok(CoachTarget::new(item.clone(), None));
        }
        let custom = self.custom_tasks(account_id).await?;
        match custom.into_iter().find(|t| t.id == item_id) {
            Some(task) => Ok(CoachTarget::new(task.as_item(), task.ai_prompt)),
            None => Err(SparkError::new(format!("Unknown skill '{}'", item_id), "tracker")
                .with_account(account_id)),
        }
    }

    fn build_snapshot(
        &self,
        profile: &UserProfile,
        records: &[CompletionRecord],
        today: &LocalDay,
    ) -> Result<DailySnapshot, SparkError> {
        let dates = streak::completion_dates(records, today);
        let completed_today = dates.contains(&today.date);

        // Today's own completions stay eligible, so the skill does not
        // change under the user once they mark it done.
        let excluded: HashSet<String> = records
            .iter()
            .filter(|r| !r.entity_id.is_empty())
            .filter(|r| match r.local_date(today) {
                Some(date) => date < today.date,
                None => true,
            })
            .map(|r| r.entity_id.clone())
            .collect();

        let interests = profile.interest_filter();
        let skill = self
            .catalog
            .select_daily(&interests, &excluded, today.date)
            .map_err(|e| self.failed(SparkError::from(e), &profile.user_id))?
            .clone();
        if excluded.contains(&skill.id) {
            self.metrics.record_repeat_selection();
        }

        let stats = CompletionStats::compute(records, today, self.policy);
        let completed_ids: BTreeSet<String> = records
            .iter()
            .filter(|r| !r.entity_id.is_empty())
            .map(|r| r.entity_id.clone())
            .collect();

        self.metrics.record_snapshot();
        tracing::debug!(
            account = %profile.user_id,
            today = %today.date,
            skill = %skill.id,
            streak = stats.current_streak,
            completed_today,
            "Built daily snapshot"
        );

        Ok(DailySnapshot {
            today: today.date,
            skill,
            completed_today,
            streak: stats.current_streak,
            completed_ids,
            stats,
        })
    }

    fn failed(&self, err: SparkError, account_id: &str) -> SparkError {
        self.metrics.record_error();
        tracing::warn!(account = %account_id, error = %err, "Tracker operation failed");
        if err.account.is_none() {
            err.with_account(account_id)
        } else {
            err
        }
    }
}
