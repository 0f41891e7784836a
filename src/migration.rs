use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::completions::{parse_date_only, parse_timestamp};
use crate::error::SparkError;
use crate::store::{parse_interests, CompletionStore, NewCompletion, UserProfile};

const PREFERENCES_FILE: &str = "user_preferences.json";
const COMPLETED_FILE: &str = "completed_skills.json";
const TODAY_SKILL_FILE: &str = "today_skill.json";

/// Preferences as the on-device build stored them
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyPreferences {
    #[serde(default)]
    interests: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyCompletedSkill {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    completed_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Account already had interests; nothing was touched
    pub skipped: bool,
    pub interests_imported: usize,
    pub completions_imported: usize,
    /// Legacy completions without a readable date
    pub completions_dropped: usize,
    /// Already in the store from an earlier, interrupted run
    pub completions_present: usize,
    pub files_removed: usize,
}

/// Import on-device data into the store once, then delete the legacy files.
/// Accounts that already picked interests are left alone.
pub async fn migrate_legacy(
    store: &dyn CompletionStore,
    account_id: &str,
    legacy_dir: &Path,
) -> Result<MigrationReport, SparkError> {
    let mut report = MigrationReport::default();

    let existing = store.get_profile(account_id).await?;
    if existing.as_ref().map_or(false, |p| !p.interests.is_empty()) {
        tracing::debug!(account = %account_id, "Legacy data already migrated");
        report.skipped = true;
        return Ok(report);
    }

    let preferences: Option<LegacyPreferences> =
        read_legacy(&legacy_dir.join(PREFERENCES_FILE)).await?;
    let completed: Option<Vec<LegacyCompletedSkill>> =
        read_legacy(&legacy_dir.join(COMPLETED_FILE)).await?;

    if preferences.is_none() && completed.is_none() {
        return Ok(report);
    }

    // A failed run leaves the legacy files behind; rows it already wrote
    // are recognised on the retry and not imported twice.
    let already: HashSet<(String, DateTime<Utc>)> = store
        .list_completions(account_id)
        .await?
        .into_iter()
        .filter_map(|r| r.completed_at.map(|at| (r.entity_id, at)))
        .collect();

    for skill in completed.unwrap_or_default() {
        let Some(raw_date) = skill.completed_date.as_deref() else {
            tracing::warn!(account = %account_id, id = %skill.id, "Legacy completion has no date");
            report.completions_dropped += 1;
            continue;
        };
        let Some(completed_at) = parse_timestamp(raw_date) else {
            tracing::warn!(account = %account_id, id = %skill.id, date = %raw_date, "Legacy completion date unreadable");
            report.completions_dropped += 1;
            continue;
        };
        if already.contains(&(skill.id.clone(), completed_at)) {
            report.completions_present += 1;
            continue;
        }
        let mut completion = NewCompletion::new(account_id, &skill.id, completed_at);
        completion.completed_on = parse_date_only(raw_date);
        completion.notes = Some(format!("Migrated from local storage: {}", skill.title));
        store.add_completion(completion).await?;
        report.completions_imported += 1;
    }

    // Interests mark the account as migrated, so they go in last
    if let Some(preferences) = preferences {
        let mut profile = existing.unwrap_or_else(|| UserProfile::new(account_id));
        profile.interests = parse_interests(&preferences.interests);
        report.interests_imported = profile.interests.len();
        store.upsert_profile(profile).await?;
    }

    for name in [PREFERENCES_FILE, COMPLETED_FILE, TODAY_SKILL_FILE] {
        let path = legacy_dir.join(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => report.files_removed += 1,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "Failed to remove legacy file");
            }
        }
    }

    tracing::info!(
        account = %account_id,
        interests = report.interests_imported,
        completions = report.completions_imported,
        dropped = report.completions_dropped,
        "Migrated legacy local data"
    );
    Ok(report)
}

async fn read_legacy<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, SparkError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => serde_json::from_str(&content).map(Some).map_err(|e| {
            SparkError::new(format!("Failed to parse legacy file: {}", e), "migration")
                .with_context(format!("path: {:?}", path))
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SparkError::new(format!("Failed to read legacy file: {}", e), "io")
            .with_context(format!("path: {:?}", path))),
    }
}
