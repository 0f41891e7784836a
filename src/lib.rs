pub mod catalog;
pub mod clock;
pub mod coach;
pub mod completions;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod migration;
pub mod reminder;
pub mod store;
pub mod tracker;

#[cfg(test)]
#[path = "../tests/internal/error_handling_test.rs"]
mod error_handling_test;
#[cfg(test)]
#[path = "../tests/internal/config_test.rs"]
mod config_test;

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::clock::{Clock, SystemClock};
use crate::coach::{ChatMessage, CoachClient};
use crate::error::SparkError;
use crate::store::{CompletionStore, JsonFileStore, UserProfile};
use crate::tracker::{CompletionDetails, HabitTracker};

const ACCOUNT_ENV: &str = "SKILLSPARK_ACCOUNT";

/// Entry point for the `skillspark` binary.
///
/// `skillspark` prints today's snapshot as JSON; `skillspark complete` marks
/// today's skill done first; `skillspark coach [--task <id>] <question>` asks
/// the coach about today's skill or one of the account's custom tasks. The
/// account comes from `SKILLSPARK_ACCOUNT`.
pub fn run() -> Result<(), SparkError> {
    let config = config::get_app_config();
    logging::init_logging(config)?;
    tracing::info!("SkillSpark starting");

    let catalog = Arc::new(Catalog::load(config.catalog_path.as_deref())?);
    tracing::info!(items = catalog.len(), "Catalog loaded");

    let store: Arc<dyn CompletionStore> = Arc::new(JsonFileStore::new(config.data_dir.clone()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let tracker = HabitTracker::new(store.clone(), catalog, clock.clone(), config.streak_policy);

    let account = std::env::var(ACCOUNT_ENV).unwrap_or_else(|_| "local".to_string());
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str);

    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        SparkError::new(format!("Failed to create async runtime: {}", e), "startup")
    })?;

    rt.block_on(async {
        let report =
            migration::migrate_legacy(store.as_ref(), &account, &config::paths::legacy_dir()).await?;
        if report.completions_imported > 0 || report.interests_imported > 0 {
            tracing::info!(account = %account, report = ?report, "Legacy data imported");
        }

        let mut snapshot = tracker.snapshot(&account).await?;
        if command == Some("complete") && !snapshot.completed_today {
            let skill_id = snapshot.skill.id.clone();
            snapshot = tracker
                .complete(&account, &skill_id, CompletionDetails::default())
                .await?;
        }

        let coach_reply = if command == Some("coach") {
            let (item_id, question) = match args.get(1).map(String::as_str) {
                Some("--task") if args.len() > 2 => (args[2].clone(), args[3..].join(" ")),
                _ => (snapshot.skill.id.clone(), args[1..].join(" ")),
            };
            let target = tracker.coach_target(&account, &item_id).await?;
            let client = CoachClient::from_env(config.coach.clone())?
                .with_metrics(tracker.metrics().clone());
            Some(client.reply(&target, &[ChatMessage::user(question)]).await?)
        } else {
            None
        };

        // Accounts without a stored profile get the configured reminder time
        let profile = store.get_profile(&account).await?.unwrap_or_else(|| {
            let mut profile = UserProfile::new(account.as_str());
            profile.notification_time = config.reminder.time.clone();
            profile
        });
        let next = if config.reminder.enabled {
            reminder::next_reminder_for(&profile, clock.now(), clock.offset())?
        } else {
            None
        };

        let output = serde_json::json!({
            "account": account,
            "snapshot": snapshot,
            "next_reminder": next,
            "coach": coach_reply,
        });
        let text = serde_json::to_string_pretty(&output)?;
        println!("{}", text);
        Ok::<(), SparkError>(())
    })?;

    tracing::info!(metrics = ?tracker.metrics().snapshot(), "SkillSpark finished");
    Ok(())
}
