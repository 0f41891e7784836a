pub mod stats;
pub mod streak;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::LocalDay;

/// A single "mark complete" event. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub id: u64,
    /// Catalog item the completion is for
    pub entity_id: String,
    /// `None` when the source row carried no usable timestamp
    pub completed_at: Option<DateTime<Utc>>,
    /// Set when the source only had a calendar date. That date is used as-is
    /// instead of mapping `completed_at` through the local offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfaction: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CompletionRecord {
    pub fn new(id: u64, entity_id: impl Into<String>, completed_at: DateTime<Utc>) -> Self {
        CompletionRecord {
            id,
            entity_id: entity_id.into(),
            completed_at: Some(completed_at),
            completed_on: None,
            satisfaction: None,
            duration_minutes: None,
            notes: None,
        }
    }

    /// Calendar date of the completion as seen from `day`'s offset
    pub fn local_date(&self, day: &LocalDay) -> Option<NaiveDate> {
        self.completed_on
            .or_else(|| self.completed_at.map(|ts| day.date_of(&ts)))
    }
}

/// Completion as the backend stores it. Older rows carry `completed_date`
/// instead of `completed_at`; either may be missing or garbage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRow {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub custom_task_id: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub completed_date: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub satisfaction_level: Option<u8>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub task_name: Option<String>,
    #[serde(default)]
    pub task_category: Option<String>,
}

impl CompletionRow {
    /// Normalize into the one canonical record shape
    pub fn into_record(self) -> CompletionRecord {
        let parsed = parse_field(self.completed_at.as_deref())
            .or_else(|| parse_field(self.completed_date.as_deref()));
        let (completed_at, completed_on) = match parsed {
            Some((at, on)) => (Some(at), on),
            None => (None, None),
        };

        if completed_at.is_none() {
            tracing::debug!(
                id = ?self.id,
                completed_at = ?self.completed_at,
                completed_date = ?self.completed_date,
                "Completion row has no usable timestamp"
            );
        }

        CompletionRecord {
            id: self.id.unwrap_or_default(),
            entity_id: self.custom_task_id.unwrap_or_default(),
            completed_at,
            completed_on,
            satisfaction: self.satisfaction_level,
            duration_minutes: self.duration_minutes,
            notes: self.notes,
        }
    }

    pub fn from_record(user_id: &str, record: &CompletionRecord) -> Self {
        CompletionRow {
            id: Some(record.id),
            user_id: Some(user_id.to_string()),
            custom_task_id: Some(record.entity_id.clone()),
            completed_at: match record.completed_on {
                Some(_) => None,
                None => record.completed_at.map(|ts| ts.to_rfc3339()),
            },
            completed_date: record.completed_on.map(|d| d.format("%Y-%m-%d").to_string()),
            duration_minutes: record.duration_minutes,
            satisfaction_level: record.satisfaction,
            notes: record.notes.clone(),
            task_name: None,
            task_category: None,
        }
    }
}

fn parse_field(raw: Option<&str>) -> Option<(DateTime<Utc>, Option<NaiveDate>)> {
    let raw = raw?;
    let at = parse_timestamp(raw)?;
    Some((at, parse_date_only(raw)))
}

/// A bare `YYYY-MM-DD` with no time part
pub fn parse_date_only(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Parse the timestamp shapes seen in stored rows: RFC 3339, a naive
/// datetime (taken as UTC), or a bare date. Bare dates are pinned to noon UTC
/// for ordering; callers keep the date itself through `parse_date_only`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let noon = NaiveTime::from_hms_opt(12, 0, 0)?;
        return Some(Utc.from_utc_datetime(&date.and_time(noon)));
    }
    None
}
