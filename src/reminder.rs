use chrono::{DateTime, Duration, FixedOffset, NaiveTime, TimeZone, Utc};

use crate::error::SparkError;
use crate::store::UserProfile;

/// "HH:MM" or "HH:MM:SS"
pub fn parse_reminder_time(raw: &str) -> Result<NaiveTime, SparkError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|e| {
            SparkError::new(format!("Invalid reminder time '{}': {}", raw, e), "reminder")
        })
}

/// Next instant the local clock (at `offset`) reads `at`. Strictly after `now`.
pub fn next_reminder(now: DateTime<Utc>, offset: FixedOffset, at: NaiveTime) -> DateTime<Utc> {
    let local_date = now.with_timezone(&offset).date_naive();
    let local_at = local_date.and_time(at);
    let utc_at = local_at - Duration::seconds(i64::from(offset.local_minus_utc()));
    let candidate = Utc.from_utc_datetime(&utc_at);

    if candidate > now {
        candidate
    } else {
        candidate + Duration::days(1)
    }
}

/// Next reminder for a profile, `None` when reminders are off
pub fn next_reminder_for(
    profile: &UserProfile,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> Result<Option<DateTime<Utc>>, SparkError> {
    if !profile.notification_enabled {
        return Ok(None);
    }
    let at = parse_reminder_time(&profile.notification_time)?;
    Ok(Some(next_reminder(now, offset, at)))
}
