use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::clock::LocalDay;
use crate::completions::CompletionRecord;

/// How a day with no completion *yet* is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakPolicy {
    /// Today still open: the streak is yesterday's run until today ends.
    #[default]
    GraceToday,
    /// Nothing today means the streak is 0.
    Strict,
}

/// Distinct local calendar dates with at least one completion.
/// Records without a timestamp are skipped.
pub fn completion_dates(records: &[CompletionRecord], today: &LocalDay) -> BTreeSet<NaiveDate> {
    records
        .iter()
        .filter_map(|record| match record.local_date(today) {
            Some(date) => Some(date),
            None => {
                tracing::debug!(
                    id = record.id,
                    entity_id = %record.entity_id,
                    "Skipping completion without timestamp"
                );
                None
            }
        })
        .collect()
}

/// Consecutive-day streak ending today (or yesterday, under grace).
pub fn current_streak(records: &[CompletionRecord], today: &LocalDay, policy: StreakPolicy) -> u32 {
    let dates = completion_dates(records, today);
    streak_from_dates(&dates, today.date, policy)
}

/// Walk the dates newest first; the first missing day ends the walk.
/// Dates after `today` are ignored.
pub fn streak_from_dates(dates: &BTreeSet<NaiveDate>, today: NaiveDate, policy: StreakPolicy) -> u32 {
    let Some(mut expected) = walk_start(dates, today, policy) else {
        return 0;
    };

    let mut streak = 0;
    for &date in dates.range(..=expected).rev() {
        if date != expected {
            break;
        }
        streak += 1;
        match expected.checked_sub_signed(Duration::days(1)) {
            Some(previous) => expected = previous,
            None => break,
        }
    }
    streak
}

/// First day of the current run, if there is one
pub fn streak_start(dates: &BTreeSet<NaiveDate>, today: NaiveDate, policy: StreakPolicy) -> Option<NaiveDate> {
    let streak = streak_from_dates(dates, today, policy);
    if streak == 0 {
        return None;
    }
    let end = walk_start(dates, today, policy)?;
    end.checked_sub_signed(Duration::days(i64::from(streak) - 1))
}

/// Longest run of consecutive dates anywhere in history
pub fn longest_streak(dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for &date in dates {
        run = match previous {
            Some(p) if p.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        previous = Some(date);
    }
    best
}

fn walk_start(dates: &BTreeSet<NaiveDate>, today: NaiveDate, policy: StreakPolicy) -> Option<NaiveDate> {
    if dates.contains(&today) {
        return Some(today);
    }
    match policy {
        StreakPolicy::Strict => None,
        StreakPolicy::GraceToday => today.pred_opt(),
    }
}
