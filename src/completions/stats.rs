use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::LocalDay;
use crate::completions::streak::{self, StreakPolicy};
use crate::completions::CompletionRecord;

/// Dashboard numbers, all derived from the completion records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionStats {
    pub total_completions: usize,
    pub unique_days: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub streak_start: Option<NaiveDate>,
    pub last_completion: Option<NaiveDate>,
    pub average_satisfaction: Option<f32>,
    pub total_minutes: u32,
}

impl CompletionStats {
    pub fn compute(records: &[CompletionRecord], today: &LocalDay, policy: StreakPolicy) -> Self {
        let dates = streak::completion_dates(records, today);

        let ratings: Vec<f32> = records
            .iter()
            .filter_map(|r| r.satisfaction)
            .map(f32::from)
            .collect();
        let average_satisfaction = if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().sum::<f32>() / ratings.len() as f32)
        };

        CompletionStats {
            total_completions: records.len(),
            unique_days: dates.len(),
            current_streak: streak::streak_from_dates(&dates, today.date, policy),
            longest_streak: streak::longest_streak(&dates),
            streak_start: streak::streak_start(&dates, today.date, policy),
            last_completion: dates.range(..=today.date).next_back().copied(),
            average_satisfaction,
            total_minutes: records.iter().filter_map(|r| r.duration_minutes).sum(),
        }
    }
}
