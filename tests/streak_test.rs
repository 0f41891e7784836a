use chrono::{Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use skillspark_lib::clock::LocalDay;
use skillspark_lib::completions::stats::CompletionStats;
use skillspark_lib::completions::streak::{completion_dates, current_streak, longest_streak, StreakPolicy};
use skillspark_lib::completions::CompletionRecord;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn day() -> LocalDay {
    LocalDay::utc(today())
}

/// Completion at 10:00 UTC, `days_ago` days before today
fn done(days_ago: i64) -> CompletionRecord {
    let date = today() - Duration::days(days_ago);
    let at = Utc.from_utc_datetime(&date.and_hms_opt(10, 0, 0).unwrap());
    CompletionRecord::new((days_ago + 1000) as u64, format!("skill-{}", days_ago), at)
}

fn malformed() -> CompletionRecord {
    CompletionRecord {
        id: 99,
        entity_id: "broken".to_string(),
        completed_at: None,
        completed_on: None,
        satisfaction: None,
        duration_minutes: None,
        notes: None,
    }
}

#[test]
fn test_empty_is_zero() {
    assert_eq!(current_streak(&[], &day(), StreakPolicy::GraceToday), 0);
    assert_eq!(current_streak(&[], &day(), StreakPolicy::Strict), 0);
}

#[test]
fn test_today_only() {
    assert_eq!(current_streak(&[done(0)], &day(), StreakPolicy::GraceToday), 1);
    assert_eq!(current_streak(&[done(0)], &day(), StreakPolicy::Strict), 1);
}

#[test]
fn test_three_consecutive_days() {
    let records = vec![done(0), done(1), done(2)];
    assert_eq!(current_streak(&records, &day(), StreakPolicy::GraceToday), 3);
}

#[test]
fn test_gap_at_yesterday_stops_walk() {
    let records = vec![done(0), done(2)];
    assert_eq!(current_streak(&records, &day(), StreakPolicy::GraceToday), 1);
    assert_eq!(current_streak(&records, &day(), StreakPolicy::Strict), 1);
}

#[test]
fn test_duplicates_on_same_date_count_once() {
    let mut second = done(0);
    second.id = 50;
    let records = vec![done(0), second];
    assert_eq!(current_streak(&records, &day(), StreakPolicy::GraceToday), 1);
}

#[test]
fn test_not_yet_today_but_yesterday_run_under_grace() {
    let records = vec![done(1), done(2), done(3)];
    assert_eq!(current_streak(&records, &day(), StreakPolicy::GraceToday), 3);
}

#[test]
fn test_not_yet_today_breaks_strict_streak() {
    let records = vec![done(1), done(2), done(3)];
    assert_eq!(current_streak(&records, &day(), StreakPolicy::Strict), 0);
}

#[test]
fn test_two_days_missing_is_zero_under_both_policies() {
    let records = vec![done(2), done(3)];
    assert_eq!(current_streak(&records, &day(), StreakPolicy::GraceToday), 0);
    assert_eq!(current_streak(&records, &day(), StreakPolicy::Strict), 0);
}

#[test]
fn test_order_of_records_does_not_matter() {
    let forward = vec![done(0), done(1), done(2), done(4)];
    let mut backward = forward.clone();
    backward.reverse();
    let shuffled = vec![done(2), done(4), done(0), done(1)];

    let expected = current_streak(&forward, &day(), StreakPolicy::GraceToday);
    assert_eq!(expected, 3);
    assert_eq!(current_streak(&backward, &day(), StreakPolicy::GraceToday), expected);
    assert_eq!(current_streak(&shuffled, &day(), StreakPolicy::GraceToday), expected);
}

#[test]
fn test_malformed_records_are_skipped() {
    let records = vec![malformed(), done(0), malformed(), done(1)];
    assert_eq!(current_streak(&records, &day(), StreakPolicy::GraceToday), 2);
    assert_eq!(current_streak(&[malformed()], &day(), StreakPolicy::GraceToday), 0);
}

#[test]
fn test_future_completions_are_ignored() {
    let records = vec![done(-1), done(0), done(1)];
    assert_eq!(current_streak(&records, &day(), StreakPolicy::GraceToday), 2);
    assert_eq!(current_streak(&[done(-1)], &day(), StreakPolicy::GraceToday), 0);
}

#[test]
fn test_dates_follow_local_offset() {
    // 23:30 UTC on the 14th is already the 15th at UTC+2
    let late = Utc.with_ymd_and_hms(2024, 3, 14, 23, 30, 0).unwrap();
    let records = vec![CompletionRecord::new(1, "comm-1", late)];

    let utc_day = LocalDay::utc(today());
    assert_eq!(current_streak(&records, &utc_day, StreakPolicy::Strict), 0);

    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
    let local_day = LocalDay::new(today(), plus_two);
    assert_eq!(current_streak(&records, &local_day, StreakPolicy::Strict), 1);
}

#[test]
fn test_longest_streak_anywhere_in_history() {
    let records = vec![done(0), done(5), done(6), done(7), done(8), done(20)];
    let dates = completion_dates(&records, &day());
    assert_eq!(longest_streak(&dates), 4);
    assert_eq!(longest_streak(&completion_dates(&[], &day())), 0);
}

#[test]
fn test_stats_summary() {
    let mut rated = done(0);
    rated.satisfaction = Some(4);
    rated.duration_minutes = Some(15);
    let mut also_rated = done(1);
    also_rated.satisfaction = Some(2);
    also_rated.duration_minutes = Some(5);
    let records = vec![rated, also_rated, done(3), malformed()];

    let stats = CompletionStats::compute(&records, &day(), StreakPolicy::GraceToday);
    assert_eq!(stats.total_completions, 4);
    assert_eq!(stats.unique_days, 3);
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.longest_streak, 2);
    assert_eq!(stats.streak_start, Some(today() - Duration::days(1)));
    assert_eq!(stats.last_completion, Some(today()));
    assert_eq!(stats.average_satisfaction, Some(3.0));
    assert_eq!(stats.total_minutes, 20);
}

#[test]
fn test_stats_streak_start_under_grace() {
    let records = vec![done(1), done(2)];
    let stats = CompletionStats::compute(&records, &day(), StreakPolicy::GraceToday);
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.streak_start, Some(today() - Duration::days(2)));

    let strict = CompletionStats::compute(&records, &day(), StreakPolicy::Strict);
    assert_eq!(strict.current_streak, 0);
    assert_eq!(strict.streak_start, None);
}

#[test]
fn test_recomputation_is_idempotent() {
    let records: Vec<CompletionRecord> = (0..5).map(done).collect();
    let first = current_streak(&records, &day(), StreakPolicy::GraceToday);
    for _ in 0..3 {
        assert_eq!(current_streak(&records, &day(), StreakPolicy::GraceToday), first);
    }
}

#[test]
fn test_date_only_completions_count_on_their_own_date() {
    let dated = |id: u64, day: &str| {
        let mut record = CompletionRecord::new(id, "comm-1", Utc::now());
        record.completed_at = skillspark_lib::completions::parse_timestamp(day);
        record.completed_on = skillspark_lib::completions::parse_date_only(day);
        record
    };
    let records = vec![dated(1, "2024-03-14"), dated(2, "2024-03-15")];

    // Noon UTC on the 15th is already the 16th at UTC+13
    let plus_thirteen = FixedOffset::east_opt(13 * 3600).unwrap();
    let local_day = LocalDay::new(today(), plus_thirteen);
    assert_eq!(current_streak(&records, &local_day, StreakPolicy::Strict), 2);
}
