use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters for the tracker and coach. Atomic, cheap to clone and share.
#[derive(Clone, Debug, Default)]
pub struct Metrics {
    /// Daily snapshots computed
    pub snapshots: Arc<AtomicU64>,
    /// Completions written through the tracker
    pub completions_recorded: Arc<AtomicU64>,
    /// Selections that had to allow repeats
    pub repeat_selections: Arc<AtomicU64>,
    /// Coach replies received
    pub coach_replies: Arc<AtomicU64>,
    /// Store and coach failures
    pub errors_total: Arc<AtomicU64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub snapshots: u64,
    pub completions_recorded: u64,
    pub repeat_selections: u64,
    pub coach_replies: u64,
    pub errors_total: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_snapshot(&self) {
        self.snapshots.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_completion(&self) {
        self.completions_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_repeat_selection(&self) {
        self.repeat_selections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_coach_reply(&self) {
        self.coach_replies.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            snapshots: self.snapshots.load(Ordering::Relaxed),
            completions_recorded: self.completions_recorded.load(Ordering::Relaxed),
            repeat_selections: self.repeat_selections.load(Ordering::Relaxed),
            coach_replies: self.coach_replies.load(Ordering::Relaxed),
            errors_total: self.errors_total.load(Ordering::Relaxed),
        }
    }
}
