use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use parking_lot::RwLock;

/// Today's calendar date as the evaluator sees it, plus the UTC offset used
/// to map completion instants onto calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalDay {
    pub date: NaiveDate,
    pub offset: FixedOffset,
}

impl LocalDay {
    pub fn new(date: NaiveDate, offset: FixedOffset) -> Self {
        LocalDay { date, offset }
    }

    pub fn utc(date: NaiveDate) -> Self {
        LocalDay { date, offset: Utc.fix() }
    }

    /// Calendar date of an instant in this day's offset
    pub fn date_of(&self, instant: &DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// Whole days from `date` to today; negative for future dates
    pub fn days_since(&self, date: NaiveDate) -> i64 {
        (self.date - date).num_days()
    }
}

/// Source of "now". Injected everywhere a wall clock would otherwise be read.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn offset(&self) -> FixedOffset;

    fn today(&self) -> LocalDay {
        let offset = self.offset();
        LocalDay::new(self.now().with_timezone(&offset).date_naive(), offset)
    }
}

/// Reads the system clock and the host's local offset
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        *Local::now().offset()
    }
}

/// Settable clock for simulations and tests
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        FixedClock {
            now: RwLock::new(now),
            offset,
        }
    }

    /// Noon UTC on the given date
    pub fn on(date: NaiveDate) -> Self {
        let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        FixedClock::new(midnight + Duration::hours(12), Utc.fix())
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write() = now;
    }

    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.write();
        *now = *now + Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}
