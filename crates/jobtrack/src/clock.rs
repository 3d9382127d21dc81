//! Time source for goal windows and record timestamps.

use chrono::{DateTime, Local, NaiveDate, Utc};

pub trait Clock {
    /// Current instant, used for `createdAt` stamps.
    fn now(&self) -> DateTime<Utc>;

    /// The user's calendar day, used for goal windows.
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one instant. Used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            today: now.date_naive(),
        }
    }

    /// Pins the calendar day independently of the instant.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
