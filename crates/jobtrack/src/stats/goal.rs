//! Application goals: the configured target, the progress towards it, and
//! the edge trigger that fires once when it is reached.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::CandidatureRecord;

pub const MIN_TARGET: u32 = 1;
pub const MAX_TARGET: u32 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPeriod {
    Day,
    Week,
    #[default]
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalTargets {
    #[serde(default = "default_day")]
    pub day: u32,
    #[serde(default = "default_week")]
    pub week: u32,
    #[serde(default = "default_month")]
    pub month: u32,
}

fn default_day() -> u32 {
    2
}

fn default_week() -> u32 {
    10
}

fn default_month() -> u32 {
    30
}

impl Default for GoalTargets {
    fn default() -> Self {
        Self {
            day: default_day(),
            week: default_week(),
            month: default_month(),
        }
    }
}

/// Active period plus one target per period.
///
/// Stored flat as `{"period": "month", "day": 2, "week": 10, "month": 30}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSpec {
    pub period: GoalPeriod,
    #[serde(flatten)]
    pub targets: GoalTargets,
}

impl GoalSpec {
    /// Target for the active period, never below one.
    pub fn target(&self) -> u32 {
        self.target_for(self.period)
    }

    pub fn target_for(&self, period: GoalPeriod) -> u32 {
        let raw = match period {
            GoalPeriod::Day => self.targets.day,
            GoalPeriod::Week => self.targets.week,
            GoalPeriod::Month => self.targets.month,
        };
        raw.max(MIN_TARGET)
    }

    /// Sets the active period's target, clamped to `1..=999`.
    pub fn set_target(&mut self, value: u32) {
        let value = value.clamp(MIN_TARGET, MAX_TARGET);
        match self.period {
            GoalPeriod::Day => self.targets.day = value,
            GoalPeriod::Week => self.targets.week = value,
            GoalPeriod::Month => self.targets.month = value,
        }
    }
}

/// Inclusive date range counted for `period` as of `today`.
///
/// The week starts on the most recent Monday and ends today; the month
/// covers its first day through today's month end.
pub fn window(period: GoalPeriod, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    match period {
        GoalPeriod::Day => (today, today),
        GoalPeriod::Week => {
            let back = i64::from(today.weekday().num_days_from_monday());
            (today - Duration::days(back), today)
        }
        GoalPeriod::Month => {
            let first = today.with_day(1).unwrap_or(today);
            let next = if today.month() == 12 {
                NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
            };
            let last = next.and_then(|d| d.pred_opt()).unwrap_or(today);
            (first, last)
        }
    }
}

/// Records whose application date falls in the period's window.
pub fn count_in_period(records: &[CandidatureRecord], period: GoalPeriod, today: NaiveDate) -> usize {
    let (start, end) = window(period, today);
    records
        .iter()
        .filter_map(|r| r.applied_date)
        .filter(|d| *d >= start && *d <= end)
        .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub period: GoalPeriod,
    pub count: usize,
    pub target: u32,
    pub percent: u32,
    pub reached: bool,
}

impl GoalProgress {
    pub fn compute(records: &[CandidatureRecord], spec: &GoalSpec, today: NaiveDate) -> Self {
        let count = count_in_period(records, spec.period, today);
        let target = spec.target();
        let ratio = count as f64 / f64::from(target) * 100.0;
        let percent = ratio.round().min(100.0) as u32;
        Self {
            period: spec.period,
            count,
            target,
            percent,
            reached: percent >= 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoalState {
    #[default]
    Below,
    Reached,
}

/// Remembers whether the goal was reached on the previous evaluation so the
/// celebration fires on the rising edge only.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalTrigger {
    state: GoalState,
}

impl GoalTrigger {
    pub fn state(&self) -> GoalState {
        self.state
    }

    /// Feeds a fresh evaluation. Returns true exactly on Below → Reached.
    /// Falling back below resets silently.
    pub fn observe(&mut self, progress: &GoalProgress) -> bool {
        let next = if progress.reached {
            GoalState::Reached
        } else {
            GoalState::Below
        };
        let fired = self.state == GoalState::Below && next == GoalState::Reached;
        self.state = next;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, RecordId, Status};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn applied(on: Option<NaiveDate>) -> CandidatureRecord {
        CandidatureRecord {
            id: RecordId::generate(),
            company: "Acme".to_string(),
            position: "Dev".to_string(),
            location: None,
            sector: None,
            contract_type: None,
            priority: Priority::Medium,
            status: Status::Applied,
            applied_date: on,
            link: None,
            contact_name: None,
            contact_email: None,
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn test_default_spec() {
        let spec = GoalSpec::default();
        assert_eq!(spec.period, GoalPeriod::Month);
        assert_eq!(spec.targets, GoalTargets { day: 2, week: 10, month: 30 });
        let json = serde_json::to_value(spec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"period": "month", "day": 2, "week": 10, "month": 30})
        );
    }

    #[test]
    fn test_week_window_starts_monday() {
        // 2026-10-16 is a Friday.
        assert_eq!(
            window(GoalPeriod::Week, date(2026, 10, 16)),
            (date(2026, 10, 12), date(2026, 10, 16))
        );
        // Sunday goes back six days.
        assert_eq!(
            window(GoalPeriod::Week, date(2026, 10, 18)),
            (date(2026, 10, 12), date(2026, 10, 18))
        );
        // Monday is its own start.
        assert_eq!(
            window(GoalPeriod::Week, date(2026, 10, 12)),
            (date(2026, 10, 12), date(2026, 10, 12))
        );
    }

    #[test]
    fn test_week_window_crosses_year_end() {
        // 2027-01-01 is a Friday; its week began on Monday 2026-12-28.
        let today = date(2027, 1, 1);
        assert_eq!(
            window(GoalPeriod::Week, today),
            (date(2026, 12, 28), date(2027, 1, 1))
        );

        let records: Vec<_> = [
            date(2026, 12, 27),
            date(2026, 12, 28),
            date(2026, 12, 31),
            date(2027, 1, 1),
        ]
        .into_iter()
        .map(|d| applied(Some(d)))
        .collect();
        assert_eq!(count_in_period(&records, GoalPeriod::Week, today), 3);
        assert_eq!(count_in_period(&records, GoalPeriod::Month, today), 1);
        assert_eq!(count_in_period(&records, GoalPeriod::Day, today), 1);
    }

    #[test]
    fn test_month_window_handles_december() {
        assert_eq!(
            window(GoalPeriod::Month, date(2026, 12, 5)),
            (date(2026, 12, 1), date(2026, 12, 31))
        );
        assert_eq!(
            window(GoalPeriod::Month, date(2028, 2, 10)),
            (date(2028, 2, 1), date(2028, 2, 29))
        );
    }

    #[test]
    fn test_count_in_period() {
        let today = date(2026, 10, 16);
        let records = vec![
            applied(Some(date(2026, 10, 16))),
            applied(Some(date(2026, 10, 12))),
            applied(Some(date(2026, 10, 11))),
            applied(Some(date(2026, 10, 1))),
            applied(Some(date(2026, 9, 30))),
            applied(None),
        ];
        assert_eq!(count_in_period(&records, GoalPeriod::Day, today), 1);
        assert_eq!(count_in_period(&records, GoalPeriod::Week, today), 2);
        assert_eq!(count_in_period(&records, GoalPeriod::Month, today), 4);
    }

    #[test]
    fn test_progress_rounds_and_caps() {
        let today = date(2026, 10, 16);
        let mut spec = GoalSpec {
            period: GoalPeriod::Day,
            targets: GoalTargets { day: 3, week: 10, month: 30 },
        };
        let one = vec![applied(Some(today))];
        let progress = GoalProgress::compute(&one, &spec, today);
        assert_eq!(progress.percent, 33);
        assert!(!progress.reached);

        spec.targets.day = 2;
        let three = vec![applied(Some(today)); 3];
        let progress = GoalProgress::compute(&three, &spec, today);
        assert_eq!(progress.count, 3);
        assert_eq!(progress.percent, 100);
        assert!(progress.reached);
    }

    #[test]
    fn test_zero_target_is_treated_as_one() {
        let spec = GoalSpec {
            period: GoalPeriod::Week,
            targets: GoalTargets { day: 2, week: 0, month: 30 },
        };
        assert_eq!(spec.target(), 1);
    }

    #[test]
    fn test_set_target_clamps() {
        let mut spec = GoalSpec::default();
        spec.set_target(0);
        assert_eq!(spec.targets.month, 1);
        spec.set_target(5000);
        assert_eq!(spec.targets.month, 999);
        spec.period = GoalPeriod::Day;
        spec.set_target(4);
        assert_eq!(spec.targets.day, 4);
        assert_eq!(spec.targets.month, 999);
    }

    #[test]
    fn test_trigger_fires_on_rising_edge_only() {
        let below = GoalProgress {
            period: GoalPeriod::Day,
            count: 1,
            target: 2,
            percent: 50,
            reached: false,
        };
        let reached = GoalProgress {
            count: 2,
            percent: 100,
            reached: true,
            ..below
        };

        let mut trigger = GoalTrigger::default();
        assert!(!trigger.observe(&below));
        assert!(trigger.observe(&reached));
        assert!(!trigger.observe(&reached));
        assert_eq!(trigger.state(), GoalState::Reached);
        assert!(!trigger.observe(&below));
        assert_eq!(trigger.state(), GoalState::Below);
        assert!(trigger.observe(&reached));
    }
}
