//! Weekly trigger-window rule.

use crate::{EvalContext, Rule};
use chrono::{Datelike, Duration, NaiveTime, Weekday};
use signal_gate_core::EvalError;

/// True iff "now" falls on the configured weekday inside
/// `[target - tolerance, target]`.
///
/// The tolerance reaches backward only, mirroring "check N minutes before
/// the close" triggers. A tolerance that would reach past midnight into the
/// previous day is rejected at construction.
#[derive(Debug, Clone)]
pub struct TimeWindowRule {
    weekday: Weekday,
    target: NaiveTime,
    earliest: NaiveTime,
}

impl TimeWindowRule {
    /// Creates a time-window rule.
    ///
    /// # Errors
    /// Returns `EvalError::Configuration` if the target time is invalid, the
    /// tolerance is negative, or the window would cross midnight.
    pub fn new(
        weekday: Weekday,
        hour: u32,
        minute: u32,
        tolerance: Duration,
    ) -> Result<Self, EvalError> {
        let target = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            EvalError::configuration(format!("invalid target time {hour:02}:{minute:02}"))
        })?;
        if tolerance < Duration::zero() {
            return Err(EvalError::configuration(
                "time window tolerance must be non-negative",
            ));
        }
        if tolerance > target.signed_duration_since(NaiveTime::MIN) {
            return Err(EvalError::configuration(format!(
                "tolerance of {} minutes crosses midnight for target {target}",
                tolerance.num_minutes()
            )));
        }
        Ok(Self {
            weekday,
            target,
            earliest: target - tolerance,
        })
    }
}

impl Rule for TimeWindowRule {
    fn name(&self) -> &str {
        "time_window"
    }

    fn evaluate(&self, ctx: &EvalContext<'_>) -> Result<bool, EvalError> {
        if ctx.now.weekday() != self.weekday {
            return Ok(false);
        }
        let time = ctx.now.time();
        Ok(self.earliest <= time && time <= self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};
    use signal_gate_core::MarketSnapshot;

    fn evaluate_at(rule: &TimeWindowRule, now: &str) -> bool {
        let snapshot = MarketSnapshot::new();
        let ctx = EvalContext {
            now: now.parse::<DateTime<FixedOffset>>().unwrap(),
            snapshot: &snapshot,
            calendar: &[],
            news: &[],
        };
        rule.evaluate(&ctx).unwrap()
    }

    fn friday_1555_5min() -> TimeWindowRule {
        TimeWindowRule::new(Weekday::Fri, 15, 55, Duration::minutes(5)).unwrap()
    }

    // 2024-03-15 is a Friday, 2024-03-14 a Thursday.

    #[test]
    fn window_start_is_inclusive() {
        assert!(evaluate_at(&friday_1555_5min(), "2024-03-15T15:50:00-05:00"));
    }

    #[test]
    fn one_second_before_window_fails() {
        assert!(!evaluate_at(&friday_1555_5min(), "2024-03-15T15:49:59-05:00"));
    }

    #[test]
    fn target_time_is_inclusive() {
        assert!(evaluate_at(&friday_1555_5min(), "2024-03-15T15:55:00-05:00"));
    }

    #[test]
    fn one_second_after_target_fails() {
        assert!(!evaluate_at(&friday_1555_5min(), "2024-03-15T15:55:01-05:00"));
    }

    #[test]
    fn wrong_weekday_fails_even_at_target_time() {
        assert!(!evaluate_at(&friday_1555_5min(), "2024-03-14T15:55:00-05:00"));
    }

    #[test]
    fn rejects_tolerance_crossing_midnight() {
        let err = TimeWindowRule::new(Weekday::Mon, 0, 30, Duration::minutes(31)).unwrap_err();
        assert!(matches!(err, EvalError::Configuration(_)));
    }

    #[test]
    fn accepts_tolerance_reaching_exactly_midnight() {
        assert!(TimeWindowRule::new(Weekday::Mon, 0, 30, Duration::minutes(30)).is_ok());
    }

    #[test]
    fn rejects_negative_tolerance() {
        assert!(TimeWindowRule::new(Weekday::Fri, 15, 55, Duration::minutes(-1)).is_err());
    }

    #[test]
    fn rejects_out_of_range_target_time() {
        assert!(TimeWindowRule::new(Weekday::Fri, 24, 0, Duration::zero()).is_err());
    }
}
