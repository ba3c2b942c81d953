//! Calendar-proximity rule over earnings and stock-split feeds.

use crate::{EvalContext, Rule};
use chrono::Duration;
use signal_gate_core::{EvalError, EventKind, Instrument};
use std::collections::HashSet;

/// True iff any event of the configured kind, for one of the configured
/// instruments, falls within the signed window around "now".
///
/// A positive window looks forward ("earnings next week"), a negative one
/// backward ("split announced in the past three weeks"). The boundary at
/// `now + window` is inclusive; "now" itself is excluded. An empty calendar
/// feed is simply no match, never an error.
#[derive(Debug, Clone)]
pub struct CalendarProximityRule {
    kind: EventKind,
    instruments: HashSet<Instrument>,
    window_days: i64,
}

impl CalendarProximityRule {
    /// Creates a calendar-proximity rule with a window expressed in whole days.
    ///
    /// # Errors
    /// Returns `EvalError::Configuration` if the window rounds to zero days
    /// or the instrument set is empty.
    pub fn new(
        kind: EventKind,
        instruments: impl IntoIterator<Item = Instrument>,
        window: Duration,
    ) -> Result<Self, EvalError> {
        let window_days = window.num_days();
        if window_days == 0 {
            return Err(EvalError::configuration(
                "calendar window must be at least one day in either direction",
            ));
        }
        let instruments: HashSet<Instrument> = instruments.into_iter().collect();
        if instruments.is_empty() {
            return Err(EvalError::configuration(
                "calendar rule requires at least one instrument",
            ));
        }
        Ok(Self {
            kind,
            instruments,
            window_days,
        })
    }
}

impl Rule for CalendarProximityRule {
    fn name(&self) -> &str {
        "calendar_proximity"
    }

    fn evaluate(&self, ctx: &EvalContext<'_>) -> Result<bool, EvalError> {
        let today = ctx.now.date_naive();
        Ok(ctx.calendar.iter().any(|event| {
            if event.kind != self.kind || !self.instruments.contains(&event.instrument) {
                return false;
            }
            let offset = (event.date - today).num_days();
            if self.window_days > 0 {
                offset > 0 && offset <= self.window_days
            } else {
                offset < 0 && offset >= self.window_days
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use signal_gate_core::{CalendarEvent, MarketSnapshot};

    fn event(kind: EventKind, instrument: &str, date: &str) -> CalendarEvent {
        CalendarEvent {
            kind,
            instrument: Instrument::from(instrument),
            date: date.parse::<NaiveDate>().unwrap(),
        }
    }

    fn evaluate(rule: &CalendarProximityRule, calendar: &[CalendarEvent]) -> bool {
        let snapshot = MarketSnapshot::new();
        let ctx = EvalContext {
            now: "2024-03-15T15:55:00-05:00".parse().unwrap(),
            snapshot: &snapshot,
            calendar,
            news: &[],
        };
        rule.evaluate(&ctx).unwrap()
    }

    fn earnings_next_7d() -> CalendarProximityRule {
        CalendarProximityRule::new(
            EventKind::Earnings,
            [Instrument::from("TSLA")],
            Duration::days(7),
        )
        .unwrap()
    }

    #[test]
    fn event_on_window_boundary_matches() {
        let calendar = [event(EventKind::Earnings, "TSLA", "2024-03-22")];
        assert!(evaluate(&earnings_next_7d(), &calendar));
    }

    #[test]
    fn event_today_does_not_match() {
        let calendar = [event(EventKind::Earnings, "TSLA", "2024-03-15")];
        assert!(!evaluate(&earnings_next_7d(), &calendar));
    }

    #[test]
    fn event_past_window_does_not_match() {
        let calendar = [event(EventKind::Earnings, "TSLA", "2024-03-23")];
        assert!(!evaluate(&earnings_next_7d(), &calendar));
    }

    #[test]
    fn empty_calendar_is_no_match_not_an_error() {
        assert!(!evaluate(&earnings_next_7d(), &[]));
    }

    #[test]
    fn other_kind_and_other_instrument_ignored() {
        let calendar = [
            event(EventKind::StockSplit, "TSLA", "2024-03-20"),
            event(EventKind::Earnings, "AAPL", "2024-03-20"),
        ];
        assert!(!evaluate(&earnings_next_7d(), &calendar));
    }

    #[test]
    fn backward_window_matches_recent_past() {
        let rule = CalendarProximityRule::new(
            EventKind::StockSplit,
            [Instrument::from("NVDA")],
            Duration::days(-21),
        )
        .unwrap();
        let recent = [event(EventKind::StockSplit, "NVDA", "2024-03-01")];
        let old = [event(EventKind::StockSplit, "NVDA", "2024-02-20")];
        assert!(evaluate(&rule, &recent));
        assert!(!evaluate(&rule, &old));
    }

    #[test]
    fn rejects_zero_window() {
        let err = CalendarProximityRule::new(
            EventKind::Earnings,
            [Instrument::from("TSLA")],
            Duration::hours(12),
        )
        .unwrap_err();
        assert!(matches!(err, EvalError::Configuration(_)));
    }

    #[test]
    fn rejects_empty_instrument_set() {
        assert!(CalendarProximityRule::new(EventKind::Earnings, [], Duration::days(7)).is_err());
    }
}
