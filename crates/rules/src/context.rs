use chrono::{DateTime, FixedOffset};
use signal_gate_core::{CalendarEvent, MarketSnapshot, NewsItem};

/// Borrowed view of one invocation's inputs.
///
/// The host resolves all data (and the current time, in the market's trading
/// timezone) before evaluation. Rules only read from this context.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub now: DateTime<FixedOffset>,
    pub snapshot: &'a MarketSnapshot,
    pub calendar: &'a [CalendarEvent],
    pub news: &'a [NewsItem],
}
