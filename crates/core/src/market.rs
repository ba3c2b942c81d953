//! Market and alternative-data inputs for a single evaluation cycle.
//!
//! All types here are transient: the host fetches them fresh for every
//! invocation and the evaluator only reads them. Timestamps carry an explicit
//! offset because "now" is always caller-supplied in the market's trading
//! timezone, never sampled inside the library.

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque instrument identifier (ticker symbol).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instrument(String);

impl Instrument {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Instrument {
    fn from(symbol: &str) -> Self {
        Self(symbol.to_string())
    }
}

/// A single OHLCV price bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<FixedOffset>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

/// Named field of a [`Bar`], used by threshold extractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarField {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl BarField {
    #[must_use]
    pub const fn of(self, bar: &Bar) -> Decimal {
        match self {
            Self::Open => bar.open,
            Self::High => bar.high,
            Self::Low => bar.low,
            Self::Close => bar.close,
            Self::Volume => bar.volume,
        }
    }
}

impl fmt::Display for BarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
        };
        f.write_str(name)
    }
}

/// Timestamped bundle of per-instrument bars, oldest first.
///
/// Supplied fresh on each invocation; the evaluator never persists it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketSnapshot {
    bars: HashMap<Instrument, Vec<Bar>>,
}

impl MarketSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the bar series for an instrument. Bars must be oldest first.
    pub fn insert(&mut self, instrument: Instrument, bars: Vec<Bar>) {
        self.bars.insert(instrument, bars);
    }

    #[must_use]
    pub fn bars(&self, instrument: &Instrument) -> Option<&[Bar]> {
        self.bars.get(instrument).map(Vec::as_slice)
    }

    /// The most recent bar for an instrument, if any.
    #[must_use]
    pub fn latest(&self, instrument: &Instrument) -> Option<&Bar> {
        self.bars.get(instrument).and_then(|bars| bars.last())
    }
}

/// Kind of a dated calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Earnings,
    StockSplit,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Earnings => f.write_str("earnings"),
            Self::StockSplit => f.write_str("stock_split"),
        }
    }
}

/// A dated event from the calendar feed (earnings report, stock split).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub kind: EventKind,
    pub instrument: Instrument,
    pub date: NaiveDate,
}

/// A headline or article from the news feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    /// Instrument or topic the item was fetched for.
    pub topic: String,
    pub timestamp: DateTime<FixedOffset>,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bar(close: Decimal) -> Bar {
        Bar {
            timestamp: "2024-03-15T15:55:00-05:00".parse().unwrap(),
            open: dec!(100),
            high: dec!(101),
            low: dec!(99),
            close,
            volume: dec!(1000),
        }
    }

    #[test]
    fn latest_returns_last_bar() {
        let mut snapshot = MarketSnapshot::new();
        snapshot.insert(Instrument::from("TSLA"), vec![bar(dec!(95)), bar(dec!(97))]);

        let latest = snapshot.latest(&Instrument::from("TSLA")).unwrap();
        assert_eq!(latest.close, dec!(97));
    }

    #[test]
    fn latest_is_none_for_unknown_instrument() {
        let snapshot = MarketSnapshot::new();
        assert!(snapshot.latest(&Instrument::from("AAPL")).is_none());
    }

    #[test]
    fn latest_is_none_for_empty_series() {
        let mut snapshot = MarketSnapshot::new();
        snapshot.insert(Instrument::from("TSLA"), Vec::new());
        assert!(snapshot.latest(&Instrument::from("TSLA")).is_none());
    }

    #[test]
    fn bar_field_extracts_named_field() {
        let b = bar(dec!(97));
        assert_eq!(BarField::Open.of(&b), dec!(100));
        assert_eq!(BarField::Close.of(&b), dec!(97));
        assert_eq!(BarField::Volume.of(&b), dec!(1000));
    }
}
