//! Static configuration surface, loaded once at construction.
//!
//! A gate definition is an ordered list of rule configs. Order matters:
//! rules are evaluated left to right with short-circuit AND, so cheap
//! time-based rules should come before rules that scan data.

use crate::allocation::PositionIntent;
use crate::market::{BarField, EventKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level evaluator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Tracked instrument list.
    pub instruments: Vec<String>,
    /// Cadence label ("1min", "1day"). Interpreted by the host scheduler,
    /// not by the evaluator.
    pub interval: String,
    /// Ordered gate definition.
    pub gate: Vec<RuleConfig>,
    pub sizing: SizingConfig,
}

/// One rule of the gate. An unrecognized `kind` fails deserialization, so a
/// rule that exists only on paper can never be silently skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleConfig {
    /// Trigger window: weekday (0 = Monday .. 6 = Sunday) and time of day,
    /// with a backward tolerance in minutes.
    TimeWindow {
        weekday: u8,
        hour: u32,
        minute: u32,
        tolerance_minutes: i64,
        #[serde(default)]
        negate: bool,
    },
    /// Any event of `event` kind for one of `instruments` within
    /// `window_days` of now (positive = upcoming, negative = recent past).
    CalendarProximity {
        event: EventKind,
        window_days: i64,
        instruments: Vec<String>,
        #[serde(default)]
        negate: bool,
    },
    /// Any news item within `recency_hours` containing all `required_terms`
    /// and none of `excluded_terms` (case-insensitive substrings).
    ContentMatch {
        recency_hours: i64,
        required_terms: Vec<String>,
        #[serde(default)]
        excluded_terms: Vec<String>,
        /// Restrict to items fetched for these topics; empty means any.
        #[serde(default)]
        topics: Vec<String>,
        #[serde(default)]
        negate: bool,
    },
    /// A derived quantity compared against a threshold.
    Threshold {
        quantity: QuantityConfig,
        comparator: Comparator,
        threshold: Decimal,
        #[serde(default)]
        negate: bool,
    },
}

/// Named pure extraction over the snapshot for a threshold rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "metric", rename_all = "snake_case")]
pub enum QuantityConfig {
    /// Fractional change between two fields of the latest bar:
    /// `(to - from) / from`.
    PercentChange {
        instrument: String,
        from: BarField,
        to: BarField,
    },
    /// A field of the latest bar, as-is.
    FieldValue { instrument: String, field: BarField },
}

/// Comparison applied to the derived quantity. `AbsGe` compares the
/// quantity's absolute value, for distance-style checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    Le,
    Ge,
    Lt,
    Gt,
    Eq,
    AbsGe,
}

/// Per-instrument target when the gate passes: a weight in [0, 1] or a
/// symbolic intent tag ("straddle" / "strangle").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetConfig {
    Weight(f64),
    Intent(PositionIntent),
}

/// Sizing configuration for the allocation decision.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SizingConfig {
    pub targets: BTreeMap<String, TargetConfig>,
}
