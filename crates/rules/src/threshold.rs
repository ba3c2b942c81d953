//! Threshold rule over quantities derived from the snapshot.

use crate::{EvalContext, Rule};
use rust_decimal::Decimal;
use signal_gate_core::{BarField, Comparator, EvalError, Instrument, MarketSnapshot};
use std::fmt;
use std::sync::Arc;

/// Extraction function type for caller-supplied quantities.
pub type ExtractFn = dyn Fn(&MarketSnapshot) -> Result<Decimal, EvalError> + Send + Sync;

/// A pure extraction of one numeric quantity from the snapshot.
///
/// The named variants cover the quantities the gate configuration can
/// express; `Custom` lets a host inject any other already-resolved pure
/// computation (an option-chain distance, a spread between two feeds)
/// without the rule library knowing about it.
#[derive(Clone)]
pub enum Quantity {
    /// `(to - from) / from` on the latest bar.
    PercentChange {
        instrument: Instrument,
        from: BarField,
        to: BarField,
    },
    /// A field of the latest bar, as-is.
    FieldValue {
        instrument: Instrument,
        field: BarField,
    },
    /// Caller-supplied extraction, named for traces and error attribution.
    Custom {
        name: String,
        extract: Arc<ExtractFn>,
    },
}

impl Quantity {
    fn resolve(&self, rule: &str, snapshot: &MarketSnapshot) -> Result<Decimal, EvalError> {
        match self {
            Self::PercentChange {
                instrument,
                from,
                to,
            } => {
                let bar = latest_bar(rule, snapshot, instrument)?;
                let base = from.of(bar);
                if base.is_zero() {
                    return Err(EvalError::unavailable(
                        rule,
                        format!("latest {instrument} bar has zero {from}, cannot derive change"),
                    ));
                }
                Ok((to.of(bar) - base) / base)
            }
            Self::FieldValue { instrument, field } => {
                Ok(field.of(latest_bar(rule, snapshot, instrument)?))
            }
            Self::Custom { extract, .. } => extract(snapshot),
        }
    }
}

impl fmt::Debug for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PercentChange {
                instrument,
                from,
                to,
            } => write!(f, "PercentChange({instrument}: {from} -> {to})"),
            Self::FieldValue { instrument, field } => {
                write!(f, "FieldValue({instrument}.{field})")
            }
            Self::Custom { name, .. } => write!(f, "Custom({name})"),
        }
    }
}

fn latest_bar<'a>(
    rule: &str,
    snapshot: &'a MarketSnapshot,
    instrument: &Instrument,
) -> Result<&'a signal_gate_core::Bar, EvalError> {
    snapshot
        .latest(instrument)
        .ok_or_else(|| EvalError::unavailable(rule, format!("no bars for {instrument}")))
}

/// True iff the derived quantity satisfies the comparator against the
/// threshold. Missing data raises `DataUnavailable`; it is never read as
/// zero or as "condition met".
#[derive(Debug, Clone)]
pub struct ThresholdRule {
    quantity: Quantity,
    comparator: Comparator,
    threshold: Decimal,
}

impl ThresholdRule {
    /// Creates a threshold rule.
    ///
    /// # Errors
    /// Returns `EvalError::Configuration` for an `AbsGe` comparison against a
    /// negative threshold, which would be vacuously true.
    pub fn new(
        quantity: Quantity,
        comparator: Comparator,
        threshold: Decimal,
    ) -> Result<Self, EvalError> {
        if comparator == Comparator::AbsGe && threshold < Decimal::ZERO {
            return Err(EvalError::configuration(
                "absolute-distance threshold must be non-negative",
            ));
        }
        Ok(Self {
            quantity,
            comparator,
            threshold,
        })
    }
}

impl Rule for ThresholdRule {
    fn name(&self) -> &str {
        "threshold"
    }

    fn evaluate(&self, ctx: &EvalContext<'_>) -> Result<bool, EvalError> {
        let value = self.quantity.resolve(self.name(), ctx.snapshot)?;
        Ok(match self.comparator {
            Comparator::Le => value <= self.threshold,
            Comparator::Ge => value >= self.threshold,
            Comparator::Lt => value < self.threshold,
            Comparator::Gt => value > self.threshold,
            Comparator::Eq => value == self.threshold,
            Comparator::AbsGe => value.abs() >= self.threshold,
        })
    }
}
