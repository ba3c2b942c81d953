//! Target allocations produced by the evaluator.

use crate::error::EvalError;
use crate::market::Instrument;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Symbolic intent for positions that cannot be expressed as a fractional
/// weight (options structures). Only a tag; the structure itself is the
/// execution gateway's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionIntent {
    Straddle,
    Strangle,
}

impl fmt::Display for PositionIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Straddle => f.write_str("straddle"),
            Self::Strangle => f.write_str("strangle"),
        }
    }
}

/// Target for a single instrument: a fractional weight or a symbolic intent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetPosition {
    Weight(f64),
    Intent(PositionIntent),
}

impl TargetPosition {
    /// Creates a fractional weight target.
    ///
    /// # Errors
    /// Returns `EvalError::Configuration` if the weight lies outside [0.0, 1.0].
    pub fn weight(value: f64) -> Result<Self, EvalError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(EvalError::configuration(format!(
                "target weight must be in [0.0, 1.0], got {value}"
            )));
        }
        Ok(Self::Weight(value))
    }
}

/// Mapping from instrument to target position, produced once per invocation.
///
/// Uses a `BTreeMap` so serialized decisions are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationDecision {
    targets: BTreeMap<Instrument, TargetPosition>,
}

impl AllocationDecision {
    /// The neutral decision: no targets, no change requested.
    #[must_use]
    pub fn neutral() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_targets(targets: BTreeMap<Instrument, TargetPosition>) -> Self {
        Self { targets }
    }

    pub fn set(&mut self, instrument: Instrument, target: TargetPosition) {
        self.targets.insert(instrument, target);
    }

    #[must_use]
    pub fn target(&self, instrument: &Instrument) -> Option<&TargetPosition> {
        self.targets.get(instrument)
    }

    #[must_use]
    pub fn targets(&self) -> &BTreeMap<Instrument, TargetPosition> {
        &self.targets
    }

    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.targets.is_empty()
    }
}
