//! Short-circuit AND combinator over an ordered rule list.

use serde::{Deserialize, Serialize};
use signal_gate_rules::{EvalContext, Rule};
use tracing::{debug, warn};

/// Outcome of one rule within a gate run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleOutcome {
    Passed,
    Failed,
    /// The rule could not be evaluated; carries the error description.
    Unavailable(String),
}

/// One entry of an evaluation trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub rule: String,
    pub outcome: RuleOutcome,
}

/// Ordered record of the rules actually evaluated in one gate run.
///
/// Skipped rules never appear, so "failed rule 2 of 5" and "all 5 passed"
/// are distinguishable from the trace alone.
pub type Trace = Vec<TraceEntry>;

/// Ordered conjunction of eligibility rules.
///
/// Evaluation is left to right and stops at the first rule that fails or
/// cannot be evaluated. An empty gate is vacuously eligible.
pub struct Gate {
    rules: Vec<Box<dyn Rule>>,
}

impl std::fmt::Debug for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gate")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Gate {
    #[must_use]
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates the gate, returning eligibility and the trace.
    #[must_use]
    pub fn evaluate(&self, ctx: &EvalContext<'_>) -> (bool, Trace) {
        let mut trace = Trace::with_capacity(self.rules.len());
        for rule in &self.rules {
            match rule.evaluate(ctx) {
                Ok(true) => {
                    debug!(rule = rule.name(), "rule passed");
                    trace.push(TraceEntry {
                        rule: rule.name().to_string(),
                        outcome: RuleOutcome::Passed,
                    });
                }
                Ok(false) => {
                    debug!(rule = rule.name(), "rule failed, gate closed");
                    trace.push(TraceEntry {
                        rule: rule.name().to_string(),
                        outcome: RuleOutcome::Failed,
                    });
                    return (false, trace);
                }
                Err(err) => {
                    warn!(rule = rule.name(), error = %err, "rule could not be evaluated, gate closed");
                    trace.push(TraceEntry {
                        rule: rule.name().to_string(),
                        outcome: RuleOutcome::Unavailable(err.to_string()),
                    });
                    return (false, trace);
                }
            }
        }
        (true, trace)
    }
}
