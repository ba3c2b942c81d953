use thiserror::Error;

/// Errors raised by gate construction and rule evaluation.
///
/// `Configuration` surfaces eagerly when an evaluator is built and is never
/// retried. `DataUnavailable` aborts a single gate run; the evaluator records
/// it in the trace and falls back to the neutral allocation, since a missing
/// input must never be read as a trade signal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Invalid rule or sizing parameters, detected at construction time.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A rule required data absent from the supplied inputs.
    #[error("data unavailable in rule '{rule}': {detail}")]
    DataUnavailable { rule: String, detail: String },
}

impl EvalError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn unavailable(rule: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::DataUnavailable {
            rule: rule.into(),
            detail: detail.into(),
        }
    }
}
