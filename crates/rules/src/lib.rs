//! Predicate library for the eligibility gate.
//!
//! Every rule is a pure, side-effect-free function of one [`EvalContext`]:
//! no rule samples the clock or performs I/O, so identical inputs always
//! produce identical results.

pub mod calendar;
pub mod content;
pub mod context;
pub mod negate;
pub mod threshold;
pub mod time_window;

pub use calendar::CalendarProximityRule;
pub use content::ContentMatchRule;
pub use context::EvalContext;
pub use negate::Not;
pub use threshold::{ExtractFn, Quantity, ThresholdRule};
pub use time_window::TimeWindowRule;

use signal_gate_core::EvalError;

/// A named eligibility predicate.
pub trait Rule: Send + Sync {
    /// Stable name used in evaluation traces.
    fn name(&self) -> &str;

    /// Evaluates the predicate against one invocation's inputs.
    ///
    /// # Errors
    /// Returns `EvalError::DataUnavailable` when a required input is missing.
    /// Missing data is never coerced to a boolean.
    fn evaluate(&self, ctx: &EvalContext<'_>) -> Result<bool, EvalError>;
}
