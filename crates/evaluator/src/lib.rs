//! Time-gated multi-signal eligibility evaluator.
//!
//! One synchronous invocation per scheduling tick: the host supplies the
//! current time and fully-resolved market, calendar, and news inputs, and
//! receives a target allocation plus a trace of every rule evaluated. The
//! evaluator holds only immutable configuration, so independent invocations
//! are safe from any thread.

pub mod evaluator;
pub mod gate;
pub mod sizing;

pub use evaluator::{EligibilityEvaluator, Evaluation};
pub use gate::{Gate, RuleOutcome, Trace, TraceEntry};
pub use sizing::Sizer;
