use crate::{EvalContext, Rule};
use signal_gate_core::EvalError;

/// Inverts the wrapped rule's boolean result.
///
/// Data errors pass through un-inverted: "the earnings feed was missing" is
/// not evidence that no earnings are upcoming.
pub struct Not {
    inner: Box<dyn Rule>,
    name: String,
}

impl Not {
    #[must_use]
    pub fn new(inner: Box<dyn Rule>) -> Self {
        let name = format!("not({})", inner.name());
        Self { inner, name }
    }
}

impl Rule for Not {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, ctx: &EvalContext<'_>) -> Result<bool, EvalError> {
        Ok(!self.inner.evaluate(ctx)?)
    }
}
