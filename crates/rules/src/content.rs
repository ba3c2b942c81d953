//! Substring matching over recent news items.
//!
//! Matching is normalized substring containment, not sentiment analysis.
//! That is a deliberate limitation carried over from the strategies this
//! library generalizes; callers wanting semantic matching must pre-classify
//! items upstream and feed the result in as a term.

use crate::{EvalContext, Rule};
use chrono::Duration;
use signal_gate_core::{EvalError, NewsItem};
use std::collections::HashSet;

/// True iff any sufficiently recent news item contains every required term
/// and none of the excluded terms.
#[derive(Debug, Clone)]
pub struct ContentMatchRule {
    recency: Duration,
    required: Vec<String>,
    excluded: Vec<String>,
    /// Lower-cased topic filter; empty means every item is considered.
    topics: HashSet<String>,
}

impl ContentMatchRule {
    /// Creates a content-match rule. Terms are matched case-insensitively
    /// with whitespace runs collapsed.
    ///
    /// # Errors
    /// Returns `EvalError::Configuration` if the recency window is not
    /// positive or the required-term set is empty (a rule that matches
    /// everything is a misconfiguration, not a predicate).
    pub fn new(
        recency: Duration,
        required: impl IntoIterator<Item = String>,
        excluded: impl IntoIterator<Item = String>,
        topics: impl IntoIterator<Item = String>,
    ) -> Result<Self, EvalError> {
        if recency <= Duration::zero() {
            return Err(EvalError::configuration(
                "news recency window must be positive",
            ));
        }
        let required: Vec<String> = required.into_iter().map(|t| normalize(&t)).collect();
        if required.is_empty() {
            return Err(EvalError::configuration(
                "content rule requires at least one required term",
            ));
        }
        Ok(Self {
            recency,
            required,
            excluded: excluded.into_iter().map(|t| normalize(&t)).collect(),
            topics: topics.into_iter().map(|t| t.to_lowercase()).collect(),
        })
    }

    fn matches(&self, ctx: &EvalContext<'_>, item: &NewsItem) -> bool {
        let age = ctx.now.signed_duration_since(item.timestamp);
        if age < Duration::zero() || age >= self.recency {
            return false;
        }
        if !self.topics.is_empty() && !self.topics.contains(&item.topic.to_lowercase()) {
            return false;
        }
        let text = normalize(&item.content);
        self.required.iter().all(|term| text.contains(term.as_str()))
            && !self.excluded.iter().any(|term| text.contains(term.as_str()))
    }
}

impl Rule for ContentMatchRule {
    fn name(&self) -> &str {
        "content_match"
    }

    fn evaluate(&self, ctx: &EvalContext<'_>) -> Result<bool, EvalError> {
        Ok(ctx.news.iter().any(|item| self.matches(ctx, item)))
    }
}

/// Lower-cases and collapses whitespace runs to single spaces.
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
