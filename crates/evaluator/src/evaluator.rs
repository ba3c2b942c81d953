//! Top-level evaluator: configuration in, allocation decision out.

use crate::gate::{Gate, RuleOutcome, Trace};
use crate::sizing::Sizer;
use chrono::{DateTime, Duration, FixedOffset, Weekday};
use signal_gate_core::{
    AllocationDecision, CalendarEvent, EvalError, EvaluatorConfig, Instrument, MarketSnapshot,
    NewsItem, QuantityConfig, RuleConfig,
};
use signal_gate_rules::{
    CalendarProximityRule, ContentMatchRule, EvalContext, Not, Quantity, Rule, ThresholdRule,
    TimeWindowRule,
};
use tracing::info;

/// Result of one evaluator invocation.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub eligible: bool,
    pub decision: AllocationDecision,
    pub trace: Trace,
}

/// A configured gate plus sizing, evaluated once per scheduling tick.
///
/// Holds only immutable configuration: no state is carried between calls,
/// so the same evaluator can serve independent invocations from any thread.
/// Serializing overlapping evaluations over the same instrument set is the
/// host's responsibility.
#[derive(Debug)]
pub struct EligibilityEvaluator {
    instruments: Vec<Instrument>,
    interval: String,
    gate: Gate,
    sizer: Sizer,
}

impl EligibilityEvaluator {
    /// Builds an evaluator, validating every rule and sizing parameter
    /// eagerly so configuration mistakes never surface mid-evaluation.
    ///
    /// # Errors
    /// Returns `EvalError::Configuration` for an empty instrument list or
    /// any invalid rule or weight parameter.
    pub fn from_config(config: &EvaluatorConfig) -> Result<Self, EvalError> {
        if config.instruments.is_empty() {
            return Err(EvalError::configuration(
                "at least one tracked instrument is required",
            ));
        }
        let mut rules: Vec<Box<dyn Rule>> = Vec::with_capacity(config.gate.len());
        for rule_config in &config.gate {
            rules.push(build_rule(rule_config)?);
        }
        Ok(Self {
            instruments: config
                .instruments
                .iter()
                .map(|symbol| Instrument::new(symbol.as_str()))
                .collect(),
            interval: config.interval.clone(),
            gate: Gate::new(rules),
            sizer: Sizer::from_config(&config.sizing)?,
        })
    }

    /// Tracked instruments.
    #[must_use]
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Cadence label for the host scheduler ("1min", "1day").
    #[must_use]
    pub fn interval(&self) -> &str {
        &self.interval
    }

    /// Runs the gate over one invocation's inputs and produces a decision.
    ///
    /// `now` must be the current time in the market's trading timezone; the
    /// evaluator never samples the clock itself. If any rule cannot be
    /// evaluated, the gate closes, the failure is recorded in the trace, and
    /// the decision defaults to neutral — missing data is never a signal.
    #[must_use]
    pub fn evaluate(
        &self,
        now: DateTime<FixedOffset>,
        snapshot: &MarketSnapshot,
        calendar: &[CalendarEvent],
        news: &[NewsItem],
    ) -> Evaluation {
        let ctx = EvalContext {
            now,
            snapshot,
            calendar,
            news,
        };
        let (eligible, trace) = self.gate.evaluate(&ctx);
        let aborted = trace
            .last()
            .is_some_and(|entry| matches!(entry.outcome, RuleOutcome::Unavailable(_)));
        info!(
            eligible,
            aborted,
            rules_evaluated = trace.len(),
            rules_total = self.gate.len(),
            "gate evaluation complete"
        );
        Evaluation {
            eligible,
            decision: self.sizer.decide(eligible),
            trace,
        }
    }
}

fn build_rule(config: &RuleConfig) -> Result<Box<dyn Rule>, EvalError> {
    let (rule, negate): (Box<dyn Rule>, bool) = match config {
        RuleConfig::TimeWindow {
            weekday,
            hour,
            minute,
            tolerance_minutes,
            negate,
        } => (
            Box::new(TimeWindowRule::new(
                weekday_from_index(*weekday)?,
                *hour,
                *minute,
                Duration::minutes(*tolerance_minutes),
            )?),
            *negate,
        ),
        RuleConfig::CalendarProximity {
            event,
            window_days,
            instruments,
            negate,
        } => (
            Box::new(CalendarProximityRule::new(
                *event,
                instruments.iter().map(|s| Instrument::new(s.as_str())),
                Duration::days(*window_days),
            )?),
            *negate,
        ),
        RuleConfig::ContentMatch {
            recency_hours,
            required_terms,
            excluded_terms,
            topics,
            negate,
        } => (
            Box::new(ContentMatchRule::new(
                Duration::hours(*recency_hours),
                required_terms.iter().cloned(),
                excluded_terms.iter().cloned(),
                topics.iter().cloned(),
            )?),
            *negate,
        ),
        RuleConfig::Threshold {
            quantity,
            comparator,
            threshold,
            negate,
        } => {
            let quantity = match quantity {
                QuantityConfig::PercentChange {
                    instrument,
                    from,
                    to,
                } => Quantity::PercentChange {
                    instrument: Instrument::new(instrument.as_str()),
                    from: *from,
                    to: *to,
                },
                QuantityConfig::FieldValue { instrument, field } => Quantity::FieldValue {
                    instrument: Instrument::new(instrument.as_str()),
                    field: *field,
                },
            };
            (
                Box::new(ThresholdRule::new(quantity, *comparator, *threshold)?),
                *negate,
            )
        }
    };
    Ok(if negate {
        Box::new(Not::new(rule))
    } else {
        rule
    })
}

/// Maps a configured weekday index (0 = Monday .. 6 = Sunday) to [`Weekday`].
fn weekday_from_index(index: u8) -> Result<Weekday, EvalError> {
    match index {
        0 => Ok(Weekday::Mon),
        1 => Ok(Weekday::Tue),
        2 => Ok(Weekday::Wed),
        3 => Ok(Weekday::Thu),
        4 => Ok(Weekday::Fri),
        5 => Ok(Weekday::Sat),
        6 => Ok(Weekday::Sun),
        _ => Err(EvalError::configuration(format!(
            "weekday index must be 0-6 (Monday-Sunday), got {index}"
        ))),
    }
}
