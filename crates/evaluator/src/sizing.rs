//! Maps the gate outcome to a target allocation.

use signal_gate_core::{
    AllocationDecision, EvalError, Instrument, SizingConfig, TargetConfig, TargetPosition,
};
use std::collections::BTreeMap;

/// Produces the allocation for eligible and ineligible outcomes.
///
/// An ineligible (or aborted) gate always yields the neutral allocation —
/// never partial weights.
#[derive(Debug, Clone)]
pub struct Sizer {
    targets: BTreeMap<Instrument, TargetPosition>,
}

impl Sizer {
    /// Builds a sizer, validating every configured weight eagerly.
    ///
    /// # Errors
    /// Returns `EvalError::Configuration` if any weight lies outside [0, 1].
    pub fn from_config(config: &SizingConfig) -> Result<Self, EvalError> {
        let mut targets = BTreeMap::new();
        for (symbol, target) in &config.targets {
            let position = match target {
                TargetConfig::Weight(value) => TargetPosition::weight(*value).map_err(|_| {
                    EvalError::configuration(format!(
                        "target weight for {symbol} must be in [0.0, 1.0], got {value}"
                    ))
                })?,
                TargetConfig::Intent(intent) => TargetPosition::Intent(*intent),
            };
            targets.insert(Instrument::new(symbol.as_str()), position);
        }
        Ok(Self { targets })
    }

    /// The decision for a gate outcome: configured targets when eligible,
    /// neutral otherwise.
    #[must_use]
    pub fn decide(&self, eligible: bool) -> AllocationDecision {
        if eligible {
            AllocationDecision::from_targets(self.targets.clone())
        } else {
            AllocationDecision::neutral()
        }
    }

    /// Like [`decide`](Self::decide), but scales weight targets by an
    /// intensity in [0, 1]. Intent targets are all-or-nothing and pass
    /// through unscaled.
    ///
    /// # Errors
    /// Returns `EvalError::Configuration` if the intensity lies outside [0, 1].
    pub fn decide_scaled(
        &self,
        eligible: bool,
        intensity: f64,
    ) -> Result<AllocationDecision, EvalError> {
        if !(0.0..=1.0).contains(&intensity) {
            return Err(EvalError::configuration(format!(
                "sizing intensity must be in [0.0, 1.0], got {intensity}"
            )));
        }
        if !eligible {
            return Ok(AllocationDecision::neutral());
        }
        let mut decision = AllocationDecision::neutral();
        for (instrument, target) in &self.targets {
            let scaled = match target {
                TargetPosition::Weight(weight) => TargetPosition::Weight(weight * intensity),
                TargetPosition::Intent(intent) => TargetPosition::Intent(*intent),
            };
            decision.set(instrument.clone(), scaled);
        }
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_gate_core::PositionIntent;

    fn config(targets: &[(&str, TargetConfig)]) -> SizingConfig {
        SizingConfig {
            targets: targets
                .iter()
                .map(|(symbol, target)| ((*symbol).to_string(), *target))
                .collect(),
        }
    }

    #[test]
    fn eligible_returns_configured_targets() {
        let sizer = Sizer::from_config(&config(&[
            ("TSLA", TargetConfig::Intent(PositionIntent::Straddle)),
            ("AAPL", TargetConfig::Weight(0.1)),
        ]))
        .unwrap();

        let decision = sizer.decide(true);
        assert_eq!(
            decision.target(&Instrument::from("TSLA")),
            Some(&TargetPosition::Intent(PositionIntent::Straddle))
        );
        assert_eq!(
            decision.target(&Instrument::from("AAPL")),
            Some(&TargetPosition::Weight(0.1))
        );
    }

    #[test]
    fn ineligible_returns_neutral() {
        let sizer = Sizer::from_config(&config(&[("AAPL", TargetConfig::Weight(0.1))])).unwrap();
        assert!(sizer.decide(false).is_neutral());
    }

    #[test]
    fn rejects_out_of_range_weight() {
        let err = Sizer::from_config(&config(&[("AAPL", TargetConfig::Weight(1.2))])).unwrap_err();
        assert!(matches!(err, EvalError::Configuration(_)));
    }

    #[test]
    fn intensity_scales_weights_but_not_intents() {
        let sizer = Sizer::from_config(&config(&[
            ("TSLA", TargetConfig::Intent(PositionIntent::Strangle)),
            ("AAPL", TargetConfig::Weight(0.5)),
        ]))
        .unwrap();

        let decision = sizer.decide_scaled(true, 0.5).unwrap();
        assert_eq!(
            decision.target(&Instrument::from("AAPL")),
            Some(&TargetPosition::Weight(0.25))
        );
        assert_eq!(
            decision.target(&Instrument::from("TSLA")),
            Some(&TargetPosition::Intent(PositionIntent::Strangle))
        );
    }

    #[test]
    fn rejects_out_of_range_intensity() {
        let sizer = Sizer::from_config(&config(&[("AAPL", TargetConfig::Weight(0.5))])).unwrap();
        assert!(sizer.decide_scaled(true, 1.5).is_err());
    }
}
