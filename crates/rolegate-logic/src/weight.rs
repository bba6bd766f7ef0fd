//! Derived body weight and the weight gate.
//!
//! A character's weight is not a physics mass. It is a synthetic scalar
//! taken from the species' primary fixture, scaled by the profile's body
//! shape:
//!
//! ```text
//! avg              = (width + height) / 2
//! effective_radius = radius * avg
//! weight           = round(π * effective_radius² * density)
//! ```
//!
//! Rounding is half-to-even, so `2.5` rounds to `2` and `3.5` to `4`.
//!
//! [`evaluate_weight`] compares that weight against a [`WeightGateConfig`]:
//! a minimum by default, a maximum when `inverted` is set.
//!
//! ```
//! use rolegate_logic::fixtures::FixtureShape;
//! use rolegate_logic::profile::{CharacterProfile, SpeciesId};
//! use rolegate_logic::weight::{evaluate_weight, WeightGateConfig, WeightOutcome};
//!
//! let shapes = |_: &SpeciesId| Some(FixtureShape::new(1.0, 1.0));
//! let profile = CharacterProfile::new("Human", 1.0, 1.0);
//!
//! let result = evaluate_weight(Some(&profile), &shapes, &WeightGateConfig::at_least(5.0));
//! assert!(!result.passed);
//! assert_eq!(result.outcome, WeightOutcome::BelowThreshold { weight: 3.0 });
//! ```

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::fixtures::{FixtureShape, SpeciesShapeLookup};
use crate::message::Message;
use crate::profile::CharacterProfile;

/// Template key for a failed minimum-weight gate. Parameter: `weight`.
pub const BELOW_WEIGHT_KEY: &str = "role-timer-below-weight";
/// Template key for a failed maximum-weight gate. Parameter: `weight`.
pub const ABOVE_WEIGHT_KEY: &str = "role-timer-above-weight";

/// Threshold configuration for the weight gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightGateConfig {
    /// Threshold weight (expected ≥ 0; see `validation`).
    pub minimum_weight: f32,
    /// When set the threshold becomes a maximum.
    #[serde(default)]
    pub inverted: bool,
}

impl WeightGateConfig {
    /// Gate that requires `weight >= threshold`.
    pub fn at_least(threshold: f32) -> Self {
        Self {
            minimum_weight: threshold,
            inverted: false,
        }
    }

    /// Gate that requires `weight <= threshold`.
    pub fn at_most(threshold: f32) -> Self {
        Self {
            minimum_weight: threshold,
            inverted: true,
        }
    }

    /// Whether an already computed weight satisfies this gate.
    pub fn admits(&self, weight: f32) -> bool {
        if self.inverted {
            weight <= self.minimum_weight
        } else {
            weight >= self.minimum_weight
        }
    }

    /// Reason shown when this gate rejects a character.
    pub fn reason(&self) -> Message {
        let key = if self.inverted {
            ABOVE_WEIGHT_KEY
        } else {
            BELOW_WEIGHT_KEY
        };
        Message::new(key).with_number("weight", self.minimum_weight)
    }
}

/// Why the gate passed or failed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WeightOutcome {
    /// No embodied character (ghost or observer). Always passes.
    NoProfile,
    /// Species has no primary fixture to measure. Always fails.
    NoShapeDefinition,
    /// Weight is within the configured bound.
    Satisfied { weight: f32 },
    /// Weight is under the required minimum.
    BelowThreshold { weight: f32 },
    /// Weight is over the allowed maximum (inverted gate).
    AboveThreshold { weight: f32 },
}

impl WeightOutcome {
    /// The computed weight, if the character could be measured.
    pub fn weight(&self) -> Option<f32> {
        match *self {
            WeightOutcome::Satisfied { weight }
            | WeightOutcome::BelowThreshold { weight }
            | WeightOutcome::AboveThreshold { weight } => Some(weight),
            WeightOutcome::NoProfile | WeightOutcome::NoShapeDefinition => None,
        }
    }
}

/// Result of one weight gate evaluation.
///
/// `reason` is filled whenever a weight was compared, pass or fail, but is
/// only meant to be shown when `passed` is false. It is empty for
/// [`WeightOutcome::NoProfile`] and [`WeightOutcome::NoShapeDefinition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEvaluation {
    pub passed: bool,
    pub outcome: WeightOutcome,
    pub reason: Message,
}

/// Round half-to-even.
pub fn round_weight(raw: f32) -> f32 {
    raw.round_ties_even()
}

/// Derived weight of a profile with the given primary fixture.
pub fn compute_weight(profile: &CharacterProfile, shape: &FixtureShape) -> f32 {
    let effective_radius = shape.radius * profile.average_scale();
    round_weight(PI * effective_radius.powi(2) * shape.density)
}

/// Evaluate the weight gate for an optional profile.
///
/// Pure: reads its inputs and returns a value, so any number of callers may
/// evaluate concurrently against a shared lookup.
pub fn evaluate_weight<L>(
    profile: Option<&CharacterProfile>,
    shapes: &L,
    config: &WeightGateConfig,
) -> WeightEvaluation
where
    L: SpeciesShapeLookup + ?Sized,
{
    let Some(profile) = profile else {
        log::trace!("weight gate bypassed: no profile");
        return WeightEvaluation {
            passed: true,
            outcome: WeightOutcome::NoProfile,
            reason: Message::empty(),
        };
    };

    let Some(shape) = shapes.primary_shape(&profile.species) else {
        log::debug!(
            "weight gate failed: species {} has no primary fixture",
            profile.species
        );
        return WeightEvaluation {
            passed: false,
            outcome: WeightOutcome::NoShapeDefinition,
            reason: Message::empty(),
        };
    };

    let weight = compute_weight(profile, &shape);
    let passed = config.admits(weight);
    let outcome = match (passed, config.inverted) {
        (true, _) => WeightOutcome::Satisfied { weight },
        (false, false) => WeightOutcome::BelowThreshold { weight },
        (false, true) => WeightOutcome::AboveThreshold { weight },
    };
    log::debug!(
        "weight gate: species={} weight={} threshold={} inverted={} passed={}",
        profile.species,
        weight,
        config.minimum_weight,
        config.inverted,
        passed
    );

    WeightEvaluation {
        passed,
        outcome,
        reason: config.reason(),
    }
}
