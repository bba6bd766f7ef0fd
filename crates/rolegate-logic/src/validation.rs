//! Load-time validation of species and job data.
//!
//! The weight gate trusts its inputs. Bad thresholds or fixtures are caught
//! here, when data is loaded, and every problem is reported at once:
//!
//! ```
//! use rolegate_logic::validation::{validate_gate_config, ConfigError};
//! use rolegate_logic::weight::WeightGateConfig;
//!
//! let errors = validate_gate_config(&WeightGateConfig::at_least(-5.0));
//! assert_eq!(errors, vec![ConfigError::NegativeMinimumWeight(-5.0)]);
//! ```

use std::collections::HashSet;
use std::fmt;

use crate::fixtures::{SpeciesDefinition, PRIMARY_FIXTURE};
use crate::profile::SpeciesId;
use crate::requirement::{JobDefinition, JobRequirement};
use crate::weight::WeightGateConfig;

/// Data validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Weight threshold below zero.
    NegativeMinimumWeight(f32),
    /// Weight threshold is NaN or infinite.
    NonFiniteMinimumWeight,
    /// Species id empty.
    EmptySpeciesId,
    /// Same species id defined more than once.
    DuplicateSpecies(SpeciesId),
    /// Species has no primary fixture; weight gates will always reject it.
    MissingPrimaryFixture(SpeciesId),
    /// Fixture radius negative or non-finite.
    InvalidRadius { species: SpeciesId, fixture: String },
    /// Fixture density negative or non-finite.
    InvalidDensity { species: SpeciesId, fixture: String },
    /// Job id empty.
    EmptyJobId,
}

impl ConfigError {
    /// Whether the data is unusable. A missing primary fixture is legal (the
    /// species is simply unmeasurable) and is reported as a warning only.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ConfigError::MissingPrimaryFixture(_))
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NegativeMinimumWeight(w) => {
                write!(f, "minimum weight {w} is negative")
            }
            ConfigError::NonFiniteMinimumWeight => write!(f, "minimum weight is not finite"),
            ConfigError::EmptySpeciesId => write!(f, "species id is empty"),
            ConfigError::DuplicateSpecies(id) => write!(f, "species {id} defined more than once"),
            ConfigError::MissingPrimaryFixture(id) => {
                write!(f, "species {id} has no {PRIMARY_FIXTURE} fixture")
            }
            ConfigError::InvalidRadius { species, fixture } => {
                write!(f, "species {species} fixture {fixture} has an invalid radius")
            }
            ConfigError::InvalidDensity { species, fixture } => {
                write!(f, "species {species} fixture {fixture} has an invalid density")
            }
            ConfigError::EmptyJobId => write!(f, "job id is empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn is_valid_measure(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

/// Validate a weight gate threshold.
pub fn validate_gate_config(config: &WeightGateConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if !config.minimum_weight.is_finite() {
        errors.push(ConfigError::NonFiniteMinimumWeight);
    } else if config.minimum_weight < 0.0 {
        errors.push(ConfigError::NegativeMinimumWeight(config.minimum_weight));
    }

    errors
}

/// Validate one species definition's fixtures.
pub fn validate_species(species: &SpeciesDefinition) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if species.id.as_str().trim().is_empty() {
        errors.push(ConfigError::EmptySpeciesId);
    }
    if species.primary_shape().is_none() {
        errors.push(ConfigError::MissingPrimaryFixture(species.id.clone()));
    }

    for (name, shape) in &species.fixtures {
        if !is_valid_measure(shape.radius) {
            errors.push(ConfigError::InvalidRadius {
                species: species.id.clone(),
                fixture: name.clone(),
            });
        }
        if !is_valid_measure(shape.density) {
            errors.push(ConfigError::InvalidDensity {
                species: species.id.clone(),
                fixture: name.clone(),
            });
        }
    }

    errors
}

/// Validate a full set of species definitions, including duplicate ids.
pub fn validate_registry(definitions: &[SpeciesDefinition]) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for species in definitions {
        errors.extend(validate_species(species));
        if !seen.insert(&species.id) {
            errors.push(ConfigError::DuplicateSpecies(species.id.clone()));
        }
    }

    errors
}

/// Validate a job definition and all of its requirements.
pub fn validate_job(job: &JobDefinition) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if job.id.trim().is_empty() {
        errors.push(ConfigError::EmptyJobId);
    }
    for requirement in &job.requirements {
        match requirement {
            JobRequirement::Weight(config) => errors.extend(validate_gate_config(config)),
        }
    }

    errors
}
