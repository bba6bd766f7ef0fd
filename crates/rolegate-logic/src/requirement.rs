//! Job requirement family and job definitions.
//!
//! Each [`JobRequirement`] variant is an independent pass/fail rule with the
//! same [`JobRequirement::check`] contract, so an aggregator can hold a mixed
//! list without knowing the variants' internals. Requirements are declared in
//! job data as internally tagged JSON:
//!
//! ```json
//! { "type": "Weight", "minimumWeight": 70, "inverted": false }
//! ```

use serde::{Deserialize, Serialize};

use crate::fixtures::SpeciesShapeLookup;
use crate::message::Message;
use crate::profile::CharacterProfile;
use crate::weight::{evaluate_weight, WeightGateConfig};

/// A single eligibility rule attached to a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JobRequirement {
    /// Derived body weight must be at least (or, inverted, at most) a threshold.
    Weight(WeightGateConfig),
}

/// Uniform pass/fail result shared by every requirement variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementResult {
    pub passed: bool,
    /// Only meaningful when `passed` is false.
    pub reason: Message,
}

impl JobRequirement {
    pub fn check<L>(&self, profile: Option<&CharacterProfile>, shapes: &L) -> RequirementResult
    where
        L: SpeciesShapeLookup + ?Sized,
    {
        match self {
            JobRequirement::Weight(config) => {
                let eval = evaluate_weight(profile, shapes, config);
                RequirementResult {
                    passed: eval.passed,
                    reason: eval.reason,
                }
            }
        }
    }

    pub fn is_inverted(&self) -> bool {
        match self {
            JobRequirement::Weight(config) => config.inverted,
        }
    }
}

/// A job and the requirements a character must meet to take it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub requirements: Vec<JobRequirement>,
}

impl JobDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            requirements: Vec::new(),
        }
    }

    pub fn with_requirement(mut self, requirement: JobRequirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Results of every requirement that fails, in declaration order.
    pub fn failed_requirements<L>(
        &self,
        profile: Option<&CharacterProfile>,
        shapes: &L,
    ) -> Vec<RequirementResult>
    where
        L: SpeciesShapeLookup + ?Sized,
    {
        self.requirements
            .iter()
            .map(|r| r.check(profile, shapes))
            .filter(|r| !r.passed)
            .collect()
    }

    /// Whether the character meets every requirement. No requirements means eligible.
    pub fn is_eligible<L>(&self, profile: Option<&CharacterProfile>, shapes: &L) -> bool
    where
        L: SpeciesShapeLookup + ?Sized,
    {
        self.requirements
            .iter()
            .all(|r| r.check(profile, shapes).passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FixtureShape;
    use crate::profile::SpeciesId;
    use crate::weight::{ABOVE_WEIGHT_KEY, BELOW_WEIGHT_KEY};

    fn human_shapes(id: &SpeciesId) -> Option<FixtureShape> {
        (id.as_str() == "Human").then_some(FixtureShape::new(0.35, 185.0))
    }

    fn human() -> CharacterProfile {
        CharacterProfile::new("Human", 1.0, 1.0) // weight 71
    }

    #[test]
    fn weight_requirement_delegates_to_gate() {
        let req = JobRequirement::Weight(WeightGateConfig::at_least(80.0));
        let r = req.check(Some(&human()), &human_shapes);
        assert!(!r.passed);
        assert_eq!(r.reason.key, BELOW_WEIGHT_KEY);
        assert!(!req.is_inverted());
    }

    #[test]
    fn job_without_requirements_is_eligible() {
        let job = JobDefinition::new("Passenger", "Passenger");
        assert!(job.is_eligible(Some(&human()), &human_shapes));
        assert!(job.failed_requirements(Some(&human()), &human_shapes).is_empty());
    }

    #[test]
    fn failed_requirements_keep_declaration_order() {
        let job = JobDefinition::new("Jockey", "Jockey")
            .with_requirement(JobRequirement::Weight(WeightGateConfig::at_least(10.0)))
            .with_requirement(JobRequirement::Weight(WeightGateConfig::at_most(50.0)))
            .with_requirement(JobRequirement::Weight(WeightGateConfig::at_least(100.0)));
        let failed = job.failed_requirements(Some(&human()), &human_shapes);
        assert_eq!(failed.len(), 2);
        assert_eq!(failed[0].reason.key, ABOVE_WEIGHT_KEY);
        assert_eq!(failed[1].reason.key, BELOW_WEIGHT_KEY);
        assert!(!job.is_eligible(Some(&human()), &human_shapes));
    }

    #[test]
    fn ghost_is_eligible_for_any_weight_job() {
        let job = JobDefinition::new("Heavy", "Heavy Lifter")
            .with_requirement(JobRequirement::Weight(WeightGateConfig::at_least(1000.0)));
        assert!(job.is_eligible(None, &human_shapes));
    }

    #[test]
    fn unknown_species_is_never_eligible_for_weight_job() {
        let vox = CharacterProfile::new("Vox", 1.0, 1.0);
        let job = JobDefinition::new("Light", "Light Duty")
            .with_requirement(JobRequirement::Weight(WeightGateConfig::at_most(1000.0)));
        assert!(!job.is_eligible(Some(&vox), &human_shapes));
    }

    #[test]
    fn requirement_json_is_internally_tagged() {
        let req: JobRequirement =
            serde_json::from_str(r#"{"type": "Weight", "minimumWeight": 90, "inverted": true}"#)
                .unwrap();
        assert_eq!(req, JobRequirement::Weight(WeightGateConfig::at_most(90.0)));
        assert!(req.is_inverted());

        let job: JobDefinition = serde_json::from_str(r#"{"id": "Clown"}"#).unwrap();
        assert!(job.requirements.is_empty());
    }
}
