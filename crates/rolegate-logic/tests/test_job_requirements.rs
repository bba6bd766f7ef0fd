//! Integration tests for the job requirement pipeline.
//!
//! Exercises: species JSON → SpeciesRegistry → job JSON → JobDefinition
//! → evaluation → rendered reason.
//!
//! All tests are pure logic with no profile store or prototype manager.

use rolegate_logic::fixtures::{SpeciesDefinition, SpeciesRegistry, SpeciesShapeLookup};
use rolegate_logic::message::{MessageRenderer, StringTable};
use rolegate_logic::profile::{CharacterProfile, SpeciesId};
use rolegate_logic::requirement::JobDefinition;
use rolegate_logic::validation::{validate_job, validate_registry};
use rolegate_logic::weight::{evaluate_weight, WeightGateConfig, WeightOutcome};

// ── Helpers ────────────────────────────────────────────────────────────

const SPECIES_JSON: &str = r#"[
    {"id": "Human", "name": "Human", "fixtures": {
        "fix1": {"radius": 0.35, "density": 185},
        "fix2": {"radius": 0.35, "density": 0}
    }},
    {"id": "Dwarf", "name": "Dwarf", "fixtures": {"fix1": {"radius": 0.35, "density": 200}}},
    {"id": "Moth", "name": "Moth", "fixtures": {"fix1": {"radius": 0.35, "density": 90}}},
    {"id": "Spirit", "name": "Spirit"}
]"#;

const JOBS_JSON: &str = r#"[
    {"id": "Bouncer", "name": "Bouncer", "requirements": [
        {"type": "Weight", "minimumWeight": 75}
    ]},
    {"id": "Jockey", "name": "Jockey", "requirements": [
        {"type": "Weight", "minimumWeight": 40, "inverted": true}
    ]},
    {"id": "Passenger", "name": "Passenger"}
]"#;

fn locale() -> StringTable {
    let mut t = StringTable::new();
    t.insert(
        "role-timer-below-weight",
        "You need to weigh at least { $weight } to play this role.",
    );
    t.insert(
        "role-timer-above-weight",
        "You need to weigh at most { $weight } to play this role.",
    );
    t
}

fn registry() -> SpeciesRegistry {
    serde_json::from_str(SPECIES_JSON).expect("species json")
}

fn jobs() -> Vec<JobDefinition> {
    serde_json::from_str(JOBS_JSON).expect("jobs json")
}

fn job(id: &str) -> JobDefinition {
    jobs().into_iter().find(|j| j.id == id).expect("job exists")
}

// ── Data validation ────────────────────────────────────────────────────

#[test]
fn shipped_data_has_no_fatal_errors() {
    let defs: Vec<SpeciesDefinition> = serde_json::from_str(SPECIES_JSON).unwrap();
    let errors = validate_registry(&defs);
    assert!(errors.iter().all(|e| !e.is_fatal()), "{errors:?}");
    assert_eq!(errors.len(), 1, "only Spirit lacks a body: {errors:?}");

    for j in jobs() {
        assert!(validate_job(&j).is_empty(), "job {} invalid", j.id);
    }
}

// ── Pipeline ───────────────────────────────────────────────────────────

#[test]
fn human_weights_follow_body_scale() {
    let reg = registry();
    let bouncer = job("Bouncer");

    // default human: weight 71 < 75
    let average = CharacterProfile::new("Human", 1.0, 1.0);
    assert!(!bouncer.is_eligible(Some(&average), &reg));

    // avg 1.1: weight 86 ≥ 75
    let large = CharacterProfile::new("Human", 1.2, 1.0);
    assert!(bouncer.is_eligible(Some(&large), &reg));
}

#[test]
fn species_density_changes_weight() {
    let reg = registry();
    let config = WeightGateConfig::at_least(75.0);
    // π * 0.35² * 200 = 76.969… → 77
    let dwarf = CharacterProfile::new("Dwarf", 1.0, 1.0);
    let eval = evaluate_weight(Some(&dwarf), &reg, &config);
    assert_eq!(eval.outcome, WeightOutcome::Satisfied { weight: 77.0 });
}

#[test]
fn inverted_job_admits_light_species_only() {
    let reg = registry();
    let jockey = job("Jockey");
    // π * 0.35² * 90 = 34.636… → 35 ≤ 40
    assert!(jockey.is_eligible(Some(&CharacterProfile::new("Moth", 1.0, 1.0)), &reg));
    assert!(!jockey.is_eligible(Some(&CharacterProfile::new("Human", 1.0, 1.0)), &reg));
}

#[test]
fn bodiless_species_fails_every_weight_job() {
    let reg = registry();
    let spirit = CharacterProfile::new("Spirit", 1.0, 1.0);
    assert!(reg.primary_shape(&SpeciesId::new("Spirit")).is_none());
    assert!(!job("Bouncer").is_eligible(Some(&spirit), &reg));
    assert!(!job("Jockey").is_eligible(Some(&spirit), &reg));
    assert!(job("Passenger").is_eligible(Some(&spirit), &reg));
}

#[test]
fn ghost_passes_every_job() {
    let reg = registry();
    for j in jobs() {
        assert!(j.is_eligible(None, &reg), "ghost blocked from {}", j.id);
    }
}

#[test]
fn failure_reason_renders_threshold() {
    let reg = registry();
    let human = CharacterProfile::new("Human", 1.0, 1.0);

    let failed = job("Bouncer").failed_requirements(Some(&human), &reg);
    assert_eq!(failed.len(), 1);
    assert_eq!(
        locale().render_message(&failed[0].reason),
        "You need to weigh at least 75 to play this role."
    );

    let failed = job("Jockey").failed_requirements(Some(&human), &reg);
    assert_eq!(
        locale().render_message(&failed[0].reason),
        "You need to weigh at most 40 to play this role."
    );
}

#[test]
fn shared_registry_evaluates_across_threads() {
    let reg = registry();
    let config = WeightGateConfig::at_least(75.0);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let reg = &reg;
                s.spawn(move || {
                    let p = CharacterProfile::new("Human", 1.0 + i as f32 * 0.1, 1.0);
                    evaluate_weight(Some(&p), reg, &config).outcome.weight()
                })
            })
            .collect();
        let weights: Vec<f32> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        assert!(weights.windows(2).all(|w| w[0] <= w[1]));
    });
}
