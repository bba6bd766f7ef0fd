//! RoleGate Headless Requirement Harness
//!
//! Validates species/job data and the weight gate without a game server.
//! Runs entirely in-process with no profile store or UI.
//!
//! Usage:
//!   cargo run -p rolegate-simtest
//!   cargo run -p rolegate-simtest -- --verbose
//!   RUST_LOG=rolegate_logic=debug cargo run -p rolegate-simtest

use rolegate_logic::fixtures::{
    FixtureShape, SpeciesDefinition, SpeciesRegistry, SpeciesShapeLookup,
};
use rolegate_logic::message::{MessageRenderer, StringTable};
use rolegate_logic::profile::{CharacterProfile, SpeciesId};
use rolegate_logic::requirement::JobDefinition;
use rolegate_logic::validation::{self, ConfigError};
use rolegate_logic::weight::{
    self, WeightGateConfig, WeightOutcome, ABOVE_WEIGHT_KEY, BELOW_WEIGHT_KEY,
};

// ── Data files (same JSON the game loads) ───────────────────────────────
const SPECIES_JSON: &str = include_str!("../../../data/species.json");
const JOBS_JSON: &str = include_str!("../../../data/jobs.json");
const LOCALE_JSON: &str = include_str!("../../../data/locale_en.json");

/// Expected weight of each shipped species at default body scale.
const EXPECTED_WEIGHTS: &[(&str, f32)] = &[
    ("Human", 71.0),
    ("Dwarf", 77.0),
    ("Moth", 35.0),
    ("Reptilian", 81.0),
    ("Diona", 151.0),
];

/// Expected eligibility at default body scale: (job, species, eligible).
const EXPECTED_ELIGIBILITY: &[(&str, &str, bool)] = &[
    ("Passenger", "Spirit", true),
    ("Bouncer", "Human", false),
    ("Bouncer", "Dwarf", true),
    ("Bouncer", "Spirit", false),
    ("Jockey", "Moth", true),
    ("Jockey", "Human", false),
    ("VentCrawler", "Human", true),
    ("VentCrawler", "Reptilian", false),
    ("VentCrawler", "Diona", false),
];

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct GameData {
    species: Vec<SpeciesDefinition>,
    registry: SpeciesRegistry,
    jobs: Vec<JobDefinition>,
    locale: StringTable,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== RoleGate Requirement Harness ===\n");

    let mut results = Vec::new();

    // 1. Data loading
    let data = match load_data(&mut results) {
        Some(d) => d,
        None => {
            report(&results, verbose);
            std::process::exit(1);
        }
    };

    // 2. Data validation
    results.extend(validate_data(&data, verbose));

    // 3. Gate scenarios on synthetic shapes
    results.extend(validate_gate_scenarios(verbose));

    // 4. Species weights
    results.extend(validate_species_weights(&data, verbose));

    // 5. Job eligibility matrix
    results.extend(validate_job_matrix(&data, verbose));

    // 6. Reason rendering
    results.extend(validate_reasons(&data, verbose));

    // 7. Body scale sweep
    results.extend(validate_scale_sweep(&data, verbose));

    if report(&results, verbose) > 0 {
        std::process::exit(1);
    }
}

/// Print the summary and return the number of failures.
fn report(results: &[TestResult], verbose: bool) -> usize {
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );
    failed
}

// ── 1. Data Loading ─────────────────────────────────────────────────────

fn load_data(results: &mut Vec<TestResult>) -> Option<GameData> {
    println!("--- Data Loading ---");

    let species: Result<Vec<SpeciesDefinition>, _> = serde_json::from_str(SPECIES_JSON);
    let jobs: Result<Vec<JobDefinition>, _> = serde_json::from_str(JOBS_JSON);
    let locale: Result<StringTable, _> = serde_json::from_str(LOCALE_JSON);

    let mut parsed = |name: &str, err: Option<serde_json::Error>| {
        results.push(TestResult {
            name: format!("{name}_parse"),
            passed: err.is_none(),
            detail: match err {
                None => "parsed".into(),
                Some(e) => format!("JSON parse error: {}", e),
            },
        });
    };

    match (species, jobs, locale) {
        (Ok(species), Ok(jobs), Ok(locale)) => {
            parsed("species", None);
            parsed("jobs", None);
            parsed("locale", None);
            let registry = SpeciesRegistry::from(species.clone());
            Some(GameData {
                species,
                registry,
                jobs,
                locale,
            })
        }
        (species, jobs, locale) => {
            parsed("species", species.err());
            parsed("jobs", jobs.err());
            parsed("locale", locale.err());
            None
        }
    }
}

// ── 2. Data Validation ──────────────────────────────────────────────────

fn validate_data(data: &GameData, verbose: bool) -> Vec<TestResult> {
    println!("--- Data Validation ---");
    let mut results = Vec::new();

    let species_errors = validation::validate_registry(&data.species);
    let (fatal, warnings): (Vec<&ConfigError>, Vec<&ConfigError>) =
        species_errors.iter().partition(|e| e.is_fatal());
    for w in &warnings {
        log::warn!("species data: {}", w);
    }
    results.push(TestResult {
        name: "species_valid".into(),
        passed: fatal.is_empty(),
        detail: if fatal.is_empty() {
            format!(
                "{} species loaded, {} warnings",
                data.registry.len(),
                warnings.len()
            )
        } else {
            join_errors(&fatal)
        },
    });

    let mut job_errors = Vec::new();
    for job in &data.jobs {
        job_errors.extend(validation::validate_job(job));
    }
    let job_errors: Vec<&ConfigError> = job_errors.iter().collect();
    results.push(TestResult {
        name: "jobs_valid".into(),
        passed: job_errors.is_empty(),
        detail: if job_errors.is_empty() {
            format!("{} jobs loaded", data.jobs.len())
        } else {
            join_errors(&job_errors)
        },
    });

    let missing: Vec<&str> = [BELOW_WEIGHT_KEY, ABOVE_WEIGHT_KEY]
        .into_iter()
        .filter(|k| !data.locale.contains(k))
        .collect();
    results.push(TestResult {
        name: "locale_has_weight_keys".into(),
        passed: missing.is_empty(),
        detail: if missing.is_empty() {
            format!("{} templates loaded", data.locale.len())
        } else {
            format!("missing keys: {}", missing.join(", "))
        },
    });

    if verbose {
        for id in data.registry.ids() {
            println!("  species {id}");
        }
    }

    results
}

fn join_errors(errors: &[&ConfigError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

// ── 3. Gate Scenarios ───────────────────────────────────────────────────

fn validate_gate_scenarios(verbose: bool) -> Vec<TestResult> {
    println!("--- Gate Scenarios ---");
    let mut results = Vec::new();

    let unit = |_: &SpeciesId| Some(FixtureShape::new(1.0, 1.0));
    let none = |_: &SpeciesId| -> Option<FixtureShape> { None };
    let profile = CharacterProfile::new("Human", 1.0, 1.0);

    let cases: [(&str, Option<&CharacterProfile>, bool, WeightGateConfig, bool); 6] = [
        ("unit_min_1", Some(&profile), true, WeightGateConfig::at_least(1.0), true),
        ("unit_min_5", Some(&profile), true, WeightGateConfig::at_least(5.0), false),
        ("unit_max_2", Some(&profile), true, WeightGateConfig::at_most(2.0), false),
        ("unit_max_3", Some(&profile), true, WeightGateConfig::at_most(3.0), true),
        ("ghost", None, false, WeightGateConfig::at_least(1e9), true),
        ("no_shape", Some(&profile), false, WeightGateConfig::at_most(1e9), false),
    ];

    for (name, p, has_shape, config, expected) in cases {
        let eval = if has_shape {
            weight::evaluate_weight(p, &unit, &config)
        } else {
            weight::evaluate_weight(p, &none, &config)
        };
        if verbose {
            println!("  {name}: {:?}", eval.outcome);
        }
        results.push(TestResult {
            name: format!("gate_{name}"),
            passed: eval.passed == expected,
            detail: format!("expected passed={expected}, got {:?}", eval.outcome),
        });
    }

    results
}

// ── 4. Species Weights ──────────────────────────────────────────────────

fn validate_species_weights(data: &GameData, verbose: bool) -> Vec<TestResult> {
    println!("--- Species Weights ---");
    let mut results = Vec::new();

    for &(id, expected) in EXPECTED_WEIGHTS {
        let species = SpeciesId::new(id);
        let measured = data
            .registry
            .primary_shape(&species)
            .map(|shape| weight::compute_weight(&CharacterProfile::new(id, 1.0, 1.0), &shape));
        if verbose {
            println!("  {id}: {measured:?}");
        }
        results.push(TestResult {
            name: format!("weight_{}", id.to_lowercase()),
            passed: measured == Some(expected),
            detail: format!("expected {expected}, got {measured:?}"),
        });
    }

    results
}

// ── 5. Job Eligibility ──────────────────────────────────────────────────

fn validate_job_matrix(data: &GameData, verbose: bool) -> Vec<TestResult> {
    println!("--- Job Eligibility ---");
    let mut results = Vec::new();

    for &(job_id, species, expected) in EXPECTED_ELIGIBILITY {
        let Some(job) = data.jobs.iter().find(|j| j.id == job_id) else {
            results.push(TestResult {
                name: format!("job_{job_id}_exists"),
                passed: false,
                detail: "job not found in jobs.json".into(),
            });
            continue;
        };
        let profile = CharacterProfile::new(species, 1.0, 1.0);
        let eligible = job.is_eligible(Some(&profile), &data.registry);
        if verbose {
            println!("  {job_id} / {species}: {eligible}");
        }
        results.push(TestResult {
            name: format!("eligible_{job_id}_{species}"),
            passed: eligible == expected,
            detail: format!("expected {expected}, got {eligible}"),
        });
    }

    // Ghosts are never blocked
    let blocked: Vec<&str> = data
        .jobs
        .iter()
        .filter(|j| !j.is_eligible(None, &data.registry))
        .map(|j| j.id.as_str())
        .collect();
    results.push(TestResult {
        name: "ghost_never_blocked".into(),
        passed: blocked.is_empty(),
        detail: if blocked.is_empty() {
            format!("ghost eligible for all {} jobs", data.jobs.len())
        } else {
            format!("ghost blocked from: {}", blocked.join(", "))
        },
    });

    results
}

// ── 6. Reason Rendering ─────────────────────────────────────────────────

fn validate_reasons(data: &GameData, verbose: bool) -> Vec<TestResult> {
    println!("--- Reason Rendering ---");
    let mut results = Vec::new();
    let mut unrendered = Vec::new();
    let mut rendered = 0;

    for job in &data.jobs {
        for id in data.registry.ids() {
            let profile = CharacterProfile::new(id.clone(), 1.0, 1.0);
            for failure in job.failed_requirements(Some(&profile), &data.registry) {
                if failure.reason.is_empty() {
                    continue;
                }
                let text = data.locale.render_message(&failure.reason);
                if verbose {
                    println!("  {} / {}: {}", job.id, id, text);
                }
                if text.contains("{ $") || text.contains("{$") || text == failure.reason.key {
                    unrendered.push(format!("{}/{}", job.id, id));
                } else {
                    rendered += 1;
                }
            }
        }
    }

    results.push(TestResult {
        name: "reasons_render".into(),
        passed: unrendered.is_empty() && rendered > 0,
        detail: if unrendered.is_empty() {
            format!("{rendered} failure reasons rendered")
        } else {
            format!("unrendered reasons: {}", unrendered.join(", "))
        },
    });

    results
}

// ── 7. Body Scale Sweep ─────────────────────────────────────────────────

fn validate_scale_sweep(data: &GameData, verbose: bool) -> Vec<TestResult> {
    println!("--- Body Scale Sweep ---");
    let mut results = Vec::new();

    for id in data.registry.ids() {
        let Some(shape) = data.registry.primary_shape(id) else {
            continue;
        };
        let weights: Vec<f32> = (0..=20)
            .map(|step| {
                let scale = 0.5 + step as f32 * 0.05;
                let outcome = weight::evaluate_weight(
                    Some(&CharacterProfile::new(id.clone(), scale, scale)),
                    &data.registry,
                    &WeightGateConfig::at_least(0.0),
                )
                .outcome;
                match outcome {
                    WeightOutcome::Satisfied { weight } => weight,
                    _ => f32::NAN,
                }
            })
            .collect();
        let monotonic = weights.windows(2).all(|w| w[0] <= w[1]);
        if verbose {
            println!(
                "  {id}: r={} d={} weights {:?}..{:?}",
                shape.radius,
                shape.density,
                weights.first(),
                weights.last()
            );
        }
        results.push(TestResult {
            name: format!("scale_monotonic_{}", id.as_str().to_lowercase()),
            passed: monotonic,
            detail: format!("{} steps from 0.5x to 1.5x", weights.len()),
        });
    }

    results
}
