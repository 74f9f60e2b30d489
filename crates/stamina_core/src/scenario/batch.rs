//! Parallel evaluation for search drivers
//!
//! Runs share the `ParameterSet` by reference and own everything else, so
//! they fan out over rayon without locking. Seeds are derived per job from
//! a base seed, which keeps noisy batches reproducible regardless of
//! scheduling.

use rayon::prelude::*;

use crate::config::ParameterSet;
use crate::scenario::runner::ScenarioRunner;
use crate::scenario::types::{Scenario, ScenarioResult};

/// SplitMix64 finaliser over `base ^ index`
pub fn derive_seed(base_seed: u64, index: u64) -> u64 {
    let mut z = base_seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Every scenario under one parameter set; results in input order
pub fn evaluate_scenarios(
    scenarios: &[Scenario],
    params: &ParameterSet,
    tick_seconds: f64,
    base_seed: Option<u64>,
) -> Vec<ScenarioResult> {
    let runner = ScenarioRunner::new(params).with_tick(tick_seconds).with_history(false);
    scenarios
        .par_iter()
        .enumerate()
        .map(|(i, s)| runner.run(s, base_seed.map(|b| derive_seed(b, i as u64))))
        .collect()
}

/// Every scenario under every candidate parameter set.
///
/// Outer index is the candidate, inner the scenario. Seeds depend only on
/// the scenario index so candidates are compared on identical noise.
pub fn evaluate_candidates(
    candidates: &[ParameterSet],
    scenarios: &[Scenario],
    tick_seconds: f64,
    base_seed: Option<u64>,
) -> Vec<Vec<ScenarioResult>> {
    tracing::debug!(
        candidates = candidates.len(),
        scenarios = scenarios.len(),
        "evaluating batch"
    );
    candidates
        .par_iter()
        .map(|params| evaluate_scenarios(scenarios, params, tick_seconds, base_seed))
        .collect()
}
