//! Built-in calibration checks
//!
//! Four reference scenarios every acceptable parameter set must satisfy:
//!
//! - **A** 3.47 m/s for 927 s with a 90 kg character (a 2-mile fitness test
//!   pace). Completion time within 20 % of 927 s, stamina never negative.
//! - **B** 30 s sprint from full stamina at a 5.0 m/s target. Final stamina
//!   must be at most 0.96 (sprinting is not free).
//! - **C** 60 s rest from 0.5 stamina. Prone must gain strictly more than
//!   standing.
//! - **D** 900 s sprint target at 120 kg from 0.3 stamina. Once stamina
//!   drops below the forced-rest trigger the character must not move again
//!   until stamina exceeds the release level.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ParameterSet;
use crate::scenario::runner::ScenarioRunner;
use crate::scenario::types::{Scenario, ScenarioResult};
use crate::types::{MovementType, Stance};

/// Completion time tolerance for case A
pub const BASELINE_TIME_TOLERANCE: f64 = 0.2;
pub const BASELINE_SECONDS: f64 = 927.0;
pub const BASELINE_SPEED: f64 = 3.47;
pub const SPRINT_FINAL_STAMINA_MAX: f64 = 0.96;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCase {
    BaselineFitness,
    SprintCost,
    ProneRecovery,
    ForcedRestHysteresis,
}

/// Verdict for one case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub case: ValidationCase,
    pub id: String,
    pub passed: bool,
    pub detail: String,
}

impl ValidationCase {
    pub fn all() -> [ValidationCase; 4] {
        [
            ValidationCase::BaselineFitness,
            ValidationCase::SprintCost,
            ValidationCase::ProneRecovery,
            ValidationCase::ForcedRestHysteresis,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            ValidationCase::BaselineFitness => "A",
            ValidationCase::SprintCost => "B",
            ValidationCase::ProneRecovery => "C",
            ValidationCase::ForcedRestHysteresis => "D",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ValidationCase::BaselineFitness => "3.47 m/s for 927 s completes within 20%",
            ValidationCase::SprintCost => "30 s sprint leaves stamina <= 0.96",
            ValidationCase::ProneRecovery => "prone rest recovers more than standing",
            ValidationCase::ForcedRestHysteresis => "forced rest holds until release",
        }
    }

    /// Scenarios this case runs
    pub fn scenarios(&self) -> Vec<Scenario> {
        match self {
            ValidationCase::BaselineFitness => {
                vec![Scenario::constant("A-baseline", BASELINE_SPEED, BASELINE_SECONDS)
                    .with_weight(90.0)
                    .with_movement(MovementType::Run)]
            }
            ValidationCase::SprintCost => {
                vec![Scenario::constant("B-sprint", 5.0, 30.0).with_movement(MovementType::Sprint)]
            }
            ValidationCase::ProneRecovery => {
                let stand = Scenario::constant("C-stand", 0.0, 60.0)
                    .with_movement(MovementType::Idle)
                    .with_initial_stamina(0.5);
                let prone = stand.clone().with_stance(Stance::Prone);
                vec![stand, Scenario { name: "C-prone".to_string(), ..prone }]
            }
            ValidationCase::ForcedRestHysteresis => {
                vec![Scenario::constant("D-exhaustion", 5.0, 900.0)
                    .with_weight(120.0)
                    .with_movement(MovementType::Sprint)
                    .with_initial_stamina(0.3)]
            }
        }
    }

    pub fn evaluate(&self, params: &ParameterSet, tick_seconds: f64) -> ValidationOutcome {
        let runner = ScenarioRunner::new(params).with_tick(tick_seconds);
        let results: Vec<ScenarioResult> =
            self.scenarios().iter().map(|s| runner.run(s, None)).collect();

        let (passed, detail) = match self {
            ValidationCase::BaselineFitness => check_baseline(&results[0]),
            ValidationCase::SprintCost => check_sprint(&results[0]),
            ValidationCase::ProneRecovery => check_prone(&results[0], &results[1]),
            ValidationCase::ForcedRestHysteresis => check_hysteresis(&results[0], params),
        };

        ValidationOutcome {
            case: *self,
            id: self.id().to_string(),
            passed,
            detail,
        }
    }
}

fn check_baseline(r: &ScenarioResult) -> (bool, String) {
    let deviation = (r.total_time_with_penalty - BASELINE_SECONDS).abs() / BASELINE_SECONDS;
    let passed = r.finished && deviation <= BASELINE_TIME_TOLERANCE && r.min_stamina >= 0.0;
    let detail = format!(
        "time {:.1} s ({:+.1}%), min stamina {:.3}, final {:.3}",
        r.total_time_with_penalty,
        (r.total_time_with_penalty / BASELINE_SECONDS - 1.0) * 100.0,
        r.min_stamina,
        r.final_stamina
    );
    (passed, detail)
}

fn check_sprint(r: &ScenarioResult) -> (bool, String) {
    let passed = r.final_stamina <= SPRINT_FINAL_STAMINA_MAX;
    (passed, format!("final stamina {:.3} (max {:.2})", r.final_stamina, SPRINT_FINAL_STAMINA_MAX))
}

fn check_prone(stand: &ScenarioResult, prone: &ScenarioResult) -> (bool, String) {
    let stand_gain = stand.final_stamina - 0.5;
    let prone_gain = prone.final_stamina - 0.5;
    (
        prone_gain > stand_gain,
        format!("gain stand {:+.4}, prone {:+.4}", stand_gain, prone_gain),
    )
}

/// Replays the histories against the trigger/release pair. Stamina at the
/// start of tick `i` is the recorded value of tick `i - 1`.
fn check_hysteresis(r: &ScenarioResult, params: &ParameterSet) -> (bool, String) {
    let trigger = params.speed.forced_rest_trigger;
    let release = params.speed.forced_rest_release;
    let initial = 0.3;

    let mut resting = false;
    let mut engaged = 0usize;
    let mut held_in_band = false;
    let mut violations = 0usize;

    for (i, &speed) in r.speed_history.iter().enumerate() {
        let before = if i == 0 { initial } else { r.stamina_history[i - 1] };
        if resting && before > release {
            resting = false;
        } else if !resting && before < trigger {
            resting = true;
            engaged += 1;
        }
        if resting {
            if speed != 0.0 {
                violations += 1;
            }
            if before > trigger && before <= release {
                held_in_band = true;
            }
        }
    }

    let passed = engaged > 0 && held_in_band && violations == 0;
    let detail = format!(
        "forced rests {}, forced ticks {}, moves while resting {}, min stamina {:.3}",
        engaged, r.forced_rest_ticks, violations, r.min_stamina
    );
    (passed, detail)
}

/// Evaluate every case in parallel
pub fn run_suite(params: &ParameterSet, tick_seconds: f64) -> Vec<ValidationOutcome> {
    let outcomes: Vec<ValidationOutcome> = ValidationCase::all()
        .par_iter()
        .map(|case| case.evaluate(params, tick_seconds))
        .collect();

    for o in &outcomes {
        if o.passed {
            tracing::info!(case = %o.id, detail = %o.detail, "validation passed");
        } else {
            tracing::warn!(case = %o.id, detail = %o.detail, "validation failed");
        }
    }
    outcomes
}
