//! Scenario layer: keyframed speed plans run in closed loop against the
//! stamina model, plus the calibration suite and batch evaluation.

pub mod batch;
pub mod noise;
pub mod rest_gate;
pub mod runner;
pub mod speed_curve;
pub mod suite;
pub mod types;

pub use batch::{derive_seed, evaluate_candidates, evaluate_scenarios};
pub use noise::{NoiseConfig, NoiseSource};
pub use rest_gate::RestGate;
pub use runner::{simulate_scenario, ScenarioRunner};
pub use speed_curve::{max_allowed_speed, SpeedCap, SpeedRegion};
pub use suite::{run_suite, ValidationCase, ValidationOutcome};
pub use types::{Keyframe, Scenario, ScenarioResult};
