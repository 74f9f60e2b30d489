//! # stamina_core - Deterministic Stamina Digital Twin
//!
//! Per-tick stamina model for tactical movement: metabolic energy cost,
//! efficiency and fatigue, drain aggregation, multi-phase recovery and a
//! closed-loop scenario runner used to calibrate parameter sets against
//! reference scenarios.
//!
//! ## Features
//! - 100% deterministic runs (no noise seed = bit-identical results)
//! - Seeded `ChaCha8Rng` noise for robustness evaluation
//! - One flat, serializable `ParameterSet`; presets for common tunings
//! - Parallel batch evaluation for external search drivers
//!
//! ## Usage
//! ```rust
//! use stamina_core::{simulate_scenario, ParameterSet, Scenario};
//!
//! let params = ParameterSet::default();
//! let scenario = Scenario::constant("2-mile", 3.47, 927.0);
//! let result = simulate_scenario(&scenario, &params, 0.2, None);
//! assert!(result.finished);
//! assert!(result.final_stamina < 1.0);
//! ```

// Tick functions take the full instantaneous context
#![allow(clippy::too_many_arguments)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod config;
pub mod constants;
pub mod drain;
pub mod efficiency;
pub mod energy;
pub mod error;
pub mod fatigue;
pub mod model;
pub mod recovery;
pub mod scenario;
pub mod state;
pub mod types;

mod num;

pub use config::{ParameterSet, Preset};
pub use error::{CoreError, Result};
pub use model::{StaminaModel, TickInputs, TickMode, TickOutcome};
pub use scenario::{
    evaluate_candidates, evaluate_scenarios, run_suite, simulate_scenario, Keyframe, NoiseConfig,
    Scenario, ScenarioResult, ScenarioRunner, ValidationCase, ValidationOutcome,
};
pub use state::{History, SimulationState};
pub use types::{Environment, MovementType, Stance, StaminaStatus};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_roundtrip() {
        let params = ParameterSet::from_map(&ParameterSet::tactical_action().to_map().into_iter().collect())
            .unwrap();
        let scenario = Scenario::constant("api", 3.0, 60.0).with_movement(MovementType::Run);
        let result = simulate_scenario(&scenario, &params, constants::tick::TICK_SECONDS, None);
        assert!(result.finished);
        assert_eq!(result.ticks, 300);
        assert_eq!(
            StaminaStatus::from_stamina(result.final_stamina),
            StaminaStatus::Fresh
        );
    }

    #[test]
    fn test_result_summary_serializes_without_history() {
        let params = ParameterSet::default();
        let result = simulate_scenario(&Scenario::constant("json", 2.0, 10.0), &params, 0.2, None);
        let json = serde_json::to_value(result.summary()).unwrap();
        assert!(json.get("stamina_history").is_none());
        assert!(json.get("final_stamina").is_some());
        assert_eq!(json["finished"], serde_json::json!(true));
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
