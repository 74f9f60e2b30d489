//! Closed-loop speed cap coefficients

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    /// Speed the multipliers are fractions of, m/s (default: 5.2)
    pub game_max_speed: f64,

    // === Plateau multipliers ===
    /// (default: 0.35)
    pub walk_speed_fraction: f64,
    /// (default: 0.7)
    pub run_speed_fraction: f64,
    /// Sprint = run-derived multiplier × boost (default: 1.3)
    pub sprint_speed_boost: f64,
    /// (default: 0.15)
    pub sprint_min_multiplier: f64,
    /// (default: 1.0)
    pub sprint_max_multiplier: f64,

    // === Exhaustion ===
    /// "Limp" multiplier reached at the bottom of the transition region (default: 0.15)
    pub min_limp_speed_multiplier: f64,
    /// Speed penalty per bodyweight of load, capped at 50% (default: 0.8)
    pub encumbrance_speed_penalty_coeff: f64,

    // === Forced rest hysteresis ===
    /// (default: 0.05)
    pub forced_rest_trigger: f64,
    /// (default: 0.2)
    pub forced_rest_release: f64,

    /// Speed assumed for the uncovered remainder of a short run, m/s (default: 0.8)
    pub penalty_limp_speed: f64,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            game_max_speed: 5.2,

            walk_speed_fraction: 0.35,
            run_speed_fraction: 0.7,
            sprint_speed_boost: 1.3,
            sprint_min_multiplier: 0.15,
            sprint_max_multiplier: 1.0,

            min_limp_speed_multiplier: 0.15,
            encumbrance_speed_penalty_coeff: 0.8,

            forced_rest_trigger: 0.05,
            forced_rest_release: 0.2,

            penalty_limp_speed: 0.8,
        }
    }
}
