//! Recovery coefficients

use serde::{Deserialize, Serialize};

/// Multi-phase recovery parameters. Rates are stamina fraction per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    // === Base ===
    /// (default: 0.0012)
    pub base_recovery_rate: f64,
    /// Extra recovery when depleted: × (1 + coeff × (1 - stamina)) (default: 0.5)
    pub recovery_nonlinear_coeff: f64,
    /// × clamp(1 + coeff × fitness, 1.0, 1.5) (default: 0.25)
    pub fitness_recovery_coeff: f64,

    // === Time phases (minutes of continuous rest) ===
    /// (default: 1.5)
    pub fast_recovery_duration_minutes: f64,
    /// (default: 1.6)
    pub fast_recovery_multiplier: f64,
    /// Follows the fast phase (default: 3.5)
    pub medium_recovery_duration_minutes: f64,
    /// (default: 1.3)
    pub medium_recovery_multiplier: f64,
    /// Past this the rate ramps toward the slow multiplier (default: 10.0)
    pub long_rest_threshold_minutes: f64,
    /// (default: 0.7)
    pub slow_recovery_multiplier: f64,

    // === Posture ===
    /// (default: 1.0)
    pub standing_recovery_multiplier: f64,
    /// (default: 1.15)
    pub crouching_recovery_multiplier: f64,
    /// Kept >= standing by the tuner (default: 1.3)
    pub prone_recovery_multiplier: f64,

    // === Load penalty ===
    /// (default: 0.0004)
    pub load_recovery_penalty_coeff: f64,
    /// (default: 1.5)
    pub load_recovery_penalty_exponent: f64,

    // === Marginal decay near full ===
    /// (default: 0.8)
    pub marginal_decay_threshold: f64,
    /// Multiplier reached at 100% stamina (default: 0.2)
    pub marginal_decay_floor: f64,

    // === Minimum recovery guarantee ===
    /// (default: 0.2)
    pub min_recovery_stamina_threshold: f64,
    /// (default: 0.5)
    pub min_recovery_rest_minutes: f64,
    /// (default: 0.0002)
    pub min_recovery_rate: f64,

    // === Static protection ===
    /// Load above bodyweight (kg) beyond which resting may drain (default: 40.0)
    pub static_overload_threshold_kg: f64,
    /// Rate used instead of a negative result under the threshold (default: 0.0001)
    pub static_protection_rate: f64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            base_recovery_rate: 0.0012,
            recovery_nonlinear_coeff: 0.5,
            fitness_recovery_coeff: 0.25,

            fast_recovery_duration_minutes: 1.5,
            fast_recovery_multiplier: 1.6,
            medium_recovery_duration_minutes: 3.5,
            medium_recovery_multiplier: 1.3,
            long_rest_threshold_minutes: 10.0,
            slow_recovery_multiplier: 0.7,

            standing_recovery_multiplier: 1.0,
            crouching_recovery_multiplier: 1.15,
            prone_recovery_multiplier: 1.3,

            load_recovery_penalty_coeff: 0.0004,
            load_recovery_penalty_exponent: 1.5,

            marginal_decay_threshold: 0.8,
            marginal_decay_floor: 0.2,

            min_recovery_stamina_threshold: 0.2,
            min_recovery_rest_minutes: 0.5,
            min_recovery_rate: 0.0002,

            static_overload_threshold_kg: 40.0,
            static_protection_rate: 0.0001,
        }
    }
}
