//! Drain aggregation coefficients (posture, sprint, speed and encumbrance terms)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrainConfig {
    // === Posture (applied only while moving) ===
    /// (default: 1.0)
    pub posture_stand_multiplier: f64,
    /// Crouch-walking (default: 1.8)
    pub posture_crouch_multiplier: f64,
    /// Crawling (default: 3.0)
    pub posture_prone_multiplier: f64,

    // === Sprint ===
    /// Whole-tick multiplier while sprinting (default: 3.0)
    pub sprint_stamina_drain_multiplier: f64,

    // === Speed terms (per tick) ===
    /// (default: 0.00002)
    pub speed_linear_drain_coeff: f64,
    /// (default: 0.00002)
    pub speed_quadratic_drain_coeff: f64,

    // === Encumbrance terms (per tick) ===
    /// Drain multiplier growth per bodyweight of load (default: 1.5)
    pub encumbrance_stamina_drain_coeff: f64,
    /// Speed-independent encumbrance drain (default: 0.00002)
    pub encumbrance_base_drain_coeff: f64,
    /// Speed-dependent encumbrance drain (default: 0.00004)
    pub encumbrance_speed_drain_coeff: f64,

    // === Net change bound ===
    /// Largest stamina change a single tick may apply, either sign (default: 0.02)
    pub max_stamina_change_per_tick: f64,
}

impl Default for DrainConfig {
    fn default() -> Self {
        Self {
            posture_stand_multiplier: 1.0,
            posture_crouch_multiplier: 1.8,
            posture_prone_multiplier: 3.0,

            sprint_stamina_drain_multiplier: 3.0,

            speed_linear_drain_coeff: 0.00002,
            speed_quadratic_drain_coeff: 0.00002,

            encumbrance_stamina_drain_coeff: 1.5,
            encumbrance_base_drain_coeff: 0.00002,
            encumbrance_speed_drain_coeff: 0.00004,

            max_stamina_change_per_tick: 0.02,
        }
    }
}
