//! Energy expenditure coefficients (static / Pandolf walking / Givoni-Goldman running)

use serde::{Deserialize, Serialize};

/// Energy model parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    // === Conversion ===
    /// Metabolic rate (W/kg-scale) → stamina fraction per second (default: 3.5e-5)
    pub energy_to_stamina_coeff: f64,

    // === Body ===
    /// Bodyweight including base kit, kg (default: 90.0)
    pub character_weight: f64,
    /// Weight at which the weight multiplier is 1.0, kg (default: 90.0)
    pub reference_weight: f64,

    // === Static standing ===
    /// c1: bodyweight term (default: 0.0428)
    pub static_body_coeff: f64,
    /// c2: load term (default: 0.0571)
    pub static_load_coeff: f64,

    // === Walking ===
    /// Velocity-independent base (default: 2.7)
    pub walk_velocity_base: f64,
    /// Quadratic velocity coefficient (default: 3.2)
    pub walk_velocity_coeff: f64,
    /// Velocity offset of the quadratic term, m/s (default: 0.7)
    pub walk_velocity_offset: f64,
    /// Fraction of the base term removed for trained characters (default: 0.0)
    pub walk_fitness_discount: f64,
    /// Grade term base (default: 0.23)
    pub grade_base_coeff: f64,
    /// Grade term velocity coefficient (default: 1.34)
    pub grade_velocity_coeff: f64,

    // === Running ===
    /// Running constant, chosen so walking and running meet at 2.2 m/s (default: 3.8435)
    pub run_energy_const: f64,
    /// Running velocity exponent (default: 1.2)
    pub run_velocity_exponent: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            energy_to_stamina_coeff: 3.5e-5,

            character_weight: 90.0,
            reference_weight: 90.0,

            static_body_coeff: 0.0428,
            static_load_coeff: 0.0571,

            walk_velocity_base: 2.7,
            walk_velocity_coeff: 3.2,
            walk_velocity_offset: 0.7,
            walk_fitness_discount: 0.0,
            grade_base_coeff: 0.23,
            grade_velocity_coeff: 1.34,

            run_energy_const: 3.8435,
            run_velocity_exponent: 1.2,
        }
    }
}
