//! Energy Expenditure Calculators
//!
//! Three mutually exclusive branches selected by speed:
//!
//! | speed (m/s)   | branch                        |
//! |---------------|-------------------------------|
//! | `< 0.1`       | static standing (Pandolf)     |
//! | `0.1 ..= 2.2` | walking (Pandolf, graded)     |
//! | `> 2.2`       | running (Givoni-Goldman)      |
//!
//! Every function returns a **per-second** stamina rate clamped to
//! [0, 0.05]. The tick step multiplies by the tick length exactly once.
//!
//! The walking and running branches meet at 2.2 m/s on flat ground at
//! terrain 1.0 for any load. Static and walking meet at 0.1 m/s only at
//! the reference weight; under load the two formulas step apart.

use crate::config::EnergyConfig;
use crate::constants::energy::*;
use crate::num::{clamp, finite_or, non_negative, safe_div};

/// Which formula a speed selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyBranch {
    Static,
    Walking,
    Running,
}

impl EnergyBranch {
    pub fn select(speed: f64) -> Self {
        let speed = non_negative(speed);
        if speed < STATIC_SPEED_LIMIT {
            EnergyBranch::Static
        } else if speed <= WALK_SPEED_LIMIT {
            EnergyBranch::Walking
        } else {
            EnergyBranch::Running
        }
    }
}

/// Carried weight above bodyweight (kg)
#[inline]
pub fn load_weight(current_weight: f64, params: &EnergyConfig) -> f64 {
    (non_negative(current_weight) - params.character_weight).max(0.0)
}

/// clamp(current / reference, 0.5, 2.0)
#[inline]
pub fn weight_multiplier(current_weight: f64, params: &EnergyConfig) -> f64 {
    clamp(
        safe_div(non_negative(current_weight), params.reference_weight),
        WEIGHT_MULTIPLIER_MIN,
        WEIGHT_MULTIPLIER_MAX,
    )
}

/// Downhill correction for `-15 <= grade < 0`, 1.0 otherwise
pub fn downhill_correction(grade_percent: f64) -> f64 {
    let grade = finite_or(grade_percent, 0.0);
    if grade >= 0.0 || grade < -DOWNHILL_CORRECTION_LIMIT {
        return 1.0;
    }
    let g = grade.abs();
    clamp(
        1.0 - g * (1.0 - g / DOWNHILL_CORRECTION_LIMIT) / 2.0,
        DOWNHILL_CORRECTION_MIN,
        1.0,
    )
}

/// Static standing cost: (c1·W + c2·(W+L)·(L/W)²) · coeff
pub fn static_energy_rate(current_weight: f64, params: &EnergyConfig) -> f64 {
    let body = params.character_weight.max(0.0);
    let load = load_weight(current_weight, params);
    let load_ratio = safe_div(load, body);

    let watts = params.static_body_coeff * body
        + params.static_load_coeff * (body + load) * load_ratio * load_ratio;

    clamp(watts * params.energy_to_stamina_coeff, 0.0, MAX_ENERGY_RATE)
}

/// Walking cost (Pandolf with grade term and downhill correction)
pub fn walking_energy_rate(
    speed: f64,
    current_weight: f64,
    grade_percent: f64,
    terrain_factor: f64,
    params: &EnergyConfig,
) -> f64 {
    let v = non_negative(speed);
    let grade = finite_or(grade_percent, 0.0);

    let fitness_discount = clamp(params.walk_fitness_discount, 0.0, 1.0);
    let offset = v - params.walk_velocity_offset;
    let base_term =
        params.walk_velocity_base * (1.0 - fitness_discount) + params.walk_velocity_coeff * offset * offset;

    let mut grade_term = 0.01 * grade * (params.grade_base_coeff + params.grade_velocity_coeff * v * v);
    if grade < 0.0 {
        grade_term *= downhill_correction(grade);
    }

    let terrain = clamp(terrain_factor, TERRAIN_FACTOR_MIN, TERRAIN_FACTOR_MAX);
    let rate = weight_multiplier(current_weight, params)
        * (base_term + grade_term)
        * terrain
        * params.energy_to_stamina_coeff;

    clamp(rate, 0.0, MAX_ENERGY_RATE)
}

/// Running cost: weight multiplier · run constant · v^exponent · coeff
pub fn running_energy_rate(speed: f64, current_weight: f64, params: &EnergyConfig) -> f64 {
    let v = non_negative(speed);
    let rate = weight_multiplier(current_weight, params)
        * params.run_energy_const
        * v.powf(params.run_velocity_exponent)
        * params.energy_to_stamina_coeff;

    clamp(rate, 0.0, MAX_ENERGY_RATE)
}

/// Dispatch on speed. Returns the branch used and its per-second rate.
pub fn energy_rate(
    speed: f64,
    current_weight: f64,
    grade_percent: f64,
    terrain_factor: f64,
    params: &EnergyConfig,
) -> (EnergyBranch, f64) {
    let branch = EnergyBranch::select(speed);
    let rate = match branch {
        EnergyBranch::Static => static_energy_rate(current_weight, params),
        EnergyBranch::Walking => {
            walking_energy_rate(speed, current_weight, grade_percent, terrain_factor, params)
        }
        EnergyBranch::Running => running_energy_rate(speed, current_weight, params),
    };
    (branch, rate)
}
