//! Drain Aggregator
//!
//! Turns the selected branch's tick-scaled raw cost into the stamina removed
//! this tick:
//!
//! 1. `raw > 0`: × posture (moving only) × efficiency × fatigue
//! 2. `raw <= 0`: passed through untouched and returned as-is
//! 3. + speed linear / quadratic terms
//! 4. + encumbrance base / speed terms
//! 5. × sprint multiplier, clamp to the per-tick ceiling

use crate::config::{DrainConfig, EnergyConfig};
use crate::constants::drain::*;
use crate::energy::load_weight;
use crate::num::{clamp, finite_or, non_negative, safe_div};
use crate::types::{MovementType, Stance};

/// Posture drain multiplier. Stationary characters always get 1.0.
pub fn posture_drain_multiplier(stance: Stance, moving: bool, params: &DrainConfig) -> f64 {
    if !moving {
        return 1.0;
    }
    match stance {
        Stance::Stand => params.posture_stand_multiplier,
        Stance::Crouch => params.posture_crouch_multiplier,
        Stance::Prone => params.posture_prone_multiplier,
    }
}

pub fn sprint_drain_multiplier(movement: MovementType, params: &DrainConfig) -> f64 {
    if movement.is_sprint() {
        params.sprint_stamina_drain_multiplier
    } else {
        1.0
    }
}

/// m = clamp(1 + coeff × load / bodyweight, 1, 3)
pub fn encumbrance_drain_multiplier(
    current_weight: f64,
    drain: &DrainConfig,
    energy: &EnergyConfig,
) -> f64 {
    let load_ratio = safe_div(load_weight(current_weight, energy), energy.character_weight);
    clamp(
        1.0 + drain.encumbrance_stamina_drain_coeff * load_ratio,
        ENCUMBRANCE_MULTIPLIER_MIN,
        ENCUMBRANCE_MULTIPLIER_MAX,
    )
}

/// Per-tick context for one aggregation
#[derive(Debug, Clone, Copy)]
pub struct DrainInputs {
    /// Branch cost already multiplied by the tick length
    pub raw_tick_cost: f64,
    /// Speed ratio of game max speed, [0, 1]
    pub speed_ratio: f64,
    pub current_weight: f64,
    pub moving: bool,
    pub stance: Stance,
    pub movement: MovementType,
    pub efficiency: f64,
    pub fatigue_factor: f64,
}

/// Component view of one tick's drain, useful for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrainBreakdown {
    pub base: f64,
    pub speed_linear: f64,
    pub speed_quadratic: f64,
    pub encumbrance_base: f64,
    pub encumbrance_speed: f64,
    pub sprint_multiplier: f64,
    /// Stamina removed this tick (negative only if the branch signalled recovery)
    pub total: f64,
}

pub fn aggregate_drain(
    inputs: &DrainInputs,
    drain: &DrainConfig,
    energy: &EnergyConfig,
) -> DrainBreakdown {
    let raw = finite_or(inputs.raw_tick_cost, 0.0);

    if raw <= 0.0 {
        // Reserved for branches that signal recovery; no additive terms.
        return DrainBreakdown { base: raw, sprint_multiplier: 1.0, total: raw, ..Default::default() };
    }

    let efficiency = non_negative(inputs.efficiency);
    let fatigue = non_negative(inputs.fatigue_factor);
    let scale = efficiency * fatigue;

    let base = raw * posture_drain_multiplier(inputs.stance, inputs.moving, drain) * scale;

    let ratio = clamp(inputs.speed_ratio, 0.0, 1.0);
    let speed_linear = drain.speed_linear_drain_coeff * ratio * scale;
    let speed_quadratic = drain.speed_quadratic_drain_coeff * ratio * ratio * scale;

    let excess = encumbrance_drain_multiplier(inputs.current_weight, drain, energy) - 1.0;
    let encumbrance_base = drain.encumbrance_base_drain_coeff * excess;
    let encumbrance_speed = drain.encumbrance_speed_drain_coeff * excess * ratio * ratio;

    let sprint_multiplier = sprint_drain_multiplier(inputs.movement, drain);
    let sum = [base, speed_linear, speed_quadratic, encumbrance_base, encumbrance_speed]
        .iter()
        .map(|c| c.max(0.0))
        .sum::<f64>();
    let total = clamp(sum * sprint_multiplier, 0.0, MAX_DRAIN_PER_TICK);

    DrainBreakdown {
        base,
        speed_linear,
        speed_quadratic,
        encumbrance_base,
        encumbrance_speed,
        sprint_multiplier,
        total,
    }
}
