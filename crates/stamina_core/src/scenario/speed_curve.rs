//! Stamina → maximum allowed speed
//!
//! Three regions on the stamina axis:
//!
//! | stamina        | region     | multiplier                                   |
//! |----------------|------------|----------------------------------------------|
//! | >= 0.25        | plateau    | plateau fraction of the movement type        |
//! | 0.05 .. 0.25   | transition | smoothstep from limp to plateau              |
//! | < 0.05         | collapse   | `max(limp * s / 0.05, 0.8 * limp)`           |
//!
//! Encumbrance then removes up to half of the multiplier, and sprint applies
//! its boost inside `[sprint_min, sprint_max]`.

use crate::config::{ParameterSet, SpeedConfig};
use crate::constants::movement::{
    COLLAPSE_FLOOR_RATIO, COLLAPSE_THRESHOLD, ENCUMBRANCE_SPEED_PENALTY_MAX, PLATEAU_THRESHOLD,
};
use crate::num::{clamp, finite_or, non_negative, safe_div};
use crate::types::MovementType;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedRegion {
    Plateau,
    /// `t` runs 0 → 1 from the collapse boundary to the plateau boundary
    Transition { t: f64 },
    Collapse,
}

impl SpeedRegion {
    pub fn classify(stamina: f64) -> Self {
        let s = clamp(stamina, 0.0, 1.0);
        if s >= PLATEAU_THRESHOLD {
            SpeedRegion::Plateau
        } else if s >= COLLAPSE_THRESHOLD {
            let t = (s - COLLAPSE_THRESHOLD) / (PLATEAU_THRESHOLD - COLLAPSE_THRESHOLD);
            SpeedRegion::Transition { t }
        } else {
            SpeedRegion::Collapse
        }
    }
}

/// Cubic smoothstep on [0, 1]
#[inline]
pub fn smoothstep(t: f64) -> f64 {
    let t = clamp(t, 0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Plateau multiplier for a movement type. Idle asks for no speed at all.
pub fn plateau_fraction(movement: MovementType, cfg: &SpeedConfig) -> f64 {
    match movement {
        MovementType::Idle => 0.0,
        MovementType::Walk => non_negative(cfg.walk_speed_fraction),
        MovementType::Run | MovementType::Sprint => non_negative(cfg.run_speed_fraction),
    }
}

/// Multiplier before encumbrance and sprint adjustments
pub fn stamina_multiplier(stamina: f64, plateau: f64, cfg: &SpeedConfig) -> (SpeedRegion, f64) {
    let limp = non_negative(cfg.min_limp_speed_multiplier);
    let region = SpeedRegion::classify(stamina);
    let multiplier = match region {
        SpeedRegion::Plateau => plateau,
        SpeedRegion::Transition { t } => limp + (plateau - limp) * smoothstep(t),
        SpeedRegion::Collapse => {
            let s = clamp(stamina, 0.0, 1.0);
            (limp * s / COLLAPSE_THRESHOLD).max(COLLAPSE_FLOOR_RATIO * limp)
        }
    };
    (region, non_negative(multiplier))
}

/// Fraction of the multiplier removed by carried load, in [0, 0.5]
pub fn encumbrance_speed_penalty(current_weight: f64, params: &ParameterSet) -> f64 {
    let body = params.energy.character_weight;
    let load = non_negative(current_weight - body);
    let ratio = safe_div(load, body);
    clamp(
        params.speed.encumbrance_speed_penalty_coeff * ratio,
        0.0,
        ENCUMBRANCE_SPEED_PENALTY_MAX,
    )
}

/// Result of the speed-cap lookup for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedCap {
    pub region: SpeedRegion,
    pub multiplier: f64,
    /// m/s
    pub max_speed: f64,
}

/// Maximum speed the character can hold at `stamina`
pub fn max_allowed_speed(
    stamina: f64,
    movement: MovementType,
    current_weight: f64,
    params: &ParameterSet,
) -> SpeedCap {
    let cfg = &params.speed;
    if movement == MovementType::Idle {
        return SpeedCap {
            region: SpeedRegion::classify(stamina),
            multiplier: 0.0,
            max_speed: 0.0,
        };
    }

    let (region, base) = stamina_multiplier(stamina, plateau_fraction(movement, cfg), cfg);
    let loaded = base * (1.0 - encumbrance_speed_penalty(current_weight, params));

    let multiplier = if movement.is_sprint() {
        let lo = non_negative(cfg.sprint_min_multiplier);
        let hi = non_negative(cfg.sprint_max_multiplier).max(lo);
        clamp(loaded * cfg.sprint_speed_boost, lo, hi)
    } else {
        clamp(loaded, 0.0, 1.0)
    };

    SpeedCap {
        region,
        multiplier,
        max_speed: finite_or(multiplier * non_negative(cfg.game_max_speed), 0.0),
    }
}
