//! Recovery Calculator
//!
//! Per-second recovery rate for a stationary character outside the EPOC
//! window. Stages run in a fixed order; see [`recovery_rate`].

use crate::config::ParameterSet;
use crate::constants::recovery::*;
use crate::energy::load_weight;
use crate::num::{clamp, finite_or, non_negative, safe_div};
use crate::types::{Environment, Stance};

/// Time-since-rest phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecoveryPhase {
    Fast,
    Medium,
    Neutral,
    /// Past the long-rest threshold; `progress` runs 0 → 1 over the ramp
    LongRest { progress: f64 },
}

impl RecoveryPhase {
    pub fn classify(rest_minutes: f64, params: &ParameterSet) -> Self {
        let rest = non_negative(rest_minutes);
        let r = &params.recovery;
        if rest <= r.fast_recovery_duration_minutes {
            RecoveryPhase::Fast
        } else if rest <= r.fast_recovery_duration_minutes + r.medium_recovery_duration_minutes {
            RecoveryPhase::Medium
        } else if rest > r.long_rest_threshold_minutes {
            let progress = clamp(
                (rest - r.long_rest_threshold_minutes) / SLOW_PHASE_RAMP_MINUTES,
                0.0,
                1.0,
            );
            RecoveryPhase::LongRest { progress }
        } else {
            RecoveryPhase::Neutral
        }
    }

    pub fn multiplier(&self, params: &ParameterSet) -> f64 {
        let r = &params.recovery;
        match *self {
            RecoveryPhase::Fast => r.fast_recovery_multiplier,
            RecoveryPhase::Medium => r.medium_recovery_multiplier,
            RecoveryPhase::Neutral => 1.0,
            RecoveryPhase::LongRest { progress } => {
                1.0 + (r.slow_recovery_multiplier - 1.0) * progress
            }
        }
    }
}

pub fn posture_recovery_multiplier(stance: Stance, params: &ParameterSet) -> f64 {
    let r = &params.recovery;
    match stance {
        Stance::Stand => r.standing_recovery_multiplier,
        Stance::Crouch => r.crouching_recovery_multiplier,
        Stance::Prone => r.prone_recovery_multiplier,
    }
}

/// Load penalty (per second). Prone offloads the kit, so only the carried
/// load above bodyweight counts and only off the ground.
pub fn load_recovery_penalty(current_weight: f64, stance: Stance, params: &ParameterSet) -> f64 {
    let recovery_load = match stance {
        Stance::Prone => 0.0,
        Stance::Stand | Stance::Crouch => load_weight(current_weight, &params.energy),
    };
    let ratio = clamp(
        safe_div(recovery_load, LOAD_PENALTY_REFERENCE_KG),
        0.0,
        LOAD_PENALTY_RATIO_MAX,
    );
    ratio.powf(params.recovery.load_recovery_penalty_exponent) * params.recovery.load_recovery_penalty_coeff
}

/// Multiplier shrinking linearly from 1 at the threshold to the floor at 100%
pub fn marginal_decay_multiplier(stamina: f64, params: &ParameterSet) -> f64 {
    let r = &params.recovery;
    let s = clamp(stamina, 0.0, 1.0);
    if s <= r.marginal_decay_threshold {
        return 1.0;
    }
    let span = (1.0 - r.marginal_decay_threshold).max(0.0);
    let t = clamp(safe_div(s - r.marginal_decay_threshold, span), 0.0, 1.0);
    clamp(1.0 - (1.0 - r.marginal_decay_floor) * t, r.marginal_decay_floor.min(1.0), 1.0)
}

/// Combined heat/cold multiplier, each reduction capped at 50%
pub fn environment_multiplier(env: &Environment, params: &ParameterSet) -> f64 {
    let e = &params.environment;
    let heat = clamp(
        e.heat_recovery_penalty_coeff * clamp(env.heat_stress, 0.0, 1.0),
        0.0,
        ENVIRONMENT_PENALTY_CAP,
    );
    let cold = clamp(
        e.cold_recovery_penalty_coeff * clamp(env.cold_stress, 0.0, 1.0),
        0.0,
        ENVIRONMENT_PENALTY_CAP,
    );
    (1.0 - heat) * (1.0 - cold)
}

/// Everything the recovery calculator reads for one tick
#[derive(Debug, Clone, Copy)]
pub struct RecoveryInputs {
    pub stamina: f64,
    pub rest_minutes: f64,
    pub current_weight: f64,
    pub stance: Stance,
    pub environment: Environment,
    /// Per-second static drain at the current weight, used when positive
    /// recovery is disabled
    pub static_drain_rate: f64,
}

/// Per-second recovery rate.
///
/// 1. base × nonlinear(1 - stamina)
/// 2. × fitness multiplier
/// 3. × time phase
/// 4. × posture
/// 5. - load penalty
/// 6. × marginal decay (positive part only)
/// 7. minimum-recovery floor after long enough rest at low stamina
/// 8. × environment (positive part only)
/// 9. submerged → -|static drain|; otherwise never negative
/// 10. loads under the overload threshold always recover a little
pub fn recovery_rate(inputs: &RecoveryInputs, params: &ParameterSet) -> f64 {
    let r = &params.recovery;
    let stamina = clamp(inputs.stamina, 0.0, 1.0);
    let rest = non_negative(inputs.rest_minutes);

    if inputs.environment.submerged {
        return -non_negative(inputs.static_drain_rate).abs();
    }

    let mut rate = r.base_recovery_rate * (1.0 + r.recovery_nonlinear_coeff * (1.0 - stamina));
    rate *= clamp(
        1.0 + r.fitness_recovery_coeff * params.efficiency.fitness_level,
        FITNESS_RECOVERY_MIN,
        FITNESS_RECOVERY_MAX,
    );
    rate *= RecoveryPhase::classify(rest, params).multiplier(params);
    rate *= posture_recovery_multiplier(inputs.stance, params);
    rate -= load_recovery_penalty(inputs.current_weight, inputs.stance, params);

    if rate > 0.0 {
        rate *= marginal_decay_multiplier(stamina, params);
    }

    if stamina < r.min_recovery_stamina_threshold && rest > r.min_recovery_rest_minutes {
        rate = rate.max(r.min_recovery_rate);
    }

    if rate > 0.0 {
        rate *= environment_multiplier(&inputs.environment, params);
    }

    let rate = finite_or(rate, 0.0);
    if rate < 0.0 {
        let load = load_weight(inputs.current_weight, &params.energy);
        if load < r.static_overload_threshold_kg {
            return r.static_protection_rate;
        }
        return 0.0;
    }
    rate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rest_inputs(stamina: f64, rest: f64, weight: f64, stance: Stance) -> RecoveryInputs {
        RecoveryInputs {
            stamina,
            rest_minutes: rest,
            current_weight: weight,
            stance,
            environment: Environment::default(),
            static_drain_rate: 1.35e-4,
        }
    }

    #[test]
    fn test_phase_classification() {
        let p = ParameterSet::default();
        assert_eq!(RecoveryPhase::classify(0.5, &p), RecoveryPhase::Fast);
        assert_eq!(RecoveryPhase::classify(3.0, &p), RecoveryPhase::Medium);
        assert_eq!(RecoveryPhase::classify(7.0, &p), RecoveryPhase::Neutral);
        assert_eq!(
            RecoveryPhase::classify(15.0, &p),
            RecoveryPhase::LongRest { progress: 0.5 }
        );
        let slow = RecoveryPhase::classify(60.0, &p).multiplier(&p);
        assert!((slow - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_prone_beats_standing() {
        let p = ParameterSet::default();
        let stand = recovery_rate(&rest_inputs(0.5, 0.2, 90.0, Stance::Stand), &p);
        let crouch = recovery_rate(&rest_inputs(0.5, 0.2, 90.0, Stance::Crouch), &p);
        let prone = recovery_rate(&rest_inputs(0.5, 0.2, 90.0, Stance::Prone), &p);
        assert!(prone > crouch && crouch > stand);
    }

    #[test]
    fn test_prone_ignores_load_penalty() {
        let p = ParameterSet::default();
        assert!(load_recovery_penalty(120.0, Stance::Stand, &p) > 0.0);
        assert_eq!(load_recovery_penalty(120.0, Stance::Prone, &p), 0.0);
    }

    #[test]
    fn test_marginal_decay() {
        let p = ParameterSet::default();
        assert_eq!(marginal_decay_multiplier(0.5, &p), 1.0);
        assert!((marginal_decay_multiplier(1.0, &p) - 0.2).abs() < 1e-12);
        let near = recovery_rate(&rest_inputs(0.95, 0.2, 90.0, Stance::Stand), &p);
        let mid = recovery_rate(&rest_inputs(0.6, 0.2, 90.0, Stance::Stand), &p);
        assert!(near < mid);
    }

    #[test]
    fn test_minimum_recovery_guarantee() {
        let mut p = ParameterSet::default();
        p.recovery.base_recovery_rate = 0.0;
        let early = recovery_rate(&rest_inputs(0.1, 0.1, 90.0, Stance::Stand), &p);
        let later = recovery_rate(&rest_inputs(0.1, 1.0, 90.0, Stance::Stand), &p);
        assert_eq!(early, 0.0);
        assert_eq!(later, p.recovery.min_recovery_rate);
    }

    #[test]
    fn test_static_protection_under_overload_threshold() {
        let mut p = ParameterSet::default();
        p.recovery.load_recovery_penalty_coeff = 1.0;
        // 30 kg load: penalty dominates but protection keeps it positive
        let light = recovery_rate(&rest_inputs(0.5, 0.1, 120.0, Stance::Stand), &p);
        assert_eq!(light, p.recovery.static_protection_rate);
        // 60 kg load: no protection, but never negative
        let heavy = recovery_rate(&rest_inputs(0.5, 0.1, 150.0, Stance::Stand), &p);
        assert_eq!(heavy, 0.0);
    }

    #[test]
    fn test_environment_penalties_capped() {
        let p = ParameterSet::default();
        let mut hot = Environment::default();
        hot.heat_stress = 1.0;
        hot.cold_stress = 1.0;
        let m = environment_multiplier(&hot, &p);
        // heat 0.5 (capped), cold 0.3
        assert!((m - 0.5 * 0.7).abs() < 1e-12);

        let mut extreme = p.clone();
        extreme.environment.heat_recovery_penalty_coeff = 5.0;
        extreme.environment.cold_recovery_penalty_coeff = 5.0;
        assert!((environment_multiplier(&hot, &extreme) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_submerged_disables_recovery() {
        let p = ParameterSet::default();
        let mut inputs = rest_inputs(0.5, 2.0, 90.0, Stance::Stand);
        inputs.environment.submerged = true;
        assert_eq!(recovery_rate(&inputs, &p), -1.35e-4);
    }

    #[test]
    fn test_never_negative_without_flag() {
        let p = ParameterSet::default();
        for w in [60.0, 90.0, 130.0, 200.0, 400.0] {
            for s in [0.0, 0.1, 0.5, 0.9, 1.0] {
                for rest in [0.0, 1.0, 5.0, 30.0] {
                    for stance in [Stance::Stand, Stance::Crouch, Stance::Prone] {
                        let r = recovery_rate(&rest_inputs(s, rest, w, stance), &p);
                        assert!(r >= 0.0 && r.is_finite());
                    }
                }
            }
        }
    }
}
