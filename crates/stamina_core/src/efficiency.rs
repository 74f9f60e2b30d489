//! Efficiency Factors
//!
//! Fitness and metabolic (aerobic/anaerobic) multipliers on raw energy cost.

use crate::config::EfficiencyConfig;
use crate::constants::efficiency::{FITNESS_EFFICIENCY_MAX, FITNESS_EFFICIENCY_MIN};
use crate::num::{clamp, non_negative, safe_div};

/// clamp(1 - coeff × fitness, 0.7, 1.0)
pub fn fitness_efficiency(params: &EfficiencyConfig) -> f64 {
    clamp(
        1.0 - params.fitness_efficiency_coeff * params.fitness_level,
        FITNESS_EFFICIENCY_MIN,
        FITNESS_EFFICIENCY_MAX,
    )
}

/// Speed as a fraction of the game max speed, clamped to [0, 1]
#[inline]
pub fn speed_ratio(speed: f64, max_speed: f64) -> f64 {
    clamp(safe_div(non_negative(speed), max_speed), 0.0, 1.0)
}

/// Piecewise metabolic factor over the speed ratio
pub fn metabolic_efficiency(speed_ratio: f64, params: &EfficiencyConfig) -> f64 {
    let ratio = clamp(speed_ratio, 0.0, 1.0);
    let lo = params.aerobic_threshold;
    let hi = params.anaerobic_threshold.max(lo);

    if ratio < lo {
        params.aerobic_efficiency_factor
    } else if ratio > hi {
        params.anaerobic_efficiency_factor
    } else {
        let t = clamp(safe_div(ratio - lo, hi - lo), 0.0, 1.0);
        params.aerobic_efficiency_factor
            + t * (params.anaerobic_efficiency_factor - params.aerobic_efficiency_factor)
    }
}

/// Both factors for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EfficiencyFactors {
    pub fitness: f64,
    pub metabolic: f64,
}

impl EfficiencyFactors {
    pub fn compute(speed_ratio: f64, params: &EfficiencyConfig) -> Self {
        Self {
            fitness: fitness_efficiency(params),
            metabolic: metabolic_efficiency(speed_ratio, params),
        }
    }

    /// Combined multiplier applied to raw cost
    pub fn total(&self) -> f64 {
        self.fitness * self.metabolic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitness_efficiency_clamped() {
        let mut params = EfficiencyConfig::default();
        assert!((fitness_efficiency(&params) - 0.82).abs() < 1e-12);

        params.fitness_level = 10.0;
        assert_eq!(fitness_efficiency(&params), 0.7);

        params.fitness_level = 0.0;
        assert_eq!(fitness_efficiency(&params), 1.0);
    }

    #[test]
    fn test_metabolic_regions() {
        let params = EfficiencyConfig::default();
        assert_eq!(metabolic_efficiency(0.3, &params), 0.9);
        assert_eq!(metabolic_efficiency(0.95, &params), 1.2);
        // Midpoint of [0.6, 0.8]
        assert!((metabolic_efficiency(0.7, &params) - 1.05).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_thresholds() {
        let mut params = EfficiencyConfig::default();
        params.aerobic_threshold = 0.7;
        params.anaerobic_threshold = 0.7;
        let at = metabolic_efficiency(0.7, &params);
        assert!(at.is_finite());
    }

    #[test]
    fn test_speed_ratio_guards() {
        assert_eq!(speed_ratio(-1.0, 5.2), 0.0);
        assert_eq!(speed_ratio(10.0, 5.2), 1.0);
        assert_eq!(speed_ratio(1.0, 0.0), 1.0);
    }
}
