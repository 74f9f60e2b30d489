//! Fitness and metabolic efficiency coefficients

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfficiencyConfig {
    /// Character fitness, 0 = untrained, 1 = trained soldier (default: 1.0)
    pub fitness_level: f64,
    /// Energy reduction per fitness level (default: 0.18)
    pub fitness_efficiency_coeff: f64,

    // === Metabolic (speed ratio of game max speed) ===
    /// Below this ratio the aerobic factor applies (default: 0.6)
    pub aerobic_threshold: f64,
    /// Above this ratio the anaerobic factor applies (default: 0.8)
    pub anaerobic_threshold: f64,
    /// (default: 0.9)
    pub aerobic_efficiency_factor: f64,
    /// (default: 1.2)
    pub anaerobic_efficiency_factor: f64,
}

impl Default for EfficiencyConfig {
    fn default() -> Self {
        Self {
            fitness_level: 1.0,
            fitness_efficiency_coeff: 0.18,
            aerobic_threshold: 0.6,
            anaerobic_threshold: 0.8,
            aerobic_efficiency_factor: 0.9,
            anaerobic_efficiency_factor: 1.2,
        }
    }
}
