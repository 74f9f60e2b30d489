//! Fatigue and EPOC coefficients

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FatigueConfig {
    /// Continuous exercise before fatigue starts to build, minutes (default: 5.0)
    pub fatigue_start_minutes: f64,
    /// Fatigue factor gained per minute past the start (default: 0.015)
    pub fatigue_accumulation_coeff: f64,
    /// FATIGUE_MAX_FACTOR (default: 2.0)
    pub fatigue_max_factor: f64,
    /// Fatigue factor shed per minute of rest (default: 0.05)
    pub fatigue_recovery_rate: f64,

    /// Post-exercise elevated-cost window, seconds (default: 0.5)
    pub epoc_delay_seconds: f64,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            fatigue_start_minutes: 5.0,
            fatigue_accumulation_coeff: 0.015,
            fatigue_max_factor: 2.0,
            fatigue_recovery_rate: 0.05,
            epoc_delay_seconds: 0.5,
        }
    }
}
