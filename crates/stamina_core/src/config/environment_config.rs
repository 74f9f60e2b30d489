//! Environment penalty coefficients

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Recovery reduction per unit of heat stress, capped at 50% (default: 0.5)
    pub heat_recovery_penalty_coeff: f64,
    /// Recovery reduction per unit of cold stress, capped at 50% (default: 0.3)
    pub cold_recovery_penalty_coeff: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            heat_recovery_penalty_coeff: 0.5,
            cold_recovery_penalty_coeff: 0.3,
        }
    }
}
