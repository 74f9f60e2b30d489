//! Forced-rest hysteresis
//!
//! Stamina dropping below the trigger forces the character to a stop; it
//! may only move again once stamina climbs back above the (higher) release
//! level. The gap between the two is what prevents stop-go chattering.

use serde::{Deserialize, Serialize};

use crate::config::SpeedConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestGate {
    #[default]
    Normal,
    ForcedRest,
}

impl RestGate {
    pub fn is_forced(&self) -> bool {
        matches!(self, RestGate::ForcedRest)
    }

    /// Gate state for the coming tick, given stamina at its start
    pub fn next(self, stamina: f64, cfg: &SpeedConfig) -> Self {
        match self {
            RestGate::ForcedRest if stamina > cfg.forced_rest_release => {
                tracing::debug!(stamina, "forced rest released");
                RestGate::Normal
            }
            RestGate::Normal if stamina < cfg.forced_rest_trigger => {
                tracing::debug!(stamina, "forced rest engaged");
                RestGate::ForcedRest
            }
            gate => gate,
        }
    }
}
