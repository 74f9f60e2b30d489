//! Closed enumerations and context consumed by the engine

use serde::{Deserialize, Serialize};

/// Movement mode requested by the character controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    #[default]
    Idle,
    Walk,
    Run,
    Sprint,
}

impl MovementType {
    pub fn is_sprint(&self) -> bool {
        matches!(self, MovementType::Sprint)
    }
}

/// Body posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    #[default]
    Stand,
    Crouch,
    Prone,
}

/// Environmental context for recovery.
///
/// Stress values are normalised to [0, 1]; out-of-range inputs are clamped
/// where they are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Environment {
    pub heat_stress: f64,
    pub cold_stress: f64,
    /// Disables positive recovery (swimming / submerged)
    pub submerged: bool,
}

impl Environment {
    pub fn temperate() -> Self {
        Self::default()
    }
}

/// Coarse stamina bands for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaminaStatus {
    Fresh,
    Good,
    Tired,
    Exhausted,
    Collapsed,
}

impl StaminaStatus {
    pub fn from_stamina(stamina: f64) -> Self {
        match stamina {
            s if s >= 0.8 => StaminaStatus::Fresh,
            s if s >= 0.5 => StaminaStatus::Good,
            s if s >= 0.25 => StaminaStatus::Tired,
            s if s >= 0.05 => StaminaStatus::Exhausted,
            _ => StaminaStatus::Collapsed,
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            StaminaStatus::Fresh => "fresh",
            StaminaStatus::Good => "good",
            StaminaStatus::Tired => "tired",
            StaminaStatus::Exhausted => "exhausted",
            StaminaStatus::Collapsed => "collapsed",
        }
    }
}
