//! # Parameter Set
//!
//! Every tunable coefficient of the stamina model, grouped by concern but
//! serialized as ONE flat key/value mapping (the form the external search
//! driver reads and writes).
//!
//! - Unknown keys are ignored
//! - Missing keys fall back to the documented defaults
//! - A `ParameterSet` is never mutated by the engine, so one instance can be
//!   shared by reference across any number of concurrent runs
//!
//! ## Usage
//! ```rust
//! use stamina_core::config::ParameterSet;
//!
//! let params = ParameterSet::default();
//! let arcade = ParameterSet::tactical_action();
//! assert!(arcade.energy.energy_to_stamina_coeff < params.energy.energy_to_stamina_coeff);
//! ```

mod drain_config;
mod efficiency_config;
mod energy_config;
mod environment_config;
mod fatigue_config;
mod recovery_config;
mod speed_config;

pub use drain_config::DrainConfig;
pub use efficiency_config::EfficiencyConfig;
pub use energy_config::EnergyConfig;
pub use environment_config::EnvironmentConfig;
pub use fatigue_config::FatigueConfig;
pub use recovery_config::RecoveryConfig;
pub use speed_config::SpeedConfig;

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Full coefficient set consumed by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ParameterSet {
    #[serde(flatten)]
    pub energy: EnergyConfig,
    #[serde(flatten)]
    pub efficiency: EfficiencyConfig,
    #[serde(flatten)]
    pub drain: DrainConfig,
    #[serde(flatten)]
    pub recovery: RecoveryConfig,
    #[serde(flatten)]
    pub fatigue: FatigueConfig,
    #[serde(flatten)]
    pub environment: EnvironmentConfig,
    #[serde(flatten)]
    pub speed: SpeedConfig,
}

/// Named presets, selectable from the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    StandardMilsim,
    EliteStandard,
    TacticalAction,
}

impl Preset {
    pub fn build(self) -> ParameterSet {
        match self {
            Preset::StandardMilsim => ParameterSet::standard_milsim(),
            Preset::EliteStandard => ParameterSet::elite_standard(),
            Preset::TacticalAction => ParameterSet::tactical_action(),
        }
    }
}

impl ParameterSet {
    /// Milsim baseline (same as `Default`)
    pub fn standard_milsim() -> Self {
        Self::default()
    }

    /// Harsher: lower fitness, slower recovery, heavier encumbrance
    pub fn elite_standard() -> Self {
        let mut params = Self::default();
        params.efficiency.fitness_level = 0.8;
        params.energy.energy_to_stamina_coeff = 4.0e-5;
        params.recovery.base_recovery_rate = 0.001;
        params.drain.encumbrance_stamina_drain_coeff = 1.8;
        params
    }

    /// Forgiving: cheaper movement, faster recovery, lighter sprint cost
    pub fn tactical_action() -> Self {
        let mut params = Self::default();
        params.energy.energy_to_stamina_coeff = 2.5e-5;
        params.recovery.base_recovery_rate = 0.0018;
        params.drain.sprint_stamina_drain_multiplier = 2.5;
        params.drain.encumbrance_stamina_drain_coeff = 1.0;
        params.speed.forced_rest_release = 0.15;
        params
    }

    // ========== Flat mapping ==========

    /// Build from a flat `name -> value` mapping.
    ///
    /// Unknown names are ignored, missing names keep their defaults.
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self> {
        let value = serde_json::to_value(map)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Flat `name -> value` view (sorted by name)
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        let mut map = BTreeMap::new();
        if let Ok(serde_json::Value::Object(fields)) = serde_json::to_value(self) {
            for (key, value) in fields {
                if let Some(v) = value.as_f64() {
                    map.insert(key, v);
                }
            }
        }
        map
    }

    /// Overwrite a single coefficient by name. Returns false for unknown names.
    pub fn set(&mut self, key: &str, value: f64) -> bool {
        let mut map = self.to_map();
        if !map.contains_key(key) {
            return false;
        }
        map.insert(key.to_string(), value);
        let flat: HashMap<String, f64> = map.into_iter().collect();
        match Self::from_map(&flat) {
            Ok(updated) => {
                *self = updated;
                true
            }
            Err(_) => false,
        }
    }

    // ========== Files ==========

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file and validate.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let params = match ext.as_str() {
            "json" => Self::from_json_str(&text)?,
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            other => return Err(CoreError::UnsupportedFormat(other.to_string())),
        };
        params.validate()?;
        tracing::debug!(path = %path.display(), "loaded parameter set");
        Ok(params)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_map())?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.to_map())?)
    }

    // ========== Validation ==========

    /// Reject values the engine cannot clamp its way out of.
    ///
    /// The engine itself tolerates any finite input; this is for the
    /// search driver and the CLI to catch typos early.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in self.to_map() {
            if !value.is_finite() {
                return Err(CoreError::invalid_parameter(key, "must be finite"));
            }
            if value < 0.0 {
                return Err(CoreError::invalid_parameter(key, format!("must be >= 0, got {}", value)));
            }
        }

        let positive = [
            ("character_weight", self.energy.character_weight),
            ("reference_weight", self.energy.reference_weight),
            ("game_max_speed", self.speed.game_max_speed),
            ("penalty_limp_speed", self.speed.penalty_limp_speed),
        ];
        for (key, value) in positive {
            if value <= 0.0 {
                return Err(CoreError::invalid_parameter(key, "must be > 0"));
            }
        }

        if self.efficiency.aerobic_threshold > self.efficiency.anaerobic_threshold {
            return Err(CoreError::invalid_parameter(
                "aerobic_threshold",
                "must not exceed anaerobic_threshold",
            ));
        }
        if self.speed.forced_rest_trigger >= self.speed.forced_rest_release {
            return Err(CoreError::invalid_parameter(
                "forced_rest_trigger",
                "must be below forced_rest_release",
            ));
        }
        if self.fatigue.fatigue_max_factor < 1.0 {
            return Err(CoreError::invalid_parameter("fatigue_max_factor", "must be >= 1.0"));
        }
        if self.recovery.marginal_decay_threshold >= 1.0 {
            return Err(CoreError::invalid_parameter("marginal_decay_threshold", "must be < 1.0"));
        }
        Ok(())
    }
}

// ========== Tests ==========
