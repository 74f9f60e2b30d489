//! Seeded input perturbation for robustness runs
//!
//! Each channel gets a bounded uniform relative perturbation
//! `x * (1 + u)`, `u ~ U[-a, a]`. The generator is `ChaCha8Rng` so a seed
//! reproduces the same run on every platform.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::model::TickInputs;
use crate::num::clamp;

/// Upper bound on any channel amplitude
pub const MAX_NOISE_AMPLITUDE: f64 = 0.5;

/// Relative amplitudes per channel (0 disables the channel)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Target speed (default: 0.05)
    pub speed: f64,
    /// Total weight (default: 0.02)
    pub weight: f64,
    /// Grade (default: 0.10)
    pub grade: f64,
    /// Terrain factor (default: 0.05)
    pub terrain: f64,
    /// Recovery rate (default: 0.05)
    pub recovery: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            speed: 0.05,
            weight: 0.02,
            grade: 0.10,
            terrain: 0.05,
            recovery: 0.05,
        }
    }
}

impl NoiseConfig {
    /// All channels disabled
    pub fn silent() -> Self {
        Self {
            speed: 0.0,
            weight: 0.0,
            grade: 0.0,
            terrain: 0.0,
            recovery: 0.0,
        }
    }

    /// Amplitudes clamped to `[0, MAX_NOISE_AMPLITUDE]`
    pub fn sanitized(&self) -> Self {
        let c = |a: f64| clamp(a, 0.0, MAX_NOISE_AMPLITUDE);
        Self {
            speed: c(self.speed),
            weight: c(self.weight),
            grade: c(self.grade),
            terrain: c(self.terrain),
            recovery: c(self.recovery),
        }
    }
}

/// Per-run noise stream
#[derive(Debug, Clone)]
pub struct NoiseSource {
    rng: ChaCha8Rng,
    config: NoiseConfig,
}

impl NoiseSource {
    pub fn new(seed: u64, config: NoiseConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// `1 + u`, `u ~ U[-amplitude, amplitude]`
    fn factor(&mut self, amplitude: f64) -> f64 {
        if amplitude > 0.0 {
            1.0 + self.rng.gen_range(-amplitude..=amplitude)
        } else {
            1.0
        }
    }

    /// Perturbed target speed
    pub fn speed(&mut self, target_speed: f64) -> f64 {
        target_speed * self.factor(self.config.speed)
    }

    /// Perturb the environmental inputs of one tick and draw the recovery
    /// scale. Speed is handled separately since it is perturbed before the
    /// speed cap is applied.
    pub fn perturb(&mut self, inputs: &mut TickInputs) -> f64 {
        inputs.current_weight *= self.factor(self.config.weight);
        inputs.grade_percent *= self.factor(self.config.grade);
        inputs.terrain_factor *= self.factor(self.config.terrain);
        self.factor(self.config.recovery)
    }
}
