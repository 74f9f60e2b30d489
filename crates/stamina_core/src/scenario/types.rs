//! Scenario definitions and results

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::num::{finite_or, non_negative, safe_div};
use crate::scenario::noise::NoiseConfig;
use crate::types::{Environment, MovementType, Stance};

/// One point of the speed plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Seconds from scenario start
    pub time: f64,
    /// m/s
    pub target_speed: f64,
}

impl Keyframe {
    pub fn new(time: f64, target_speed: f64) -> Self {
        Self { time, target_speed }
    }
}

/// Speed plan plus fixed context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    /// Non-decreasing in time; target speed is interpolated linearly
    pub keyframes: Vec<Keyframe>,
    /// Total weight including bodyweight, kg
    pub current_weight: f64,
    pub grade_percent: f64,
    pub terrain_factor: f64,
    pub stance: Stance,
    pub movement: MovementType,
    pub initial_stamina: f64,
    pub environment: Environment,
    /// When set, the run continues past the last keyframe (holding its
    /// speed) until this distance is covered
    pub target_distance: Option<f64>,
    /// Amplitudes used when a noise seed is supplied
    pub noise: NoiseConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "unnamed".to_string(),
            keyframes: Vec::new(),
            current_weight: 90.0,
            grade_percent: 0.0,
            terrain_factor: 1.0,
            stance: Stance::Stand,
            movement: MovementType::Run,
            initial_stamina: 1.0,
            environment: Environment::default(),
            target_distance: None,
            noise: NoiseConfig::default(),
        }
    }
}

impl Scenario {
    /// Constant target speed for `duration` seconds
    pub fn constant(name: &str, target_speed: f64, duration: f64) -> Self {
        Self {
            name: name.to_string(),
            keyframes: vec![Keyframe::new(0.0, target_speed), Keyframe::new(duration, target_speed)],
            ..Default::default()
        }
    }

    pub fn with_keyframes(mut self, keyframes: Vec<Keyframe>) -> Self {
        self.keyframes = keyframes;
        self
    }

    pub fn with_weight(mut self, current_weight: f64) -> Self {
        self.current_weight = current_weight;
        self
    }

    pub fn with_movement(mut self, movement: MovementType) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_stance(mut self, stance: Stance) -> Self {
        self.stance = stance;
        self
    }

    pub fn with_initial_stamina(mut self, stamina: f64) -> Self {
        self.initial_stamina = stamina;
        self
    }

    pub fn with_grade(mut self, grade_percent: f64) -> Self {
        self.grade_percent = grade_percent;
        self
    }

    pub fn with_terrain(mut self, terrain_factor: f64) -> Self {
        self.terrain_factor = terrain_factor;
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_target_distance(mut self, distance: f64) -> Self {
        self.target_distance = Some(distance);
        self
    }

    pub fn with_noise(mut self, noise: NoiseConfig) -> Self {
        self.noise = noise;
        self
    }

    /// Structural checks for externally supplied scenarios. The runner
    /// itself tolerates anything; this exists so the CLI can reject typos.
    pub fn validate(&self) -> Result<()> {
        if self.keyframes.is_empty() {
            return Err(CoreError::InvalidScenario(format!("`{}` has no keyframes", self.name)));
        }
        for (i, kf) in self.keyframes.iter().enumerate() {
            if !kf.time.is_finite() || !kf.target_speed.is_finite() || kf.target_speed < 0.0 {
                return Err(CoreError::InvalidScenario(format!(
                    "`{}` keyframe {} is not a finite non-negative (time, speed)",
                    self.name, i
                )));
            }
        }
        if self.keyframes.windows(2).any(|w| w[1].time < w[0].time) {
            return Err(CoreError::InvalidScenario(format!(
                "`{}` keyframe times must be non-decreasing",
                self.name
            )));
        }
        if let Some(d) = self.target_distance {
            if !d.is_finite() || d < 0.0 {
                return Err(CoreError::InvalidScenario(format!(
                    "`{}` target distance must be finite and >= 0",
                    self.name
                )));
            }
        }
        Ok(())
    }

    pub fn start_time(&self) -> f64 {
        self.keyframes.first().map(|k| finite_or(k.time, 0.0)).unwrap_or(0.0)
    }

    pub fn end_time(&self) -> f64 {
        self.keyframes.last().map(|k| finite_or(k.time, 0.0)).unwrap_or(0.0)
    }

    /// Seconds covered by the keyframes
    pub fn duration(&self) -> f64 {
        (self.end_time() - self.start_time()).max(0.0)
    }

    /// Target speed at `time`, held constant before the first and after the
    /// last keyframe
    pub fn target_speed_at(&self, time: f64) -> f64 {
        let (first, last) = match (self.keyframes.first(), self.keyframes.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return 0.0,
        };
        if time <= first.time {
            return non_negative(first.target_speed);
        }
        if time >= last.time {
            return non_negative(last.target_speed);
        }
        for w in self.keyframes.windows(2) {
            let (a, b) = (w[0], w[1]);
            if time >= a.time && time <= b.time {
                let t = safe_div(time - a.time, b.time - a.time).clamp(0.0, 1.0);
                return non_negative(a.target_speed + (b.target_speed - a.target_speed) * t);
            }
        }
        non_negative(last.target_speed)
    }

    /// Distance the plan asks for: `target_distance` if set, otherwise the
    /// trapezoidal integral of the keyframes
    pub fn nominal_distance(&self) -> f64 {
        if let Some(d) = self.target_distance {
            return non_negative(d);
        }
        self.keyframes
            .windows(2)
            .map(|w| {
                let dt = (w[1].time - w[0].time).max(0.0);
                0.5 * (non_negative(w[0].target_speed) + non_negative(w[1].target_speed)) * dt
            })
            .map(|d| finite_or(d, 0.0))
            .sum()
    }
}

/// Everything the external tools read back from a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub stamina_history: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub speed_history: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub time_history: Vec<f64>,
    pub final_stamina: f64,
    pub min_stamina: f64,
    /// Metres actually covered (trapezoidal)
    pub total_distance: f64,
    /// Metres the plan asked for
    pub target_distance: f64,
    /// Elapsed seconds plus the shortfall walked at the penalty limp speed
    pub total_time_with_penalty: f64,
    /// Total minutes spent moving
    pub exercise_duration_minutes: f64,
    /// Total minutes spent stationary
    pub rest_duration_minutes: f64,
    pub forced_rest_ticks: u64,
    pub ticks: u64,
    /// False when the iteration cap stopped the run
    pub finished: bool,
}

impl ScenarioResult {
    /// Copy without the per-tick histories
    pub fn summary(&self) -> Self {
        Self {
            stamina_history: Vec::new(),
            speed_history: Vec::new(),
            time_history: Vec::new(),
            ..self.clone()
        }
    }

    /// Bit-level equality, NaN-safe; used for determinism checks
    pub fn bitwise_eq(&self, other: &Self) -> bool {
        fn same(a: &[f64], b: &[f64]) -> bool {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
        }
        same(&self.stamina_history, &other.stamina_history)
            && same(&self.speed_history, &other.speed_history)
            && same(&self.time_history, &other.time_history)
            && same(
                &[
                    self.final_stamina,
                    self.min_stamina,
                    self.total_distance,
                    self.total_time_with_penalty,
                    self.exercise_duration_minutes,
                    self.rest_duration_minutes,
                ],
                &[
                    other.final_stamina,
                    other.min_stamina,
                    other.total_distance,
                    other.total_time_with_penalty,
                    other.exercise_duration_minutes,
                    other.rest_duration_minutes,
                ],
            )
            && self.ticks == other.ticks
            && self.forced_rest_ticks == other.forced_rest_ticks
            && self.finished == other.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolation() {
        let s = Scenario::default().with_keyframes(vec![
            Keyframe::new(0.0, 0.0),
            Keyframe::new(10.0, 2.0),
            Keyframe::new(20.0, 2.0),
            Keyframe::new(30.0, 4.0),
        ]);
        assert_eq!(s.target_speed_at(-5.0), 0.0);
        assert!((s.target_speed_at(5.0) - 1.0).abs() < 1e-12);
        assert!((s.target_speed_at(15.0) - 2.0).abs() < 1e-12);
        assert!((s.target_speed_at(25.0) - 3.0).abs() < 1e-12);
        assert_eq!(s.target_speed_at(100.0), 4.0);
    }

    #[test]
    fn test_step_keyframes() {
        let s = Scenario::default().with_keyframes(vec![
            Keyframe::new(0.0, 1.0),
            Keyframe::new(10.0, 1.0),
            Keyframe::new(10.0, 3.0),
            Keyframe::new(20.0, 3.0),
        ]);
        assert!(s.target_speed_at(12.0) == 3.0);
        assert!(s.target_speed_at(5.0) == 1.0);
    }

    #[test]
    fn test_nominal_distance() {
        let s = Scenario::constant("a", 3.47, 927.0);
        assert!((s.nominal_distance() - 3.47 * 927.0).abs() < 1e-6);
        assert_eq!(s.clone().with_target_distance(100.0).nominal_distance(), 100.0);
        assert!((s.duration() - 927.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate() {
        assert!(Scenario::constant("ok", 1.0, 10.0).validate().is_ok());
        assert!(Scenario::default().validate().is_err());

        let backwards = Scenario::default()
            .with_keyframes(vec![Keyframe::new(10.0, 1.0), Keyframe::new(5.0, 1.0)]);
        assert!(backwards.validate().is_err());

        let negative = Scenario::constant("neg", -1.0, 10.0);
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_scenario_deserializes_with_defaults() {
        let json = r#"{
            "name": "march",
            "keyframes": [{"time": 0, "target_speed": 1.5}, {"time": 600, "target_speed": 1.5}],
            "movement": "walk",
            "current_weight": 120
        }"#;
        let s: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(s.movement, MovementType::Walk);
        assert_eq!(s.stance, Stance::Stand);
        assert_eq!(s.initial_stamina, 1.0);
        assert_eq!(s.target_distance, None);
    }
}
