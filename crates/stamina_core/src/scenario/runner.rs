//! Closed-loop scenario execution
//!
//! Per tick: update the rest gate from the current stamina, derive the
//! speed cap, pick `min(target, cap)` (or zero under forced rest), advance
//! the model, integrate distance with the trapezoidal rule.

use crate::config::ParameterSet;
use crate::constants::movement::{MAX_SCENARIO_TICKS, MOVING_SPEED_THRESHOLD};
use crate::constants::tick::{DEFAULT_HISTORY_CAPACITY, SECONDS_PER_MINUTE, TICK_SECONDS};
use crate::model::{StaminaModel, TickInputs};
use crate::num::{clamp, non_negative, safe_div};
use crate::scenario::noise::NoiseSource;
use crate::scenario::rest_gate::RestGate;
use crate::scenario::speed_curve::max_allowed_speed;
use crate::scenario::types::{Scenario, ScenarioResult};
use crate::state::SimulationState;

/// Reusable run settings; one runner can execute any number of scenarios
#[derive(Debug, Clone)]
pub struct ScenarioRunner<'a> {
    params: &'a ParameterSet,
    tick_seconds: f64,
    max_ticks: u64,
    record_history: bool,
}

impl<'a> ScenarioRunner<'a> {
    pub fn new(params: &'a ParameterSet) -> Self {
        Self {
            params,
            tick_seconds: TICK_SECONDS,
            max_ticks: MAX_SCENARIO_TICKS,
            record_history: true,
        }
    }

    /// Non-positive or non-finite ticks fall back to the default
    pub fn with_tick(mut self, tick_seconds: f64) -> Self {
        self.tick_seconds = if tick_seconds.is_finite() && tick_seconds > 0.0 {
            tick_seconds
        } else {
            TICK_SECONDS
        };
        self
    }

    /// Lower the iteration cap (never above the absolute cap)
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks.min(MAX_SCENARIO_TICKS);
        self
    }

    /// Skip per-tick histories (search loops only need the scalars)
    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    pub fn tick_seconds(&self) -> f64 {
        self.tick_seconds
    }

    /// Run one scenario. `noise_seed = None` is fully deterministic.
    pub fn run(&self, scenario: &Scenario, noise_seed: Option<u64>) -> ScenarioResult {
        let params = self.params;
        let dt = self.tick_seconds;

        let start = scenario.start_time();
        // tolerate representation error in duration / dt before rounding up
        let planned_ticks = (scenario.duration() / dt - 1e-9).ceil();
        let planned_ticks = if planned_ticks.is_finite() && planned_ticks >= 0.0 {
            planned_ticks.min(u64::MAX as f64) as u64
        } else {
            0
        };
        let target_distance = scenario.nominal_distance();
        let distance_mode = scenario.target_distance.is_some();

        let capacity = match (self.record_history, distance_mode) {
            (false, _) => 0,
            (true, true) => DEFAULT_HISTORY_CAPACITY,
            (true, false) => usize::try_from(planned_ticks)
                .unwrap_or(DEFAULT_HISTORY_CAPACITY)
                .min(DEFAULT_HISTORY_CAPACITY),
        };
        let mut model = StaminaModel::with_tick(params, dt)
            .with_state(SimulationState::with_history_capacity(capacity));
        model.set_stamina(clamp(scenario.initial_stamina, 0.0, 1.0));
        model.set_environment(scenario.environment);

        let mut noise = noise_seed.map(|seed| NoiseSource::new(seed, scenario.noise));
        let mut gate = RestGate::Normal;

        let mut ticks: u64 = 0;
        let mut distance = 0.0;
        // first tick integrates at its own speed (no ramp from rest)
        let mut prev_speed: Option<f64> = None;
        let mut min_stamina = model.stamina();
        let mut forced_rest_ticks: u64 = 0;
        let mut exercise_minutes = 0.0;
        let mut rest_minutes = 0.0;

        tracing::debug!(
            scenario = %scenario.name,
            planned_ticks,
            target_distance,
            seeded = noise_seed.is_some(),
            "scenario start"
        );

        let finished = loop {
            let done = if distance_mode {
                distance >= target_distance
            } else {
                ticks >= planned_ticks
            };
            if done {
                break true;
            }
            if ticks >= self.max_ticks {
                tracing::warn!(
                    scenario = %scenario.name,
                    ticks,
                    distance,
                    target_distance,
                    "scenario hit the iteration cap"
                );
                break false;
            }

            let time = start + ticks as f64 * dt;

            gate = gate.next(model.stamina(), &params.speed);
            let cap = max_allowed_speed(
                model.stamina(),
                scenario.movement,
                scenario.current_weight,
                params,
            );

            let mut target = scenario.target_speed_at(time);
            if let Some(n) = noise.as_mut() {
                target = n.speed(target);
            }
            let speed = if gate.is_forced() {
                0.0
            } else {
                non_negative(target).min(cap.max_speed)
            };

            let mut inputs = TickInputs {
                speed,
                current_weight: scenario.current_weight,
                grade_percent: scenario.grade_percent,
                terrain_factor: scenario.terrain_factor,
                stance: scenario.stance,
                movement: scenario.movement,
                time,
            };
            let recovery_scale = match noise.as_mut() {
                Some(n) => n.perturb(&mut inputs),
                None => 1.0,
            };

            let outcome = model.step_with(&inputs, recovery_scale);

            distance += 0.5 * (prev_speed.unwrap_or(speed) + speed) * dt;
            prev_speed = Some(speed);
            min_stamina = min_stamina.min(outcome.stamina);
            if gate.is_forced() {
                forced_rest_ticks += 1;
            }
            if speed > MOVING_SPEED_THRESHOLD {
                exercise_minutes += dt / SECONDS_PER_MINUTE;
            } else {
                rest_minutes += dt / SECONDS_PER_MINUTE;
            }
            ticks += 1;
        };

        let elapsed = ticks as f64 * dt;
        let total_time_with_penalty = if distance_mode && finished {
            elapsed
        } else {
            let shortfall = non_negative(target_distance - distance);
            elapsed + safe_div(shortfall, params.speed.penalty_limp_speed)
        };

        let final_stamina = model.stamina();
        let state = model.into_state();
        let history = state.history;

        tracing::debug!(
            scenario = %scenario.name,
            ticks,
            final_stamina,
            distance,
            finished,
            "scenario end"
        );

        ScenarioResult {
            scenario: scenario.name.clone(),
            stamina_history: history.stamina,
            speed_history: history.speed,
            time_history: history.time,
            final_stamina,
            min_stamina,
            total_distance: distance,
            target_distance,
            total_time_with_penalty,
            exercise_duration_minutes: exercise_minutes,
            rest_duration_minutes: rest_minutes,
            forced_rest_ticks,
            ticks,
            finished,
        }
    }
}

/// Run `scenario` under `params` with the given tick length.
///
/// Never fails; a run stopped by the iteration cap reports
/// `finished == false`.
pub fn simulate_scenario(
    scenario: &Scenario,
    params: &ParameterSet,
    tick_seconds: f64,
    noise_seed: Option<u64>,
) -> ScenarioResult {
    ScenarioRunner::new(params).with_tick(tick_seconds).run(scenario, noise_seed)
}
