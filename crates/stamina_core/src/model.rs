//! Tick Step
//!
//! [`StaminaModel`] owns one [`SimulationState`] and borrows a read-only
//! [`ParameterSet`]. Each call to [`StaminaModel::step`] advances exactly one
//! fixed tick:
//!
//! (a) classify moving / stationary
//! (b) exercise / rest accumulators
//! (c) fatigue
//! (d) EPOC
//! (e) efficiency
//! (f) posture / sprint multipliers
//! (g) drain (moving or EPOC) vs recovery
//! (h) bounded, clamped stamina update
//! (i) history

use serde::{Deserialize, Serialize};

use crate::config::ParameterSet;
use crate::constants::movement::MOVING_SPEED_THRESHOLD;
use crate::constants::tick::{SECONDS_PER_MINUTE, TICK_SECONDS};
use crate::drain::{aggregate_drain, DrainInputs};
use crate::efficiency::{speed_ratio, EfficiencyFactors};
use crate::energy::{energy_rate, static_energy_rate};
use crate::fatigue::update_fatigue;
use crate::num::{clamp, finite_or, non_negative};
use crate::recovery::{recovery_rate, RecoveryInputs};
use crate::state::SimulationState;
use crate::types::{Environment, MovementType, Stance};

/// Which path a tick took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickMode {
    Drain,
    EpocDrain,
    Recovery,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickOutcome {
    /// Stamina after the tick, [0, 1]
    pub stamina: f64,
    /// Signed change actually applied this tick
    pub applied_rate: f64,
    pub mode: TickMode,
}

/// Instantaneous inputs for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInputs {
    pub speed: f64,
    pub current_weight: f64,
    pub grade_percent: f64,
    pub terrain_factor: f64,
    pub stance: Stance,
    pub movement: MovementType,
    pub time: f64,
}

#[derive(Debug, Clone)]
pub struct StaminaModel<'a> {
    params: &'a ParameterSet,
    state: SimulationState,
    environment: Environment,
    tick_seconds: f64,
}

impl<'a> StaminaModel<'a> {
    pub fn new(params: &'a ParameterSet) -> Self {
        Self::with_tick(params, TICK_SECONDS)
    }

    /// Non-positive or non-finite tick lengths fall back to the default tick
    pub fn with_tick(params: &'a ParameterSet, tick_seconds: f64) -> Self {
        let tick_seconds = if tick_seconds.is_finite() && tick_seconds > 0.0 {
            tick_seconds
        } else {
            TICK_SECONDS
        };
        Self {
            params,
            state: SimulationState::new(),
            environment: Environment::default(),
            tick_seconds,
        }
    }

    pub fn with_state(mut self, state: SimulationState) -> Self {
        self.state = state;
        self
    }

    pub fn params(&self) -> &ParameterSet {
        self.params
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn into_state(self) -> SimulationState {
        self.state
    }

    pub fn tick_seconds(&self) -> f64 {
        self.tick_seconds
    }

    pub fn stamina(&self) -> f64 {
        self.state.stamina
    }

    pub fn set_stamina(&mut self, stamina: f64) {
        self.state.set_stamina(stamina);
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = environment;
    }

    /// Fresh state; required before reusing a model for an independent run
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Advance one tick
    pub fn step(
        &mut self,
        speed: f64,
        current_weight: f64,
        grade_percent: f64,
        terrain_factor: f64,
        stance: Stance,
        movement: MovementType,
        time: f64,
    ) -> TickOutcome {
        let inputs = TickInputs {
            speed,
            current_weight,
            grade_percent,
            terrain_factor,
            stance,
            movement,
            time,
        };
        self.step_with(&inputs, 1.0)
    }

    /// Advance one tick with a multiplicative perturbation on recovery
    /// (used by noisy scenario runs; 1.0 = none)
    pub fn step_with(&mut self, inputs: &TickInputs, recovery_scale: f64) -> TickOutcome {
        let p = self.params;
        let dt = self.tick_seconds;
        let dt_minutes = dt / SECONDS_PER_MINUTE;

        let speed = non_negative(inputs.speed);
        let weight = non_negative(inputs.current_weight);
        let time = finite_or(inputs.time, 0.0);

        // (a)
        let moving = speed > MOVING_SPEED_THRESHOLD;

        // (b)
        if moving {
            self.state.exercise_duration_minutes += dt_minutes;
            self.state.rest_duration_minutes = 0.0;
        } else {
            self.state.rest_duration_minutes += dt_minutes;
            self.state.exercise_duration_minutes = 0.0;
        }

        // (c)
        self.state.fatigue_factor = update_fatigue(
            self.state.fatigue_factor,
            moving,
            self.state.exercise_duration_minutes,
            dt_minutes,
            &p.fatigue,
        );

        // (d)
        self.state.epoc = self.state.epoc.next(speed, self.state.last_speed, dt, &p.fatigue);

        // (e)
        let ratio = speed_ratio(speed, p.speed.game_max_speed);
        let efficiency = EfficiencyFactors::compute(ratio, &p.efficiency).total();

        // (f) + (g)
        let (delta, mode) = if moving || self.state.epoc.is_delay() {
            let (raw_tick_cost, mode) = if moving {
                let (_, rate) = energy_rate(
                    speed,
                    weight,
                    inputs.grade_percent,
                    inputs.terrain_factor,
                    &p.energy,
                );
                (rate * dt, TickMode::Drain)
            } else {
                let idle = static_energy_rate(weight, &p.energy) * dt;
                (idle * self.state.epoc.cost_multiplier(p.speed.game_max_speed), TickMode::EpocDrain)
            };

            let drain = aggregate_drain(
                &DrainInputs {
                    raw_tick_cost,
                    speed_ratio: ratio,
                    current_weight: weight,
                    moving,
                    stance: inputs.stance,
                    movement: inputs.movement,
                    efficiency,
                    fatigue_factor: self.state.fatigue_factor,
                },
                &p.drain,
                &p.energy,
            );
            (-drain.total, mode)
        } else {
            let rate = recovery_rate(
                &RecoveryInputs {
                    stamina: self.state.stamina,
                    rest_minutes: self.state.rest_duration_minutes,
                    current_weight: weight,
                    stance: inputs.stance,
                    environment: self.environment,
                    static_drain_rate: static_energy_rate(weight, &p.energy),
                },
                p,
            );
            let scale = non_negative(recovery_scale);
            let rate = if rate > 0.0 { rate * scale } else { rate };
            (rate * dt, TickMode::Recovery)
        };

        // (h)
        let bound = non_negative(p.drain.max_stamina_change_per_tick);
        let delta = clamp(delta, -bound, bound);
        let before = self.state.stamina;
        let after = clamp(before + delta, 0.0, 1.0);
        self.state.stamina = after;
        self.state.last_speed = speed;

        // (i)
        self.state.history.record(after, speed, time);

        TickOutcome { stamina: after, applied_rate: after - before, mode }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rest_for(model: &mut StaminaModel, seconds: f64, weight: f64, stance: Stance) {
        let ticks = (seconds / model.tick_seconds()).round() as usize;
        for i in 0..ticks {
            model.step(0.0, weight, 0.0, 1.0, stance, MovementType::Idle, i as f64 * TICK_SECONDS);
        }
    }

    #[test]
    fn test_running_drains() {
        let params = ParameterSet::default();
        let mut model = StaminaModel::new(&params);
        let out = model.step(3.5, 90.0, 0.0, 1.0, Stance::Stand, MovementType::Run, 0.0);
        assert_eq!(out.mode, TickMode::Drain);
        assert!(out.applied_rate < 0.0);
        assert!(out.stamina < 1.0);
    }

    #[test]
    fn test_sprint_costs_more_than_run() {
        let params = ParameterSet::default();
        let mut run = StaminaModel::new(&params);
        let mut sprint = StaminaModel::new(&params);
        let r = run.step(4.0, 90.0, 0.0, 1.0, Stance::Stand, MovementType::Run, 0.0);
        let s = sprint.step(4.0, 90.0, 0.0, 1.0, Stance::Stand, MovementType::Sprint, 0.0);
        assert!(s.applied_rate < r.applied_rate);
    }

    #[test]
    fn test_epoc_after_stop() {
        let params = ParameterSet::default();
        let mut model = StaminaModel::new(&params);
        model.set_stamina(0.5);
        model.step(4.0, 90.0, 0.0, 1.0, Stance::Stand, MovementType::Run, 0.0);
        let stop = model.step(0.0, 90.0, 0.0, 1.0, Stance::Stand, MovementType::Idle, 0.2);
        assert_eq!(stop.mode, TickMode::EpocDrain);
        assert!(stop.applied_rate < 0.0);

        let mut t = 0.4;
        let mut last = stop;
        while last.mode == TickMode::EpocDrain {
            last = model.step(0.0, 90.0, 0.0, 1.0, Stance::Stand, MovementType::Idle, t);
            t += 0.2;
        }
        assert_eq!(last.mode, TickMode::Recovery);
        assert!(last.applied_rate > 0.0);
        assert!(t < 1.5);
    }

    #[test]
    fn test_epoc_expires_without_advancing_clock() {
        let params = ParameterSet::default();
        for time in [f64::NAN, 7.0] {
            let mut model = StaminaModel::new(&params);
            model.set_stamina(0.5);
            model.step(4.0, 90.0, 0.0, 1.0, Stance::Stand, MovementType::Run, time);

            let modes: Vec<TickMode> = (0..4)
                .map(|_| model.step(0.0, 90.0, 0.0, 1.0, Stance::Stand, MovementType::Idle, time).mode)
                .collect();
            assert_eq!(
                modes,
                vec![TickMode::EpocDrain, TickMode::EpocDrain, TickMode::EpocDrain, TickMode::Recovery],
                "time {}",
                time
            );

            let before = model.stamina();
            for _ in 0..3000 {
                model.step(0.0, 90.0, 0.0, 1.0, Stance::Stand, MovementType::Idle, time);
            }
            assert!(model.stamina() > before);
        }
    }

    #[test]
    fn test_accumulators_exclusive() {
        let params = ParameterSet::default();
        let mut model = StaminaModel::new(&params);
        for i in 0..10 {
            model.step(2.0, 90.0, 0.0, 1.0, Stance::Stand, MovementType::Walk, i as f64 * 0.2);
        }
        assert!(model.state().exercise_duration_minutes > 0.0);
        assert_eq!(model.state().rest_duration_minutes, 0.0);
        model.step(0.0, 90.0, 0.0, 1.0, Stance::Stand, MovementType::Idle, 2.0);
        assert_eq!(model.state().exercise_duration_minutes, 0.0);
        assert!(model.state().rest_duration_minutes > 0.0);
    }

    #[test]
    fn test_prone_recovers_more_than_standing() {
        let params = ParameterSet::default();
        let mut stand = StaminaModel::new(&params);
        let mut prone = StaminaModel::new(&params);
        stand.set_stamina(0.5);
        prone.set_stamina(0.5);
        rest_for(&mut stand, 60.0, 90.0, Stance::Stand);
        rest_for(&mut prone, 60.0, 90.0, Stance::Prone);
        assert!(prone.stamina() - 0.5 > stand.stamina() - 0.5);
        assert!(stand.stamina() > 0.5);
    }

    #[test]
    fn test_submerged_rest_drains() {
        let params = ParameterSet::default();
        let mut model = StaminaModel::new(&params);
        model.set_stamina(0.5);
        model.set_environment(Environment { submerged: true, ..Default::default() });
        let out = model.step(0.0, 90.0, 0.0, 1.0, Stance::Stand, MovementType::Idle, 0.0);
        assert_eq!(out.mode, TickMode::Recovery);
        assert!(out.applied_rate < 0.0);
    }

    #[test]
    fn test_hostile_inputs_stay_bounded() {
        let params = ParameterSet::default();
        let mut model = StaminaModel::new(&params);
        let speeds = [f64::NAN, -5.0, 0.0, 0.07, 1.0, 2.2, 9.0, f64::INFINITY];
        let weights = [f64::NAN, -10.0, 0.0, 90.0, 400.0];
        let mut t = 0.0;
        for _ in 0..50 {
            for &v in &speeds {
                for &w in &weights {
                    let out = model.step(v, w, f64::NAN, -3.0, Stance::Prone, MovementType::Sprint, t);
                    assert!((0.0..=1.0).contains(&out.stamina));
                    assert!(out.applied_rate.is_finite());
                    let f = model.state().fatigue_factor;
                    assert!((1.0..=params.fatigue.fatigue_max_factor).contains(&f));
                    t += 0.2;
                }
            }
        }
    }

    #[test]
    fn test_per_tick_change_bounded() {
        let mut params = ParameterSet::default();
        params.drain.max_stamina_change_per_tick = 0.001;
        params.energy.energy_to_stamina_coeff = 1.0;
        let mut model = StaminaModel::new(&params);
        let out = model.step(5.0, 200.0, 0.0, 1.0, Stance::Stand, MovementType::Sprint, 0.0);
        assert!((out.applied_rate + 0.001).abs() < 1e-15);
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let params = ParameterSet::default();
        let mut model = StaminaModel::new(&params);
        for i in 0..100 {
            model.step(4.0, 120.0, 5.0, 1.2, Stance::Stand, MovementType::Sprint, i as f64 * 0.2);
        }
        model.reset();
        assert_eq!(model.state(), &SimulationState::new());
    }

    #[test]
    fn test_history_recorded() {
        let params = ParameterSet::default();
        let mut model = StaminaModel::new(&params);
        model.step(1.0, 90.0, 0.0, 1.0, Stance::Stand, MovementType::Walk, 0.0);
        model.step(1.0, 90.0, 0.0, 1.0, Stance::Stand, MovementType::Walk, 0.2);
        assert_eq!(model.state().history.len(), 2);
        assert_eq!(model.state().history.time, vec![0.0, 0.2]);
    }

    // ========== Property tests ==========

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn stance() -> impl Strategy<Value = Stance> {
            prop_oneof![Just(Stance::Stand), Just(Stance::Crouch), Just(Stance::Prone)]
        }

        fn movement() -> impl Strategy<Value = MovementType> {
            prop_oneof![
                Just(MovementType::Idle),
                Just(MovementType::Walk),
                Just(MovementType::Run),
                Just(MovementType::Sprint),
            ]
        }

        proptest! {
            /// Stamina and fatigue stay in range for any input sequence
            #[test]
            fn prop_state_bounded(
                ticks in prop::collection::vec(
                    (0.0f64..8.0, 40.0f64..300.0, -30.0f64..30.0, 0.0f64..4.0, stance(), movement()),
                    1..200
                ),
                initial in 0.0f64..=1.0
            ) {
                let params = ParameterSet::default();
                let mut model = StaminaModel::new(&params);
                model.set_stamina(initial);
                for (i, (v, w, g, t, st, mv)) in ticks.into_iter().enumerate() {
                    let out = model.step(v, w, g, t, st, mv, i as f64 * 0.2);
                    prop_assert!((0.0..=1.0).contains(&out.stamina));
                    prop_assert!(out.applied_rate.abs() <= params.drain.max_stamina_change_per_tick + 1e-12);
                    let f = model.state().fatigue_factor;
                    prop_assert!((1.0..=params.fatigue.fatigue_max_factor).contains(&f));
                }
            }

            /// Heavier load never makes a moving tick cheaper
            #[test]
            fn prop_heavier_drains_more(
                speed in 0.2f64..6.0,
                weight in 60.0f64..200.0,
                extra in 0.0f64..60.0,
            ) {
                let params = ParameterSet::default();
                let mut light = StaminaModel::new(&params);
                let mut heavy = StaminaModel::new(&params);
                let a = light.step(speed, weight, 0.0, 1.0, Stance::Stand, MovementType::Run, 0.0);
                let b = heavy.step(speed, weight + extra, 0.0, 1.0, Stance::Stand, MovementType::Run, 0.0);
                prop_assert!(b.stamina <= a.stamina + 1e-12);
            }
        }
    }
}
