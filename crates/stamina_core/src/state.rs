//! Mutable per-run state

use serde::{Deserialize, Serialize};

use crate::constants::tick::DEFAULT_HISTORY_CAPACITY;
use crate::fatigue::EpocState;
use crate::num::clamp;

/// Bounded stamina/speed/time recording. Recording stops at capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    capacity: usize,
    pub stamina: Vec<f64>,
    pub speed: Vec<f64>,
    pub time: Vec<f64>,
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity, stamina: Vec::new(), speed: Vec::new(), time: Vec::new() }
    }

    /// Returns false once full (the sample is dropped)
    pub fn record(&mut self, stamina: f64, speed: f64, time: f64) -> bool {
        if self.is_full() {
            return false;
        }
        self.stamina.push(stamina);
        self.speed.push(speed);
        self.time.push(time);
        true
    }

    pub fn len(&self) -> usize {
        self.stamina.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamina.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.stamina.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.stamina.clear();
        self.speed.clear();
        self.time.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

/// State owned by exactly one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// [0, 1]
    pub stamina: f64,
    pub exercise_duration_minutes: f64,
    pub rest_duration_minutes: f64,
    /// [1, fatigue_max_factor]
    pub fatigue_factor: f64,
    pub epoc: EpocState,
    pub last_speed: f64,
    pub history: History,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::with_history_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            stamina: 1.0,
            exercise_duration_minutes: 0.0,
            rest_duration_minutes: 0.0,
            fatigue_factor: 1.0,
            epoc: EpocState::Normal,
            last_speed: 0.0,
            history: History::with_capacity(capacity),
        }
    }

    /// Back to fresh defaults, keeping the history allocation
    pub fn reset(&mut self) {
        self.stamina = 1.0;
        self.exercise_duration_minutes = 0.0;
        self.rest_duration_minutes = 0.0;
        self.fatigue_factor = 1.0;
        self.epoc = EpocState::Normal;
        self.last_speed = 0.0;
        self.history.clear();
    }

    pub fn set_stamina(&mut self, stamina: f64) {
        self.stamina = clamp(stamina, 0.0, 1.0);
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}
