//! Fixed engine constants
//!
//! These are structural constants of the model (branch boundaries, hard caps,
//! tick length). Everything a tuner is allowed to move lives in
//! [`crate::config::ParameterSet`] instead.

// ============================================================
// Tick
// ============================================================
pub mod tick {
    /// Fixed tick length (seconds)
    pub const TICK_SECONDS: f64 = 0.2;

    /// Seconds → minutes
    pub const SECONDS_PER_MINUTE: f64 = 60.0;

    /// Default history capacity (ticks). 100k ticks = 5.5 simulated hours.
    pub const DEFAULT_HISTORY_CAPACITY: usize = 100_000;
}

// ============================================================
// Energy branch selection
// ============================================================
pub mod energy {
    /// Below this speed (m/s) the static-standing formula is used
    pub const STATIC_SPEED_LIMIT: f64 = 0.1;

    /// Above this speed (m/s) the running formula is used
    pub const WALK_SPEED_LIMIT: f64 = 2.2;

    /// Per-second energy rate ceiling (stamina fraction / s)
    pub const MAX_ENERGY_RATE: f64 = 0.05;

    /// Weight multiplier bounds (current / reference)
    pub const WEIGHT_MULTIPLIER_MIN: f64 = 0.5;
    pub const WEIGHT_MULTIPLIER_MAX: f64 = 2.0;

    /// Terrain factor bounds
    pub const TERRAIN_FACTOR_MIN: f64 = 0.5;
    pub const TERRAIN_FACTOR_MAX: f64 = 3.0;

    /// Downhill correction applies to grades in [-15, 0)
    pub const DOWNHILL_CORRECTION_LIMIT: f64 = 15.0;
    pub const DOWNHILL_CORRECTION_MIN: f64 = 0.5;
}

// ============================================================
// Efficiency
// ============================================================
pub mod efficiency {
    pub const FITNESS_EFFICIENCY_MIN: f64 = 0.7;
    pub const FITNESS_EFFICIENCY_MAX: f64 = 1.0;
}

// ============================================================
// Drain aggregation
// ============================================================
pub mod drain {
    /// Hard ceiling on drain per tick (stamina fraction)
    pub const MAX_DRAIN_PER_TICK: f64 = 0.02;

    /// Encumbrance drain multiplier bounds
    pub const ENCUMBRANCE_MULTIPLIER_MIN: f64 = 1.0;
    pub const ENCUMBRANCE_MULTIPLIER_MAX: f64 = 3.0;

    /// EPOC elevated idle cost: 1 + EPOC_SPEED_WEIGHT * pre-stop speed ratio
    pub const EPOC_SPEED_WEIGHT: f64 = 0.5;
}

// ============================================================
// Recovery
// ============================================================
pub mod recovery {
    /// Fitness recovery multiplier bounds
    pub const FITNESS_RECOVERY_MIN: f64 = 1.0;
    pub const FITNESS_RECOVERY_MAX: f64 = 1.5;

    /// Load penalty normalisation (kg) and clamp of the normalised load
    pub const LOAD_PENALTY_REFERENCE_KG: f64 = 30.0;
    pub const LOAD_PENALTY_RATIO_MAX: f64 = 2.0;

    /// Length of the long-rest ramp toward the slow multiplier (minutes)
    pub const SLOW_PHASE_RAMP_MINUTES: f64 = 10.0;

    /// Each environment penalty removes at most half of the recovery
    pub const ENVIRONMENT_PENALTY_CAP: f64 = 0.5;
}

// ============================================================
// Movement / closed loop
// ============================================================
pub mod movement {
    /// Speeds at or below this (m/s) count as stationary
    pub const MOVING_SPEED_THRESHOLD: f64 = 0.05;

    /// Speed curve region boundaries (stamina fraction)
    pub const PLATEAU_THRESHOLD: f64 = 0.25;
    pub const COLLAPSE_THRESHOLD: f64 = 0.05;

    /// Collapse region never drops below this fraction of the limp multiplier
    pub const COLLAPSE_FLOOR_RATIO: f64 = 0.8;

    /// Encumbrance can remove at most half of the speed multiplier
    pub const ENCUMBRANCE_SPEED_PENALTY_MAX: f64 = 0.5;

    /// Absolute iteration cap for one scenario run (~55 simulated hours)
    pub const MAX_SCENARIO_TICKS: u64 = 1_000_000;
}

// ============================================================
// Numerics
// ============================================================
pub mod numeric {
    /// Denominator floor
    pub const EPSILON: f64 = 1e-9;
}
