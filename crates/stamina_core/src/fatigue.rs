//! Fatigue & EPOC Tracker
//!
//! - Fatigue: a drain multiplier in [1, fatigue_max_factor] that builds with
//!   long continuous exercise and sheds with rest.
//! - EPOC: a short window after stopping during which the character keeps
//!   paying an elevated idle cost instead of recovering.

use serde::{Deserialize, Serialize};

use crate::config::FatigueConfig;
use crate::constants::drain::EPOC_SPEED_WEIGHT;
use crate::constants::movement::MOVING_SPEED_THRESHOLD;
use crate::efficiency::speed_ratio;
use crate::num::{clamp, finite_or, non_negative};

/// Advance the fatigue factor by one tick.
///
/// `exercise_minutes` is the accumulator value *after* this tick's update.
pub fn update_fatigue(
    fatigue: f64,
    moving: bool,
    exercise_minutes: f64,
    dt_minutes: f64,
    params: &FatigueConfig,
) -> f64 {
    let max = params.fatigue_max_factor.max(1.0);
    let dt = non_negative(dt_minutes);
    let mut next = finite_or(fatigue, 1.0);

    if moving {
        if exercise_minutes > params.fatigue_start_minutes {
            next += params.fatigue_accumulation_coeff * dt;
        }
    } else {
        next -= params.fatigue_recovery_rate * dt;
    }
    clamp(next, 1.0, max)
}

/// Post-exercise state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum EpocState {
    #[default]
    Normal,
    Delay {
        /// Seconds spent in the delay, advanced by the tick length
        elapsed: f64,
        speed_before_stop: f64,
    },
}

impl EpocState {
    pub fn is_delay(&self) -> bool {
        matches!(self, EpocState::Delay { .. })
    }

    /// Transition for one tick of `dt` seconds.
    ///
    /// - moving → Normal (resumption cancels a pending delay)
    /// - moving-to-stopped edge → Delay, remembering the pre-stop speed
    /// - Delay once `elapsed` reaches the configured duration → Normal
    ///
    /// Expiry depends only on the tick count, never on caller time.
    pub fn next(self, speed: f64, last_speed: f64, dt: f64, params: &FatigueConfig) -> Self {
        let moving = non_negative(speed) > MOVING_SPEED_THRESHOLD;
        if moving {
            return EpocState::Normal;
        }

        let was_moving = non_negative(last_speed) > MOVING_SPEED_THRESHOLD;
        if was_moving {
            return EpocState::Delay { elapsed: 0.0, speed_before_stop: non_negative(last_speed) };
        }

        match self {
            EpocState::Delay { elapsed, speed_before_stop } => {
                let elapsed = non_negative(elapsed) + non_negative(dt);
                if elapsed < params.epoc_delay_seconds {
                    EpocState::Delay { elapsed, speed_before_stop }
                } else {
                    EpocState::Normal
                }
            }
            EpocState::Normal => EpocState::Normal,
        }
    }

    /// Idle-cost multiplier while in Delay: 1 + 0.5 × pre-stop speed ratio
    pub fn cost_multiplier(&self, max_speed: f64) -> f64 {
        match *self {
            EpocState::Delay { speed_before_stop, .. } => {
                1.0 + EPOC_SPEED_WEIGHT * speed_ratio(speed_before_stop, max_speed)
            }
            EpocState::Normal => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatigue_builds_after_start() {
        let p = FatigueConfig::default();
        assert_eq!(update_fatigue(1.0, true, 4.0, 1.0, &p), 1.0);
        let f = update_fatigue(1.0, true, 6.0, 1.0, &p);
        assert!((f - 1.015).abs() < 1e-12);
    }

    #[test]
    fn test_fatigue_bounds() {
        let p = FatigueConfig::default();
        assert_eq!(update_fatigue(1.99, true, 100.0, 10.0, &p), 2.0);
        assert_eq!(update_fatigue(1.01, false, 0.0, 10.0, &p), 1.0);
        assert_eq!(update_fatigue(f64::NAN, false, 0.0, 1.0, &p), 1.0);
    }

    #[test]
    fn test_fatigue_decays_with_rest() {
        let p = FatigueConfig::default();
        let f = update_fatigue(1.5, false, 0.0, 2.0, &p);
        assert!((f - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_epoc_enters_on_stop_edge() {
        let p = FatigueConfig::default();
        let s = EpocState::Normal.next(0.0, 3.0, 0.2, &p);
        assert_eq!(s, EpocState::Delay { elapsed: 0.0, speed_before_stop: 3.0 });
        // Standing still from standing still does not re-trigger
        assert_eq!(EpocState::Normal.next(0.0, 0.0, 0.2, &p), EpocState::Normal);
    }

    #[test]
    fn test_epoc_expires() {
        let p = FatigueConfig::default();
        let s = EpocState::Normal.next(0.0, 3.0, 0.2, &p);
        let s = s.next(0.0, 0.0, 0.2, &p);
        assert!(s.is_delay());
        let s = s.next(0.0, 0.0, 0.2, &p);
        assert!(s.is_delay());
        let s = s.next(0.0, 0.0, 0.2, &p);
        assert_eq!(s, EpocState::Normal);
    }

    #[test]
    fn test_epoc_nan_tick_counts_as_zero() {
        let p = FatigueConfig::default();
        let s = EpocState::Normal.next(0.0, 3.0, 0.2, &p);
        let s = s.next(0.0, 0.0, f64::NAN, &p);
        assert_eq!(s, EpocState::Delay { elapsed: 0.0, speed_before_stop: 3.0 });
        let s = s.next(0.0, 0.0, 0.5, &p);
        assert_eq!(s, EpocState::Normal);
    }

    #[test]
    fn test_epoc_cancelled_by_movement() {
        let p = FatigueConfig::default();
        let s = EpocState::Normal.next(0.0, 3.0, 0.2, &p);
        assert_eq!(s.next(1.0, 0.0, 0.2, &p), EpocState::Normal);
    }

    #[test]
    fn test_epoc_cost_multiplier() {
        let delay = EpocState::Delay { elapsed: 0.0, speed_before_stop: 5.2 };
        assert!((delay.cost_multiplier(5.2) - 1.5).abs() < 1e-12);
        assert_eq!(EpocState::Normal.cost_multiplier(5.2), 1.0);
    }
}
