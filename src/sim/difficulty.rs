//! Score-driven difficulty curve
//!
//! Recomputed from the live score on every tick and every tap, never cached
//! per session.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics coefficients for a given score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Added to vertical velocity each tick
    pub gravity: f32,
    /// Cap on downward velocity
    pub terminal_velocity: f32,
    /// Multiplier on tap drift
    pub drift_chaos: f32,
}

impl Difficulty {
    pub fn for_score(score: u32) -> Self {
        let s = score as f32;
        Self {
            gravity: GRAVITY * (1.0 + s * GRAVITY_PER_POINT),
            terminal_velocity: TERMINAL_VELOCITY + s * TERMINAL_VELOCITY_PER_POINT,
            drift_chaos: 1.0 + s * CHAOS_PER_POINT,
        }
    }
}
