//! Entity integration and tap impulse
//!
//! Units are play-area pixels and ticks. Velocity is added to position once
//! per tick, so every constant here is "per frame".

use rand::Rng;

use super::collision::{Wall, bounce_velocity, floor_collision, wall_collision};
use super::difficulty::Difficulty;
use super::state::{Entity, PlayArea};
use crate::consts::{DRIFT_SPREAD, HORIZONTAL_DRIFT_RANGE, JUMP_STRENGTH};

/// What happened during one physics step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepOutcome {
    pub wall: Option<Wall>,
    pub hit_floor: bool,
}

/// Advance the entity by one tick
pub fn step(entity: &mut Entity, difficulty: &Difficulty, area: &PlayArea) -> StepOutcome {
    // Gravity, clamped to the score-scaled cap
    entity.vel.y = (entity.vel.y + difficulty.gravity).min(difficulty.terminal_velocity);

    entity.pos += entity.vel;

    let mut outcome = StepOutcome::default();

    if let Some(hit) = wall_collision(entity.pos.x, entity.size, area.width) {
        entity.pos.x = hit.clamped_x;
        entity.vel.x = bounce_velocity(entity.vel.x);
        outcome.wall = Some(hit.wall);
    }

    outcome.hit_floor = floor_collision(entity.pos.y, area.height);
    outcome
}

/// Kick the entity upward with a random sideways drift
///
/// Both velocity components are replaced, not accumulated.
pub fn apply_impulse<R: Rng + ?Sized>(entity: &mut Entity, difficulty: &Difficulty, rng: &mut R) {
    entity.vel.y = JUMP_STRENGTH;
    entity.vel.x = drift(difficulty, rng);
}

/// Horizontal drift for a tap at the given difficulty
pub fn drift<R: Rng + ?Sized>(difficulty: &Difficulty, rng: &mut R) -> f32 {
    let sample: f32 = rng.random_range(-0.5..0.5);
    sample * HORIZONTAL_DRIFT_RANGE * DRIFT_SPREAD * difficulty.drift_chaos
}
