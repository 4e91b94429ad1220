//! Boundary collision detection and response
//!
//! The play area has two reflecting side walls and a lethal floor. There is no
//! ceiling: the entity may leave the top freely and fall back in.

use serde::{Deserialize, Serialize};

use crate::consts::WALL_RESTITUTION;

/// Which side wall was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
}

/// Result of a wall check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    pub wall: Wall,
    /// Position corrected back inside the play area
    pub clamped_x: f32,
}

/// Check the entity's box against both side walls
///
/// `x` is the left edge. The left wall wins if the area is narrower than the
/// entity.
pub fn wall_collision(x: f32, size: f32, width: f32) -> Option<WallHit> {
    if x <= 0.0 {
        Some(WallHit {
            wall: Wall::Left,
            clamped_x: 0.0,
        })
    } else if x + size >= width {
        Some(WallHit {
            wall: Wall::Right,
            clamped_x: width - size,
        })
    } else {
        None
    }
}

/// Reflect horizontal velocity with energy loss (same for both walls)
#[inline]
pub fn bounce_velocity(dx: f32) -> f32 {
    -dx * WALL_RESTITUTION
}

/// True once the entity's top edge is below the bottom of the play area
#[inline]
pub fn floor_collision(y: f32, height: f32) -> bool {
    y > height
}
