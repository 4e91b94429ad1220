//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One tick per display frame, no wall-clock time
//! - Seeded RNG only
//! - Presentation reads state, never writes it

pub mod collision;
pub mod difficulty;
pub mod input;
pub mod messages;
pub mod particles;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{Wall, floor_collision, wall_collision};
pub use difficulty::Difficulty;
pub use messages::{GAME_OVER_MESSAGES, MILESTONES, milestone_message};
pub use particles::{Particle, Particles};
pub use physics::{StepOutcome, apply_impulse, step};
pub use state::{Entity, FrameView, GameEvent, GamePhase, GameSession, PlayArea, Toast};
pub use tick::{TickOutcome, tick};
