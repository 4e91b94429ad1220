//! CF Keeper - keep the logo in the air
//!
//! Core modules:
//! - `sim`: Simulation (difficulty, physics, particles, game lifecycle)
//! - `clock`: Frame clock and toast timer with explicit cancellation
//! - `driver`: Glue that runs the simulation from host frames and input
//! - `highscores`: Injected best-score storage
//! - `settings`: Presentation preferences

pub mod clock;
pub mod driver;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use driver::GameDriver;
pub use highscores::{HighScoreStore, MemoryStore, StoreError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Base gravity added to vertical velocity every tick (units/tick²)
    pub const GRAVITY: f32 = 0.3;
    /// Vertical velocity assigned by a tap (negative is up)
    pub const JUMP_STRENGTH: f32 = -12.0;
    /// Base downward speed cap (units/tick)
    pub const TERMINAL_VELOCITY: f32 = 15.0;
    /// Horizontal drift range before chaos scaling
    pub const HORIZONTAL_DRIFT_RANGE: f32 = 1.4;
    /// Spread factor applied to the uniform drift sample
    pub const DRIFT_SPREAD: f32 = 6.0;

    /// Gravity grows 5% of base per point
    pub const GRAVITY_PER_POINT: f32 = 0.05;
    /// Terminal velocity grows half a unit per point
    pub const TERMINAL_VELOCITY_PER_POINT: f32 = 0.5;
    /// Drift chaos grows 3% per point
    pub const CHAOS_PER_POINT: f32 = 0.03;

    /// Edge length of the entity's bounding box
    pub const ENTITY_SIZE: f32 = 100.0;
    /// Spawn height as a fraction of play-area height
    pub const SPAWN_Y_FRACTION: f32 = 0.3;
    /// Fraction of horizontal speed kept after a wall bounce
    pub const WALL_RESTITUTION: f32 = 0.7;

    /// Particle rise per tick
    pub const PARTICLE_RISE_SPEED: f32 = 2.0;
    /// Ticks a particle lives (life decays 0.02 per tick)
    pub const PARTICLE_LIFETIME_TICKS: u32 = 50;
    /// Text shown by score particles
    pub const PARTICLE_TEXT: &str = "+1";

    /// Milestone toast lifetime in seconds
    pub const TOAST_DURATION_SECS: f64 = 2.5;

    /// LocalStorage key for the best score
    pub const HIGH_SCORE_KEY: &str = "cf-keeper-highscore";
}
