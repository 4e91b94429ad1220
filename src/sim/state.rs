//! Game session state and lifecycle
//!
//! START -> PLAYING -> GAME_OVER -> PLAYING ...
//! Everything a frame needs to draw is reachable from `GameSession::view`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Wall;
use super::messages::GAME_OVER_MESSAGES;
use super::particles::{Particle, Particles};
use crate::consts::*;
use crate::highscores::{HighScoreStore, load_or_default};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    Start,
    /// Active gameplay
    Playing,
    /// Logo hit the floor
    GameOver,
}

/// Bounds of the play area (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for PlayArea {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// The logo the player keeps in the air
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    /// Edge length of the bounding box
    pub size: f32,
}

impl Entity {
    /// At rest at the spawn point: centered, 30% down
    pub fn spawn(area: &PlayArea) -> Self {
        Self {
            pos: Vec2::new(
                area.width / 2.0 - ENTITY_SIZE / 2.0,
                area.height * SPAWN_Y_FRACTION,
            ),
            vel: Vec2::ZERO,
            size: ENTITY_SIZE,
        }
    }

    /// Where score particles appear
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size / 2.0, self.pos.y)
    }
}

/// A milestone message on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Toast {
    /// Identifies the auto-clear that belongs to this toast
    pub id: u64,
    pub message: &'static str,
}

/// Events for the presentation layer (sound, animation)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    Started,
    Scored { score: u32 },
    Milestone { score: u32, message: &'static str, toast_id: u64 },
    WallBounce { wall: Wall },
    GameOver { score: u32, new_record: bool },
}

/// Read-only snapshot handed to the renderer each frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView<'a> {
    pub phase: GamePhase,
    pub score: u32,
    pub high_score: u32,
    pub entity: &'a Entity,
    pub particles: &'a [Particle],
    pub toast: Option<&'static str>,
    pub game_over_message: Option<&'static str>,
    /// Backdrop animation period, shrinking as the score climbs
    pub backdrop_period_secs: f32,
}

/// One player's run of games, from page load to close
pub struct GameSession<S: HighScoreStore> {
    pub(crate) phase: GamePhase,
    pub(crate) score: u32,
    /// Best score including the run in progress
    pub(crate) high_score: u32,
    /// Best score when the current game started
    pub(crate) high_score_at_start: u32,
    /// Best score last written to the store
    pub(crate) persisted_high_score: u32,
    pub(crate) area: PlayArea,
    pub(crate) entity: Entity,
    pub(crate) particles: Particles,
    pub(crate) toast: Option<Toast>,
    pub(crate) game_over_message: Option<&'static str>,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) next_toast_id: u64,
    /// Ticks simulated in the current game
    pub(crate) time_ticks: u64,
    pub(crate) particles_enabled: bool,
    pub(crate) toasts_enabled: bool,
    store: S,
}

impl<S: HighScoreStore> GameSession<S> {
    /// Create a session, reading the best score from `store` once
    pub fn new(store: S, seed: u64) -> Self {
        let high_score = load_or_default(&store);
        let area = PlayArea::default();
        Self {
            phase: GamePhase::Start,
            score: 0,
            high_score,
            high_score_at_start: high_score,
            persisted_high_score: high_score,
            area,
            entity: Entity::spawn(&area),
            particles: Particles::new(),
            toast: None,
            game_over_message: None,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_toast_id: 1,
            time_ticks: 0,
            particles_enabled: true,
            toasts_enabled: true,
            store,
        }
    }

    /// Apply presentation preferences (never affects physics or score)
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.particles_enabled = settings.particles;
        self.toasts_enabled = settings.milestone_toasts;
        if !self.particles_enabled {
            self.particles.clear();
        }
        if !self.toasts_enabled {
            self.toast = None;
        }
    }

    /// Begin a new game from START or GAME_OVER
    ///
    /// Returns false (and changes nothing) if a game is already running.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            log::debug!("start ignored: already playing");
            return false;
        }

        self.score = 0;
        self.high_score_at_start = self.high_score;
        self.time_ticks = 0;
        self.particles.clear();
        self.toast = None;
        self.game_over_message = None;
        self.entity = Entity::spawn(&self.area);
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);

        log::info!("Game started (high score {})", self.high_score);
        true
    }

    /// PLAYING -> GAME_OVER, when the logo hits the floor or the host tears
    /// the game down
    pub(crate) fn end_game(&mut self) {
        self.phase = GamePhase::GameOver;

        let new_record = self.score > self.high_score_at_start;
        self.high_score = self.high_score.max(self.score);

        // Also retries a best score whose earlier write failed
        if self.high_score > self.persisted_high_score {
            match self.store.save(self.high_score) {
                Ok(()) => self.persisted_high_score = self.high_score,
                Err(e) => log::warn!("Could not save high score {}: {}", self.high_score, e),
            }
        }

        let idx = self.rng.random_range(0..GAME_OVER_MESSAGES.len());
        self.game_over_message = Some(GAME_OVER_MESSAGES[idx]);

        self.events.push(GameEvent::GameOver {
            score: self.score,
            new_record,
        });

        if new_record {
            log::info!("Game over: score {} (new record!)", self.score);
        } else {
            log::info!("Game over: score {} (best {})", self.score, self.high_score);
        }
    }

    /// Show a milestone toast, replacing any current one
    pub(crate) fn show_toast(&mut self, message: &'static str) -> u64 {
        let id = self.next_toast_id;
        self.next_toast_id += 1;
        if self.toasts_enabled {
            self.toast = Some(Toast { id, message });
        }
        id
    }

    /// Clear the toast if it is still the one `id` refers to
    ///
    /// A late auto-clear for an older toast is ignored.
    pub fn dismiss_toast(&mut self, id: u64) -> bool {
        match self.toast {
            Some(toast) if toast.id == id => {
                self.toast = None;
                true
            }
            _ => false,
        }
    }

    /// Resize the play area; takes effect on the next tick or start
    pub fn set_play_area(&mut self, area: PlayArea) {
        self.area = area;
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            entity: &self.entity,
            particles: self.particles.as_slice(),
            toast: self.toast.map(|t| t.message),
            game_over_message: self.game_over_message,
            backdrop_period_secs: (3.0 - self.score as f32 * 0.1).max(0.5),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn particles(&self) -> &[Particle] {
        self.particles.as_slice()
    }

    pub fn toast(&self) -> Option<Toast> {
        self.toast
    }

    pub fn game_over_message(&self) -> Option<&'static str> {
        self.game_over_message
    }

    pub fn play_area(&self) -> PlayArea {
        self.area
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
