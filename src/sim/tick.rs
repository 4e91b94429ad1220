//! One simulation tick
//!
//! Difficulty from the live score, physics step, floor check, then particle
//! decay. Called once per display frame by the driver.

use super::difficulty::Difficulty;
use super::physics;
use super::state::{GameEvent, GamePhase, GameSession};
use crate::highscores::HighScoreStore;

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing, nothing simulated
    Idle,
    /// Simulated, still playing
    Running,
    /// The logo hit the floor this tick
    GameOver,
}

/// Advance the session by one tick
pub fn tick<S: HighScoreStore>(session: &mut GameSession<S>) -> TickOutcome {
    if session.phase != GamePhase::Playing {
        return TickOutcome::Idle;
    }

    session.time_ticks += 1;

    let difficulty = Difficulty::for_score(session.score);
    let area = session.area;
    let step = physics::step(&mut session.entity, &difficulty, &area);

    if let Some(wall) = step.wall {
        session.events.push(GameEvent::WallBounce { wall });
    }

    if step.hit_floor {
        session.end_game();
        return TickOutcome::GameOver;
    }

    session.particles.update();

    log::trace!(
        "tick {}: pos=({:.1}, {:.1}) vel=({:.2}, {:.2})",
        session.time_ticks,
        session.entity.pos.x,
        session.entity.pos.y,
        session.entity.vel.x,
        session.entity.vel.y
    );

    TickOutcome::Running
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::sim::PlayArea;
    use glam::Vec2;

    fn playing_session() -> GameSession<MemoryStore> {
        let mut session = GameSession::new(MemoryStore::new(), 42);
        session.set_play_area(PlayArea::new(800.0, 600.0));
        session.start();
        session
    }

    #[test]
    fn test_idle_outside_playing() {
        let mut session = GameSession::new(MemoryStore::new(), 42);
        let before = *session.entity();
        assert_eq!(tick(&mut session), TickOutcome::Idle);
        assert_eq!(*session.entity(), before);
        assert_eq!(session.time_ticks(), 0);
    }

    #[test]
    fn test_entity_falls_from_spawn() {
        let mut session = playing_session();
        let start_y = session.entity().pos.y;
        assert_eq!(tick(&mut session), TickOutcome::Running);
        assert!(session.entity().pos.y > start_y);
    }

    #[test]
    fn test_floor_ends_game_and_freezes() {
        let mut session = playing_session();
        session.entity.pos = Vec2::new(300.0, 599.0);
        session.entity.vel = Vec2::new(0.0, 10.0);

        assert_eq!(tick(&mut session), TickOutcome::GameOver);
        assert_eq!(session.phase(), GamePhase::GameOver);

        let frozen = *session.entity();
        for _ in 0..10 {
            assert_eq!(tick(&mut session), TickOutcome::Idle);
        }
        assert_eq!(*session.entity(), frozen);
    }

    #[test]
    fn test_left_wall_through_tick() {
        let mut session = playing_session();
        session.entity.pos = Vec2::new(0.0, 100.0);
        session.entity.vel = Vec2::new(-5.0, 0.0);

        tick(&mut session);
        assert_eq!(session.entity().pos.x, 0.0);
        assert!((session.entity().vel.x - 3.5).abs() < 1e-6);
        assert!(session.drain_events().contains(&GameEvent::WallBounce {
            wall: crate::sim::Wall::Left
        }));
    }

    #[test]
    fn test_unattended_logo_falls_out() {
        let mut session = playing_session();
        let mut ticks = 0;
        while tick(&mut session) != TickOutcome::GameOver {
            ticks += 1;
            assert!(ticks < 1000, "logo never hit the floor");
        }
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_difficulty_follows_live_score() {
        let mut low = playing_session();
        let mut high = playing_session();
        high.score = 40;

        tick(&mut low);
        tick(&mut high);
        assert!(high.entity().vel.y > low.entity().vel.y);
    }
}
