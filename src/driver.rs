//! Runs a session from host frames, taps, and timers
//!
//! The host owns real time. It calls `start`/`tap` on input, `frame` from its
//! frame callback with the ticket it was given, and `poll_timers` whenever a
//! timer it scheduled for `toast_deadline` fires.

use crate::clock::{FrameClock, FrameTicket, ToastTimer};
use crate::consts::TOAST_DURATION_SECS;
use crate::highscores::HighScoreStore;
use crate::sim::{GameEvent, GamePhase, GameSession, PlayArea, TickOutcome, tick};

pub struct GameDriver<S: HighScoreStore> {
    session: GameSession<S>,
    clock: FrameClock,
    toast_timer: ToastTimer,
    events: Vec<GameEvent>,
}

impl<S: HighScoreStore> GameDriver<S> {
    pub fn new(session: GameSession<S>) -> Self {
        Self {
            session,
            clock: FrameClock::new(),
            toast_timer: ToastTimer::new(),
            events: Vec::new(),
        }
    }

    /// Start or restart. Returns the first frame to request, or None if a
    /// game is already running.
    pub fn start(&mut self, now: f64) -> Option<FrameTicket> {
        if !self.session.start() {
            return None;
        }
        self.toast_timer.cancel();
        self.collect_events(now);
        Some(self.clock.request())
    }

    /// Forward a tap on the logo
    pub fn tap(&mut self, now: f64) -> bool {
        let applied = self.session.tap();
        self.collect_events(now);
        applied
    }

    /// Run one tick for a frame callback
    ///
    /// Returns the ticket for the next frame, or None when the loop should
    /// stop (game over, stopped externally, or a stale callback).
    pub fn frame(&mut self, ticket: FrameTicket, now: f64) -> Option<FrameTicket> {
        self.poll_timers(now);

        if !self.clock.accept(ticket) {
            return None;
        }

        let outcome = tick(&mut self.session);
        self.collect_events(now);

        match outcome {
            TickOutcome::Running => Some(self.clock.request()),
            TickOutcome::GameOver | TickOutcome::Idle => {
                self.clock.stop();
                None
            }
        }
    }

    /// Clear the toast if its auto-clear is due
    pub fn poll_timers(&mut self, now: f64) {
        if let Some(id) = self.toast_timer.poll(now) {
            self.session.dismiss_toast(id);
        }
    }

    /// When the host should next call `poll_timers`
    pub fn toast_deadline(&self) -> Option<f64> {
        self.toast_timer.deadline()
    }

    /// External teardown: ends a running game, so no further frames or taps
    /// apply until `start`
    pub fn stop(&mut self, now: f64) {
        self.clock.stop();
        self.toast_timer.cancel();
        if self.session.phase() == GamePhase::Playing {
            self.session.end_game();
            self.collect_events(now);
        }
    }

    pub fn resize(&mut self, area: PlayArea) {
        self.session.set_play_area(area);
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn session(&self) -> &GameSession<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession<S> {
        &mut self.session
    }

    /// Take events gathered since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn collect_events(&mut self, now: f64) {
        for event in self.session.drain_events() {
            if let GameEvent::Milestone { toast_id, .. } = event {
                self.toast_timer.arm(toast_id, now + TOAST_DURATION_SECS);
            }
            self.events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use glam::Vec2;

    const FRAME: f64 = 1.0 / 60.0;

    fn driver() -> GameDriver<MemoryStore> {
        let mut driver = GameDriver::new(GameSession::new(MemoryStore::new(), 5));
        driver.resize(PlayArea::new(800.0, 600.0));
        driver
    }

    /// Run frames until the loop stops, returning the frame count
    fn run_out(driver: &mut GameDriver<MemoryStore>, mut ticket: FrameTicket, mut now: f64) -> u32 {
        let mut frames = 0;
        while let Some(next) = driver.frame(ticket, now) {
            ticket = next;
            now += FRAME;
            frames += 1;
            assert!(frames < 10_000);
        }
        frames
    }

    #[test]
    fn test_loop_stops_on_game_over() {
        let mut driver = driver();
        let ticket = driver.start(0.0).unwrap();
        run_out(&mut driver, ticket, 0.0);

        assert_eq!(driver.session().phase(), GamePhase::GameOver);
        assert!(!driver.is_running());
        assert!(
            driver
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }))
        );
    }

    #[test]
    fn test_start_while_running_refused() {
        let mut driver = driver();
        assert!(driver.start(0.0).is_some());
        assert!(driver.start(0.1).is_none());
    }

    #[test]
    fn test_stale_frame_after_stop() {
        let mut driver = driver();
        let ticket = driver.start(0.0).unwrap();
        driver.stop(0.0);

        let before = *driver.session().entity();
        assert!(driver.frame(ticket, FRAME).is_none());
        assert_eq!(*driver.session().entity(), before);
    }

    #[test]
    fn test_stale_frame_from_previous_game() {
        let mut driver = driver();
        let first = driver.start(0.0).unwrap();
        let second = driver.frame(first, FRAME).unwrap();
        run_out(&mut driver, second, 2.0 * FRAME);

        let fresh = driver.start(10.0).unwrap();
        // Ticket from the finished game is rejected
        assert!(driver.frame(second, 10.0).is_none());
        assert_eq!(driver.session().time_ticks(), 0);
        assert!(driver.frame(fresh, 10.0 + FRAME).is_some());
        assert_eq!(driver.session().time_ticks(), 1);
    }

    #[test]
    fn test_toast_auto_clears() {
        let mut driver = driver();
        let mut ticket = driver.start(0.0).unwrap();
        for _ in 0..5 {
            driver.tap(1.0);
        }
        assert!(driver.session().toast().is_some());
        assert_eq!(driver.toast_deadline(), Some(1.0 + TOAST_DURATION_SECS));

        driver.session_mut().entity.pos = Vec2::new(350.0, 100.0);
        ticket = driver.frame(ticket, 3.0).unwrap();
        assert!(driver.session().toast().is_some());

        driver.frame(ticket, 3.5);
        assert!(driver.session().toast().is_none());
    }

    #[test]
    fn test_newer_toast_survives_older_deadline() {
        let mut driver = driver();
        driver.start(0.0);
        for _ in 0..5 {
            driver.tap(0.0);
        }
        // Second milestone at t=2.0 pushes the clear to 4.5
        for _ in 0..5 {
            driver.tap(2.0);
        }

        driver.poll_timers(2.6);
        assert!(driver.session().toast().is_some());
        driver.poll_timers(4.5);
        assert!(driver.session().toast().is_none());
    }

    #[test]
    fn test_toast_clears_after_game_over() {
        let mut driver = driver();
        let ticket = driver.start(0.0).unwrap();
        for _ in 0..5 {
            driver.tap(0.0);
        }
        run_out(&mut driver, ticket, 0.0);
        assert!(!driver.is_running());

        // Host timer fires with no frames running
        driver.poll_timers(3.0);
        assert!(driver.session().toast().is_none());
    }

    #[test]
    fn test_restart_cancels_toast_timer() {
        let mut driver = driver();
        let ticket = driver.start(0.0).unwrap();
        for _ in 0..5 {
            driver.tap(0.0);
        }
        run_out(&mut driver, ticket, 0.0);
        driver.start(1.0);
        assert_eq!(driver.toast_deadline(), None);
        assert!(driver.session().toast().is_none());
    }

    #[test]
    fn test_stop_ends_running_game() {
        let mut driver = driver();
        let ticket = driver.start(0.0).unwrap();
        driver.tap(0.05);
        driver.drain_events();

        driver.stop(0.1);
        assert_eq!(driver.session().phase(), GamePhase::GameOver);
        assert!(!driver.is_running());
        assert_eq!(
            driver.drain_events(),
            vec![GameEvent::GameOver {
                score: 1,
                new_record: true
            }]
        );

        // Logo is no longer simulated, so taps do nothing
        assert!(!driver.tap(0.2));
        assert_eq!(driver.session().score(), 1);
        assert!(driver.frame(ticket, 0.2).is_none());

        // A fresh game can start after teardown
        let fresh = driver.start(0.3).unwrap();
        assert_eq!(driver.session().phase(), GamePhase::Playing);
        assert_eq!(driver.session().score(), 0);
        assert!(driver.frame(fresh, 0.3 + FRAME).is_some());
    }

    #[test]
    fn test_stop_outside_game_keeps_phase() {
        let mut driver = driver();
        driver.stop(0.0);
        assert_eq!(driver.session().phase(), GamePhase::Start);
        assert!(driver.drain_events().is_empty());
        assert!(driver.start(0.1).is_some());
    }
}
