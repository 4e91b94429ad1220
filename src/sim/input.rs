//! Tap handling
//!
//! A tap on the logo scores a point, may raise a milestone toast, kicks the
//! logo upward and spawns a "+1". Taps outside PLAYING are ignored.

use super::difficulty::Difficulty;
use super::messages::milestone_message;
use super::physics;
use super::state::{GameEvent, GamePhase, GameSession};
use crate::highscores::HighScoreStore;

impl<S: HighScoreStore> GameSession<S> {
    /// Handle a tap on the logo. Returns false if it was ignored.
    pub fn tap(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }

        self.score += 1;
        self.high_score = self.high_score.max(self.score);
        self.events.push(GameEvent::Scored { score: self.score });

        if let Some(message) = milestone_message(self.score) {
            let toast_id = self.show_toast(message);
            log::info!("Milestone {}: {}", self.score, message);
            self.events.push(GameEvent::Milestone {
                score: self.score,
                message,
                toast_id,
            });
        }

        // Difficulty uses the score including this tap
        let difficulty = Difficulty::for_score(self.score);
        physics::apply_impulse(&mut self.entity, &difficulty, &mut self.rng);

        if self.particles_enabled {
            self.particles.spawn(self.entity.top_center());
        }

        true
    }
}
