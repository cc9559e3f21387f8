//! Outbound event contract
//!
//! Score and lives belong to the embedding session, not to the play state.
//! The simulation reads them back for the HUD and pushes deltas and terminal
//! events outward through [`GameSession`].

use serde::{Deserialize, Serialize};

/// How a play session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Events the play state emits toward the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Points earned from a kill
    ScoreDelta(u32),
    /// Damage taken by the player
    HealthDelta(u32),
    /// Terminal outcome; may be emitted more than once in the final tick,
    /// receivers must treat repeats as idempotent
    Exit(Outcome),
}

/// The session collaborator the play state talks to
pub trait GameSession {
    fn score(&self) -> u32;
    fn lives(&self) -> i32;
    fn on_event(&mut self, event: GameEvent);
}

/// Ready-made session: applies deltas, keeps the first terminal outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    score: u32,
    lives: i32,
    outcome: Option<Outcome>,
}

impl SessionState {
    pub fn new(lives: i32) -> Self {
        Self { score: 0, lives, outcome: None }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(3)
    }
}

impl GameSession for SessionState {
    fn score(&self) -> u32 {
        self.score
    }

    fn lives(&self) -> i32 {
        self.lives
    }

    fn on_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::ScoreDelta(points) => self.score += points,
            GameEvent::HealthDelta(damage) => self.lives -= damage as i32,
            GameEvent::Exit(outcome) => {
                if self.outcome.is_none() {
                    self.outcome = Some(outcome);
                }
            }
        }
    }
}
