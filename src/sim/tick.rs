//! Fixed-tick orchestration
//!
//! One `advance` call is one timer tick. The order inside it matters:
//! collisions are resolved against the previous tick's positions before any
//! movement is applied, and spawns run after movement so a fresh entity
//! cannot re-collide within the tick that created it.

use glam::Vec2;

use crate::consts::ROCKET_SIZE;
use crate::session::{GameEvent, GameSession, Outcome};
use crate::sim::state::{GamePhase, PlayState};

/// Player-relevant keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Fire,
    Left,
    Right,
}

/// Sampled state of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    /// Went down since the last sample
    Press,
    /// Still down
    Held,
    /// Not down; carries no action
    Inactive,
}

/// One input sample from the embedder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub status: KeyStatus,
}

impl PlayState {
    /// Advance the play state by one fixed timestep
    pub fn advance(&mut self, dt: f32, session: &mut dyn GameSession) {
        if self.phase == GamePhase::Terminated {
            return;
        }

        self.check_border_collisions();
        self.check_player_collisions(session);
        self.check_rocket_collisions(session);

        self.move_aliens(dt);
        self.move_rockets(dt);
        self.move_bombs(dt);

        self.spawn_bombs();
        self.spawn_special_alien();

        self.update_score(session);
        self.update_health(session);

        self.check_victory_conditions(session);
    }

    /// React to an input sample. `dt` is the time since the previous sample.
    pub fn handle_input(&mut self, event: KeyEvent, dt: f32) {
        if self.phase == GamePhase::Terminated {
            return;
        }
        if event.status == KeyStatus::Inactive {
            return;
        }

        match event.key {
            Key::Fire => {
                if event.status == KeyStatus::Press {
                    self.fire_rocket();
                }
            }
            Key::Left => {
                if let Some(pos) = self.area.position(self.player) {
                    let x = (pos.x - dt * self.tunables.player_speed).max(0.0);
                    self.area.set_position(self.player, Vec2::new(x, pos.y));
                }
            }
            Key::Right => {
                if let Some(rect) = self.area.rect(self.player) {
                    let max_x = self.area.size().x - rect.size.x;
                    let x = (rect.pos.x + dt * self.tunables.player_speed).min(max_x);
                    self.area.set_position(self.player, Vec2::new(x, rect.pos.y));
                }
            }
        }
    }

    /// One rocket, launched from the player's top edge
    fn fire_rocket(&mut self) {
        let Some(rect) = self.area.rect(self.player) else { return };
        let rocket = self.area.add_sprite(ROCKET_SIZE);
        self.area.set_position(rocket, rect.pos - Vec2::new(0.0, rect.size.y));
        self.rockets.push(Some(rocket));
    }

    fn update_score(&mut self, session: &dyn GameSession) {
        self.set_score_label(&format!("SCORE: {}", session.score()));
    }

    fn update_health(&mut self, session: &dyn GameSession) {
        self.set_health_label(&format!("HEALTH: {}", session.lives()));
    }

    /// Terminal checks, in fixed order. More than one may fire in the same
    /// tick; the session is expected to keep the first outcome it sees.
    fn check_victory_conditions(&mut self, session: &mut dyn GameSession) {
        let mut terminal = false;

        if self.grid.alive_count() == 0 {
            session.on_event(GameEvent::Exit(Outcome::Won));
            terminal = true;
        }

        if session.lives() <= 0 {
            session.on_event(GameEvent::Exit(Outcome::Lost));
            terminal = true;
        }

        if self.any_alien_bypassed() {
            session.on_event(GameEvent::Exit(Outcome::Lost));
            terminal = true;
        }

        if terminal {
            self.phase = GamePhase::Terminated;
            log::info!("play state terminated");
        }
    }

    /// Whether any live alien has passed the player's row
    fn any_alien_bypassed(&self) -> bool {
        let Some(player_pos) = self.area.position(self.player) else {
            return false;
        };
        self.grid
            .alive()
            .any(|alien| self.area.position(alien).is_some_and(|pos| pos.y > player_pos.y))
    }
}
