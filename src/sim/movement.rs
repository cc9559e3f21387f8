//! Per-tick position updates
//!
//! The formation shares one speed, scaled up by the difficulty accumulator
//! every time it drops a row. Projectiles move on their own tunable speeds.

use glam::Vec2;

use crate::consts::{ALIEN_SIZE, DIFFICULTY_STEP, FORMATION_NUDGE};
use crate::sim::state::PlayState;

impl PlayState {
    /// Advance the formation. A pending drop moves every live alien down one
    /// sprite height and nudges it sideways off the border it just touched;
    /// otherwise the formation slides horizontally.
    pub(crate) fn move_aliens(&mut self, dt: f32) {
        let step = dt * (self.tunables.alien_speed + self.difficulty);

        for alien in self.grid.alive().collect::<Vec<_>>() {
            let Some(mut pos) = self.area.position(alien) else { continue };

            if self.aliens_move_down {
                pos.y += ALIEN_SIZE.y;
                pos.x += if self.aliens_move_left { -FORMATION_NUDGE } else { FORMATION_NUDGE };
            } else {
                pos.x += if self.aliens_move_left { -step } else { step };
            }
            self.area.set_position(alien, pos);
        }

        if self.aliens_move_down {
            self.difficulty += DIFFICULTY_STEP;
            self.aliens_move_down = false;
            log::debug!("formation dropped, difficulty now {}", self.difficulty);
        }

        // the bonus alien crosses the screen rightward at formation speed
        if let Some(special) = self.special {
            if let Some(pos) = self.area.position(special) {
                self.area.set_position(special, pos + Vec2::new(step, 0.0));
            }
        }
    }

    pub(crate) fn move_rockets(&mut self, dt: f32) {
        let step = dt * self.tunables.rocket_speed;

        for rocket in self.rockets.iter().flatten().copied().collect::<Vec<_>>() {
            if let Some(pos) = self.area.position(rocket) {
                self.area.set_position(rocket, pos - Vec2::new(0.0, step));
            }
        }
    }

    pub(crate) fn move_bombs(&mut self, dt: f32) {
        let step = dt * self.tunables.bomb_speed;

        for bomb in self.bombs.clone() {
            if let Some(pos) = self.area.position(bomb) {
                self.area.set_position(bomb, pos + Vec2::new(0.0, step));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts;
    use crate::sim::state::test_support::new_state;

    #[test]
    fn test_formation_slides_with_difficulty() {
        let mut state = new_state(1, 1);
        state.difficulty = 12.0;
        let alien = state.grid().get(0, 0).unwrap();
        let before = state.area.position(alien).unwrap();

        state.move_aliens(1.0);

        // 18 px/s base speed + 12 difficulty, moving right
        let after = state.area.position(alien).unwrap();
        assert_eq!(after, before + Vec2::new(30.0, 0.0));
    }

    #[test]
    fn test_formation_slides_left_when_flagged() {
        let mut state = new_state(1, 1);
        state.aliens_move_left = true;
        let alien = state.grid().get(0, 0).unwrap();
        let before = state.area.position(alien).unwrap();

        state.move_aliens(0.5);

        let after = state.area.position(alien).unwrap();
        assert_eq!(after, before - Vec2::new(9.0, 0.0));
    }

    #[test]
    fn test_drop_steps_down_and_nudges() {
        let mut state = new_state(2, 1);
        state.aliens_move_down = true;
        state.aliens_move_left = true;
        let alien = state.grid().get(0, 0).unwrap();
        let before = state.area.position(alien).unwrap();

        state.move_aliens(1.0);

        let after = state.area.position(alien).unwrap();
        assert_eq!(after, before + Vec2::new(-consts::FORMATION_NUDGE, consts::ALIEN_SIZE.y));
        // the drop consumed the latch and raised the difficulty once
        assert!(!state.aliens_move_down);
        assert_eq!(state.difficulty(), consts::DIFFICULTY_STEP);
    }

    #[test]
    fn test_special_always_moves_right() {
        let mut state = new_state(1, 1);
        state.aliens_move_left = true;

        let special = state.area.add_sprite(consts::ALIEN_SIZE);
        state.area.set_position(special, Vec2::new(10.0, 0.0));
        state.special = Some(special);

        state.move_aliens(1.0);

        let pos = state.area.position(special).unwrap();
        assert_eq!(pos, Vec2::new(28.0, 0.0));
    }

    #[test]
    fn test_rockets_rise_bombs_fall() {
        let mut state = new_state(1, 1);

        let rocket = state.area.add_sprite(consts::ROCKET_SIZE);
        state.area.set_position(rocket, Vec2::new(50.0, 100.0));
        state.rockets.push(Some(rocket));

        let bomb = state.area.add_sprite(consts::BOMB_SIZE);
        state.area.set_position(bomb, Vec2::new(60.0, 40.0));
        state.bombs.push(bomb);

        state.move_rockets(0.1);
        state.move_bombs(0.1);

        assert_eq!(state.area.position(rocket).unwrap(), Vec2::new(50.0, 76.0));
        assert_eq!(state.area.position(bomb).unwrap(), Vec2::new(60.0, 49.0));
    }
}
