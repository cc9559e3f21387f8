//! Collision resolution
//!
//! All three passes run before any movement, so overlaps are judged against
//! the previous tick's positions. The rocket pass null-marks hit rockets and
//! compacts the collection once at the end, keeping iteration stable while
//! entities are destroyed mid-scan.

use crate::scene::{CollisionMode, ItemId};
use crate::session::{GameEvent, GameSession};
use crate::sim::state::PlayState;

impl PlayState {
    /// Entities touching a border of the game area without lying fully
    /// inside it. The first live alien found toggles the formation and
    /// requests a drop; one touch is enough, so the scan stops there.
    pub(crate) fn check_border_collisions(&mut self) {
        self.aliens_move_down = false;

        let touching = self
            .area
            .colliding_with_rect(self.area.bounds(), CollisionMode::IntersectNotContain);

        for id in touching {
            if self.is_alien(id) {
                self.aliens_move_left = !self.aliens_move_left;
                self.aliens_move_down = true;
                return;
            } else if self.is_special(id) {
                self.destroy_special();
            } else if self.is_rocket(id) {
                self.rockets.retain(|slot| *slot != Some(id));
                self.area.remove(id);
            } else if self.is_bomb(id) {
                self.remove_bomb(id);
            }
        }
    }

    /// Everything overlapping the player hurts it: aliens die on impact,
    /// bombs are expended, and each match costs a fixed amount of health.
    pub(crate) fn check_player_collisions(&mut self, session: &mut dyn GameSession) {
        let overlapping = self.area.colliding_items(self.player, CollisionMode::Intersect);

        for id in overlapping {
            if self.is_alien(id) {
                self.destroy_alien(id);
            } else if self.is_bomb(id) {
                self.remove_bomb(id);
            }

            session.on_event(GameEvent::HealthDelta(self.tunables.health_damage));
        }
    }

    /// A rocket eliminates at most one target: only the first reported
    /// overlap counts, and only aliens are valid targets.
    pub(crate) fn check_rocket_collisions(&mut self, session: &mut dyn GameSession) {
        for slot in 0..self.rockets.len() {
            let Some(rocket) = self.rockets[slot] else { continue };

            let overlapping = self.area.colliding_items(rocket, CollisionMode::Intersect);
            let Some(&first) = overlapping.first() else { continue };

            if self.is_alien(first) {
                self.destroy_alien(first);
                self.rockets[slot] = None;
                self.area.remove(rocket);
                session.on_event(GameEvent::ScoreDelta(self.tunables.kill_score));
            } else if self.is_special(first) {
                self.destroy_special();
                self.rockets[slot] = None;
                self.area.remove(rocket);
                session.on_event(GameEvent::ScoreDelta(self.tunables.kill_score_special));
            }
        }

        self.rockets.retain(Option::is_some);
    }

    /// Clear the grid slot and drop the alien from the scene
    fn destroy_alien(&mut self, id: ItemId) {
        self.grid.clear_item(id);
        self.area.remove(id);
    }

    fn destroy_special(&mut self) {
        if let Some(id) = self.special.take() {
            self.area.remove(id);
        }
    }

    fn remove_bomb(&mut self, id: ItemId) {
        self.bombs.retain(|bomb| *bomb != id);
        self.area.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::consts;
    use crate::scene::ItemId;
    use crate::sim::state::test_support::{new_state, Recorder};
    use crate::sim::state::PlayState;

    fn fire_rocket_at(state: &mut PlayState, pos: Vec2) -> ItemId {
        let rocket = state.area.add_sprite(consts::ROCKET_SIZE);
        state.area.set_position(rocket, pos);
        state.rockets.push(Some(rocket));
        rocket
    }

    fn drop_bomb_at(state: &mut PlayState, pos: Vec2) -> ItemId {
        let bomb = state.area.add_sprite(consts::BOMB_SIZE);
        state.area.set_position(bomb, pos);
        state.bombs.push(bomb);
        bomb
    }

    #[test]
    fn test_border_toggles_direction_once_for_many_aliens() {
        let mut state = new_state(2, 2);

        // shift the formation so the whole left column pokes past the edge
        for alien in state.grid().alive().collect::<Vec<_>>() {
            let pos = state.area.position(alien).unwrap();
            state.area.set_position(alien, Vec2::new(pos.x - 10.0, pos.y));
        }

        assert!(!state.aliens_move_left);
        state.check_border_collisions();
        assert!(state.aliens_move_left);
        assert!(state.aliens_move_down);
    }

    #[test]
    fn test_border_destroys_rocket_and_bomb() {
        let mut state = new_state(1, 1);

        let rocket = fire_rocket_at(&mut state, Vec2::new(50.0, -4.0));
        let area_h = state.area.size().y;
        let bomb = drop_bomb_at(&mut state, Vec2::new(80.0, area_h - 4.0));

        state.check_border_collisions();

        assert!(state.rocket_ids().is_empty());
        assert_eq!(state.bomb_count(), 0);
        assert!(!state.area.contains(rocket));
        assert!(!state.area.contains(bomb));
    }

    #[test]
    fn test_border_destroys_special_alien() {
        let mut state = new_state(1, 1);

        let special = state.area.add_sprite(consts::ALIEN_SIZE);
        let area_w = state.area.size().x;
        state.area.set_position(special, Vec2::new(area_w - 10.0, 60.0));
        state.special = Some(special);

        state.check_border_collisions();

        assert_eq!(state.special_alien(), None);
        assert!(!state.area.contains(special));
    }

    #[test]
    fn test_border_alien_match_short_circuits() {
        let mut state = new_state(1, 1);

        // alien protrudes on the left, rocket on the top; the alien is
        // reported first and ends the scan, so the rocket survives
        let alien = state.grid().get(0, 0).unwrap();
        state.area.set_position(alien, Vec2::new(-2.0, 40.0));
        fire_rocket_at(&mut state, Vec2::new(50.0, -4.0));

        state.check_border_collisions();

        assert!(state.aliens_move_down);
        assert_eq!(state.rocket_ids().len(), 1);
    }

    #[test]
    fn test_player_hit_by_bomb_takes_damage() {
        let mut state = new_state(1, 1);
        let player_pos = state.area.position(state.player).unwrap();
        let bomb = drop_bomb_at(&mut state, player_pos + Vec2::new(2.0, 2.0));

        let mut session = Recorder::with_lives(3);
        state.check_player_collisions(&mut session);

        assert_eq!(session.health_events(), 1);
        assert_eq!(state.bomb_count(), 0);
        assert!(!state.area.contains(bomb));
    }

    #[test]
    fn test_player_rammed_by_alien() {
        let mut state = new_state(1, 1);
        let alien = state.grid().get(0, 0).unwrap();
        let player_pos = state.area.position(state.player).unwrap();
        state.area.set_position(alien, player_pos);

        let mut session = Recorder::with_lives(3);
        state.check_player_collisions(&mut session);

        assert_eq!(session.health_events(), 1);
        assert_eq!(state.grid().alive_count(), 0);
        assert!(!state.area.contains(alien));
    }

    #[test]
    fn test_player_clear_of_everything_is_unharmed() {
        let mut state = new_state(2, 2);

        let mut session = Recorder::with_lives(3);
        state.check_player_collisions(&mut session);

        assert!(session.events.is_empty());
    }

    #[test]
    fn test_rocket_kills_alien_and_is_purged() {
        let mut state = new_state(3, 2);

        let target = state.grid().get(2, 0).unwrap();
        let target_pos = state.area.position(target).unwrap();
        let rocket = fire_rocket_at(&mut state, target_pos + Vec2::new(4.0, 4.0));

        let mut session = Recorder::with_lives(3);
        state.check_rocket_collisions(&mut session);

        assert_eq!(state.grid().get(2, 0), None);
        assert_eq!(state.grid().alive_count(), 5);
        assert!(state.rocket_ids().is_empty());
        assert!(!state.area.contains(rocket));
        assert_eq!(session.score_events(), vec![10]);
    }

    #[test]
    fn test_rocket_takes_only_first_reported_overlap() {
        let mut state = new_state(1, 1);

        // rocket overlaps both the alien and a bomb; aliens were added to
        // the scene first, so the alien is the first reported match
        let alien = state.grid().get(0, 0).unwrap();
        let alien_pos = state.area.position(alien).unwrap();
        let bomb = drop_bomb_at(&mut state, alien_pos + Vec2::new(2.0, 2.0));
        fire_rocket_at(&mut state, alien_pos + Vec2::new(4.0, 4.0));

        let mut session = Recorder::with_lives(3);
        state.check_rocket_collisions(&mut session);

        assert_eq!(state.grid().alive_count(), 0);
        assert_eq!(session.score_events(), vec![10]);
        // the bomb was not consumed by the same rocket
        assert_eq!(state.bomb_ids(), &[bomb]);
    }

    #[test]
    fn test_rocket_passes_through_bombs() {
        let mut state = new_state(1, 1);

        // only a bomb overlaps: no kill, rocket stays live
        let bomb_pos = Vec2::new(100.0, 100.0);
        drop_bomb_at(&mut state, bomb_pos);
        fire_rocket_at(&mut state, bomb_pos + Vec2::new(1.0, 1.0));

        let mut session = Recorder::with_lives(3);
        state.check_rocket_collisions(&mut session);

        assert_eq!(state.rocket_ids().len(), 1);
        assert_eq!(state.bomb_count(), 1);
        assert!(session.events.is_empty());
    }

    #[test]
    fn test_rocket_kills_special_for_bonus_score() {
        let mut state = new_state(1, 1);

        // move the grid alien out of the rocket's way
        let alien = state.grid().get(0, 0).unwrap();
        state.area.set_position(alien, Vec2::new(200.0, 10.0));

        let special = state.area.add_sprite(consts::ALIEN_SIZE);
        state.area.set_position(special, Vec2::new(60.0, 0.0));
        state.special = Some(special);
        fire_rocket_at(&mut state, Vec2::new(62.0, 2.0));

        let mut session = Recorder::with_lives(3);
        state.check_rocket_collisions(&mut session);

        assert_eq!(state.special_alien(), None);
        assert!(state.rocket_ids().is_empty());
        assert_eq!(session.score_events(), vec![50]);
    }

    #[test]
    fn test_two_rockets_one_alien() {
        let mut state = new_state(1, 1);

        let alien = state.grid().get(0, 0).unwrap();
        let alien_pos = state.area.position(alien).unwrap();
        fire_rocket_at(&mut state, alien_pos + Vec2::new(2.0, 2.0));
        fire_rocket_at(&mut state, alien_pos + Vec2::new(10.0, 2.0));

        let mut session = Recorder::with_lives(3);
        state.check_rocket_collisions(&mut session);

        // the first rocket takes the kill; the second finds nothing left
        assert_eq!(session.score_events(), vec![10]);
        assert_eq!(state.rocket_ids().len(), 1);
    }
}
