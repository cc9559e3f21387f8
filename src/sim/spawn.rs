//! Probabilistic spawning
//!
//! Bombs fall from the frontline of the formation; the bonus alien enters
//! along the top edge when its lane is clear. Draw order is part of the
//! contract: the bomb candidate index is consumed before the probability
//! gate, so a seeded run replays the same decisions.

use glam::Vec2;

use crate::consts::{ALIEN_SIZE, BOMB_SIZE};
use crate::scene::{CollisionMode, Rect};
use crate::sim::state::PlayState;

/// Bomb gate draw range; the configured percentage is scaled by 5 against it
const BOMB_GATE_RANGE: u32 = 500;
const BOMB_GATE_SCALE: u32 = 5;
/// Bonus-alien gate: one exact value out of this range per tick
const SPECIAL_GATE_RANGE: u32 = 2500;

impl PlayState {
    /// Maybe drop one bomb from a random frontline alien
    pub(crate) fn spawn_bombs(&mut self) {
        if self.bombs.len() >= self.tunables.bomb_cap as usize {
            return;
        }

        let frontline = self.grid.frontline();
        if frontline.is_empty() {
            return;
        }

        // candidate drawn before the gate; the draw is consumed either way
        let shooter = frontline[self.dice.roll(frontline.len() as u32) as usize];

        if self.dice.roll(BOMB_GATE_RANGE) >= self.tunables.bomb_probability_pct * BOMB_GATE_SCALE {
            return;
        }

        let Some(shooter_rect) = self.area.rect(shooter) else { return };
        let bomb = self.area.add_sprite(BOMB_SIZE);
        self.area.set_position(
            bomb,
            Vec2::new(shooter_rect.pos.x, shooter_rect.pos.y + shooter_rect.size.y),
        );
        self.bombs.push(bomb);
        log::debug!("bomb away ({} on screen)", self.bombs.len());
    }

    /// Maybe send the bonus alien across the top of the area
    pub(crate) fn spawn_special_alien(&mut self) {
        if self.special.is_some() {
            return;
        }

        if self.dice.roll(SPECIAL_GATE_RANGE) != 1 {
            return;
        }

        // the entry lane is the top band one alien high; anything in it
        // blocks the spawn
        let lane = Rect::new(Vec2::ZERO, Vec2::new(self.area.size().x, ALIEN_SIZE.y));
        if !self.area.colliding_with_rect(lane, CollisionMode::Intersect).is_empty() {
            return;
        }

        let special = self.area.add_sprite(ALIEN_SIZE);
        self.area.set_position(special, Vec2::ZERO);
        self.special = Some(special);
        log::debug!("bonus alien inbound");
    }
}
