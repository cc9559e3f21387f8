//! Play state and core simulation types
//!
//! Everything the tick loop mutates lives here: the alien grid, the
//! projectile collections, the player, formation flags, and the tunables
//! cached from the variable store at construction.

use glam::Vec2;

use crate::consts;
use crate::scene::{ItemId, Scene};
use crate::sim::rng::Dice;
use crate::vars::{VarError, VarStore};

const VAR_ALIEN_ROWS: &str = "g_AlienRows";
const VAR_ALIEN_COLUMNS: &str = "g_AlienColumns";
const VAR_PLAYER_SPEED: &str = "g_PlayerSpeedPxSec";
const VAR_ALIEN_SPEED: &str = "g_AlienSpeedPxSec";
const VAR_ROCKET_SPEED: &str = "g_RocketSpeedPxSec";
const VAR_BOMB_SPEED: &str = "g_BombSpeedPxSec";
const VAR_BOMB_MAX_ON_SCREEN: &str = "g_BombMaxOnScreen";
const VAR_BOMB_PROBABILITY: &str = "g_BombProbabilityPercentage";
const VAR_HEALTH_DAMAGE: &str = "g_HealthDamage";
const VAR_KILL_SCORE: &str = "g_KillScore";
const VAR_KILL_SCORE_SPECIAL: &str = "g_KillScoreSpecial";
const VAR_AREA_H_MULT: &str = "g_GameAreaHMult";
const VAR_AREA_V_MULT: &str = "g_GameAreaVMult";

/// Tunables resolved once at construction so the tick path never touches the
/// variable store
#[derive(Debug, Clone)]
pub(crate) struct Tunables {
    pub(crate) alien_rows: u32,
    pub(crate) alien_columns: u32,
    pub(crate) player_speed: f32,
    pub(crate) alien_speed: f32,
    pub(crate) rocket_speed: f32,
    pub(crate) bomb_speed: f32,
    pub(crate) bomb_cap: u32,
    pub(crate) bomb_probability_pct: u32,
    pub(crate) health_damage: u32,
    pub(crate) kill_score: u32,
    pub(crate) kill_score_special: u32,
    pub(crate) area_h_mult: u32,
    pub(crate) area_v_mult: u32,
}

impl Tunables {
    pub(crate) fn from_vars(vars: &VarStore) -> Result<Self, VarError> {
        Ok(Self {
            alien_rows: vars.uint(VAR_ALIEN_ROWS)?,
            alien_columns: vars.uint(VAR_ALIEN_COLUMNS)?,
            player_speed: vars.float(VAR_PLAYER_SPEED)?,
            alien_speed: vars.float(VAR_ALIEN_SPEED)?,
            rocket_speed: vars.float(VAR_ROCKET_SPEED)?,
            bomb_speed: vars.float(VAR_BOMB_SPEED)?,
            bomb_cap: vars.uint(VAR_BOMB_MAX_ON_SCREEN)?,
            bomb_probability_pct: vars.uint(VAR_BOMB_PROBABILITY)?,
            health_damage: vars.uint(VAR_HEALTH_DAMAGE)?,
            kill_score: vars.uint(VAR_KILL_SCORE)?,
            kill_score_special: vars.uint(VAR_KILL_SCORE_SPECIAL)?,
            area_h_mult: vars.uint(VAR_AREA_H_MULT)?,
            area_v_mult: vars.uint(VAR_AREA_V_MULT)?,
        })
    }
}

/// Fixed-size alien formation. A slot is `None` once its alien is destroyed;
/// the length never changes so positional queries stay valid.
#[derive(Debug, Clone)]
pub struct AlienGrid {
    rows: u32,
    columns: u32,
    slots: Vec<Option<ItemId>>,
}

impl AlienGrid {
    fn with_capacity(rows: u32, columns: u32) -> Self {
        Self {
            rows,
            columns,
            slots: Vec::with_capacity((rows * columns) as usize),
        }
    }

    fn push(&mut self, alien: ItemId) {
        debug_assert!(self.slots.len() < (self.rows * self.columns) as usize);
        self.slots.push(Some(alien));
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Total slot count; constant for the lifetime of the grid
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots are laid out as `row + column * rows`
    fn index(&self, row: u32, column: u32) -> usize {
        (row + column * self.rows) as usize
    }

    pub fn get(&self, row: u32, column: u32) -> Option<ItemId> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.slots[self.index(row, column)]
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.slots.contains(&Some(id))
    }

    /// Clear the slot holding `id`, preserving grid length
    pub(crate) fn clear_item(&mut self, id: ItemId) -> bool {
        match self.slots.iter_mut().find(|slot| **slot == Some(id)) {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    pub fn alive(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn alive_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Per column, the alive alien nearest the bottom row; these are the
    /// aliens with a clear line of fire
    pub fn frontline(&self) -> Vec<ItemId> {
        let mut front = Vec::new();
        for column in 0..self.columns {
            let bottom_most = (0..self.rows)
                .rev()
                .find_map(|row| self.slots[self.index(row, column)]);
            if let Some(alien) = bottom_most {
                front.push(alien);
            }
        }
        front
    }
}

/// Lifecycle of the play state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Ticks and input are being processed
    Running,
    /// A terminal event has been raised; ticks and input are ignored
    Terminated,
}

/// The in-game play state: owns the game-area and HUD scenes and every
/// entity collection, and carries the per-tick formation flags
pub struct PlayState {
    pub(crate) tunables: Tunables,
    pub(crate) area: Scene,
    hud: Scene,
    pub(crate) grid: AlienGrid,
    pub(crate) special: Option<ItemId>,
    pub(crate) rockets: Vec<Option<ItemId>>,
    pub(crate) bombs: Vec<ItemId>,
    pub(crate) player: ItemId,
    score_text: ItemId,
    health_text: ItemId,
    pub(crate) aliens_move_left: bool,
    pub(crate) aliens_move_down: bool,
    pub(crate) difficulty: f32,
    pub(crate) phase: GamePhase,
    pub(crate) dice: Box<dyn Dice>,
}

impl PlayState {
    /// Build the play state from the variable store. Fails hard if any
    /// required tunable is missing or mistyped.
    pub fn new(vars: &VarStore, dice: Box<dyn Dice>) -> Result<Self, VarError> {
        let tunables = Tunables::from_vars(vars)?;

        let area_size = Vec2::new(
            consts::ALIEN_SIZE.x * tunables.area_h_mult as f32,
            consts::ALIEN_SIZE.y * tunables.area_v_mult as f32,
        );
        let mut area = Scene::new(area_size);

        let mut grid = AlienGrid::with_capacity(tunables.alien_rows, tunables.alien_columns);
        for column in 0..tunables.alien_columns {
            for row in 0..tunables.alien_rows {
                let alien = area.add_sprite(consts::ALIEN_SIZE);
                area.set_position(
                    alien,
                    Vec2::new(
                        column as f32 * consts::ALIEN_SIZE.x,
                        row as f32 * consts::ALIEN_SIZE.y,
                    ),
                );
                grid.push(alien);
            }
        }

        let player = area.add_sprite(consts::PLAYER_SIZE);
        area.set_position(
            player,
            Vec2::new(area_size.x / 2.0, area_size.y - consts::PLAYER_SIZE.y),
        );

        let mut hud = Scene::new(area_size);
        let score_text = hud.add_text(Vec2::new(0.0, 2.0));
        let health_text = hud.add_text(Vec2::new(0.0, area_size.y - 14.0));

        log::info!(
            "play state up: {}x{} aliens in a {}x{} area",
            tunables.alien_rows,
            tunables.alien_columns,
            area_size.x,
            area_size.y
        );

        Ok(Self {
            tunables,
            area,
            hud,
            grid,
            special: None,
            rockets: Vec::new(),
            bombs: Vec::new(),
            player,
            score_text,
            health_text,
            aliens_move_left: false,
            aliens_move_down: false,
            difficulty: 0.0,
            phase: GamePhase::Running,
            dice,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The game-area scene; render layers read item positions from here
    pub fn area(&self) -> &Scene {
        &self.area
    }

    pub fn grid(&self) -> &AlienGrid {
        &self.grid
    }

    pub fn player(&self) -> ItemId {
        self.player
    }

    pub fn special_alien(&self) -> Option<ItemId> {
        self.special
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    /// Live rockets, oldest first
    pub fn rocket_ids(&self) -> Vec<ItemId> {
        self.rockets.iter().flatten().copied().collect()
    }

    pub fn bomb_count(&self) -> usize {
        self.bombs.len()
    }

    pub fn bomb_ids(&self) -> &[ItemId] {
        &self.bombs
    }

    pub fn score_label(&self) -> &str {
        self.hud.text(self.score_text).unwrap_or_default()
    }

    pub fn health_label(&self) -> &str {
        self.hud.text(self.health_text).unwrap_or_default()
    }

    pub(crate) fn set_score_label(&mut self, text: &str) {
        let id = self.score_text;
        self.hud.set_text(id, text);
    }

    pub(crate) fn set_health_label(&mut self, text: &str) {
        let id = self.health_text;
        self.hud.set_text(id, text);
    }

    // Entity classification. An id belongs to at most one collection.

    pub(crate) fn is_alien(&self, id: ItemId) -> bool {
        self.grid.contains(id)
    }

    pub(crate) fn is_special(&self, id: ItemId) -> bool {
        self.special == Some(id)
    }

    pub(crate) fn is_rocket(&self, id: ItemId) -> bool {
        self.rockets.contains(&Some(id))
    }

    pub(crate) fn is_bomb(&self, id: ItemId) -> bool {
        self.bombs.contains(&id)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::session::{GameEvent, GameSession, Outcome};
    use crate::sim::rng::PcgDice;
    use crate::vars::Value;

    /// Session stub that records every event the play state emits
    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        pub(crate) events: Vec<GameEvent>,
        pub(crate) lives: i32,
    }

    impl Recorder {
        pub(crate) fn with_lives(lives: i32) -> Self {
            Self { events: Vec::new(), lives }
        }

        pub(crate) fn score_events(&self) -> Vec<u32> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    GameEvent::ScoreDelta(points) => Some(*points),
                    _ => None,
                })
                .collect()
        }

        pub(crate) fn health_events(&self) -> usize {
            self.events
                .iter()
                .filter(|e| matches!(e, GameEvent::HealthDelta(_)))
                .count()
        }

        pub(crate) fn exits(&self) -> Vec<Outcome> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    GameEvent::Exit(outcome) => Some(*outcome),
                    _ => None,
                })
                .collect()
        }
    }

    impl GameSession for Recorder {
        fn score(&self) -> u32 {
            self.events
                .iter()
                .filter_map(|e| match e {
                    GameEvent::ScoreDelta(points) => Some(*points),
                    _ => None,
                })
                .sum()
        }

        fn lives(&self) -> i32 {
            self.lives
        }

        fn on_event(&mut self, event: GameEvent) {
            self.events.push(event);
        }
    }

    /// A complete variable set with a configurable grid shape
    pub(crate) fn test_vars(rows: u32, columns: u32) -> VarStore {
        let mut vars = VarStore::new();
        vars.set(VAR_ALIEN_ROWS, Value::UInt(rows));
        vars.set(VAR_ALIEN_COLUMNS, Value::UInt(columns));
        vars.set(VAR_PLAYER_SPEED, Value::Float(160.0));
        vars.set(VAR_ALIEN_SPEED, Value::Float(18.0));
        vars.set(VAR_ROCKET_SPEED, Value::Float(240.0));
        vars.set(VAR_BOMB_SPEED, Value::Float(90.0));
        vars.set(VAR_BOMB_MAX_ON_SCREEN, Value::UInt(3));
        vars.set(VAR_BOMB_PROBABILITY, Value::UInt(12));
        vars.set(VAR_HEALTH_DAMAGE, Value::UInt(1));
        vars.set(VAR_KILL_SCORE, Value::UInt(10));
        vars.set(VAR_KILL_SCORE_SPECIAL, Value::UInt(50));
        vars.set(VAR_AREA_H_MULT, Value::UInt(10));
        vars.set(VAR_AREA_V_MULT, Value::UInt(12));
        vars
    }

    pub(crate) fn new_state(rows: u32, columns: u32) -> PlayState {
        PlayState::new(&test_vars(rows, columns), Box::new(PcgDice::seeded(1))).unwrap()
    }
}
