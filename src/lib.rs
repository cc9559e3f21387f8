//! Grid Invaders - a fixed-screen shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (play state, collisions, movement, spawns)
//! - `scene`: Axis-aligned item container with overlap queries
//! - `vars`: Typed named tunables loaded from external data
//! - `session`: Outbound score/health/exit event contract
//!
//! The crate owns no rendering, audio, or persistence; an embedder drives
//! [`sim::PlayState::advance`] from its own fixed-timestep loop and reacts to
//! the events the play state emits.

pub mod scene;
pub mod session;
pub mod sim;
pub mod vars;

pub use scene::{CollisionMode, ItemId, Rect, Scene};
pub use session::{GameEvent, GameSession, Outcome, SessionState};
pub use sim::{Dice, GamePhase, Key, KeyEvent, KeyStatus, PcgDice, PlayState, SeqDice};
pub use vars::{Value, VarError, VarStore};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz)
    pub const TICK_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Sprite footprints. The game area is sized in alien-sprite multiples.
    pub const ALIEN_SIZE: Vec2 = Vec2::new(24.0, 16.0);
    pub const PLAYER_SIZE: Vec2 = Vec2::new(26.0, 16.0);
    pub const ROCKET_SIZE: Vec2 = Vec2::new(4.0, 12.0);
    pub const BOMB_SIZE: Vec2 = Vec2::new(6.0, 10.0);

    /// Added to the formation speed on every drop
    pub const DIFFICULTY_STEP: f32 = 5.0;
    /// Sideways shift applied with a drop so the formation clears the border
    /// it just touched before the next scan
    pub const FORMATION_NUDGE: f32 = 1.0;
}
