//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded, injectable randomness only
//! - Stable iteration and query order
//! - No rendering or platform dependencies

pub mod collision;
pub mod movement;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use rng::{Dice, PcgDice, SeqDice};
pub use state::{AlienGrid, GamePhase, PlayState};
pub use tick::{Key, KeyEvent, KeyStatus};
