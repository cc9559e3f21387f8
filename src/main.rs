//! Headless demo entry point
//!
//! Runs a scripted play session at a fixed timestep and logs the outcome.
//! Pass a seed as the first argument to replay a specific run.

use std::error::Error;

use grid_invaders::consts::TICK_DT;
use grid_invaders::{
    GamePhase, GameSession, Key, KeyEvent, KeyStatus, PcgDice, PlayState, SessionState, VarStore,
};

/// Balance defaults; an embedder would load these from its own data files
const DEFAULT_VARS: &str = "\
g_AlienRows,uint,4
g_AlienColumns,uint,8
g_PlayerSpeedPxSec,float,160
g_AlienSpeedPxSec,float,18
g_RocketSpeedPxSec,float,240
g_BombSpeedPxSec,float,90
g_BombMaxOnScreen,uint,3
g_BombProbabilityPercentage,uint,12
g_HealthDamage,uint,1
g_KillScore,uint,10
g_KillScoreSpecial,uint,50
g_GameAreaHMult,uint,10
g_GameAreaVMult,uint,12
";

/// Give up after five simulated minutes
const MAX_TICKS: u64 = 5 * 60 * 60;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);
    log::info!("starting headless run with seed {seed}");

    let vars = VarStore::from_csv_str(DEFAULT_VARS)?;
    let mut state = PlayState::new(&vars, Box::new(PcgDice::seeded(seed)))?;
    let mut session = SessionState::new(3);

    let mut ticks: u64 = 0;
    while state.phase() == GamePhase::Running && ticks < MAX_TICKS {
        // autopilot: sweep back and forth across the area, firing steadily
        let key = if (ticks / 180) % 2 == 0 { Key::Right } else { Key::Left };
        state.handle_input(KeyEvent { key, status: KeyStatus::Held }, TICK_DT);
        if ticks % 24 == 0 {
            state.handle_input(KeyEvent { key: Key::Fire, status: KeyStatus::Press }, TICK_DT);
        }

        state.advance(TICK_DT, &mut session);
        ticks += 1;
    }

    match session.outcome() {
        Some(outcome) => log::info!("run ended after {ticks} ticks: {outcome:?}"),
        None => log::info!("run stopped after {ticks} ticks without an outcome"),
    }
    println!("{} | {}", state.score_label(), state.health_label());
    println!("final score: {}", session.score());

    Ok(())
}
