//! twofold-play: headless TWOFOLD driver.
//!
//! Plays seeded games through the game loop with a simple move policy and
//! prints one summary line per game.
//!
//! Usage:
//!   twofold-play --seed 7 --games 10 --policy random
//!   twofold-play --rows 5 --cols 5 --save scores/2048.json --json

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use twofold_core::commands::PlayerCommand;
use twofold_core::constants::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_SEED};
use twofold_core::enums::{Direction, GamePhase};
use twofold_core::state::GameStateSnapshot;
use twofold_engine::{EngineConfig, Grid};
use twofold_session::game_loop::{spawn_game_loop, GameLoopHandle};
use twofold_session::{Session, SessionConfig};

/// Direction preference for the cycling policy.
const CYCLE: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Down,
    Direction::Right,
];

#[derive(Parser, Debug)]
#[command(name = "twofold-play", about = "Headless TWOFOLD games with a simple move policy")]
struct Args {
    /// RNG seed for tile spawns
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: usize,
    /// Number of rounds to play
    #[arg(long, default_value_t = 1)]
    games: u32,
    /// Per-game: stop after this many accepted moves
    #[arg(long, default_value_t = 100_000)]
    max_moves: u32,
    #[arg(long, value_enum, default_value_t = Policy::Cycle)]
    policy: Policy,
    /// Score file holding best score and rounds played
    #[arg(long)]
    save: Option<PathBuf>,
    /// Print each final board as JSON instead of a summary line
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Policy {
    /// Up, Left, Down, Right in turn, skipping directions that cannot move
    Cycle,
    /// Uniform over directions that can move
    Random,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    let config = SessionConfig {
        engine: EngineConfig {
            seed: args.seed,
            rows: args.rows,
            cols: args.cols,
        },
        save_path: args.save.clone(),
    };
    let session = Session::new(config).context("failed to start session")?;
    let handle = spawn_game_loop(session).context("failed to spawn game loop")?;
    let mut snapshot = next(&handle)?;

    // The policy RNG is kept apart from the spawn RNG so both policies see
    // the same spawn stream for a given seed.
    let mut policy_rng = ChaCha8Rng::seed_from_u64(args.seed.wrapping_add(1));

    for game in 1..=args.games {
        if game > 1 {
            snapshot = command(&handle, PlayerCommand::NewGame)?;
        }
        let mut moves = 0u32;
        while snapshot.phase != GamePhase::GameOver && moves < args.max_moves {
            let legal = legal_moves(&snapshot)?;
            let Some(direction) = choose(args.policy, &legal, moves, &mut policy_rng) else {
                break;
            };
            snapshot = command(&handle, PlayerCommand::Slide { direction })?;
            moves += 1;
        }
        report(game, moves, &snapshot, args.json)?;
    }

    let last = command(&handle, PlayerCommand::Quit)?;
    info!(
        "best score {} after {} rounds",
        last.score.best, last.score.played_round
    );
    handle.shutdown();
    Ok(())
}

fn next(handle: &GameLoopHandle) -> Result<GameStateSnapshot> {
    handle
        .next_snapshot()
        .ok_or_else(|| anyhow!("game loop exited unexpectedly"))
}

fn command(handle: &GameLoopHandle, cmd: PlayerCommand) -> Result<GameStateSnapshot> {
    handle
        .send(cmd)
        .map_err(|_| anyhow!("game loop stopped before {cmd:?}"))?;
    next(handle)
}

/// Directions that would change the board in `snapshot`.
fn legal_moves(snapshot: &GameStateSnapshot) -> Result<Vec<Direction>> {
    let grid = Grid::from_rows(&snapshot.grid).context("snapshot holds an invalid board")?;
    Ok(Direction::ALL
        .into_iter()
        .filter(|&d| grid.clone().resolve(d).moved)
        .collect())
}

fn choose(
    policy: Policy,
    legal: &[Direction],
    moves: u32,
    rng: &mut ChaCha8Rng,
) -> Option<Direction> {
    match policy {
        Policy::Cycle => {
            let start = moves as usize % CYCLE.len();
            (0..CYCLE.len())
                .map(|i| CYCLE[(start + i) % CYCLE.len()])
                .find(|d| legal.contains(d))
        }
        Policy::Random => legal.choose(rng).copied(),
    }
}

fn report(game: u32, moves: u32, snapshot: &GameStateSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
    } else {
        let status = if snapshot.phase == GamePhase::GameOver {
            "stuck"
        } else {
            "stopped"
        };
        println!(
            "game {game}: score {} (best {}), max tile {}, {moves} moves, {status}",
            snapshot.score.score,
            snapshot.score.best,
            snapshot.max_tile(),
        );
    }
    Ok(())
}
