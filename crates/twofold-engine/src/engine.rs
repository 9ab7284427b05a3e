//! Grid engine: the game's state machine.
//!
//! `GridEngine` owns the board, the running score and the RNG used for
//! spawns. It resolves direction commands, places new tiles and answers
//! terminal-state queries. The caller decides when to spawn: after a
//! resolve that reports `moved`, never after a no-op.

use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use twofold_core::constants::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_SEED, STARTING_TILES};
use twofold_core::enums::Direction;
use twofold_core::error::EngineError;
use twofold_core::types::{MoveOutcome, SpawnedTile};

use crate::grid::Grid;
use crate::spawn;

/// Configuration for a new engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// RNG seed for determinism. Same seed = same spawns.
    pub seed: u64,
    pub rows: usize,
    pub cols: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

/// The grid engine. Generic over its randomness source so tests and
/// replays can inject any seeded `Rng`.
#[derive(Debug, Clone)]
pub struct GridEngine<R = ChaCha8Rng> {
    grid: Grid,
    score: u64,
    rng: R,
}

impl GridEngine<ChaCha8Rng> {
    /// Create an empty engine seeded from `config`. No tiles are spawned.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_rng(config.rows, config.cols, ChaCha8Rng::seed_from_u64(config.seed))
    }
}

impl<R: Rng> GridEngine<R> {
    /// Create an empty `rows` x `cols` engine drawing spawns from `rng`.
    pub fn with_rng(rows: usize, cols: usize, rng: R) -> Result<Self, EngineError> {
        Ok(Self {
            grid: Grid::new(rows, cols)?,
            score: 0,
            rng,
        })
    }

    /// Clear the board to `rows` x `cols` empty cells and zero the score.
    /// Does not spawn.
    pub fn initialize(&mut self, rows: usize, cols: usize) -> Result<(), EngineError> {
        self.grid = Grid::new(rows, cols)?;
        self.score = 0;
        Ok(())
    }

    /// Clear the board (same dimensions), zero the score and deal the
    /// starting tiles, each forced to 2.
    pub fn reset(&mut self) -> Result<Vec<SpawnedTile>, EngineError> {
        self.initialize(self.grid.rows(), self.grid.cols())?;
        let mut dealt = Vec::with_capacity(STARTING_TILES);
        for _ in 0..STARTING_TILES {
            match self.spawn_tile(true) {
                Ok(tile) => dealt.push(tile),
                // A 1x1 board only has room for one starting tile.
                Err(EngineError::NoEmptyCell) => break,
                Err(e) => return Err(e),
            }
        }
        Ok(dealt)
    }

    /// Replace the board with explicit rows, keeping the score.
    pub fn load_grid(&mut self, rows: &[Vec<u32>]) -> Result<(), EngineError> {
        self.grid = Grid::from_rows(rows)?;
        Ok(())
    }

    /// Place a tile in a uniformly chosen empty cell.
    ///
    /// The value is 2 with probability 0.7 and 4 with probability 0.3, or
    /// always 2 when `force_two` is set. Fails with `NoEmptyCell` on a full
    /// board, leaving it untouched.
    pub fn spawn_tile(&mut self, force_two: bool) -> Result<SpawnedTile, EngineError> {
        let tile = spawn::spawn_into(&mut self.grid, &mut self.rng, force_two)?;
        trace!("spawned {} at ({}, {})", tile.value, tile.row, tile.col);
        Ok(tile)
    }

    /// Slide and merge every tile toward `direction`, adding merged values
    /// to the score. A no-op leaves board and score unchanged.
    pub fn resolve_move(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = self.grid.resolve(direction);
        self.score += outcome.score_delta;
        debug!(
            "resolved {direction}: moved={} score_delta={}",
            outcome.moved, outcome.score_delta
        );
        outcome
    }

    /// Whether `direction` would change the board. Does not mutate.
    pub fn can_move(&self, direction: Direction) -> bool {
        self.grid.clone().resolve(direction).moved
    }

    /// Directions that would change the board, in `Direction::ALL` order.
    pub fn legal_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.can_move(d))
            .collect()
    }

    pub fn is_board_full(&self) -> bool {
        self.grid.is_full()
    }

    pub fn has_any_mergeable_pair(&self) -> bool {
        self.grid.has_any_mergeable_pair()
    }

    /// Full board with no adjacent equal pair. There is no win state.
    pub fn is_terminal(&self) -> bool {
        self.grid.is_terminal()
    }

    /// Read-only view of the board.
    pub fn snapshot_grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_score(&self) -> u64 {
        self.score
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn max_tile(&self) -> u32 {
        self.grid.max_tile()
    }

    pub fn empty_count(&self) -> usize {
        self.grid.empty_count()
    }
}
