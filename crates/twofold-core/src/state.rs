//! Game state snapshot: the complete visible state handed to the front-end
//! after each command.

use serde::{Deserialize, Serialize};

use crate::enums::GamePhase;
use crate::events::GameEvent;

/// Complete game state broadcast after each processed command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub phase: GamePhase,
    pub rows: usize,
    pub cols: usize,
    /// Cell values, one inner vector per row. 0 marks an empty cell.
    pub grid: Vec<Vec<u32>>,
    pub score: ScoreView,
    /// True when the board is full and no adjacent pair is equal.
    pub terminal: bool,
    /// Events produced since the previous snapshot.
    pub events: Vec<GameEvent>,
}

/// Score box contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u64,
    pub best: u64,
    pub played_round: u64,
}

impl GameStateSnapshot {
    /// Largest tile on the board, 0 when empty.
    pub fn max_tile(&self) -> u32 {
        self.grid
            .iter()
            .flat_map(|row| row.iter())
            .copied()
            .max()
            .unwrap_or(0)
    }
}
