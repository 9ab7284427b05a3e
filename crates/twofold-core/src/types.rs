//! Small value types returned by engine operations.

use serde::{Deserialize, Serialize};

/// Result of resolving one direction command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Whether any cell changed position or value.
    pub moved: bool,
    /// Sum of the values of all tiles created by merges.
    pub score_delta: u64,
}

/// A tile placed by a spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedTile {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

impl MoveOutcome {
    /// Outcome of a move that changed nothing.
    pub const NONE: MoveOutcome = MoveOutcome {
        moved: false,
        score_delta: 0,
    };
}
