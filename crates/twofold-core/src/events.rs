//! Events emitted by a session for UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::Direction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A slide changed the board.
    Slid { direction: Direction, score_delta: u64 },
    /// A new tile appeared.
    TileSpawned { row: usize, col: usize, value: u32 },
    /// The running score matched or beat the stored best.
    NewBestScore { score: u64 },
    /// A fresh board was dealt.
    RoundStarted { played_round: u64 },
    /// No direction can change the board any more.
    GameOver { score: u64 },
}
