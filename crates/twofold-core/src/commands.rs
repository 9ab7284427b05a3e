//! Player commands sent from the front-end to a game session.

use serde::{Deserialize, Serialize};

use crate::enums::Direction;

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Slide every tile toward one edge of the board.
    Slide { direction: Direction },
    /// Start the next round. Keeps the best score and advances the round counter.
    NewGame,
    /// Wipe everything: board, score, best score and round counter.
    ResetGame,
    /// The player is leaving. Counts the current round as played.
    Quit,
}
