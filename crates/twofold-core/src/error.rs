//! Error taxonomy for the grid engine.
//!
//! No-op moves and stuck boards are ordinary return values, not errors.
//! Every variant here signals a caller-side contract violation.

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("no empty cell left to spawn a tile into")]
    NoEmptyCell,
    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),
    #[error("invalid tile value {value}: must be 0 or a power of two >= 2")]
    InvalidTile { value: u32 },
}
