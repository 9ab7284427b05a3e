//! Board dimensions and spawn tuning.

/// Rows in the reference board.
pub const DEFAULT_ROWS: usize = 4;

/// Columns in the reference board.
pub const DEFAULT_COLS: usize = 4;

/// Number of tiles placed on a fresh board.
pub const STARTING_TILES: usize = 2;

/// Value of a regular spawned tile.
pub const SPAWN_LOW_VALUE: u32 = 2;

/// Value of the rarer spawned tile.
pub const SPAWN_HIGH_VALUE: u32 = 4;

/// Spawn value roll is drawn from `1..=SPAWN_ROLL_SIDES`.
pub const SPAWN_ROLL_SIDES: u32 = 10;

/// Rolls at or below this threshold spawn `SPAWN_LOW_VALUE` (7 in 10 = 70%).
pub const SPAWN_LOW_THRESHOLD: u32 = 7;

/// Seed used when none is supplied.
pub const DEFAULT_SEED: u64 = 42;

/// File name of the score record written next to the game.
pub const SCORE_FILE_NAME: &str = "2048.json";

/// Largest tile a `u32` cell can hold. Two of them never merge.
pub const MAX_TILE: u32 = 1 << 31;
