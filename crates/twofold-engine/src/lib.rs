//! Grid engine for TWOFOLD.
//!
//! Owns the board, resolves slides and merges, spawns tiles from a seedable
//! RNG and answers terminal-state queries. Completely headless, enabling
//! deterministic testing.

pub mod engine;
pub mod grid;
pub mod spawn;

pub use engine::{EngineConfig, GridEngine};
pub use grid::Grid;
pub use twofold_core as core;
