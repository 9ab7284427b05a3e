//! Session layer for TWOFOLD.
//!
//! Wraps a `GridEngine` with everything a front-end needs around it: the
//! round counter, best-score bookkeeping persisted to a JSON file, the game
//! phase, and a single-owner game loop thread fed over a channel.

pub mod game_loop;
pub mod persistence;
pub mod score_book;
pub mod session;

pub use session::{Session, SessionConfig, SessionError};
pub use twofold_core as core;
