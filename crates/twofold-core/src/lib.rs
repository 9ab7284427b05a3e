//! Core types and definitions for TWOFOLD.
//!
//! This crate defines the vocabulary shared across all other crates:
//! directions, commands, state snapshots, events, errors and constants.
//! It has no dependency on any runtime or front-end framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
