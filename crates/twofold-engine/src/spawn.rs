//! Spawn policy: where a new tile lands and what value it carries.

use rand::Rng;

use twofold_core::constants::{
    SPAWN_HIGH_VALUE, SPAWN_LOW_THRESHOLD, SPAWN_LOW_VALUE, SPAWN_ROLL_SIDES,
};
use twofold_core::error::EngineError;
use twofold_core::types::SpawnedTile;

use crate::grid::Grid;

/// Roll a spawn value: 2 with probability 0.7, 4 with probability 0.3.
///
/// The roll is always drawn so the RNG stream advances identically whether
/// or not `force_two` is set.
pub fn roll_value<R: Rng + ?Sized>(rng: &mut R, force_two: bool) -> u32 {
    let roll = rng.gen_range(1..=SPAWN_ROLL_SIDES);
    if force_two || roll <= SPAWN_LOW_THRESHOLD {
        SPAWN_LOW_VALUE
    } else {
        SPAWN_HIGH_VALUE
    }
}

/// Pick an empty cell uniformly at random.
pub fn pick_empty_cell<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<(usize, usize)> {
    let empty = grid.empty_cells();
    if empty.is_empty() {
        return None;
    }
    Some(empty[rng.gen_range(0..empty.len())])
}

/// Place one tile into a random empty cell of `grid`.
pub fn spawn_into<R: Rng + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    force_two: bool,
) -> Result<SpawnedTile, EngineError> {
    let (row, col) = pick_empty_cell(grid, rng).ok_or(EngineError::NoEmptyCell)?;
    let value = roll_value(rng, force_two);
    grid.place(row, col, value);
    Ok(SpawnedTile { row, col, value })
}
