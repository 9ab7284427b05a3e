//! Grid: fixed-size tile storage and the slide/merge resolution pass.

use twofold_core::constants::MAX_TILE;
use twofold_core::enums::Direction;
use twofold_core::error::EngineError;
use twofold_core::types::MoveOutcome;

/// Row-major board of tile values. 0 is an empty cell; every other value is
/// a power of two >= 2.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

/// Whether `value` may sit in a cell.
pub fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

/// Value produced by merging two `value` tiles, or `None` when `value` is
/// `MAX_TILE` and the pair has to stay apart.
fn merged_value(value: u32) -> Option<u32> {
    (value < MAX_TILE).then(|| value * 2)
}

impl Grid {
    /// Create an empty `rows` x `cols` grid.
    pub fn new(rows: usize, cols: usize) -> Result<Self, EngineError> {
        // Cell count must also fit a `Vec<u32>` allocation.
        let len = rows
            .checked_mul(cols)
            .filter(|&len| len > 0 && len <= isize::MAX as usize / 4)
            .ok_or(EngineError::InvalidDimensions { rows, cols })?;
        Ok(Self {
            rows,
            cols,
            cells: vec![0; len],
        })
    }

    /// Build a grid from explicit rows. All rows must have the same non-zero
    /// length and every value must be a valid tile.
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self, EngineError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 || rows.iter().any(|r| r.len() != width) {
            return Err(EngineError::InvalidDimensions {
                rows: height,
                cols: width,
            });
        }
        if let Some(&value) = rows.iter().flatten().find(|&&v| !is_valid_tile(v)) {
            return Err(EngineError::InvalidTile { value });
        }
        Ok(Self {
            rows: height,
            cols: width,
            cells: rows.concat(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Raw cell values, row-major.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Value at `(row, col)`, or `None` outside the board.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.rows && col < self.cols {
            Some(self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// Copy of the board as one vector per row.
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.cells.chunks(self.cols).map(<[u32]>::to_vec).collect()
    }

    /// Coordinates of every empty cell, row-major.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(i, _)| (i / self.cols, i % self.cols))
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Number of occupied cells.
    pub fn tile_count(&self) -> usize {
        self.cells.len() - self.empty_count()
    }

    /// Sum of all tile values. Slides and merges never change it.
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// True iff every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// True iff two horizontally or vertically adjacent cells hold the same
    /// non-zero value below `MAX_TILE`. Diagonal neighbours never count.
    pub fn has_any_mergeable_pair(&self) -> bool {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let value = self.cells[self.index(row, col)];
                if value == 0 || merged_value(value).is_none() {
                    continue;
                }
                if col + 1 < self.cols && self.cells[self.index(row, col + 1)] == value {
                    return true;
                }
                if row + 1 < self.rows && self.cells[self.index(row + 1, col)] == value {
                    return true;
                }
            }
        }
        false
    }

    /// Full board with no adjacent equal pair: no direction can change it.
    pub fn is_terminal(&self) -> bool {
        self.is_full() && !self.has_any_mergeable_pair()
    }

    /// Slide every tile toward `direction`, merging equal neighbours.
    ///
    /// Tiles are visited from the edge they travel toward backward, so a tile
    /// that has come to rest is never revisited. Each tile steps one cell at a
    /// time: into an empty cell it keeps going; onto an equal tile it merges
    /// and stops; otherwise it stops. A cell produced by a merge is frozen for
    /// the rest of the pass, so `[2, 2, 2, 0]` slid left becomes `[4, 2, 0, 0]`.
    /// A pair of `MAX_TILE`s blocks like unequal tiles.
    pub fn resolve(&mut self, direction: Direction) -> MoveOutcome {
        let (d_row, d_col) = direction.delta();
        let mut merged = vec![false; self.cells.len()];
        let mut outcome = MoveOutcome::NONE;

        for (row, col) in self.scan_order(direction) {
            let mut here = self.index(row, col);
            if self.cells[here] == 0 {
                continue;
            }
            let (mut r, mut c) = (row, col);

            // Bounded by the line length: every iteration either advances one
            // cell toward the edge or exits.
            while let Some((next_r, next_c)) = self.neighbour(r, c, d_row, d_col) {
                let next = self.index(next_r, next_c);
                let value = self.cells[here];
                if self.cells[next] == 0 {
                    self.cells[next] = value;
                    self.cells[here] = 0;
                    outcome.moved = true;
                    (r, c, here) = (next_r, next_c, next);
                    continue;
                }
                let doubled = (self.cells[next] == value && !merged[next])
                    .then(|| merged_value(value))
                    .flatten();
                if let Some(doubled) = doubled {
                    self.cells[next] = doubled;
                    self.cells[here] = 0;
                    merged[next] = true;
                    outcome.moved = true;
                    outcome.score_delta += u64::from(doubled);
                }
                break;
            }
        }

        outcome
    }

    /// Write a spawned tile into an empty cell.
    pub(crate) fn place(&mut self, row: usize, col: usize, value: u32) {
        debug_assert!(is_valid_tile(value));
        let i = self.index(row, col);
        debug_assert_eq!(self.cells[i], 0, "spawn target must be empty");
        self.cells[i] = value;
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Adjacent cell one step along `(d_row, d_col)`, or `None` past the edge.
    fn neighbour(
        &self,
        row: usize,
        col: usize,
        d_row: isize,
        d_col: isize,
    ) -> Option<(usize, usize)> {
        let r = row.checked_add_signed(d_row)?;
        let c = col.checked_add_signed(d_col)?;
        (r < self.rows && c < self.cols).then_some((r, c))
    }

    /// Cells ordered from the destination edge backward.
    fn scan_order(&self, direction: Direction) -> Vec<(usize, usize)> {
        let rows: Vec<usize> = if direction == Direction::Down {
            (0..self.rows).rev().collect()
        } else {
            (0..self.rows).collect()
        };
        let cols: Vec<usize> = if direction == Direction::Right {
            (0..self.cols).rev().collect()
        } else {
            (0..self.cols).collect()
        };
        rows.iter()
            .flat_map(|&r| cols.iter().map(move |&c| (r, c)))
            .collect()
    }
}
