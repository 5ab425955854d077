//! Grid representation and operations for sliding-tile puzzles.
//!
//! Generic over the grid dimension (`DIM`). The grid is stored as a fixed
//! `DIM x DIM` array of tile numbers where 0 marks the blank. Every `Grid`
//! value is a permutation of `0..DIM*DIM`: the only way to build one is
//! through validation.

use std::fmt;

use crate::error::InvalidGrid;

/// Largest supported dimension (tile numbers must fit in a `u8`).
pub const MAX_DIM: usize = 15;

/// Upper bound on cell count, used to size scratch arrays without heap allocation.
const MAX_CELLS: usize = MAX_DIM * MAX_DIM;

/// A `(row, col)` cell position.
pub type Position = (usize, usize);

/// Whether the blank counts towards the misplaced-tile heuristic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlankPolicy {
    /// Every cell, blank included, is compared against the goal.
    #[default]
    Count,
    /// The blank is ignored. Never overestimates the remaining moves.
    Skip,
}

/// An N x N sliding puzzle configuration.
///
/// Equality and hashing are structural, so two grids with the same tiles in
/// the same places are interchangeable as seen-set keys.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Grid<const DIM: usize> {
    cells: [[u8; DIM]; DIM],
}

impl<const DIM: usize> Grid<DIM> {
    /// Number of cells in the grid.
    pub const CELLS: usize = {
        assert!(DIM >= 2 && DIM <= MAX_DIM, "DIM must be in 2..=15");
        DIM * DIM
    };

    /// Builds a grid from an array of tiles, rejecting anything that is not
    /// a permutation of `0..DIM*DIM`.
    pub fn new(cells: [[u8; DIM]; DIM]) -> Result<Self, InvalidGrid> {
        validate_permutation::<DIM>(cells.iter().flatten().map(|&value| u32::from(value)))?;
        Ok(Self { cells })
    }

    /// Builds a grid from loosely typed rows, checking the shape first.
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self, InvalidGrid> {
        if rows.len() != DIM {
            return Err(InvalidGrid::WrongRowCount {
                expected: DIM,
                found: rows.len(),
            });
        }
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != DIM {
                return Err(InvalidGrid::WrongRowLength {
                    row: row_index,
                    expected: DIM,
                    found: row.len(),
                });
            }
        }

        validate_permutation::<DIM>(rows.iter().flatten().copied())?;

        let mut cells = [[0u8; DIM]; DIM];
        for (row_index, row) in rows.iter().enumerate() {
            for (col_index, &value) in row.iter().enumerate() {
                // range already checked, value <= MAX_CELLS - 1 fits in u8
                cells[row_index][col_index] = value as u8;
            }
        }
        Ok(Self { cells })
    }

    /// Skips validation so tests can build grids that break the invariant.
    #[cfg(test)]
    pub(crate) fn from_cells_unchecked(cells: [[u8; DIM]; DIM]) -> Self {
        Self { cells }
    }

    /// The canonical solved layout: `1..DIM*DIM` in row-major order, blank last.
    pub fn solved() -> Self {
        let mut cells = [[0u8; DIM]; DIM];
        for (cell_index, cell) in cells.iter_mut().flatten().enumerate() {
            *cell = ((cell_index + 1) % Self::CELLS) as u8;
        }
        Self { cells }
    }

    /// The raw tile array.
    #[inline]
    pub fn cells(&self) -> &[[u8; DIM]; DIM] {
        &self.cells
    }

    /// Tile number at a position.
    #[inline]
    pub fn value_at(&self, (row, col): Position) -> u8 {
        self.cells[row][col]
    }

    /// Tiles in row-major order.
    pub fn values(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().flatten().copied()
    }

    /// Scans row-major for the blank.
    ///
    /// Always `Some` for a validated grid.
    pub fn blank(&self) -> Option<Position> {
        self.cells.iter().enumerate().find_map(|(row, cells)| {
            cells
                .iter()
                .position(|&value| value == 0)
                .map(|col| (row, col))
        })
    }

    /// Returns a new grid with the tiles at `a` and `b` exchanged.
    #[inline]
    pub fn with_swap(&self, a: Position, b: Position) -> Self {
        let mut cells = self.cells;
        cells[a.0][a.1] = self.cells[b.0][b.1];
        cells[b.0][b.1] = self.cells[a.0][a.1];
        Self { cells }
    }

    /// Counts positions whose tile differs from `goal`.
    pub fn misplaced(&self, goal: &Self, policy: BlankPolicy) -> u32 {
        self.values()
            .zip(goal.values())
            .filter(|&(tile, goal_tile)| {
                tile != goal_tile && !(policy == BlankPolicy::Skip && tile == 0)
            })
            .count() as u32
    }

    /// Decides whether `self` can be reached from `other` by sliding tiles.
    ///
    /// Every move is a transposition that also shifts the blank by one cell,
    /// so the parity of the cell permutation between the two grids must
    /// equal the parity of the blank's Manhattan displacement.
    pub fn is_reachable_from(&self, other: &Self) -> bool {
        let mut index_in_other = [0usize; MAX_CELLS];
        for (cell_index, value) in other.values().enumerate() {
            index_in_other[value as usize] = cell_index;
        }

        // cycle decomposition of the cell permutation other -> self
        let mut visited = [false; MAX_CELLS];
        let mut cycles = 0;
        let mut flat = [0u8; MAX_CELLS];
        for (cell_index, value) in self.values().enumerate() {
            flat[cell_index] = value;
        }
        for start in 0..Self::CELLS {
            if visited[start] {
                continue;
            }
            cycles += 1;
            let mut cell_index = start;
            while !visited[cell_index] {
                visited[cell_index] = true;
                cell_index = index_in_other[flat[cell_index] as usize];
            }
        }
        let permutation_parity = (Self::CELLS - cycles) % 2;

        match (self.blank(), other.blank()) {
            (Some((row_a, col_a)), Some((row_b, col_b))) => {
                let distance = row_a.abs_diff(row_b) + col_a.abs_diff(col_b);
                permutation_parity == distance % 2
            }
            _ => false,
        }
    }
}

/// Checks that `values` hold each of `0..DIM*DIM` exactly once.
///
/// A missing blank is reported ahead of range errors so `1..=9` on a 3x3
/// grid reads as "no blank" rather than "9 out of range".
fn validate_permutation<const DIM: usize>(
    values: impl Iterator<Item = u32> + Clone,
) -> Result<(), InvalidGrid> {
    let max = (Grid::<DIM>::CELLS - 1) as u32;

    if !values.clone().any(|value| value == 0) {
        return Err(InvalidGrid::MissingBlank);
    }

    let mut seen = [false; MAX_CELLS];
    for value in values {
        if value > max {
            return Err(InvalidGrid::ValueOutOfRange { value, max });
        }
        if seen[value as usize] {
            return Err(InvalidGrid::DuplicateValue { value });
        }
        seen[value as usize] = true;
    }

    Ok(())
}

impl<const DIM: usize> Default for Grid<DIM> {
    fn default() -> Self {
        Self::solved()
    }
}

impl<const DIM: usize> TryFrom<[[u8; DIM]; DIM]> for Grid<DIM> {
    type Error = InvalidGrid;

    fn try_from(cells: [[u8; DIM]; DIM]) -> Result<Self, Self::Error> {
        Self::new(cells)
    }
}

/// Renders rows of space-separated tiles, right-aligned to the widest number.
pub(crate) fn format_rows(
    f: &mut fmt::Formatter<'_>,
    dim: usize,
    cells: impl IntoIterator<Item = u8>,
) -> fmt::Result {
    let width = (dim * dim - 1).to_string().len();
    for (cell_index, value) in cells.into_iter().enumerate() {
        let col = cell_index % dim;
        if col > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{:>width$}", value, width = width)?;
        if col == dim - 1 {
            writeln!(f)?;
        }
    }
    Ok(())
}

impl<const DIM: usize> fmt::Display for Grid<DIM> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_rows(f, DIM, self.values())
    }
}
