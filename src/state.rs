//! Search states: one grid plus its A* bookkeeping.
//!
//! A state is a pure value derived from `(grid, cost, goal)`. Fields are only
//! readable through accessors, so `priority == cost + heuristic` holds for
//! every state ever built.

use std::fmt;

use tracing::error;

use crate::error::SolveError;
use crate::grid::{format_rows, BlankPolicy, Grid, Position};

/// Blank neighbour offsets in expansion order: down, right, up, left.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// A puzzle configuration with its path cost and heuristic estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct State<'g, const DIM: usize> {
    grid: Grid<DIM>,
    /// g(x): moves from the root.
    cost: u32,
    /// h(x): misplaced tiles relative to the goal.
    heuristic: u32,
    /// f(x) = g(x) + h(x).
    priority: u32,
    policy: BlankPolicy,
    goal: &'g Grid<DIM>,
}

impl<'g, const DIM: usize> State<'g, DIM> {
    /// Creates the root of a search (cost 0).
    pub fn root(grid: Grid<DIM>, goal: &'g Grid<DIM>, policy: BlankPolicy) -> Self {
        Self::with_cost(grid, 0, goal, policy)
    }

    fn with_cost(grid: Grid<DIM>, cost: u32, goal: &'g Grid<DIM>, policy: BlankPolicy) -> Self {
        let heuristic = grid.misplaced(goal, policy);
        Self {
            grid,
            cost,
            heuristic,
            priority: cost + heuristic,
            policy,
            goal,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid<DIM> {
        &self.grid
    }

    #[inline]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    #[inline]
    pub fn heuristic(&self) -> u32 {
        self.heuristic
    }

    #[inline]
    pub fn priority(&self) -> u32 {
        self.priority
    }

    #[inline]
    pub fn goal(&self) -> &'g Grid<DIM> {
        self.goal
    }

    #[inline]
    pub fn policy(&self) -> BlankPolicy {
        self.policy
    }

    /// Misplaced-tile count of this state's grid against `goal`.
    pub fn compute_heuristic(&self, goal: &Grid<DIM>) -> u32 {
        self.grid.misplaced(goal, self.policy)
    }

    /// True iff the grid matches the goal.
    #[inline]
    pub fn is_goal(&self) -> bool {
        self.heuristic == 0
    }

    /// Position of the blank.
    ///
    /// Fails only if the grid invariant was broken, which is a bug.
    pub fn locate_blank(&self) -> Result<Position, SolveError> {
        self.grid.blank().ok_or_else(|| {
            error!(cost = self.cost, "state has no blank cell");
            SolveError::InvariantViolation(format!("no blank cell in grid\n{}", self.grid))
        })
    }

    /// Generates the successors reachable by sliding one tile into the blank.
    ///
    /// Yields 2 children for a corner blank, 3 for an edge, 4 for the interior.
    pub fn expand(&self) -> Result<Vec<Self>, SolveError> {
        let blank = self.locate_blank()?;
        let mut children = Vec::with_capacity(NEIGHBOR_OFFSETS.len());

        for (row_offset, col_offset) in NEIGHBOR_OFFSETS {
            let Some(row) = blank.0.checked_add_signed(row_offset).filter(|&row| row < DIM) else {
                continue;
            };
            let Some(col) = blank.1.checked_add_signed(col_offset).filter(|&col| col < DIM) else {
                continue;
            };

            let grid = self.grid.with_swap(blank, (row, col));
            children.push(Self::with_cost(grid, self.cost + 1, self.goal, self.policy));
        }

        Ok(children)
    }

    /// An owned, dimension-erased copy for observers that outlive the search.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            dim: DIM,
            cells: self.grid.values().collect(),
            cost: self.cost,
            heuristic: self.heuristic,
            priority: self.priority,
        }
    }
}

/// Shared layout for states and snapshots: the three scores, then the grid.
fn format_node(
    f: &mut fmt::Formatter<'_>,
    dim: usize,
    cells: impl IntoIterator<Item = u8>,
    (cost, heuristic, priority): (u32, u32, u32),
) -> fmt::Result {
    writeln!(f, "g(x) = {cost}")?;
    writeln!(f, "h(x) = {heuristic}")?;
    writeln!(f, "f(x) = {priority}")?;
    format_rows(f, dim, cells)
}

impl<const DIM: usize> fmt::Display for State<'_, DIM> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_node(
            f,
            DIM,
            self.grid.values(),
            (self.cost, self.heuristic, self.priority),
        )
    }
}

/// A state detached from its grid dimension and goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub dim: usize,
    /// Tiles in row-major order.
    pub cells: Vec<u8>,
    pub cost: u32,
    pub heuristic: u32,
    pub priority: u32,
}

impl Snapshot {
    pub fn is_goal(&self) -> bool {
        self.heuristic == 0
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_node(
            f,
            self.dim,
            self.cells.iter().copied(),
            (self.cost, self.heuristic, self.priority),
        )
    }
}
