//! Sliding Tile Puzzle Solver Library
//!
//! Finds a shortest sequence of moves between two N x N sliding puzzle
//! configurations using A* search with the misplaced-tile heuristic.

pub mod error;
pub mod grid;
pub mod input;
pub mod solver;
pub mod state;

pub use error::{InvalidGrid, SolveError};
pub use grid::{BlankPolicy, Grid};
pub use solver::{solve, CancelToken, Observer, SearchStats, Solution, Solver, SolverConfig};
pub use state::{Snapshot, State};

/// Grid dimensions the front end can instantiate.
pub const SUPPORTED_DIMS: &[usize] = &[2, 3, 4];

/// A validated puzzle instance with compile-time dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Puzzle<const DIM: usize> {
    pub initial: Grid<DIM>,
    pub goal: Grid<DIM>,
}

impl<const DIM: usize> Puzzle<DIM> {
    pub fn new(initial: Grid<DIM>, goal: Grid<DIM>) -> Self {
        Self { initial, goal }
    }

    /// Parses both grids; an empty `goal` text selects the solved layout.
    pub fn parse(initial: &str, goal: &str) -> Result<Self, InvalidGrid> {
        let initial = input::parse_grid(initial)?;
        let goal = if goal.trim().is_empty() {
            Grid::solved()
        } else {
            input::parse_grid(goal)?
        };
        Ok(Self::new(initial, goal))
    }
}

/// Dimension-free summary of a finished search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub terminal: Snapshot,
    pub stats: SearchStats,
}

/// Trait that erases the compile-time grid dimension for dynamic dispatch.
///
/// `DIM` is hidden behind the vtable, so the CLI can pick a puzzle size at
/// startup without turbofish.
pub trait PuzzleOps {
    fn dim(&self) -> usize;
    fn is_reachable(&self) -> bool;
    fn solve(
        &self,
        solver: &Solver,
        observer: &mut dyn FnMut(&Snapshot),
    ) -> Result<Report, SolveError>;
}

impl<const DIM: usize> PuzzleOps for Puzzle<DIM> {
    fn dim(&self) -> usize {
        DIM
    }

    fn is_reachable(&self) -> bool {
        self.goal.is_reachable_from(&self.initial)
    }

    fn solve(
        &self,
        solver: &Solver,
        observer: &mut dyn FnMut(&Snapshot),
    ) -> Result<Report, SolveError> {
        let solution = solver.solve(self.initial, &self.goal, &mut |state: &State<'_, DIM>| {
            observer(&state.snapshot())
        })?;
        Ok(Report {
            terminal: solution.terminal.snapshot(),
            stats: solution.stats,
        })
    }
}

/// Builds a puzzle of the requested dimension from text.
///
/// Returns `Ok(None)` for a dimension outside [`SUPPORTED_DIMS`].
pub fn puzzle_for_dim(
    dim: usize,
    initial: &str,
    goal: &str,
) -> Result<Option<Box<dyn PuzzleOps>>, InvalidGrid> {
    let puzzle: Box<dyn PuzzleOps> = match dim {
        2 => Box::new(Puzzle::<2>::parse(initial, goal)?),
        3 => Box::new(Puzzle::<3>::parse(initial, goal)?),
        4 => Box::new(Puzzle::<4>::parse(initial, goal)?),
        _ => return Ok(None),
    };
    Ok(Some(puzzle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_goal_to_solved() {
        let puzzle = Puzzle::<3>::parse("1 2 3/4 5 6/7 0 8", "").unwrap();
        assert_eq!(puzzle.goal, Grid::solved());
    }

    #[test]
    fn test_erased_solve_reports_terminal() {
        let puzzle = puzzle_for_dim(3, "1 2 3/4 5 6/7 0 8", "1 2 3/4 5 6/7 8 0")
            .unwrap()
            .expect("3 is supported");
        let mut trace = Vec::new();
        let report = puzzle
            .solve(&Solver::default(), &mut |snapshot| trace.push(snapshot.clone()))
            .unwrap();

        assert_eq!(puzzle.dim(), 3);
        assert!(puzzle.is_reachable());
        assert_eq!(report.terminal.cost, 1);
        assert!(report.terminal.is_goal());
        assert_eq!(trace.len(), 1);
        assert_eq!(report.stats.expanded, 1);
    }

    #[test]
    fn test_unsupported_dim() {
        assert!(puzzle_for_dim(7, "", "").unwrap().is_none());
    }

    #[test]
    fn test_invalid_text_surfaces_before_search() {
        let result = puzzle_for_dim(2, "1 2/3 4", "");
        assert!(matches!(result, Err(InvalidGrid::MissingBlank)));
    }
}
