//! A* search over sliding puzzle configurations.
//!
//! Key points:
//! - Binary heap keyed by (priority, insertion sequence) for FIFO tie-breaks
//! - FxHashSet of grids for duplicate suppression at insertion time
//! - All search structures live in one `solve` call; the solver itself only
//!   holds configuration, so repeated solves are independent
//!
//! A grid that is already in the seen set is never reopened, even if a
//! cheaper path to it turns up later.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::{debug, info, trace};

use crate::error::SolveError;
use crate::grid::{BlankPolicy, Grid};
use crate::state::{Snapshot, State};

/// Receives every state the solver expands, in expansion order.
///
/// Called before the state's children are generated. Implemented for any
/// `FnMut(&State)` closure.
pub trait Observer<const DIM: usize> {
    fn observe(&mut self, state: &State<'_, DIM>);
}

impl<const DIM: usize, F> Observer<DIM> for F
where
    F: FnMut(&State<'_, DIM>) + ?Sized,
{
    fn observe(&mut self, state: &State<'_, DIM>) {
        self(state)
    }
}

/// Observer that keeps an owned copy of every expanded state.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    pub trace: Vec<Snapshot>,
}

impl<const DIM: usize> Observer<DIM> for TraceRecorder {
    fn observe(&mut self, state: &State<'_, DIM>) {
        self.trace.push(state.snapshot());
    }
}

/// Shared flag polled once per search iteration.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

/// Runtime knobs for a solver.
#[derive(Clone, Debug, Default)]
pub struct SolverConfig {
    /// Whether the blank counts as a misplaced tile.
    pub blank_policy: BlankPolicy,
    /// Stop with `ExpansionLimit` before expanding more than this many states.
    pub max_expansions: Option<usize>,
    pub cancel: Option<CancelToken>,
}

impl SolverConfig {
    pub fn with_blank_policy(mut self, blank_policy: BlankPolicy) -> Self {
        self.blank_policy = blank_policy;
        self
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States popped and expanded (the goal itself is not counted).
    pub expanded: usize,
    /// Children produced by expansion.
    pub generated: usize,
    /// States pushed onto the frontier, root included.
    pub inserted: usize,
    /// Children dropped because their grid was already seen.
    pub duplicates: usize,
    pub peak_frontier: usize,
}

/// The terminal goal state plus the diagnostic trace of a search.
#[derive(Debug)]
pub struct Solution<'g, const DIM: usize> {
    pub terminal: State<'g, DIM>,
    /// Every expanded state, in expansion order.
    pub visited: Vec<State<'g, DIM>>,
    pub stats: SearchStats,
}

impl<const DIM: usize> Solution<'_, DIM> {
    /// Number of moves from the initial grid to the goal.
    pub fn cost(&self) -> u32 {
        self.terminal.cost()
    }

    pub fn expanded(&self) -> usize {
        self.visited.len()
    }
}

/// Frontier entry ordered so the max-heap pops the lowest priority first,
/// and the earliest insertion among equal priorities.
struct FrontierEntry<'g, const DIM: usize> {
    state: State<'g, DIM>,
    sequence: u64,
}

impl<const DIM: usize> FrontierEntry<'_, DIM> {
    #[inline]
    fn key(&self) -> (u32, u64) {
        (self.state.priority(), self.sequence)
    }
}

impl<const DIM: usize> PartialEq for FrontierEntry<'_, DIM> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<const DIM: usize> Eq for FrontierEntry<'_, DIM> {}

impl<const DIM: usize> PartialOrd for FrontierEntry<'_, DIM> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const DIM: usize> Ord for FrontierEntry<'_, DIM> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// Priority queue of states awaiting expansion.
struct Frontier<'g, const DIM: usize> {
    heap: BinaryHeap<FrontierEntry<'g, DIM>>,
    next_sequence: u64,
}

impl<'g, const DIM: usize> Frontier<'g, DIM> {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    fn push(&mut self, state: State<'g, DIM>) {
        self.heap.push(FrontierEntry {
            state,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
    }

    fn pop(&mut self) -> Option<State<'g, DIM>> {
        self.heap.pop().map(|entry| entry.state)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// A* driver. Holds configuration only.
#[derive(Clone, Debug, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn is_cancelled(&self) -> bool {
        self.config
            .cancel
            .as_ref()
            .is_some_and(CancelToken::is_cancelled)
    }

    /// Searches from `initial` to `goal`, reporting each expanded state to
    /// `observer` before its children are generated.
    ///
    /// Returns the first goal state popped from the frontier. Fails with
    /// `SearchExhausted` when the goal is unreachable.
    pub fn solve<'g, const DIM: usize, O>(
        &self,
        initial: Grid<DIM>,
        goal: &'g Grid<DIM>,
        observer: &mut O,
    ) -> Result<Solution<'g, DIM>, SolveError>
    where
        O: Observer<DIM> + ?Sized,
    {
        let root = State::root(initial, goal, self.config.blank_policy);
        info!(
            dim = DIM,
            heuristic = root.heuristic(),
            policy = ?self.config.blank_policy,
            "starting search"
        );

        let mut frontier = Frontier::new();
        let mut seen: FxHashSet<Grid<DIM>> = FxHashSet::default();
        let mut visited: Vec<State<'g, DIM>> = Vec::new();
        let mut stats = SearchStats::default();

        seen.insert(*root.grid());
        frontier.push(root);
        stats.inserted = 1;
        stats.peak_frontier = 1;

        loop {
            if self.is_cancelled() {
                info!(expanded = visited.len(), "search cancelled");
                return Err(SolveError::Cancelled {
                    expanded: visited.len(),
                });
            }

            let Some(current) = frontier.pop() else {
                stats.expanded = visited.len();
                info!(expanded = stats.expanded, "frontier exhausted without reaching goal");
                debug!(?stats, "search statistics");
                return Err(SolveError::SearchExhausted {
                    expanded: stats.expanded,
                });
            };

            if current.is_goal() {
                stats.expanded = visited.len();
                info!(
                    cost = current.cost(),
                    expanded = stats.expanded,
                    "goal reached"
                );
                debug!(?stats, "search statistics");
                return Ok(Solution {
                    terminal: current,
                    visited,
                    stats,
                });
            }

            if let Some(limit) = self.config.max_expansions {
                if visited.len() >= limit {
                    info!(limit, "expansion limit reached");
                    return Err(SolveError::ExpansionLimit { limit });
                }
            }

            trace!(
                cost = current.cost(),
                heuristic = current.heuristic(),
                priority = current.priority(),
                "expanding state"
            );
            observer.observe(&current);

            for child in current.expand()? {
                stats.generated += 1;
                // insert returns false when the grid was already discovered
                if seen.insert(*child.grid()) {
                    frontier.push(child);
                    stats.inserted += 1;
                } else {
                    stats.duplicates += 1;
                }
            }
            stats.peak_frontier = stats.peak_frontier.max(frontier.len());

            visited.push(current);
        }
    }
}

/// Solves with the default configuration.
pub fn solve<'g, const DIM: usize, O>(
    initial: Grid<DIM>,
    goal: &'g Grid<DIM>,
    observer: &mut O,
) -> Result<Solution<'g, DIM>, SolveError>
where
    O: Observer<DIM> + ?Sized,
{
    Solver::default().solve(initial, goal, observer)
}
