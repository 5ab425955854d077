//! Sliding Tile Puzzle Solver
//!
//! Reads an initial and a goal grid, runs A* with the misplaced-tile
//! heuristic, and prints every expanded state followed by the goal state
//! reached.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tileslide::{input, puzzle_for_dim, BlankPolicy, PuzzleOps, Report, Solver, SolverConfig};

/// Solves N x N sliding tile puzzles with A* search.
#[derive(Parser)]
#[command(name = "tileslide")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Log at debug level (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a puzzle, printing every expanded state.
    Solve(SolveArgs),
    /// Report whether the goal is reachable, without searching.
    Check(GridArgs),
}

#[derive(Args)]
struct GridArgs {
    /// Grid dimension.
    #[arg(long, default_value_t = 3, value_parser = parse_dim)]
    dim: usize,

    /// Initial grid, rows separated by '/' (e.g. "1 2 3/4 0 6/7 5 8").
    /// Prompted on stdin when omitted.
    #[arg(long)]
    initial: Option<String>,

    /// Goal grid. Defaults to the solved layout when --initial is given,
    /// otherwise prompted on stdin.
    #[arg(long)]
    goal: Option<String>,
}

impl Default for GridArgs {
    fn default() -> Self {
        Self {
            dim: 3,
            initial: None,
            goal: None,
        }
    }
}

#[derive(Args, Default)]
struct SolveArgs {
    #[command(flatten)]
    grids: GridArgs,

    /// Whether the blank counts as a misplaced tile.
    #[arg(long, value_enum, default_value_t = BlankArg::Count)]
    blank: BlankArg,

    /// Give up after expanding this many states.
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Reject unreachable goals with a parity check instead of searching.
    #[arg(long)]
    check_parity: bool,

    /// Only print the goal state, not every expanded state.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum BlankArg {
    #[default]
    Count,
    Skip,
}

impl From<BlankArg> for BlankPolicy {
    fn from(arg: BlankArg) -> Self {
        match arg {
            BlankArg::Count => BlankPolicy::Count,
            BlankArg::Skip => BlankPolicy::Skip,
        }
    }
}

fn parse_dim(text: &str) -> Result<usize, String> {
    let dim: usize = text.parse().map_err(|_| format!("'{text}' is not a number"))?;
    if tileslide::SUPPORTED_DIMS.contains(&dim) {
        Ok(dim)
    } else {
        Err(format!(
            "dimension must be one of {:?}",
            tileslide::SUPPORTED_DIMS
        ))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Some(Command::Solve(args)) => run_solve(&args),
        Some(Command::Check(grids)) => run_check(&grids),
        None => run_solve(&SolveArgs::default()),
    }
}

/// Builds the puzzle from flags, prompting on stdin for anything missing.
fn load_puzzle(grids: &GridArgs) -> Result<Box<dyn PuzzleOps>> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();

    let (initial, goal) = match (&grids.initial, &grids.goal) {
        (Some(initial), Some(goal)) => (initial.clone(), goal.clone()),
        // an empty goal text selects the solved layout
        (Some(initial), None) => (initial.clone(), String::new()),
        (None, goal) => {
            let initial = prompt_grid(&mut reader, "Enter initial state", grids.dim)?;
            let goal = match goal {
                Some(goal) => goal.clone(),
                None => prompt_grid(&mut reader, "Enter goal state", grids.dim)?,
            };
            (initial, goal)
        }
    };

    puzzle_for_dim(grids.dim, &initial, &goal)
        .context("invalid puzzle")?
        .with_context(|| format!("unsupported dimension {}", grids.dim))
}

fn prompt_grid(reader: &mut impl BufRead, title: &str, dim: usize) -> Result<String> {
    println!("{title}");
    println!("Enter state.\n0 represents blank tile");
    io::stdout().flush()?;

    match input::read_block(reader, dim).context("failed to read grid from stdin")? {
        Some(block) => Ok(block),
        None => bail!("stdin closed before a grid was entered"),
    }
}

fn run_solve(args: &SolveArgs) -> Result<()> {
    let puzzle = load_puzzle(&args.grids)?;

    if args.check_parity && !puzzle.is_reachable() {
        bail!("goal is not reachable from the initial grid (permutation parity mismatch)");
    }

    let mut config = SolverConfig::default().with_blank_policy(args.blank.into());
    if let Some(limit) = args.max_expansions {
        config = config.with_max_expansions(limit);
    }
    let solver = Solver::new(config);

    let stdout = io::stdout();
    let report = write_search(puzzle.as_ref(), &solver, args.quiet, &mut stdout.lock())?;
    info!(
        cost = report.terminal.cost,
        expanded = report.stats.expanded,
        duplicates = report.stats.duplicates,
        peak_frontier = report.stats.peak_frontier,
        "solved"
    );
    Ok(())
}

fn run_check(grids: &GridArgs) -> Result<()> {
    let puzzle = load_puzzle(grids)?;
    if puzzle.is_reachable() {
        println!("reachable");
    } else {
        warn!("goal cannot be reached from the initial grid");
        println!("unreachable");
    }
    Ok(())
}

/// Runs the search, writing each expanded state and then the goal state
/// in the `g(x)/h(x)/f(x)` layout.
fn write_search(
    puzzle: &dyn PuzzleOps,
    solver: &Solver,
    quiet: bool,
    out: &mut dyn Write,
) -> Result<Report> {
    writeln!(out, "START")?;

    // the observer cannot fail, so keep the first write error for later
    let mut write_error = None;
    let result = puzzle.solve(solver, &mut |snapshot| {
        if quiet || write_error.is_some() {
            return;
        }
        if let Err(error) = writeln!(out, "{snapshot}") {
            write_error = Some(error);
        }
    });
    if let Some(error) = write_error {
        return Err(error).context("failed to write search trace");
    }

    let report = result?;
    writeln!(out, "SOLVED")?;
    writeln!(out, "{}", report.terminal)?;
    Ok(report)
}
