//! Benchmarks for the sliding puzzle solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tileslide::{solve, BlankPolicy, Grid, Solver, SolverConfig, State};

/// A 3x3 instance that takes a few thousand expansions.
fn medium_3x3() -> Grid<3> {
    Grid::new([[8, 1, 3], [4, 0, 2], [7, 6, 5]]).expect("valid benchmark grid")
}

fn ignore(_: &State<'_, 3>) {}

/// Benchmark a complete 3x3 search with the default heuristic.
fn bench_solve(c: &mut Criterion) {
    let goal = Grid::<3>::solved();
    let initial = medium_3x3();

    c.bench_function("solve_3x3", |b| {
        b.iter(|| solve(black_box(initial), &goal, &mut ignore))
    });
}

/// Benchmark the same search with the blank excluded from the heuristic.
fn bench_solve_skip_blank(c: &mut Criterion) {
    let goal = Grid::<3>::solved();
    let initial = medium_3x3();
    let solver = Solver::new(SolverConfig::default().with_blank_policy(BlankPolicy::Skip));

    c.bench_function("solve_3x3_skip_blank", |b| {
        b.iter(|| solver.solve(black_box(initial), &goal, &mut ignore))
    });
}

/// Benchmark an unreachable goal, which expands a whole 181440-grid component.
fn bench_exhaust(c: &mut Criterion) {
    let goal = Grid::<3>::solved();
    let initial = Grid::new([[1, 2, 3], [4, 5, 6], [8, 7, 0]]).expect("valid benchmark grid");

    let mut group = c.benchmark_group("exhaust");
    group.sample_size(10);
    group.bench_function("unreachable_3x3", |b| {
        b.iter(|| solve(black_box(initial), &goal, &mut ignore))
    });
    group.finish();
}

/// Benchmark successor generation for an interior blank.
fn bench_expand(c: &mut Criterion) {
    let goal = Grid::<3>::solved();
    let state = State::root(medium_3x3(), &goal, BlankPolicy::Count);

    c.bench_function("expand", |b| b.iter(|| black_box(&state).expand()));
}

/// Benchmark the misplaced-tile count.
fn bench_heuristic(c: &mut Criterion) {
    let goal = Grid::<4>::solved();
    let grid = Grid::<4>::new([[5, 1, 2, 3], [9, 6, 7, 4], [13, 10, 11, 8], [0, 14, 15, 12]])
        .expect("valid benchmark grid");

    c.bench_function("misplaced_4x4", |b| {
        b.iter(|| black_box(&grid).misplaced(&goal, BlankPolicy::Count))
    });
}

/// Benchmark rendering a state for the trace output.
fn bench_format_state(c: &mut Criterion) {
    let goal = Grid::<3>::solved();
    let state = State::root(medium_3x3(), &goal, BlankPolicy::Count);

    c.bench_function("format_state", |b| b.iter(|| black_box(&state).to_string()));
}

criterion_group!(
    benches,
    bench_solve,
    bench_solve_skip_blank,
    bench_exhaust,
    bench_expand,
    bench_heuristic,
    bench_format_state
);
criterion_main!(benches);
