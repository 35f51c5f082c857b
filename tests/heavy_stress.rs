#![cfg(feature = "heavy")]
use rand::{rngs::StdRng, Rng, SeedableRng};
use task_knapsack::{DpSolver, GreedySolver, SolverLimits, TableMode, Task};

fn random_tasks(rng: &mut StdRng, n: usize) -> Vec<Task> {
    (0..n)
        .map(|i| {
            let hours = rng.gen_range(1..=16) as f64 / 2.0;
            Task::new(format!("t{i}"), hours, rng.gen_range(1..=100)).unwrap()
        })
        .collect()
}

#[test]
fn heavy_stress_rolling_matches_full() {
    let mut rng = StdRng::seed_from_u64(123);
    let tasks = random_tasks(&mut rng, 3_000);
    let capacity = 2_000.0;
    let limits = SolverLimits {
        max_capacity_units: 10_000,
        max_table_cells: 1 << 24,
    };

    let full = DpSolver::new().with_limits(limits).solve(&tasks, capacity).unwrap();
    let rolling = DpSolver::new()
        .with_limits(limits)
        .with_mode(TableMode::Rolling)
        .solve(&tasks, capacity)
        .unwrap();
    let greedy = GreedySolver::new().with_limits(limits).solve(&tasks, capacity).unwrap();

    assert_eq!(rolling.chosen_indices, full.chosen_indices);
    assert_eq!(rolling.total_value, full.total_value);
    assert!(full.total_units <= 4_000);
    assert!(greedy.total_value <= full.total_value);
}

#[test]
fn heavy_stress_rolling_beyond_full_table_limit() {
    let mut rng = StdRng::seed_from_u64(321);
    let tasks = random_tasks(&mut rng, 20_000);
    let capacity = 4_000.0;

    // 20_001 x 8_001 cells exceeds the default table limit
    assert!(DpSolver::new().solve(&tasks, capacity).is_err());
    let rolling = DpSolver::new()
        .with_mode(TableMode::Rolling)
        .solve(&tasks, capacity)
        .unwrap();
    let greedy = GreedySolver::new().solve(&tasks, capacity).unwrap();
    assert!(rolling.total_units <= 8_000);
    assert!(greedy.total_value <= rolling.total_value);
}
