use proptest::prelude::*;
use task_knapsack::{DpSolver, GreedySolver, TableMode, Task};

fn build_tasks(defs: &[(u32, u32)]) -> Vec<Task> {
    defs.iter()
        .enumerate()
        .map(|(i, &(units, value))| {
            Task::new(format!("t{i}"), f64::from(units) / 2.0, value).unwrap()
        })
        .collect()
}

fn brute_force(tasks: &[Task], capacity_units: u64) -> u64 {
    let n = tasks.len();
    (0u32..1 << n)
        .filter_map(|mask| {
            let mut units = 0u64;
            let mut value = 0u64;
            for (i, task) in tasks.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    units += u64::from(task.duration_units());
                    value += u64::from(task.productivity());
                }
            }
            (units <= capacity_units).then_some(value)
        })
        .max()
        .unwrap_or(0)
}

/// Textbook table with the strict take rule, reconstructed from `(n, T)`.
fn reference_chosen(tasks: &[Task], capacity_units: usize) -> Vec<usize> {
    let n = tasks.len();
    let mut dp = vec![vec![0u64; capacity_units + 1]; n + 1];
    let mut take = vec![vec![false; capacity_units + 1]; n + 1];
    for i in 1..=n {
        let weight = tasks[i - 1].duration_units() as usize;
        let value = u64::from(tasks[i - 1].productivity());
        for w in 0..=capacity_units {
            dp[i][w] = dp[i - 1][w];
            if weight <= w && dp[i - 1][w - weight] + value > dp[i][w] {
                dp[i][w] = dp[i - 1][w - weight] + value;
                take[i][w] = true;
            }
        }
    }
    let mut chosen = Vec::new();
    let mut w = capacity_units;
    for i in (1..=n).rev() {
        if take[i][w] {
            chosen.push(i - 1);
            w -= tasks[i - 1].duration_units() as usize;
        }
    }
    chosen.reverse();
    chosen
}

fn task_defs() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((1u32..=8, 1u32..=30), 0..12)
}

proptest! {
    #[test]
    fn dp_matches_brute_force(defs in task_defs(), cap in 0u32..=40) {
        let tasks = build_tasks(&defs);
        let hours = f64::from(cap) / 2.0;
        let expected = brute_force(&tasks, u64::from(cap));
        for mode in [TableMode::Full, TableMode::Rolling] {
            let result = DpSolver::new().with_mode(mode).solve(&tasks, hours).unwrap();
            prop_assert_eq!(result.total_value, expected);
            prop_assert!(result.total_units <= u64::from(cap));
        }
    }

    #[test]
    fn dp_chooses_reference_set(defs in task_defs(), cap in 0u32..=40) {
        let tasks = build_tasks(&defs);
        let result = DpSolver::new().solve(&tasks, f64::from(cap) / 2.0).unwrap();
        prop_assert_eq!(result.chosen_indices, reference_chosen(&tasks, cap as usize));
    }

    #[test]
    fn greedy_never_beats_dp(defs in task_defs(), cap in 0u32..=40) {
        let tasks = build_tasks(&defs);
        let hours = f64::from(cap) / 2.0;
        let dp = DpSolver::new().solve(&tasks, hours).unwrap();
        let greedy = GreedySolver::new().solve(&tasks, hours).unwrap();
        prop_assert!(greedy.total_value <= dp.total_value);
        prop_assert!(greedy.total_units <= u64::from(cap));

        let units: u64 = greedy.chosen.iter().map(|t| u64::from(t.duration_units())).sum();
        let value: u64 = greedy.chosen.iter().map(|t| u64::from(t.productivity())).sum();
        prop_assert_eq!(units, greedy.total_units);
        prop_assert_eq!(value, greedy.total_value);
    }

    #[test]
    fn chosen_totals_are_consistent(defs in task_defs(), cap in 0u32..=40) {
        let tasks = build_tasks(&defs);
        let result = DpSolver::new().solve(&tasks, f64::from(cap) / 2.0).unwrap();
        let units: u64 = result.chosen.iter().map(|t| u64::from(t.duration_units())).sum();
        let value: u64 = result.chosen.iter().map(|t| u64::from(t.productivity())).sum();
        prop_assert_eq!(units, result.total_units);
        prop_assert_eq!(value, result.total_value);
        prop_assert!(result.chosen_indices.windows(2).all(|w| w[0] < w[1]));
    }
}
