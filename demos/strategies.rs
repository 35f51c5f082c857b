//! Example: the full table and the rolling row pick the same tasks.
//!
//! The rolling strategy can also be selected for the whole scheduler with
//! `TASK_KNAPSACK_TABLE_MODE=rolling`.
//!
//! Run with:
//! `cargo run --example strategies`

use task_knapsack::{DpSolver, Scheduler, SchedulerConfig, TableMode, Task};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let tasks: Vec<Task> = (0..40)
        .map(|i| {
            let hours = (1 + (i * 5 + 1) % 7) as f64 / 2.0;
            let productivity = 1 + (i * 11 + 3) % 17;
            Task::new(format!("task-{i:02}"), hours, productivity)
        })
        .collect::<Result<_, _>>()?;
    let capacity = 24.0;

    let full = DpSolver::new().solve(&tasks, capacity)?;
    let rolling = DpSolver::new()
        .with_mode(TableMode::Rolling)
        .solve(&tasks, capacity)?;

    println!("full table:  value={} hours={}", full.total_value, full.total_hours());
    println!("rolling row: value={} hours={}", rolling.total_value, rolling.total_hours());
    if let Some(table) = rolling.rolling() {
        println!(
            "rolling row kept {} checkpoints every {} tasks",
            table.checkpoints(),
            table.block_size()
        );
    }
    println!("same tasks chosen: {}", full.chosen_indices == rolling.chosen_indices);
    println!();

    let config = SchedulerConfig::from_env()?;
    println!("scheduler from environment: {:?}", config.table_mode);
    let comparison = Scheduler::with_config(config).compare(Some(&tasks), capacity)?;
    println!("{}", serde_json::to_string_pretty(&comparison.summary())?);
    Ok(())
}
