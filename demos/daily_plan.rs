//! Example: plan one working day with both solvers and compare them.
//!
//! Run with:
//! `cargo run --example daily_plan`

use task_knapsack::{Scheduler, SolverKind, TableWindow, Task};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let tasks = vec![
        Task::new("Code review", 1.0, 10)?,
        Task::new("Design doc", 2.0, 12)?,
        Task::new("Bug triage", 2.0, 12)?,
        Task::new("Standup notes", 0.5, 2)?,
        Task::new("Release prep", 3.5, 15)?,
    ];

    let comparison = Scheduler::new().compare(Some(&tasks), 4.0)?;

    println!("{comparison}");
    println!("DP     {}", comparison.time_label(SolverKind::Dp));
    println!("Greedy {}", comparison.time_label(SolverKind::Greedy));
    println!();

    println!("Solution path (row, remaining half hours, value, decision):");
    for step in comparison.solution_path() {
        let label = match step.row {
            0 => "start".to_string(),
            row => tasks[row - 1].name().to_string(),
        };
        let decision = if step.taken { "take" } else { "skip" };
        println!("  {:<14} {:>3} {:>4}  {decision}", label, step.capacity_units, step.value);
    }
    println!();

    println!("DP table (hours across, tasks down, * = taken):");
    print!("{}", comparison.render_table(TableWindow::default()));
    Ok(())
}
