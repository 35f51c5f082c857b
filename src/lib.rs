//! Task-selection knapsack
//!
//! Given tasks with a duration (in half-hour steps) and an integer
//! productivity, and a time budget in hours, this crate picks the subset of
//! tasks that fits the budget and maximises total productivity.
//!
//! ## Solvers
//! - [`DpSolver`]: exact 0/1 knapsack over half-hour units. Two table
//!   strategies share one recurrence and one tie-break:
//!   - [`TableMode::Full`] keeps the complete value and take tables, which
//!     makes the table inspectable;
//!   - [`TableMode::Rolling`] keeps a single row plus √n checkpoints and
//!     replays blocks to reconstruct the same chosen set in O(√n·T) space.
//! - [`GreedySolver`]: ranks tasks by productivity per hour and accepts them
//!   while they fit. Fast, never better than the exact optimum.
//!
//! [`Scheduler::compare`] runs both, times them, and returns a
//! [`Comparison`](scheduler::Comparison) with a narrative, a serde summary and
//! windowed table views.
//!
//! ## Quick start
//! ```
//! use task_knapsack::{Scheduler, Task};
//!
//! let tasks = vec![
//!     Task::new("A", 2.0, 3).unwrap(),
//!     Task::new("B", 3.0, 4).unwrap(),
//!     Task::new("C", 4.0, 5).unwrap(),
//!     Task::new("D", 5.0, 6).unwrap(),
//! ];
//! let comparison = Scheduler::new().compare(Some(&tasks), 5.0).unwrap();
//! let names: Vec<_> = comparison.dp().chosen.iter().map(|t| t.name()).collect();
//! assert_eq!(names, ["A", "B"]);
//! assert_eq!(comparison.dp().total_value, 7);
//! assert!(comparison.narrative().contains("Both algorithms found the same optimal value"));
//! ```
//!
//! ## Features
//! - `tracing` (default): spans and events around every solve.
//! - `parallel`: fill each full-table row across threads with rayon.
//! - `heavy`: enables the long-running stress tests.

pub mod blocks;
pub mod builder;
pub mod config;
pub mod error;
pub mod report;
pub mod scheduler;
pub mod solvers;
pub mod task;
pub mod traits;
pub mod utils;

pub use crate::builder::SchedulerBuilder;
pub use crate::config::{Granularity, SchedulerConfig, SolverLimits, TableMode};
pub use crate::error::{Result, ScheduleError};
pub use crate::report::{ComparisonSummary, SolverKind, TableData, TableWindow};
pub use crate::scheduler::{Comparison, Scheduler};
pub use crate::solvers::{DpResult, DpSolver, GreedyResult, GreedySolver};
pub use crate::task::Task;
pub use crate::traits::ExactStrategy;
