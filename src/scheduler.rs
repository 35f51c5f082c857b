//! Runs both solvers over the same input and keeps their results side by side.
//!
//! The scheduler holds only configuration; every call to
//! [`Scheduler::compare`] is an independent request/response computation.
//! Reporting on the returned [`Comparison`] lives in [`crate::report`].

use std::time::{Duration, Instant};

use crate::config::SchedulerConfig;
use crate::error::{Result, ScheduleError};
use crate::solvers::{DpResult, DpSolver, GreedyResult, GreedySolver};
use crate::task::Task;

/// Exact and greedy results for one `(tasks, capacity)` input.
#[derive(Debug, Clone)]
pub struct Comparison<'t> {
    pub(crate) tasks: &'t [Task],
    pub(crate) dp: DpResult<'t>,
    pub(crate) greedy: GreedyResult<'t>,
    pub(crate) dp_elapsed: Duration,
    pub(crate) greedy_elapsed: Duration,
}

impl<'t> Comparison<'t> {
    /// The tasks both solvers ran over.
    pub fn tasks(&self) -> &'t [Task] {
        self.tasks
    }

    pub fn dp(&self) -> &DpResult<'t> {
        &self.dp
    }

    pub fn greedy(&self) -> &GreedyResult<'t> {
        &self.greedy
    }

    pub fn dp_elapsed(&self) -> Duration {
        self.dp_elapsed
    }

    pub fn greedy_elapsed(&self) -> Duration {
        self.greedy_elapsed
    }

    /// Capacity both solvers ran against, after granularity handling.
    pub fn capacity_hours(&self) -> f64 {
        self.dp.capacity_hours()
    }

    /// `dp.total_value - greedy.total_value`; never negative.
    pub fn value_gap(&self) -> u64 {
        self.dp.total_value.saturating_sub(self.greedy.total_value)
    }
}

/// Entry point that pairs the exact and greedy solvers.
///
/// ```
/// use task_knapsack::{Scheduler, Task};
///
/// let tasks = vec![
///     Task::new("X", 1.0, 10).unwrap(),
///     Task::new("Y", 2.0, 12).unwrap(),
///     Task::new("Z", 2.0, 12).unwrap(),
/// ];
/// let comparison = Scheduler::new().compare(Some(&tasks), 2.0).unwrap();
/// assert_eq!(comparison.dp().total_value, 12);
/// assert_eq!(comparison.greedy().total_value, 10);
/// assert_eq!(comparison.value_gap(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn dp_solver(&self) -> DpSolver {
        DpSolver::from_config(&self.config)
    }

    pub fn greedy_solver(&self) -> GreedySolver {
        GreedySolver::from_config(&self.config)
    }

    /// Solve `tasks` under `capacity_hours` with both solvers, timing each.
    ///
    /// `tasks` is the collection as handed over by a loader; `None` means no
    /// collection was supplied and fails with `InvalidInput`. An empty slice
    /// is a valid input.
    ///
    /// # Errors
    /// `InvalidInput`, plus any capacity error from the solvers. Nothing is
    /// returned partially: the first failing solver aborts the comparison.
    pub fn compare<'t>(
        &self,
        tasks: Option<&'t [Task]>,
        capacity_hours: f64,
    ) -> Result<Comparison<'t>> {
        let tasks = tasks.ok_or(ScheduleError::InvalidInput)?;

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("compare", tasks = tasks.len(), capacity_hours);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let start = Instant::now();
        let dp = self.dp_solver().solve(tasks, capacity_hours)?;
        let dp_elapsed = start.elapsed();

        let start = Instant::now();
        let greedy = self.greedy_solver().solve(tasks, capacity_hours)?;
        let greedy_elapsed = start.elapsed();

        #[cfg(feature = "tracing")]
        tracing::info!(
            dp_value = dp.total_value,
            greedy_value = greedy.total_value,
            dp_us = dp_elapsed.as_micros() as u64,
            greedy_us = greedy_elapsed.as_micros() as u64,
            "comparison finished"
        );

        Ok(Comparison {
            tasks,
            dp,
            greedy,
            dp_elapsed,
            greedy_elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SchedulerBuilder;
    use crate::config::TableMode;

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("A", 2.0, 3).unwrap(),
            Task::new("B", 3.0, 4).unwrap(),
            Task::new("C", 4.0, 5).unwrap(),
            Task::new("D", 5.0, 6).unwrap(),
        ]
    }

    #[test]
    fn missing_collection_is_invalid_input() {
        let err = Scheduler::new().compare(None, 5.0).unwrap_err();
        assert_eq!(err, ScheduleError::InvalidInput);
    }

    #[test]
    fn both_solvers_agree_on_easy_instance() {
        let tasks = tasks();
        let comparison = Scheduler::new().compare(Some(&tasks), 5.0).unwrap();
        assert_eq!(comparison.dp().total_value, 7);
        assert_eq!(comparison.greedy().total_value, 7);
        assert_eq!(comparison.value_gap(), 0);
        assert_eq!(comparison.capacity_hours(), 5.0);
    }

    #[test]
    fn builder_config_reaches_solvers() {
        let tasks = tasks();
        let scheduler = SchedulerBuilder::new()
            .table_mode(TableMode::Rolling)
            .block_size(2)
            .build();
        assert_eq!(scheduler.dp_solver().mode(), TableMode::Rolling);
        let comparison = scheduler.compare(Some(&tasks), 5.0).unwrap();
        assert!(comparison.dp().table().is_none());
        assert_eq!(comparison.dp().rolling().map(|r| r.block_size()), Some(2));
    }

    #[test]
    fn capacity_errors_propagate() {
        let tasks = tasks();
        let err = Scheduler::new().compare(Some(&tasks), -1.0).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidCapacity { .. }));
    }
}
