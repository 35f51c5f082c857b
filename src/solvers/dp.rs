//! Exact task selection by dynamic programming.
//!
//! [`DpSolver`] validates the capacity, applies the allocation guards, reduces
//! tasks to `(weight, value)` items and hands them to the configured
//! [`ExactStrategy`]. The returned [`DpResult`] borrows the chosen tasks from
//! the caller's slice.

use crate::config::{Granularity, SchedulerConfig, SolverLimits, TableMode};
use crate::error::{Result, ScheduleError};
use crate::solvers::{DpTable, FullTable, RollingRow, RollingTable};
use crate::task::Task;
use crate::traits::{ExactOutcome, ExactStrategy, Item, TableSnapshot};
use crate::utils::{capacity_units, units_to_hours};

/// Optimal selection produced by [`DpSolver::solve`].
#[derive(Debug, Clone)]
pub struct DpResult<'t> {
    /// Chosen tasks in their original relative order.
    pub chosen: Vec<&'t Task>,
    /// Positions of the chosen tasks in the input slice, ascending.
    pub chosen_indices: Vec<usize>,
    /// Sum of chosen durations, in half-hour units.
    pub total_units: u64,
    /// Sum of chosen productivity; equals `dp[n][T]`.
    pub total_value: u64,
    /// `T`, the capacity the table was built for.
    pub capacity_units: u64,
    pub table: TableSnapshot,
}

impl<'t> DpResult<'t> {
    fn from_outcome(tasks: &'t [Task], outcome: ExactOutcome, capacity: usize) -> Self {
        Self {
            chosen: outcome.chosen.iter().map(|&i| &tasks[i]).collect(),
            total_units: outcome.used_units as u64,
            total_value: outcome.total_value,
            capacity_units: capacity as u64,
            chosen_indices: outcome.chosen,
            table: outcome.table,
        }
    }

    pub fn total_hours(&self) -> f64 {
        units_to_hours(self.total_units)
    }

    pub fn capacity_hours(&self) -> f64 {
        units_to_hours(self.capacity_units)
    }

    pub fn mode(&self) -> TableMode {
        self.table.mode()
    }

    /// The full table, when the solve used [`TableMode::Full`].
    pub fn table(&self) -> Option<&DpTable> {
        match &self.table {
            TableSnapshot::Full(table) => Some(table),
            TableSnapshot::Rolling(_) => None,
        }
    }

    /// The rolling row, when the solve used [`TableMode::Rolling`].
    pub fn rolling(&self) -> Option<&RollingTable> {
        match &self.table {
            TableSnapshot::Rolling(table) => Some(table),
            TableSnapshot::Full(_) => None,
        }
    }
}

/// Exact 0/1 knapsack solver over tasks.
///
/// # Example
///
/// ```
/// use task_knapsack::{DpSolver, Task, TableMode};
///
/// let tasks = vec![
///     Task::new("A", 2.0, 3).unwrap(),
///     Task::new("B", 3.0, 4).unwrap(),
///     Task::new("C", 4.0, 5).unwrap(),
///     Task::new("D", 5.0, 6).unwrap(),
/// ];
/// let result = DpSolver::new().solve(&tasks, 5.0).unwrap();
/// let names: Vec<_> = result.chosen.iter().map(|t| t.name()).collect();
/// assert_eq!(names, ["A", "B"]);
/// assert_eq!(result.total_value, 7);
///
/// let rolling = DpSolver::new().with_mode(TableMode::Rolling).solve(&tasks, 5.0).unwrap();
/// assert_eq!(rolling.chosen_indices, result.chosen_indices);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DpSolver {
    mode: TableMode,
    granularity: Granularity,
    limits: SolverLimits,
    block_size: Option<usize>,
}

impl DpSolver {
    /// Full-table solver with strict granularity and default limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self {
            mode: config.table_mode,
            granularity: config.granularity,
            limits: config.limits,
            block_size: config.block_size,
        }
    }

    pub fn with_mode(mut self, mode: TableMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_limits(mut self, limits: SolverLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Checkpoint spacing for [`TableMode::Rolling`]; zero is treated as one.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = Some(block_size.max(1));
        self
    }

    pub fn mode(&self) -> TableMode {
        self.mode
    }

    /// Select the most productive subset of `tasks` fitting `capacity_hours`.
    ///
    /// # Errors
    /// - `InvalidCapacity` for negative or non-finite capacities, and for
    ///   capacities off the half-hour grid under [`Granularity::Strict`].
    /// - `CapacityTooLarge` when the capacity or the table it implies exceeds
    ///   the configured [`SolverLimits`].
    ///
    /// Both are reported before any table is allocated.
    pub fn solve<'t>(&self, tasks: &'t [Task], capacity_hours: f64) -> Result<DpResult<'t>> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "dp_solve",
            tasks = tasks.len(),
            capacity_hours,
            mode = ?self.mode
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let units = capacity_units(capacity_hours, self.granularity)?;
        let rolling = match self.block_size {
            Some(b) => RollingRow::with_block_size(b.max(1)),
            None => RollingRow::new(),
        };
        let rows = match self.mode {
            TableMode::Full => tasks.len() + 1,
            TableMode::Rolling => rolling.held_rows(tasks.len()),
        };
        self.limits.check_table(rows, units)?;
        let capacity = usize::try_from(units).map_err(|_| ScheduleError::CapacityTooLarge {
            units,
            cells: units.saturating_add(1),
            limit: usize::MAX as u64,
        })?;

        let items: Vec<Item> = tasks.iter().map(Item::from).collect();
        let strategy: &dyn ExactStrategy = match self.mode {
            TableMode::Full => &FullTable,
            TableMode::Rolling => &rolling,
        };
        let outcome = strategy.solve_items(&items, capacity);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            strategy = ?strategy.mode(),
            chosen = outcome.chosen.len(),
            value = outcome.total_value,
            used_units = outcome.used_units,
            "dp solve finished"
        );

        Ok(DpResult::from_outcome(tasks, outcome, capacity))
    }
}
