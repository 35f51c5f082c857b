//! Value-density greedy selection.
//!
//! # Algorithm
//!
//! 1. Rank tasks by productivity per hour, highest first.
//! 2. Walk the ranking and accept every task that still fits.
//!
//! Ratios are compared exactly by cross-multiplying productivity and duration
//! units, so no floating-point rounding can reorder two tasks. The sort is
//! stable: tasks with equal ratios keep their original relative order.
//!
//! # Complexity
//! O(n log n) for the ranking, O(n) for the selection.

use std::cmp::Ordering;

use serde::Serialize;

use crate::config::{Granularity, SchedulerConfig, SolverLimits};
use crate::error::Result;
use crate::task::Task;
use crate::utils::{capacity_units, units_to_hours};

/// A task position together with its value density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedTask {
    pub index: usize,
    pub ratio: f64,
}

/// Selection produced by [`GreedySolver::solve`].
#[derive(Debug, Clone)]
pub struct GreedyResult<'t> {
    /// Chosen tasks in the order they were accepted.
    pub chosen: Vec<&'t Task>,
    /// Positions of the chosen tasks in the input slice, in acceptance order.
    pub chosen_indices: Vec<usize>,
    /// Every task, best ratio first.
    pub ranking: Vec<RankedTask>,
    pub total_units: u64,
    pub total_value: u64,
    pub capacity_units: u64,
}

impl GreedyResult<'_> {
    pub fn total_hours(&self) -> f64 {
        units_to_hours(self.total_units)
    }

    pub fn capacity_hours(&self) -> f64 {
        units_to_hours(self.capacity_units)
    }
}

/// Fast approximate solver; never better than [`DpSolver`](crate::DpSolver).
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySolver {
    granularity: Granularity,
    limits: SolverLimits,
}

impl GreedySolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self {
            granularity: config.granularity,
            limits: config.limits,
        }
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_limits(mut self, limits: SolverLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Accept tasks by descending value density while they fit `capacity_hours`.
    ///
    /// # Errors
    /// The same capacity errors as [`DpSolver::solve`](crate::DpSolver::solve);
    /// no table is built, so only `max_capacity_units` applies.
    pub fn solve<'t>(&self, tasks: &'t [Task], capacity_hours: f64) -> Result<GreedyResult<'t>> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("greedy_solve", tasks = tasks.len(), capacity_hours);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let capacity = capacity_units(capacity_hours, self.granularity)?;
        self.limits.check_capacity(capacity)?;

        let order = rank(tasks);
        let mut chosen = Vec::new();
        let mut chosen_indices = Vec::new();
        let mut used = 0u64;
        let mut value = 0u64;

        for &index in &order {
            let task = &tasks[index];
            let duration = u64::from(task.duration_units());
            if used + duration <= capacity {
                used += duration;
                value += u64::from(task.productivity());
                chosen.push(task);
                chosen_indices.push(index);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(chosen = chosen.len(), value, used_units = used, "greedy solve finished");

        Ok(GreedyResult {
            chosen,
            chosen_indices,
            ranking: order
                .into_iter()
                .map(|index| RankedTask {
                    index,
                    ratio: tasks[index].value_density(),
                })
                .collect(),
            total_units: used,
            total_value: value,
            capacity_units: capacity,
        })
    }
}

/// Task indices ordered by descending value density; ties keep input order.
pub fn rank(tasks: &[Task]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..tasks.len()).collect();
    order.sort_by(|&a, &b| compare_density(&tasks[b], &tasks[a]));
    order
}

/// Exact comparison of `p_a / d_a` against `p_b / d_b`.
///
/// A zero duration compares above every positive one.
fn compare_density(a: &Task, b: &Task) -> Ordering {
    let lhs = u64::from(a.productivity()) * u64::from(b.duration_units());
    let rhs = u64::from(b.productivity()) * u64::from(a.duration_units());
    lhs.cmp(&rhs)
}
