//! Strategy seam for the exact solver.
//!
//! Both DP representations implement [`ExactStrategy`] over plain
//! `(weight, value)` items in half-hour units, so they can be swapped without
//! touching validation or result assembly in [`DpSolver`](crate::DpSolver).
//!
//! Implementations must agree on:
//! - the recurrence `dp[i][w] = max(dp[i-1][w], value_i + dp[i-1][w - weight_i])`;
//! - the tie-break: an item is taken only when including it is *strictly*
//!   better than excluding it;
//! - reconstruction by walking the take decisions from `(n, T)` downwards.
//!
//! Under those rules every strategy returns the same chosen indices and the
//! same total value for the same input.

use serde::Serialize;

use crate::config::TableMode;
use crate::solvers::{DpTable, RollingTable};
use crate::task::Task;

/// A task reduced to its knapsack weight (half-hour units) and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Item {
    pub weight: usize,
    pub value: u64,
}

impl From<&Task> for Item {
    fn from(task: &Task) -> Self {
        Self {
            weight: task.duration_units() as usize,
            value: u64::from(task.productivity()),
        }
    }
}

/// Table data retained by a strategy after a solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum TableSnapshot {
    Full(DpTable),
    Rolling(RollingTable),
}

impl TableSnapshot {
    pub fn mode(&self) -> TableMode {
        match self {
            TableSnapshot::Full(_) => TableMode::Full,
            TableSnapshot::Rolling(_) => TableMode::Rolling,
        }
    }

    /// `dp[n][T]`.
    pub fn optimum(&self) -> u64 {
        match self {
            TableSnapshot::Full(table) => table.optimum(),
            TableSnapshot::Rolling(table) => table.optimum(),
        }
    }
}

/// Result of one exact solve over items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactOutcome {
    /// Indices of chosen items, ascending.
    pub chosen: Vec<usize>,
    /// Sum of chosen weights.
    pub used_units: usize,
    /// Sum of chosen values; always equals `table.optimum()`.
    pub total_value: u64,
    pub table: TableSnapshot,
}

impl ExactOutcome {
    pub(crate) fn new(items: &[Item], chosen: Vec<usize>, table: TableSnapshot) -> Self {
        let used_units = chosen.iter().map(|&i| items[i].weight).sum();
        let total_value = chosen.iter().map(|&i| items[i].value).sum();
        Self {
            chosen,
            used_units,
            total_value,
            table,
        }
    }
}

/// An exact 0/1 knapsack strategy.
pub trait ExactStrategy {
    /// Representation produced by this strategy.
    fn mode(&self) -> TableMode;

    /// Solve for `capacity` half-hour units.
    ///
    /// Callers validate the capacity against their allocation limits first;
    /// implementations allocate without further checks.
    fn solve_items(&self, items: &[Item], capacity: usize) -> ExactOutcome;
}
