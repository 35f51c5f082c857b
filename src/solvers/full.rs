//! Full-table 0/1 knapsack.
//!
//! Rows are items (`0..=n`, row 0 is the empty prefix), columns are capacities
//! in half-hour units (`0..=T`). Alongside every value cell the strategy
//! records whether taking the row's item was strictly better, which is what
//! reconstruction and table visualisation read back.
//!
//! With the `parallel` feature each row is filled across threads. A row only
//! reads the previous one, so cell decisions are unchanged.

use serde::Serialize;

use super::decide;
use crate::config::TableMode;
use crate::traits::{ExactOutcome, ExactStrategy, Item, TableSnapshot};

/// Row-major DP value and take tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DpTable {
    rows: usize,
    cols: usize,
    values: Vec<u64>,
    take: Vec<bool>,
    weights: Vec<usize>,
}

/// One row of the backtracking walk from `(n, T)` to row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PathStep {
    /// Table row; row `i` decides item `i - 1`.
    pub row: usize,
    /// Remaining capacity when the walk reaches this row.
    pub capacity_units: usize,
    pub value: u64,
    pub taken: bool,
}

impl DpTable {
    /// Number of rows, `n + 1`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, `T + 1`.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn num_items(&self) -> usize {
        self.rows - 1
    }

    pub fn capacity_units(&self) -> usize {
        self.cols - 1
    }

    /// `dp[i][w]`.
    ///
    /// # Panics
    /// Panics if `i >= rows()` or `w >= cols()`.
    #[inline]
    pub fn value(&self, i: usize, w: usize) -> u64 {
        self.values[self.offset(i, w)]
    }

    /// `take[i][w]`; always false on row 0.
    #[inline]
    pub fn took(&self, i: usize, w: usize) -> bool {
        self.take[self.offset(i, w)]
    }

    pub fn row(&self, i: usize) -> &[u64] {
        &self.values[i * self.cols..(i + 1) * self.cols]
    }

    pub fn take_row(&self, i: usize) -> &[bool] {
        &self.take[i * self.cols..(i + 1) * self.cols]
    }

    /// `dp[n][T]`.
    pub fn optimum(&self) -> u64 {
        self.value(self.num_items(), self.capacity_units())
    }

    /// Walk the take table from `(n, T)` to row 0.
    ///
    /// Steps are returned in walk order (row `n` first).
    pub fn solution_path(&self) -> Vec<PathStep> {
        let mut steps = Vec::with_capacity(self.rows);
        let mut w = self.capacity_units();
        for i in (0..=self.num_items()).rev() {
            let taken = i > 0 && self.took(i, w);
            steps.push(PathStep {
                row: i,
                capacity_units: w,
                value: self.value(i, w),
                taken,
            });
            if taken {
                w -= self.weights[i - 1];
            }
        }
        steps
    }

    /// Chosen item indices in original order.
    pub fn backtrack(&self) -> Vec<usize> {
        let mut chosen: Vec<usize> = self
            .solution_path()
            .into_iter()
            .filter(|step| step.taken)
            .map(|step| step.row - 1)
            .collect();
        chosen.reverse();
        chosen
    }

    #[inline]
    fn offset(&self, i: usize, w: usize) -> usize {
        assert!(w < self.cols, "capacity {w} outside table of {} columns", self.cols);
        i * self.cols + w
    }
}

/// Strategy building the complete `(n+1) x (T+1)` tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullTable;

impl FullTable {
    /// Fill both tables for `items` and `capacity` half-hour units.
    pub fn build(&self, items: &[Item], capacity: usize) -> DpTable {
        let rows = items.len() + 1;
        let cols = capacity + 1;
        let mut values = vec![0u64; rows * cols];
        let mut take = vec![false; rows * cols];

        for (i, &item) in items.iter().enumerate() {
            let (done, rest) = values.split_at_mut((i + 1) * cols);
            let prev = &done[i * cols..];
            let next = &mut rest[..cols];
            let flags = &mut take[(i + 1) * cols..(i + 2) * cols];
            fill_row(prev, next, flags, item);
        }

        DpTable {
            rows,
            cols,
            values,
            take,
            weights: items.iter().map(|item| item.weight).collect(),
        }
    }
}

impl ExactStrategy for FullTable {
    fn mode(&self) -> TableMode {
        TableMode::Full
    }

    fn solve_items(&self, items: &[Item], capacity: usize) -> ExactOutcome {
        let table = self.build(items, capacity);
        let chosen = table.backtrack();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            rows = table.rows(),
            cols = table.cols(),
            chosen = chosen.len(),
            "full table filled"
        );
        ExactOutcome::new(items, chosen, TableSnapshot::Full(table))
    }
}

#[cfg(not(feature = "parallel"))]
fn fill_row(prev: &[u64], next: &mut [u64], flags: &mut [bool], item: Item) {
    for (w, (cell, flag)) in next.iter_mut().zip(flags.iter_mut()).enumerate() {
        (*cell, *flag) = decide(prev, w, item);
    }
}

#[cfg(feature = "parallel")]
fn fill_row(prev: &[u64], next: &mut [u64], flags: &mut [bool], item: Item) {
    use rayon::prelude::*;

    const MIN_CELLS_PER_TASK: usize = 1024;

    next.par_iter_mut()
        .zip(flags.par_iter_mut())
        .enumerate()
        .with_min_len(MIN_CELLS_PER_TASK)
        .for_each(|(w, (cell, flag))| {
            (*cell, *flag) = decide(prev, w, item);
        });
}
