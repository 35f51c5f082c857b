//! Solvers for the task-selection knapsack.
//!
//! - [`dp`]      : validated exact solver, dispatching to a table strategy.
//! - [`full`]    : full 2-D value/take tables, O(n·T) space.
//! - [`rolling`] : one rolling row with √n checkpoints, O(√n·T) space.
//! - [`greedy`]  : value-density heuristic, O(n log n).

pub mod dp;
pub mod full;
pub mod greedy;
pub mod rolling;

pub use dp::{DpResult, DpSolver};
pub use full::{DpTable, FullTable, PathStep};
pub use greedy::{GreedyResult, GreedySolver, RankedTask};
pub use rolling::{RollingRow, RollingTable};

use crate::traits::Item;

/// One cell of the recurrence: `(dp[i][w], take[i][w])` from row `i - 1`.
///
/// Ties keep the item out.
#[inline]
pub(crate) fn decide(prev: &[u64], w: usize, item: Item) -> (u64, bool) {
    let without = prev[w];
    if item.weight <= w {
        let with = item.value + prev[w - item.weight];
        if with > without {
            return (with, true);
        }
    }
    (without, false)
}

/// Row `i` computed from row `i - 1`.
pub(crate) fn next_row(prev: &[u64], item: Item) -> Vec<u64> {
    (0..prev.len()).map(|w| decide(prev, w, item).0).collect()
}
