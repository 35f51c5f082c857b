//! Rolling-row 0/1 knapsack with checkpointed reconstruction.
//!
//! The forward pass keeps a single row of `T + 1` values, updating capacities
//! from `T` down to each item's weight so an item is never counted twice, and
//! marks in `last_item_at[w]` the last item that improved capacity `w`.
//!
//! A single row cannot be walked backwards, so every `B` items (⌈√n⌉ by
//! default) the row is checkpointed into a [`RowBlock`]. Reconstruction
//! visits blocks last to first, replays the at most `B` rows of the current
//! block from its checkpoint and applies the same strict take test as the
//! full table. Working memory is `O((n / B + B) · T)` and the chosen set is
//! identical to [`FullTable`](super::FullTable)'s.

use serde::Serialize;

use super::{decide, next_row};
use crate::blocks::RowBlock;
use crate::config::TableMode;
use crate::traits::{ExactOutcome, ExactStrategy, Item, TableSnapshot};
use crate::utils::default_block_size;

/// What the rolling strategy keeps after a solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollingTable {
    best: Vec<u64>,
    last_item_at: Vec<Option<usize>>,
    block_size: usize,
    checkpoints: usize,
}

impl RollingTable {
    /// Final row: `best()[w]` is the optimum for capacity `w`.
    pub fn best(&self) -> &[u64] {
        &self.best
    }

    /// Last item index that improved each capacity, if any did.
    pub fn last_item_at(&self) -> &[Option<usize>] {
        &self.last_item_at
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of checkpoint rows the solve held.
    pub fn checkpoints(&self) -> usize {
        self.checkpoints
    }

    pub fn optimum(&self) -> u64 {
        self.best.last().copied().unwrap_or(0)
    }
}

/// Strategy keeping one rolling row plus periodic checkpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct RollingRow {
    block_size: Option<usize>,
}

impl RollingRow {
    /// Checkpoint every ⌈√n⌉ items.
    pub fn new() -> Self {
        Self { block_size: None }
    }

    /// Checkpoint every `block_size` items.
    ///
    /// # Panics
    /// Panics if `block_size == 0`.
    pub fn with_block_size(block_size: usize) -> Self {
        assert!(block_size > 0, "block_size must be positive");
        Self {
            block_size: Some(block_size),
        }
    }

    /// Block size used for `num_items` items.
    pub fn block_size_for(&self, num_items: usize) -> usize {
        self.block_size
            .unwrap_or_else(|| default_block_size(num_items))
            .max(1)
    }

    /// Rows of `T + 1` cells held at peak for `num_items` items.
    ///
    /// One checkpoint per block plus the rows of the block being replayed,
    /// which is never more than `num_items`. At least the live row is held.
    pub fn held_rows(&self, num_items: usize) -> usize {
        let b = self.block_size_for(num_items);
        (num_items.div_ceil(b) + b.min(num_items)).max(1)
    }

    /// Forward pass: final row, improvement markers and checkpoints.
    fn forward(
        &self,
        items: &[Item],
        capacity: usize,
    ) -> (Vec<u64>, Vec<Option<usize>>, Vec<RowBlock>) {
        let b = self.block_size_for(items.len());
        let mut row = vec![0u64; capacity + 1];
        let mut last_item_at = vec![None; capacity + 1];
        let mut blocks = Vec::with_capacity(items.len().div_ceil(b));

        for start in (0..items.len()).step_by(b) {
            let end = (start + b).min(items.len());
            blocks.push(RowBlock {
                start,
                end,
                row: row.clone(),
            });
            for (index, &item) in items.iter().enumerate().take(end).skip(start) {
                relax(&mut row, &mut last_item_at, index, item);
            }
        }

        (row, last_item_at, blocks)
    }
}

impl ExactStrategy for RollingRow {
    fn mode(&self) -> TableMode {
        TableMode::Rolling
    }

    fn solve_items(&self, items: &[Item], capacity: usize) -> ExactOutcome {
        let (best, last_item_at, blocks) = self.forward(items, capacity);
        let chosen = replay(items, &blocks, capacity);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            items = items.len(),
            cols = capacity + 1,
            checkpoints = blocks.len(),
            chosen = chosen.len(),
            "rolling row solved"
        );
        let table = RollingTable {
            best,
            last_item_at,
            block_size: self.block_size_for(items.len()),
            checkpoints: blocks.len(),
        };
        ExactOutcome::new(items, chosen, TableSnapshot::Rolling(table))
    }
}

/// In-place 0/1 update of `row` with item `index`.
fn relax(row: &mut [u64], last_item_at: &mut [Option<usize>], index: usize, item: Item) {
    for w in (item.weight..row.len()).rev() {
        let with = row[w - item.weight] + item.value;
        if with > row[w] {
            row[w] = with;
            last_item_at[w] = Some(index);
        }
    }
}

/// Walk the take decisions from `(n, capacity)` back to row 0, one block at a time.
fn replay(items: &[Item], blocks: &[RowBlock], capacity: usize) -> Vec<usize> {
    let mut chosen = Vec::new();
    let mut w = capacity;
    let mut rows: Vec<Vec<u64>> = Vec::new();

    for block in blocks.iter().rev() {
        if block.is_empty() {
            continue;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(start = block.start, len = block.len(), w, "replaying block");

        // rows[k] = dp[block.start + k]
        rows.clear();
        rows.push(block.row.clone());
        for &item in &items[block.start..block.start + block.len() - 1] {
            let next = next_row(&rows[rows.len() - 1], item);
            rows.push(next);
        }

        for i in (block.start..block.end).rev() {
            let item = items[i];
            let (_, taken) = decide(&rows[i - block.start], w, item);
            if taken {
                chosen.push(i);
                w -= item.weight;
            }
        }
    }

    chosen.reverse();
    chosen
}
