//! Checkpoint blocks used by the rolling strategy.
//!
//! Each `RowBlock` covers the items `[start, end)` and stores the DP row as it
//! was *before* item `start` was applied, so the rows inside the block can be
//! replayed without the full table.

/// A checkpointed DP row for the item interval `[start, end)`.
#[derive(Debug, Clone)]
pub struct RowBlock {
    /// Index of the first item in the block.
    pub start: usize,
    /// One past the last item in the block.
    pub end: usize,
    /// `dp[start][0..=T]`.
    pub row: Vec<u64>,
}

impl RowBlock {
    /// Number of items covered by the block.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::RowBlock;

    #[test]
    fn zero_length_block_is_empty() {
        let b = RowBlock {
            start: 5,
            end: 5,
            row: vec![0],
        };
        assert_eq!(b.len(), 0);
        assert!(b.is_empty());
    }

    #[test]
    fn typical_block_len() {
        let b = RowBlock {
            start: 2,
            end: 7,
            row: vec![0; 4],
        };
        assert_eq!(b.len(), 5);
        assert!(!b.is_empty());
    }
}
