//! Solver configuration.
//!
//! Defaults can be overridden from the environment:
//! - `TASK_KNAPSACK_TABLE_MODE` - `full` or `rolling`.
//! - `TASK_KNAPSACK_GRANULARITY` - `strict` or `truncate`.
//! - `TASK_KNAPSACK_MAX_CAPACITY_UNITS` - largest accepted capacity, in half hours.
//! - `TASK_KNAPSACK_MAX_TABLE_CELLS` - largest full table, in cells.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Which exact-DP representation to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableMode {
    /// Full `(n+1) x (T+1)` value and take tables; required for table export.
    #[default]
    Full,
    /// One rolling row plus checkpoints; no table export.
    Rolling,
}

impl FromStr for TableMode {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "rolling" | "compressed" => Ok(Self::Rolling),
            other => Err(ScheduleError::Config {
                key: "table mode".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// How capacities that are not a multiple of half an hour are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Reject with `InvalidCapacity`.
    #[default]
    Strict,
    /// Round down to the nearest half hour.
    Truncate,
}

impl FromStr for Granularity {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "truncate" => Ok(Self::Truncate),
            other => Err(ScheduleError::Config {
                key: "granularity".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Allocation guards checked before any table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverLimits {
    /// Largest accepted capacity, in half-hour units.
    pub max_capacity_units: u64,
    /// Largest accepted full table, `(n+1) * (T+1)` cells.
    pub max_table_cells: u64,
}

impl Default for SolverLimits {
    fn default() -> Self {
        Self {
            // One leap year of half hours.
            max_capacity_units: 2 * 24 * 366,
            max_table_cells: 1 << 25,
        }
    }
}

impl SolverLimits {
    /// Check a capacity against `max_capacity_units`.
    pub fn check_capacity(&self, units: u64) -> Result<()> {
        if units > self.max_capacity_units {
            return Err(ScheduleError::CapacityTooLarge {
                units,
                cells: units.saturating_add(1),
                limit: self.max_capacity_units,
            });
        }
        Ok(())
    }

    /// Check the capacity and the size of a table with `rows` rows of
    /// `units + 1` cells.
    pub fn check_table(&self, rows: usize, units: u64) -> Result<()> {
        self.check_capacity(units)?;
        let cells = (rows as u64).saturating_mul(units.saturating_add(1));
        if cells > self.max_table_cells {
            return Err(ScheduleError::CapacityTooLarge {
                units,
                cells,
                limit: self.max_table_cells,
            });
        }
        Ok(())
    }
}

/// Complete configuration for a [`Scheduler`](crate::Scheduler).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub table_mode: TableMode,
    pub granularity: Granularity,
    pub limits: SolverLimits,
    /// Checkpoint spacing for the rolling strategy; `None` picks ⌈√n⌉.
    pub block_size: Option<usize>,
}

impl SchedulerConfig {
    /// Defaults overlaid with any `TASK_KNAPSACK_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(value) = read_var("TASK_KNAPSACK_TABLE_MODE") {
            config.table_mode = value.parse()?;
        }
        if let Some(value) = read_var("TASK_KNAPSACK_GRANULARITY") {
            config.granularity = value.parse()?;
        }
        if let Some(value) = read_var("TASK_KNAPSACK_MAX_CAPACITY_UNITS") {
            config.limits.max_capacity_units =
                parse_u64("TASK_KNAPSACK_MAX_CAPACITY_UNITS", &value)?;
        }
        if let Some(value) = read_var("TASK_KNAPSACK_MAX_TABLE_CELLS") {
            config.limits.max_table_cells = parse_u64("TASK_KNAPSACK_MAX_TABLE_CELLS", &value)?;
        }
        Ok(config)
    }
}

fn read_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_u64(key: &str, value: &str) -> Result<u64> {
    value.trim().parse::<u64>().map_err(|_| ScheduleError::Config {
        key: key.to_string(),
        value: value.to_string(),
    })
}
