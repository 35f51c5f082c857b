//! Error model for the scheduling engine.
//!
//! Every variant is a precondition failure: it is raised before any DP table
//! is allocated and leaves no partial output behind.

use thiserror::Error;

/// Errors surfaced by task construction, configuration and the solvers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// The loader handed over no task collection at all.
    ///
    /// An empty collection is valid and is not reported here.
    #[error("task collection is missing")]
    InvalidInput,

    #[error("invalid capacity {hours}h: {reason}")]
    InvalidCapacity { hours: f64, reason: &'static str },

    /// The requested table would exceed the configured allocation limits.
    #[error("capacity of {units} half-hour units needs {cells} table cells, limit is {limit}")]
    CapacityTooLarge { units: u64, cells: u64, limit: u64 },

    #[error("invalid task '{name}': {reason}")]
    InvalidTask { name: String, reason: &'static str },

    #[error("invalid value for {key}: {value}")]
    Config { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
