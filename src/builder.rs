use crate::config::{Granularity, SchedulerConfig, SolverLimits, TableMode};
use crate::Scheduler;

pub struct SchedulerBuilder {
    config: SchedulerConfig,
}

impl SchedulerBuilder {
    pub fn new() -> Self {
        Self {
            config: SchedulerConfig::default(),
        }
    }
    pub fn from_config(config: SchedulerConfig) -> Self {
        Self { config }
    }
    pub fn table_mode(mut self, mode: TableMode) -> Self {
        self.config.table_mode = mode;
        self
    }
    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.config.granularity = granularity;
        self
    }
    pub fn limits(mut self, limits: SolverLimits) -> Self {
        self.config.limits = limits;
        self
    }
    pub fn max_capacity_units(mut self, units: u64) -> Self {
        self.config.limits.max_capacity_units = units;
        self
    }
    pub fn max_table_cells(mut self, cells: u64) -> Self {
        self.config.limits.max_table_cells = cells;
        self
    }
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.config.block_size = Some(block_size.max(1));
        self
    }
    pub fn build(self) -> Scheduler {
        Scheduler::with_config(self.config)
    }
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
