//! Task entity.
//!
//! A task is a unit of work with a duration (whole or half hours) and a
//! productivity score. Durations are stored as half-hour units so the solvers
//! never index tables with floating-point values.
//!
//! # Invariants
//! - `duration_units >= 1`
//! - `productivity >= 1`

use std::fmt;

use serde::Serialize;

use crate::error::{Result, ScheduleError};
use crate::utils::{duration_units, format_hours, units_to_hours};

/// A candidate task for the time budget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Task {
    name: String,
    duration_units: u32,
    productivity: u32,
}

impl Task {
    /// Creates a task, validating duration and productivity.
    ///
    /// # Errors
    /// `InvalidTask` when the duration is not a positive multiple of half an
    /// hour or when the productivity is zero.
    ///
    /// ```
    /// use task_knapsack::Task;
    ///
    /// let task = Task::new("Write report", 1.5, 4).unwrap();
    /// assert_eq!(task.duration_units(), 3);
    /// assert!(Task::new("Nap", 0.0, 1).is_err());
    /// ```
    pub fn new(name: impl Into<String>, duration_hours: f64, productivity: u32) -> Result<Self> {
        let name = name.into();
        let duration_units = checked_units(&name, duration_hours)?;
        check_productivity(&name, productivity)?;
        Ok(Self {
            name,
            duration_units,
            productivity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration_hours(&self) -> f64 {
        units_to_hours(u64::from(self.duration_units))
    }

    /// Duration in half-hour units.
    pub fn duration_units(&self) -> u32 {
        self.duration_units
    }

    pub fn productivity(&self) -> u32 {
        self.productivity
    }

    /// Productivity per hour. A zero duration ranks as infinitely dense.
    pub fn value_density(&self) -> f64 {
        if self.duration_units == 0 {
            f64::INFINITY
        } else {
            f64::from(self.productivity) / self.duration_hours()
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replaces the duration; the task is left untouched on error.
    pub fn set_duration(&mut self, duration_hours: f64) -> Result<()> {
        self.duration_units = checked_units(&self.name, duration_hours)?;
        Ok(())
    }

    /// Replaces the productivity; the task is left untouched on error.
    pub fn set_productivity(&mut self, productivity: u32) -> Result<()> {
        check_productivity(&self.name, productivity)?;
        self.productivity = productivity;
        Ok(())
    }

    /// A copy of this task named `"<name> (Copy)"`.
    pub fn duplicate(&self) -> Self {
        Self {
            name: format!("{} (Copy)", self.name),
            ..self.clone()
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            self.name,
            format_hours(self.duration_hours()),
            self.productivity
        )
    }
}

fn checked_units(name: &str, hours: f64) -> Result<u32> {
    if !(hours > 0.0) {
        return Err(ScheduleError::InvalidTask {
            name: name.to_string(),
            reason: "duration must be positive",
        });
    }
    let units = duration_units(hours).ok_or_else(|| ScheduleError::InvalidTask {
        name: name.to_string(),
        reason: "duration must be a multiple of 0.5 hours",
    })?;
    u32::try_from(units).map_err(|_| ScheduleError::InvalidTask {
        name: name.to_string(),
        reason: "duration is too long",
    })
}

fn check_productivity(name: &str, productivity: u32) -> Result<()> {
    if productivity == 0 {
        return Err(ScheduleError::InvalidTask {
            name: name.to_string(),
            reason: "productivity must be positive",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_half_hour_units() {
        let task = Task::new("Email", 1.5, 3).unwrap();
        assert_eq!(task.duration_units(), 3);
        assert_eq!(task.duration_hours(), 1.5);
        assert_eq!(task.value_density(), 2.0);
    }

    #[test]
    fn rejects_invalid_durations() {
        for hours in [0.0, -2.0, 0.75, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(Task::new("T", hours, 1), Err(ScheduleError::InvalidTask { .. })),
                "accepted {hours}"
            );
        }
    }

    #[test]
    fn rejects_zero_productivity() {
        assert!(matches!(
            Task::new("T", 1.0, 0),
            Err(ScheduleError::InvalidTask { .. })
        ));
    }

    #[test]
    fn failed_mutation_keeps_previous_state() {
        let mut task = Task::new("Gym", 2.0, 5).unwrap();
        assert!(task.set_duration(0.3).is_err());
        assert!(task.set_productivity(0).is_err());
        assert_eq!(task.duration_units(), 4);
        assert_eq!(task.productivity(), 5);

        task.set_duration(2.5).unwrap();
        task.set_productivity(7).unwrap();
        task.set_name("Swim");
        assert_eq!(task.to_string(), "Swim, 2.5, 7");
    }

    #[test]
    fn duplicate_appends_copy_suffix() {
        let task = Task::new("Read", 1.0, 2).unwrap();
        let copy = task.duplicate();
        assert_eq!(copy.name(), "Read (Copy)");
        assert_eq!(copy.duration_units(), task.duration_units());
        assert_eq!(copy.productivity(), task.productivity());
    }
}
