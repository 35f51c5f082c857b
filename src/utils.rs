//! Unit conversions and small helpers shared by the solvers.
//!
//! Durations and capacities are indexed in integer half-hour units so that DP
//! table indices are always exact.

use crate::config::Granularity;
use crate::error::{Result, ScheduleError};

/// Half-hour ticks per hour.
pub const UNITS_PER_HOUR: u32 = 2;

/// Tolerance used when deciding whether `hours * 2` is integral.
const GRANULARITY_EPSILON: f64 = 1e-6;

/// Convert a task duration in hours to half-hour units.
///
/// Returns `None` for non-finite values and values that are not a multiple of
/// half an hour.
pub fn duration_units(hours: f64) -> Option<u64> {
    if !hours.is_finite() {
        return None;
    }
    let scaled = hours * f64::from(UNITS_PER_HOUR);
    let rounded = scaled.round();
    if (scaled - rounded).abs() > GRANULARITY_EPSILON {
        return None;
    }
    Some(rounded.max(0.0) as u64)
}

/// Convert a capacity in hours to half-hour units under the given policy.
///
/// `Truncate` rounds down so that no selection can exceed the stated budget.
pub fn capacity_units(hours: f64, granularity: Granularity) -> Result<u64> {
    if !hours.is_finite() {
        return Err(ScheduleError::InvalidCapacity {
            hours,
            reason: "capacity must be a finite number",
        });
    }
    if hours < 0.0 {
        return Err(ScheduleError::InvalidCapacity {
            hours,
            reason: "capacity must not be negative",
        });
    }
    let scaled = hours * f64::from(UNITS_PER_HOUR);
    match granularity {
        Granularity::Strict => {
            let rounded = scaled.round();
            if (scaled - rounded).abs() > GRANULARITY_EPSILON {
                return Err(ScheduleError::InvalidCapacity {
                    hours,
                    reason: "capacity must be a multiple of 0.5 hours",
                });
            }
            Ok(rounded as u64)
        }
        Granularity::Truncate => {
            let units = (scaled + GRANULARITY_EPSILON).floor() as u64;
            #[cfg(feature = "tracing")]
            {
                if (scaled - units as f64).abs() > GRANULARITY_EPSILON {
                    tracing::warn!(hours, units, "capacity truncated to the nearest half hour");
                }
            }
            Ok(units)
        }
    }
}

/// Convert half-hour units back to hours.
#[inline]
pub fn units_to_hours(units: u64) -> f64 {
    units as f64 / f64::from(UNITS_PER_HOUR)
}

/// Render an hour count without a trailing `.0` for whole hours.
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 && hours.abs() < 1e15 {
        format!("{}", hours as i64)
    } else {
        format!("{hours}")
    }
}

/// Rows between checkpoints for the rolling strategy.
///
/// Balances checkpoint storage (n / B rows) against replay storage (B rows),
/// which is minimised around √n.
#[inline]
pub fn default_block_size(num_items: usize) -> usize {
    if num_items <= 1 {
        1
    } else {
        (num_items as f64).sqrt().ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_one_for_small_n() {
        assert_eq!(default_block_size(0), 1);
        assert_eq!(default_block_size(1), 1);
    }

    #[test]
    fn sqrt_ceiling_behavior() {
        assert_eq!(default_block_size(2), 2);
        assert_eq!(default_block_size(4), 2);
        assert_eq!(default_block_size(5), 3);
        assert_eq!(default_block_size(100), 10);
        assert_eq!(default_block_size(101), 11);
    }

    #[test]
    fn durations_convert_on_half_hours_only() {
        assert_eq!(duration_units(1.5), Some(3));
        assert_eq!(duration_units(2.0), Some(4));
        assert_eq!(duration_units(0.25), None);
        assert_eq!(duration_units(f64::NAN), None);
    }

    #[test]
    fn strict_capacity_rejects_off_grid_values() {
        assert_eq!(capacity_units(5.0, Granularity::Strict), Ok(10));
        assert_eq!(capacity_units(0.0, Granularity::Strict), Ok(0));
        assert!(matches!(
            capacity_units(4.75, Granularity::Strict),
            Err(ScheduleError::InvalidCapacity { .. })
        ));
        assert!(matches!(
            capacity_units(-1.0, Granularity::Strict),
            Err(ScheduleError::InvalidCapacity { .. })
        ));
        assert!(matches!(
            capacity_units(f64::INFINITY, Granularity::Truncate),
            Err(ScheduleError::InvalidCapacity { .. })
        ));
    }

    #[test]
    fn truncate_rounds_down() {
        assert_eq!(capacity_units(4.75, Granularity::Truncate), Ok(9));
        assert_eq!(capacity_units(4.5, Granularity::Truncate), Ok(9));
        assert_eq!(capacity_units(0.2, Granularity::Truncate), Ok(0));
    }

    #[test]
    fn hours_format_like_labels() {
        assert_eq!(format_hours(5.0), "5");
        assert_eq!(format_hours(4.5), "4.5");
        assert_eq!(format_hours(units_to_hours(3)), "1.5");
    }
}
