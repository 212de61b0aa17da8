//! Storage duration and the sampled time axis.
//!
//! Storage time is entered as months/days/hours and folded into one
//! fractional month count using a 30.42-day month.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Average days per month used for every unit conversion.
pub const DAYS_PER_MONTH: f64 = 30.42;

pub const HOURS_PER_DAY: f64 = 24.0;

/// Sampling step of the time axis (months).
pub const TIME_STEP_MONTHS: f64 = 0.1;

pub const MAX_STORAGE_MONTHS: u32 = 120;
pub const MAX_EXTRA_DAYS: u32 = 31;
pub const MAX_EXTRA_HOURS: u32 = 23;

/// Upper bound on grid length.
pub const MAX_GRID_POINTS: usize = 100_000;

/// Tolerance for snapping a total onto a whole number of steps.
const SNAP_EPSILON: f64 = 1e-9;

/// Storage time as entered: whole months plus extra days and hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StorageDuration {
    pub months: u32,
    pub days: u32,
    pub hours: u32,
}

impl StorageDuration {
    /// Create a duration, checking each component against its bound.
    pub fn new(months: u32, days: u32, hours: u32) -> Result<Self, ValidationError> {
        let duration = Self {
            months,
            days,
            hours,
        };
        duration.validate()?;
        Ok(duration)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_bound("storage.months", self.months, MAX_STORAGE_MONTHS)?;
        check_bound("storage.days", self.days, MAX_EXTRA_DAYS)?;
        check_bound("storage.hours", self.hours, MAX_EXTRA_HOURS)?;
        Ok(())
    }

    /// Total storage time in fractional months.
    pub fn total_months(&self) -> f64 {
        self.months as f64
            + self.days as f64 / DAYS_PER_MONTH
            + self.hours as f64 / HOURS_PER_DAY / DAYS_PER_MONTH
    }
}

fn check_bound(field: &str, value: u32, max: u32) -> Result<(), ValidationError> {
    if value > max {
        return Err(ValidationError::out_of_range(
            field,
            value as f64,
            0.0,
            max as f64,
        ));
    }
    Ok(())
}

/// Convert elapsed months to days.
pub fn months_to_days(months: f64) -> f64 {
    months * DAYS_PER_MONTH
}

/// Convert elapsed months to hours.
pub fn months_to_hours(months: f64) -> f64 {
    months_to_days(months) * HOURS_PER_DAY
}

/// Strictly increasing elapsed-time samples in months, starting at zero.
///
/// Interior samples sit on multiples of the step; the last sample is the
/// requested total itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeGrid {
    step: f64,
    points: Vec<f64>,
}

impl TimeGrid {
    /// Grid from zero to `total_months` in 0.1-month steps.
    pub fn new(total_months: f64) -> Result<Self, ValidationError> {
        Self::with_step(total_months, TIME_STEP_MONTHS)
    }

    pub fn with_step(total_months: f64, step: f64) -> Result<Self, ValidationError> {
        if !total_months.is_finite() || total_months < 0.0 {
            return Err(ValidationError::invalid(
                "total_months",
                format!("must be a non-negative duration, got {total_months}"),
            ));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(ValidationError::invalid(
                "step",
                format!("must be positive, got {step}"),
            ));
        }

        let ratio = total_months / step;
        let steps = if (ratio - ratio.round()).abs() < SNAP_EPSILON {
            ratio.round()
        } else {
            ratio.ceil()
        };
        if steps + 1.0 > MAX_GRID_POINTS as f64 {
            return Err(ValidationError::invalid(
                "total_months",
                format!("grid would exceed {MAX_GRID_POINTS} points"),
            ));
        }
        let steps = steps as usize;

        let mut points: Vec<f64> = (0..steps).map(|i| i as f64 * step).collect();
        if steps == 0 {
            points.push(0.0);
        } else {
            points.push(total_months);
        }

        Ok(Self { step, points })
    }

    /// Grid covering a storage duration.
    pub fn for_duration(duration: &StorageDuration) -> Result<Self, ValidationError> {
        duration.validate()?;
        Self::new(duration.total_months())
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a grid holds at least the origin.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Final elapsed time (months).
    pub fn total_months(&self) -> f64 {
        self.points.last().copied().unwrap_or(0.0)
    }

    pub fn total_hours(&self) -> f64 {
        months_to_hours(self.total_months())
    }

    /// Samples expressed in days.
    pub fn days(&self) -> Vec<f64> {
        self.points.iter().map(|m| months_to_days(*m)).collect()
    }

    /// Samples expressed in hours.
    pub fn hours(&self) -> Vec<f64> {
        self.points.iter().map(|m| months_to_hours(*m)).collect()
    }
}
