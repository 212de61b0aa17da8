//! Ordered set of storage temperatures to evaluate.

use serde::Serialize;

use crate::error::ValidationError;

/// Two temperatures closer than this are the same member.
const MEMBER_EPSILON: f64 = 1e-9;

/// Upper bound on the number of temperatures one range may hold.
pub const MAX_RANGE_MEMBERS: usize = 10_000;

/// Ascending, duplicate-free temperatures (°C).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureRange {
    values: Vec<f64>,
}

impl TemperatureRange {
    /// Temperatures from `min` to `max` inclusive in `step` increments.
    ///
    /// Each member is computed as `min + i * step`, so rounding does not
    /// accumulate along the range.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, ValidationError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ValidationError::invalid(
                "temperature",
                "range bounds must be finite",
            ));
        }
        if min > max {
            return Err(ValidationError::invalid(
                "temperature.min",
                format!("min ({min}) must not exceed max ({max})"),
            ));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(ValidationError::invalid(
                "temperature.step",
                format!("must be positive, got {step}"),
            ));
        }

        let count = ((max - min) / step + MEMBER_EPSILON).floor() + 1.0;
        if !count.is_finite() || count > MAX_RANGE_MEMBERS as f64 {
            return Err(ValidationError::invalid(
                "temperature.step",
                format!(
                    "step {step} over {min}..{max} gives more than {MAX_RANGE_MEMBERS} temperatures"
                ),
            ));
        }
        let count = count as usize;
        let values = (0..count).map(|i| min + i as f64 * step).collect();
        Self::from_values(values)
    }

    /// Range from arbitrary temperatures; sorted and de-duplicated.
    pub fn from_values(mut values: Vec<f64>) -> Result<Self, ValidationError> {
        if values.is_empty() {
            return Err(ValidationError::EmptyCollection("temperatures".into()));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(ValidationError::invalid(
                "temperatures",
                format!("must be finite, got {bad}"),
            ));
        }
        values.sort_by(f64::total_cmp);
        values.dedup_by(|a, b| (*a - *b).abs() < MEMBER_EPSILON);
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first(&self) -> f64 {
        self.values[0]
    }

    /// Index of `temperature` in the range, if it is a member.
    pub fn position(&self, temperature: f64) -> Option<usize> {
        self.values
            .iter()
            .position(|v| (v - temperature).abs() < MEMBER_EPSILON)
    }

    pub fn contains(&self, temperature: f64) -> bool {
        self.position(temperature).is_some()
    }

    /// Member matching `temperature`, or `NotAMember` naming `field`.
    pub fn member(&self, field: &str, temperature: f64) -> Result<f64, ValidationError> {
        self.position(temperature)
            .map(|i| self.values[i])
            .ok_or_else(|| ValidationError::NotAMember {
                field: field.to_string(),
                value: temperature,
            })
    }

    /// Default highlight pair: the first member and the one after it.
    pub fn default_highlight(&self) -> (f64, f64) {
        let end = self.values.get(1).copied().unwrap_or(self.values[0]);
        (self.values[0], end)
    }
}

/// Format a temperature without a trailing `.0` for whole degrees.
pub fn format_celsius(temperature: f64) -> String {
    if temperature.fract() == 0.0 {
        format!("{temperature:.0}")
    } else {
        format!("{temperature}")
    }
}
