//! Shaded band between two selected temperature curves.

use serde::{Deserialize, Serialize};

use super::builder::CurveSet;
use crate::error::ValidationError;
use crate::temperature::TemperatureRange;

/// Pair of range members bounding a highlighted region, `lower < upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightBand {
    lower: f64,
    upper: f64,
}

impl HighlightBand {
    /// Select a band from two endpoints in either order.
    ///
    /// Returns `Ok(None)` when both endpoints are the same member.
    ///
    /// # Errors
    ///
    /// `NotAMember` if either endpoint is not in `range`.
    pub fn select(
        start: f64,
        end: f64,
        range: &TemperatureRange,
    ) -> Result<Option<Self>, ValidationError> {
        let start = range.member("highlight.start", start)?;
        let end = range.member("highlight.end", end)?;

        let (lower, upper) = if start <= end { (start, end) } else { (end, start) };
        if lower == upper {
            return Ok(None);
        }
        Ok(Some(Self { lower, upper }))
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Closed outline of the region between the two curves.
    ///
    /// Walks the upper-temperature curve forward in time, then the
    /// lower-temperature curve backward, as `(months, capacity)` vertices.
    ///
    /// # Errors
    ///
    /// `NotAMember` if either endpoint has no curve in `curves`.
    pub fn polygon(&self, curves: &CurveSet) -> Result<Vec<(f64, f64)>, ValidationError> {
        let missing = |field: &str, value: f64| ValidationError::NotAMember {
            field: field.to_string(),
            value,
        };
        let upper = curves
            .get(self.upper)
            .ok_or_else(|| missing("highlight.upper", self.upper))?;
        let lower = curves
            .get(self.lower)
            .ok_or_else(|| missing("highlight.lower", self.lower))?;
        let times = curves.times().points();

        let forward = times.iter().copied().zip(upper.capacities.iter().copied());
        let backward = times
            .iter()
            .rev()
            .copied()
            .zip(lower.capacities.iter().rev().copied());

        Ok(forward.chain(backward).collect())
    }
}

/// Band polygon for a `(start, end)` selection, or `None` when degenerate.
///
/// Endpoints must be members of `range` and have curves in `curves`.
pub fn highlight(
    start: f64,
    end: f64,
    range: &TemperatureRange,
    curves: &CurveSet,
) -> Result<Option<Vec<(f64, f64)>>, ValidationError> {
    HighlightBand::select(start, end, range)?
        .map(|band| band.polygon(curves))
        .transpose()
}
