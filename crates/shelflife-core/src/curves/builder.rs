//! Per-temperature capacity curves over a shared time grid.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use serde::Serialize;

use super::palette::color_for_index;
use crate::decay::{DecayModel, DecayParameters, RatePolicy};
use crate::error::Result;
use crate::temperature::TemperatureRange;
use crate::time_grid::TimeGrid;

/// Remaining capacity over time at one storage temperature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    /// Storage temperature (°C)
    pub temperature: f64,
    /// Monthly loss fraction applied at this temperature
    pub rate: f64,
    /// Display colour, stable for a given position in the range
    pub color: &'static str,
    /// Capacity (%) per time-grid sample
    pub capacities: Vec<f64>,
}

impl Curve {
    /// Capacity at the last time sample.
    pub fn final_capacity(&self) -> f64 {
        self.capacities.last().copied().unwrap_or(0.0)
    }
}

/// All curves of one evaluation, keyed by temperature in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSet {
    times: TimeGrid,
    curves: BTreeMap<OrderedFloat<f64>, Curve>,
}

impl CurveSet {
    pub fn times(&self) -> &TimeGrid {
        &self.times
    }

    pub fn get(&self, temperature: f64) -> Option<&Curve> {
        self.curves.get(&OrderedFloat(temperature))
    }

    /// Curves in ascending temperature order.
    pub fn iter(&self) -> impl Iterator<Item = &Curve> {
        self.curves.values()
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.curves.keys().map(|t| t.into_inner()).collect()
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

/// Evaluate the decay model once per temperature in `temperatures`.
///
/// # Errors
///
/// Propagates the first model failure, e.g. a `Domain` error for a
/// temperature whose rate exceeds 1 under [`RatePolicy::Strict`].
pub fn build(
    temperatures: &TemperatureRange,
    params: &DecayParameters,
    times: &TimeGrid,
    policy: RatePolicy,
) -> Result<CurveSet> {
    let model = DecayModel::new(*params, policy);
    let mut curves = BTreeMap::new();

    for (index, &temperature) in temperatures.values().iter().enumerate() {
        let capacities = model.capacities(temperature, times.points())?;
        curves.insert(
            OrderedFloat(temperature),
            Curve {
                temperature,
                rate: model.rate(temperature),
                color: color_for_index(index),
                capacities,
            },
        );
    }

    tracing::debug!(
        curves = curves.len(),
        samples = times.len(),
        policy = %policy,
        "built curve set"
    );

    Ok(CurveSet {
        times: times.clone(),
        curves,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use approx::assert_relative_eq;

    fn default_inputs() -> (TemperatureRange, DecayParameters, TimeGrid) {
        (
            TemperatureRange::new(-15.0, 40.0, 5.0).unwrap(),
            DecayParameters::with_defaults(100.0).unwrap(),
            TimeGrid::new(12.0).unwrap(),
        )
    }

    #[test]
    fn one_curve_per_temperature() {
        let (range, params, times) = default_inputs();
        let set = build(&range, &params, &times, RatePolicy::Strict).unwrap();
        assert_eq!(set.len(), range.len());
        assert_eq!(set.temperatures(), range.values());
        assert!(set.iter().all(|c| c.capacities.len() == times.len()));
    }

    #[test]
    fn colours_follow_range_position() {
        let (range, params, times) = default_inputs();
        let set = build(&range, &params, &times, RatePolicy::Strict).unwrap();
        let colors: Vec<_> = set.iter().map(|c| c.color).collect();
        assert_eq!(colors[0], "#636EFA");
        assert_eq!(colors[8], colors[0]);
        assert_eq!(colors[9], colors[1]);
    }

    #[test]
    fn warmer_curves_end_lower() {
        let (range, params, times) = default_inputs();
        let set = build(&range, &params, &times, RatePolicy::Strict).unwrap();
        let finals: Vec<_> = set.iter().map(Curve::final_capacity).collect();
        assert!(finals.windows(2).all(|w| w[0] > w[1]));
        assert_relative_eq!(
            set.get(25.0).unwrap().final_capacity(),
            100.0 * 0.97f64.powf(12.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn strict_policy_fails_whole_set_on_runaway_rate() {
        let range = TemperatureRange::new(25.0, 60.0, 5.0).unwrap();
        let params = DecayParameters::new(100.0, 25.0, 0.2, None).unwrap();
        let times = TimeGrid::new(1.0).unwrap();
        let err = build(&range, &params, &times, RatePolicy::Strict).unwrap_err();
        assert!(matches!(err, CoreError::Domain(_)));

        let set = build(&range, &params, &times, RatePolicy::Clamp).unwrap();
        assert_eq!(set.len(), range.len());
        assert!(set.iter().all(|c| c.rate < 1.0));
    }
}
