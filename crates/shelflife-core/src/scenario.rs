//! Immutable evaluation inputs and the full recompute pipeline.
//!
//! A [`Scenario`] is built once from configuration (or directly), checked
//! against the input limits, and evaluated from scratch into curves, the
//! highlighted band and the chart payload.

use serde::Serialize;

use crate::chart::ChartModel;
use crate::curves::{build, Curve, CurveSet, HighlightBand};
use crate::decay::{DecayParameters, RatePolicy};
use crate::error::{Result, ValidationError};
use crate::storage::Config;
use crate::temperature::TemperatureRange;
use crate::time_grid::{StorageDuration, TimeGrid};

/// Accepted initial charge (%), inclusive.
pub const CAPACITY_PERCENT_LIMITS: (u32, u32) = (50, 100);
/// Accepted lower end of the temperature range (°C), inclusive.
pub const MIN_TEMP_LIMITS: (i32, i32) = (-20, 25);
/// Accepted upper end of the temperature range (°C), inclusive.
pub const MAX_TEMP_LIMITS: (i32, i32) = (25, 60);
/// Accepted temperature step (°C), inclusive.
pub const TEMP_STEP_LIMITS: (i32, i32) = (1, 10);

/// Validated inputs of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub params: DecayParameters,
    pub duration: StorageDuration,
    pub temperatures: TemperatureRange,
    /// Highlight endpoints as selected, in either order.
    pub highlight: (f64, f64),
    pub policy: RatePolicy,
}

/// Result of evaluating a scenario.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub curves: CurveSet,
    pub band: Option<HighlightBand>,
    pub chart: ChartModel,
}

impl Scenario {
    /// Build a scenario from configuration, enforcing the input limits.
    pub fn from_config(config: &Config) -> Result<Self, ValidationError> {
        let battery = &config.battery;
        check_limit(
            "battery.initial_capacity_percent",
            battery.initial_capacity_percent as f64,
            CAPACITY_PERCENT_LIMITS.0 as f64,
            CAPACITY_PERCENT_LIMITS.1 as f64,
        )?;
        let temp = &config.temperature;
        check_i32("temperature.min", temp.min, MIN_TEMP_LIMITS)?;
        check_i32("temperature.max", temp.max, MAX_TEMP_LIMITS)?;
        check_i32("temperature.step", temp.step, TEMP_STEP_LIMITS)?;

        let params = DecayParameters::new(
            battery.initial_capacity_percent as f64,
            battery.base_temp_celsius,
            battery.base_rate_per_month,
            battery.nominal_capacity_ah,
        )?;
        let duration = StorageDuration::new(
            config.storage.months,
            config.storage.days,
            config.storage.hours,
        )?;
        let temperatures =
            TemperatureRange::new(temp.min as f64, temp.max as f64, temp.step as f64)?;

        let (default_start, default_end) = temperatures.default_highlight();
        let highlight = (
            config.highlight.start.map(f64::from).unwrap_or(default_start),
            config.highlight.end.map(f64::from).unwrap_or(default_end),
        );
        // Reject endpoints outside the range before any evaluation work.
        HighlightBand::select(highlight.0, highlight.1, &temperatures)?;

        Ok(Self {
            params,
            duration,
            temperatures,
            highlight,
            policy: config.model.rate_policy,
        })
    }

    pub fn time_grid(&self) -> Result<TimeGrid, ValidationError> {
        TimeGrid::for_duration(&self.duration)
    }

    /// Recompute every curve, the band and the chart.
    pub fn evaluate(&self) -> Result<Evaluation> {
        let times = self.time_grid()?;
        let curves = build(&self.temperatures, &self.params, &times, self.policy)?;
        let band = HighlightBand::select(self.highlight.0, self.highlight.1, &self.temperatures)?;
        let chart = ChartModel::new(&curves, band, &self.params)?;

        tracing::debug!(
            temperatures = self.temperatures.len(),
            total_months = times.total_months(),
            band = band.is_some(),
            "evaluated scenario"
        );

        Ok(Evaluation {
            curves,
            band,
            chart,
        })
    }

    /// Evaluate one temperature outside the configured range.
    pub fn curve_at(&self, temperature: f64) -> Result<(TimeGrid, Curve)> {
        let times = self.time_grid()?;
        let single = TemperatureRange::from_values(vec![temperature])?;
        let curves = build(&single, &self.params, &times, self.policy)?;
        let curve = curves
            .iter()
            .next()
            .cloned()
            .ok_or_else(|| ValidationError::EmptyCollection("curves".into()))?;
        Ok((times, curve))
    }
}

fn check_limit(field: &str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::out_of_range(field, value, min, max));
    }
    Ok(())
}

fn check_i32(field: &str, value: i32, limits: (i32, i32)) -> Result<(), ValidationError> {
    check_limit(field, value as f64, limits.0 as f64, limits.1 as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn default_config_evaluates() {
        let scenario = Scenario::from_config(&Config::default()).unwrap();
        assert_eq!(scenario.highlight, (-15.0, -10.0));

        let eval = scenario.evaluate().unwrap();
        assert_eq!(eval.curves.len(), 12);
        assert_eq!(eval.curves.times().len(), 11);
        assert_eq!(eval.chart.series.len(), 12);
        let band = eval.band.unwrap();
        assert_eq!((band.lower(), band.upper()), (-15.0, -10.0));
    }

    #[test]
    fn input_limits_are_enforced() {
        let mut cfg = Config::default();
        cfg.battery.initial_capacity_percent = 40;
        assert!(matches!(
            Scenario::from_config(&cfg),
            Err(ValidationError::OutOfRange { .. })
        ));

        let mut cfg = Config::default();
        cfg.temperature.max = 61;
        assert!(Scenario::from_config(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.temperature.step = 0;
        assert!(Scenario::from_config(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.storage.hours = 24;
        assert!(Scenario::from_config(&cfg).is_err());
    }

    #[test]
    fn highlight_must_be_in_range() {
        let mut cfg = Config::default();
        cfg.highlight.start = Some(12);
        assert!(matches!(
            Scenario::from_config(&cfg),
            Err(ValidationError::NotAMember { .. })
        ));
    }

    #[test]
    fn equal_highlight_yields_no_band() {
        let mut cfg = Config::default();
        cfg.highlight.start = Some(20);
        cfg.highlight.end = Some(20);
        let eval = Scenario::from_config(&cfg).unwrap().evaluate().unwrap();
        assert!(eval.band.is_none());
        assert!(eval.chart.band.is_none());
    }

    #[test]
    fn runaway_rate_surfaces_domain_error_unless_clamped() {
        let mut cfg = Config::default();
        cfg.battery.base_rate_per_month = 0.2;
        cfg.temperature.max = 60;
        let err = Scenario::from_config(&cfg).unwrap().evaluate().unwrap_err();
        assert!(matches!(err, CoreError::Domain(_)));

        cfg.model.rate_policy = RatePolicy::Clamp;
        assert!(Scenario::from_config(&cfg).unwrap().evaluate().is_ok());
    }

    #[test]
    fn single_temperature_curve() {
        let scenario = Scenario::from_config(&Config::default()).unwrap();
        let (times, curve) = scenario.curve_at(33.0).unwrap();
        assert_eq!(curve.temperature, 33.0);
        assert_eq!(curve.capacities.len(), times.len());
    }
}
