//! Renderer-facing chart payload.

use serde::{Deserialize, Serialize};

use crate::curves::{Curve, CurveSet, HighlightBand};
use crate::decay::{ChargeEstimate, DecayParameters};
use crate::error::ValidationError;
use crate::temperature::format_celsius;
use crate::time_grid::months_to_hours;

pub const CHART_TITLE: &str = "Battery Capacity Retention Over Time";
pub const X_AXIS_TITLE: &str = "Storage Time (Months)";
pub const Y_AXIS_TITLE: &str = "Remaining Capacity (%)";

/// Translucent gold used to shade the highlighted band.
pub const BAND_FILL: &str = "rgba(255, 215, 0, 0.2)";

/// One line per temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub temperature: f64,
    pub color: String,
    pub label: String,
    /// `(months, capacity %)` samples
    pub points: Vec<(f64, f64)>,
}

/// Dot at the end of each line with its hover text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalMarker {
    pub temperature: f64,
    pub color: String,
    pub months: f64,
    pub hours: f64,
    pub capacity: f64,
    pub tooltip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge: Option<ChargeEstimate>,
}

/// Filled region between the two highlighted curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilledBand {
    pub lower: f64,
    pub upper: f64,
    pub fill: String,
    pub polygon: Vec<(f64, f64)>,
}

/// Everything a renderer needs to draw one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartModel {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub series: Vec<LineSeries>,
    pub markers: Vec<TerminalMarker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<FilledBand>,
}

impl ChartModel {
    /// Package a curve set and optional band for rendering.
    ///
    /// # Errors
    ///
    /// `NotAMember` if a band endpoint has no curve in `curves`.
    pub fn new(
        curves: &CurveSet,
        band: Option<HighlightBand>,
        params: &DecayParameters,
    ) -> Result<Self, ValidationError> {
        let times = curves.times().points();
        let months = curves.times().total_months();
        let hours = months_to_hours(months);

        let series = curves
            .iter()
            .map(|curve| LineSeries {
                temperature: curve.temperature,
                color: curve.color.to_string(),
                label: series_label(curve),
                points: times
                    .iter()
                    .copied()
                    .zip(curve.capacities.iter().copied())
                    .collect(),
            })
            .collect();

        let markers = curves
            .iter()
            .map(|curve| {
                let capacity = curve.final_capacity();
                TerminalMarker {
                    temperature: curve.temperature,
                    color: curve.color.to_string(),
                    months,
                    hours,
                    capacity,
                    tooltip: marker_tooltip(curve.temperature, months, hours, capacity),
                    charge: params.nominal_capacity_ah().map(|ah| {
                        ChargeEstimate::from_capacity(
                            ah,
                            params.initial_capacity_percent(),
                            capacity,
                            hours,
                        )
                    }),
                }
            })
            .collect();

        let band = band
            .map(|band| {
                band.polygon(curves).map(|polygon| FilledBand {
                    lower: band.lower(),
                    upper: band.upper(),
                    fill: BAND_FILL.to_string(),
                    polygon,
                })
            })
            .transpose()?;

        Ok(Self {
            title: CHART_TITLE.to_string(),
            x_axis_title: X_AXIS_TITLE.to_string(),
            y_axis_title: Y_AXIS_TITLE.to_string(),
            series,
            markers,
            band,
        })
    }
}

/// Legend label: temperature and final retained capacity.
pub fn series_label(curve: &Curve) -> String {
    format!(
        "{}°C — Final: {:.1}%",
        format_celsius(curve.temperature),
        curve.final_capacity()
    )
}

pub fn marker_tooltip(temperature: f64, months: f64, hours: f64, capacity: f64) -> String {
    format!(
        "Temp: {}°C | Month: {:.2} | Hour: {:.0} | Cap: {:.2}%",
        format_celsius(temperature),
        months,
        hours,
        capacity
    )
}
