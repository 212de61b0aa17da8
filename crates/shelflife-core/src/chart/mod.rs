//! Chart payload handed to the rendering layer.
//!
//! A [`ChartModel`] carries one line series and one terminal marker per
//! temperature plus the optional highlighted band; it serializes to JSON
//! and can be rendered as a text chart.

mod ascii;
mod model;

pub use model::{
    marker_tooltip, series_label, ChartModel, FilledBand, LineSeries, TerminalMarker, BAND_FILL,
    CHART_TITLE, X_AXIS_TITLE, Y_AXIS_TITLE,
};
