//! Curve set construction.
//!
//! Runs the decay model across a temperature range, assigns each curve a
//! stable display colour and selects the highlighted band between two
//! curves.

mod band;
mod builder;
mod palette;

pub use band::{highlight, HighlightBand};
pub use builder::{build, Curve, CurveSet};
pub use palette::{color_for_index, PALETTE};
