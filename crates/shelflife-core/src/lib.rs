//! # shelflife Core Library
//!
//! Estimates how much charge a battery keeps after long storage at a given
//! ambient temperature. Self-discharge is modelled as first-order decay whose
//! monthly rate doubles for every 10°C above a reference temperature.
//!
//! ## Architecture
//!
//! - **Decay model**: pure evaluation of remaining capacity over time for one
//!   temperature, with an explicit policy for rates that reach 100%/month
//! - **Curve set builder**: one curve per temperature in a range, stable
//!   display colours, and the highlighted band between two curves
//! - **Chart payload**: series, terminal markers and band for a renderer
//! - **Storage**: TOML configuration of the scenario inputs
//!
//! Every evaluation is recomputed from scratch; nothing is cached.
//!
//! ## Key Components
//!
//! - [`decay::evaluate`]: capacity at each time point for one temperature
//! - [`curves::build`]: curve per temperature over a shared [`TimeGrid`]
//! - [`Scenario`]: validated inputs, evaluated into a [`ChartModel`]
//! - [`Config`]: scenario configuration management

pub mod chart;
pub mod curves;
pub mod decay;
pub mod error;
pub mod scenario;
pub mod storage;
pub mod temperature;
pub mod time_grid;

pub use chart::{ChartModel, FilledBand, LineSeries, TerminalMarker};
pub use curves::{build, highlight, Curve, CurveSet, HighlightBand};
pub use decay::{evaluate, ChargeEstimate, DecayModel, DecayParameters, RatePolicy};
pub use error::{ConfigError, CoreError, DomainError, ValidationError};
pub use scenario::{Evaluation, Scenario};
pub use storage::Config;
pub use temperature::TemperatureRange;
pub use time_grid::{StorageDuration, TimeGrid};
