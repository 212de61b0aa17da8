//! Self-discharge decay model.
//!
//! Evaluates remaining capacity over storage time for a given ambient
//! temperature, plus charge/current estimates when the nominal capacity is
//! known.

mod charge;
mod model;
mod params;

pub use charge::ChargeEstimate;
pub use model::{evaluate, evaluate_with_policy, rate_at, validate_time_points, DecayModel};
pub use params::{
    DecayParameters, RatePolicy, DEFAULT_BASE_RATE_PER_MONTH, DEFAULT_BASE_TEMP_CELSIUS,
    DOUBLING_INTERVAL_CELSIUS, MAX_CLAMPED_RATE,
};
