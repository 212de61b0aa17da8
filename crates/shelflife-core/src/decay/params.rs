//! Battery model parameters and the rate policy.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Reference temperature at which the base rate is quoted (°C).
pub const DEFAULT_BASE_TEMP_CELSIUS: f64 = 25.0;

/// Fraction of charge lost per month at the reference temperature.
pub const DEFAULT_BASE_RATE_PER_MONTH: f64 = 0.03;

/// Temperature rise that doubles the decay rate (°C).
pub const DOUBLING_INTERVAL_CELSIUS: f64 = 10.0;

/// Upper bound for `k` under [`RatePolicy::Clamp`].
pub const MAX_CLAMPED_RATE: f64 = 1.0 - 1e-6;

/// What to do when the temperature-adjusted rate leaves `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatePolicy {
    /// Use `k` as computed; a negative retention factor raised to a
    /// fractional time is a [`DomainError`](crate::error::DomainError).
    #[default]
    Strict,
    /// Clamp `k` into `[0, MAX_CLAMPED_RATE]` before exponentiation.
    Clamp,
}

impl RatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RatePolicy::Strict => "strict",
            RatePolicy::Clamp => "clamp",
        }
    }
}

impl std::str::FromStr for RatePolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(RatePolicy::Strict),
            "clamp" => Ok(RatePolicy::Clamp),
            other => Err(ValidationError::invalid(
                "rate_policy",
                format!("expected 'strict' or 'clamp', got '{other}'"),
            )),
        }
    }
}

impl std::fmt::Display for RatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-discharge parameters of one battery model.
///
/// Immutable once constructed; [`DecayParameters::new`] enforces
/// `0 < initial_capacity_percent <= 100` and `0 < base_rate_per_month < 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecayParameters {
    initial_capacity_percent: f64,
    base_temp_celsius: f64,
    base_rate_per_month: f64,
    nominal_capacity_ah: Option<f64>,
}

impl DecayParameters {
    /// Create validated parameters.
    pub fn new(
        initial_capacity_percent: f64,
        base_temp_celsius: f64,
        base_rate_per_month: f64,
        nominal_capacity_ah: Option<f64>,
    ) -> Result<Self, ValidationError> {
        validate_initial_capacity(initial_capacity_percent)?;
        validate_base_rate(base_rate_per_month)?;
        if !base_temp_celsius.is_finite() {
            return Err(ValidationError::invalid(
                "base_temp_celsius",
                "must be a finite temperature",
            ));
        }
        if let Some(ah) = nominal_capacity_ah {
            if !ah.is_finite() || ah <= 0.0 {
                return Err(ValidationError::invalid(
                    "nominal_capacity_ah",
                    format!("must be a positive capacity, got {ah}"),
                ));
            }
        }

        Ok(Self {
            initial_capacity_percent,
            base_temp_celsius,
            base_rate_per_month,
            nominal_capacity_ah,
        })
    }

    /// Parameters at the default reference point (25°C, 3%/month).
    pub fn with_defaults(initial_capacity_percent: f64) -> Result<Self, ValidationError> {
        Self::new(
            initial_capacity_percent,
            DEFAULT_BASE_TEMP_CELSIUS,
            DEFAULT_BASE_RATE_PER_MONTH,
            None,
        )
    }

    pub fn initial_capacity_percent(&self) -> f64 {
        self.initial_capacity_percent
    }

    pub fn base_temp_celsius(&self) -> f64 {
        self.base_temp_celsius
    }

    pub fn base_rate_per_month(&self) -> f64 {
        self.base_rate_per_month
    }

    pub fn nominal_capacity_ah(&self) -> Option<f64> {
        self.nominal_capacity_ah
    }
}

pub(crate) fn validate_initial_capacity(q0: f64) -> Result<(), ValidationError> {
    if !q0.is_finite() || q0 <= 0.0 || q0 > 100.0 {
        return Err(ValidationError::invalid(
            "initial_capacity_percent",
            format!("must be in (0, 100], got {q0}"),
        ));
    }
    Ok(())
}

pub(crate) fn validate_base_rate(rate: f64) -> Result<(), ValidationError> {
    if !rate.is_finite() || rate <= 0.0 || rate >= 1.0 {
        return Err(ValidationError::invalid(
            "base_rate_per_month",
            format!("must be a fraction in (0, 1), got {rate}"),
        ));
    }
    Ok(())
}
