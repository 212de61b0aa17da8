//! First-order self-discharge with Arrhenius-style temperature scaling.
//!
//! The monthly loss fraction doubles for every 10°C above the reference
//! temperature and halves for every 10°C below it:
//!
//! ```text
//! k(T) = base_rate * 2^((T - base_temp) / 10)
//! Q(t) = Q0 * (1 - k)^t
//! ```

use serde::Serialize;

use super::params::{
    validate_base_rate, validate_initial_capacity, DecayParameters, RatePolicy,
    DOUBLING_INTERVAL_CELSIUS, MAX_CLAMPED_RATE,
};
use crate::error::{DomainError, Result, ValidationError};

/// Temperature-adjusted monthly loss fraction `k`.
///
/// Not clamped: far above the reference it may reach or exceed 1.
pub fn rate_at(base_rate: f64, base_temp: f64, temperature: f64) -> f64 {
    base_rate * 2f64.powf((temperature - base_temp) / DOUBLING_INTERVAL_CELSIUS)
}

/// Remaining capacity at each time point (months), under [`RatePolicy::Strict`].
///
/// # Errors
///
/// `InvalidArgument` for a non-positive `q0`, a base rate outside `(0, 1)`,
/// or a time sequence that is empty, does not start at zero, or is not
/// strictly increasing. `Domain` when `1 - k < 0` and some time point is
/// fractional.
pub fn evaluate(
    q0: f64,
    base_rate: f64,
    base_temp: f64,
    temperature: f64,
    time_points_months: &[f64],
) -> Result<Vec<f64>> {
    evaluate_with_policy(
        q0,
        base_rate,
        base_temp,
        temperature,
        time_points_months,
        RatePolicy::Strict,
    )
}

/// Like [`evaluate`], with an explicit policy for out-of-range rates.
pub fn evaluate_with_policy(
    q0: f64,
    base_rate: f64,
    base_temp: f64,
    temperature: f64,
    time_points_months: &[f64],
    policy: RatePolicy,
) -> Result<Vec<f64>> {
    validate_initial_capacity(q0)?;
    validate_base_rate(base_rate)?;
    if !base_temp.is_finite() || !temperature.is_finite() {
        return Err(ValidationError::invalid("temperature", "must be finite").into());
    }
    validate_time_points(time_points_months)?;

    let k = effective_rate(rate_at(base_rate, base_temp, temperature), temperature, policy);
    capacities_for_rate(q0, k, temperature, time_points_months)
}

/// Check that time points are non-empty, start at zero and strictly increase.
pub fn validate_time_points(time_points_months: &[f64]) -> Result<(), ValidationError> {
    let first = match time_points_months.first() {
        Some(first) => *first,
        None => return Err(ValidationError::EmptyCollection("time_points_months".into())),
    };
    if first != 0.0 {
        return Err(ValidationError::invalid(
            "time_points_months",
            format!("must start at 0, got {first}"),
        ));
    }
    for pair in time_points_months.windows(2) {
        if !pair[1].is_finite() || pair[1] <= pair[0] {
            return Err(ValidationError::invalid(
                "time_points_months",
                format!("must be strictly increasing, got {} after {}", pair[1], pair[0]),
            ));
        }
    }
    Ok(())
}

fn effective_rate(k: f64, temperature: f64, policy: RatePolicy) -> f64 {
    match policy {
        RatePolicy::Strict => k,
        RatePolicy::Clamp => {
            let clamped = k.clamp(0.0, MAX_CLAMPED_RATE);
            if clamped != k {
                tracing::warn!(
                    temperature,
                    rate = k,
                    clamped,
                    "decay rate clamped below full monthly loss"
                );
            }
            clamped
        }
    }
}

fn capacities_for_rate(q0: f64, k: f64, temperature: f64, times: &[f64]) -> Result<Vec<f64>> {
    let retention = 1.0 - k;
    if retention < 0.0 {
        if let Some(&time) = times.iter().find(|t| t.fract() != 0.0) {
            return Err(DomainError::NegativeRetention {
                temperature,
                rate: k,
                retention,
                time,
            }
            .into());
        }
    }

    Ok(times.iter().map(|&t| q0 * retention.powf(t)).collect())
}

/// Decay model bound to one battery's parameters and a rate policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecayModel {
    params: DecayParameters,
    policy: RatePolicy,
}

impl DecayModel {
    pub fn new(params: DecayParameters, policy: RatePolicy) -> Self {
        Self { params, policy }
    }

    pub fn params(&self) -> &DecayParameters {
        &self.params
    }

    pub fn policy(&self) -> RatePolicy {
        self.policy
    }

    /// Rate used for `temperature`, after the policy is applied.
    pub fn rate(&self, temperature: f64) -> f64 {
        effective_rate(
            rate_at(
                self.params.base_rate_per_month(),
                self.params.base_temp_celsius(),
                temperature,
            ),
            temperature,
            self.policy,
        )
    }

    /// Remaining capacity (%) at each time point for one temperature.
    pub fn capacities(&self, temperature: f64, time_points_months: &[f64]) -> Result<Vec<f64>> {
        evaluate_with_policy(
            self.params.initial_capacity_percent(),
            self.params.base_rate_per_month(),
            self.params.base_temp_celsius(),
            temperature,
            time_points_months,
            self.policy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use approx::assert_relative_eq;

    #[test]
    fn reference_temperature_uses_base_rate() {
        assert_eq!(rate_at(0.03, 25.0, 25.0), 0.03);
    }

    #[test]
    fn rate_doubles_per_ten_degrees() {
        assert_relative_eq!(rate_at(0.03, 25.0, 35.0), 0.06, epsilon = 1e-12);
        assert_relative_eq!(rate_at(0.03, 25.0, 15.0), 0.015, epsilon = 1e-12);
        assert_relative_eq!(rate_at(0.0342, 25.0, 45.0), 0.1368, epsilon = 1e-12);
    }

    #[test]
    fn reference_curve_matches_compound_decay() {
        let caps = evaluate(100.0, 0.03, 25.0, 25.0, &[0.0, 1.0, 6.0, 12.0]).unwrap();
        assert_eq!(caps[0], 100.0);
        assert_relative_eq!(caps[1], 97.0, epsilon = 1e-9);
        assert_relative_eq!(caps[2], 83.2972, epsilon = 1e-3);
        assert_relative_eq!(caps[3], 69.3841, epsilon = 1e-3);
    }

    #[test]
    fn warm_storage_example() {
        let caps = evaluate(95.0, 0.0342, 25.0, 45.0, &[0.0, 12.0]).unwrap();
        assert_eq!(caps[0], 95.0);
        assert_relative_eq!(caps[1], 16.2578, epsilon = 1e-3);
    }

    #[test]
    fn cold_storage_barely_decays() {
        let caps = evaluate(100.0, 0.03, 25.0, -25.0, &[0.0, 1.0, 12.0]).unwrap();
        // k = 0.03 / 32 ≈ 0.00094
        assert!(caps[2] > 98.8);
        assert!(caps[2] <= 100.0);
    }

    #[test]
    fn rejects_bad_time_points() {
        assert!(matches!(
            evaluate(100.0, 0.03, 25.0, 25.0, &[]),
            Err(CoreError::InvalidArgument(ValidationError::EmptyCollection(_)))
        ));
        assert!(evaluate(100.0, 0.03, 25.0, 25.0, &[0.5, 1.0]).is_err());
        assert!(evaluate(100.0, 0.03, 25.0, 25.0, &[0.0, 2.0, 1.0]).is_err());
        assert!(evaluate(100.0, 0.03, 25.0, 25.0, &[0.0, 1.0, 1.0]).is_err());
    }

    #[test]
    fn rejects_non_positive_initial_capacity() {
        assert!(matches!(
            evaluate(0.0, 0.03, 25.0, 25.0, &[0.0]),
            Err(CoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn strict_policy_rejects_negative_retention_with_fractional_time() {
        // 0.5 * 2^((45 - 25) / 10) = 2.0
        let err = evaluate(100.0, 0.5, 25.0, 45.0, &[0.0, 0.1, 0.2]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Domain(DomainError::NegativeRetention { time, .. }) if time == 0.1
        ));
    }

    #[test]
    fn strict_policy_allows_negative_retention_on_integer_times() {
        let caps = evaluate(100.0, 0.5, 25.0, 45.0, &[0.0, 1.0, 2.0]).unwrap();
        assert_relative_eq!(caps[1], -100.0, epsilon = 1e-9);
        assert_relative_eq!(caps[2], 100.0, epsilon = 1e-9);
    }

    #[test]
    fn full_loss_rate_reaches_zero() {
        // 0.25 * 2^2 = 1.0 exactly
        let caps = evaluate(100.0, 0.25, 25.0, 45.0, &[0.0, 0.1, 1.0]).unwrap();
        assert_eq!(caps, vec![100.0, 0.0, 0.0]);
    }

    #[test]
    fn clamp_policy_keeps_capacity_non_negative() {
        let caps =
            evaluate_with_policy(100.0, 0.5, 25.0, 45.0, &[0.0, 0.1, 1.0], RatePolicy::Clamp)
                .unwrap();
        assert_eq!(caps[0], 100.0);
        assert!(caps.iter().all(|c| *c >= 0.0));
        assert!(caps[1] >= caps[2]);
        assert!(caps[2] < 1e-3);
    }

    #[test]
    fn model_applies_policy_to_rate() {
        let params = DecayParameters::new(100.0, 25.0, 0.5, None).unwrap();
        let strict = DecayModel::new(params, RatePolicy::Strict);
        let clamp = DecayModel::new(params, RatePolicy::Clamp);
        assert_relative_eq!(strict.rate(45.0), 2.0, epsilon = 1e-12);
        assert_eq!(clamp.rate(45.0), MAX_CLAMPED_RATE);
        assert_eq!(clamp.rate(25.0), 0.5);
    }
}
