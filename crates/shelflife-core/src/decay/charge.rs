//! Charge and current estimates for a battery of known nominal capacity.

use serde::{Deserialize, Serialize};

/// Remaining charge and the mean self-discharge current over a storage period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChargeEstimate {
    /// Charge left at the end of storage (Ah)
    pub remaining_ah: f64,
    /// Charge lost during storage (Ah)
    pub lost_ah: f64,
    /// Average current drawn by self-discharge (mA), zero when no time elapsed
    pub mean_current_ma: f64,
}

impl ChargeEstimate {
    /// Derive the estimate from start/end capacity percentages.
    pub fn from_capacity(
        nominal_ah: f64,
        initial_percent: f64,
        final_percent: f64,
        elapsed_hours: f64,
    ) -> Self {
        let remaining_ah = nominal_ah * final_percent / 100.0;
        let lost_ah = nominal_ah * (initial_percent - final_percent) / 100.0;
        let mean_current_ma = if elapsed_hours > 0.0 {
            lost_ah / elapsed_hours * 1000.0
        } else {
            0.0
        };

        Self {
            remaining_ah,
            lost_ah,
            mean_current_ma,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn splits_nominal_capacity() {
        let est = ChargeEstimate::from_capacity(2.0, 100.0, 97.0, 730.08);
        assert_relative_eq!(est.remaining_ah, 1.94, epsilon = 1e-12);
        assert_relative_eq!(est.lost_ah, 0.06, epsilon = 1e-12);
        assert_relative_eq!(est.mean_current_ma, 0.06 / 730.08 * 1000.0, epsilon = 1e-12);
    }

    #[test]
    fn no_elapsed_time_means_no_current() {
        let est = ChargeEstimate::from_capacity(2.0, 90.0, 90.0, 0.0);
        assert_eq!(est.mean_current_ma, 0.0);
        assert_relative_eq!(est.remaining_ah, 1.8, epsilon = 1e-12);
    }
}
