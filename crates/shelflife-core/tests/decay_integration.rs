//! Integration tests for the self-discharge decay model.

use approx::assert_relative_eq;
use proptest::prelude::*;
use shelflife_core::decay::{evaluate, evaluate_with_policy, rate_at};
use shelflife_core::{CoreError, RatePolicy, StorageDuration, TimeGrid};

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[test]
fn test_reference_battery_over_one_year() {
    let caps = evaluate(100.0, 0.03, 25.0, 25.0, &[0.0, 1.0, 6.0, 12.0]).unwrap();
    let rounded: Vec<f64> = caps.iter().copied().map(round2).collect();
    assert_eq!(rounded, vec![100.0, 97.0, 83.3, 69.38]);
}

#[test]
fn test_hot_storage_over_one_year() {
    let caps = evaluate(95.0, 0.0342, 25.0, 45.0, &[0.0, 12.0]).unwrap();
    assert_relative_eq!(rate_at(0.0342, 25.0, 45.0), 0.1368, epsilon = 1e-12);
    assert_eq!(round2(caps[0]), 95.0);
    assert_eq!(round2(caps[1]), 16.26);
}

#[test]
fn test_deep_cold_storage_is_negligible() {
    let grid = TimeGrid::new(24.0).unwrap();
    let caps = evaluate(80.0, 0.03, 25.0, -25.0, grid.points()).unwrap();
    let last = *caps.last().unwrap();
    assert!(80.0 - last < 80.0 * 0.03, "lost {} over two years", 80.0 - last);
}

#[test]
fn test_full_duration_grid_from_storage_inputs() {
    let duration = StorageDuration::new(3, 10, 12).unwrap();
    let grid = TimeGrid::for_duration(&duration).unwrap();
    let caps = evaluate(100.0, 0.03, 25.0, 30.0, grid.points()).unwrap();
    assert_eq!(caps.len(), grid.len());
    assert_relative_eq!(
        *caps.last().unwrap(),
        100.0 * (1.0 - rate_at(0.03, 25.0, 30.0)).powf(duration.total_months()),
        epsilon = 1e-9
    );
}

#[test]
fn test_strict_and_clamp_policies_diverge_only_past_full_loss() {
    let grid = TimeGrid::new(2.0).unwrap();
    let strict = evaluate_with_policy(100.0, 0.03, 25.0, 40.0, grid.points(), RatePolicy::Strict)
        .unwrap();
    let clamp = evaluate_with_policy(100.0, 0.03, 25.0, 40.0, grid.points(), RatePolicy::Clamp)
        .unwrap();
    assert_eq!(strict, clamp);

    let err = evaluate(100.0, 0.3, 25.0, 60.0, grid.points()).unwrap_err();
    assert!(matches!(err, CoreError::Domain(_)));
}

fn time_points() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.01f64..3.0, 0..40).prop_map(|steps| {
        let mut t = 0.0;
        let mut points = vec![0.0];
        for step in steps {
            t += step;
            points.push(t);
        }
        points
    })
}

proptest! {
    #[test]
    fn prop_initial_point_is_exact(
        q0 in 1.0f64..=100.0,
        rate in 0.001f64..0.2,
        temp in -30.0f64..40.0,
        times in time_points(),
    ) {
        let caps = evaluate(q0, rate, 25.0, temp, &times).unwrap();
        prop_assert_eq!(caps.len(), times.len());
        prop_assert_eq!(caps[0], q0);
    }

    #[test]
    fn prop_capacity_never_increases(
        q0 in 1.0f64..=100.0,
        rate in 0.001f64..0.2,
        temp in -30.0f64..40.0,
        times in time_points(),
    ) {
        let caps = evaluate(q0, rate, 25.0, temp, &times).unwrap();
        for pair in caps.windows(2) {
            prop_assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn prop_reference_temperature_is_plain_compound_decay(
        q0 in 1.0f64..=100.0,
        rate in 0.001f64..0.5,
        base_temp in -10.0f64..40.0,
        times in time_points(),
    ) {
        let caps = evaluate(q0, rate, base_temp, base_temp, &times).unwrap();
        for (cap, t) in caps.iter().zip(&times) {
            prop_assert_eq!(*cap, q0 * (1.0 - rate).powf(*t));
        }
    }

    #[test]
    fn prop_rate_doubles_every_ten_degrees(
        rate in 0.001f64..0.5,
        base_temp in -10.0f64..40.0,
        temp in -60.0f64..80.0,
    ) {
        let k = rate_at(rate, base_temp, temp);
        let k_warmer = rate_at(rate, base_temp, temp + 10.0);
        prop_assert!((k_warmer - 2.0 * k).abs() <= 1e-12 * k_warmer.max(1.0));
    }

    #[test]
    fn prop_clamp_never_goes_negative(
        rate in 0.01f64..0.9,
        temp in 25.0f64..90.0,
        times in time_points(),
    ) {
        let caps = evaluate_with_policy(100.0, rate, 25.0, temp, &times, RatePolicy::Clamp).unwrap();
        prop_assert!(caps.iter().all(|c| *c >= 0.0 && *c <= 100.0));
    }
}
