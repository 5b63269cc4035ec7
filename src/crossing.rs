//! # Zero-crossing epoch finder
//!
//! Locate the instants where a sampled scalar signal crosses zero going
//! downward, and refine each one with a local cubic interpolant.
//!
//! ## Algorithm
//!
//! 1. Scan consecutive pairs `(v[k], v[k+1])` for a crossing as defined by the
//!    [`CrossingRule`].
//! 2. Choose four samples around `k`:
//!    * `k == 0` → `[3, 2, 1, 0]`
//!    * `k ≥ n − 2` → `[n−1, n−2, n−3, n−4]`
//!    * otherwise → `[k+2, k+1, k, k−1]`
//! 3. Treat the **value** as the independent variable, fit the cubic `t(v)`
//!    through the four `(v, t)` pairs and evaluate it at `v = 0`.
//!
//! The inverse interpolation only makes sense if the values are strictly
//! monotonic inside the window; otherwise the crossing is reported as a
//! [`HeliorbitError::DegenerateWindow`].
//!
//! For a longitude sampled hourly this yields the Carrington epochs: the
//! longitude runs from +180° down to −180° and wraps, so every downward zero
//! crossing is one passage through the prime meridian. The wrap itself goes
//! from negative to positive and is never picked up.
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::constants::CROSSING_WINDOW;
use crate::heliorbit_errors::HeliorbitError;

/// Which consecutive sample pairs count as a downward zero crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CrossingRule {
    /// `v[k] > 0 && v[k+1] <= 0`
    #[default]
    Strict,
    /// `v[k] >= 0 && v[k+1] < 0`
    Inclusive,
}

impl CrossingRule {
    #[inline]
    pub fn is_crossing(&self, current: f64, next: f64) -> bool {
        match self {
            CrossingRule::Strict => current > 0.0 && next <= 0.0,
            CrossingRule::Inclusive => current >= 0.0 && next < 0.0,
        }
    }
}

/// Find the downward zero crossings of `values` with the [`CrossingRule::Strict`] rule.
///
/// See [`find_zero_crossings_with`].
pub fn find_zero_crossings(times: &[f64], values: &[f64]) -> Result<Vec<f64>, HeliorbitError> {
    find_zero_crossings_with(times, values, CrossingRule::Strict)
}

/// Find the downward zero crossings of a sampled signal.
///
/// Arguments
/// ---------
/// * `times`: sample times, strictly increasing
/// * `values`: signal samples, same length as `times`
/// * `rule`: which sign change counts as a crossing
///
/// Return
/// ------
/// * the refined crossing times in the order they were found (empty when the
///   signal never crosses zero)
///
/// Errors
/// ------
/// * [`HeliorbitError::LengthMismatch`] if the two slices differ in length
/// * [`HeliorbitError::TooFewSamples`] if there are fewer than 4 samples
/// * [`HeliorbitError::NonMonotonicTimes`] if `times` is not strictly increasing
/// * [`HeliorbitError::DegenerateWindow`] if the values are not strictly monotonic
///   around a crossing
pub fn find_zero_crossings_with(
    times: &[f64],
    values: &[f64],
    rule: CrossingRule,
) -> Result<Vec<f64>, HeliorbitError> {
    if times.len() != values.len() {
        return Err(HeliorbitError::LengthMismatch {
            expected: times.len(),
            found: values.len(),
        });
    }

    let n = values.len();
    if n < CROSSING_WINDOW {
        return Err(HeliorbitError::TooFewSamples {
            required: CROSSING_WINDOW,
            found: n,
        });
    }

    if let Some((k, _)) = times
        .iter()
        .tuple_windows()
        .find_position(|(t0, t1)| !(t1 > t0))
    {
        return Err(HeliorbitError::NonMonotonicTimes(k + 1));
    }

    values
        .iter()
        .tuple_windows()
        .positions(|(v0, v1)| rule.is_crossing(*v0, *v1))
        .map(|k| {
            let window = crossing_window(k, n);
            let ts = window.map(|i| times[i]);
            let vs = window.map(|i| values[i]);
            if !is_strictly_monotonic(&vs) {
                return Err(HeliorbitError::DegenerateWindow(k));
            }
            Ok(lagrange_at_zero(&vs, &ts))
        })
        .collect()
}

/// Indices of the four samples used to refine a crossing found between `k` and `k + 1`.
pub fn crossing_window(k: usize, n: usize) -> [usize; CROSSING_WINDOW] {
    if k == 0 {
        [3, 2, 1, 0]
    } else if k >= n - 2 {
        [n - 1, n - 2, n - 3, n - 4]
    } else {
        [k + 2, k + 1, k, k - 1]
    }
}

fn is_strictly_monotonic(values: &[f64; CROSSING_WINDOW]) -> bool {
    let increasing = values.iter().tuple_windows().all(|(a, b)| b > a);
    let decreasing = values.iter().tuple_windows().all(|(a, b)| b < a);
    increasing || decreasing
}

/// Evaluate at `x = 0` the cubic through the points `(xs[j], ys[j])`.
///
/// Lagrange form; the nodes must be distinct.
fn lagrange_at_zero(xs: &[f64; CROSSING_WINDOW], ys: &[f64; CROSSING_WINDOW]) -> f64 {
    (0..CROSSING_WINDOW)
        .map(|j| {
            let weight: f64 = (0..CROSSING_WINDOW)
                .filter(|&m| m != j)
                .map(|m| xs[m] / (xs[m] - xs[j]))
                .product();
            ys[j] * weight
        })
        .sum()
}

#[cfg(test)]
mod crossing_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_window_selection() {
        assert_eq!(crossing_window(0, 10), [3, 2, 1, 0]);
        assert_eq!(crossing_window(4, 10), [6, 5, 4, 3]);
        assert_eq!(crossing_window(8, 10), [9, 8, 7, 6]);
        assert_eq!(crossing_window(9, 10), [9, 8, 7, 6]);
    }

    #[test]
    fn test_lagrange_is_exact_on_cubics() {
        // t(v) = 2 + v − 0.5 v² + 0.1 v³, value at v = 0 is 2
        let t = |v: f64| 2.0 + v - 0.5 * v * v + 0.1 * v * v * v;
        let xs = [1.5, 0.7, -0.2, -1.1];
        let ys = xs.map(t);
        assert_relative_eq!(lagrange_at_zero(&xs, &ys), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_linear_signal() {
        let times: Vec<f64> = (0..10).map(|k| k as f64).collect();
        let values: Vec<f64> = times.iter().map(|t| 4.5 - t).collect();
        let crossings = find_zero_crossings(&times, &values).unwrap();
        assert_eq!(crossings.len(), 1);
        assert_relative_eq!(crossings[0], 4.5, epsilon = 1e-12);
    }

    #[test]
    fn test_crossing_at_the_edges() {
        let times: Vec<f64> = (0..6).map(|k| k as f64).collect();

        let values: Vec<f64> = times.iter().map(|t| 0.25 - t).collect();
        let crossings = find_zero_crossings(&times, &values).unwrap();
        assert_relative_eq!(crossings[0], 0.25, epsilon = 1e-12);

        let values: Vec<f64> = times.iter().map(|t| 4.75 - t).collect();
        let crossings = find_zero_crossings(&times, &values).unwrap();
        assert_relative_eq!(crossings[0], 4.75, epsilon = 1e-12);
    }

    #[test]
    fn test_upward_crossing_is_ignored() {
        let times: Vec<f64> = (0..8).map(|k| k as f64).collect();
        let values: Vec<f64> = times.iter().map(|t| t - 3.5).collect();
        assert!(find_zero_crossings(&times, &values).unwrap().is_empty());
    }

    #[test]
    fn test_rules_differ_on_exact_zero() {
        let times = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let values = [2.0, 1.0, 0.0, -1.0, -2.0, -3.0];

        // Strict: 1 → 0 at k = 1; Inclusive: 0 → −1 at k = 2. Both refine to t = 2.
        let strict = find_zero_crossings_with(&times, &values, CrossingRule::Strict).unwrap();
        let inclusive = find_zero_crossings_with(&times, &values, CrossingRule::Inclusive).unwrap();
        assert_eq!(strict.len(), 1);
        assert_eq!(inclusive.len(), 1);
        assert_relative_eq!(strict[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(inclusive[0], 2.0, epsilon = 1e-12);

        // a signal touching zero from above and going back up
        let values = [2.0, 1.0, 0.0, 1.0, 2.0, 3.0];
        assert!(find_zero_crossings_with(&times, &values, CrossingRule::Inclusive)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_preconditions() {
        assert!(matches!(
            find_zero_crossings(&[0.0, 1.0, 2.0], &[1.0, 0.0, -1.0]),
            Err(HeliorbitError::TooFewSamples {
                required: 4,
                found: 3
            })
        ));
        assert!(matches!(
            find_zero_crossings(&[0.0, 1.0, 2.0, 3.0], &[1.0, 0.0, -1.0]),
            Err(HeliorbitError::LengthMismatch { .. })
        ));
        assert!(matches!(
            find_zero_crossings(&[0.0, 1.0, 1.0, 3.0], &[1.0, 0.5, -1.0, -2.0]),
            Err(HeliorbitError::NonMonotonicTimes(2))
        ));
    }

    #[test]
    fn test_degenerate_window() {
        let times = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let values = [1.0, 0.5, 1.0, -1.0, -2.0, -3.0];
        assert!(matches!(
            find_zero_crossings(&times, &values),
            Err(HeliorbitError::DegenerateWindow(2))
        ));
    }
}
