//! Empirical capacity fade over charge cycles.

use serde::{Deserialize, Serialize};
use simcore::numeric::{arange, interp};

/// Stretched-exponential fade: `capacity % = 100 · exp(-k · n^β)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DegradationModel {
    pub k: f64,
    pub beta: f64,
    /// Last cycle sampled by [`DegradationModel::simulate`]
    pub max_cycles: u32,
}

impl Default for DegradationModel {
    fn default() -> Self {
        DegradationModel {
            k: 0.0006,
            beta: 0.65,
            max_cycles: 2000,
        }
    }
}

impl DegradationModel {
    pub fn with_max_cycles(mut self, max_cycles: u32) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    /// Remaining capacity (%) after `cycles` full cycles.
    pub fn capacity_percent(&self, cycles: f64) -> f64 {
        100.0 * (-self.k * cycles.powf(self.beta)).exp()
    }

    /// Samples every whole cycle from 0 to `max_cycles` inclusive.
    pub fn simulate(&self) -> DegradationCurve {
        let cycles = arange(0.0, f64::from(self.max_cycles) + 1.0, 1.0);
        let capacity = cycles.iter().map(|&n| self.capacity_percent(n)).collect();
        DegradationCurve { cycles, capacity }
    }
}

/// Capacity fade sampled at unit cycle granularity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationCurve {
    pub cycles: Vec<f64>,
    /// Remaining capacity (%)
    pub capacity: Vec<f64>,
}

impl DegradationCurve {
    /// Capacity (%) after `cycles`, interpolated; clamps beyond the sampled horizon.
    pub fn capacity_at(&self, cycles: f64) -> f64 {
        interp(cycles, &self.cycles, &self.capacity)
    }

    pub fn at_1000(&self) -> f64 {
        self.capacity_at(1000.0)
    }

    pub fn at_2000(&self) -> f64 {
        self.capacity_at(2000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_curve_is_non_increasing() {
        let curve = DegradationModel::default().simulate();

        assert_eq!(curve.cycles.len(), 2001);
        assert_eq!(curve.capacity[0], 100.0);
        assert!(curve.capacity.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_reference_points() {
        let curve = DegradationModel::default().simulate();

        assert_abs_diff_eq!(curve.at_1000(), 94.7930, epsilon = 1e-3);
        assert_abs_diff_eq!(curve.at_2000(), 91.9513, epsilon = 1e-3);
        assert_abs_diff_eq!(
            curve.at_1000(),
            100.0 * (-0.0006 * 1000.0_f64.powf(0.65)).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_capacity_between_cycles_interpolates() {
        let curve = DegradationModel::default().simulate();

        let mid = curve.capacity_at(500.5);
        assert!(mid < curve.capacity_at(500.0));
        assert!(mid > curve.capacity_at(501.0));
    }

    #[test]
    fn test_short_horizon_clamps() {
        let curve = DegradationModel::default().with_max_cycles(500).simulate();

        assert_eq!(curve.cycles.len(), 501);
        assert_eq!(curve.at_1000(), curve.capacity[500]);
        assert_eq!(curve.at_2000(), curve.capacity[500]);
    }
}
