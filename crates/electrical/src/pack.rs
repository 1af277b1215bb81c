//! Battery pack sizing from an energy requirement.

use log::debug;
use serde::{Deserialize, Serialize};
use simcore::VehicleParameters;

/// Cell data and sizing margin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackConfig {
    /// Nominal cell voltage (V), LFP
    pub cell_voltage: f64,
    /// Cell capacity (Ah)
    pub cell_capacity_ah: f64,
    /// Pack mass per cell, including its share of housing and wiring (kg)
    pub mass_per_cell: f64,
    /// Multiplier on the nominal energy requirement
    pub safety_margin: f64,
}

impl Default for PackConfig {
    fn default() -> Self {
        PackConfig {
            cell_voltage: 3.2,
            cell_capacity_ah: 150.0,
            mass_per_cell: 2.8,
            safety_margin: 1.2,
        }
    }
}

/// Required pack capacity and the cell arrangement that provides it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatterySizing {
    pub consumption_wh_per_km: f64,
    pub capacity_wh_nominal: f64,
    pub capacity_ah_nominal: f64,
    pub capacity_wh_margined: f64,
    pub capacity_ah_margined: f64,
    /// Whole number of cells; NaN when the inputs are degenerate
    pub cells_in_series: f64,
    pub cells_in_parallel: f64,
    /// Pack mass (kg)
    pub mass: f64,
}

impl BatterySizing {
    pub fn total_cells(&self) -> f64 {
        self.cells_in_series * self.cells_in_parallel
    }
}

impl PackConfig {
    pub fn with_safety_margin(mut self, safety_margin: f64) -> Self {
        self.safety_margin = safety_margin;
        self
    }

    /// Sizes a pack covering the desired range at the consumption measured over a cycle.
    ///
    /// Amp-hours are rated at the empty-pack voltage; the series count reaches the full-pack
    /// voltage.
    pub fn size(&self, params: &VehicleParameters, net_energy_wh: f64, distance_km: f64) -> BatterySizing {
        let consumption_wh_per_km = net_energy_wh / distance_km;
        let capacity_wh_nominal = consumption_wh_per_km * params.desired_range;
        let capacity_ah_nominal = capacity_wh_nominal / params.battery_min_voltage;

        let capacity_wh_margined = capacity_wh_nominal * self.safety_margin;
        let capacity_ah_margined = capacity_wh_margined / params.battery_min_voltage;

        let cells_in_series = (params.battery_max_voltage / self.cell_voltage).ceil();
        let cells_in_parallel = (capacity_ah_margined / self.cell_capacity_ah).ceil();
        let mass = self.mass_per_cell * cells_in_parallel * cells_in_series;

        debug!(
            "pack: {consumption_wh_per_km:.1} Wh/km, {capacity_wh_margined:.0} Wh margined, \
             {cells_in_series}S{cells_in_parallel}P, {mass:.1} kg"
        );

        BatterySizing {
            consumption_wh_per_km,
            capacity_wh_nominal,
            capacity_ah_nominal,
            capacity_wh_margined,
            capacity_ah_margined,
            cells_in_series,
            cells_in_parallel,
            mass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_pack() {
        let params = VehicleParameters::default();

        // 100 Wh/km over 80 km -> 8 kWh nominal, 9.6 kWh margined
        let sizing = PackConfig::default().size(&params, 500.0, 5.0);

        assert_relative_eq!(sizing.consumption_wh_per_km, 100.0);
        assert_relative_eq!(sizing.capacity_wh_nominal, 8000.0);
        assert_relative_eq!(sizing.capacity_ah_nominal, 8000.0 / 42.0);
        assert_relative_eq!(sizing.capacity_wh_margined, 9600.0, max_relative = 1e-12);
        assert_relative_eq!(sizing.capacity_ah_margined, sizing.capacity_wh_margined / 42.0);

        // 51 V / 3.2 V -> 16 in series; 228.6 Ah / 150 Ah -> 2 in parallel
        assert_eq!(sizing.cells_in_series, 16.0);
        assert_eq!(sizing.cells_in_parallel, 2.0);
        assert_eq!(sizing.total_cells(), 32.0);
        assert_relative_eq!(sizing.mass, 2.8 * 32.0, max_relative = 1e-12);
    }

    #[test]
    fn test_margin_scales_capacity() {
        let params = VehicleParameters::default();
        let plain = PackConfig::default().with_safety_margin(1.0).size(&params, 500.0, 5.0);

        assert_eq!(plain.capacity_wh_margined, plain.capacity_wh_nominal);
    }

    #[test]
    fn test_zero_distance_is_degenerate() {
        let sizing = PackConfig::default().size(&VehicleParameters::default(), 0.0, 0.0);

        assert!(sizing.consumption_wh_per_km.is_nan());
        assert!(sizing.cells_in_parallel.is_nan());
        assert!(sizing.mass.is_nan());
    }
}
