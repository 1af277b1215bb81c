//! Lumped thermal model of a reference cell through a charge then a discharge phase.

use log::debug;
use serde::{Deserialize, Serialize};
use simcore::constants::{SECONDS_PER_HOUR, ZERO_CELSIUS};
use simcore::numeric::{arange, max};
use simcore::{ExplicitEuler, FixedTimestepIntegrator};

/// Thermal and electrical constants of the reference cell and its test protocol
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalConfig {
    pub capacity_ah: f64,
    /// Thermal mass (kg)
    pub mass: f64,
    /// Specific heat capacity (J/(kg·K))
    pub specific_heat: f64,
    /// Internal resistance (Ω)
    pub internal_resistance: f64,
    /// Heat-transfer coefficient times exchange area (W/K)
    pub heat_transfer: f64,
    /// Ambient and initial temperature (K)
    pub ambient: f64,
    /// Integration step (s)
    pub dt: f64,
    /// Charge C-rate
    pub charge_rate: f64,
    /// Charge duration (s)
    pub charge_duration: f64,
    /// Discharge C-rate
    pub discharge_rate: f64,
    /// Discharge duration (s)
    pub discharge_duration: f64,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        ThermalConfig {
            capacity_ah: 210.0,
            mass: 45.0,
            specific_heat: 1000.0,
            internal_resistance: 0.02,
            heat_transfer: 5.0,
            ambient: 298.15,
            dt: 1.0,
            charge_rate: 0.25,
            charge_duration: 4.0 * SECONDS_PER_HOUR,
            discharge_rate: 0.5,
            discharge_duration: SECONDS_PER_HOUR,
        }
    }
}

/// One constant-current phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalPhase {
    /// Cell current (A), negative while discharging
    pub current: f64,
    /// Seconds since the start of the phase
    pub time: Vec<f64>,
    /// Cell temperature (K)
    pub temperature: Vec<f64>,
}

impl ThermalPhase {
    /// Hottest temperature of the phase (°C)
    pub fn peak_celsius(&self) -> f64 {
        max(&self.temperature) - ZERO_CELSIUS
    }
}

/// Result of the thermal simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalProfile {
    pub charge: ThermalPhase,
    pub discharge: ThermalPhase,
    /// Hours since the start of charging, both phases back to back
    pub time_hours: Vec<f64>,
    /// Temperatures matching `time_hours` (°C)
    pub temperatures: Vec<f64>,
    pub max_charge_temperature: f64,
    pub max_discharge_temperature: f64,
}

impl ThermalConfig {
    pub fn with_heat_transfer(mut self, heat_transfer: f64) -> Self {
        self.heat_transfer = heat_transfer;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_ambient(mut self, ambient: f64) -> Self {
        self.ambient = ambient;
        self
    }

    /// dT/dt (K/s): Joule heating minus convective loss to ambient.
    pub fn temperature_derivative(&self, current: f64, temperature: f64) -> f64 {
        let joule_heat = current.powi(2) * self.internal_resistance;
        (joule_heat - self.heat_transfer * (temperature - self.ambient)) / (self.mass * self.specific_heat)
    }

    fn run_phase(&self, current: f64, duration: f64, initial: f64) -> ThermalPhase {
        let time = arange(0.0, duration, self.dt);
        let temperature = FixedTimestepIntegrator::new(ExplicitEuler, self.dt)
            .trajectory(initial, time.len(), |t| self.temperature_derivative(current, t));
        ThermalPhase {
            current,
            time,
            temperature,
        }
    }

    /// Charges from ambient, then discharges starting from the final charge temperature.
    pub fn simulate(&self) -> ThermalProfile {
        let charge = self.run_phase(
            self.charge_rate * self.capacity_ah,
            self.charge_duration,
            self.ambient,
        );
        let handover = charge.temperature.last().copied().unwrap_or(self.ambient);
        let discharge = self.run_phase(
            -self.discharge_rate * self.capacity_ah,
            self.discharge_duration,
            handover,
        );

        let offset = charge.time.last().map_or(0.0, |t| t + self.dt);
        let time_hours = charge
            .time
            .iter()
            .map(|t| t / SECONDS_PER_HOUR)
            .chain(discharge.time.iter().map(|t| (t + offset) / SECONDS_PER_HOUR))
            .collect();
        let temperatures = charge
            .temperature
            .iter()
            .chain(&discharge.temperature)
            .map(|t| t - ZERO_CELSIUS)
            .collect();

        let max_charge_temperature = charge.peak_celsius();
        let max_discharge_temperature = discharge.peak_celsius();
        debug!(
            "thermal: peak {max_charge_temperature:.2} °C charging, \
             {max_discharge_temperature:.2} °C discharging"
        );

        ThermalProfile {
            charge,
            discharge,
            time_hours,
            temperatures,
            max_charge_temperature,
            max_discharge_temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_phases_start_and_length() {
        let profile = ThermalConfig::default().simulate();

        assert_eq!(profile.charge.temperature[0], 298.15);
        assert_eq!(profile.charge.temperature.len(), 4 * 3600);
        assert_eq!(profile.discharge.temperature.len(), 3600);
        assert_eq!(profile.time_hours.len(), 5 * 3600);
        assert_eq!(profile.temperatures.len(), 5 * 3600);
    }

    #[test]
    fn test_discharge_continues_from_charge() {
        let profile = ThermalConfig::default().simulate();

        assert_eq!(
            profile.discharge.temperature[0],
            *profile.charge.temperature.last().unwrap()
        );
        assert_eq!(profile.time_hours[4 * 3600], 4.0);
        assert!(profile.time_hours.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_currents_follow_c_rates() {
        let profile = ThermalConfig::default().simulate();

        assert_abs_diff_eq!(profile.charge.current, 52.5, epsilon = 1e-12);
        assert_abs_diff_eq!(profile.discharge.current, -105.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cell_heats_up_and_stays_below_steady_state() {
        let config = ThermalConfig::default();
        let profile = config.simulate();

        // steady state for the discharge current: I²R / hA above ambient
        let steady_rise = 105.0_f64.powi(2) * 0.02 / 5.0;
        assert!(profile.max_charge_temperature > 25.0);
        assert!(profile.max_discharge_temperature > profile.max_charge_temperature);
        assert!(profile.max_discharge_temperature < 25.0 + steady_rise);
    }

    #[test]
    fn test_temperature_derivative_at_ambient() {
        let config = ThermalConfig::default();

        // only Joule heating at ambient: 52.5² * 0.02 / 45000
        assert_abs_diff_eq!(
            config.temperature_derivative(52.5, 298.15),
            55.125 / 45_000.0,
            epsilon = 1e-15
        );
        assert_eq!(config.temperature_derivative(0.0, 298.15), 0.0);
    }

    #[test]
    fn test_no_current_no_heating() {
        let mut config = ThermalConfig::default();
        config.charge_rate = 0.0;
        config.discharge_rate = 0.0;
        let profile = config.simulate();

        assert!(profile.temperatures.iter().all(|t| (t - 25.0).abs() < 1e-9));
    }
}
