//! Aggregated sizing results, laid out for a results page or a JSON export.

use electrical::{
    BatterySizing, DegradationCurve, MotorParameters, PeakValues, PerformanceCurves, PerformanceSweep,
    ThermalProfile,
};
use mechanics::ReferenceForces;
use serde::{Deserialize, Serialize};
use simcore::VehicleParameters;
use simcore::constants::WHEEL_RADIUS;

use crate::acceleration::AccelerationProfile;
use crate::drive_cycle::DriveCycleResult;

/// Fixed technology recommendations attached to every report.
pub const RECOMMENDATIONS: [&str; 2] = [
    "Motor: permanent-magnet synchronous motor",
    "Battery: LiFePO4 pack with passive air cooling",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorSummary {
    /// Highest power observed in the sweep (W)
    pub max_power: f64,
    /// Power at the rated point (W)
    pub continuous_power: f64,
    pub base_torque: f64,
    pub rated_torque: f64,
    pub base_rpm: f64,
    pub rated_rpm: f64,
    /// (m)
    pub wheel_radius: f64,
    pub reduction_ratio: f64,
}

/// Pack requirements; `sizing` is only known once a drive cycle has been simulated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatterySummary {
    pub sizing: Option<BatterySizing>,
    /// Not modelled, always `None`
    pub max_charge_current: Option<f64>,
    /// Highest current drawn in the performance sweep (A)
    pub max_discharge_current: f64,
    pub max_voltage: f64,
    pub min_voltage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalSummary {
    /// (°C)
    pub max_charge_temperature: f64,
    /// (°C)
    pub max_discharge_temperature: f64,
    pub time_hours: Vec<f64>,
    /// (°C)
    pub temperatures: Vec<f64>,
}

impl From<ThermalProfile> for ThermalSummary {
    fn from(profile: ThermalProfile) -> Self {
        ThermalSummary {
            max_charge_temperature: profile.max_charge_temperature,
            max_discharge_temperature: profile.max_discharge_temperature,
            time_hours: profile.time_hours,
            temperatures: profile.temperatures,
        }
    }
}

/// Remaining capacity (%) at the reported cycle counts, plus the full curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationSummary {
    pub at_500: f64,
    pub at_1000: f64,
    pub at_1500: f64,
    pub at_2000: f64,
    pub curve: DegradationCurve,
}

impl From<DegradationCurve> for DegradationSummary {
    fn from(curve: DegradationCurve) -> Self {
        DegradationSummary {
            at_500: curve.capacity_at(500.0),
            at_1000: curve.at_1000(),
            at_1500: curve.capacity_at(1500.0),
            at_2000: curve.at_2000(),
            curve,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveCycleTotals {
    pub motor_energy_wh: f64,
    pub regen_energy_wh: f64,
    pub net_energy_wh: f64,
    pub distance_km: f64,
    pub consumption_wh_per_km: f64,
}

impl From<&DriveCycleResult> for DriveCycleTotals {
    fn from(result: &DriveCycleResult) -> Self {
        DriveCycleTotals {
            motor_energy_wh: result.motor_energy_wh,
            regen_energy_wh: result.regen_energy_wh,
            net_energy_wh: result.net_energy_wh,
            distance_km: result.distance_km,
            consumption_wh_per_km: result.consumption_wh_per_km,
        }
    }
}

/// Everything a single sizing run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingReport {
    pub parameters: VehicleParameters,
    pub motor: MotorSummary,
    pub battery: BatterySummary,
    pub thermal: ThermalSummary,
    pub degradation: DegradationSummary,
    pub acceleration: AccelerationProfile,
    pub performance: PerformanceCurves,
    pub peaks: PeakValues,
    pub forces: ReferenceForces,
    pub drive_cycle: Option<DriveCycleTotals>,
    pub recommendations: Vec<String>,
}

/// Results of the individual computations, before aggregation
pub(crate) struct RunResults {
    pub motor: MotorParameters,
    pub sweep: PerformanceSweep,
    pub thermal: ThermalProfile,
    pub degradation: DegradationCurve,
    pub acceleration: AccelerationProfile,
    pub drive_cycle: Option<DriveCycleResult>,
}

impl SizingReport {
    pub(crate) fn assemble(params: &VehicleParameters, results: RunResults) -> Self {
        let RunResults {
            motor,
            sweep,
            thermal,
            degradation,
            acceleration,
            drive_cycle,
        } = results;

        let motor_summary = MotorSummary {
            max_power: sweep.peaks.max_power,
            continuous_power: motor.continuous_power,
            base_torque: motor.base_torque,
            rated_torque: motor.rated_torque,
            base_rpm: motor.base_rpm,
            rated_rpm: motor.rated_rpm,
            wheel_radius: WHEEL_RADIUS,
            reduction_ratio: params.reduction_ratio,
        };

        let battery = BatterySummary {
            sizing: drive_cycle.as_ref().map(|result| result.sizing),
            max_charge_current: None,
            max_discharge_current: sweep.peaks.max_current,
            max_voltage: params.battery_max_voltage,
            min_voltage: params.battery_min_voltage,
        };

        SizingReport {
            parameters: *params,
            motor: motor_summary,
            battery,
            thermal: thermal.into(),
            degradation: degradation.into(),
            acceleration,
            performance: sweep.curves(),
            peaks: sweep.peaks,
            forces: sweep.forces,
            drive_cycle: drive_cycle.as_ref().map(DriveCycleTotals::from),
            recommendations: RECOMMENDATIONS.iter().map(|r| r.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use electrical::DegradationModel;

    #[test]
    fn test_degradation_summary_points() {
        let model = DegradationModel::default();
        let summary = DegradationSummary::from(model.simulate());

        assert_relative_eq!(summary.at_500, model.capacity_percent(500.0), max_relative = 1e-12);
        assert_abs_diff_eq!(summary.at_1000, 94.79, epsilon = 0.01);
        assert_abs_diff_eq!(summary.at_2000, 91.95, epsilon = 0.01);
        assert!(summary.at_1500 < summary.at_1000 && summary.at_1500 > summary.at_2000);
    }

    #[test]
    fn test_thermal_summary_keeps_series() {
        let profile = electrical::ThermalConfig::default().simulate();
        let peak = profile.max_discharge_temperature;
        let len = profile.temperatures.len();
        let summary = ThermalSummary::from(profile);

        assert_eq!(summary.max_discharge_temperature, peak);
        assert_eq!(summary.temperatures.len(), len);
        assert_eq!(summary.time_hours.len(), len);
    }
}
