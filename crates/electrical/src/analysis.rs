//! Motor performance sweep over the vehicle's speed range
//!
//! Walks every whole km/h from standstill to top speed and records the operating point the
//! motor envelope allows there, together with the peaks a pack and inverter must cover.

use log::debug;
use mechanics::{DrivetrainLink, ReferenceForces};
use serde::{Deserialize, Serialize};
use simcore::VehicleParameters;
use simcore::constants::KMH_PER_MPS;

use crate::motor::MotorParameters;

/// Data point of the performance sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorOperatingPoint {
    /// Vehicle speed (km/h)
    pub speed: f64,
    /// Motor speed, rounded to whole rpm
    pub rpm: f64,
    /// Assumed pack terminal voltage (V)
    pub voltage: f64,
    /// Mechanical power at the wheel (W)
    pub power: f64,
    /// Battery current (A)
    pub current: f64,
    /// Motor torque (N·m)
    pub torque: f64,
    pub efficiency: f64,
}

/// Peaks observed across the sweep, each with the motor speed it occurred at.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PeakValues {
    /// Highest power at or above base speed (W)
    pub max_power: f64,
    pub rpm_at_max_power: f64,
    /// Highest battery current (A)
    pub max_current: f64,
    pub rpm_at_max_current: f64,
    /// Highest torque (N·m)
    pub max_torque: f64,
    pub rpm_at_max_torque: f64,
}

impl PeakValues {
    fn observe(&mut self, rpm: f64, power: f64, current: f64, torque: f64, base_rpm: f64) {
        // constant-torque region is excluded from the power peak
        if power > self.max_power && rpm >= base_rpm {
            self.max_power = power;
            self.rpm_at_max_power = rpm;
        }
        if current > self.max_current {
            self.max_current = current;
            self.rpm_at_max_current = rpm;
        }
        if torque > self.max_torque {
            self.max_torque = torque;
            self.rpm_at_max_torque = rpm;
        }
    }
}

/// Sweep data as parallel vectors, ready for plotting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceCurves {
    pub rpm: Vec<f64>,
    pub power: Vec<f64>,
    pub torque: Vec<f64>,
    pub speed: Vec<f64>,
    pub efficiency_percent: Vec<f64>,
}

/// Result of the performance sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSweep {
    pub motor: MotorParameters,
    /// One point per whole km/h, ascending
    pub points: Vec<MotorOperatingPoint>,
    pub peaks: PeakValues,
    pub forces: ReferenceForces,
}

impl PerformanceSweep {
    pub fn curves(&self) -> PerformanceCurves {
        let n = self.points.len();
        let mut curves = PerformanceCurves {
            rpm: Vec::with_capacity(n),
            power: Vec::with_capacity(n),
            torque: Vec::with_capacity(n),
            speed: Vec::with_capacity(n),
            efficiency_percent: Vec::with_capacity(n),
        };
        for point in &self.points {
            curves.rpm.push(point.rpm);
            curves.power.push(point.power);
            curves.torque.push(point.torque);
            curves.speed.push(point.speed);
            curves.efficiency_percent.push(point.efficiency * 100.0);
        }
        curves
    }
}

/// Pack voltage assumed at a vehicle speed (km/h).
///
/// Falls linearly from the full-pack voltage at standstill to the empty-pack voltage at top
/// speed, so the fastest operating points are checked against the weakest pack.
pub fn battery_voltage_at(params: &VehicleParameters, speed_kmh: f64) -> f64 {
    let span = params.battery_max_voltage - params.battery_min_voltage;
    params.battery_max_voltage - span * (speed_kmh / params.top_speed)
}

/// Runs the sweep from 0 km/h to top speed in 1 km/h steps.
pub fn performance_sweep(params: &VehicleParameters, motor: &MotorParameters) -> PerformanceSweep {
    let link = DrivetrainLink::from_parameters(params);
    let mut peaks = PeakValues::default();

    let points: Vec<MotorOperatingPoint> = (0..=u16::MAX)
        .map(f64::from)
        .take_while(|&speed| speed <= params.top_speed)
        .map(|speed| {
            let speed_mps = speed / KMH_PER_MPS;
            let rpm = link.motor_rpm(speed_mps);
            let voltage = battery_voltage_at(params, speed);
            let torque = motor.torque_at(rpm);
            let efficiency = motor.efficiency_at(rpm);

            let power = link.wheel_force(torque, params.efficiency) * speed_mps;
            let current = power / voltage;
            peaks.observe(rpm, power, current, torque, motor.base_rpm);

            MotorOperatingPoint {
                speed,
                rpm: rpm.round(),
                voltage,
                power,
                current,
                torque,
                efficiency,
            }
        })
        .collect();

    debug!(
        "performance sweep: {} points, P_max = {:.0} W @ {:.0} rpm, I_max = {:.1} A",
        points.len(),
        peaks.max_power,
        peaks.rpm_at_max_power,
        peaks.max_current
    );

    PerformanceSweep {
        motor: *motor,
        points,
        peaks,
        forces: ReferenceForces::from_parameters(params),
    }
}
