//! Drivetrain link - couples the traction motor to the driven wheel
//!
//! Provides conversions between:
//! - Vehicle speed and wheel / motor shaft speed (rpm)
//! - Motor torque and tractive force at the tyre contact patch
//! - Tractive force and the motor torque needed to produce it

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use simcore::VehicleParameters;
use simcore::constants::WHEEL_RADIUS;

/// Fixed single-speed reduction between motor and wheel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrivetrainLink {
    /// Reduction ratio (motor speed / wheel speed). E.g., 15.12 for 15.12:1
    pub gear_ratio: f64,

    /// Loaded wheel radius (m)
    pub wheel_radius: f64,

    /// Power transfer efficiency (0.0 to 1.0)
    pub efficiency: f64,
}

impl Default for DrivetrainLink {
    fn default() -> Self {
        DrivetrainLink {
            gear_ratio: 1.0,
            wheel_radius: WHEEL_RADIUS,
            efficiency: 1.0,
        }
    }
}

impl DrivetrainLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link described by the vehicle's reduction ratio and drivetrain efficiency.
    pub fn from_parameters(params: &VehicleParameters) -> Self {
        DrivetrainLink {
            gear_ratio: params.reduction_ratio,
            wheel_radius: WHEEL_RADIUS,
            efficiency: params.efficiency,
        }
    }

    /// Set gear ratio (builder pattern)
    pub fn with_gear_ratio(mut self, ratio: f64) -> Self {
        self.gear_ratio = ratio;
        self
    }

    pub fn with_wheel_radius(mut self, radius: f64) -> Self {
        self.wheel_radius = radius;
        self
    }

    pub fn with_efficiency(mut self, efficiency: f64) -> Self {
        self.efficiency = efficiency;
        self
    }

    /// Wheel speed (rpm) at a vehicle speed (m/s)
    pub fn wheel_rpm(&self, speed_mps: f64) -> f64 {
        speed_mps / (2.0 * PI * self.wheel_radius) * 60.0
    }

    /// Motor shaft speed (rpm) at a vehicle speed (m/s)
    pub fn motor_rpm(&self, speed_mps: f64) -> f64 {
        self.wheel_rpm(speed_mps) * self.gear_ratio
    }

    /// Motor speed the machine is rated for at a vehicle speed (m/s).
    ///
    /// Same as [`Self::motor_rpm`] but scaled up by the link efficiency, so the rating
    /// covers slip and transmission losses.
    pub fn rated_motor_rpm(&self, speed_mps: f64) -> f64 {
        let wheel_rpm = speed_mps * 30.0 / (PI * self.wheel_radius);
        wheel_rpm * self.gear_ratio / self.efficiency
    }

    /// Tractive force (N) produced by a motor torque (N·m) through a given efficiency.
    ///
    /// The efficiency is explicit because callers use either the link efficiency or a
    /// speed-dependent motor efficiency.
    pub fn wheel_force(&self, motor_torque: f64, efficiency: f64) -> f64 {
        motor_torque * self.gear_ratio * efficiency / self.wheel_radius
    }

    /// Motor torque (N·m) required to produce a tractive force (N)
    pub fn motor_torque_for(&self, wheel_force: f64) -> f64 {
        wheel_force * self.wheel_radius / (self.gear_ratio * self.efficiency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_wheel_rpm_one_revolution_per_second() {
        let link = DrivetrainLink::new().with_wheel_radius(0.5);

        // circumference = π m, travelling π m/s -> 60 rpm
        assert_abs_diff_eq!(link.wheel_rpm(PI), 60.0, epsilon = 1e-10);
    }

    #[test]
    fn test_motor_rpm_scales_with_ratio() {
        let link = DrivetrainLink::new().with_gear_ratio(10.0).with_wheel_radius(0.5);

        assert_abs_diff_eq!(link.motor_rpm(PI), 600.0, epsilon = 1e-9);
        assert_eq!(link.motor_rpm(0.0), 0.0);
    }

    #[test]
    fn test_rated_rpm_includes_efficiency() {
        let link = DrivetrainLink::new()
            .with_gear_ratio(10.0)
            .with_wheel_radius(0.5)
            .with_efficiency(0.8);

        // 600 rpm at the motor, rated 600 / 0.8 = 750 rpm
        assert_abs_diff_eq!(link.rated_motor_rpm(PI), 750.0, epsilon = 1e-9);
    }

    #[test]
    fn test_wheel_force_with_efficiency() {
        let link = DrivetrainLink::new().with_gear_ratio(20.0).with_wheel_radius(0.25);

        // 1 Nm * 20 * 0.9 / 0.25 m = 72 N
        assert_abs_diff_eq!(link.wheel_force(1.0, 0.9), 72.0, epsilon = 1e-10);
    }

    #[test]
    fn test_torque_force_inverse() {
        let link = DrivetrainLink::new()
            .with_gear_ratio(15.12)
            .with_efficiency(0.93);

        let torque = link.motor_torque_for(2000.0);
        assert_abs_diff_eq!(link.wheel_force(torque, 0.93), 2000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_from_parameters() {
        let params = VehicleParameters::default();
        let link = DrivetrainLink::from_parameters(&params);

        assert_eq!(link.gear_ratio, 15.12);
        assert_eq!(link.efficiency, 0.93);
        assert_eq!(link.wheel_radius, WHEEL_RADIUS);
    }
}
