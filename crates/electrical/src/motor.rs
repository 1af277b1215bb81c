use std::f64::consts::PI;

use log::debug;
use mechanics::road_load::{grade_force, rolling_resistance};
use mechanics::{DrivetrainLink, ReferenceForces};
use serde::{Deserialize, Serialize};
use simcore::numeric::ramp;
use simcore::params::grade_to_angle;
use simcore::VehicleParameters;

/// Motor speed at the end of the constant-torque region (rpm).
pub const BASE_RPM: f64 = 500.0;

/// Motor efficiency up to base speed.
pub const PEAK_EFFICIENCY: f64 = 0.93;

/// Motor efficiency from rated speed upwards.
pub const HIGH_SPEED_EFFICIENCY: f64 = 0.75;

/// Rolling coefficient of the top-speed balance, independent of the configured one.
const RATED_ROLLING_COEFFICIENT: f64 = 0.015;

/// Breakpoints of the motor's constant-torque / constant-power envelope.
///
/// Below `base_rpm` the motor delivers `base_torque`, above `rated_rpm` it delivers
/// `rated_torque`, with a straight line in between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorParameters {
    /// rpm1
    pub base_rpm: f64,
    /// rpm2
    pub rated_rpm: f64,
    /// T1 (N·m), sized for launch on the configured grade at the target acceleration
    pub base_torque: f64,
    /// T2 (N·m), sized for cruising at top speed on the category's rated grade
    pub rated_torque: f64,
    /// Continuous power at rated speed (W)
    pub continuous_power: f64,
}

impl MotorParameters {
    /// Derives the envelope from launch and top-speed force balances.
    ///
    /// Nothing is validated: implausible parameters give negative, infinite or NaN values.
    pub fn derive(params: &VehicleParameters) -> Self {
        let link = DrivetrainLink::from_parameters(params);
        let forces = ReferenceForces::from_parameters(params);

        let base_torque = link.motor_torque_for(forces.launch_total());

        let rated_rpm = link.rated_motor_rpm(params.top_speed_mps());
        let rated_angle = grade_to_angle(params.category.rated_grade_percent());
        let top_speed_force = forces.aerodynamic
            + rolling_resistance(params.load, RATED_ROLLING_COEFFICIENT, rated_angle)
            + grade_force(params.load, rated_angle);
        let rated_torque = link.motor_torque_for(top_speed_force);
        let continuous_power = rated_torque * 2.0 * PI * rated_rpm / 60.0;

        debug!(
            "motor envelope: T1 = {base_torque:.2} N·m @ {BASE_RPM} rpm, \
             T2 = {rated_torque:.2} N·m @ {rated_rpm:.0} rpm, P = {continuous_power:.0} W"
        );

        MotorParameters {
            base_rpm: BASE_RPM,
            rated_rpm,
            base_torque,
            rated_torque,
            continuous_power,
        }
    }

    /// Available torque at a motor speed (N·m)
    pub fn torque_at(&self, rpm: f64) -> f64 {
        ramp(
            rpm,
            (self.base_rpm, self.base_torque),
            (self.rated_rpm, self.rated_torque),
        )
    }

    /// Motor efficiency at a motor speed; falls from peak to high-speed efficiency
    /// across the same rpm range as the torque.
    pub fn efficiency_at(&self, rpm: f64) -> f64 {
        ramp(
            rpm,
            (self.base_rpm, PEAK_EFFICIENCY),
            (self.rated_rpm, HIGH_SPEED_EFFICIENCY),
        )
    }
}
