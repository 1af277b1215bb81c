//! Straight-line launch simulation, integrating vehicle speed with RK4.

use electrical::MotorParameters;
use log::debug;
use mechanics::{DrivetrainLink, RoadLoad};
use serde::{Deserialize, Serialize};
use simcore::constants::KMH_PER_MPS;
use simcore::{FixedTimestepIntegrator, RungeKutta4, VehicleParameters};

/// Integration settings and reporting checkpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccelerationConfig {
    /// RK4 step (s)
    pub dt: f64,
    /// Hard stop (s); the state reached there is returned as is
    pub cutoff: f64,
    /// Times (s) at which the reached speed is reported
    pub checkpoints: Vec<f64>,
}

impl Default for AccelerationConfig {
    fn default() -> Self {
        AccelerationConfig {
            dt: 0.1,
            cutoff: 60.0,
            checkpoints: vec![2.0, 3.0, 10.0],
        }
    }
}

impl AccelerationConfig {
    pub fn with_checkpoints(mut self, checkpoints: Vec<f64>) -> Self {
        self.checkpoints = checkpoints;
        self
    }

    fn integrator(&self) -> FixedTimestepIntegrator<RungeKutta4> {
        FixedTimestepIntegrator::new(RungeKutta4, self.dt).with_cutoff(self.cutoff)
    }
}

/// Speed reached after a fixed time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedCheckpoint {
    pub label: String,
    /// Requested time (s)
    pub time: f64,
    /// Speed reached (km/h)
    pub speed: f64,
}

/// Time needed to reach a target speed from standstill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeToSpeed {
    pub label: String,
    /// Target speed (km/h)
    pub target: f64,
    /// Elapsed time when the loop stopped (s)
    pub time: f64,
    /// Speed when the loop stopped (km/h)
    pub speed: f64,
    /// False when the cutoff stopped the run first
    pub reached: bool,
}

/// Result of the launch simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccelerationProfile {
    pub checkpoints: Vec<SpeedCheckpoint>,
    pub to_top_speed: TimeToSpeed,
}

/// Longitudinal dynamics of the vehicle on its configured grade.
///
/// Holds the motor envelope derived once for the run; every derivative evaluation reuses it.
#[derive(Debug, Clone, Copy)]
pub struct LongitudinalModel<'a> {
    params: &'a VehicleParameters,
    motor: MotorParameters,
    link: DrivetrainLink,
    road: RoadLoad<'a>,
}

impl<'a> LongitudinalModel<'a> {
    pub fn new(params: &'a VehicleParameters, motor: MotorParameters) -> Self {
        LongitudinalModel {
            params,
            motor,
            link: DrivetrainLink::from_parameters(params),
            road: RoadLoad::new(params),
        }
    }

    /// Net acceleration (m/s²) at a speed (m/s).
    pub fn acceleration(&self, speed_mps: f64) -> f64 {
        let rpm = self.link.motor_rpm(speed_mps);
        let torque = self.motor.torque_at(rpm);
        let drive = self.link.wheel_force(torque, self.motor.efficiency_at(rpm));

        let resistance = self.road.rolling_resistance(speed_mps)
            + self.road.aerodynamic_drag(speed_mps)
            + self.road.grade_force();

        (drive - resistance) / self.params.load
    }

    /// Speed (km/h) reached from standstill after `time_limit` seconds.
    pub fn speed_after(&self, config: &AccelerationConfig, time_limit: f64) -> f64 {
        let (_, speed) = config
            .integrator()
            .run_while(0.0, |v| self.acceleration(v), |t, _| t < time_limit);
        speed * KMH_PER_MPS
    }

    /// Elapsed time (s) and speed (km/h) when `target` km/h is reached or the cutoff hits.
    pub fn time_to_speed(&self, config: &AccelerationConfig, target: f64) -> (f64, f64) {
        let target_mps = target / KMH_PER_MPS;
        let (time, speed) = config
            .integrator()
            .run_while(0.0, |v| self.acceleration(v), |_, v| v < target_mps);
        (time, speed * KMH_PER_MPS)
    }
}

/// Speeds at the configured checkpoints and the time to reach top speed.
pub fn simulate_acceleration(
    params: &VehicleParameters,
    motor: &MotorParameters,
    config: &AccelerationConfig,
) -> AccelerationProfile {
    let model = LongitudinalModel::new(params, *motor);

    let checkpoints = config
        .checkpoints
        .iter()
        .map(|&time| SpeedCheckpoint {
            label: format!("V{time}s"),
            time,
            speed: model.speed_after(config, time),
        })
        .collect();

    let (time, speed) = model.time_to_speed(config, params.top_speed);
    let to_top_speed = TimeToSpeed {
        label: format!("0→{} km/h", params.top_speed),
        target: params.top_speed,
        time,
        speed,
        reached: speed >= params.top_speed,
    };
    debug!(
        "launch: {} in {:.2} s (reached: {})",
        to_top_speed.label, to_top_speed.time, to_top_speed.reached
    );

    AccelerationProfile {
        checkpoints,
        to_top_speed,
    }
}
