//! Energy use over a recorded speed trace, and the pack needed to cover the desired range.

use electrical::{BatterySizing, PackConfig};
use log::debug;
use mechanics::RoadLoad;
use serde::{Deserialize, Serialize};
use simcore::constants::{KMH_PER_MPS, SECONDS_PER_HOUR};
use simcore::{SimError, SimResult, VehicleParameters};

/// Share of braking power recovered into the pack.
pub const REGEN_EFFICIENCY: f64 = 0.5;

/// One row of a recorded trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveCycleSample {
    /// Time offset (s)
    pub t: f64,
    /// Speed (km/h)
    pub v: f64,
}

/// Speed-vs-time trace, conventionally starting at t = 0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriveCycle {
    time: Vec<f64>,
    speed: Vec<f64>,
}

impl DriveCycle {
    /// Builds a cycle from parallel time (s) and speed (km/h) columns.
    pub fn try_new(time: Vec<f64>, speed: Vec<f64>) -> SimResult<Self> {
        if time.len() != speed.len() {
            return Err(SimError::MismatchedCycle {
                time: time.len(),
                speed: speed.len(),
            });
        }
        Ok(DriveCycle { time, speed })
    }

    /// Constant speed (km/h), one sample per second for `duration` seconds.
    pub fn constant_speed(speed: f64, duration: usize) -> Self {
        DriveCycle {
            time: (0..duration).map(|t| t as f64).collect(),
            speed: vec![speed; duration],
        }
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn speed(&self) -> &[f64] {
        &self.speed
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

impl FromIterator<DriveCycleSample> for DriveCycle {
    fn from_iter<I: IntoIterator<Item = DriveCycleSample>>(iter: I) -> Self {
        let (time, speed) = iter.into_iter().map(|s| (s.t, s.v)).unzip();
        DriveCycle { time, speed }
    }
}

/// Forces, powers and energies at one sample of the cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleStep {
    /// Interval covered by this sample (s)
    pub dt: f64,
    /// Speed (m/s)
    pub speed: f64,
    /// Acceleration from the previous sample (m/s²)
    pub acceleration: f64,
    pub rolling_coefficient: f64,
    pub drag_coefficient: f64,
    pub rolling_force: f64,
    pub aero_force: f64,
    pub inertial_force: f64,
    /// Required tractive force (N)
    pub tractive_force: f64,
    /// Mechanical power at the wheel, negative when braking (W)
    pub wheel_power: f64,
    /// Power drawn from the pack (W)
    pub motor_power: f64,
    /// Power returned to the pack (W)
    pub regen_power: f64,
    pub motor_energy: f64,
    pub regen_energy: f64,
}

/// Result of the drive-cycle simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveCycleResult {
    pub steps: Vec<CycleStep>,
    pub motor_energy_wh: f64,
    pub regen_energy_wh: f64,
    pub net_energy_wh: f64,
    pub distance_km: f64,
    pub consumption_wh_per_km: f64,
    pub sizing: BatterySizing,
}

/// Integrates traction and regeneration energy over the cycle and sizes the pack.
///
/// The first sample covers `t[1]` seconds with zero acceleration. Distance integrates the
/// km/h speed over seconds and divides by 3600.
pub fn simulate_drive_cycle(
    params: &VehicleParameters,
    cycle: &DriveCycle,
    pack: &PackConfig,
) -> SimResult<DriveCycleResult> {
    let (time, speed) = (cycle.time(), cycle.speed());
    if time.len() < 2 {
        return Err(SimError::CycleTooShort { len: time.len() });
    }

    let road = RoadLoad::new(params);
    let steps: Vec<CycleStep> = (0..time.len())
        .map(|i| {
            let (dt, acceleration) = if i == 0 {
                (time[1], 0.0)
            } else {
                let dt = time[i] - time[i - 1];
                (dt, (speed[i] - speed[i - 1]) / KMH_PER_MPS / dt)
            };
            let speed_mps = speed[i] / KMH_PER_MPS;

            let rolling_coefficient = road.rolling_coefficient_at(speed[i]);
            let drag_coefficient = road.drag_coefficient_at(speed[i]);
            let rolling_force = road.rolling_resistance(speed_mps);
            let aero_force = road.aerodynamic_drag(speed_mps);
            let inertial_force = road.inertial_force(acceleration);
            let tractive_force = rolling_force + aero_force + inertial_force;

            let wheel_power = tractive_force * speed_mps;
            let motor_power = wheel_power.max(0.0) / params.efficiency;
            let regen_power = (-wheel_power).max(0.0) * REGEN_EFFICIENCY;

            CycleStep {
                dt,
                speed: speed_mps,
                acceleration,
                rolling_coefficient,
                drag_coefficient,
                rolling_force,
                aero_force,
                inertial_force,
                tractive_force,
                wheel_power,
                motor_power,
                regen_power,
                motor_energy: motor_power * dt / SECONDS_PER_HOUR,
                regen_energy: regen_power * dt / SECONDS_PER_HOUR,
            }
        })
        .collect();

    let motor_energy_wh: f64 = steps.iter().map(|s| s.motor_energy).sum();
    let regen_energy_wh: f64 = steps.iter().map(|s| s.regen_energy).sum();
    let net_energy_wh = motor_energy_wh - regen_energy_wh;
    let distance_km = steps
        .iter()
        .zip(speed)
        .map(|(step, v)| v * step.dt)
        .sum::<f64>()
        / SECONDS_PER_HOUR;

    let sizing = pack.size(params, net_energy_wh, distance_km);
    debug!(
        "drive cycle: {} samples, {distance_km:.3} km, {net_energy_wh:.1} Wh net ({regen_energy_wh:.1} Wh regenerated)",
        steps.len()
    );

    Ok(DriveCycleResult {
        steps,
        motor_energy_wh,
        regen_energy_wh,
        net_energy_wh,
        distance_km,
        consumption_wh_per_km: sizing.consumption_wh_per_km,
        sizing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_mismatched_columns_rejected() {
        let err = DriveCycle::try_new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0]).unwrap_err();
        assert_eq!(err, SimError::MismatchedCycle { time: 3, speed: 2 });
    }

    #[test]
    fn test_single_sample_is_too_short() {
        let cycle = DriveCycle::try_new(vec![0.0], vec![20.0]).unwrap();
        let result = simulate_drive_cycle(&VehicleParameters::default(), &cycle, &PackConfig::default());

        assert_eq!(result.unwrap_err(), SimError::CycleTooShort { len: 1 });
    }

    #[test]
    fn test_constant_speed_cycle() {
        let params = VehicleParameters::default();
        let cycle = DriveCycle::constant_speed(30.0, 600);
        let result = simulate_drive_cycle(&params, &cycle, &PackConfig::default()).unwrap();

        assert_abs_diff_eq!(result.distance_km, 5.0, epsilon = 1e-9);
        assert_eq!(result.regen_energy_wh, 0.0);
        assert!(result.motor_energy_wh > 0.0);
        assert!(result.steps.iter().all(|s| s.acceleration == 0.0));

        assert_eq!(result.sizing.cells_in_series, 16.0);
        assert_relative_eq!(
            result.sizing.capacity_ah_margined,
            result.sizing.capacity_wh_margined / 42.0
        );
    }

    #[test]
    fn test_constant_speed_energy_balance() {
        let params = VehicleParameters::default();
        let cycle = DriveCycle::constant_speed(30.0, 600);
        let result = simulate_drive_cycle(&params, &cycle, &PackConfig::default()).unwrap();

        // steady 30 km/h: rolling + drag at the speed fraction 2/3, for 600 s at 1/η
        let v = 30.0 / 3.6;
        let crr = 0.015 + 0.003 * (30.0 / 45.0);
        let cd = 0.35 + 0.02 * (30.0_f64 / 45.0).powi(2);
        let force = crr * 750.0 * 9.81 + 0.5 * 1.225 * cd * 2.1 * v * v;
        let expected_wh = force * v / 0.93 * 600.0 / 3600.0;
        assert_relative_eq!(result.motor_energy_wh, expected_wh, max_relative = 1e-9);
        assert_relative_eq!(result.consumption_wh_per_km, expected_wh / 5.0, max_relative = 1e-9);
    }

    #[test]
    fn test_braking_regenerates() {
        let params = VehicleParameters::default();
        let cycle = DriveCycle::try_new(
            vec![0.0, 1.0, 2.0, 3.0, 4.0],
            vec![0.0, 20.0, 40.0, 20.0, 0.0],
        )
        .unwrap();
        let result = simulate_drive_cycle(&params, &cycle, &PackConfig::default()).unwrap();

        let braking = &result.steps[3];
        assert!(braking.acceleration < 0.0);
        assert!(braking.wheel_power < 0.0);
        assert_eq!(braking.motor_power, 0.0);
        assert_abs_diff_eq!(braking.regen_power, -braking.wheel_power * 0.5, epsilon = 1e-9);

        assert!(result.regen_energy_wh > 0.0);
        assert_abs_diff_eq!(
            result.net_energy_wh,
            result.motor_energy_wh - result.regen_energy_wh,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_first_sample_uses_second_timestamp() {
        let cycle = DriveCycle::try_new(vec![0.0, 2.0, 4.0], vec![36.0, 36.0, 36.0]).unwrap();
        let result = simulate_drive_cycle(&VehicleParameters::default(), &cycle, &PackConfig::default()).unwrap();

        assert_eq!(result.steps[0].dt, 2.0);
        assert_eq!(result.steps[0].acceleration, 0.0);
        // 36 km/h for 3 × 2 s
        assert_abs_diff_eq!(result.distance_km, 0.06, epsilon = 1e-12);
    }

    #[test]
    fn test_collect_from_samples() {
        let cycle: DriveCycle = [
            DriveCycleSample { t: 0.0, v: 0.0 },
            DriveCycleSample { t: 1.0, v: 5.0 },
        ]
        .into_iter()
        .collect();

        assert_eq!(cycle.len(), 2);
        assert_eq!(cycle.speed(), &[0.0, 5.0]);
    }
}
