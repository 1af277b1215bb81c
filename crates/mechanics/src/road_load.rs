//! Road-load forces opposing the vehicle: rolling resistance, grade, aerodynamic drag and
//! inertia.

use serde::{Deserialize, Serialize};
use simcore::VehicleParameters;
use simcore::constants::{AIR_DENSITY, GRAVITY, KMH_PER_MPS};

/// Rolling coefficient gained between standstill and top speed.
pub const ROLLING_GROWTH: f64 = 0.003;

/// Drag coefficient gained at top speed; grows with the square of the speed fraction.
pub const DRAG_GROWTH: f64 = 0.02;

/// Rolling resistance (N) on a road inclined by `grade_angle` (rad).
pub fn rolling_resistance(load: f64, coefficient: f64, grade_angle: f64) -> f64 {
    load * GRAVITY * coefficient * grade_angle.cos()
}

/// Gravity component along a road inclined by `grade_angle` (rad).
pub fn grade_force(load: f64, grade_angle: f64) -> f64 {
    load * GRAVITY * grade_angle.sin()
}

/// Aerodynamic drag (N) at a speed (m/s).
pub fn aerodynamic_drag(drag_coefficient: f64, frontal_area: f64, speed_mps: f64) -> f64 {
    0.5 * AIR_DENSITY * drag_coefficient * frontal_area * speed_mps * speed_mps
}

/// Speed-dependent road load of one vehicle.
///
/// Both loss coefficients rise with the fraction of top speed reached: rolling resistance
/// linearly, aerodynamic drag quadratically.
#[derive(Debug, Clone, Copy)]
pub struct RoadLoad<'a> {
    params: &'a VehicleParameters,
}

impl<'a> RoadLoad<'a> {
    pub fn new(params: &'a VehicleParameters) -> Self {
        RoadLoad { params }
    }

    fn speed_fraction(&self, speed_kmh: f64) -> f64 {
        speed_kmh / self.params.top_speed
    }

    pub fn rolling_coefficient_at(&self, speed_kmh: f64) -> f64 {
        self.params.rolling_coefficient + ROLLING_GROWTH * self.speed_fraction(speed_kmh)
    }

    pub fn drag_coefficient_at(&self, speed_kmh: f64) -> f64 {
        self.params.drag_coefficient + DRAG_GROWTH * self.speed_fraction(speed_kmh).powi(2)
    }

    /// Rolling resistance (N) at a speed (m/s), ignoring the grade.
    pub fn rolling_resistance(&self, speed_mps: f64) -> f64 {
        self.rolling_coefficient_at(speed_mps * KMH_PER_MPS) * self.params.load * GRAVITY
    }

    /// Aerodynamic drag (N) at a speed (m/s) with the speed-dependent coefficient.
    pub fn aerodynamic_drag(&self, speed_mps: f64) -> f64 {
        aerodynamic_drag(
            self.drag_coefficient_at(speed_mps * KMH_PER_MPS),
            self.params.frontal_area,
            speed_mps,
        )
    }

    /// Climbing force (N) on the configured grade.
    pub fn grade_force(&self) -> f64 {
        grade_force(self.params.load, self.params.grade_angle())
    }

    pub fn inertial_force(&self, acceleration: f64) -> f64 {
        self.params.load * acceleration
    }
}

/// Force components of the launch and top-speed balances, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceForces {
    /// Rolling resistance on the configured grade (N)
    pub rolling: f64,
    /// Gravity component on the configured grade (N)
    pub grade: f64,
    /// Force needed for the target acceleration (N)
    pub acceleration: f64,
    /// Aerodynamic drag at top speed with the base drag coefficient (N)
    pub aerodynamic: f64,
}

impl ReferenceForces {
    pub fn from_parameters(params: &VehicleParameters) -> Self {
        let angle = params.grade_angle();
        ReferenceForces {
            rolling: rolling_resistance(params.load, params.rolling_coefficient, angle),
            grade: grade_force(params.load, angle),
            acceleration: params.load * params.target_acceleration,
            aerodynamic: aerodynamic_drag(
                params.drag_coefficient,
                params.frontal_area,
                params.top_speed_mps(),
            ),
        }
    }

    /// Force the drivetrain must deliver at launch (N).
    pub fn launch_total(&self) -> f64 {
        self.rolling + self.grade + self.acceleration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_flat_road_has_no_grade_force() {
        assert_eq!(grade_force(750.0, 0.0), 0.0);
        assert_abs_diff_eq!(rolling_resistance(750.0, 0.015, 0.0), 110.3625, epsilon = 1e-9);
    }

    #[test]
    fn test_coefficients_grow_with_speed() {
        let params = VehicleParameters::default();
        let road = RoadLoad::new(&params);

        assert_eq!(road.rolling_coefficient_at(0.0), params.rolling_coefficient);
        assert_eq!(road.drag_coefficient_at(0.0), params.drag_coefficient);

        // at top speed the full growth applies
        assert_abs_diff_eq!(road.rolling_coefficient_at(45.0), 0.018, epsilon = 1e-12);
        assert_abs_diff_eq!(road.drag_coefficient_at(45.0), 0.37, epsilon = 1e-12);

        // drag grows quadratically: a quarter of the growth at half speed
        assert_abs_diff_eq!(road.drag_coefficient_at(22.5), 0.355, epsilon = 1e-12);
    }

    #[test]
    fn test_aerodynamic_drag_at_standstill() {
        let params = VehicleParameters::default();
        assert_eq!(RoadLoad::new(&params).aerodynamic_drag(0.0), 0.0);
    }

    #[test]
    fn test_reference_forces() {
        let params = VehicleParameters::default();
        let forces = ReferenceForces::from_parameters(&params);

        assert_abs_diff_eq!(forces.acceleration, 975.0, epsilon = 1e-9);
        // 16 % grade: sin(atan(0.16)) = 0.16 / sqrt(1.0256)
        assert_abs_diff_eq!(
            forces.grade,
            750.0 * GRAVITY * 0.16 / 1.0256_f64.sqrt(),
            epsilon = 1e-9
        );
        // 0.5 * 1.225 * 0.35 * 2.1 * 12.5²
        assert_abs_diff_eq!(forces.aerodynamic, 70.341796875, epsilon = 1e-9);
        assert_abs_diff_eq!(
            forces.launch_total(),
            forces.rolling + forces.grade + forces.acceleration,
            epsilon = 1e-12
        );
    }
}
