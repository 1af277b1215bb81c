use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::KMH_PER_MPS;
use crate::error::SimError;

/// European light-vehicle category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "L5E")]
    L5e,
    #[default]
    #[serde(rename = "L6E")]
    L6e,
    #[serde(rename = "L7E")]
    L7e,
}

impl Category {
    /// Grade (%) assumed when sizing the motor for continuous operation at top speed.
    ///
    /// Heavy quadricycles are rated on the flat, every other category on a 5 % climb.
    pub fn rated_grade_percent(self) -> f64 {
        match self {
            Category::L7e => 0.0,
            Category::L5e | Category::L6e => 5.0,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Category::L5e => "L5E",
            Category::L6e => "L6E",
            Category::L7e => "L7E",
        };
        f.write_str(code)
    }
}

impl FromStr for Category {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L5E" => Ok(Category::L5e),
            "L6E" => Ok(Category::L6e),
            "L7E" => Ok(Category::L7e),
            _ => Err(SimError::UnknownCategory(s.to_owned())),
        }
    }
}

/// Top-level vehicle requirements. Set once, then handed by reference to every model.
///
/// Fields missing from a serialized form take the reference vehicle's values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleParameters {
    pub category: Category,
    /// Vehicle mass including payload (kg)
    pub load: f64,
    /// Frontal area (m²)
    pub frontal_area: f64,
    /// Top speed (km/h)
    pub top_speed: f64,
    /// Desired range on one charge (km)
    pub desired_range: f64,
    pub drag_coefficient: f64,
    pub rolling_coefficient: f64,
    /// Drivetrain efficiency (0.0 to 1.0)
    pub efficiency: f64,
    /// Road grade (%)
    pub grade: f64,
    /// Target launch acceleration (m/s²)
    pub target_acceleration: f64,
    /// Reduction ratio between motor and wheel
    pub reduction_ratio: f64,
    /// Pack voltage when full (V)
    pub battery_max_voltage: f64,
    /// Pack voltage when empty (V)
    pub battery_min_voltage: f64,
}

impl Default for VehicleParameters {
    fn default() -> Self {
        VehicleParameters {
            category: Category::L6e,
            load: 750.0,
            frontal_area: 2.1,
            top_speed: 45.0,
            desired_range: 80.0,
            drag_coefficient: 0.35,
            rolling_coefficient: 0.015,
            efficiency: 0.93,
            grade: 16.0,
            target_acceleration: 1.3,
            reduction_ratio: 15.12,
            battery_max_voltage: 51.0,
            battery_min_voltage: 42.0,
        }
    }
}

impl VehicleParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_load(mut self, load: f64) -> Self {
        self.load = load;
        self
    }

    pub fn with_top_speed(mut self, top_speed: f64) -> Self {
        self.top_speed = top_speed;
        self
    }

    pub fn with_desired_range(mut self, desired_range: f64) -> Self {
        self.desired_range = desired_range;
        self
    }

    pub fn with_efficiency(mut self, efficiency: f64) -> Self {
        self.efficiency = efficiency;
        self
    }

    pub fn with_grade(mut self, grade: f64) -> Self {
        self.grade = grade;
        self
    }

    pub fn with_target_acceleration(mut self, target_acceleration: f64) -> Self {
        self.target_acceleration = target_acceleration;
        self
    }

    pub fn with_reduction_ratio(mut self, reduction_ratio: f64) -> Self {
        self.reduction_ratio = reduction_ratio;
        self
    }

    pub fn with_battery_voltage(mut self, max: f64, min: f64) -> Self {
        self.battery_max_voltage = max;
        self.battery_min_voltage = min;
        self
    }

    /// Top speed in m/s.
    pub fn top_speed_mps(&self) -> f64 {
        self.top_speed / KMH_PER_MPS
    }

    /// Road grade as an angle (rad).
    pub fn grade_angle(&self) -> f64 {
        grade_to_angle(self.grade)
    }
}

/// Converts a grade in percent to the road angle in radians.
pub fn grade_to_angle(grade_percent: f64) -> f64 {
    (grade_percent / 100.0).atan()
}
