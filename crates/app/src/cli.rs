use std::path::PathBuf;

use clap::{Args, Parser};
use simcore::{Category, VehicleParameters};

#[derive(Parser, Debug)]
#[command(name = "lev-sizing")]
#[command(about = "Powertrain sizing for light electric vehicles (L5E, L6E, L7E)", long_about = None)]
pub struct Cli {
    /// JSON file with vehicle parameters; the reference L6E vehicle when omitted
    #[arg(short, long)]
    pub params: Option<PathBuf>,

    /// Drive cycle CSV with a `t,v` header (seconds, km/h)
    #[arg(short, long)]
    pub cycle: Option<PathBuf>,

    /// Write the full sizing report as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the performance curves as CSV
    #[arg(long)]
    pub curves: Option<PathBuf>,

    /// Log intermediate model results
    #[arg(short, long)]
    pub verbose: bool,

    #[command(flatten)]
    pub overrides: Overrides,
}

/// Per-field overrides applied on top of the loaded parameters
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// Vehicle category (L5E, L6E, L7E)
    #[arg(long)]
    pub category: Option<Category>,
    /// Load mass (kg)
    #[arg(long)]
    pub load: Option<f64>,
    /// Frontal area (m²)
    #[arg(long)]
    pub frontal_area: Option<f64>,
    /// Top speed (km/h)
    #[arg(long)]
    pub top_speed: Option<f64>,
    /// Desired range (km)
    #[arg(long)]
    pub range: Option<f64>,
    /// Aerodynamic drag coefficient
    #[arg(long)]
    pub drag_coefficient: Option<f64>,
    /// Rolling resistance coefficient
    #[arg(long)]
    pub rolling_coefficient: Option<f64>,
    /// Drivetrain efficiency (0, 1]
    #[arg(long)]
    pub efficiency: Option<f64>,
    /// Launch grade (%)
    #[arg(long)]
    pub grade: Option<f64>,
    /// Target launch acceleration (m/s²)
    #[arg(long)]
    pub acceleration: Option<f64>,
    /// Reduction ratio
    #[arg(long)]
    pub ratio: Option<f64>,
    /// Full-pack voltage (V)
    #[arg(long)]
    pub v_max: Option<f64>,
    /// Empty-pack voltage (V)
    #[arg(long)]
    pub v_min: Option<f64>,
}

impl Overrides {
    pub fn apply(&self, mut params: VehicleParameters) -> VehicleParameters {
        if let Some(category) = self.category {
            params.category = category;
        }
        let fields = [
            (self.load, &mut params.load),
            (self.frontal_area, &mut params.frontal_area),
            (self.top_speed, &mut params.top_speed),
            (self.range, &mut params.desired_range),
            (self.drag_coefficient, &mut params.drag_coefficient),
            (self.rolling_coefficient, &mut params.rolling_coefficient),
            (self.efficiency, &mut params.efficiency),
            (self.grade, &mut params.grade),
            (self.acceleration, &mut params.target_acceleration),
            (self.ratio, &mut params.reduction_ratio),
            (self.v_max, &mut params.battery_max_voltage),
            (self.v_min, &mut params.battery_min_voltage),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
        params
    }
}
