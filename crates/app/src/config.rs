//! Loading and validating vehicle parameters before they reach the engine.

use std::fs;
use std::path::Path;

use log::debug;
use simcore::VehicleParameters;

use crate::error::{AppError, ValidationErrors};

/// Reads parameters from a JSON file, or the reference vehicle when no file is given.
pub fn load_parameters(path: Option<&Path>) -> Result<VehicleParameters, AppError> {
    let Some(path) = path else {
        debug!("no parameter file, using the reference vehicle");
        return Ok(VehicleParameters::default());
    };

    let text = fs::read_to_string(path).map_err(|source| AppError::ReadParams {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AppError::ParseParams {
        path: path.to_path_buf(),
        source,
    })
}

/// Applies the input-form rules; all violations are collected.
pub fn validate(params: &VehicleParameters) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let numeric = [
        ("load", params.load),
        ("frontal_area", params.frontal_area),
        ("top_speed", params.top_speed),
        ("desired_range", params.desired_range),
        ("drag_coefficient", params.drag_coefficient),
        ("rolling_coefficient", params.rolling_coefficient),
        ("efficiency", params.efficiency),
        ("grade", params.grade),
        ("target_acceleration", params.target_acceleration),
        ("reduction_ratio", params.reduction_ratio),
        ("battery_max_voltage", params.battery_max_voltage),
        ("battery_min_voltage", params.battery_min_voltage),
    ];
    for (field, value) in numeric {
        if !value.is_finite() {
            errors.push(field, "must be a finite number");
        }
    }

    let rules = [
        ("load", params.load >= 0.0, "must be positive"),
        ("top_speed", params.top_speed > 0.0, "must be > 0"),
        ("desired_range", params.desired_range > 0.0, "must be > 0"),
        ("drag_coefficient", params.drag_coefficient > 0.0, "must be > 0"),
        ("rolling_coefficient", params.rolling_coefficient >= 0.0, "must be ≥ 0"),
        (
            "efficiency",
            params.efficiency > 0.0 && params.efficiency <= 1.0,
            "must be between 0 and 1",
        ),
        ("reduction_ratio", params.reduction_ratio > 0.0, "must be > 0"),
        ("battery_max_voltage", params.battery_max_voltage > 0.0, "must be > 0"),
        (
            "battery_min_voltage",
            params.battery_min_voltage > 0.0 && params.battery_min_voltage < params.battery_max_voltage,
            "must be > 0 and below the maximum voltage",
        ),
    ];
    for (field, ok, message) in rules {
        // non-finite values are already reported
        if !ok && !errors.fields().any(|f| f == field) {
            errors.push(field, message);
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
