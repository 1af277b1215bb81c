//! Physical constants shared by every model in the workspace.

/// Loaded wheel radius (m).
pub const WHEEL_RADIUS: f64 = 0.287;

/// Air density at sea level, 15 °C (kg/m³).
pub const AIR_DENSITY: f64 = 1.225;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;

pub const KMH_PER_MPS: f64 = 3.6;

pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Offset between Kelvin and degrees Celsius.
pub const ZERO_CELSIUS: f64 = 273.15;
