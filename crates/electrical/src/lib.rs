pub mod analysis;
pub mod battery;
pub mod degradation;
pub mod motor;
pub mod pack;

pub use analysis::{MotorOperatingPoint, PeakValues, PerformanceCurves, PerformanceSweep, performance_sweep};
pub use battery::{ThermalConfig, ThermalPhase, ThermalProfile};
pub use degradation::{DegradationCurve, DegradationModel};
pub use motor::MotorParameters;
pub use pack::{BatterySizing, PackConfig};
