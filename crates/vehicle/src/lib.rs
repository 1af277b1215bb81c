//! Vehicle-level simulations and the sizing engine that ties every model together.

pub mod acceleration;
pub mod drive_cycle;
pub mod engine;
pub mod error;
pub mod report;

pub use acceleration::{AccelerationConfig, AccelerationProfile, SpeedCheckpoint, TimeToSpeed, simulate_acceleration};
pub use drive_cycle::{CycleStep, DriveCycle, DriveCycleResult, DriveCycleSample, simulate_drive_cycle};
pub use engine::{Engine, EngineConfig};
pub use error::EngineError;
pub use report::SizingReport;
