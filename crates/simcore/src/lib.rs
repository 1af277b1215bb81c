pub mod constants;
pub mod error;
pub mod integrators;
pub mod numeric;
pub mod params;

pub use error::{SimError, SimResult};
pub use integrators::{ExplicitEuler, FixedTimestepIntegrator, Integrator, RungeKutta4};
pub use params::{Category, VehicleParameters};

/// Timing information handed to an integrator for one step.
#[derive(Debug, Clone, Copy)]
pub struct SimContext {
    pub dt: f64,
    pub t: f64,
}
