use electrical::{
    DegradationCurve, DegradationModel, MotorParameters, PackConfig, PerformanceSweep, ThermalConfig,
    ThermalProfile, performance_sweep,
};
use log::info;
use serde::{Deserialize, Serialize};
use simcore::{SimResult, VehicleParameters};

use crate::acceleration::{AccelerationConfig, AccelerationProfile, simulate_acceleration};
use crate::drive_cycle::{DriveCycle, DriveCycleResult, simulate_drive_cycle};
use crate::error::EngineError;
use crate::report::{RunResults, SizingReport};

/// Model constants of every computation the engine runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub thermal: ThermalConfig,
    pub degradation: DegradationModel,
    pub acceleration: AccelerationConfig,
    pub pack: PackConfig,
}

impl EngineConfig {
    pub fn with_thermal(mut self, thermal: ThermalConfig) -> Self {
        self.thermal = thermal;
        self
    }

    pub fn with_degradation(mut self, degradation: DegradationModel) -> Self {
        self.degradation = degradation;
        self
    }

    pub fn with_acceleration(mut self, acceleration: AccelerationConfig) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_pack(mut self, pack: PackConfig) -> Self {
        self.pack = pack;
        self
    }
}

/// Powertrain sizing engine for one parameter set.
///
/// Every computation is pure over the parameters, so independent engines can run on separate
/// threads without coordination.
#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    params: VehicleParameters,
    config: EngineConfig,
}

impl Engine {
    pub fn new(params: VehicleParameters) -> Self {
        Engine {
            params,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn params(&self) -> &VehicleParameters {
        &self.params
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn motor_parameters(&self) -> MotorParameters {
        MotorParameters::derive(&self.params)
    }

    pub fn performance_sweep(&self) -> PerformanceSweep {
        performance_sweep(&self.params, &self.motor_parameters())
    }

    pub fn thermal(&self) -> ThermalProfile {
        self.config.thermal.simulate()
    }

    pub fn degradation(&self) -> DegradationCurve {
        self.config.degradation.simulate()
    }

    pub fn acceleration(&self) -> AccelerationProfile {
        simulate_acceleration(&self.params, &self.motor_parameters(), &self.config.acceleration)
    }

    /// Simulates the cycle if one is given; a missing or empty cycle is skipped.
    pub fn drive_cycle(&self, cycle: Option<&DriveCycle>) -> SimResult<Option<DriveCycleResult>> {
        match cycle {
            Some(cycle) if !cycle.is_empty() => {
                simulate_drive_cycle(&self.params, cycle, &self.config.pack).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Runs every computation and aggregates the results.
    pub fn run(&self, cycle: Option<&DriveCycle>) -> Result<SizingReport, EngineError> {
        let motor = self.motor_parameters();
        info!(
            "sizing {} vehicle: {} kg, {} km/h, {} km range",
            self.params.category, self.params.load, self.params.top_speed, self.params.desired_range
        );

        let drive_cycle = self.drive_cycle(cycle)?;
        let results = RunResults {
            motor,
            sweep: performance_sweep(&self.params, &motor),
            thermal: self.thermal(),
            degradation: self.degradation(),
            acceleration: simulate_acceleration(&self.params, &motor, &self.config.acceleration),
            drive_cycle,
        };

        Ok(SizingReport::assemble(&self.params, results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cycle_skipped() {
        let engine = Engine::new(VehicleParameters::default());

        assert_eq!(engine.drive_cycle(None), Ok(None));
        assert_eq!(engine.drive_cycle(Some(&DriveCycle::default())), Ok(None));
    }

    #[test]
    fn test_config_reaches_computations() {
        let config = EngineConfig::default().with_degradation(DegradationModel::default().with_max_cycles(100));
        let engine = Engine::new(VehicleParameters::default()).with_config(config);

        assert_eq!(engine.degradation().cycles.len(), 101);
    }
}
