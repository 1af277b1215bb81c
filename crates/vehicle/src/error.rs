use simcore::SimError;
use thiserror::Error;

/// Failure of an aggregate sizing run. No partial report is returned alongside it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("simulation failed")]
    SimulationFailed(#[source] SimError),
}

impl From<SimError> for EngineError {
    fn from(err: SimError) -> Self {
        EngineError::SimulationFailed(err)
    }
}
