use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

/// Structural problems with simulation inputs.
///
/// Physically implausible values are not errors: they flow through the models and show up
/// as NaN or infinite results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("drive cycle columns differ in length (time: {time}, speed: {speed})")]
    MismatchedCycle { time: usize, speed: usize },

    #[error("drive cycle needs at least two samples to derive a time step, got {len}")]
    CycleTooShort { len: usize },

    #[error("unknown vehicle category {0:?}, expected one of L5E, L6E, L7E")]
    UnknownCategory(String),
}
