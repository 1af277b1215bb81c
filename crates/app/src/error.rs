use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use vehicle::EngineError;

/// A rejected input field and the rule it broke
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Every field that failed validation, reported together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|e| e.field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}: {}", err.field, err.message)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("cannot read parameter file {path:?}")]
    ReadParams {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid parameter file {path:?}")]
    ParseParams {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid drive cycle {path:?}")]
    Cycle {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid vehicle parameters:\n{0}")]
    Invalid(ValidationErrors),

    #[error("cannot write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),
}
