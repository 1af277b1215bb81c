use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use vehicle::{DriveCycle, DriveCycleSample};

use crate::error::AppError;

/// Parses `t,v` rows (seconds, km/h) into a drive cycle.
pub fn parse_cycle<R: Read>(rdr: R) -> Result<DriveCycle, csv::Error> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(rdr);
    let samples = rdr
        .deserialize::<DriveCycleSample>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(samples.into_iter().collect())
}

pub fn read_cycle(path: &Path) -> Result<DriveCycle, AppError> {
    let to_err = |source: csv::Error| AppError::Cycle {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::open(path).map_err(|e| to_err(csv::Error::from(e)))?;
    parse_cycle(file).map_err(to_err)
}
