use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use electrical::PerformanceCurves;
use log::info;
use vehicle::SizingReport;

use crate::error::AppError;

pub fn log_summary(report: &SizingReport) {
    let motor = &report.motor;
    info!("motor:");
    info!("  max power           {:>10.0} W", motor.max_power);
    info!("  continuous power    {:>10.0} W", motor.continuous_power);
    info!("  T1 / T2             {:>10.2} / {:.2} N·m", motor.base_torque, motor.rated_torque);
    info!("  rpm1 / rpm2         {:>10.0} / {:.0} rpm", motor.base_rpm, motor.rated_rpm);

    let battery = &report.battery;
    info!("battery:");
    info!("  max discharge       {:>10.1} A", battery.max_discharge_current);
    match &battery.sizing {
        Some(sizing) => {
            info!("  capacity            {:>10.1} Ah / {:.0} Wh", sizing.capacity_ah_margined, sizing.capacity_wh_margined);
            info!(
                "  cells               {:>10}S{}P ({} cells, {:.1} kg)",
                sizing.cells_in_series,
                sizing.cells_in_parallel,
                sizing.total_cells(),
                sizing.mass
            );
        }
        None => info!("  no drive cycle given, pack not sized"),
    }
    if let Some(cycle) = &report.drive_cycle {
        info!(
            "  drive cycle         {:>10.2} km, {:.1} Wh/km",
            cycle.distance_km, cycle.consumption_wh_per_km
        );
    }

    info!("thermal:");
    info!("  peak charging       {:>10.2} °C", report.thermal.max_charge_temperature);
    info!("  peak discharging    {:>10.2} °C", report.thermal.max_discharge_temperature);

    info!("degradation:");
    info!("  1000 cycles         {:>10.2} %", report.degradation.at_1000);
    info!("  2000 cycles         {:>10.2} %", report.degradation.at_2000);

    info!("acceleration:");
    for checkpoint in &report.acceleration.checkpoints {
        info!("  {:<20}{:>9.2} km/h", checkpoint.label, checkpoint.speed);
    }
    let launch = &report.acceleration.to_top_speed;
    if launch.reached {
        info!("  {:<20}{:>9.2} s", launch.label, launch.time);
    } else {
        info!(
            "  {:<20} not reached, {:.2} km/h after {:.0} s",
            launch.label, launch.speed, launch.time
        );
    }

    for recommendation in &report.recommendations {
        info!("{recommendation}");
    }
}

fn write_error(path: &Path) -> impl FnOnce(Box<dyn std::error::Error + Send + Sync>) -> AppError {
    move |source| AppError::Write {
        path: path.to_path_buf(),
        source,
    }
}

pub fn write_report(path: &Path, report: &SizingReport) -> Result<(), AppError> {
    let write = || -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut out = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut out, report)?;
        out.flush()?;
        Ok(())
    };
    write().map_err(write_error(path))
}

/// One row per sweep point: rpm, power, torque, speed, efficiency in percent.
pub fn write_curves(path: &Path, curves: &PerformanceCurves) -> Result<(), AppError> {
    let write = || -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(["rpm", "power_w", "torque_nm", "speed_kmh", "efficiency_pct"])?;
        for i in 0..curves.rpm.len() {
            wtr.serialize((
                curves.rpm[i],
                curves.power[i],
                curves.torque[i],
                curves.speed[i],
                curves.efficiency_percent[i],
            ))?;
        }
        wtr.flush()?;
        Ok(())
    };
    write().map_err(write_error(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use simcore::VehicleParameters;
    use vehicle::Engine;

    #[test]
    fn test_curves_csv() {
        let report = Engine::new(VehicleParameters::default()).run(None).unwrap();
        let path = std::env::temp_dir().join(format!("lev-sizing-curves-{}.csv", std::process::id()));

        write_curves(&path, &report.performance).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("rpm,power_w,torque_nm,speed_kmh,efficiency_pct"));
        assert_eq!(lines.count(), 46);
    }

    #[test]
    fn test_report_json_round_trips() {
        let report = Engine::new(VehicleParameters::default()).run(None).unwrap();
        let path = std::env::temp_dir().join(format!("lev-sizing-report-{}.json", std::process::id()));

        write_report(&path, &report).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let back: SizingReport = serde_json::from_str(&text).unwrap();
        assert_relative_eq!(back.motor.rated_rpm, report.motor.rated_rpm, max_relative = 1e-12);
        assert_relative_eq!(back.motor.base_torque, report.motor.base_torque, max_relative = 1e-12);
        assert_eq!(back.battery.sizing, None);
        assert_eq!(back.recommendations, report.recommendations);
    }

    #[test]
    fn test_unwritable_path_reported() {
        let report = Engine::new(VehicleParameters::default()).run(None).unwrap();
        let err = write_report(Path::new("/nonexistent/dir/report.json"), &report).unwrap_err();
        assert!(matches!(err, AppError::Write { .. }));
    }
}
