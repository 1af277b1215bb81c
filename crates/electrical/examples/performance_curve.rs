use electrical::{MotorParameters, performance_sweep};
use simcore::{Category, VehicleParameters};
use std::fs::File;
use std::io::Write;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Reference L6E quadricycle, lighter and on a gentler launch grade
    let params = VehicleParameters::default()
        .with_category(Category::L6e)
        .with_load(600.0)
        .with_grade(10.0);

    let motor = MotorParameters::derive(&params);
    let sweep = performance_sweep(&params, &motor);

    let mut csv = File::create("performance_curve.csv")?;
    writeln!(csv, "speed_kmh,rpm,voltage,power,current,torque,efficiency")?;
    for p in &sweep.points {
        writeln!(
            csv,
            "{},{},{:.3},{:.3},{:.3},{:.3},{:.4}",
            p.speed, p.rpm, p.voltage, p.power, p.current, p.torque, p.efficiency
        )?;
    }

    println!(
        "T1 = {:.2} N·m, T2 = {:.2} N·m @ {:.0} rpm, P_max = {:.0} W",
        motor.base_torque, motor.rated_torque, motor.rated_rpm, sweep.peaks.max_power
    );
    println!("Wrote performance_curve.csv");
    Ok(())
}
