//! CSV and JSON export of a simulation result.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::sim::calendar::{TickTime, month_of_day, week_of_day};
use crate::sim::types::SimulationResult;

const PROFILE_HEADER: [&str; 3] = ["tick_of_day", "time", "power_kw"];
const CHARGE_POINTS_HEADER: [&str; 3] = ["charge_point", "utilization_rate", "average_power_kw"];
const EVENTS_HEADER: [&str; 4] = ["day", "month", "week", "events"];

fn create(path: &Path) -> io::Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Writes the exemplary day, one row per tick-of-day.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_profile_csv(result: &SimulationResult, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(PROFILE_HEADER)?;

    for (s, kw) in result.exemplary_day.iter().enumerate() {
        wtr.write_record(&[
            s.to_string(),
            TickTime::from_tick(s).clock_label(),
            format!("{kw:.4}"),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes utilization and average power, one row per charge point.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_charge_points_csv(result: &SimulationResult, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(CHARGE_POINTS_HEADER)?;

    for (i, (rate, kw)) in result
        .utilization_rates
        .iter()
        .zip(&result.average_powers)
        .enumerate()
    {
        wtr.write_record(&[i.to_string(), format!("{rate:.6}"), format!("{kw:.4}")])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes session counts per day with the day's month and week.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_events_csv(result: &SimulationResult, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(EVENTS_HEADER)?;

    for (day, n) in result.events_per_day.iter().enumerate() {
        wtr.write_record(&[
            day.to_string(),
            month_of_day(day).to_string(),
            week_of_day(day).to_string(),
            n.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the full result as pretty-printed JSON.
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_result_json(result: &SimulationResult, mut writer: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, result)?;
    writeln!(writer)?;
    writer.flush()
}

/// Exports the exemplary day to a CSV file.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_profile_csv(result: &SimulationResult, path: &Path) -> io::Result<()> {
    write_profile_csv(result, create(path)?)
}

/// Exports per-charge-point metrics to a CSV file.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_charge_points_csv(result: &SimulationResult, path: &Path) -> io::Result<()> {
    write_charge_points_csv(result, create(path)?)
}

/// Exports per-day session counts to a CSV file.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_events_csv(result: &SimulationResult, path: &Path) -> io::Result<()> {
    write_events_csv(result, create(path)?)
}

/// Exports the full result to a JSON file.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_result_json(result: &SimulationResult, path: &Path) -> io::Result<()> {
    write_result_json(result, create(path)?)
}
