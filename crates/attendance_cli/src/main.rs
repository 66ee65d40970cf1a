//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `attendance_core` linkage from a standalone binary.
//! - With a database path, print the analytics report stored there.
//!
//! Usage: `attendance_cli [DB_PATH]`

use attendance_core::analytics::format_percentage;
use attendance_core::db::open_db;
use attendance_core::{AttendanceStore, SqliteKeyValueStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("attendance_core version={}", attendance_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match print_report(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_report(db_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(db_path)?;
    let storage = SqliteKeyValueStore::try_new(&conn)?;
    let store = AttendanceStore::open(storage)?;
    let report = store.report();

    println!(
        "overall={}% present={} total={} subjects={} status={}",
        format_percentage(report.overall.overall_percentage),
        report.overall.present,
        report.overall.total_classes,
        report.subject_count,
        report.compliance_label
    );
    for stats in &report.ranked {
        println!(
            "  {:<10} {:>6}%  {}P / {}A  {}",
            stats.subject.code,
            format_percentage(stats.percentage),
            stats.present,
            stats.absent,
            stats.subject.name
        );
    }
    for alert in &report.alerts {
        println!("alert: {alert}");
    }
    for insight in &report.insights {
        println!("{:?}: {} - {}", insight.kind, insight.title, insight.message);
    }
    Ok(())
}
