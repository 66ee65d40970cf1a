//! Attendance aggregation over a subject snapshot.
//!
//! # Responsibility
//! - Compute per-subject and overall attendance percentages.
//! - Rank subjects and derive compliance alerts.
//!
//! # Invariants
//! - Every function is pure over its inputs.
//! - Percentages lie in `[0, 100]`; zero records yield `0`.
//! - Overall percentage is weighted by class count, not averaged per subject.
//! - Ranking is a stable descending sort on percentage.

use crate::config::Thresholds;
use crate::model::subject::Subject;

/// Present/absent counts for one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttendanceTally {
    pub present: usize,
    pub absent: usize,
    pub total: usize,
}

impl AttendanceTally {
    /// `100 * present / total`, or `0` when there are no classes.
    pub fn percentage(&self) -> f64 {
        percentage_of(self.present, self.total)
    }
}

/// Aggregate figures across all subjects.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverallStats {
    pub overall_percentage: f64,
    pub total_classes: usize,
    pub present: usize,
    pub absent: usize,
}

/// Qualitative rating of a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceBand {
    /// At or above the excellent threshold.
    Excellent,
    /// At or above the compliance threshold.
    Satisfactory,
    /// Below the compliance threshold.
    AtRisk,
}

impl AttendanceBand {
    pub fn classify(percentage: f64, thresholds: Thresholds) -> Self {
        if percentage >= thresholds.excellent {
            Self::Excellent
        } else if percentage >= thresholds.compliance {
            Self::Satisfactory
        } else {
            Self::AtRisk
        }
    }
}

/// Subject annotated with its attendance figures.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectStats<'a> {
    pub subject: &'a Subject,
    pub percentage: f64,
    pub present: usize,
    pub absent: usize,
    pub band: AttendanceBand,
}

impl SubjectStats<'_> {
    pub fn total(&self) -> usize {
        self.present + self.absent
    }
}

/// Counts present and absent records of one subject.
pub fn tally(subject: &Subject) -> AttendanceTally {
    let present = subject
        .records
        .iter()
        .filter(|record| record.is_present())
        .count();
    let total = subject.records.len();
    AttendanceTally {
        present,
        absent: total - present,
        total,
    }
}

/// Attendance percentage for one subject; `0` when it has no records.
pub fn attendance_percentage(subject: &Subject) -> f64 {
    tally(subject).percentage()
}

/// Weighted attendance across all subjects.
pub fn overall_stats(subjects: &[Subject]) -> OverallStats {
    let (present, total_classes) = subjects
        .iter()
        .map(tally)
        .fold((0, 0), |(present, total), t| {
            (present + t.present, total + t.total)
        });

    OverallStats {
        overall_percentage: percentage_of(present, total_classes),
        total_classes,
        present,
        absent: total_classes - present,
    }
}

/// Subjects with figures, best attendance first.
///
/// Equal percentages keep their input order.
pub fn ranked_subjects(subjects: &[Subject], thresholds: Thresholds) -> Vec<SubjectStats<'_>> {
    let mut ranked: Vec<SubjectStats<'_>> = subjects
        .iter()
        .map(|subject| {
            let t = tally(subject);
            let percentage = t.percentage();
            SubjectStats {
                subject,
                percentage,
                present: t.present,
                absent: t.absent,
                band: AttendanceBand::classify(percentage, thresholds),
            }
        })
        .collect();

    // `sort_by` is stable.
    ranked.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    ranked
}

/// One alert line per subject strictly below `threshold`, in input order.
pub fn compliance_alerts(subjects: &[Subject], threshold: f64) -> Vec<String> {
    subjects
        .iter()
        .filter_map(|subject| {
            let percentage = attendance_percentage(subject);
            (percentage < threshold).then(|| {
                format!(
                    "{} attendance is {}% (Below {}%)",
                    subject.name,
                    format_percentage(percentage),
                    threshold
                )
            })
        })
        .collect()
}

/// Dashboard status text for the number of active alerts.
pub fn compliance_label(alert_count: usize) -> String {
    match alert_count {
        0 => "Good".to_string(),
        1 => "1 Alert".to_string(),
        n => format!("{n} Alerts"),
    }
}

/// Formats a percentage with exactly one decimal place.
///
/// Exact halfway values round up (`6.25` prints as `6.3`). The only binary
/// floats sitting exactly between two tenths end in `.25` or `.75`.
pub fn format_percentage(value: f64) -> String {
    let fraction = value.fract().abs();
    if fraction == 0.25 || fraction == 0.75 {
        return format!("{:.1}", (value * 10.0).round() / 10.0);
    }
    format!("{value:.1}")
}

fn percentage_of(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}
