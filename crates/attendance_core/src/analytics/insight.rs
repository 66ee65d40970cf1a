//! Qualitative insights derived from attendance figures.
//!
//! # Invariants
//! - Exactly one overall insight is always emitted first.
//! - Percentages in messages use one decimal place.

use crate::analytics::engine::{format_percentage, overall_stats, ranked_subjects};
use crate::config::Thresholds;
use crate::model::subject::Subject;
use serde::Serialize;

/// Severity/category of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Success,
    Warning,
    Danger,
    Info,
}

/// One titled message for the analytics view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
}

impl Insight {
    fn new(kind: InsightKind, title: &str, message: String) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message,
        }
    }
}

/// Derives insights in display order: overall rating, best subject,
/// subjects below the compliance threshold.
pub fn insights(subjects: &[Subject], thresholds: Thresholds) -> Vec<Insight> {
    let overall = overall_stats(subjects).overall_percentage;
    let ranked = ranked_subjects(subjects, thresholds);
    let mut insights = Vec::with_capacity(3);

    let overall_text = format_percentage(overall);
    insights.push(if overall >= thresholds.excellent {
        Insight::new(
            InsightKind::Success,
            "Excellent Attendance",
            format!("You're doing great with {overall_text}% overall attendance!"),
        )
    } else if overall >= thresholds.compliance {
        Insight::new(
            InsightKind::Warning,
            "Good Attendance",
            format!("You're meeting the minimum requirement with {overall_text}% attendance."),
        )
    } else {
        Insight::new(
            InsightKind::Danger,
            "Attendance Alert",
            format!(
                "Your {overall_text}% attendance is below the {}% requirement.",
                thresholds.compliance
            ),
        )
    });

    let any_records = subjects.iter().any(Subject::has_records);
    if let Some(best) = ranked.first().filter(|_| any_records) {
        insights.push(Insight::new(
            InsightKind::Info,
            "Best Performing Subject",
            format!(
                "{} has your highest attendance at {}%",
                best.subject.name,
                format_percentage(best.percentage)
            ),
        ));
    }

    let below = ranked
        .iter()
        .filter(|stats| stats.percentage < thresholds.compliance)
        .count();
    if below > 0 {
        insights.push(Insight::new(
            InsightKind::Warning,
            "Subjects Needing Attention",
            format!(
                "{below} subject(s) are below {}% attendance threshold.",
                thresholds.compliance
            ),
        ));
    }

    insights
}
