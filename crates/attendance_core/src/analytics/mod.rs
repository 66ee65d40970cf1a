//! Pure attendance analytics.
//!
//! # Responsibility
//! - Turn a subject snapshot into percentages, rankings, alerts and insights.
//! - Never mutate or persist; callers pass the snapshot they render.

pub mod engine;
pub mod insight;
pub mod report;

pub use engine::{
    attendance_percentage, compliance_alerts, compliance_label, format_percentage, overall_stats,
    ranked_subjects, tally, AttendanceBand, AttendanceTally, OverallStats, SubjectStats,
};
pub use insight::{insights, Insight, InsightKind};
pub use report::AnalyticsReport;
