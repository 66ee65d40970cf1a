//! Dashboard report bundling every analytics output for one snapshot.

use crate::analytics::engine::{
    compliance_alerts, compliance_label, overall_stats, ranked_subjects, OverallStats,
    SubjectStats,
};
use crate::analytics::insight::{insights, Insight};
use crate::config::Thresholds;
use crate::model::subject::Subject;

/// Everything the presentation layer renders for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsReport<'a> {
    pub subject_count: usize,
    pub overall: OverallStats,
    /// Best attendance first.
    pub ranked: Vec<SubjectStats<'a>>,
    /// Input order.
    pub alerts: Vec<String>,
    pub insights: Vec<Insight>,
    pub compliance_label: String,
}

impl<'a> AnalyticsReport<'a> {
    pub fn build(subjects: &'a [Subject], thresholds: Thresholds) -> Self {
        let alerts = compliance_alerts(subjects, thresholds.compliance);
        let compliance_label = compliance_label(alerts.len());
        Self {
            subject_count: subjects.len(),
            overall: overall_stats(subjects),
            ranked: ranked_subjects(subjects, thresholds),
            alerts,
            insights: insights(subjects, thresholds),
            compliance_label,
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.alerts.is_empty()
    }
}
