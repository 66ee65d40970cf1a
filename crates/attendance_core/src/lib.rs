//! Core domain logic for attendance bookkeeping.
//! This crate is the single source of truth for subject/record invariants
//! and attendance analytics.

pub mod analytics;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use analytics::{
    attendance_percentage, compliance_alerts, compliance_label, insights, overall_stats,
    ranked_subjects, tally, AnalyticsReport, AttendanceBand, AttendanceTally, Insight,
    InsightKind, OverallStats, SubjectStats,
};
pub use config::{
    ConfigError, LoggingConfig, Thresholds, TrackerConfig, COMPLIANCE_THRESHOLD,
    DEFAULT_STORAGE_KEY, EXCELLENT_THRESHOLD,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{AttendanceRecord, AttendanceStatus, RecordId};
pub use model::subject::{
    FieldViolation, Subject, SubjectField, SubjectId, SubjectInput, SubjectValidationError,
    ViolationReason,
};
pub use repo::kv_store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};
pub use repo::snapshot::SnapshotError;
pub use service::attendance_store::{AttendanceStore, StoreError, StoreResult};
pub use service::batch::{AttendanceBatch, BatchEntry, BatchError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
