//! Subject-list snapshot codec.
//!
//! # Responsibility
//! - Encode the full subject list into the persisted JSON string.
//! - Decode persisted snapshots and reject structurally invalid state.
//!
//! # Invariants
//! - Decoded snapshots never contain two subjects with the same id.
//! - Record dates are rehydrated as calendar dates.

use crate::model::subject::{Subject, SubjectId};
use log::warn;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Snapshot could not be encoded or decoded.
#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
    DuplicateSubjectId(SubjectId),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed subject snapshot: {err}"),
            Self::DuplicateSubjectId(id) => {
                write!(f, "subject snapshot contains duplicate id `{id}`")
            }
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::DuplicateSubjectId(_) => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Serializes the full subject list.
pub fn encode_subjects(subjects: &[Subject]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(subjects)?)
}

/// Parses a persisted subject list.
///
/// Duplicate record ids inside one subject are tolerated and only logged,
/// since older builds generated them from coarse timestamps.
pub fn decode_subjects(raw: &str) -> Result<Vec<Subject>, SnapshotError> {
    let subjects: Vec<Subject> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(subjects.len());
    for subject in &subjects {
        if !seen.insert(&subject.id) {
            return Err(SnapshotError::DuplicateSubjectId(subject.id.clone()));
        }

        let mut record_ids = HashSet::with_capacity(subject.records.len());
        let duplicates = subject
            .records
            .iter()
            .filter(|record| !record_ids.insert(&record.id))
            .count();
        if duplicates > 0 {
            warn!(
                "event=snapshot_decode module=repo status=warn subject_id={} duplicate_record_ids={}",
                subject.id, duplicates
            );
        }
    }

    Ok(subjects)
}

#[cfg(test)]
mod tests {
    use super::{decode_subjects, encode_subjects, SnapshotError};
    use crate::model::record::AttendanceStatus;
    use chrono::NaiveDate;

    const LEGACY_SNAPSHOT: &str = r#"[
        {
            "id": "1717000000000",
            "name": "Mathematics",
            "code": "MATH101",
            "records": [
                {"id": "1717000000001", "date": "2024-05-29T00:00:00.000Z", "status": "present"},
                {"id": "1717000000002-0", "date": "2024-05-30T00:00:00.000Z", "status": "absent", "note": "fever"}
            ],
            "createdAt": "2024-05-29T16:26:40.000Z"
        }
    ]"#;

    #[test]
    fn decodes_browser_storage_snapshot() {
        let subjects = decode_subjects(LEGACY_SNAPSHOT).unwrap();
        assert_eq!(subjects.len(), 1);
        let records = &subjects[0].records;
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 5, 29).unwrap());
        assert_eq!(records[1].status, AttendanceStatus::Absent);
        assert_eq!(records[1].note.as_deref(), Some("fever"));
    }

    #[test]
    fn encoded_dates_are_calendar_dates() {
        let subjects = decode_subjects(LEGACY_SNAPSHOT).unwrap();
        let encoded = encode_subjects(&subjects).unwrap();
        let json: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(json[0]["records"][0]["date"], "2024-05-29");
        assert_eq!(json[0]["createdAt"], "2024-05-29T16:26:40Z");
        assert!(json[0]["records"][0].get("note").is_none());
    }

    #[test]
    fn rejects_duplicate_subject_ids() {
        let raw = r#"[
            {"id": "a", "name": "A", "code": "A1", "records": [], "createdAt": "2024-01-01T00:00:00Z"},
            {"id": "a", "name": "B", "code": "B1", "records": [], "createdAt": "2024-01-01T00:00:00Z"}
        ]"#;
        let err = decode_subjects(raw).unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateSubjectId(id) if id.as_str() == "a"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            decode_subjects("{not json").unwrap_err(),
            SnapshotError::Json(_)
        ));
    }
}
