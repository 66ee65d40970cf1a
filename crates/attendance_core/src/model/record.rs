//! Attendance record model.
//!
//! # Responsibility
//! - Define one dated present/absent observation for a subject.
//! - Own the wire shape of persisted records (calendar dates, lowercase status).
//!
//! # Invariants
//! - Records are immutable after creation; there is no edit/delete path.
//! - `id` is unique within the owning subject.
//! - `note` is `None` instead of blank text.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque record identifier, unique within its subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generates a collision-resistant identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the raw identifier text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Attendance outcome for one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn is_present(self) -> bool {
        matches!(self, Self::Present)
    }
}

/// One dated attendance observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: RecordId,
    /// Calendar date only. Loads also accept full ISO-8601 timestamps.
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AttendanceRecord {
    /// Creates a record with a freshly generated id.
    ///
    /// `note` is trimmed; blank notes are dropped.
    pub fn new(date: NaiveDate, status: AttendanceStatus, note: Option<&str>) -> Self {
        Self::with_id(RecordId::generate(), date, status, note)
    }

    /// Creates a record with a caller-provided id.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(
        id: RecordId,
        date: NaiveDate,
        status: AttendanceStatus,
        note: Option<&str>,
    ) -> Self {
        Self {
            id,
            date,
            status,
            note: normalize_note(note),
        }
    }

    pub fn is_present(&self) -> bool {
        self.status.is_present()
    }
}

fn normalize_note(note: Option<&str>) -> Option<String> {
    note.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Serde adapter for calendar dates.
///
/// Writes `YYYY-MM-DD`. Reads `YYYY-MM-DD` or any ISO-8601 timestamp whose
/// first ten characters are a date (`2026-01-06T00:00:00.000Z`); the
/// time-of-day part is discarded.
mod calendar_date {
    use chrono::NaiveDate;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    const DATE_FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid calendar date `{raw}`")))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDate> {
        let trimmed = raw.trim();
        let date_part = match trimmed.find('T') {
            Some(index) => &trimmed[..index],
            None => trimmed,
        };
        NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
    }
}
