//! Subject domain model.
//!
//! # Responsibility
//! - Define the tracked course/unit that owns an attendance history.
//! - Normalize and validate user-provided subject name/code input.
//!
//! # Invariants
//! - `id` is stable and never reused for another subject.
//! - `name` is non-empty after trim.
//! - `code` is trimmed, uppercased and matches `^[A-Z0-9]+$`.
//! - `records` keep insertion order, which is entry order and not date order.

use crate::model::record::AttendanceRecord;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static SUBJECT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]+$").expect("valid subject code regex"));

/// Opaque subject identifier, unique across the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    /// Generates a collision-resistant identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the raw identifier text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for SubjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SubjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Tracked subject and its attendance history.
///
/// Field names are serialized in camelCase to keep the persisted snapshot
/// readable by earlier browser-storage builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
    pub created_at: DateTime<Utc>,
}

impl Subject {
    /// Creates a subject from raw input with a generated id and no records.
    ///
    /// # Errors
    /// - Returns every violated field when name or code is invalid.
    pub fn new(name: &str, code: &str) -> Result<Self, SubjectValidationError> {
        let input = SubjectInput::normalize(name, code)?;
        Ok(Self {
            id: SubjectId::generate(),
            name: input.name,
            code: input.code,
            records: Vec::new(),
            created_at: Utc::now(),
        })
    }

    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }
}

/// Normalized, validated subject name/code pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectInput {
    pub name: String,
    pub code: String,
}

impl SubjectInput {
    /// Trims the name, trims + uppercases the code, then validates both.
    ///
    /// # Errors
    /// - `Name/Required` when the trimmed name is empty.
    /// - `Code/Required` when the trimmed code is empty.
    /// - `Code/InvalidCodeFormat` when the code has characters outside `A-Z0-9`.
    pub fn normalize(name: &str, code: &str) -> Result<Self, SubjectValidationError> {
        let name = name.trim().to_string();
        let code = code.trim().to_uppercase();
        let mut violations = Vec::new();

        if name.is_empty() {
            violations.push(FieldViolation::new(
                SubjectField::Name,
                ViolationReason::Required,
            ));
        }

        if code.is_empty() {
            violations.push(FieldViolation::new(
                SubjectField::Code,
                ViolationReason::Required,
            ));
        } else if !SUBJECT_CODE_RE.is_match(&code) {
            violations.push(FieldViolation::new(
                SubjectField::Code,
                ViolationReason::InvalidCodeFormat,
            ));
        }

        if violations.is_empty() {
            Ok(Self { name, code })
        } else {
            Err(SubjectValidationError { violations })
        }
    }
}

/// Subject input field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectField {
    Name,
    Code,
}

impl SubjectField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Code => "code",
        }
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationReason {
    Required,
    InvalidCodeFormat,
}

/// One rejected field with its reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: SubjectField,
    pub reason: ViolationReason,
}

impl FieldViolation {
    fn new(field: SubjectField, reason: ViolationReason) -> Self {
        Self { field, reason }
    }

    /// User-facing message for form display.
    pub fn message(&self) -> &'static str {
        match (self.field, self.reason) {
            (SubjectField::Name, _) => "Subject name is required",
            (SubjectField::Code, ViolationReason::Required) => "Subject code is required",
            (SubjectField::Code, ViolationReason::InvalidCodeFormat) => {
                "Subject code should contain only uppercase letters and numbers"
            }
        }
    }
}

/// Subject input rejected; lists every violated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectValidationError {
    pub violations: Vec<FieldViolation>,
}

impl SubjectValidationError {
    /// Returns whether `field` is among the violations.
    pub fn has_field(&self, field: SubjectField) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    pub fn fields(&self) -> Vec<SubjectField> {
        self.violations.iter().map(|v| v.field).collect()
    }
}

impl Display for SubjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid subject input:")?;
        for violation in &self.violations {
            write!(f, " {}: {};", violation.field.as_str(), violation.message())?;
        }
        Ok(())
    }
}

impl Error for SubjectValidationError {}

#[cfg(test)]
mod tests {
    use super::{Subject, SubjectField, SubjectInput, ViolationReason};

    #[test]
    fn normalize_trims_and_uppercases_code() {
        let input = SubjectInput::normalize("  Physics ", " phy201 ").unwrap();
        assert_eq!(input.name, "Physics");
        assert_eq!(input.code, "PHY201");
    }

    #[test]
    fn normalize_reports_both_fields() {
        let err = SubjectInput::normalize(" ", "").unwrap_err();
        assert_eq!(err.fields(), vec![SubjectField::Name, SubjectField::Code]);
    }

    #[test]
    fn code_with_punctuation_is_rejected() {
        let err = SubjectInput::normalize("Chemistry", "CHEM-101").unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, SubjectField::Code);
        assert_eq!(err.violations[0].reason, ViolationReason::InvalidCodeFormat);
        assert!(err.to_string().contains("only uppercase letters and numbers"));
    }

    #[test]
    fn new_subject_starts_without_records() {
        let subject = Subject::new("Biology", "bio1").unwrap();
        assert!(!subject.has_records());
        assert_eq!(subject.code, "BIO1");
        assert!(!subject.id.as_str().is_empty());
    }
}
