//! Batch attendance entry.
//!
//! # Responsibility
//! - Collect several dated entries before one `append_records` call.
//! - Reject a date that is already part of the same batch.
//!
//! # Invariants
//! - Entry order is preserved into the produced records.
//! - Dates already recorded by earlier batches are not checked here.

use crate::model::record::{AttendanceRecord, AttendanceStatus};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    DuplicateDate(NaiveDate),
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for BatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateDate(date) => write!(f, "date {date} is already in this batch"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "batch index {index} out of range (len {len})")
            }
        }
    }
}

impl Error for BatchError {}

/// One pending dated entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchEntry {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Pending entries for one subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceBatch {
    entries: Vec<BatchEntry>,
}

impl AttendanceBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a date with the given status.
    pub fn add(&mut self, date: NaiveDate, status: AttendanceStatus) -> Result<(), BatchError> {
        if self.contains_date(date) {
            return Err(BatchError::DuplicateDate(date));
        }
        self.entries.push(BatchEntry { date, status });
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<BatchEntry, BatchError> {
        self.check_index(index)?;
        Ok(self.entries.remove(index))
    }

    pub fn set_status(&mut self, index: usize, status: AttendanceStatus) -> Result<(), BatchError> {
        self.check_index(index)?;
        self.entries[index].status = status;
        Ok(())
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.entries.iter().any(|entry| entry.date == date)
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts entries into records with fresh ids and no notes.
    pub fn into_records(self) -> Vec<AttendanceRecord> {
        self.entries
            .into_iter()
            .map(|entry| AttendanceRecord::new(entry.date, entry.status, None))
            .collect()
    }

    fn check_index(&self, index: usize) -> Result<(), BatchError> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(BatchError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
        }
    }
}
