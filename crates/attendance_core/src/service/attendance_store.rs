//! Attendance store use-case service.
//!
//! # Responsibility
//! - Own the subject collection and expose create/edit/delete/append.
//! - Persist the full snapshot after every mutation.
//! - Keep compliance alerts in sync with the in-memory snapshot.
//!
//! # Invariants
//! - Validation and lookups complete before the collection is touched.
//! - Subject insertion order is display order.
//! - Persistence is fire-and-forget: a failed write is logged, never rolled
//!   back, and never changes the in-memory snapshot.
//! - `delete_subject` on an unknown id is a no-op.

use crate::analytics::{compliance_alerts, AnalyticsReport};
use crate::config::{ConfigError, Thresholds, TrackerConfig};
use crate::model::record::{AttendanceRecord, RecordId};
use crate::model::subject::{Subject, SubjectId, SubjectInput, SubjectValidationError};
use crate::repo::kv_store::{KeyValueStore, StorageError};
use crate::repo::snapshot::{decode_subjects, encode_subjects, SnapshotError};
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from attendance store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Subject name/code input rejected.
    Validation(SubjectValidationError),
    /// Referenced subject does not exist.
    NotFound(SubjectId),
    /// Appended record id already used in the target subject or batch.
    DuplicateRecordId {
        subject_id: SubjectId,
        record_id: RecordId,
    },
    /// Store configuration rejected.
    Config(ConfigError),
    /// Key-value backend failure.
    Storage(StorageError),
    /// Persisted snapshot cannot be decoded or encoded.
    Snapshot(SnapshotError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "subject not found: {id}"),
            Self::DuplicateRecordId {
                subject_id,
                record_id,
            } => write!(
                f,
                "record id `{record_id}` already used in subject {subject_id}"
            ),
            Self::Config(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Snapshot(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Snapshot(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateRecordId { .. } => None,
        }
    }
}

impl From<SubjectValidationError> for StoreError {
    fn from(value: SubjectValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ConfigError> for StoreError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<SnapshotError> for StoreError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

/// Subject collection backed by a key-value collaborator.
pub struct AttendanceStore<S: KeyValueStore> {
    storage: S,
    config: TrackerConfig,
    subjects: Vec<Subject>,
    alerts: Vec<String>,
}

impl<S: KeyValueStore> AttendanceStore<S> {
    /// Loads the store with default configuration.
    pub fn open(storage: S) -> StoreResult<Self> {
        Self::open_with_config(storage, TrackerConfig::default())
    }

    /// Loads the snapshot stored under `config.storage_key`.
    ///
    /// # Errors
    /// - `Config` when `config` fails validation.
    /// - `Storage` when the backend read fails.
    /// - `Snapshot` when persisted data is malformed or has duplicate subject ids.
    pub fn open_with_config(storage: S, config: TrackerConfig) -> StoreResult<Self> {
        config.validate()?;

        let subjects = match storage.get(&config.storage_key)? {
            Some(raw) => decode_subjects(&raw).map_err(|err| {
                error!("event=store_load module=store status=error error={err}");
                err
            })?,
            None => Vec::new(),
        };
        let alerts = compliance_alerts(&subjects, config.thresholds.compliance);

        info!(
            "event=store_load module=store status=ok subjects={} alerts={}",
            subjects.len(),
            alerts.len()
        );

        Ok(Self {
            storage,
            config,
            subjects,
            alerts,
        })
    }

    /// Creates a subject from raw name/code input and appends it.
    ///
    /// # Contract
    /// - Name is trimmed; code is trimmed and uppercased.
    /// - Returns the stored subject, which has no records.
    pub fn create_subject(&mut self, name: &str, code: &str) -> StoreResult<Subject> {
        let subject = Subject::new(name, code).map_err(|err| {
            warn!(
                "event=subject_create module=store status=rejected fields={:?}",
                err.fields()
            );
            err
        })?;

        self.subjects.push(subject.clone());
        info!(
            "event=subject_create module=store status=ok subject_id={}",
            subject.id
        );
        self.after_mutation();
        Ok(subject)
    }

    /// Replaces name and code of an existing subject.
    ///
    /// Records, id and creation time are untouched.
    pub fn edit_subject(&mut self, id: &SubjectId, name: &str, code: &str) -> StoreResult<()> {
        let index = self.position(id)?;
        let input = SubjectInput::normalize(name, code)?;

        let subject = &mut self.subjects[index];
        subject.name = input.name;
        subject.code = input.code;
        info!("event=subject_edit module=store status=ok subject_id={id}");
        self.after_mutation();
        Ok(())
    }

    /// Removes a subject with all its records.
    ///
    /// Returns `false` and persists nothing when `id` is unknown.
    pub fn delete_subject(&mut self, id: &SubjectId) -> bool {
        let Ok(index) = self.position(id) else {
            info!("event=subject_delete module=store status=noop subject_id={id}");
            return false;
        };

        let removed = self.subjects.remove(index);
        info!(
            "event=subject_delete module=store status=ok subject_id={} records={}",
            id,
            removed.records.len()
        );
        self.after_mutation();
        true
    }

    /// Appends records to a subject, preserving the given order.
    ///
    /// # Errors
    /// - `NotFound` when the subject does not exist.
    /// - `DuplicateRecordId` when a record id is already used in the subject
    ///   or repeated within `records`.
    pub fn append_records(
        &mut self,
        subject_id: &SubjectId,
        records: Vec<AttendanceRecord>,
    ) -> StoreResult<()> {
        let index = self.position(subject_id)?;
        if records.is_empty() {
            return Ok(());
        }

        let subject = &mut self.subjects[index];
        let duplicate = {
            let mut known: HashSet<&RecordId> = subject.records.iter().map(|r| &r.id).collect();
            records
                .iter()
                .find(|record| !known.insert(&record.id))
                .map(|record| record.id.clone())
        };
        if let Some(record_id) = duplicate {
            return Err(StoreError::DuplicateRecordId {
                subject_id: subject_id.clone(),
                record_id,
            });
        }

        let appended = records.len();
        subject.records.extend(records);
        info!(
            "event=records_append module=store status=ok subject_id={} appended={} total={}",
            subject_id,
            appended,
            subject.records.len()
        );
        self.after_mutation();
        Ok(())
    }

    /// Subjects in display order.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject(&self, id: &SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|subject| &subject.id == id)
    }

    /// Compliance alerts for the current snapshot.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn thresholds(&self) -> Thresholds {
        self.config.thresholds
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Full analytics for the current snapshot.
    pub fn report(&self) -> AnalyticsReport<'_> {
        AnalyticsReport::build(&self.subjects, self.config.thresholds)
    }

    /// Writes the snapshot and reports failures to the caller.
    pub fn flush(&mut self) -> StoreResult<()> {
        let encoded = encode_subjects(&self.subjects)?;
        self.storage.set(&self.config.storage_key, &encoded)?;
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn position(&self, id: &SubjectId) -> StoreResult<usize> {
        self.subjects
            .iter()
            .position(|subject| &subject.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn after_mutation(&mut self) {
        if let Err(err) = self.flush() {
            error!(
                "event=store_persist module=store status=error subjects={} error={}",
                self.subjects.len(),
                err
            );
        }
        self.alerts = compliance_alerts(&self.subjects, self.config.thresholds.compliance);
    }
}
