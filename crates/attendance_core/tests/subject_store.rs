use attendance_core::{
    AttendanceBatch, AttendanceRecord, AttendanceStatus, AttendanceStore, MemoryKeyValueStore,
    RecordId, StoreError, SubjectField, SubjectId,
};
use chrono::NaiveDate;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
}

fn empty_store() -> AttendanceStore<MemoryKeyValueStore> {
    AttendanceStore::open(MemoryKeyValueStore::new()).unwrap()
}

fn record(d: u32, status: AttendanceStatus) -> AttendanceRecord {
    AttendanceRecord::new(day(d), status, None)
}

#[test]
fn create_normalizes_code_and_lists_first() {
    let mut store = empty_store();

    let subject = store.create_subject("Mathematics", "math101").unwrap();

    assert_eq!(subject.code, "MATH101");
    assert_eq!(subject.name, "Mathematics");
    assert!(subject.records.is_empty());
    assert_eq!(store.subjects().len(), 1);
    assert_eq!(store.subjects()[0].id, subject.id);
}

#[test]
fn create_keeps_insertion_order_and_unique_ids() {
    let mut store = empty_store();
    let a = store.create_subject("Alpha", "A1").unwrap();
    let b = store.create_subject("Beta", "B1").unwrap();
    let c = store.create_subject("Gamma", "C1").unwrap();

    let ids: Vec<&SubjectId> = store.subjects().iter().map(|s| &s.id).collect();
    assert_eq!(ids, vec![&a.id, &b.id, &c.id]);
    assert_ne!(a.id, b.id);
    assert_ne!(b.id, c.id);
}

#[test]
fn create_with_blank_name_is_rejected_without_mutation() {
    let mut store = empty_store();

    let err = store.create_subject("", "ABC").unwrap_err();

    match err {
        StoreError::Validation(validation) => {
            assert!(validation.has_field(SubjectField::Name));
            assert!(!validation.has_field(SubjectField::Code));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.subjects().is_empty());
    assert_eq!(store.storage().write_count(), 0);
}

#[test]
fn create_with_bad_code_cites_code_field() {
    let mut store = empty_store();

    let err = store.create_subject("History", "HIS 101").unwrap_err();

    assert!(matches!(err, StoreError::Validation(ref v) if v.fields() == vec![SubjectField::Code]));
    assert!(store.subjects().is_empty());
}

#[test]
fn edit_replaces_name_and_code_only() {
    let mut store = empty_store();
    let subject = store.create_subject("Physics", "PHY1").unwrap();
    store
        .append_records(&subject.id, vec![record(1, AttendanceStatus::Present)])
        .unwrap();

    store
        .edit_subject(&subject.id, " Applied Physics ", "aphy1")
        .unwrap();

    let edited = store.subject(&subject.id).unwrap();
    assert_eq!(edited.name, "Applied Physics");
    assert_eq!(edited.code, "APHY1");
    assert_eq!(edited.records.len(), 1);
    assert_eq!(edited.created_at, subject.created_at);
}

#[test]
fn edit_unknown_subject_returns_not_found() {
    let mut store = empty_store();
    let missing = SubjectId::from("missing");

    let err = store.edit_subject(&missing, "Name", "CODE").unwrap_err();

    assert!(matches!(err, StoreError::NotFound(id) if id == missing));
}

#[test]
fn edit_with_invalid_input_leaves_subject_unchanged() {
    let mut store = empty_store();
    let subject = store.create_subject("Physics", "PHY1").unwrap();

    let err = store.edit_subject(&subject.id, "Physics", "phy-1").unwrap_err();

    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.subject(&subject.id).unwrap().code, "PHY1");
}

#[test]
fn delete_removes_subject_and_is_idempotent() {
    let mut store = empty_store();
    let keep = store.create_subject("Keep", "K1").unwrap();
    let doomed = store.create_subject("Drop", "D1").unwrap();
    let writes_before = store.storage().write_count();

    assert!(store.delete_subject(&doomed.id));
    assert!(!store.delete_subject(&doomed.id));
    assert!(!store.delete_subject(&SubjectId::from("never-existed")));

    assert_eq!(store.subjects().len(), 1);
    assert_eq!(store.subjects()[0].id, keep.id);
    assert_eq!(store.storage().write_count(), writes_before + 1);
}

#[test]
fn append_preserves_order_and_allows_duplicate_dates() {
    let mut store = empty_store();
    let subject = store.create_subject("Chemistry", "CHEM1").unwrap();

    store
        .append_records(
            &subject.id,
            vec![
                record(5, AttendanceStatus::Present),
                record(2, AttendanceStatus::Absent),
            ],
        )
        .unwrap();
    store
        .append_records(&subject.id, vec![record(5, AttendanceStatus::Absent)])
        .unwrap();

    let dates: Vec<NaiveDate> = store
        .subject(&subject.id)
        .unwrap()
        .records
        .iter()
        .map(|r| r.date)
        .collect();
    assert_eq!(dates, vec![day(5), day(2), day(5)]);
}

#[test]
fn append_to_unknown_subject_is_rejected_without_mutation() {
    let mut store = empty_store();
    let subject = store.create_subject("Chemistry", "CHEM1").unwrap();
    let writes_before = store.storage().write_count();

    let err = store
        .append_records(
            &SubjectId::from("ghost"),
            vec![record(1, AttendanceStatus::Present)],
        )
        .unwrap_err();

    assert!(matches!(err, StoreError::NotFound(_)));
    assert!(store.subject(&subject.id).unwrap().records.is_empty());
    assert_eq!(store.storage().write_count(), writes_before);
}

#[test]
fn append_rejects_reused_record_ids() {
    let mut store = empty_store();
    let subject = store.create_subject("Art", "ART1").unwrap();
    let first = AttendanceRecord::with_id(
        RecordId::from("r-1"),
        day(1),
        AttendanceStatus::Present,
        None,
    );
    store.append_records(&subject.id, vec![first.clone()]).unwrap();

    let err = store
        .append_records(
            &subject.id,
            vec![record(2, AttendanceStatus::Present), first.clone()],
        )
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::DuplicateRecordId { ref record_id, .. } if record_id.as_str() == "r-1"
    ));

    let twin = AttendanceRecord::with_id(
        RecordId::from("r-2"),
        day(3),
        AttendanceStatus::Absent,
        None,
    );
    let err = store
        .append_records(&subject.id, vec![twin.clone(), twin])
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateRecordId { .. }));

    assert_eq!(store.subject(&subject.id).unwrap().records.len(), 1);
}

#[test]
fn batch_records_append_in_entry_order() {
    let mut store = empty_store();
    let subject = store.create_subject("Music", "MUS1").unwrap();
    let mut batch = AttendanceBatch::new();
    batch.add(day(10), AttendanceStatus::Present).unwrap();
    batch.add(day(11), AttendanceStatus::Present).unwrap();
    batch.add(day(12), AttendanceStatus::Present).unwrap();
    batch.set_status(1, AttendanceStatus::Absent).unwrap();

    store
        .append_records(&subject.id, batch.into_records())
        .unwrap();

    let statuses: Vec<AttendanceStatus> = store
        .subject(&subject.id)
        .unwrap()
        .records
        .iter()
        .map(|r| r.status)
        .collect();
    assert_eq!(
        statuses,
        vec![
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Present
        ]
    );
}

#[test]
fn alerts_follow_every_mutation() {
    let mut store = empty_store();
    let subject = store.create_subject("Economics", "ECO1").unwrap();
    assert_eq!(
        store.alerts(),
        ["Economics attendance is 0.0% (Below 75%)".to_string()]
    );

    store
        .append_records(
            &subject.id,
            vec![
                record(1, AttendanceStatus::Present),
                record(2, AttendanceStatus::Present),
                record(3, AttendanceStatus::Absent),
                record(4, AttendanceStatus::Present),
            ],
        )
        .unwrap();
    assert!(store.alerts().is_empty());

    store.edit_subject(&subject.id, "Macro", "ECO1").unwrap();
    store
        .append_records(&subject.id, vec![record(5, AttendanceStatus::Absent)])
        .unwrap();
    assert_eq!(
        store.alerts(),
        ["Macro attendance is 60.0% (Below 75%)".to_string()]
    );

    store.delete_subject(&subject.id);
    assert!(store.alerts().is_empty());
}
