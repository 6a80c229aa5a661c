use chrono::NaiveDate;
use shared::domain::{PledgeDraft, PledgeId, PledgeRecord, ProfileCategory};
use storage::{FileStore, KeyValueStore, PledgeStore, PLEDGES_KEY};

#[test]
fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut store = PledgeStore::load(FileStore::open(dir.path()).expect("open"));
    assert_eq!(store.len(), 3);

    let record = store
        .append_dated(
            PledgeDraft {
                name: "Dana Lee".into(),
                email: "dana@example.com".into(),
                phone: "5550404".into(),
                region: "Goa".into(),
                profile_category: ProfileCategory::Student,
                commitments: vec!["Recycle".into()],
            },
            NaiveDate::from_ymd_opt(2024, 6, 5).expect("date"),
        )
        .expect("append");
    assert_eq!(record.id, PledgeId(1004));
    drop(store);

    let reopened = PledgeStore::load(FileStore::open(dir.path()).expect("reopen"));
    assert_eq!(reopened.len(), 4);
    assert_eq!(reopened.records()[3], record);

    let raw = reopened
        .kv()
        .get(PLEDGES_KEY)
        .expect("read")
        .expect("present");
    let json: serde_json::Value = serde_json::from_slice(&raw).expect("json");
    assert_eq!(json[3]["id"], "PLEDGE1004");
    assert_eq!(json[3]["state"], "Goa");
    assert_eq!(json[3]["profile"], "Student");
    assert_eq!(json[3]["date"], "2024-06-05");
}

#[test]
fn corrupted_file_is_replaced_by_seed() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("climatePledges.json"), b"\x00garbage").expect("write");

    let store = PledgeStore::load(FileStore::open(dir.path()).expect("open"));
    assert_eq!(store.len(), 3);

    let raw = std::fs::read(dir.path().join("climatePledges.json")).expect("read back");
    let records: Vec<PledgeRecord> = serde_json::from_slice(&raw).expect("seed json");
    assert_eq!(records.len(), 3);
}
