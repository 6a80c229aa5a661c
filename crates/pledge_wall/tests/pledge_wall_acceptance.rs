use chrono::NaiveDate;
use pledge_wall::{aggregate, certificate, filter, paginate, WallState};
use shared::domain::{PledgeDraft, ProfileCategory, Selection};
use storage::{MemoryStore, PledgeStore};

fn recycle_draft() -> PledgeDraft {
    PledgeDraft {
        name: "Dana Lee".into(),
        email: "dana@example.com".into(),
        phone: "5550404".into(),
        region: "Goa".into(),
        profile_category: ProfileCategory::Student,
        commitments: vec!["Recycle".into()],
    }
}

#[test]
fn submitting_a_student_pledge_updates_wall_and_counters() {
    let mut store = PledgeStore::load(MemoryStore::new());
    let before = aggregate(store.records());
    assert_eq!(before.total, 3);
    assert_eq!(before.student_count, 1);
    assert_eq!(before.professional_count, 1);

    let record = store
        .append_dated(recycle_draft(), NaiveDate::from_ymd_opt(2024, 6, 5).expect("date"))
        .expect("append");

    assert_eq!(record.id.to_string(), "PLEDGE1004");
    assert_eq!(certificate(&record).rating, 1);

    let after = aggregate(store.records());
    assert_eq!(after.total, 4);
    assert_eq!(after.student_count, before.student_count + 1);
    assert_eq!(after.professional_count, before.professional_count);

    let wall = WallState::default().view(store.records());
    assert_eq!(wall.records.last().map(|r| r.id), Some(record.id));
}

#[test]
fn unfiltered_wall_returns_seed_in_order() {
    let store = PledgeStore::load(MemoryStore::new());
    let all = filter(store.records(), &Selection::All, &Selection::All);
    let expected: Vec<_> = store.records().iter().collect();
    assert_eq!(all, expected);
}

#[test]
fn far_page_on_seed_is_empty_with_one_page() {
    let store = PledgeStore::load(MemoryStore::new());
    let all = filter(store.records(), &Selection::All, &Selection::All);
    let page = paginate(&all, 99, 10);
    assert!(page.records.is_empty());
    assert_eq!(page.total_pages, 1);
}

#[test]
fn rejected_submission_leaves_counters_alone() {
    let mut store = PledgeStore::load(MemoryStore::new());
    let mut draft = recycle_draft();
    draft.commitments.clear();

    assert!(store.append(draft).is_err());
    assert_eq!(aggregate(store.records()).total, 3);
}
