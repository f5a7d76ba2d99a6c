use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tally_core::{Category, Kind, LedgerError};
use tally_finance::{
    Advice, AdvisorThresholds, CsvFileStore, Ledger, LedgerBackend, LedgerStore, Summary, advise,
    classify,
};
use tempfile::tempdir;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("sample_expenses.csv")
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, d).unwrap()
}

#[test]
fn test_load_sample_ledger() {
    let ledger = LedgerStore::open(sample_path()).load().unwrap();
    assert_eq!(ledger.len(), 12);
    assert_eq!(ledger.total_amount(), 1_719_000);
    assert_eq!(ledger.ant_expense_total(), 44_000);
    assert_eq!(ledger.total_by_category(Category::Vehicle), 231_000);

    let first = &ledger.records()[0];
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
    assert_eq!(first.description, "Monthly rent");
    assert_eq!(first.kind, Kind::Mandatory);
}

#[test]
fn test_sample_labels_match_classifier() {
    let ledger = LedgerStore::open(sample_path()).load().unwrap();
    for r in &ledger {
        let c = classify(&r.description);
        assert_eq!((c.category, c.kind), (r.category, r.kind), "{}", r.description);
    }
}

#[test]
fn test_sample_advice() {
    let ledger = LedgerStore::open(sample_path()).load().unwrap();
    let advice = advise(&ledger, &AdvisorThresholds::default());
    // Ant expenses stay under 50k; the vehicle is over 200k
    assert_eq!(advice, vec![Advice::VehicleCosts { total: 231_000 }]);
}

#[test]
fn test_missing_file_is_empty_ledger() {
    let dir = tempdir().expect("tempdir");
    let store = LedgerStore::open(dir.path().join("nothing-here.csv"));
    let ledger = store.load().expect("load");
    assert!(ledger.is_empty());
    assert_eq!(ledger.total_amount(), 0);
}

#[test]
fn test_ledger_path_under_a_file_is_unreadable() {
    let dir = tempdir().expect("tempdir");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    // Stat fails with "not a directory", which is not the same as missing
    let err = LedgerStore::open(blocker.join("expenses.csv")).load().unwrap_err();
    assert!(matches!(err, LedgerError::StorageUnreadable { .. }));
}

#[test]
fn test_oversized_amount_never_reaches_the_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("expenses.csv");
    let store = LedgerStore::open(&path);

    let ledger = store.record(&Ledger::new(), day(1), "Gift", 1).unwrap();
    let err = store.record(&ledger, day(2), "Gift", i64::MAX).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidRecord(_)));

    let reloaded = store.load().unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.total_amount(), 1);
}

#[test]
fn test_file_round_trip() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("expenses.csv");
    let store = LedgerStore::open(&path);

    let original = LedgerStore::open(sample_path()).load().unwrap();
    store.persist(&original).expect("persist");
    assert!(path.exists());

    let reloaded = store.load().expect("reload");
    assert_eq!(reloaded, original);

    // Persisting what was loaded changes nothing
    store.persist(&reloaded).expect("persist again");
    assert_eq!(store.load().unwrap(), original);
}

#[test]
fn test_record_flow_against_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("expenses.csv");
    let store = LedgerStore::open(&path);

    let ledger = store.load().unwrap();
    let ledger = store.record(&ledger, day(1), "Uber to airport", 15000).unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.total_by_category(Category::Transport), 15000);

    let ledger = store.record(&ledger, day(2), "Coffee", 8000).unwrap();
    let ledger = store.record(&ledger, day(2), "Beer", 20000).unwrap();
    assert_eq!(ledger.total_by_kind_substring("Ant-expense"), 28000);

    let err = store.record(&ledger, day(3), "Refund", -5).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidRecord(_)));
    assert_eq!(ledger.len(), 3);

    let on_disk = store.load().unwrap();
    assert_eq!(on_disk, ledger);

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "Date,Description,Amount,Category,Kind\n\
         2026-07-01,Uber to airport,15000,Transport,Necessary\n\
         2026-07-02,Coffee,8000,Craving,Ant-expense\n\
         2026-07-02,Beer,20000,Craving,Ant-expense\n"
    );
}

#[test]
fn test_corrupt_file_is_reported() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("expenses.csv");
    fs::write(
        &path,
        "Date,Description,Amount,Category,Kind\n2026-07-01,Coffee,lots,Craving,Ant-expense\n",
    )
    .unwrap();

    match LedgerStore::open(&path).load() {
        Err(LedgerError::StorageUnreadable { location, reason }) => {
            assert!(location.ends_with("expenses.csv"));
            assert!(reason.contains("row 2"), "{reason}");
        }
        other => panic!("expected StorageUnreadable, got {other:?}"),
    }
}

#[test]
fn test_unwritable_location_is_reported() {
    let dir = tempdir().expect("tempdir");
    // A regular file where the parent directory should be
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let store = CsvFileStore::new(blocker.join("expenses.csv"));
    let err = store.persist(&Ledger::new()).unwrap_err();
    assert!(matches!(err, LedgerError::StorageUnwritable { .. }));
}

#[test]
fn test_failed_persist_keeps_previous_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("expenses.csv");
    let store = LedgerStore::open(&path);

    let ledger = store.record(&Ledger::new(), day(1), "Groceries", 180000).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    // Occupy the temp file name with a directory so the write cannot start
    fs::create_dir(dir.path().join("expenses.csv.tmp")).unwrap();

    let err = store.record(&ledger, day(2), "Movies", 30000).unwrap_err();
    assert!(matches!(err, LedgerError::StorageUnwritable { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
    assert_eq!(store.load().unwrap(), ledger);
}

#[test]
fn test_summary_totals_are_consistent() {
    let ledger = LedgerStore::open(sample_path()).load().unwrap();
    let summary = Summary::from_ledger(&ledger);
    let per_category: i64 = summary.categories.iter().map(|c| c.total).sum();
    assert_eq!(per_category, summary.total);
    assert_eq!(summary.categories[0].category, Category::Household);
}
