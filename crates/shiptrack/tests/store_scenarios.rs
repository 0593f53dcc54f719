use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use shiptrack::{
    Error, FixedClock, Schedule, ShipmentForm, ShipmentStore, TrackingId, ValidationError,
};

fn store_in(dir: &TempDir) -> ShipmentStore {
    let clock = FixedClock(Utc.with_ymd_and_hms(2025, 3, 14, 6, 0, 0).unwrap());
    ShipmentStore::with_clock(dir.path().join("data.txt"), Schedule::default(), clock)
}

fn form(id: &str) -> ShipmentForm {
    ShipmentForm {
        tracking_id: id.to_string(),
        origin: "Delhi".to_string(),
        transit: String::new(),
        destination: "Mumbai".to_string(),
        sender_name: "A".to_string(),
        sender_contact: "1".to_string(),
        receiver_name: "B".to_string(),
        receiver_contact: "2".to_string(),
        cost: "100".to_string(),
    }
}

#[test]
fn insert_without_transit_has_no_transit_leg() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = store_in(&tmp);

    let record = store.insert(&form("ABC123")).expect("insert");

    assert_eq!(record.tracking_id.as_str(), "ABC123");
    assert!(record.transit_location().is_none());
    assert!(record.transit_time().is_none());
    assert_eq!(record.origin_time.to_string(), "2025-03-14 10:00:00 IST");
    assert_eq!(record.destination_time.to_string(), "2025-03-16 15:00:00 IST");
    assert_eq!(store.lookup("abc123").expect("lookup"), &record);
}

#[test]
fn second_insert_of_same_id_is_duplicate() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = store_in(&tmp);

    let first = store.insert(&form("ABC123")).expect("insert");
    let mut again = form("abc123");
    again.receiver_name = "Someone else".to_string();

    let err = store.insert(&again).expect_err("duplicate");
    assert!(matches!(err, Error::DuplicateKey(ref id) if id == &TrackingId::new("ABC123")));
    assert_eq!(store.lookup("ABC123").expect("lookup"), &first);
    assert_eq!(store.len(), 1);
}

#[test]
fn non_numeric_cost_leaves_store_unchanged() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = store_in(&tmp);
    store.insert(&form("KEEP")).expect("insert");

    let mut bad = form("ABC123");
    bad.cost = "abc".to_string();
    let err = store.insert(&bad).expect_err("invalid cost");

    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidCost(_))
    ));
    assert_eq!(store.len(), 1);
    assert!(store.lookup("ABC123").expect_err("absent").is_not_found());
}

#[test]
fn every_required_field_is_enforced() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = store_in(&tmp);

    let blankers: [(&str, fn(&mut ShipmentForm)); 8] = [
        ("tracking_id", |f| f.tracking_id.clear()),
        ("origin", |f| f.origin.clear()),
        ("destination", |f| f.destination.clear()),
        ("sender_name", |f| f.sender_name.clear()),
        ("sender_contact", |f| f.sender_contact.clear()),
        ("receiver_name", |f| f.receiver_name.clear()),
        ("receiver_contact", |f| f.receiver_contact.clear()),
        ("cost", |f| f.cost.clear()),
    ];

    for (field, blank) in blankers {
        let mut f = form("REQ1");
        blank(&mut f);
        let err = store.insert(&f).expect_err(field);
        assert!(
            matches!(err, Error::Validation(ValidationError::MissingField(name)) if name == field),
            "{field}: {err}"
        );
    }
    assert!(store.is_empty());
}

#[test]
fn delete_then_lookup_is_not_found() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = store_in(&tmp);
    store.insert(&form("ABC123")).expect("insert");

    let removed = store.delete("ABC123").expect("delete");
    assert_eq!(removed.tracking_id.as_str(), "ABC123");
    assert!(store.lookup("ABC123").expect_err("gone").is_not_found());
    assert!(store.delete("ABC123").expect_err("gone").is_not_found());
}

#[test]
fn list_all_is_sorted_regardless_of_insert_order() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = store_in(&tmp);
    for id in ["q7", "B2", "a10", "Z1", "a2"] {
        store.insert(&form(id)).expect("insert");
    }

    let ids: Vec<String> = store
        .list_all()
        .map(|(id, _)| id.as_str().to_string())
        .collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert_eq!(ids, vec!["A10", "A2", "B2", "Q7", "Z1"]);
}

#[test]
fn save_and_fresh_load_reproduce_mapping() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = store_in(&tmp);
    store.insert(&form("PLAIN")).expect("insert");
    let mut via = form("VIA");
    via.transit = "Nagpur".to_string();
    via.cost = "12.75".to_string();
    store.insert(&via).expect("insert");
    store.save().expect("save");

    let mut fresh = store_in(&tmp);
    assert_eq!(fresh.load().expect("load"), 2);

    let before: Vec<_> = store.list_all().collect();
    let after: Vec<_> = fresh.list_all().collect();
    assert_eq!(before, after);
    assert!(fresh.lookup("plain").expect("plain").transit.is_none());
    assert!(fresh.lookup("via").expect("via").transit.is_some());
}

#[test]
fn unreadable_file_falls_back_to_empty_store() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("data.txt");
    std::fs::write(&path, "[1, 2, 3]").expect("write");

    let mut store = store_in(&tmp);
    let err = store.load().expect_err("bad document");
    assert!(matches!(err, Error::StorageRead { .. }));
    assert!(store.is_empty());

    store.insert(&form("AFTER")).expect("store still usable");
    assert_eq!(store.len(), 1);
}

#[test]
fn persisted_document_matches_expected_layout() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = store_in(&tmp);
    let mut via = form("abc123");
    via.transit = "Nagpur".to_string();
    store.insert(&via).expect("insert");

    let text = std::fs::read_to_string(tmp.path().join("data.txt")).expect("read");
    let value: serde_json::Value = serde_json::from_str(&text).expect("json");
    let entry = &value["ABC123"];

    assert_eq!(entry["origin"], "Delhi");
    assert_eq!(entry["transit"], "Nagpur");
    assert_eq!(entry["cost"], 100.0);
    assert_eq!(entry["origin_time"], "2025-03-14 10:00:00 IST");
    assert_eq!(entry["transit_time"], "2025-03-14 12:00:00 IST");
    assert_eq!(entry["destination_time"], "2025-03-16 15:00:00 IST");
}
