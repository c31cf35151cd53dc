//! Single-record operations: create, update, get_by_id, delete.

use crate::*;

// =============================================================================
// CREATE
// =============================================================================

#[test]
fn test_create_then_get_returns_record_with_flags_cleared() {
    let ledger = create_ledger();

    ledger.create("Alice", 30, "passport", 42, "1 Main St").unwrap();
    let alice = ledger.get_by_id(42).unwrap();

    assert_eq!(alice.name, "Alice");
    assert_eq!(alice.age, 30);
    assert_eq!(alice.id_type, "passport");
    assert_eq!(alice.id_no, 42);
    assert_eq!(alice.address, "1 Main St");
    assert!(!alice.is_employed);
    assert!(!alice.is_married);
}

#[test]
fn test_create_persists_camel_case_json_at_decimal_key() {
    let ledger = create_ledger();
    ledger.create("Alice", 30, "passport", 42, "1 Main St").unwrap();

    let stored = ledger.state().get("42").unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&stored).unwrap();
    assert_eq!(
        doc,
        json!({
            "name": "Alice",
            "age": 30,
            "idType": "passport",
            "idNo": 42,
            "address": "1 Main St",
            "isEmployed": false,
            "isMarried": false,
        })
    );
}

#[test]
fn test_create_same_id_replaces_previous_record() {
    let ledger = create_ledger();
    seed(&ledger, 1, true, true);

    ledger.create("Replacement", 18, "id_card", 1, "New St").unwrap();

    let person = ledger.get_by_id(1).unwrap();
    assert_eq!(person.name, "Replacement");
    assert!(!person.is_employed);
    assert!(!person.is_married);
    assert_eq!(ledger.state().len(), 1);
}

#[test]
fn test_create_accepts_empty_strings_and_extreme_ids() {
    let ledger = create_ledger();

    ledger.create("", 0, "", i64::MAX, "").unwrap();
    ledger.create("Min", -1, "t", i64::MIN, "a").unwrap();

    assert_eq!(ledger.get_by_id(i64::MAX).unwrap().name, "");
    assert_eq!(ledger.get_by_id(i64::MIN).unwrap().age, -1);
    assert!(ledger.state().get(&i64::MIN.to_string()).is_some());
}

// =============================================================================
// UPDATE
// =============================================================================

#[test]
fn test_update_replaces_mutable_fields_only() {
    let ledger = create_ledger();
    ledger.create("Alice", 30, "passport", 42, "1 Main St").unwrap();

    ledger.update(42, 31, "2 High St", true, true).unwrap();

    let alice = ledger.get_by_id(42).unwrap();
    assert_eq!(alice.age, 31);
    assert_eq!(alice.address, "2 High St");
    assert!(alice.is_employed);
    assert!(alice.is_married);
    assert_eq!(alice.name, "Alice");
    assert_eq!(alice.id_type, "passport");
    assert_eq!(alice.id_no, 42);
}

#[test]
fn test_update_missing_record_is_not_found_and_writes_nothing() {
    let ledger = create_ledger();
    seed(&ledger, 1, false, false);
    let before = snapshot(&ledger);

    let err = ledger.update(99, 50, "nowhere", true, false).unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("99"));
    assert!(err.to_string().contains("UpdateDetails"));
    assert_eq!(snapshot(&ledger), before);
}

// =============================================================================
// GET BY ID
// =============================================================================

#[test]
fn test_get_missing_record_is_not_found() {
    let ledger = create_ledger();

    let err = ledger.get_by_id(7).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("the person 7 does not exist"));
}

#[test]
fn test_get_does_not_write() {
    let ledger = create_ledger();
    seed(&ledger, 1, false, false);
    let before = snapshot(&ledger);

    ledger.get_by_id(1).unwrap();
    let _ = ledger.get_by_id(2);

    assert_eq!(snapshot(&ledger), before);
}

// =============================================================================
// DELETE
// =============================================================================

#[test]
fn test_delete_then_get_is_not_found() {
    let ledger = create_ledger();
    seed(&ledger, 5, true, false);

    ledger.delete(5).unwrap();

    assert!(ledger.get_by_id(5).unwrap_err().is_not_found());
    assert!(ledger.state().is_empty());
}

#[test]
fn test_delete_missing_record_is_not_found() {
    let ledger = create_ledger();
    seed(&ledger, 1, false, false);

    let err = ledger.delete(2).unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("DeletePerson"));
    assert_eq!(ledger.state().keys(), vec!["1".to_string()]);
}

#[test]
fn test_delete_twice_fails_second_time() {
    let ledger = create_ledger();
    seed(&ledger, 3, false, false);

    ledger.delete(3).unwrap();
    assert!(ledger.delete(3).unwrap_err().is_not_found());
}

#[test]
fn test_recreate_after_delete() {
    let ledger = create_ledger();
    seed(&ledger, 3, true, true);
    ledger.delete(3).unwrap();

    ledger.create("Again", 20, "passport", 3, "x").unwrap();

    let person = ledger.get_by_id(3).unwrap();
    assert_eq!(person.name, "Again");
    assert!(!person.is_employed);
}

// =============================================================================
// ID POLICY
// =============================================================================

#[test]
fn test_non_negative_policy_rejects_negative_ids() {
    init_logging();
    let ledger = PersonLedger::builder()
        .id_validation(IdValidation::NonNegative)
        .open();

    assert!(ledger.create("A", 1, "t", -1, "a").unwrap_err().is_invalid_input());
    assert!(ledger.get_by_id(-1).unwrap_err().is_invalid_input());
    assert!(ledger.update(-1, 1, "a", true, false).unwrap_err().is_invalid_input());
    assert!(ledger.delete(-1).unwrap_err().is_invalid_input());
    assert!(ledger.state().is_empty());

    ledger.create("Zero", 1, "t", 0, "a").unwrap();
    assert_eq!(ledger.get_by_id(0).unwrap().name, "Zero");
}

#[test]
fn test_options_from_toml_configure_ledger() {
    init_logging();
    let options = RegistryOptions::from_toml_str(
        r#"
        contract_name = "census"
        id_validation = "non_negative"
        "#,
    )
    .unwrap();
    let ledger = PersonLedger::builder().options(options).open();

    assert_eq!(ledger.registry().options().contract_name, "census");
    assert!(ledger.get_by_id(-5).unwrap_err().is_invalid_input());
}
