//! Invocation by function name through `PersonLedger::invoke`.

use crate::*;

const NO_ARGS: [&str; 0] = [];

fn payload_json(payload: Vec<u8>) -> serde_json::Value {
    serde_json::from_slice(&payload).unwrap()
}

#[test]
fn test_invoke_full_lifecycle() {
    let ledger = create_ledger();

    let created = ledger
        .invoke("CreatePerson", &["Alice", "30", "passport", "42", "1 Main St"])
        .unwrap();
    assert!(created.is_empty());

    ledger
        .invoke("UpdateDetails", &["42", "31", "2 High St", "true", "false"])
        .unwrap();

    let person = payload_json(ledger.invoke("GetById", &["42"]).unwrap());
    assert_eq!(person["age"], json!(31));
    assert_eq!(person["isEmployed"], json!(true));

    let employed = payload_json(ledger.invoke("GetEmployed", &["true"]).unwrap());
    assert_eq!(employed.as_array().unwrap().len(), 1);
    assert_eq!(employed[0]["idNo"], json!(42));

    let listing = payload_json(ledger.invoke("GetPeople", &NO_ARGS).unwrap());
    assert_eq!(listing[0]["Key"], json!("42"));
    assert_eq!(listing[0]["Record"]["name"], json!("Alice"));

    assert!(ledger.invoke("DeletePerson", &["42"]).unwrap().is_empty());
    assert!(ledger.state().is_empty());
}

#[test]
fn test_invoke_aliases_reach_same_operations() {
    let ledger = create_ledger();

    ledger.invoke("Create", &["Bob", "40", "id_card", "7", "Elm St"]).unwrap();
    ledger.invoke("Update", &["7", "41", "Oak St", "1", "0"]).unwrap();
    assert_eq!(ledger.get_by_id(7).unwrap().address, "Oak St");

    ledger.invoke("DeleteAll", &["7"]).unwrap();
    assert!(ledger.get_by_id(7).unwrap_err().is_not_found());
}

#[test]
fn test_invoke_accepts_owned_arguments() {
    let ledger = create_ledger();
    let args: Vec<String> = ["Carol", "22", "passport", "9", "Pine St"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    ledger.invoke("CreatePerson", &args).unwrap();
    assert_eq!(ledger.get_by_id(9).unwrap().name, "Carol");
}

#[test]
fn test_invoke_rejects_malformed_calls_without_writing() {
    let ledger = create_ledger();

    let bad_age = ledger.invoke("CreatePerson", &["Alice", "thirty", "p", "1", "a"]);
    assert!(bad_age.unwrap_err().is_invalid_input());
    let short = ledger.invoke("CreatePerson", &["Alice", "30"]);
    assert!(short.unwrap_err().is_invalid_input());
    let bad_flag = ledger.invoke("GetEmployed", &["maybe"]);
    assert!(bad_flag.unwrap_err().is_invalid_input());
    let unknown = ledger.invoke("Transfer", &NO_ARGS);
    assert!(unknown.unwrap_err().is_invalid_input());

    assert!(ledger.state().is_empty());
}

#[test]
fn test_invoke_propagates_domain_errors() {
    let ledger = create_ledger();

    assert!(ledger.invoke("GetById", &["1"]).unwrap_err().is_not_found());
    assert!(ledger.invoke("GetPeople", &NO_ARGS).unwrap_err().is_empty_result());
    assert!(ledger.invoke("DeletePerson", &["1"]).unwrap_err().is_not_found());
}
