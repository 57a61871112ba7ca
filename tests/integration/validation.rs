//! End-to-end validation with the built-in modules

use arbiter_engine::{EngineConfig, Status};
use arbiter_foundation::ErrorKind;
use arbiter_language::Dialect;

use crate::{doc, findings, validate, validate_with};

const CUSTOMER: &str = r#"{
    "customer": {
        "id": "C-1042",
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "age": 36,
        "tier": "gold",
        "tags": ["math", "engines"],
        "address": {"city": "London", "postcode": null}
    }
}"#;

const RULES: &str = r#"
    def(tiers, {"values": ["bronze", "silver", "gold"]}).

    seq("customer") {
        eval("exists", ["id", "name", "email"]).
        eval("pattern", "id", {"regex": "^C-[0-9]+$"}).
        par(null, {"successesRequired": 3}) {
            eval("type", "age", {"type": "integer"}).
            eval("range", "age", {"min": 18, "max": 130}).
            eval("one-of", "tier", tiers).
            eval("length", "tags", {"min": 1, "max": 5}).
        }
        sel("address") {
            eval("exists", "postcode").
            eval("equals", "city", {"value": "London"}).
        }
    }
"#;

#[test]
fn valid_customer_passes() {
    let report = validate(RULES, &doc(CUSTOMER)).unwrap();
    assert_eq!(report.status, Status::Success);
    // The failed `exists` on the optional postcode is still reported.
    assert_eq!(
        findings(&report),
        vec![("exists", ".customer.address.postcode")]
    );
}

#[test]
fn sequence_stops_at_first_broken_rule() {
    let mut customer = CUSTOMER.replace(r#""C-1042""#, r#""1042""#);
    customer = customer.replace(r#""age": 36"#, r#""age": 9"#);
    let report = validate(RULES, &doc(&customer)).unwrap();
    assert_eq!(report.status, Status::Failed);
    assert_eq!(findings(&report), vec![("pattern", ".customer.id")]);
}

#[test]
fn parallel_block_collects_every_finding() {
    let customer = CUSTOMER
        .replace(r#""age": 36"#, r#""age": 9"#)
        .replace(r#""gold""#, r#""platinum""#);
    let report = validate(RULES, &doc(&customer)).unwrap();
    assert_eq!(report.status, Status::Failed);
    assert_eq!(
        findings(&report),
        vec![("range", ".customer.age"), ("one-of", ".customer.tier")]
    );
    assert_eq!(report.feedback[0].message, "9 is below minimum 18");
}

#[test]
fn selector_fails_when_every_branch_fails() {
    let customer = CUSTOMER.replace(r#""city": "London""#, r#""city": "Paris""#);
    let report = validate(RULES, &doc(&customer)).unwrap();
    assert_eq!(report.status, Status::Failed);
    assert_eq!(
        findings(&report),
        vec![
            ("exists", ".customer.address.postcode"),
            ("equals", ".customer.address.city"),
        ]
    );
}

#[test]
fn array_elements_by_index() {
    let document = doc(r#"{"items": [{"sku": "A1"}, {"sku": ""}, {}]}"#);
    let report = validate(
        r#"par(null, {"successesRequired": 3}) {
            seq("items.0") { eval("length", "sku", {"min": 1}). }
            seq("items.1") { eval("length", "sku", {"min": 1}). }
            seq("items.2") { eval("exists", "sku"). }
        }"#,
        &document,
    )
    .unwrap();
    assert_eq!(report.status, Status::Failed);
    assert_eq!(
        findings(&report),
        vec![("length", ".items.1.sku"), ("exists", ".items.2.sku")]
    );
}

#[test]
fn missing_frames_address_null() {
    let report = validate(
        r#"seq("nowhere.deeper") { eval("type", ".", {"type": "null"}). }"#,
        &doc("{}"),
    )
    .unwrap();
    assert!(report.is_success());
}

#[test]
fn require_aborts_on_null() {
    let err = validate(
        r#"def(limit, null). run(require, limit, "limit must be set")."#,
        &doc("{}"),
    )
    .unwrap_err();
    assert!(
        matches!(err.kind, ErrorKind::CallableFailed { ref message, .. } if message == "limit must be set")
    );
    assert!(
        validate(r#"run(log, "info", "checking"). run(require, 1, "ok")."#, &doc("{}"))
            .unwrap()
            .is_success()
    );
}

#[test]
fn policy_errors_abort() {
    let err = validate(r#"seq("customer") { eval("range", "age", {"min": "x"}). }"#, &doc(CUSTOMER))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidPolicy(_)));
    assert_eq!(err.context.unwrap().stack, vec!["eval range at .customer", "seq at .customer"]);
}

#[test]
fn extended_dialect_end_to_end() {
    let rules = r#"
        def(minimum, "18").
        seq("customer") { eval("range", "age", {"min": #minimum, "max": #maximum}). }
    "#;
    let config = EngineConfig::for_dialect(Dialect::Extended);
    assert!(validate_with(rules, &doc(CUSTOMER), config).unwrap().is_success());

    let err = validate(rules, &doc(CUSTOMER)).unwrap_err();
    assert!(err.is_parse_error());
}

#[test]
fn parse_errors_report_position() {
    let err = validate("seq() {\n  eval(\"exists\" \"id\").\n}", &doc("{}")).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::Syntax { line: 2, column: 17, ref expected, .. } if expected == "','"
    ));
}
