//! Integration tests for term evaluation

use std::collections::HashMap;

use arbiter_foundation::{Error, ErrorKind, Result, Value};
use arbiter_language::{Bindings, Dialect, Term, parse_term};

/// Bindings backed by a plain map; unbound names are errors.
struct MapBindings(HashMap<&'static str, Value>);

impl Bindings for MapBindings {
    fn lookup(&self, name: &str) -> Result<Value> {
        self.0
            .get(name)
            .cloned()
            .ok_or_else(|| Error::undefined_symbol(name))
    }
}

fn none() -> MapBindings {
    MapBindings(HashMap::new())
}

fn eval(source: &str, bindings: &MapBindings) -> Result<Value> {
    parse_term(source, Dialect::Extended)?.evaluate(bindings)
}

#[test]
fn array_literal_keeps_order() {
    let value = eval(r#"[1, 2, "a"]"#, &none()).unwrap();
    assert_eq!(
        value,
        Value::from(vec![Value::Int(1), Value::Int(2), Value::from("a")])
    );
}

#[test]
fn map_literal_keeps_key_order() {
    let Value::Map(map) = eval(r#"{"k": 1, "j": 2}"#, &none()).unwrap() else {
        panic!("expected a map");
    };
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["k", "j"]);
}

#[test]
fn duplicate_map_keys_last_write_wins() {
    let Value::Map(map) = eval(r#"{"k": 1, "j": 2, "k": 3}"#, &none()).unwrap() else {
        panic!("expected a map");
    };
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("k"), Some(&Value::Int(3)));
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["k", "j"]);
}

#[test]
fn variables_read_bindings() {
    let bindings = MapBindings(HashMap::from([("limit", Value::Int(5))]));
    let value = eval(r#"{"max": limit, "list": [limit]}"#, &bindings).unwrap();
    assert_eq!(value.get_path("max"), Some(&Value::Int(5)));
    assert_eq!(value.get_path("list.0"), Some(&Value::Int(5)));
}

#[test]
fn unbound_variable_propagates() {
    let err = eval("[1, missing]", &none()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UndefinedSymbol(ref n) if n == "missing"));
}

#[test]
fn numeric_variables_coerce() {
    let bindings = MapBindings(HashMap::from([
        ("text", Value::from("2.5")),
        ("int", Value::Int(3)),
        ("nothing", Value::Null),
        ("word", Value::from("ten")),
    ]));
    assert_eq!(eval("#text", &bindings).unwrap(), Value::Real(2.5));
    assert_eq!(eval("#int", &bindings).unwrap(), Value::Int(3));
    assert_eq!(eval("#nothing", &bindings).unwrap(), Value::Null);
    let err = eval("#word", &bindings).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn literals_ignore_bindings() {
    let term = Term::string("x");
    assert_eq!(term.evaluate(&none()).unwrap(), Value::from("x"));
    assert!(Term::null().evaluate(&none()).unwrap().is_null());
}
