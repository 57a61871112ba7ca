//! Concurrent runs over one registry

use std::thread;

use arbiter_engine::{EngineConfig, Interpreter, Registry, Status, SymbolTable};
use arbiter_language::parse;

use crate::doc;

#[test]
fn runs_keep_their_own_symbols() {
    let registry = Registry::identity(&arbiter_stdlib::catalog());
    let document = doc(r#"{"score": 7}"#);

    let outcomes: Vec<(i64, Status)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8_i64)
            .map(|limit| {
                let registry = &registry;
                let document = document.clone();
                scope.spawn(move || {
                    let source = format!(
                        r#"def(limit, {limit}). eval("range", "score", {{"max": limit}})."#
                    );
                    let program = parse(&source).unwrap();
                    let mut symbols = SymbolTable::new();
                    let report = Interpreter::new(registry, EngineConfig::default())
                        .run(&program, document, &mut symbols)
                        .unwrap();
                    assert_eq!(symbols.get("limit").and_then(|v| v.as_int()), Some(limit));
                    (limit, report.status)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (limit, status) in outcomes {
        let expected = if limit >= 7 { Status::Success } else { Status::Failed };
        assert_eq!(status, expected, "limit {limit}");
    }
}

#[test]
fn document_is_not_modified_by_runs() {
    let registry = Registry::identity(&arbiter_stdlib::catalog());
    let document = doc(r#"{"a": {"b": [1, 2, 3]}}"#);
    let before = document.clone();
    let program = parse(r#"seq("a.b") { eval("length", ".", {"max": 3}). }"#).unwrap();

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let report = Interpreter::new(&registry, EngineConfig::default())
                    .run(&program, document.clone(), &mut SymbolTable::new())
                    .unwrap();
                assert!(report.is_success());
            });
        }
    });
    assert_eq!(document, before);
}
