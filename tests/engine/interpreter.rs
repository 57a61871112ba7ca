//! Integration tests for statement execution

use arbiter_engine::{
    Context, EngineConfig, FeedbackLog, Interpreter, Status, SymbolTable, VariableResolution,
};
use arbiter_foundation::{ErrorKind, NativeFn, Value};
use arbiter_language::{Dialect, parse, parse_with};

use crate::{ran, registry, run};

fn orders() -> Value {
    serde_json::from_str(
        r#"{"orders": [{"id": 1, "lines": [{"qty": 2}]}, {"id": 2, "lines": []}]}"#,
    )
    .unwrap()
}

// =============================================================================
// Composite semantics
// =============================================================================

#[test]
fn seq_stops_after_first_failure() {
    let report = run(
        r#"seq() {
            eval("step", null, {"label": "a"}).
            eval("step", null, {"status": "FAILED", "label": "b"}).
            eval("step", null, {"label": "c"}).
        }"#,
        Value::Null,
    )
    .unwrap();
    assert_eq!(report.status, Status::Failed);
    assert_eq!(ran(&report), vec!["a", "b"]);
}

#[test]
fn seq_passes_active_through() {
    let report = run(
        r#"seq() { eval("step", null, "ACTIVE"). eval("step", null, {"label": "later"}). }"#,
        Value::Null,
    )
    .unwrap();
    assert_eq!(report.status, Status::Active);
    assert_eq!(report.feedback.len(), 1);
}

#[test]
fn sel_stops_at_first_non_failure() {
    let report = run(
        r#"sel() {
            eval("step", null, {"status": "FAILED", "label": "a"}).
            eval("step", null, {"label": "b"}).
            eval("step", null, {"status": "FAILED", "label": "c"}).
        }"#,
        Value::Null,
    )
    .unwrap();
    assert_eq!(report.status, Status::Success);
    assert_eq!(ran(&report), vec!["a", "b"]);

    let active = run(
        r#"sel() { eval("step", null, "FAILED"). eval("step", null, "ACTIVE"). eval("step", null). }"#,
        Value::Null,
    )
    .unwrap();
    assert_eq!(active.status, Status::Active);
    assert_eq!(active.feedback.len(), 2);
}

#[test]
fn par_evaluates_every_child_before_deciding() {
    let report = run(
        r#"par(null, {"successesRequired": 2}) {
            eval("step", null, {"status": "FAILED", "label": "a"}).
            eval("step", null, {"label": "b"}).
            eval("step", null, {"label": "c"}).
        }"#,
        Value::Null,
    )
    .unwrap();
    assert_eq!(report.status, Status::Success);
    assert_eq!(ran(&report), vec!["a", "b", "c"]);
}

#[test]
fn par_thresholds() {
    let cases = [
        (r#"{"successesRequired": 3}"#, Status::Failed),
        (r#"{"successesRequired": 3, "failuresRequired": 2}"#, Status::Active),
        (r#"{"successesRequired": 1, "failuresRequired": 1}"#, Status::Success),
    ];
    for (policy, expected) in cases {
        let source = format!(
            r#"par(null, {policy}) {{ eval("step", null). eval("step", null, "FAILED"). }}"#
        );
        assert_eq!(run(&source, Value::Null).unwrap().status, expected, "{policy}");
    }
}

#[test]
fn par_policy_from_symbol() {
    let report = run(
        r#"def(quorum, {"successesRequired": 2}).
           par(null, quorum) { eval("step", null). eval("step", null, "FAILED"). }"#,
        Value::Null,
    )
    .unwrap();
    assert_eq!(report.status, Status::Failed);
}

#[test]
fn nested_composites_compose() {
    let report = run(
        r#"sel() {
            seq() { eval("step", null, {"label": "a"}). eval("step", null, "FAILED"). }
            seq() { eval("step", null, {"label": "b"}). }
        }"#,
        Value::Null,
    )
    .unwrap();
    assert_eq!(report.status, Status::Success);
    assert_eq!(ran(&report), vec!["a", "", "b"]);
}

// =============================================================================
// Paths and scoping
// =============================================================================

#[test]
fn feedback_carries_absolute_paths() {
    let report = run(
        r#"seq("orders") { seq(0) { seq("lines.0") { eval("step", "qty"). } } }"#,
        orders(),
    )
    .unwrap();
    assert_eq!(report.feedback[0].paths, vec![".orders.0.lines.0".to_string()]);
}

#[test]
fn sibling_frames_do_not_share_paths() {
    let report = run(
        r#"par(null, {"successesRequired": 2}) {
            seq("orders.0") { eval("step", null). }
            seq("orders.1") { eval("step", null). }
        }"#,
        orders(),
    )
    .unwrap();
    let paths: Vec<_> = report.feedback.iter().map(|f| f.paths[0].as_str()).collect();
    assert_eq!(paths, vec![".orders.0", ".orders.1"]);
}

#[test]
fn frame_paths_are_normalized() {
    for path in ["orders", ".orders", "orders.", "..orders"] {
        let source = format!(r#"seq("{path}") {{ seq("0..lines") {{ eval("step", null). }} }}"#);
        let report = run(&source, orders()).unwrap();
        assert_eq!(report.feedback[0].paths, vec![".orders.0.lines".to_string()], "{path}");
    }
}

#[test]
fn seq_and_sel_accept_a_second_argument() {
    let report = run(
        r#"seq("orders", {"note": 1}) { sel(null, null) { eval("step", null, {"label": "a"}). } }"#,
        orders(),
    )
    .unwrap();
    assert!(report.is_success());
    assert_eq!(ran(&report), vec!["a"]);
}

#[test]
fn path_from_symbol() {
    let report = run(r#"def(where, "orders"). seq(where) { eval("step", null). }"#, orders()).unwrap();
    assert_eq!(report.feedback[0].paths, vec![".orders".to_string()]);
}

#[test]
fn non_string_path_is_type_error() {
    let err = run(r#"seq(true) {}"#, orders()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn execute_reuses_a_caller_context() {
    let registry = registry();
    let interpreter = Interpreter::new(&registry, EngineConfig::default());
    let mut ctx: Context = interpreter.context(orders());
    ctx.push(Some("orders.1"));
    let program = parse(r#"eval("step", "lines")."#).unwrap();
    let mut feedback = FeedbackLog::new();
    let status = interpreter
        .execute(
            &program.statements[0],
            &mut ctx,
            &mut SymbolTable::new(),
            &mut feedback,
        )
        .unwrap();
    assert_eq!(status, Status::Success);
    assert_eq!(feedback.iter().next().unwrap().paths, vec![".orders.1"]);
    assert_eq!(ctx.depth(), 2);
}

// =============================================================================
// Symbols and callables
// =============================================================================

#[test]
fn definitions_survive_across_runs() {
    let registry = registry();
    let interpreter = Interpreter::new(&registry, EngineConfig::default());
    let mut symbols = SymbolTable::new();
    let first = parse(r#"def(status, "FAILED")."#).unwrap();
    let second = parse(r#"eval("step", null, status)."#).unwrap();
    interpreter.run(&first, Value::Null, &mut symbols).unwrap();
    let report = interpreter.run(&second, Value::Null, &mut symbols).unwrap();
    assert_eq!(report.status, Status::Failed);
}

#[test]
fn definitions_inside_blocks_are_global() {
    let mut symbols = SymbolTable::new();
    let registry = registry();
    let program = parse(r#"seq("orders") { def(inner, 1). } def(outer, inner)."#).unwrap();
    Interpreter::new(&registry, EngineConfig::default())
        .run(&program, orders(), &mut symbols)
        .unwrap();
    assert_eq!(symbols.get("outer"), Some(&Value::Int(1)));
}

#[test]
fn run_passes_evaluated_arguments() {
    let registry = registry();
    let mut symbols = SymbolTable::new();
    let (tx, rx) = std::sync::mpsc::channel();
    let tx = std::sync::Mutex::new(tx);
    symbols.define_fn(NativeFn::new("emit", move |args| {
        tx.lock().unwrap().send(args.to_vec()).unwrap();
        Ok(Value::Null)
    }));
    let program = parse(r#"def(n, 3). run(emit, n, [n, "x"])."#).unwrap();
    let report = Interpreter::new(&registry, EngineConfig::default())
        .run(&program, Value::Null, &mut symbols)
        .unwrap();
    assert!(report.is_success());
    let args = rx.recv().unwrap();
    assert_eq!(args[0], Value::Int(3));
    assert_eq!(args[1].to_string(), "[3, x]");
}

#[test]
fn lenient_resolution_yields_null() {
    let registry = registry();
    let config = EngineConfig::default().with_variables(VariableResolution::Lenient);
    let program = parse(r#"eval("step", missing, missing)."#).unwrap();
    let report = Interpreter::new(&registry, config)
        .run(&program, Value::Null, &mut SymbolTable::new())
        .unwrap();
    assert!(report.is_success());
}

#[test]
fn extended_dialect_coerces_numeric_variables() {
    let registry = registry();
    let config = EngineConfig::for_dialect(Dialect::Extended);
    let program = parse_with(r#"def(raw, "2.5"). def(n, #raw)."#, config.dialect).unwrap();
    let mut symbols = SymbolTable::new();
    Interpreter::new(&registry, config)
        .run(&program, Value::Null, &mut symbols)
        .unwrap();
    assert_eq!(symbols.get("n"), Some(&Value::Real(2.5)));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn errors_record_the_frame_stack() {
    let err = run(
        r#"seq("orders") { par() { eval("step", null, "BROKEN"). } }"#,
        orders(),
    )
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidPolicy(_)));
    let stack = err.context.unwrap().stack;
    assert_eq!(
        stack,
        vec!["eval step at .orders", "par at .orders", "seq at .orders"]
    );
}

#[test]
fn depth_limit_is_enforced() {
    let registry = registry();
    let config = EngineConfig::default().with_max_depth(3);
    let interpreter = Interpreter::new(&registry, config);
    let deep = parse("seq() { sel() { par() { seq() {} } } }").unwrap();
    let err = interpreter
        .run(&deep, Value::Null, &mut SymbolTable::new())
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DepthExceeded(3)));

    let shallow = parse(r#"seq() { sel() { par() { eval("step", null). } } }"#).unwrap();
    assert!(
        interpreter
            .run(&shallow, Value::Null, &mut SymbolTable::new())
            .unwrap()
            .is_success()
    );
}

#[test]
fn errors_abort_the_run() {
    let err = run(
        r#"eval("step", null, {"label": "first"}). eval("absent"). eval("step", null)."#,
        Value::Null,
    )
    .unwrap_err();
    assert!(err.is_not_found());
}
