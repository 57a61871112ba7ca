//! Integration tests for errors

use arbiter_foundation::{Error, ErrorContext, ErrorKind};

#[test]
fn messages_name_the_problem() {
    assert_eq!(
        Error::module_not_found("range").to_string(),
        "module not found: range"
    );
    assert!(Error::undefined_symbol("limit").to_string().contains("limit"));
    assert!(
        Error::type_mismatch("number", "string")
            .to_string()
            .contains("expected number")
    );
}

#[test]
fn syntax_error_carries_token() {
    let err = Error::new(ErrorKind::Syntax {
        found: "NUMBER:INTEGER".to_string(),
        lexeme: "123".to_string(),
        line: 1,
        column: 5,
        expected: "variable name".to_string(),
    });
    assert!(err.is_parse_error());
    let text = err.to_string();
    assert!(text.contains("NUMBER:INTEGER"));
    assert!(text.contains("123"));
}

#[test]
fn frames_accumulate_innermost_first() {
    let err = Error::module_not_found("m")
        .in_frame("eval m")
        .in_frame("seq at .order")
        .in_frame("par");
    let context = err.context.unwrap();
    assert_eq!(context.stack, vec!["eval m", "seq at .order", "par"]);
}

#[test]
fn context_display() {
    let context = ErrorContext::new()
        .with_source("orders.rules")
        .with_position(3, 9)
        .with_frame("seq");
    assert_eq!(context.to_string(), "at orders.rules:3:9\n  in seq\n");
}

#[test]
fn lookup_failures_are_not_found() {
    assert!(Error::module_not_found("m").is_not_found());
    assert!(Error::undefined_symbol("x").is_not_found());
    assert!(!Error::invalid_policy("bad").is_not_found());
}
