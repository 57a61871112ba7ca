//! Integration tests for the parser

use arbiter_foundation::ErrorKind;
use arbiter_language::{
    Dialect, Literal, MAX_NESTING, Parser, Statement, Term, parse, parse_term, parse_with,
};

// =============================================================================
// Statements
// =============================================================================

#[test]
fn parses_every_statement_kind() {
    let program = parse(
        r#"
        def(limit, 10).
        run(log, "info", "starting").
        eval("range", ["qty"], {"min": 1}).
        par("orders", {"successesRequired": 2}) {
            seq() { eval("exists", "id"). }
            sel("meta") { eval("exists", "a"). eval("exists", "b"). }
        }
        "#,
    )
    .unwrap();

    let keywords: Vec<_> = program.statements.iter().map(Statement::keyword).collect();
    assert_eq!(keywords, vec!["def", "run", "eval", "par"]);
    assert_eq!(program.depth(), 2);

    let Statement::Par { path, policy, children } = &program.statements[3] else {
        panic!("expected par");
    };
    assert_eq!(path.as_ref(), Some(&Term::string("orders")));
    assert!(policy.is_some());
    assert_eq!(children.len(), 2);
    assert_eq!(children[1].children().len(), 2);
}

#[test]
fn eval_policy_is_optional() {
    let program = parse(r#"eval("exists", "id"). eval(check, "id", null)."#).unwrap();
    let Statement::Eval { module, policy, .. } = &program.statements[0] else {
        panic!("expected eval");
    };
    assert_eq!(module, &Term::string("exists"));
    assert!(policy.is_none());
    let Statement::Eval { module, .. } = &program.statements[1] else {
        panic!("expected eval");
    };
    assert_eq!(module, &Term::variable("check"));
}

#[test]
fn null_paths_are_transparent() {
    let program = parse("par(null, {}) {} seq() {} sel(null) {}").unwrap();
    for statement in &program.statements {
        match statement {
            Statement::Par { path, .. }
            | Statement::Seq { path, .. }
            | Statement::Sel { path, .. } => assert!(path.is_none()),
            other => panic!("unexpected {other:?}"),
        }
    }
}

#[test]
fn empty_program() {
    assert!(parse("").unwrap().is_empty());
    assert!(parse("   \n\t ").unwrap().is_empty());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn unterminated_def_is_missing_token() {
    let err = parse("def(").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingToken { .. }));
    assert!(err.is_parse_error());
}

#[test]
fn numeric_key_is_syntax_error() {
    let err = parse("def(123, 1).").unwrap_err();
    match err.kind {
        ErrorKind::Syntax {
            found,
            lexeme,
            line,
            column,
            ..
        } => {
            assert_eq!(found, "NUMBER:INTEGER");
            assert_eq!(lexeme, "123");
            assert_eq!((line, column), (1, 5));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn first_error_aborts() {
    let err = parse("def(a, 1). def(b 2). def(c, @).").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Syntax { ref lexeme, .. } if lexeme == "2"));
}

#[test]
fn missing_terminal() {
    let err = parse("def(a, 1) def(b, 2).").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Syntax { ref expected, .. } if expected == "'.'"));
}

#[test]
fn unknown_and_error_tokens_fail_parsing() {
    assert!(parse("def(a, @).").is_err());
    assert!(parse(r#"def(a, "open)."#).is_err());
    assert!(parse("def(a, #n).").is_err());
}

#[test]
fn map_keys_must_be_strings() {
    let err = parse("def(a, {k: 1}).").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Syntax { ref found, .. } if found == "IDENTIFIER"));
}

#[test]
fn composites_share_the_argument_list() {
    let program = parse(r#"par("a", {}) {} seq("a", {}) {} sel("a", {}) {}"#).unwrap();
    for statement in &program.statements {
        match statement {
            Statement::Par { path, policy, .. }
            | Statement::Seq { path, policy, .. }
            | Statement::Sel { path, policy, .. } => {
                assert_eq!(path.as_ref(), Some(&Term::string("a")));
                assert_eq!(policy.as_ref(), Some(&Term::Map(vec![])));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
    let err = parse(r#"seq("a", {}, 1) {}"#).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Syntax { ref expected, .. } if expected == "')'"));
}

#[test]
fn run_rejects_literal_targets() {
    for source in ["run(1, 2, 3).", "run(true, 2, 3).", "run({}, 2, 3)."] {
        let err = parse(source).unwrap_err();
        assert!(err.is_parse_error(), "{source}");
    }
    let err = parse("run(1, 2, 3).").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Syntax { ref found, .. } if found == "NUMBER:INTEGER"));
}

#[test]
fn nesting_beyond_the_limit_is_an_error() {
    let depth = 5000;
    let source = format!("def(x, {}{}).", "[".repeat(depth), "]".repeat(depth));
    let err = parse(&source).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DepthExceeded(MAX_NESTING)));

    let source = format!("par() {{{}", "seq() {".repeat(depth));
    let err = parse(&source).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DepthExceeded(MAX_NESTING)));
}

// =============================================================================
// Dialects and terms
// =============================================================================

#[test]
fn extended_dialect_parses_numeric_variables() {
    let program = parse_with("def(a, #n).", Dialect::Extended).unwrap();
    let Statement::Def { key, value } = &program.statements[0] else {
        panic!("expected def");
    };
    assert_eq!(key, "a");
    assert_eq!(
        value,
        &Term::Variable {
            name: "n".to_string(),
            numeric: true
        }
    );
}

#[test]
fn parse_term_needs_all_input() {
    let term = parse_term(r#"[1, 2.5, "a", true, null]"#, Dialect::Standard).unwrap();
    assert_eq!(
        term,
        Term::Array(vec![
            Term::int(1),
            Term::Literal(Literal::Real(2.5)),
            Term::string("a"),
            Term::Literal(Literal::Bool(true)),
            Term::null(),
        ])
    );
    assert!(parse_term("1 2", Dialect::Standard).is_err());
}

#[test]
fn parser_steps_through_statements() {
    let mut parser = Parser::new("def(a, 1). def(b, 2).");
    assert!(matches!(parser.parse_statement().unwrap(), Statement::Def { .. }));
    assert!(!parser.is_at_end());
    parser.parse_statement().unwrap();
    assert!(parser.is_at_end());
}

#[test]
fn display_reparses() {
    let source = r#"
        def(limit, {"min": 1, "tags": ["a", "b"], "x": null}).
        par(null, {"failuresRequired": 2}) {
            seq("order.items") {
                eval("range", "qty", {"min": limit}).
            }
            sel() {
                run(log, "warn", "text with \"quotes\"\n").
            }
        }
    "#;
    let program = parse(source).unwrap();
    let printed = program.to_string();
    assert_eq!(parse(&printed).unwrap(), program);
}
