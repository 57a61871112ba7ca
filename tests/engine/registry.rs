//! Integration tests for the module registry

use std::sync::Arc;

use arbiter_engine::{
    EngineConfig, Interpreter, ModuleCatalog, Registry, RegistryConfig, Status, SymbolTable,
};
use arbiter_foundation::{ErrorKind, Value};
use arbiter_language::parse;

use crate::scripted;

fn catalog() -> ModuleCatalog {
    let mut catalog = ModuleCatalog::new();
    catalog.register("step", scripted);
    catalog.register("always-fails", |_: Option<&Value>| {
        scripted(Some(&Value::from("FAILED")))
    });
    catalog
}

fn document() -> Value {
    serde_json::from_str(r#"{"a": {"b": {"c": 1}}, "d": 2}"#).unwrap()
}

fn status(registry: &Registry, source: &str) -> arbiter_foundation::Result<Status> {
    let program = parse(source)?;
    Interpreter::new(registry, EngineConfig::default())
        .run(&program, document(), &mut SymbolTable::new())
        .map(|report| report.status)
}

#[test]
fn config_from_json() {
    let config = RegistryConfig::from_json(
        r#"{
            "modules": {"check": "step"},
            "scopes": {"a.b": {"check": "always-fails"}}
        }"#,
    )
    .unwrap();
    assert_eq!(config.modules.get("check").map(String::as_str), Some("step"));
    assert!(config.scopes.contains_key("a.b"));

    let registry = Registry::build(&config, &catalog()).unwrap();
    assert_eq!(registry.root_names().collect::<Vec<_>>(), vec!["check"]);
    assert!(registry.scope(".a.b").is_some());
}

#[test]
fn config_rejects_unknown_fields() {
    let err = RegistryConfig::from_json(r#"{"modles": {}}"#).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidConfig(_)));
    assert!(RegistryConfig::from_json("[").is_err());
}

#[test]
fn build_rejects_unknown_kinds() {
    let config = RegistryConfig::new().with_scoped("a", "x", "missing-kind");
    let err = Registry::build(&config, &catalog()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidConfig(ref m) if m.contains("missing-kind")));
}

#[test]
fn scoped_binding_shadows_root_inside_its_frame() {
    let config = RegistryConfig::new()
        .with_module("check", "step")
        .with_scoped(".a.b", "check", "always-fails");
    let registry = Registry::build(&config, &catalog()).unwrap();

    let source = r#"eval("check", null)."#;
    assert_eq!(status(&registry, source).unwrap(), Status::Success);

    let nested = r#"seq("a") { seq("b") { eval("check", null). } }"#;
    assert_eq!(status(&registry, nested).unwrap(), Status::Failed);

    let direct = r#"seq("a.b") { eval("check", null). }"#;
    assert_eq!(status(&registry, direct).unwrap(), Status::Failed);

    let beside = r#"seq("a") { eval("check", null). }"#;
    assert_eq!(status(&registry, beside).unwrap(), Status::Success);
}

#[test]
fn scoped_bindings_reach_inner_frames() {
    let config = RegistryConfig::new().with_scoped("a", "only-in-a", "step");
    let registry = Registry::build(&config, &catalog()).unwrap();
    let inner = r#"seq("a") { seq("b.c") { eval("only-in-a", null). } }"#;
    assert_eq!(status(&registry, inner).unwrap(), Status::Success);
    let outside = r#"seq("d") { eval("only-in-a", null). }"#;
    assert!(status(&registry, outside).unwrap_err().is_not_found());
}

#[test]
fn stray_dots_do_not_hide_scoped_bindings() {
    let config = RegistryConfig::new().with_scoped("order.", "local", "always-fails");
    let registry = Registry::build(&config, &catalog()).unwrap();
    for path in ["order", ".order", "order.", ".order."] {
        let source = format!(r#"seq("{path}") {{ eval("local", null). }}"#);
        assert_eq!(status(&registry, &source).unwrap(), Status::Failed, "{path}");
    }
}

#[test]
fn programmatic_binding() {
    let catalog = catalog();
    let mut registry = Registry::new();
    let Some(step) = catalog.get("step") else {
        panic!("step is registered");
    };
    registry.bind("ok", Arc::clone(step));
    registry.bind_scoped("d", "ok", Arc::new(|_: Option<&Value>| {
        scripted(Some(&Value::from("ACTIVE")))
    }));
    assert_eq!(status(&registry, r#"eval("ok", null)."#).unwrap(), Status::Success);
    assert_eq!(
        status(&registry, r#"seq("d") { eval("ok", null). }"#).unwrap(),
        Status::Active
    );
}

#[test]
fn identity_binds_every_kind() {
    let registry = Registry::identity(&catalog());
    let mut names: Vec<_> = registry.root_names().collect();
    names.sort_unstable();
    assert_eq!(names, vec!["always-fails", "step"]);
    assert_eq!(
        RegistryConfig::identity(&catalog()).modules.len(),
        catalog().len()
    );
}

#[test]
fn registry_is_shared_read_only() {
    let registry = Registry::identity(&catalog());
    let program = parse(r#"eval("step", null, {"label": "t"})."#).unwrap();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let report = Interpreter::new(&registry, EngineConfig::default())
                    .run(&program, document(), &mut SymbolTable::new())
                    .unwrap();
                assert!(report.is_success());
            });
        }
    });
}
