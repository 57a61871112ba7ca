//! Integration tests for dotted paths

use arbiter_foundation::Path;

#[test]
fn root_is_empty() {
    let root = Path::root();
    assert!(root.is_root());
    assert_eq!(root.as_str(), "");
    assert_eq!(root.to_string(), "");
}

#[test]
fn join_prefixes_a_dot() {
    let order = Path::root().join(Some("order"));
    assert_eq!(order.as_str(), ".order");
    assert_eq!(order.join(Some("items.0")).as_str(), ".order.items.0");
}

#[test]
fn transparent_segments() {
    let order = Path::new(".order");
    for segment in [None, Some(""), Some(".")] {
        assert!(Path::is_transparent(segment));
        assert_eq!(order.join(segment), order);
    }
    assert!(!Path::is_transparent(Some("x")));
}

#[test]
fn segments_skip_empties() {
    let path = Path::new(".order..items.0");
    assert_eq!(path.segments().collect::<Vec<_>>(), vec!["order", "items", "0"]);
    assert!(Path::new("..").is_root());
}
