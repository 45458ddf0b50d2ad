use super::*;

#[test]
fn search_href_encodes_query() {
    assert_eq!(search_href(" rust & wasm ").as_deref(), Some("/communities?q=rust%20%26%20wasm"));
}

#[test]
fn blank_search_does_not_navigate() {
    assert_eq!(search_href("   "), None);
}

#[test]
fn dashboard_is_only_active_at_root() {
    assert!(is_active("/", "/"));
    assert!(!is_active("/", "/communities"));
}

#[test]
fn section_stays_active_on_nested_routes() {
    assert!(is_active("/communities", "/communities/42"));
    assert!(!is_active("/communities", "/communities-archive"));
}
