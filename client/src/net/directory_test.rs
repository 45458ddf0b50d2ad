use super::*;

fn fetched(store: &AppStore, ids: &[&str]) -> Vec<Community> {
    ids.iter()
        .filter_map(|id| store.community(id).cloned())
        .map(|c| Community { is_joined: false, ..c })
        .collect()
}

#[test]
fn failed_lookup_keeps_known_membership() {
    let mut store = AppStore::seeded();
    let mut items = fetched(&store, &["1", "2"]);
    merge_page(&mut store, &mut items, &[("2".to_owned(), true)]);

    assert_eq!(store.community("1").map(|c| c.is_joined), Some(true));
    assert_eq!(store.community("2").map(|c| c.is_joined), Some(true));
    assert!(items.iter().all(|c| c.is_joined));
}

#[test]
fn verified_lookup_overrides_store_flag() {
    let mut store = AppStore::seeded();
    let mut items = fetched(&store, &["1"]);
    merge_page(&mut store, &mut items, &[("1".to_owned(), false)]);

    assert_eq!(store.community("1").map(|c| c.is_joined), Some(false));
    assert!(!items[0].is_joined);
}

#[test]
fn new_community_without_lookup_is_not_joined() {
    let mut store = AppStore::new(None);
    let mut items = vec![Community { id: "9".to_owned(), name: "Fresh".to_owned(), ..Community::default() }];
    merge_page(&mut store, &mut items, &[]);

    assert_eq!(store.community("9").map(|c| c.is_joined), Some(false));
    assert!(!items[0].is_joined);
}
