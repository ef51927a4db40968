#[cfg(test)]
use {
    crate::{
        store::TreeStore,
        tests::env::{
            demo_rows,
            nid,
            scripted,
        },
    },
    futures::executor::block_on,
    pretty_assertions::assert_eq,
    std::sync::Arc,
    treebar_cache::{
        CacheKey,
        Suite,
    },
};

// Test: the same key reuses the hot cache across route-level remounts
#[test]
fn attach_reuses_hot_cache() {
    let mut store: TreeStore<Suite> = TreeStore::new();
    let key = CacheKey::compose("project-7", "suite", "suites");
    let first = store.attach(key.clone());
    let second = store.attach(key.clone());
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(store.hot_key(), Some(&key));
}

// Test: switching keys discards the old cache wholesale
#[test]
fn attach_discards_on_key_switch() {
    let source = scripted(demo_rows());
    let mut store: TreeStore<Suite> = TreeStore::new();
    let suites = store.attach(CacheKey::compose("project-7", "suite", "suites"));
    {
        let tree = crate::controller::TreeController::new(
            suites.clone(),
            source.clone(),
            source.clone(),
            Default::default(),
        );
        block_on(async {
            tree.init_root(None).await.unwrap();
            tree.expand(&nid(1)).await.unwrap();
        });
    }
    assert!(suites.read().unwrap().node_count() > 0);

    let plans = store.attach(CacheKey::compose("project-7", "plan", "plans"));
    assert!(!Arc::ptr_eq(&suites, &plans));
    assert_eq!(plans.read().unwrap().node_count(), 0);

    // coming back to the first key starts cold again
    let suites_again =
        store.attach(CacheKey::compose("project-7", "suite", "suites"));
    assert_eq!(suites_again.read().unwrap().node_count(), 0);
}

#[test]
fn teardown_drops_the_hot_cache() {
    let mut store: TreeStore<Suite> = TreeStore::new();
    store.attach(CacheKey::compose("project-7", "suite", "suites"));
    store.teardown();
    assert_eq!(store.hot_key(), None);
}
