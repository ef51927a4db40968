#[cfg(test)]
use {
    crate::tests::{
        env::{
            controller,
            demo_rows,
            nid,
            scripted,
        },
        init_test_tracing,
    },
    futures::{
        executor::{
            LocalPool,
            block_on,
        },
        task::LocalSpawnExt,
    },
    pretty_assertions::assert_eq,
    treebar_cache::{
        ErrorReason,
        LoadState,
        NodeId,
        ParentKey,
    },
};

#[cfg(test)]
fn ids(nums: &[i64]) -> Vec<NodeId> {
    nums.iter().copied().map(NodeId::Num).collect()
}

// Test: every operation except init_root requires a loaded root
#[test]
fn operations_require_ready() {
    let source = scripted(demo_rows());
    let tree = controller(&source, 10);
    assert!(tree.state().is_uninitialized());
    assert_eq!(
        block_on(tree.expand(&nid(1))),
        Err(ErrorReason::NotReady),
    );
    assert_eq!(tree.close_all(), Err(ErrorReason::NotReady));
}

// Test: init then expand loads exactly the requested pages
#[test]
fn init_and_expand() {
    init_test_tracing();
    let source = scripted(demo_rows());
    let tree = controller(&source, 10);
    block_on(async {
        tree.init_root(None).await.unwrap();
        tree.expand(&nid(1)).await.unwrap();
    });
    assert!(tree.state().is_ready());
    tree.with_cache(|cache| {
        assert_eq!(cache.children_of(&ParentKey::root()), ids(&[1, 2]));
        assert_eq!(
            cache.children_of(&ParentKey::from(nid(1))),
            ids(&[3, 4]),
        );
        assert!(cache.is_open(&nid(1)));
        // only the expanded node was fetched
        assert!(cache.partition().slot(&ParentKey::from(nid(2))).is_none());
    });
    assert_eq!(source.fetch_count(), 2);
}

// Test: expand + repeated load_more composes pages in server order
#[test]
fn load_more_appends_pages() {
    let source = scripted(demo_rows());
    let tree = controller(&source, 2);
    block_on(async {
        tree.init_root(None).await.unwrap();
        tree.expand(&nid(2)).await.unwrap();
        tree.load_more(ParentKey::from(nid(2))).await.unwrap();
    });
    tree.with_cache(|cache| {
        let slot =
            cache.partition().slot(&ParentKey::from(nid(2))).unwrap();
        assert_eq!(slot.ids(), &ids(&[10, 20, 21, 22])[..]);
        assert!(!slot.page.has_more);
    });
    // load_more with no further page is a no-op
    let before = source.fetch_count();
    block_on(tree.load_more(ParentKey::from(nid(2)))).unwrap();
    assert_eq!(source.fetch_count(), before);
}

// Test: expanding a leaf never fetches
#[test]
fn expand_leaf_is_noop() {
    let source = scripted(demo_rows());
    let tree = controller(&source, 10);
    block_on(async {
        tree.init_root(None).await.unwrap();
        tree.expand(&nid(1)).await.unwrap();
        let before = source.fetch_count();
        tree.expand(&nid(4)).await.unwrap();
        assert_eq!(source.fetch_count(), before);
    });
    tree.with_cache(|cache| assert!(!cache.is_open(&nid(4))));
}

// Test: a second expand while the first is in flight is a no-op, not a
// queued duplicate
#[test]
fn expand_while_loading_is_noop() {
    let source = scripted(demo_rows());
    let tree = controller(&source, 10);
    block_on(tree.init_root(None)).unwrap();

    let release = source.gate();
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    for _ in 0..2 {
        let tree = tree.clone();
        spawner
            .spawn_local(async move {
                tree.expand(&nid(3)).await.unwrap();
            })
            .unwrap();
    }
    pool.run_until_stalled();
    release.send(()).unwrap();
    pool.run();

    let parent_calls = source
        .calls()
        .iter()
        .filter(|params| params.parent == Some(nid(3)))
        .count();
    assert_eq!(parent_calls, 1);
}

// Test: a failed fetch flags the slot, keeps prior children, and a retry
// expand re-issues the request
#[test]
fn failed_expand_supports_retry() {
    let source = scripted(demo_rows());
    let tree = controller(&source, 10);
    block_on(tree.init_root(None)).unwrap();

    source.fail_next_fetch(ErrorReason::Fetch("502".into()));
    assert_eq!(
        block_on(tree.expand(&nid(3))),
        Err(ErrorReason::Fetch("502".into())),
    );
    assert!(tree.state().is_ready());
    tree.with_cache(|cache| {
        assert_eq!(
            cache.slot_load(&ParentKey::from(nid(3))),
            LoadState::Error,
        );
    });

    block_on(tree.expand(&nid(3))).unwrap();
    tree.with_cache(|cache| {
        assert_eq!(
            cache.children_of(&ParentKey::from(nid(3))),
            ids(&[5, 6]),
        );
        assert_eq!(
            cache.slot_load(&ParentKey::from(nid(3))),
            LoadState::Loaded,
        );
    });
}

// Test: collapse keeps children cached; reopening does not refetch
#[test]
fn collapse_and_reopen_without_refetch() {
    let source = scripted(demo_rows());
    let tree = controller(&source, 10);
    block_on(async {
        tree.init_root(None).await.unwrap();
        tree.expand(&nid(1)).await.unwrap();
        let before = source.fetch_count();
        tree.collapse(&nid(1)).unwrap();
        tree.expand(&nid(1)).await.unwrap();
        assert_eq!(source.fetch_count(), before);
    });
    tree.with_cache(|cache| assert!(cache.is_open(&nid(1))));
}

// Test: re-rooting isolation across close_all
#[test]
fn reroot_after_close_all_leaves_nothing_open() {
    let source = scripted(demo_rows());
    let tree = controller(&source, 10);
    block_on(async {
        tree.init_root(Some(nid(2))).await.unwrap();
        tree.expand(&nid(10)).await.unwrap();
        tree.expand(&nid(11)).await.unwrap();
        tree.close_all().unwrap();
        tree.init_root(Some(nid(1))).await.unwrap();
    });
    tree.with_cache(|cache| {
        assert!(cache.partition().open_set().is_empty());
        // the old subtree stays cached, just not open
        assert!(
            cache
                .partition()
                .slot(&ParentKey::from(nid(10)))
                .unwrap()
                .is_fetched()
        );
        assert_eq!(cache.root(), &ParentKey::from(nid(1)));
    });
}
