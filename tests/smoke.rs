//! End-to-end walk of a navigator session against a scripted backend:
//! load roots, expand, external create, reconcile, search round trip.

use futures::executor::block_on;
use pretty_assertions::assert_eq;
use treebar::{
    FetchMode,
    NodeId,
    ParentKey,
};
use treebar_cache::suite;
use treebar_engine::tests::env::{
    controller,
    demo_rows,
    nid,
    scripted,
};

#[test]
fn navigator_session() {
    let source = scripted(demo_rows());
    let tree = controller(&source, 10);

    block_on(async {
        tree.init_root(None).await.unwrap();
        tree.expand(&nid(1)).await.unwrap();

        // external create of a sibling under the expanded node
        let created = suite(7, 1, "Session", false);
        source.add(created.clone());
        tree.after_create_or_copy(&created).await.unwrap();

        // flat search and back
        tree.set_search("refund").await.unwrap();
        tree.set_search("").await.unwrap();
    });

    tree.with_cache(|cache| {
        assert_eq!(cache.mode(), FetchMode::Lazy);
        assert_eq!(
            cache.children_of(&ParentKey::from(nid(1))),
            vec![NodeId::Num(3), NodeId::Num(4), NodeId::Num(7)],
        );
        assert!(cache.is_open(&nid(1)));
    });

    let rows = tree.snapshot_rows();
    assert_eq!(rows.len(), 5);
}
