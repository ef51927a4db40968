#[cfg(test)]
use {
    crate::crumbs::{
        breadcrumb,
        breadcrumb_labels,
    },
    pretty_assertions::assert_eq,
    treebar_cache::{
        Env1,
        NodeId,
        TestEnv,
        suite,
    },
};

// Test: breadcrumbs walk loaded ancestors root first
#[test]
fn breadcrumb_of_loaded_node() {
    let env = Env1::get_expected();
    let crumbs = breadcrumb(&env.cache, &env.a1a);
    assert_eq!(crumbs.ids, vec![env.a.clone(), env.a1.clone()]);
    assert!(crumbs.complete);
    assert_eq!(
        breadcrumb_labels(&env.cache, &env.a1a),
        "Authentication / Login",
    );
}

// Test: the walk stops cleanly at the first unloaded ancestor
#[test]
fn breadcrumb_stops_at_unloaded_ancestor() {
    let env = Env1::get_expected();
    let mut cache = env.cache.clone();
    // a flat search match whose parent chain is not cached
    cache.attach_child(suite(40, 30, "Orphaned match", true));

    let crumbs = breadcrumb(&cache, &NodeId::Num(40));
    assert_eq!(crumbs.ids, vec![]);
    assert!(!crumbs.complete);
}

// Test: a root node has an empty, complete breadcrumb
#[test]
fn breadcrumb_of_root() {
    let env = Env1::get_expected();
    let crumbs = breadcrumb(&env.cache, &env.a);
    assert_eq!(crumbs.ids, vec![]);
    assert!(crumbs.complete);
}
