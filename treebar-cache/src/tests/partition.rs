use pretty_assertions::assert_eq;

use crate::{
    cache::partition::{
        FetchMode,
        ParentKey,
    },
    node::page::PageInfo,
    tests::{
        commit_children,
        env::{
            Env1,
            TestEnv,
            suite,
        },
    },
};

// Test: collapse only mutates the open flag; loaded children survive and
// reopening needs no refetch
#[test]
fn collapse_keeps_children() {
    let env = Env1::get_expected();
    let mut cache = env.cache.clone();

    cache.close(&env.a);
    assert!(!cache.is_open(&env.a));
    let slot = cache.partition().slot(&ParentKey::from(env.a.clone()));
    assert!(slot.unwrap().is_fetched());

    cache.open(&env.a);
    assert!(cache.is_open(&env.a));
}

// Test: close_all collapses every open node without discarding data
#[test]
fn close_all_keeps_slots() {
    let env = Env1::get_expected();
    let mut cache = env.cache.clone();

    cache.close_all();
    assert!(cache.partition().open_set().is_empty());
    assert!(
        cache
            .partition()
            .slot(&ParentKey::from(env.a1.clone()))
            .unwrap()
            .is_fetched()
    );
}

// Test: setting search text to "foo" and back to "" restores the exact
// pre-search lazy state with no search residue
#[test]
fn search_round_trip_restores_lazy_partition() {
    let env = Env1::get_expected();
    let mut cache = env.cache.clone();
    let lazy_before = cache.partition().clone();

    cache.enter_search();
    assert_eq!(cache.mode(), FetchMode::Search);
    commit_children(
        &mut cache,
        ParentKey::root(),
        1,
        vec![suite(5, 3, "Password reset", false)],
        PageInfo::complete(1),
    );
    assert_eq!(
        cache.children_of(&ParentKey::root()),
        vec![env.a1a.clone()],
    );

    cache.leave_search();
    assert_eq!(cache.mode(), FetchMode::Lazy);
    assert_eq!(cache.partition(), &lazy_before);
    assert_eq!(cache.partition_of(FetchMode::Search).slots.len(), 0);
}

// Test: lazy and search children lists for the same parent never mix
#[test]
fn modes_do_not_share_slots() {
    let env = Env1::get_expected();
    let mut cache = env.cache.clone();
    let root = ParentKey::root();
    let lazy_roots = cache.children_of(&root);

    cache.enter_search();
    assert!(cache.partition().slot(&root).is_none());
    commit_children(
        &mut cache,
        root.clone(),
        1,
        vec![suite(6, 3, "Two factor", false)],
        PageInfo::complete(1),
    );
    assert_eq!(cache.children_of(&root), vec![env.a1b.clone()]);

    cache.leave_search();
    assert_eq!(cache.children_of(&root), lazy_roots);
}

// Test: re-rooting keeps unrelated cache entries and only moves the
// projection anchor
#[test]
fn reroot_keeps_cache() {
    let env = Env1::get_expected();
    let mut cache = env.cache.clone();
    let nodes_before = cache.node_count();

    cache.set_root(ParentKey::from(env.a1.clone()));
    let root = cache.root().clone();
    assert_eq!(cache.node_count(), nodes_before);
    assert_eq!(
        cache.children_of(&root),
        vec![env.a1a.clone(), env.a1b.clone()],
    );
}
