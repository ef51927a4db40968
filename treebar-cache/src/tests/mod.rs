
#[cfg(test)]
mod partition;

use crate::{
    cache::{
        TreeCache,
        commit::{
            CommitOutcome,
            PageUpdate,
        },
        partition::ParentKey,
    },
    node::page::PageInfo,
    tests::env::Suite,
};

pub fn init_test_tracing() {
    crate::logging::init_tracing();
}

/// Issues an epoch for `parent` and commits one children page at it,
/// asserting the commit applied.
pub fn commit_children(
    cache: &mut TreeCache<Suite>,
    parent: ParentKey,
    page: u32,
    entities: Vec<Suite>,
    info: PageInfo,
) {
    let (scope, epoch) = cache.begin_fetch(parent);
    let outcome =
        cache.commit_page(&scope, epoch, PageUpdate::new(page, entities, info));
    assert_eq!(outcome, CommitOutcome::Applied);
}
