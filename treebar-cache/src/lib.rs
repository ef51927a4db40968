#![deny(clippy::disallowed_methods)]

pub mod cache;
pub mod logging;
pub mod node;
pub mod project;

#[cfg(any(test, feature = "test-api"))]
pub mod tests;

#[cfg(not(any(test, feature = "test-api")))]
pub use std::collections::{
    HashMap,
    HashSet,
};
#[cfg(any(test, feature = "test-api"))]
pub use std::hash::{
    BuildHasherDefault,
    DefaultHasher,
};
#[cfg(any(test, feature = "test-api"))]
pub type HashSet<T> =
    std::collections::HashSet<T, BuildHasherDefault<DefaultHasher>>;
#[cfg(any(test, feature = "test-api"))]
pub type HashMap<K, V> =
    std::collections::HashMap<K, V, BuildHasherDefault<DefaultHasher>>;

#[cfg(any(test, feature = "test-api"))]
pub use tests::{
    env::{
        Env1,
        Suite,
        TestEnv,
        suite,
    },
    init_test_tracing,
};

pub use crate::{
    cache::{
        CacheKey,
        TreeCache,
        TreeCacheRef,
        commit::{
            CommitOutcome,
            PageUpdate,
        },
        epoch::{
            Epoch,
            EpochSequencer,
            ScopeKey,
        },
        getters::{
            ErrorReason,
            view::NodeView,
        },
        has_cache::{
            HasTreeCache,
            HasTreeCacheMut,
        },
        partition::{
            ChildrenSlot,
            FetchMode,
            ParentKey,
            Partition,
        },
    },
    node::{
        Entity,
        NodeId,
        TreeNode,
        load::LoadState,
        page::{
            FIRST_PAGE,
            PageInfo,
        },
    },
    project::{
        RenderNode,
        Row,
        render_rows,
        visible_rows,
    },
};
