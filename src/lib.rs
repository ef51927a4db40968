#![deny(clippy::disallowed_methods)]

//! Lazy hierarchical tree engine for server-paginated entity hierarchies
//! (test suites, test plans). Presents a conceptually infinite tree as an
//! incrementally materialized cache: per-node pagination, epoch-gated
//! freshness under racing responses, deep-link ancestor resolution, flat
//! search with a clean per-mode partition swap, and mutation-aware
//! predicate-scoped refetch.
//!
//! The crates compose bottom up:
//! - [`treebar_cache`]: node registry, partitions, epochs, commit
//!   protocol, flat row projection
//! - [`treebar_search`]: search mode coordination, debounce tickets,
//!   breadcrumbs
//! - [`treebar_engine`]: fetch sources, orchestration, ancestor
//!   resolution, reconciliation, the [`TreeController`] handle

pub use treebar_cache::{
    CacheKey,
    ChildrenSlot,
    CommitOutcome,
    Entity,
    Epoch,
    ErrorReason,
    FetchMode,
    LoadState,
    NodeId,
    NodeView,
    PageInfo,
    PageUpdate,
    ParentKey,
    Partition,
    RenderNode,
    Row,
    TreeCache,
    TreeCacheRef,
    TreeNode,
    logging::init_tracing,
    render_rows,
    visible_rows,
};
pub use treebar_engine::{
    AncestorSource,
    ControllerState,
    EngineConfig,
    EngineConfigBuilder,
    FetchParams,
    FetchResult,
    FetchSource,
    PageFeed,
    RequestId,
    RowSnapshot,
    TreeController,
    TreeStore,
};
pub use treebar_search::{
    Crumbs,
    SearchCoordinator,
    SearchState,
    Transition,
    breadcrumb,
    breadcrumb_labels,
};
