pub mod commit;
pub mod epoch;
pub mod getters;
pub mod has_cache;
pub mod partition;

use std::sync::{
    Arc,
    RwLock,
};

use derive_more::{
    Display,
    From,
};
use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};
use tracing::debug;

use crate::{
    cache::{
        epoch::{
            Epoch,
            EpochSequencer,
            ScopeKey,
        },
        partition::{
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
    },
};

/// Scopes which tree state is "hot": one cache instance per
/// (project, entity-kind, active-tab) context. Switching keys discards the
/// old cache wholesale instead of patching it.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    From,
    Display,
    Serialize,
    Deserialize,
)]
pub struct CacheKey(pub String);

impl CacheKey {
    pub fn compose(
        project: &str,
        kind: &str,
        tab: &str,
    ) -> Self {
        Self(format!("{project}:{kind}:{tab}"))
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Shared handle to one tree cache. The lock is only held for the brief
/// synchronous mutations, never across an await point.
#[derive(Debug)]
pub struct TreeCacheRef<E: Entity>(pub Arc<RwLock<TreeCache<E>>>);

impl<E: Entity> TreeCacheRef<E> {
    pub fn new(cache: TreeCache<E>) -> Self {
        Self::from(cache)
    }
}

impl<E: Entity> Clone for TreeCacheRef<E> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<E: Entity> From<TreeCache<E>> for TreeCacheRef<E> {
    fn from(cache: TreeCache<E>) -> Self {
        Self(Arc::new(RwLock::new(cache)))
    }
}

impl<E: Entity> std::ops::Deref for TreeCacheRef<E> {
    type Target = Arc<RwLock<TreeCache<E>>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Single source of truth for loaded nodes. Holds the shared node registry,
/// the per-mode partitions, and the freshness sequencer.
#[derive(Clone, Debug)]
pub struct TreeCache<E: Entity> {
    key: CacheKey,
    pub(crate) nodes: IndexMap<NodeId, TreeNode<E>>,
    pub(crate) lazy: Partition,
    pub(crate) search: Partition,
    mode: FetchMode,
    pub(crate) epochs: EpochSequencer,
    root: ParentKey,
    selected: Option<NodeId>,
}

impl<E: Entity> TreeCache<E> {
    pub fn new(key: CacheKey) -> Self {
        Self {
            key,
            nodes: IndexMap::new(),
            lazy: Partition::default(),
            search: Partition::default(),
            mode: FetchMode::default(),
            epochs: EpochSequencer::default(),
            root: ParentKey::root(),
            selected: None,
        }
    }

    pub fn key(&self) -> &CacheKey {
        &self.key
    }
    pub fn mode(&self) -> FetchMode {
        self.mode
    }
    pub fn root(&self) -> &ParentKey {
        &self.root
    }
    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn partition_of(
        &self,
        mode: FetchMode,
    ) -> &Partition {
        match mode {
            FetchMode::Lazy => &self.lazy,
            FetchMode::Search => &self.search,
        }
    }
    pub(crate) fn partition_of_mut(
        &mut self,
        mode: FetchMode,
    ) -> &mut Partition {
        match mode {
            FetchMode::Lazy => &mut self.lazy,
            FetchMode::Search => &mut self.search,
        }
    }
    pub fn partition(&self) -> &Partition {
        self.partition_of(self.mode)
    }
    pub(crate) fn partition_mut(&mut self) -> &mut Partition {
        self.partition_of_mut(self.mode)
    }

    /// Re-roots the visible tree at an arbitrary node. Unrelated cache
    /// entries are kept.
    pub fn set_root(
        &mut self,
        root: ParentKey,
    ) {
        self.root = root;
    }

    pub fn select(
        &mut self,
        id: Option<NodeId>,
    ) {
        self.selected = id;
    }

    pub fn open(
        &mut self,
        id: &NodeId,
    ) {
        self.partition_mut().set_open(id, true);
    }
    pub fn close(
        &mut self,
        id: &NodeId,
    ) {
        self.partition_mut().set_open(id, false);
    }
    pub fn close_all(&mut self) {
        self.partition_mut().close_all();
    }

    /// Issues a fresh epoch for a children fetch and marks the slot as
    /// loading. The epoch travels with the request and gates its commit.
    pub fn begin_fetch(
        &mut self,
        parent: ParentKey,
    ) -> (ScopeKey, Epoch) {
        let scope = ScopeKey::new(parent, self.mode);
        let epoch = self.epochs.issue(scope.clone());
        self.partition_of_mut(scope.mode).slot_mut(&scope.parent).load =
            LoadState::Loading;
        (scope, epoch)
    }

    /// Records a fetch failure. Previously loaded children stay intact so
    /// the caller can retry. Stale failures are ignored.
    pub fn fail_fetch(
        &mut self,
        scope: &ScopeKey,
        epoch: Epoch,
    ) {
        if scope.mode != self.mode || !self.epochs.is_current(scope, epoch) {
            return;
        }
        self.partition_of_mut(scope.mode).slot_mut(&scope.parent).load =
            LoadState::Error;
    }

    /// Enters search mode with a clean search partition. Outstanding search
    /// responses from an earlier session are invalidated.
    pub fn enter_search(&mut self) {
        self.search = Partition::default();
        self.epochs.invalidate_mode(FetchMode::Search);
        self.mode = FetchMode::Search;
    }

    /// Leaves search mode, discarding the search partition entirely. The
    /// lazy partition was never touched while searching, so no refetch is
    /// needed.
    pub fn leave_search(&mut self) {
        self.search = Partition::default();
        self.epochs.invalidate_mode(FetchMode::Search);
        self.mode = FetchMode::Lazy;
    }

    /// Splices an ancestor chain (ordered root first) into the registry and
    /// opens exactly that path. Sibling lists of the ancestors are not
    /// fabricated; they stay unfetched until expanded for real.
    pub fn splice_ancestors(
        &mut self,
        chain: Vec<E>,
    ) -> Vec<NodeId> {
        let mut level = 0;
        let mut path = Vec::with_capacity(chain.len());
        for entity in chain {
            let id = entity.node_id();
            match self.nodes.entry(id.clone()) {
                indexmap::map::Entry::Occupied(mut entry) => {
                    level = entry.get().level;
                    entry.get_mut().absorb(entity, level);
                }
                indexmap::map::Entry::Vacant(entry) => {
                    entry.insert(TreeNode::from_entity(entity, level));
                }
            }
            self.partition_mut().set_open(&id, true);
            path.push(id);
            level += 1;
        }
        path
    }

    /// Inserts one entity and appends it to its parent's children list when
    /// that list is already fetched.
    pub fn attach_child(
        &mut self,
        entity: E,
    ) -> NodeId {
        let id = entity.node_id();
        let parent = ParentKey(entity.parent_id());
        let level = parent
            .as_id()
            .and_then(|pid| self.nodes.get(pid))
            .map(|node| node.level + 1)
            .unwrap_or(0);
        self.upsert(entity, level);
        let slot = self.partition_mut().slot_mut(&parent);
        if let Some(ids) = slot.ids.as_mut() {
            if !ids.contains(&id) {
                ids.push(id.clone());
            }
        }
        id
    }

    /// Degraded deep-link display: the target is parked at the current root
    /// with no ancestor path.
    pub fn insert_detached(
        &mut self,
        entity: E,
    ) -> NodeId {
        let id = entity.node_id();
        self.upsert(entity, 0);
        let root = self.root.clone();
        let slot = self.partition_mut().slot_mut(&root);
        if let Some(ids) = slot.ids.as_mut() {
            if !ids.contains(&id) {
                ids.push(id.clone());
            }
        }
        debug!(%id, "showing deep-link target detached at root");
        id
    }

    pub(crate) fn upsert(
        &mut self,
        entity: E,
        level: u32,
    ) {
        match self.nodes.entry(entity.node_id()) {
            indexmap::map::Entry::Occupied(mut entry) => {
                entry.get_mut().absorb(entity, level);
            }
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(TreeNode::from_entity(entity, level));
            }
        }
    }

    /// Retires a node dropped from its parent's refetched children, unless
    /// it moved to another parent in the meantime.
    pub(crate) fn retire_orphan(
        &mut self,
        id: &NodeId,
        parent: &ParentKey,
    ) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if node.parent_id.as_ref() != parent.as_id() {
            return;
        }
        self.retire_subtree(id);
    }

    /// Removes a node and its loaded descendants from the registry and from
    /// both partitions.
    pub(crate) fn retire_subtree(
        &mut self,
        id: &NodeId,
    ) {
        let mut stack = vec![id.clone()];
        while let Some(id) = stack.pop() {
            self.nodes.shift_remove(&id);
            if self.selected.as_ref() == Some(&id) {
                self.selected = None;
            }
            if let Some(slot) = self.lazy.forget_node(&id) {
                stack.extend(slot.ids().iter().cloned());
            }
            if let Some(slot) = self.search.forget_node(&id) {
                stack.extend(slot.ids().iter().cloned());
            }
        }
    }
}
