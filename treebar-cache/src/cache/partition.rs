use derive_more::{
    From,
    IsVariant,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    HashMap,
    HashSet,
    node::{
        NodeId,
        load::LoadState,
        page::PageInfo,
    },
};

/// The two fetch strategies the tree switches between. Each mode owns its
/// own children partition; they never share lists for the same node.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    IsVariant,
    Serialize,
    Deserialize,
)]
pub enum FetchMode {
    #[default]
    Lazy,
    Search,
}

/// Children-slot key: the parent a page of children was fetched under.
/// `None` is the absolute root.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    From,
    Serialize,
    Deserialize,
)]
pub struct ParentKey(pub Option<NodeId>);

impl ParentKey {
    pub fn root() -> Self {
        Self(None)
    }
    pub fn as_id(&self) -> Option<&NodeId> {
        self.0.as_ref()
    }
    pub fn is_root(&self) -> bool {
        self.0.is_none()
    }
}

impl From<NodeId> for ParentKey {
    fn from(id: NodeId) -> Self {
        Self(Some(id))
    }
}

impl std::fmt::Display for ParentKey {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match &self.0 {
            Some(id) => write!(f, "{}", id),
            None => write!(f, "<root>"),
        }
    }
}

/// Ordered children of one parent plus its pagination cursor.
/// `ids == None` means never fetched; `Some(vec![])` means fetched, zero
/// children. The list reflects only contiguous pages in server order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ChildrenSlot {
    pub ids: Option<Vec<NodeId>>,
    pub page: PageInfo,
    pub load: LoadState,
}

impl ChildrenSlot {
    pub fn is_fetched(&self) -> bool {
        self.ids.is_some()
    }
    pub fn ids(&self) -> &[NodeId] {
        self.ids.as_deref().unwrap_or_default()
    }
}

/// Per-mode view state: children slots keyed by parent plus the set of open
/// nodes. Node payloads live in the shared registry of the cache.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition {
    pub(crate) slots: HashMap<ParentKey, ChildrenSlot>,
    pub(crate) open: HashSet<NodeId>,
}

impl Partition {
    pub fn slot(
        &self,
        parent: &ParentKey,
    ) -> Option<&ChildrenSlot> {
        self.slots.get(parent)
    }
    pub(crate) fn slot_mut(
        &mut self,
        parent: &ParentKey,
    ) -> &mut ChildrenSlot {
        self.slots.entry(parent.clone()).or_default()
    }
    pub fn is_open(
        &self,
        id: &NodeId,
    ) -> bool {
        self.open.contains(id)
    }
    pub fn open_set(&self) -> &HashSet<NodeId> {
        &self.open
    }
    pub(crate) fn set_open(
        &mut self,
        id: &NodeId,
        open: bool,
    ) {
        if open {
            self.open.insert(id.clone());
        } else {
            self.open.remove(id);
        }
    }
    /// Collapses every open node. Loaded children slots are untouched.
    pub(crate) fn close_all(&mut self) {
        self.open.clear();
    }
    pub(crate) fn forget_node(
        &mut self,
        id: &NodeId,
    ) -> Option<ChildrenSlot> {
        self.open.remove(id);
        self.slots.remove(&ParentKey(Some(id.clone())))
    }
}
