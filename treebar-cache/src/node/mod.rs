pub mod load;
pub mod page;

use std::fmt::Debug;

use derive_more::{
    Display,
    From,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Opaque, comparable identifier of a tree entity. Stable for the lifetime
/// of the underlying server-side record.
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
#[serde(untagged)]
pub enum NodeId {
    #[display("{_0}")]
    Num(i64),
    #[display("{_0}")]
    Text(String),
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::Text(s.to_owned())
    }
}

/// Contract every payload kind (suite, plan) implements once. The engine is
/// written against this trait only.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    fn node_id(&self) -> NodeId;
    fn parent_id(&self) -> Option<NodeId>;
    /// Server-provided leaf flag. Authoritative once learned true.
    fn leaf_hint(&self) -> bool {
        false
    }
    fn label(&self) -> &str;
}

/// One materialized entity in the tree cache. Per-mode view state (children
/// lists, open flags, pagination) lives in the cache partitions, not here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode<E: Entity> {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    pub payload: E,
    pub is_leaf: bool,
    pub level: u32,
}

impl<E: Entity> TreeNode<E> {
    pub fn from_entity(
        payload: E,
        level: u32,
    ) -> Self {
        Self {
            id: payload.node_id(),
            parent_id: payload.parent_id(),
            is_leaf: payload.leaf_hint(),
            level,
            payload,
        }
    }
    /// Refresh this node from a newly fetched copy of its entity. The level
    /// hint is only taken when the node changed parents; `is_leaf` can only
    /// strengthen.
    pub(crate) fn absorb(
        &mut self,
        payload: E,
        level_hint: u32,
    ) {
        let parent_id = payload.parent_id();
        if parent_id != self.parent_id {
            self.parent_id = parent_id;
            self.level = level_hint;
        }
        self.is_leaf |= payload.leaf_hint();
        self.payload = payload;
    }

    pub fn label(&self) -> &str {
        self.payload.label()
    }
}
