pub mod view;

use crate::{
    cache::{
        CacheKey,
        TreeCache,
        partition::ParentKey,
    },
    node::{
        Entity,
        NodeId,
        TreeNode,
        load::LoadState,
    },
};

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorReason {
    /// The controller has not finished loading its root yet.
    NotReady,
    UnknownNode(NodeId),
    UnknownScope(ParentKey),
    Fetch(String),
    Ancestors(String),
    ColdCacheKey(CacheKey),
}

impl<E: Entity> TreeCache<E> {
    pub fn find_node(
        &self,
        id: &NodeId,
    ) -> Option<&TreeNode<E>> {
        self.nodes.get(id)
    }

    pub fn expect_node(
        &self,
        id: &NodeId,
    ) -> Result<&TreeNode<E>, ErrorReason> {
        self.find_node(id)
            .ok_or_else(|| ErrorReason::UnknownNode(id.clone()))
    }

    pub fn contains(
        &self,
        id: &NodeId,
    ) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode<E>> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_open(
        &self,
        id: &NodeId,
    ) -> bool {
        self.partition().is_open(id)
    }

    pub fn slot_load(
        &self,
        parent: &ParentKey,
    ) -> LoadState {
        self.partition()
            .slot(parent)
            .map(|slot| slot.load)
            .unwrap_or_default()
    }

    /// Ordered children of a parent in the active partition. When the slot
    /// was never fetched, falls back to spliced path nodes only: known
    /// children that are themselves open or selected. Deep-link expansion
    /// shows exactly the ancestor path that way, nothing else.
    pub fn children_of(
        &self,
        parent: &ParentKey,
    ) -> Vec<NodeId> {
        if let Some(slot) =
            self.partition().slot(parent).filter(|slot| slot.is_fetched())
        {
            return slot.ids().to_vec();
        }
        self.nodes
            .values()
            .filter(|node| node.parent_id.as_ref() == parent.as_id())
            .filter(|node| {
                self.is_open(&node.id)
                    || self.selected() == Some(&node.id)
            })
            .map(|node| node.id.clone())
            .collect()
    }
}
