use crate::{
    cache::{
        TreeCache,
        partition::ParentKey,
    },
    node::{
        Entity,
        NodeId,
        TreeNode,
        load::LoadState,
        page::PageInfo,
    },
};

/// Read-only composite of a node and its view state in the active
/// partition. This is what render delegates receive.
#[derive(Clone, Debug)]
pub struct NodeView<'a, E: Entity> {
    pub node: &'a TreeNode<E>,
    pub is_open: bool,
    pub is_selected: bool,
    pub children: Option<&'a [NodeId]>,
    pub page: PageInfo,
    pub load: LoadState,
}

impl<E: Entity> TreeCache<E> {
    pub fn node_view(
        &self,
        id: &NodeId,
    ) -> Option<NodeView<'_, E>> {
        let node = self.find_node(id)?;
        let slot = self.partition().slot(&ParentKey(Some(id.clone())));
        Some(NodeView {
            node,
            is_open: self.is_open(id),
            is_selected: self.selected() == Some(id),
            children: slot.and_then(|slot| slot.ids.as_deref()),
            page: slot.map(|slot| slot.page).unwrap_or_default(),
            load: slot.map(|slot| slot.load).unwrap_or_default(),
        })
    }
}
