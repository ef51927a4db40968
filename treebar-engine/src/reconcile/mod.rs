//! Mutation-aware refetch helpers. CRUD flows elsewhere in the app call
//! these with the entity the backend returned; the cache is patched with a
//! minimal, predicate-scoped refetch instead of a full reload.

use itertools::Itertools;
use tracing::instrument;
use treebar_cache::{
    Entity,
    ErrorReason,
    FIRST_PAGE,
    HasTreeCache,
    NodeId,
    ParentKey,
    TreeNode,
};

use crate::controller::TreeController;

impl<E: Entity> TreeController<E> {
    /// Re-fetches page 1 of the children of every cached node matching the
    /// predicate. Nodes that match nothing keep their `is_open` and
    /// children untouched. Resolves once the cache has settled.
    #[instrument(skip(self, pred), level = "debug")]
    pub async fn refetch_node_by(
        &self,
        pred: impl Fn(&TreeNode<E>) -> bool,
    ) -> Result<(), ErrorReason> {
        self.ensure_ready()?;
        let targets = {
            let cache = self.ctx.cache();
            cache
                .nodes()
                .filter(|node| pred(node))
                .map(|node| ParentKey::from(node.id.clone()))
                .filter(|parent| {
                    cache
                        .partition()
                        .slot(parent)
                        .is_some_and(|slot| slot.is_fetched())
                })
                .collect_vec()
        };
        for parent in targets {
            self.ctx.fetch_page(parent, FIRST_PAGE).await?;
        }
        Ok(())
    }

    /// Re-fetches one parent's children when they are materialized; a
    /// parent nobody has expanded needs no patching.
    async fn refetch_parent_of(
        &self,
        parent: Option<NodeId>,
    ) -> Result<(), ErrorReason> {
        self.ensure_ready()?;
        let parent = ParentKey(parent);
        let fetched = {
            let cache = self.ctx.cache();
            cache
                .partition()
                .slot(&parent)
                .is_some_and(|slot| slot.is_fetched())
        };
        if fetched {
            self.ctx.fetch_page(parent, FIRST_PAGE).await?;
        }
        Ok(())
    }

    /// After an external create or copy: the new sibling appears in correct
    /// server order by re-fetching its parent's first page.
    pub async fn after_create_or_copy(
        &self,
        entity: &E,
    ) -> Result<(), ErrorReason> {
        self.refetch_parent_of(entity.parent_id()).await
    }

    /// After an external edit. A move refetches both the old and the new
    /// parent, and re-resolves the ancestor path when the moved node is the
    /// current selection (its displayed path changed).
    pub async fn after_edit(
        &self,
        new_entity: &E,
        old_entity: &E,
    ) -> Result<(), ErrorReason> {
        let moved = new_entity.parent_id() != old_entity.parent_id();
        // the old-parent refetch may retire the node, so capture the
        // selection before patching
        let was_selected = self.with_cache(|cache| {
            cache.selected() == Some(&new_entity.node_id())
        });
        self.refetch_parent_of(old_entity.parent_id()).await?;
        if moved {
            self.refetch_parent_of(new_entity.parent_id()).await?;
            if was_selected {
                self.ctx.reveal(new_entity).await?;
            }
        }
        Ok(())
    }

    /// After an external delete. Clearing a selection pointing at the
    /// removed node is the caller's concern; the cache drops the node when
    /// its parent's refetched page no longer contains it.
    pub async fn after_delete(
        &self,
        entity: &E,
    ) -> Result<(), ErrorReason> {
        self.refetch_parent_of(entity.parent_id()).await
    }

    /// After an external archive or unarchive: the node may have left (or
    /// re-entered) the currently filtered view, so its parent's children
    /// are re-fetched under the active filters.
    pub async fn after_archive(
        &self,
        entity: &E,
    ) -> Result<(), ErrorReason> {
        self.refetch_parent_of(entity.parent_id()).await
    }
}
