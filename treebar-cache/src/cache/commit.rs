use derive_more::IsVariant;
use derive_new::new;
use itertools::Itertools;
use tracing::debug;

use crate::{
    HashSet,
    cache::{
        TreeCache,
        epoch::{
            Epoch,
            ScopeKey,
        },
    },
    node::{
        Entity,
        NodeId,
        load::LoadState,
        page::{
            FIRST_PAGE,
            PageInfo,
        },
    },
};

/// One fetched page of children, translated from the wire result.
#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct PageUpdate<E: Entity> {
    pub page: u32,
    pub entities: Vec<E>,
    pub info: PageInfo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, IsVariant)]
pub enum CommitOutcome {
    Applied,
    /// The response was not issued at the scope's latest epoch (or arrived
    /// after a mode switch) and was dropped. Not an error.
    Stale,
}

impl<E: Entity> TreeCache<E> {
    /// Applies a fetched children page. The epoch gate guarantees that the
    /// final slot state equals the result of the highest resolved epoch,
    /// regardless of response arrival order.
    pub fn commit_page(
        &mut self,
        scope: &ScopeKey,
        epoch: Epoch,
        update: PageUpdate<E>,
    ) -> CommitOutcome {
        if scope.mode != self.mode()
            || !self.epochs.is_current(scope, epoch)
        {
            debug!(%epoch, parent = %scope.parent, "dropping stale children page");
            return CommitOutcome::Stale;
        }
        let level = scope
            .parent
            .as_id()
            .and_then(|pid| self.nodes.get(pid))
            .map(|node| node.level + 1)
            .unwrap_or(0);

        let mut ids = Vec::with_capacity(update.entities.len());
        for entity in update.entities {
            ids.push(entity.node_id());
            self.upsert(entity, level);
        }

        let removed = {
            let slot =
                self.partition_of_mut(scope.mode).slot_mut(&scope.parent);
            let removed = if update.page <= FIRST_PAGE {
                let removed = slot
                    .ids()
                    .iter()
                    .filter(|&id| !ids.contains(id))
                    .cloned()
                    .collect_vec();
                slot.ids = Some(ids);
                removed
            } else {
                let list = slot.ids.get_or_insert_with(Vec::new);
                let present: HashSet<NodeId> =
                    list.iter().cloned().collect();
                list.extend(
                    ids.into_iter().filter(|id| !present.contains(id)),
                );
                Vec::new()
            };
            slot.page = update.info;
            slot.load = LoadState::Loaded;
            removed
        };
        for id in removed {
            self.retire_orphan(&id, &scope.parent);
        }
        CommitOutcome::Applied
    }
}
