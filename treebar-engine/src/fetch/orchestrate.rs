use std::sync::{
    Arc,
    RwLock,
};

use tap::Tap;
use tracing::{
    debug,
    instrument,
};
use treebar_cache::{
    CommitOutcome,
    Entity,
    ErrorReason,
    FIRST_PAGE,
    HasTreeCache,
    NodeId,
    ParentKey,
    TreeCache,
    TreeCacheRef,
};
use treebar_search::SearchCoordinator;

use crate::{
    config::EngineConfig,
    fetch::{
        FetchParams,
        RequestId,
        source::{
            AncestorSource,
            FetchSource,
        },
    },
};

/// Everything a fetch needs: the shared cache, the search coordinator, the
/// caller-supplied sources, and the engine configuration.
pub struct FetchCtx<E: Entity> {
    pub(crate) cache: TreeCacheRef<E>,
    pub(crate) search: Arc<RwLock<SearchCoordinator>>,
    pub(crate) source: Arc<dyn FetchSource<E>>,
    pub(crate) ancestors: Arc<dyn AncestorSource<E>>,
    pub(crate) config: EngineConfig,
}

impl<E: Entity> Clone for FetchCtx<E> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            search: self.search.clone(),
            source: self.source.clone(),
            ancestors: self.ancestors.clone(),
            config: self.config.clone(),
        }
    }
}

impl<E: Entity> std::fmt::Debug for FetchCtx<E> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("FetchCtx")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<E: Entity> HasTreeCache<E> for FetchCtx<E> {
    type Guard<'a>
        = std::sync::RwLockReadGuard<'a, TreeCache<E>>
    where
        Self: 'a;
    fn cache(&self) -> Self::Guard<'_> {
        self.cache.read().unwrap()
    }
}

impl<E: Entity> FetchCtx<E> {
    fn params(
        &self,
        parent: &ParentKey,
        page: u32,
        epoch: treebar_cache::Epoch,
    ) -> FetchParams {
        let search = self
            .search
            .read()
            .unwrap()
            .query()
            .map(str::to_owned);
        FetchParams {
            parent: parent.as_id().cloned(),
            page,
            page_size: self.config.page_size,
            flat: search.is_some(),
            search,
            ordering: self.config.ordering.clone(),
            epoch,
            request: RequestId::generate(),
            filters: self.config.filters.clone(),
        }
    }

    /// Fetches one children page for `parent` under a fresh epoch and
    /// commits it. The commit is skipped (not an error) when a newer epoch
    /// resolved first.
    #[instrument(skip(self), level = "debug")]
    pub(crate) async fn fetch_page(
        &self,
        parent: ParentKey,
        page: u32,
    ) -> Result<CommitOutcome, ErrorReason> {
        let (scope, epoch) = {
            let mut cache = self.cache.write().unwrap();
            cache.begin_fetch(parent.clone())
        };
        let params = self.params(&parent, page, epoch);
        let request = params.request;
        let result = self.source.fetch(params).await;
        let mut cache = self.cache.write().unwrap();
        match result {
            Ok(result) => Ok(cache
                // the echoed `_n` decides freshness, not the local copy
                .commit_page(&scope, result.epoch, result.into_update(page))
                .tap(|outcome| {
                    debug!(%request, ?outcome, parent = %scope.parent, "page fetch finished")
                })),
            Err(reason) => {
                cache.fail_fetch(&scope, epoch);
                debug!(%request, ?reason, parent = %scope.parent, "page fetch failed");
                Err(reason)
            }
        }
    }

    /// Expands a node: opens it and fetches its first children page when
    /// they were never fetched (or the last fetch failed). No-op on leaves
    /// and on nodes with a fetch already in flight.
    pub(crate) async fn expand(
        &self,
        id: &NodeId,
    ) -> Result<(), ErrorReason> {
        let parent = ParentKey::from(id.clone());
        let needs_fetch = {
            let mut cache = self.cache.write().unwrap();
            let node = cache.expect_node(id)?;
            if node.is_leaf {
                return Ok(());
            }
            let slot_load = cache.slot_load(&parent);
            if slot_load.is_loading() {
                return Ok(());
            }
            cache.open(id);
            let fetched = cache
                .partition()
                .slot(&parent)
                .is_some_and(|slot| slot.is_fetched());
            !fetched || slot_load.is_error()
        };
        if needs_fetch {
            self.fetch_page(parent, FIRST_PAGE).await?;
        }
        Ok(())
    }

    /// Fetches the next children page of `parent`, appending to the slot.
    /// No-op when no further page exists or a fetch is in flight.
    pub(crate) async fn load_more(
        &self,
        parent: ParentKey,
    ) -> Result<(), ErrorReason> {
        let next_page = {
            let cache = self.cache.read().unwrap();
            let Some(slot) = cache.partition().slot(&parent) else {
                return Ok(());
            };
            if slot.load.is_loading() || !slot.page.has_more {
                return Ok(());
            }
            slot.page.next_page.unwrap_or(slot.page.current + 1)
        };
        self.fetch_page(parent, next_page).await?;
        Ok(())
    }

    pub(crate) fn collapse(
        &self,
        id: &NodeId,
    ) {
        self.cache.write().unwrap().close(id);
    }
}
