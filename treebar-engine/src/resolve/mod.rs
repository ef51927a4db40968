use tracing::{
    instrument,
    warn,
};
use treebar_cache::{
    Entity,
    ErrorReason,
    FIRST_PAGE,
    ParentKey,
};

use crate::fetch::orchestrate::FetchCtx;

impl<E: Entity> FetchCtx<E> {
    /// Makes an arbitrary, possibly deeply nested entity visible and
    /// selected without loading the whole tree: splice the ancestor chain,
    /// open exactly the root-to-target path, then page through the target's
    /// siblings until the page containing it is cached.
    ///
    /// Ancestor resolution failure is non-fatal: the target is shown
    /// detached at the root with no path, and only a warning is logged.
    #[instrument(skip(self, target), level = "debug", fields(target = %target.node_id()))]
    pub(crate) async fn reveal(
        &self,
        target: &E,
    ) -> Result<(), ErrorReason> {
        let id = target.node_id();
        let chain = match self.ancestors.ancestors(&id).await {
            Ok(chain) => chain,
            Err(reason) => {
                warn!(?reason, "ancestor resolution failed; showing target detached");
                let mut cache = self.cache.write().unwrap();
                cache.insert_detached(target.clone());
                cache.select(Some(id));
                return Ok(());
            }
        };
        let parent = {
            let mut cache = self.cache.write().unwrap();
            let path = cache.splice_ancestors(chain);
            cache.select(Some(id.clone()));
            ParentKey(path.last().cloned())
        };

        let mut page = FIRST_PAGE;
        loop {
            self.fetch_page(parent.clone(), page).await?;
            let (found, next) = {
                let cache = self.cache.read().unwrap();
                let slot = cache.partition().slot(&parent);
                let found = slot
                    .map(|slot| slot.ids().contains(&id))
                    .unwrap_or(false);
                let next = slot.and_then(|slot| {
                    slot.page.has_more.then(|| {
                        slot.page
                            .next_page
                            .unwrap_or(slot.page.current + 1)
                    })
                });
                (found, next)
            };
            match (found, next) {
                (true, _) => break,
                (false, Some(next)) => page = next,
                (false, None) => {
                    // filtered out server-side; still show it under its
                    // parent so the selection has a row
                    self.cache.write().unwrap().attach_child(target.clone());
                    break;
                }
            }
        }
        Ok(())
    }
}
