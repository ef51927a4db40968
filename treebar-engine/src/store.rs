use tracing::debug;
use treebar_cache::{
    CacheKey,
    Entity,
    TreeCache,
    TreeCacheRef,
};

/// Caller-owned registry of the single hot tree cache. State survives
/// route-level remounts under the same key; switching keys (project,
/// entity-kind, or tab change) discards the old cache wholesale.
#[derive(Debug)]
pub struct TreeStore<E: Entity> {
    hot: Option<(CacheKey, TreeCacheRef<E>)>,
}

impl<E: Entity> Default for TreeStore<E> {
    fn default() -> Self {
        Self { hot: None }
    }
}

impl<E: Entity> TreeStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hot_key(&self) -> Option<&CacheKey> {
        self.hot.as_ref().map(|(key, _)| key)
    }

    /// Returns the cache for `key`, reusing the hot one when the key is
    /// unchanged and replacing it otherwise.
    pub fn attach(
        &mut self,
        key: CacheKey,
    ) -> TreeCacheRef<E> {
        match &self.hot {
            Some((hot, cache)) if *hot == key => cache.clone(),
            stale => {
                if let Some((old, _)) = stale {
                    debug!(%old, %key, "discarding tree cache on key switch");
                }
                let cache = TreeCacheRef::new(TreeCache::new(key.clone()));
                self.hot = Some((key, cache.clone()));
                cache
            }
        }
    }

    pub fn teardown(&mut self) {
        self.hot = None;
    }
}
