use async_trait::async_trait;
use auto_impl::auto_impl;
use treebar_cache::{
    Entity,
    ErrorReason,
    NodeId,
};

use crate::fetch::{
    FetchParams,
    FetchResult,
};

/// Caller-supplied children fetcher, implemented once per entity kind
/// (suite, plan). The engine talks to the backend through this only.
#[async_trait]
#[auto_impl(&, Arc, Box)]
pub trait FetchSource<E: Entity>: Send + Sync {
    async fn fetch(
        &self,
        params: FetchParams,
    ) -> Result<FetchResult<E>, ErrorReason>;
}

/// Caller-supplied ancestor lookup for deep-linking. Returns the chain
/// ordered from the absolute root down to the target's immediate parent,
/// excluding the target itself.
#[async_trait]
#[auto_impl(&, Arc, Box)]
pub trait AncestorSource<E: Entity>: Send + Sync {
    async fn ancestors(
        &self,
        target: &NodeId,
    ) -> Result<Vec<E>, ErrorReason>;
}
