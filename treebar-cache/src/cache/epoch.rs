use derive_more::{
    Display,
    From,
};
use derive_new::new;
use serde::{
    Deserialize,
    Serialize,
};
use tracing::trace;

use crate::{
    HashMap,
    cache::partition::{
        FetchMode,
        ParentKey,
    },
};

/// Monotonic freshness counter, issued per scope and echoed back by the
/// fetch source. A response is applied only at the latest issued epoch.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    From,
    Display,
    Serialize,
    Deserialize,
)]
pub struct Epoch(pub u64);

impl Epoch {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// One epoch scope: a children slot within one fetch mode. Lazy and search
/// fetches for the same parent never share freshness state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, new)]
pub struct ScopeKey {
    pub parent: ParentKey,
    pub mode: FetchMode,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EpochSequencer {
    latest: HashMap<ScopeKey, Epoch>,
}

impl EpochSequencer {
    /// Returns a new epoch for the scope, strictly greater than any epoch
    /// previously issued for it.
    pub fn issue(
        &mut self,
        scope: ScopeKey,
    ) -> Epoch {
        let epoch = self.latest.get(&scope).copied().unwrap_or_default().next();
        trace!(%epoch, parent = %scope.parent, "issuing fetch epoch");
        self.latest.insert(scope, epoch);
        epoch
    }

    pub fn is_current(
        &self,
        scope: &ScopeKey,
        epoch: Epoch,
    ) -> bool {
        self.latest.get(scope) == Some(&epoch)
    }

    /// Invalidates every outstanding request in the given mode by advancing
    /// the scopes past their in-flight epochs. Counters stay monotonic so a
    /// later session can never collide with a response issued before it.
    pub fn invalidate_mode(
        &mut self,
        mode: FetchMode,
    ) {
        let scopes: Vec<_> = self
            .latest
            .keys()
            .filter(|scope| scope.mode == mode)
            .cloned()
            .collect();
        for scope in scopes {
            self.issue(scope);
        }
    }
}
