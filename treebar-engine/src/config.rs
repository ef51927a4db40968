use std::sync::Arc;

use derive_builder::Builder;
use futures::future::BoxFuture;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Supplies the debounce delay for search input as an opaque future, so
/// the engine never depends on a specific async runtime.
pub type DelayProvider = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

#[derive(Clone, Builder)]
#[builder(pattern = "owned")]
pub struct EngineConfig {
    #[builder(default = "DEFAULT_PAGE_SIZE")]
    pub page_size: u32,
    /// Server-side ordering parameter forwarded on every fetch.
    #[builder(default)]
    pub ordering: Option<String>,
    /// Caller-supplied filters forwarded verbatim (e.g. archived-visibility
    /// toggles).
    #[builder(default)]
    pub filters: serde_json::Map<String, serde_json::Value>,
    /// Debounce delay for search keystrokes. `None` settles immediately.
    #[builder(default)]
    pub debounce: Option<DelayProvider>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            ordering: None,
            filters: serde_json::Map::new(),
            debounce: None,
        }
    }
}

impl std::fmt::Debug for EngineConfig {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("EngineConfig")
            .field("page_size", &self.page_size)
            .field("ordering", &self.ordering)
            .field("filters", &self.filters)
            .field("debounce", &self.debounce.is_some())
            .finish()
    }
}
