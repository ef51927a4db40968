pub mod orchestrate;
pub mod source;

use derive_builder::Builder;
use derive_more::Display;
use derive_new::new;
use serde::{
    Deserialize,
    Serialize,
};
use treebar_cache::{
    Entity,
    Epoch,
    NodeId,
    PageInfo,
    PageUpdate,
};
use uuid::Uuid;

/// Correlation id of one outgoing request, for log lines only; freshness is
/// decided by the epoch.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Wire-shaped query for one children page. `epoch` is serialized as `_n`
/// and echoed back verbatim by the server.
#[derive(Clone, Debug, PartialEq, Builder, Serialize)]
#[builder(pattern = "owned")]
pub struct FetchParams {
    pub parent: Option<NodeId>,
    pub page: u32,
    pub page_size: u32,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Flat matching instead of per-node pagination; set while searching.
    #[builder(default)]
    pub flat: bool,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
    #[serde(rename = "_n")]
    pub epoch: Epoch,
    #[builder(default = "RequestId::generate()")]
    #[serde(skip)]
    pub request: RequestId,
    #[builder(default)]
    #[serde(flatten)]
    pub filters: serde_json::Map<String, serde_json::Value>,
}

/// Pagination cursor as the server reports it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, new, Serialize, Deserialize,
)]
pub struct PageFeed {
    pub next: Option<u32>,
    pub current: u32,
    pub total: u64,
}

/// One page of children as returned by a fetch source.
#[derive(Clone, Debug, PartialEq, new, Deserialize)]
#[serde(bound = "E: serde::de::DeserializeOwned")]
pub struct FetchResult<E: Entity> {
    pub data: Vec<E>,
    pub pages: PageFeed,
    #[serde(rename = "_n")]
    pub epoch: Epoch,
}

impl<E: Entity> FetchResult<E> {
    pub fn into_update(
        self,
        page: u32,
    ) -> PageUpdate<E> {
        PageUpdate::new(
            page,
            self.data,
            PageInfo {
                has_more: self.pages.next.is_some(),
                next_page: self.pages.next,
                current: self.pages.current,
                total: self.pages.total,
            },
        )
    }
}
