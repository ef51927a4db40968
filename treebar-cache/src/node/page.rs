use derive_new::new;
use serde::{
    Deserialize,
    Serialize,
};

/// Offset pagination starts at page 1; fetching page 1 replaces a slot's
/// children list, any later page appends.
pub const FIRST_PAGE: u32 = 1;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Default,
    new,
    Serialize,
    Deserialize,
)]
pub struct PageInfo {
    pub has_more: bool,
    pub next_page: Option<u32>,
    pub current: u32,
    pub total: u64,
}

impl PageInfo {
    /// A single complete page holding `total` entries.
    pub fn complete(total: u64) -> Self {
        Self {
            has_more: false,
            next_page: None,
            current: FIRST_PAGE,
            total,
        }
    }
}
