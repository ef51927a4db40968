use derive_more::IsVariant;
use serde::{
    Deserialize,
    Serialize,
};

/// Fetch state of one children slot. `Error` keeps previously loaded
/// children intact so a retry can re-issue the fetch.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Default,
    IsVariant,
    Serialize,
    Deserialize,
)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}
