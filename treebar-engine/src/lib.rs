#![deny(clippy::disallowed_methods)]

pub mod config;
pub mod controller;
pub mod fetch;
pub mod reconcile;
pub mod resolve;
pub mod store;

#[cfg(any(test, feature = "test-api"))]
pub mod tests;

pub use crate::{
    config::{
        DEFAULT_PAGE_SIZE,
        DelayProvider,
        EngineConfig,
        EngineConfigBuilder,
    },
    controller::{
        ControllerState,
        RowSnapshot,
        TreeController,
    },
    fetch::{
        FetchParams,
        FetchParamsBuilder,
        FetchResult,
        PageFeed,
        RequestId,
        source::{
            AncestorSource,
            FetchSource,
        },
    },
    store::TreeStore,
};
