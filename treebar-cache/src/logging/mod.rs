//! Tracing setup and formatting helpers shared by the workspace

pub mod format_utils;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

pub use format_utils::{
    PrettyDebug,
    pretty,
    short_list,
};

static GLOBAL_INIT: Once = Once::new();

/// Installs the fmt subscriber once. Level defaults to `RUST_LOG`, falling
/// back to `info`.
pub fn init_tracing() {
    GLOBAL_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    });
}
