#![deny(clippy::disallowed_methods)]

pub mod coordinate;
pub mod crumbs;
pub mod debounce;

#[cfg(any(test, feature = "test-api"))]
pub(crate) mod tests;

pub use crate::{
    coordinate::{
        SearchCoordinator,
        SearchState,
        Transition,
    },
    crumbs::{
        Crumbs,
        breadcrumb,
        breadcrumb_labels,
    },
    debounce::{
        Debouncer,
        Ticket,
    },
};
