use derive_more::IsVariant;
use tap::Tap;
use tracing::debug;

use crate::debounce::{
    Debouncer,
    Ticket,
};

/// The coordinator's two fetch strategies: per-node pagination (lazy) or
/// flat text matching (searching).
#[derive(Clone, Debug, PartialEq, Eq, Default, IsVariant)]
pub enum SearchState {
    #[default]
    Lazy,
    Searching {
        query: String,
    },
}

/// What a submitted search text means for the cache. Entering search swaps
/// in a fresh search partition; leaving discards it, restoring the
/// untouched lazy partition.
#[derive(Clone, Debug, PartialEq, Eq, IsVariant)]
pub enum Transition {
    EnterSearch,
    /// Query refined while already searching; refetch the flat result set.
    UpdateSearch,
    LeaveSearch,
    Unchanged,
}

/// State machine toggling a tree between lazy and search fetch modes.
#[derive(Clone, Debug, Default)]
pub struct SearchCoordinator {
    state: SearchState,
    debounce: Debouncer,
}

impl SearchCoordinator {
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// The active query text, if searching.
    pub fn query(&self) -> Option<&str> {
        match &self.state {
            SearchState::Searching { query } => Some(query),
            SearchState::Lazy => None,
        }
    }

    /// Marks a keystroke. The returned ticket is only actionable if it is
    /// still the newest one once the debounce delay has elapsed.
    pub fn note_input(&mut self) -> Ticket {
        self.debounce.submit()
    }

    pub fn is_current(
        &self,
        ticket: Ticket,
    ) -> bool {
        self.debounce.is_current(ticket)
    }

    /// Applies a settled search text and returns the transition the cache
    /// must perform. Whitespace-only text leaves search mode.
    pub fn submit(
        &mut self,
        text: &str,
    ) -> Transition {
        let query = normalize(text);
        match (&self.state, query) {
            (SearchState::Lazy, None) => Transition::Unchanged,
            (SearchState::Lazy, Some(query)) => {
                self.state = SearchState::Searching { query };
                Transition::EnterSearch
            }
            (SearchState::Searching { query }, Some(next))
                if *query == next =>
            {
                Transition::Unchanged
            }
            (SearchState::Searching { .. }, Some(next)) => {
                self.state = SearchState::Searching { query: next };
                Transition::UpdateSearch
            }
            (SearchState::Searching { .. }, None) => {
                self.state = SearchState::Lazy;
                Transition::LeaveSearch
            }
        }
        .tap(|transition| debug!(?transition, "search text settled"))
    }
}

fn normalize(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}
