use derive_more::{
    Display,
    From,
};

/// Sequence number of one search keystroke.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, From, Display,
)]
pub struct Ticket(pub u64);

/// Logical debouncer: every keystroke takes a ticket, and only the ticket
/// that is still newest after the caller-supplied delay triggers a fetch.
/// The delay itself stays outside so the engine is executor-agnostic.
#[derive(Clone, Debug, Default)]
pub struct Debouncer {
    seq: u64,
}

impl Debouncer {
    pub fn submit(&mut self) -> Ticket {
        self.seq += 1;
        Ticket(self.seq)
    }

    pub fn is_current(
        &self,
        ticket: Ticket,
    ) -> bool {
        ticket.0 == self.seq
    }
}
