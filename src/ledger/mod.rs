//! Wager ledger: keyed records, per-record settlement, shop statistics.

mod record;
mod stats;
mod store;

pub use record::{PlayType, Settlement, WagerRecord};
pub use stats::{LedgerSummary, PlayTypeStats};
pub use store::RecordStore;
