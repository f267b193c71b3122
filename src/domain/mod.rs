//! Bookmaking-agnostic simulation core.

mod aggregate;
mod arrangement;
mod distribution;
mod money;
mod replay;
mod round;

pub mod policy;

// Core domain types
pub use money::{Money, Odds, Rate};
pub use round::{RoundIndex, RoundOutcome, RoundResult, StakeState};

// Arrangement enumeration
pub use arrangement::{binomial, Arrangement, ArrangementEnumerator};

// Replay and aggregation
pub use aggregate::{Aggregate, Aggregator, OwnerDistributions, SummaryStats};
pub use distribution::Distribution;
pub use replay::{ArrangementReplayer, ArrangementResult, BetTerms, OwnerIncome, OwnerTerms};
