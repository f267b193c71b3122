//! Exhaustive risk analysis for loss-chasing staking plans.
//!
//! `stakesim` replays a staking policy (Fibonacci or fixed-multiplier
//! progression) against every arrangement of K losing rounds in an N-round
//! betting campaign and folds the outcomes into exact probability
//! distributions. Nothing is sampled: the C(N, K) arrangements are
//! enumerated lazily and replayed across worker threads, so the report
//! covers the whole outcome space rather than estimating it.
//!
//! A small wager ledger rides along for the bookkeeping side of the same
//! shops: settled group wagers keyed by date and group, with per-record
//! bettor/shop settlement and whole-book statistics.
//!
//! # Modules
//!
//! - [`config`] - TOML configuration; every field has a default
//! - [`domain`] - staking policies, arrangements, replay, distributions
//! - [`engine`] - the sweep driver (enumerate, replay, aggregate)
//! - [`ledger`] - keyed wager records and shop statistics
//! - [`cli`] - operator-facing command definitions and handlers
//! - [`error`] - error types for the crate
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use stakesim::domain::policy::PolicySpec;
//! use stakesim::engine::{self, SimulationSpec};
//!
//! let report = engine::run(&SimulationSpec {
//!     rounds: 3,
//!     loss_rounds: 1,
//!     odds: dec!(1.35),
//!     policy: PolicySpec::Fibonacci { initial: dec!(100) },
//!     owner: None,
//!     max_arrangements: None,
//! })?;
//!
//! assert_eq!(report.replayed, 3);
//! # Ok::<(), stakesim::error::ParameterError>(())
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ledger;
