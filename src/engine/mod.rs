//! Exhaustive sweep driver: enumerate, replay, aggregate.
//!
//! The sweep streams arrangements off the lazy enumerator, fans the replays
//! out across rayon workers and folds per-worker [`Aggregator`]s that reduce
//! pairwise at the end. No shared mutable state; memory stays bounded by the
//! distributions, never by C(N, K).

use rayon::iter::{ParallelBridge, ParallelIterator};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::domain::policy::PolicySpec;
use crate::domain::{
    binomial, Aggregate, Aggregator, ArrangementEnumerator, ArrangementReplayer, BetTerms, Odds,
    OwnerTerms,
};
use crate::error::ParameterError;

/// A validated request for one exhaustive sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationSpec {
    /// Betting rounds in the campaign.
    pub rounds: u32,
    /// Exact number of losing rounds per arrangement.
    pub loss_rounds: u32,
    /// Decimal odds quoted to the punter.
    pub odds: Odds,
    pub policy: PolicySpec,
    /// Track shop income when present.
    pub owner: Option<OwnerTerms>,
    /// Stop after this many arrangements; the report flags truncation.
    pub max_arrangements: Option<u64>,
}

impl SimulationSpec {
    /// Rejects parameter combinations the sweep cannot give meaning to.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.rounds == 0 {
            return Err(ParameterError::ZeroRounds);
        }
        if self.loss_rounds > self.rounds {
            return Err(ParameterError::LossRoundsExceedRounds {
                loss_rounds: self.loss_rounds,
                rounds: self.rounds,
            });
        }
        let stake = self.policy.initial_stake();
        if stake <= Decimal::ZERO {
            return Err(ParameterError::NonPositiveStake { stake });
        }
        if self.odds <= Decimal::ONE {
            return Err(ParameterError::OddsTooLow { odds: self.odds });
        }
        if let PolicySpec::Multiplier { factor, .. } = self.policy {
            if factor < Decimal::ONE {
                return Err(ParameterError::MultiplierTooLow { multiplier: factor });
            }
        }
        if let Some(owner) = self.owner {
            if owner.commission_rate < Decimal::ZERO || owner.commission_rate > Decimal::ONE {
                return Err(ParameterError::CommissionOutOfRange {
                    rate: owner.commission_rate,
                });
            }
            if owner.actual_odds <= Decimal::ONE {
                return Err(ParameterError::ActualOddsTooLow {
                    odds: owner.actual_odds,
                });
            }
        }
        Ok(())
    }

    /// How big this sweep would be, before committing to it.
    #[must_use]
    pub fn scale(&self) -> EnumerationScale {
        EnumerationScale {
            planned: binomial(self.rounds, self.loss_rounds),
            cap: self.max_arrangements,
        }
    }
}

/// Size of a sweep: the full count and any configured cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumerationScale {
    /// C(rounds, loss_rounds), `None` when it overflows u128.
    pub planned: Option<u128>,
    pub cap: Option<u64>,
}

impl EnumerationScale {
    /// Whether the uncapped sweep is larger than `threshold`. A count too
    /// big for u128 always exceeds.
    #[must_use]
    pub fn exceeds(&self, threshold: u64) -> bool {
        self.planned
            .map_or(true, |planned| planned > u128::from(threshold))
    }

    /// Arrangements that will actually be replayed, cap applied.
    #[must_use]
    pub fn expected_replays(&self) -> Option<u128> {
        match (self.planned, self.cap) {
            (Some(planned), Some(cap)) => Some(planned.min(u128::from(cap))),
            (Some(planned), None) => Some(planned),
            (None, Some(cap)) => Some(u128::from(cap)),
            (None, None) => None,
        }
    }
}

/// Outcome of one sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    /// Full arrangement count, `None` when it overflows u128.
    #[serde(serialize_with = "planned_as_string")]
    pub planned: Option<u128>,
    /// Arrangements actually replayed.
    pub replayed: u64,
    /// True when the cap stopped enumeration early.
    pub truncated: bool,
    pub aggregate: Aggregate,
}

/// JSON numbers stop at u64, so the planned count travels as a string.
fn planned_as_string<S: Serializer>(
    planned: &Option<u128>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match planned {
        Some(count) => serializer.serialize_some(&count.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Runs the sweep described by `spec` to completion (or its cap).
pub fn run(spec: &SimulationSpec) -> Result<SimulationReport, ParameterError> {
    run_with_progress(spec, || {})
}

/// Like [`run`], invoking `on_replayed` once per replayed arrangement.
///
/// The callback fires from rayon worker threads, so it must be cheap and
/// thread-safe; an `indicatif` bar's `inc(1)` is the intended shape.
pub fn run_with_progress<F>(
    spec: &SimulationSpec,
    on_replayed: F,
) -> Result<SimulationReport, ParameterError>
where
    F: Fn() + Sync,
{
    spec.validate()?;
    let scale = spec.scale();
    debug!(
        rounds = spec.rounds,
        loss_rounds = spec.loss_rounds,
        policy = spec.policy.name(),
        planned = ?scale.planned,
        "starting exhaustive replay sweep"
    );

    let policy = spec.policy.build();
    let replayer = ArrangementReplayer::new(
        &*policy,
        BetTerms {
            rounds: spec.rounds,
            odds: spec.odds,
        },
        spec.owner,
    );
    let track_owner = spec.owner.is_some();
    let cap = spec
        .max_arrangements
        .map_or(usize::MAX, |cap| usize::try_from(cap).unwrap_or(usize::MAX));
    let on_replayed = &on_replayed;

    let aggregator = ArrangementEnumerator::new(spec.rounds, spec.loss_rounds)
        .take(cap)
        .par_bridge()
        .fold(
            || Aggregator::new(track_owner),
            |mut agg, arrangement| {
                agg.push(&replayer.replay(&arrangement));
                on_replayed();
                agg
            },
        )
        .reduce(|| Aggregator::new(track_owner), Aggregator::merge);

    let replayed = aggregator.replayed();
    let truncated = scale
        .planned
        .map_or(true, |planned| u128::from(replayed) < planned);
    info!(replayed, truncated, "replay sweep complete");

    Ok(SimulationReport {
        planned: scale.planned,
        replayed,
        truncated,
        aggregate: aggregator.finish(),
    })
}
