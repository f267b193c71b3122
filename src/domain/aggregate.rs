//! Folding arrangement results into distributions and summary statistics.

use rust_decimal::Decimal;
use serde::Serialize;

use super::distribution::Distribution;
use super::money::{Money, Rate};
use super::replay::ArrangementResult;

/// Shop-side income distributions, kept only when owner terms were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OwnerDistributions {
    pub commission: Distribution,
    pub odds_difference: Distribution,
    pub total: Distribution,
}

/// Scalar figures derived from a finished aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    /// Arrangements actually replayed.
    pub replayed: u64,
    /// Probability mass of arrangements with positive punter profit.
    pub win_mass: Rate,
    /// Probability mass of arrangements with zero or negative profit.
    pub loss_mass: Rate,
    pub mean_profit: Money,
    pub profit_sum: Money,
    pub worst_drawdown: Money,
    pub mean_drawdown: Money,
    pub worst_peak_stake: Money,
}

/// Finished aggregation over every replayed arrangement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    pub profit: Distribution,
    pub wagered: Distribution,
    pub prize: Distribution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerDistributions>,
    pub summary: SummaryStats,
}

/// Accumulates arrangement results and merges pairwise, so each worker can
/// fold privately and the partial aggregates reduce without locks.
#[derive(Debug, Clone)]
pub struct Aggregator {
    profit: Distribution,
    wagered: Distribution,
    prize: Distribution,
    owner: Option<OwnerDistributions>,
    drawdown_sum: Money,
    worst_drawdown: Money,
    worst_peak_stake: Money,
}

impl Aggregator {
    /// `track_owner` decides whether owner income distributions are kept.
    #[must_use]
    pub fn new(track_owner: bool) -> Self {
        Self {
            profit: Distribution::new(),
            wagered: Distribution::new(),
            prize: Distribution::new(),
            owner: track_owner.then(OwnerDistributions::default),
            drawdown_sum: Decimal::ZERO,
            worst_drawdown: Decimal::ZERO,
            worst_peak_stake: Decimal::ZERO,
        }
    }

    /// Folds one replayed arrangement in.
    pub fn push(&mut self, result: &ArrangementResult) {
        self.profit.record(result.total_profit);
        self.wagered.record(result.total_wagered);
        self.prize.record(result.total_prize);
        if let (Some(dists), Some(income)) = (self.owner.as_mut(), result.owner.as_ref()) {
            dists.commission.record(income.commission);
            dists.odds_difference.record(income.odds_difference);
            dists.total.record(income.total);
        }
        self.drawdown_sum += result.max_drawdown;
        self.worst_drawdown = self.worst_drawdown.max(result.max_drawdown);
        self.worst_peak_stake = self.worst_peak_stake.max(result.peak_stake);
    }

    /// Combines two partial aggregations.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.profit.merge(other.profit);
        self.wagered.merge(other.wagered);
        self.prize.merge(other.prize);
        if let (Some(dists), Some(other_dists)) = (self.owner.as_mut(), other.owner) {
            dists.commission.merge(other_dists.commission);
            dists.odds_difference.merge(other_dists.odds_difference);
            dists.total.merge(other_dists.total);
        }
        self.drawdown_sum += other.drawdown_sum;
        self.worst_drawdown = self.worst_drawdown.max(other.worst_drawdown);
        self.worst_peak_stake = self.worst_peak_stake.max(other.worst_peak_stake);
        self
    }

    /// Arrangements folded in so far.
    #[must_use]
    pub fn replayed(&self) -> u64 {
        self.profit.total()
    }

    /// Closes the aggregation and derives the summary scalars.
    #[must_use]
    pub fn finish(self) -> Aggregate {
        let replayed = self.profit.total();
        let mean_drawdown = if replayed == 0 {
            Decimal::ZERO
        } else {
            self.drawdown_sum / Decimal::from(replayed)
        };
        let summary = SummaryStats {
            replayed,
            win_mass: self.profit.mass_where(|v| v > Decimal::ZERO),
            loss_mass: self.profit.mass_where(|v| v <= Decimal::ZERO),
            mean_profit: self.profit.mean(),
            profit_sum: self.profit.sum(),
            worst_drawdown: self.worst_drawdown,
            mean_drawdown,
            worst_peak_stake: self.worst_peak_stake,
        };
        Aggregate {
            profit: self.profit,
            wagered: self.wagered,
            prize: self.prize,
            owner: self.owner,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::arrangement::Arrangement;
    use crate::domain::policy::{FibonacciPolicy, StakingPolicy};
    use crate::domain::replay::{ArrangementReplayer, BetTerms, OwnerTerms};
    use rust_decimal_macros::dec;

    fn replay_all(terms: BetTerms, owner: Option<OwnerTerms>) -> Aggregator {
        let policy = FibonacciPolicy::new(dec!(100));
        let replayer = ArrangementReplayer::new(&policy as &dyn StakingPolicy, terms, owner);
        let mut agg = Aggregator::new(owner.is_some());
        for loss in 0..terms.rounds {
            agg.push(&replayer.replay(&Arrangement::new(vec![loss])));
        }
        agg
    }

    fn three_round_terms() -> BetTerms {
        BetTerms {
            rounds: 3,
            odds: dec!(1.35),
        }
    }

    #[test]
    fn fibonacci_single_loss_profit_distribution() {
        let aggregate = replay_all(three_round_terms(), None).finish();

        assert_eq!(
            aggregate.profit.iter().collect::<Vec<_>>(),
            vec![(dec!(-30), 1), (dec!(5), 2)],
        );
        assert_eq!(aggregate.summary.replayed, 3);
    }

    #[test]
    fn win_and_loss_mass_cover_everything() {
        let summary = replay_all(three_round_terms(), None).finish().summary;

        assert_eq!(summary.win_mass + summary.loss_mass, Decimal::ONE);
        assert_eq!(summary.profit_sum, dec!(-20));
    }

    #[test]
    fn owner_distributions_only_when_requested() {
        let without = replay_all(three_round_terms(), None).finish();
        let with = replay_all(
            three_round_terms(),
            Some(OwnerTerms {
                commission_rate: dec!(0.05),
                actual_odds: dec!(1.5),
            }),
        )
        .finish();

        assert!(without.owner.is_none());
        let owner = with.owner.unwrap();
        assert_eq!(owner.commission.total(), 3);
        // Every single-loss arrangement wagers 400 at 5% commission.
        assert_eq!(owner.commission.iter().collect::<Vec<_>>(), vec![(dec!(20), 3)]);
    }

    #[test]
    fn merge_equals_sequential_fold() {
        let policy = FibonacciPolicy::new(dec!(100));
        let replayer =
            ArrangementReplayer::new(&policy as &dyn StakingPolicy, three_round_terms(), None);
        let results: Vec<_> = (0..3)
            .map(|loss| replayer.replay(&Arrangement::new(vec![loss])))
            .collect();

        let mut sequential = Aggregator::new(false);
        for result in &results {
            sequential.push(result);
        }

        let mut left = Aggregator::new(false);
        left.push(&results[0]);
        let mut right = Aggregator::new(false);
        right.push(&results[1]);
        right.push(&results[2]);

        assert_eq!(left.merge(right).finish(), sequential.finish());
    }

    #[test]
    fn risk_figures_track_worst_case() {
        let policy = FibonacciPolicy::new(dec!(100));
        let replayer =
            ArrangementReplayer::new(&policy as &dyn StakingPolicy, three_round_terms(), None);
        let mut agg = Aggregator::new(false);
        // Opening double loss runs the profit down to -300 on a 300 stake;
        // a lone final loss never dips more than 100.
        agg.push(&replayer.replay(&Arrangement::new(vec![0, 1])));
        agg.push(&replayer.replay(&Arrangement::new(vec![2])));

        let summary = agg.finish().summary;

        assert_eq!(summary.worst_drawdown, dec!(300));
        assert_eq!(summary.mean_drawdown, dec!(200));
        assert_eq!(summary.worst_peak_stake, dec!(300));
    }

    #[test]
    fn empty_aggregation_finishes_clean() {
        let aggregate = Aggregator::new(false).finish();

        assert_eq!(aggregate.summary.replayed, 0);
        assert_eq!(aggregate.summary.mean_profit, Decimal::ZERO);
        assert_eq!(aggregate.summary.mean_drawdown, Decimal::ZERO);
    }
}
