//! Deterministic replay of one loss arrangement.
//!
//! Replays all rounds of a campaign in index order against a fixed
//! arrangement of losing rounds, stepping the staking policy as each round
//! settles. Replays are pure: the same inputs always produce bit-identical
//! results, which is what makes the exhaustive sweep aggregatable across
//! threads.

use rust_decimal::Decimal;

use super::arrangement::Arrangement;
use super::money::{Money, Odds, Rate};
use super::policy::StakingPolicy;
use super::round::{RoundOutcome, RoundResult};

/// Terms of the punter's bet, constant across a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetTerms {
    /// Number of betting rounds in the campaign.
    pub rounds: u32,
    /// Decimal odds quoted to the punter.
    pub odds: Odds,
}

/// Terms that determine the shop's side of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerTerms {
    /// Shop commission as a fraction of turnover.
    pub commission_rate: Rate,
    /// Odds the shop itself is paid at upstream.
    pub actual_odds: Odds,
}

/// Shop income for one replayed arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerIncome {
    pub commission: Money,
    pub odds_difference: Money,
    pub total: Money,
}

/// Everything one replay produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrangementResult {
    pub arrangement: Arrangement,
    /// Per-round settlement in round order.
    pub rounds: Vec<RoundResult>,
    /// Punter net profit over the whole campaign.
    pub total_profit: Money,
    /// Campaign turnover under the source accounting convention.
    pub total_wagered: Money,
    /// Gross prize money, `total_profit + total_wagered`.
    pub total_prize: Money,
    /// Present when owner terms were supplied.
    pub owner: Option<OwnerIncome>,
    /// Largest peak-to-trough drop of the running profit.
    pub max_drawdown: Money,
    /// Largest single stake that was riding on a round.
    pub peak_stake: Money,
}

/// Replays arrangements under fixed bet and owner terms.
pub struct ArrangementReplayer<'a> {
    policy: &'a dyn StakingPolicy,
    terms: BetTerms,
    owner: Option<OwnerTerms>,
}

impl<'a> ArrangementReplayer<'a> {
    #[must_use]
    pub fn new(
        policy: &'a dyn StakingPolicy,
        terms: BetTerms,
        owner: Option<OwnerTerms>,
    ) -> Self {
        Self {
            policy,
            terms,
            owner,
        }
    }

    /// Replays every round against `arrangement`.
    #[must_use]
    pub fn replay(&self, arrangement: &Arrangement) -> ArrangementResult {
        let mut state = self.policy.opening();
        let mut rounds = Vec::with_capacity(self.terms.rounds as usize);
        let mut total_profit = Decimal::ZERO;
        let mut total_wagered = Decimal::ZERO;
        let mut odds_difference = Decimal::ZERO;
        let mut peak_stake = Decimal::ZERO;
        let mut profit_peak = Decimal::ZERO;
        let mut max_drawdown = Decimal::ZERO;

        for round in 0..self.terms.rounds {
            let stake = state.current;
            debug_assert!(stake > Decimal::ZERO, "stake progression went non-positive");

            let (outcome, profit) = if arrangement.contains(round) {
                (RoundOutcome::Loss, -stake)
            } else {
                (RoundOutcome::Win, stake * self.terms.odds - stake)
            };
            state = self.policy.next(state, outcome);

            // Source convention: turnover accumulates the stake as it stands
            // after settlement, not the stake that was riding.
            total_wagered += state.current;
            total_profit += profit;

            if let Some(owner) = &self.owner {
                if profit > Decimal::ZERO {
                    odds_difference += profit * (owner.actual_odds - self.terms.odds);
                }
            }

            peak_stake = peak_stake.max(stake);
            profit_peak = profit_peak.max(total_profit);
            max_drawdown = max_drawdown.max(profit_peak - total_profit);

            rounds.push(RoundResult {
                round,
                won: outcome.is_win(),
                stake,
                profit,
            });
        }

        let owner = self.owner.as_ref().map(|terms| {
            let commission = total_wagered * terms.commission_rate;
            OwnerIncome {
                commission,
                odds_difference,
                total: commission + odds_difference,
            }
        });

        ArrangementResult {
            arrangement: arrangement.clone(),
            rounds,
            total_profit,
            total_wagered,
            total_prize: total_profit + total_wagered,
            owner,
            max_drawdown,
            peak_stake,
        }
    }
}
