//! Per-round primitives shared by policies, replay and reporting.

use rust_decimal::Decimal;

use super::money::Money;

/// Zero-based index of a betting round within a campaign.
pub type RoundIndex = u32;

/// Outcome of a single settled round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Win,
    Loss,
}

impl RoundOutcome {
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Win)
    }
}

/// Progression state carried between rounds by a staking policy.
///
/// `previous` doubles as a first-loss marker for the Fibonacci policy:
/// a fresh or just-reset state has `previous == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeState {
    /// Stake to wager on the next round.
    pub current: Money,
    /// Stake wagered one step earlier in the current losing streak.
    pub previous: Money,
}

impl StakeState {
    /// State at the start of a campaign, before any round settles.
    #[must_use]
    pub const fn opening(initial: Money) -> Self {
        Self {
            current: initial,
            previous: Decimal::ZERO,
        }
    }
}

/// What happened in one replayed round, for trace output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub round: RoundIndex,
    pub won: bool,
    /// Stake that was riding on this round.
    pub stake: Money,
    /// Punter profit settled this round (negative on a loss).
    pub profit: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn opening_state_has_no_previous_stake() {
        let state = StakeState::opening(dec!(100));

        assert_eq!(state.current, dec!(100));
        assert_eq!(state.previous, Decimal::ZERO);
    }

    #[test]
    fn outcome_win_flag() {
        assert!(RoundOutcome::Win.is_win());
        assert!(!RoundOutcome::Loss.is_win());
    }
}
