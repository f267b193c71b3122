//! Fixed-multiplier (martingale style) staking progression.

use rust_decimal::Decimal;

use crate::domain::money::Money;
use crate::domain::round::{RoundOutcome, StakeState};

use super::StakingPolicy;

/// Multiplies the stake by a fixed factor on every loss and restarts from
/// the initial stake on any win. A factor of 2 is the classic martingale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiplierPolicy {
    initial: Money,
    factor: Decimal,
}

impl MultiplierPolicy {
    #[must_use]
    pub const fn new(initial: Money, factor: Decimal) -> Self {
        Self { initial, factor }
    }
}

impl StakingPolicy for MultiplierPolicy {
    fn name(&self) -> &'static str {
        "multiplier"
    }

    fn opening(&self) -> StakeState {
        StakeState::opening(self.initial)
    }

    fn next(&self, state: StakeState, outcome: RoundOutcome) -> StakeState {
        match outcome {
            RoundOutcome::Win => self.opening(),
            RoundOutcome::Loss => StakeState {
                current: state.current * self.factor,
                previous: state.current,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn losing_ladder_is_geometric() {
        let policy = MultiplierPolicy::new(dec!(50), dec!(2));
        let mut state = policy.opening();
        let mut ladder = vec![state.current];

        for _ in 0..3 {
            state = policy.next(state, RoundOutcome::Loss);
            ladder.push(state.current);
        }

        assert_eq!(ladder, vec![dec!(50), dec!(100), dec!(200), dec!(400)]);
    }

    #[test]
    fn fractional_factor_stays_exact() {
        let policy = MultiplierPolicy::new(dec!(100), dec!(1.5));
        let grown = policy.next(policy.opening(), RoundOutcome::Loss);

        assert_eq!(grown.current, dec!(150.0));
    }

    #[test]
    fn win_restarts_the_ladder() {
        let policy = MultiplierPolicy::new(dec!(50), dec!(3));
        let grown = policy.next(policy.opening(), RoundOutcome::Loss);
        assert_eq!(grown.current, dec!(150));

        assert_eq!(policy.next(grown, RoundOutcome::Win), policy.opening());
    }
}
