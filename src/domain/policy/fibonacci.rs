//! Fibonacci staking progression.

use rust_decimal::Decimal;

use crate::domain::money::Money;
use crate::domain::round::{RoundOutcome, StakeState};

use super::StakingPolicy;

/// Fibonacci ladder: the first loss of a streak doubles the stake, every
/// further loss stakes the sum of the previous two stakes, and any win
/// restarts from the initial stake.
///
/// From an initial stake of 100 the losing ladder runs
/// 100, 200, 300, 500, 800, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FibonacciPolicy {
    initial: Money,
}

impl FibonacciPolicy {
    #[must_use]
    pub const fn new(initial: Money) -> Self {
        Self { initial }
    }
}

impl StakingPolicy for FibonacciPolicy {
    fn name(&self) -> &'static str {
        "fibonacci"
    }

    fn opening(&self) -> StakeState {
        StakeState::opening(self.initial)
    }

    fn next(&self, state: StakeState, outcome: RoundOutcome) -> StakeState {
        match outcome {
            RoundOutcome::Win => self.opening(),
            RoundOutcome::Loss => {
                // previous == 0 marks the first loss of a streak.
                let current = if state.previous.is_zero() {
                    state.current * Decimal::TWO
                } else {
                    state.current + state.previous
                };
                StakeState {
                    current,
                    previous: state.current,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn lose(policy: &FibonacciPolicy, state: StakeState) -> StakeState {
        policy.next(state, RoundOutcome::Loss)
    }

    #[test]
    fn losing_ladder_follows_fibonacci_sums() {
        let policy = FibonacciPolicy::new(dec!(100));
        let mut state = policy.opening();
        let mut ladder = vec![state.current];

        for _ in 0..4 {
            state = lose(&policy, state);
            ladder.push(state.current);
        }

        assert_eq!(
            ladder,
            vec![dec!(100), dec!(200), dec!(300), dec!(500), dec!(800)],
        );
    }

    #[test]
    fn win_restarts_the_ladder() {
        let policy = FibonacciPolicy::new(dec!(100));
        let grown = lose(&policy, lose(&policy, policy.opening()));
        assert_eq!(grown.current, dec!(300));

        let reset = policy.next(grown, RoundOutcome::Win);

        assert_eq!(reset, policy.opening());
        // The streak marker is cleared, so the next loss doubles again.
        assert_eq!(lose(&policy, reset).current, dec!(200));
    }

    #[test]
    fn previous_stake_trails_by_one_step() {
        let policy = FibonacciPolicy::new(dec!(10));
        let first = lose(&policy, policy.opening());
        let second = lose(&policy, first);

        assert_eq!(first.previous, dec!(10));
        assert_eq!(second.previous, dec!(20));
        assert_eq!(second.current, dec!(30));
    }
}
