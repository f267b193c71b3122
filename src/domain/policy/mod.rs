//! Staking policy abstraction.
//!
//! A policy decides how much to wager on the next round given what just
//! settled. Two progressions are supported:
//!
//! - **Fibonacci**: double on the first loss of a streak, then stake the sum
//!   of the previous two stakes; any win restarts the ladder.
//! - **Multiplier**: multiply the stake by a fixed factor on every loss; any
//!   win restarts the ladder.
//!
//! Policies are pure state machines over [`StakeState`], so a replay can
//! step them without shared mutability and the same policy value can be
//! used from many threads.

pub mod fibonacci;
pub mod multiplier;

pub use fibonacci::FibonacciPolicy;
pub use multiplier::MultiplierPolicy;

use rust_decimal::Decimal;

use super::money::Money;
use super::round::{RoundOutcome, StakeState};

/// A staking progression stepped once per settled round.
pub trait StakingPolicy: Send + Sync {
    /// Unique identifier for this policy.
    ///
    /// Used in configuration and logging.
    fn name(&self) -> &'static str;

    /// State at the start of a campaign or right after a winning round.
    fn opening(&self) -> StakeState;

    /// State for the next round, given the state that was riding on the
    /// round that just settled with `outcome`.
    fn next(&self, state: StakeState, outcome: RoundOutcome) -> StakeState;
}

/// Declarative description of a policy, as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySpec {
    Fibonacci { initial: Money },
    Multiplier { initial: Money, factor: Decimal },
}

impl PolicySpec {
    /// Instantiates the policy this spec describes.
    #[must_use]
    pub fn build(&self) -> Box<dyn StakingPolicy> {
        match *self {
            Self::Fibonacci { initial } => Box::new(FibonacciPolicy::new(initial)),
            Self::Multiplier { initial, factor } => {
                Box::new(MultiplierPolicy::new(initial, factor))
            }
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Fibonacci { .. } => "fibonacci",
            Self::Multiplier { .. } => "multiplier",
        }
    }

    /// Stake wagered on the opening round.
    #[must_use]
    pub const fn initial_stake(&self) -> Money {
        match *self {
            Self::Fibonacci { initial } | Self::Multiplier { initial, .. } => initial,
        }
    }
}

/// Stakes riding through `losses` consecutive losing rounds, starting at the
/// opening stake. Derived by stepping the policy itself, so the preview can
/// never disagree with a replay.
#[must_use]
pub fn stake_ladder(policy: &dyn StakingPolicy, losses: u32) -> Vec<Money> {
    let mut ladder = Vec::with_capacity(losses as usize + 1);
    let mut state = policy.opening();
    ladder.push(state.current);
    for _ in 0..losses {
        state = policy.next(state, RoundOutcome::Loss);
        ladder.push(state.current);
    }
    ladder
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn spec_builds_matching_policy() {
        let fib = PolicySpec::Fibonacci { initial: dec!(10) };
        let mult = PolicySpec::Multiplier {
            initial: dec!(10),
            factor: dec!(3),
        };

        assert_eq!(fib.build().name(), "fibonacci");
        assert_eq!(mult.build().name(), "multiplier");
        assert_eq!(fib.initial_stake(), dec!(10));
    }

    #[test]
    fn built_policy_opens_at_initial_stake() {
        let policy = PolicySpec::Fibonacci { initial: dec!(25) }.build();

        assert_eq!(policy.opening(), StakeState::opening(dec!(25)));
    }

    #[test]
    fn ladder_walks_the_losing_progression() {
        let fib = PolicySpec::Fibonacci { initial: dec!(100) }.build();
        let mult = PolicySpec::Multiplier {
            initial: dec!(50),
            factor: dec!(2),
        }
        .build();

        assert_eq!(
            stake_ladder(&*fib, 4),
            vec![dec!(100), dec!(200), dec!(300), dec!(500), dec!(800)],
        );
        assert_eq!(
            stake_ladder(&*mult, 3),
            vec![dec!(50), dec!(100), dec!(200), dec!(400)],
        );
        assert_eq!(stake_ladder(&*fib, 0), vec![dec!(100)]);
    }
}
