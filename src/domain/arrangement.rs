//! Lazy enumeration of loss-round arrangements.
//!
//! A campaign of `rounds` betting rounds with exactly `losses` losing rounds
//! is described by the set of round indices that lose. Enumeration walks all
//! C(rounds, losses) subsets in lexicographic order without materialising
//! them up front, so huge campaigns can still be streamed and truncated.

use super::round::RoundIndex;

/// One placement of losing rounds within a campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrangement {
    /// Strictly ascending loss-round indices.
    losses: Vec<RoundIndex>,
}

impl Arrangement {
    /// Builds an arrangement from arbitrary loss indices. Duplicates are
    /// collapsed and the order normalised.
    #[must_use]
    pub fn new(mut losses: Vec<RoundIndex>) -> Self {
        losses.sort_unstable();
        losses.dedup();
        Self { losses }
    }

    #[must_use]
    pub fn losses(&self) -> &[RoundIndex] {
        &self.losses
    }

    #[must_use]
    pub fn loss_count(&self) -> u32 {
        self.losses.len() as u32
    }

    /// Whether `round` is one of the losing rounds.
    #[must_use]
    pub fn contains(&self, round: RoundIndex) -> bool {
        self.losses.binary_search(&round).is_ok()
    }
}

/// Iterator over every arrangement of `losses` losing rounds in `rounds`
/// rounds, in lexicographic order of the loss-index vector.
#[derive(Debug)]
pub struct ArrangementEnumerator {
    rounds: u32,
    losses: u32,
    /// Next combination to yield, or `None` once exhausted.
    next: Option<Vec<RoundIndex>>,
}

impl ArrangementEnumerator {
    /// Creates the enumerator. `losses > rounds` yields an empty iterator.
    #[must_use]
    pub fn new(rounds: u32, losses: u32) -> Self {
        let next = if losses <= rounds {
            Some((0..losses).collect())
        } else {
            None
        };
        Self {
            rounds,
            losses,
            next,
        }
    }

    /// Number of arrangements this enumerator will yield, or `None` if the
    /// count does not fit in a `u128`.
    #[must_use]
    pub fn planned(&self) -> Option<u128> {
        binomial(self.rounds, self.losses)
    }
}

impl Iterator for ArrangementEnumerator {
    type Item = Arrangement;

    fn next(&mut self) -> Option<Self::Item> {
        let (rounds, losses) = (self.rounds, self.losses);
        let combo = self.next.as_mut()?;
        let current = combo.clone();
        if combo.is_empty() || !advance(rounds, losses, combo) {
            self.next = None;
        }
        Some(Arrangement { losses: current })
    }
}

/// Advances `combo` to its lexicographic successor in place. Returns `false`
/// when `combo` was the final combination.
fn advance(rounds: u32, losses: u32, combo: &mut [RoundIndex]) -> bool {
    let k = combo.len();
    // Rightmost position that can still move up.
    let Some(i) = (0..k).rfind(|&i| combo[i] < rounds - losses + i as u32) else {
        return false;
    };
    combo[i] += 1;
    for j in i + 1..k {
        combo[j] = combo[j - 1] + 1;
    }
    true
}

/// Checked binomial coefficient C(n, k) in `u128`.
///
/// Multiplies incrementally so intermediate values stay exact; every division
/// in the loop is exact because each prefix is itself a binomial coefficient.
#[must_use]
pub fn binomial(n: u32, k: u32) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..u128::from(k) {
        result = result.checked_mul(u128::from(n) - i)? / (i + 1);
    }
    Some(result)
}
