//! Exact value distributions over replayed arrangements.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::ser::{Serialize, Serializer};

use super::money::{Money, Rate};

/// Histogram of exact Decimal outcomes. Keys compare by numeric value, so
/// `35` and `35.00` land in the same bucket; iteration is ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
    buckets: BTreeMap<Money, u64>,
    total: u64,
}

impl Distribution {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of `value`.
    pub fn record(&mut self, value: Money) {
        *self.buckets.entry(value.normalize()).or_insert(0) += 1;
        self.total += 1;
    }

    /// Absorbs another distribution's counts.
    pub fn merge(&mut self, other: Self) {
        for (value, count) in other.buckets {
            *self.buckets.entry(value).or_insert(0) += count;
        }
        self.total += other.total;
    }

    /// Number of recorded occurrences across all buckets.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct outcome values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (Money, u64)> + '_ {
        self.buckets.iter().map(|(value, count)| (*value, *count))
    }

    /// Probability of one bucket's count against the recorded total.
    #[must_use]
    pub fn probability(&self, count: u64) -> Rate {
        if self.total == 0 {
            Decimal::ZERO
        } else {
            Decimal::from(count) / Decimal::from(self.total)
        }
    }

    /// Combined probability mass of every bucket whose value satisfies
    /// `pred`.
    pub fn mass_where(&self, pred: impl Fn(Money) -> bool) -> Rate {
        let hits: u64 = self
            .buckets
            .iter()
            .filter(|(value, _)| pred(**value))
            .map(|(_, count)| count)
            .sum();
        self.probability(hits)
    }

    /// Sum of all recorded values.
    #[must_use]
    pub fn sum(&self) -> Money {
        self.buckets
            .iter()
            .map(|(value, count)| *value * Decimal::from(*count))
            .sum()
    }

    /// Mean of all recorded values, zero when nothing was recorded.
    #[must_use]
    pub fn mean(&self) -> Money {
        if self.total == 0 {
            Decimal::ZERO
        } else {
            self.sum() / Decimal::from(self.total)
        }
    }
}

/// Serializes as the bucket list reports want, ascending by value.
impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct Bucket {
            value: Decimal,
            count: u64,
            probability: Decimal,
        }
        serializer.collect_seq(self.iter().map(|(value, count)| Bucket {
            value,
            count,
            probability: self.probability(count),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn equal_values_share_a_bucket_across_scales() {
        let mut dist = Distribution::new();
        dist.record(dec!(5.00));
        dist.record(dec!(5));
        dist.record(dec!(-30));

        assert_eq!(dist.len(), 2);
        assert_eq!(dist.total(), 3);
        assert_eq!(
            dist.iter().collect::<Vec<_>>(),
            vec![(dec!(-30), 1), (dec!(5), 2)],
        );
    }

    #[test]
    fn probabilities_sum_to_one() {
        let mut dist = Distribution::new();
        for value in [dec!(5), dec!(5), dec!(-30)] {
            dist.record(value);
        }

        let mass: Decimal = dist.iter().map(|(_, c)| dist.probability(c)).sum();
        assert!((mass - Decimal::ONE).abs() < dec!(0.000000000000000000000001));
    }

    #[test]
    fn win_and_loss_mass_split_at_zero() {
        let mut dist = Distribution::new();
        for value in [dec!(5), dec!(5), dec!(-30), dec!(0)] {
            dist.record(value);
        }

        assert_eq!(dist.mass_where(|v| v > Decimal::ZERO), dec!(0.5));
        assert_eq!(dist.mass_where(|v| v <= Decimal::ZERO), dec!(0.5));
    }

    #[test]
    fn sum_and_mean_weight_by_count() {
        let mut dist = Distribution::new();
        for value in [dec!(5), dec!(5), dec!(-30)] {
            dist.record(value);
        }

        assert_eq!(dist.sum(), dec!(-20));
        assert_eq!(dist.mean().round_dp(10), dec!(-6.6666666667));
    }

    #[test]
    fn merge_combines_counts() {
        let mut left = Distribution::new();
        left.record(dec!(1));
        left.record(dec!(2));
        let mut right = Distribution::new();
        right.record(dec!(2));

        left.merge(right);

        assert_eq!(left.total(), 3);
        assert_eq!(
            left.iter().collect::<Vec<_>>(),
            vec![(dec!(1), 1), (dec!(2), 2)],
        );
    }

    #[test]
    fn empty_distribution_is_all_zeroes() {
        let dist = Distribution::new();

        assert!(dist.is_empty());
        assert_eq!(dist.mean(), Decimal::ZERO);
        assert_eq!(dist.mass_where(|_| true), Decimal::ZERO);
    }

    #[test]
    fn serializes_as_bucket_rows() {
        let mut dist = Distribution::new();
        for value in [dec!(5), dec!(5), dec!(-30), dec!(-30)] {
            dist.record(value);
        }

        let json = serde_json::to_value(&dist).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                { "value": "-30", "count": 2, "probability": "0.5" },
                { "value": "5", "count": 2, "probability": "0.5" },
            ]),
        );
    }
}
