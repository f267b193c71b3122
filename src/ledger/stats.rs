//! Shop statistics over a ledger.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::Money;

use super::record::{PlayType, WagerRecord};
use super::store::RecordStore;

/// Totals for one play type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlayTypeStats {
    pub records: u64,
    pub wins: u64,
    pub staked: Money,
    pub bettor_profit: Money,
    pub owner_profit: Money,
}

impl PlayTypeStats {
    fn absorb(&mut self, record: &WagerRecord) {
        let settlement = record.settle();
        self.records += 1;
        if record.won {
            self.wins += 1;
        }
        self.staked += record.total_staked();
        self.bettor_profit += settlement.bettor;
        self.owner_profit += settlement.owner;
    }

    /// Fraction of records that won, `None` when nothing was played.
    #[must_use]
    pub fn win_rate(&self) -> Option<f64> {
        if self.records == 0 {
            None
        } else {
            Some(self.wins as f64 / self.records as f64)
        }
    }
}

/// Whole-book totals with a per-play-type breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub records: u64,
    /// Heads across all groups.
    pub bettors: u64,
    pub staked: Money,
    pub bettor_profit: Money,
    pub owner_profit: Money,
    pub parlay: PlayTypeStats,
    pub total_goals: PlayTypeStats,
}

impl LedgerSummary {
    /// Settles every record in `store` and totals the movements.
    #[must_use]
    pub fn of(store: &RecordStore) -> Self {
        let mut summary = Self::default();
        for record in store.iter() {
            let settlement = record.settle();
            summary.records += 1;
            summary.bettors += u64::from(record.bettor_count);
            summary.staked += record.total_staked();
            summary.bettor_profit += settlement.bettor;
            summary.owner_profit += settlement.owner;
            match record.play_type {
                PlayType::Parlay => summary.parlay.absorb(record),
                PlayType::TotalGoals => summary.total_goals.absorb(record),
            }
        }
        summary
    }

    /// Average profit per head across the whole book.
    #[must_use]
    pub fn per_bettor_profit(&self) -> Money {
        if self.bettors == 0 {
            Decimal::ZERO
        } else {
            self.bettor_profit / Decimal::from(self.bettors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn seeded_store() -> RecordStore {
        let mut store = RecordStore::new();
        store
            .upsert(WagerRecord {
                date: NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
                group: "group-a".into(),
                play_type: PlayType::Parlay,
                stake: dec!(100),
                quoted_odds: dec!(1.35),
                payout_odds: dec!(1.5),
                commission_rate: dec!(0.05),
                won: true,
                bettor_count: 4,
            })
            .unwrap();
        store
            .upsert(WagerRecord {
                date: NaiveDate::from_ymd_opt(2024, 3, 19).unwrap(),
                group: "group-b".into(),
                play_type: PlayType::TotalGoals,
                stake: dec!(50),
                quoted_odds: dec!(1.8),
                payout_odds: dec!(2.0),
                commission_rate: dec!(0.05),
                won: false,
                bettor_count: 2,
            })
            .unwrap();
        store
    }

    #[test]
    fn summary_totals_both_sides_of_the_book() {
        let summary = LedgerSummary::of(&seeded_store());

        assert_eq!(summary.records, 2);
        assert_eq!(summary.bettors, 6);
        assert_eq!(summary.staked, dec!(500));
        // Parlay win pays 140 out, total-goals loss takes 100 in.
        assert_eq!(summary.bettor_profit, dec!(40));
        assert_eq!(summary.owner_profit, dec!(85.00));
    }

    #[test]
    fn play_types_are_split() {
        let summary = LedgerSummary::of(&seeded_store());

        assert_eq!(summary.parlay.records, 1);
        assert_eq!(summary.parlay.win_rate(), Some(1.0));
        assert_eq!(summary.total_goals.win_rate(), Some(0.0));
        assert_eq!(summary.total_goals.bettor_profit, dec!(-100));
    }

    #[test]
    fn empty_book_has_no_win_rate() {
        let summary = LedgerSummary::of(&RecordStore::new());

        assert_eq!(summary.parlay.win_rate(), None);
        assert_eq!(summary.per_bettor_profit(), Decimal::ZERO);
    }

    #[test]
    fn per_bettor_profit_averages_across_heads() {
        let summary = LedgerSummary::of(&seeded_store());

        assert_eq!(summary.per_bettor_profit().round_dp(4), dec!(6.6667));
    }
}
