//! Monetary types for stake and odds representation.

use rust_decimal::Decimal;

/// Money amount (stake, profit, income) represented as a Decimal for precision.
pub type Money = Decimal;

/// Decimal payout odds quoted on a wager (total return per unit staked).
pub type Odds = Decimal;

/// A fraction in [0, 1], e.g. the shop's commission share of turnover.
pub type Rate = Decimal;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn stake_times_odds_is_exact() {
        let stake: Money = dec!(100);
        let odds: Odds = dec!(1.35);

        assert_eq!(stake * odds - stake, dec!(35.00));
    }
}
