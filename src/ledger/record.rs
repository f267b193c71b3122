//! Wager records and per-record settlement.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Money, Odds, Rate};
use crate::error::LedgerError;

/// How a recorded wager was played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayType {
    Parlay,
    TotalGoals,
}

impl PlayType {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Parlay => "parlay",
            Self::TotalGoals => "total-goals",
        }
    }
}

impl fmt::Display for PlayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlayType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parlay" => Ok(Self::Parlay),
            "total-goals" | "total_goals" => Ok(Self::TotalGoals),
            other => Err(format!(
                "unknown play type '{other}', expected 'parlay' or 'total-goals'"
            )),
        }
    }
}

/// One settled group wager, keyed in the ledger by `(date, group)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagerRecord {
    pub date: NaiveDate,
    pub group: String,
    pub play_type: PlayType,
    /// Stake per bettor.
    pub stake: Money,
    /// Odds quoted to the bettors.
    pub quoted_odds: Odds,
    /// Odds the shop itself is paid at.
    pub payout_odds: Odds,
    pub commission_rate: Rate,
    pub won: bool,
    /// Bettors in the group, all on identical terms.
    pub bettor_count: u32,
}

/// Money movement a record settles to, bettor side and shop side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub bettor: Money,
    pub owner: Money,
}

impl WagerRecord {
    /// Rejects values the settlement arithmetic cannot give meaning to.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.group.trim().is_empty() {
            return Err(LedgerError::InvalidRecord {
                field: "group",
                reason: "must not be blank".into(),
            });
        }
        if self.stake <= Decimal::ZERO {
            return Err(LedgerError::InvalidRecord {
                field: "stake",
                reason: format!("must be positive, got {}", self.stake),
            });
        }
        if self.quoted_odds <= Decimal::ONE {
            return Err(LedgerError::InvalidRecord {
                field: "quoted_odds",
                reason: format!("must exceed 1, got {}", self.quoted_odds),
            });
        }
        if self.payout_odds <= Decimal::ONE {
            return Err(LedgerError::InvalidRecord {
                field: "payout_odds",
                reason: format!("must exceed 1, got {}", self.payout_odds),
            });
        }
        if self.commission_rate < Decimal::ZERO || self.commission_rate > Decimal::ONE {
            return Err(LedgerError::InvalidRecord {
                field: "commission_rate",
                reason: format!("must lie in [0, 1], got {}", self.commission_rate),
            });
        }
        if self.bettor_count == 0 {
            return Err(LedgerError::InvalidRecord {
                field: "bettor_count",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Total stake the group put down.
    #[must_use]
    pub fn total_staked(&self) -> Money {
        self.stake * Decimal::from(self.bettor_count)
    }

    /// Settles the record into bettor and shop profit.
    ///
    /// On a win the bettors collect at the quoted odds while the shop keeps
    /// the spread to the payout odds plus its commission; on a loss the
    /// stakes are gone and the shop keeps only the commission.
    #[must_use]
    pub fn settle(&self) -> Settlement {
        let heads = Decimal::from(self.bettor_count);
        if self.won {
            Settlement {
                bettor: (self.stake * self.quoted_odds - self.stake) * heads,
                owner: (self.stake * (self.payout_odds - self.quoted_odds)
                    + self.stake * self.commission_rate)
                    * heads,
            }
        } else {
            Settlement {
                bettor: -self.stake * heads,
                owner: self.stake * self.commission_rate * heads,
            }
        }
    }
}
