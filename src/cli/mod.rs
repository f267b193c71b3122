//! Operator-facing command definitions.

pub mod ladder;
pub mod ledger;
pub mod output;
pub mod simulate;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::domain::policy::PolicySpec;
use crate::ledger::PlayType;

/// Stakesim - exhaustive staking-plan risk analysis for betting shops.
#[derive(Parser, Debug)]
#[command(name = "stakesim")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay every loss arrangement of a staking plan
    Simulate(SimulateArgs),

    /// Preview the stakes a policy climbs through under straight losses
    Ladder(LadderArgs),

    /// Record and settle group wagers
    #[command(subcommand)]
    Ledger(LedgerCommand),
}

/// Staking progression selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Double on the first loss, then stake the sum of the previous two
    Fibonacci,
    /// Multiply the stake by a fixed factor on every loss
    Multiplier,
}

impl PolicyArg {
    /// Pair the selector with its resolved opening stake and multiplier.
    #[must_use]
    pub fn to_spec(self, initial: Decimal, multiplier: Decimal) -> PolicySpec {
        match self {
            Self::Fibonacci => PolicySpec::Fibonacci { initial },
            Self::Multiplier => PolicySpec::Multiplier {
                initial,
                factor: multiplier,
            },
        }
    }
}

/// Play type selector for ledger records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayArg {
    /// Multi-leg parlay
    Parlay,
    /// Total-goals market
    TotalGoals,
}

impl From<PlayArg> for PlayType {
    fn from(play: PlayArg) -> Self {
        match play {
            PlayArg::Parlay => Self::Parlay,
            PlayArg::TotalGoals => Self::TotalGoals,
        }
    }
}

/// How a recorded wager settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum WagerResult {
    Won,
    Lost,
}

impl WagerResult {
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Arguments for the `simulate` subcommand.
#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Betting rounds in the campaign
    #[arg(short = 'n', long)]
    pub rounds: u32,

    /// Exact number of losing rounds
    #[arg(short = 'k', long)]
    pub loss_rounds: u32,

    /// Decimal odds quoted to the punter [default: from config]
    #[arg(long)]
    pub odds: Option<Decimal>,

    /// Opening stake [default: from config]
    #[arg(long)]
    pub stake: Option<Decimal>,

    /// Staking progression to replay
    #[arg(long, value_enum, default_value = "fibonacci")]
    pub policy: PolicyArg,

    /// Loss multiplier for the multiplier policy [default: from config]
    #[arg(long)]
    pub multiplier: Option<Decimal>,

    /// Odds the shop itself is paid at; enables shop income tracking
    #[arg(long)]
    pub actual_odds: Option<Decimal>,

    /// Shop commission rate [default: from config]
    #[arg(long, requires = "actual_odds")]
    pub commission: Option<Decimal>,

    /// Stop after this many arrangements
    #[arg(long)]
    pub max_arrangements: Option<u64>,

    /// Skip the safety-threshold confirmation prompt
    #[arg(long)]
    pub yes: bool,

    /// Print the report as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `ladder` subcommand.
#[derive(Parser, Debug)]
pub struct LadderArgs {
    /// Staking progression to preview
    #[arg(long, value_enum, default_value = "fibonacci")]
    pub policy: PolicyArg,

    /// Opening stake [default: from config]
    #[arg(long)]
    pub stake: Option<Decimal>,

    /// Loss multiplier for the multiplier policy [default: from config]
    #[arg(long)]
    pub multiplier: Option<Decimal>,

    /// Consecutive losses to walk the ladder through
    #[arg(short = 'k', long, default_value = "10")]
    pub losses: u32,
}

/// Subcommands for `stakesim ledger`.
#[derive(Subcommand, Debug)]
pub enum LedgerCommand {
    /// Record a settled group wager (re-entering a date/group replaces it)
    Add(LedgerAddArgs),
    /// List recorded wagers in date order
    List(LedgerPathArgs),
    /// Settle every record and print book totals
    Summary(LedgerSummaryArgs),
    /// Drop the record for one date and group
    Remove(LedgerRemoveArgs),
}

/// Shared argument for ledger commands that only need the records file.
#[derive(Parser, Debug)]
pub struct LedgerPathArgs {
    /// Path to the ledger records file [default: from config]
    #[arg(long)]
    pub ledger: Option<PathBuf>,
}

/// Arguments for the `ledger add` subcommand.
#[derive(Parser, Debug)]
pub struct LedgerAddArgs {
    /// Path to the ledger records file [default: from config]
    #[arg(long)]
    pub ledger: Option<PathBuf>,

    /// Settlement date (YYYY-MM-DD) [default: today]
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Group the wager was placed for
    #[arg(long)]
    pub group: String,

    /// Stake per bettor
    #[arg(long)]
    pub stake: Decimal,

    /// How the wager was played
    #[arg(long, value_enum)]
    pub play: PlayArg,

    /// Odds quoted to the bettors
    #[arg(long)]
    pub odds: Decimal,

    /// Odds the shop itself is paid at
    #[arg(long)]
    pub payout_odds: Decimal,

    /// Shop commission rate [default: from config]
    #[arg(long)]
    pub commission: Option<Decimal>,

    /// How the wager settled
    #[arg(long, value_enum)]
    pub result: WagerResult,

    /// Bettors in the group, all on identical terms
    #[arg(long, default_value = "1")]
    pub bettors: u32,
}

/// Arguments for the `ledger summary` subcommand.
#[derive(Parser, Debug)]
pub struct LedgerSummaryArgs {
    /// Path to the ledger records file [default: from config]
    #[arg(long)]
    pub ledger: Option<PathBuf>,

    /// Print the summary as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `ledger remove` subcommand.
#[derive(Parser, Debug)]
pub struct LedgerRemoveArgs {
    /// Path to the ledger records file [default: from config]
    #[arg(long)]
    pub ledger: Option<PathBuf>,

    /// Settlement date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// Group whose record should go
    #[arg(long)]
    pub group: String,
}
