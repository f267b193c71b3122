//! Handlers for the `ledger` command group.

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tabled::{Table, Tabled};

use crate::cli::{
    output, LedgerAddArgs, LedgerCommand, LedgerPathArgs, LedgerRemoveArgs, LedgerSummaryArgs,
};
use crate::config::Config;
use crate::error::Result;
use crate::ledger::{LedgerSummary, PlayTypeStats, RecordStore, WagerRecord};

/// Dispatch one `ledger` subcommand.
pub fn execute(command: &LedgerCommand, config: &Config) -> Result<()> {
    match command {
        LedgerCommand::Add(args) => add(args, config),
        LedgerCommand::List(args) => list(args, config),
        LedgerCommand::Summary(args) => summary(args, config),
        LedgerCommand::Remove(args) => remove(args, config),
    }
}

fn records_path(flag: &Option<PathBuf>, config: &Config) -> PathBuf {
    flag.clone().unwrap_or_else(|| config.ledger.path.clone())
}

fn add(args: &LedgerAddArgs, config: &Config) -> Result<()> {
    let path = records_path(&args.ledger, config);
    let record = WagerRecord {
        date: args.date.unwrap_or_else(|| Utc::now().date_naive()),
        group: args.group.clone(),
        play_type: args.play.into(),
        stake: args.stake,
        quoted_odds: args.odds,
        payout_odds: args.payout_odds,
        commission_rate: args.commission.unwrap_or(config.ledger.default_commission),
        won: args.result.is_win(),
        bettor_count: args.bettors,
    };

    let mut store = RecordStore::load(&path)?;
    let replaced = store.upsert(record.clone())?;
    store.save(&path)?;

    if replaced.is_some() {
        output::warn(&format!(
            "replaced the earlier record for {} / {}",
            record.date, record.group,
        ));
    }
    let settlement = record.settle();
    output::ok(&format!(
        "{} / {} recorded: bettors {}, shop {}",
        record.date,
        record.group,
        signed(settlement.bettor),
        signed(settlement.owner),
    ));
    Ok(())
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Date")]
    date: NaiveDate,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Play")]
    play: &'static str,
    #[tabled(rename = "Stake")]
    stake: Decimal,
    #[tabled(rename = "Odds")]
    odds: Decimal,
    #[tabled(rename = "Heads")]
    heads: u32,
    #[tabled(rename = "Result")]
    result: &'static str,
    #[tabled(rename = "Bettor P/L")]
    bettor: Decimal,
    #[tabled(rename = "Shop P/L")]
    owner: Decimal,
}

fn list(args: &LedgerPathArgs, config: &Config) -> Result<()> {
    let path = records_path(&args.ledger, config);
    let store = RecordStore::load(&path)?;
    if store.is_empty() {
        output::note(&format!("no records in {}", path.display()));
        return Ok(());
    }

    let rows: Vec<RecordRow> = store
        .iter()
        .map(|record| {
            let settlement = record.settle();
            RecordRow {
                date: record.date,
                group: record.group.clone(),
                play: record.play_type.label(),
                stake: record.stake,
                odds: record.quoted_odds,
                heads: record.bettor_count,
                result: if record.won { "won" } else { "lost" },
                bettor: settlement.bettor,
                owner: settlement.owner,
            }
        })
        .collect();

    output::section("Recorded wagers");
    output::table(&Table::new(rows).to_string());
    output::note(&format!("{} records in {}", store.len(), path.display()));
    Ok(())
}

#[derive(Tabled)]
struct PlayRow {
    #[tabled(rename = "Play")]
    play: &'static str,
    #[tabled(rename = "Records")]
    records: u64,
    #[tabled(rename = "Win rate")]
    win_rate: String,
    #[tabled(rename = "Staked")]
    staked: Decimal,
    #[tabled(rename = "Bettor P/L")]
    bettor: Decimal,
    #[tabled(rename = "Shop P/L")]
    owner: Decimal,
}

fn play_row(play: &'static str, stats: &PlayTypeStats) -> PlayRow {
    PlayRow {
        play,
        records: stats.records,
        win_rate: stats
            .win_rate()
            .map_or_else(|| "N/A".to_string(), |rate| format!("{:.1}%", rate * 100.0)),
        staked: stats.staked,
        bettor: stats.bettor_profit,
        owner: stats.owner_profit,
    }
}

fn summary(args: &LedgerSummaryArgs, config: &Config) -> Result<()> {
    let path = records_path(&args.ledger, config);
    let store = RecordStore::load(&path)?;
    let summary = LedgerSummary::of(&store);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    output::section("Book totals");
    output::key_value("Records", summary.records);
    output::key_value("Bettors", summary.bettors);
    output::key_value("Total staked", summary.staked);
    output::key_value("Bettor profit", signed(summary.bettor_profit));
    output::key_value("Shop profit", signed(summary.owner_profit));
    output::key_value("Per bettor", signed(summary.per_bettor_profit().round_dp(2)));

    output::section("By play type");
    output::table(
        &Table::new(vec![
            play_row("parlay", &summary.parlay),
            play_row("total-goals", &summary.total_goals),
        ])
        .to_string(),
    );
    Ok(())
}

fn remove(args: &LedgerRemoveArgs, config: &Config) -> Result<()> {
    let path = records_path(&args.ledger, config);
    let mut store = RecordStore::load(&path)?;
    let removed = store.remove(args.date, &args.group)?;
    store.save(&path)?;

    output::ok(&format!(
        "removed {} / {}: {} staked {}",
        removed.date,
        removed.group,
        removed.play_type,
        removed.total_staked(),
    ));
    Ok(())
}

fn signed(value: Decimal) -> String {
    if value >= Decimal::ZERO {
        format!("+{value}")
    } else {
        value.to_string()
    }
}
