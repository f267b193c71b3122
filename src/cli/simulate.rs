//! Handler for the `simulate` subcommand.

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tabled::{Table, Tabled};

use crate::cli::{output, SimulateArgs};
use crate::config::Config;
use crate::domain::{Distribution, OwnerTerms, Rate};
use crate::engine::{self, EnumerationScale, SimulationReport, SimulationSpec};
use crate::error::{Error, Result};

/// Replay every loss arrangement and print the distribution report.
pub fn execute(args: &SimulateArgs, config: &Config) -> Result<()> {
    let spec = build_spec(args, config);
    spec.validate()?;

    let scale = spec.scale();
    let threshold = config.simulation.safety_threshold;
    if !args.json && scale.exceeds(threshold) {
        output::warn(&format!(
            "{} arrangements exceed the safety threshold of {threshold}",
            describe_count(scale.planned),
        ));
    }
    if !confirmed(&scale, threshold, args)? {
        output::warn("simulation cancelled");
        return Ok(());
    }

    let bar = progress_bar(&scale, args.json);
    let report = engine::run_with_progress(&spec, || bar.inc(1))?;
    bar.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    print_report(&spec, &report);
    Ok(())
}

/// Resolve flags against config defaults. The engine validates the result.
fn build_spec(args: &SimulateArgs, config: &Config) -> SimulationSpec {
    let defaults = &config.simulation;
    let policy = args.policy.to_spec(
        args.stake.unwrap_or(defaults.default_stake),
        args.multiplier.unwrap_or(defaults.default_multiplier),
    );
    let owner = args.actual_odds.map(|actual_odds| OwnerTerms {
        commission_rate: args.commission.unwrap_or(defaults.default_commission),
        actual_odds,
    });
    SimulationSpec {
        rounds: args.rounds,
        loss_rounds: args.loss_rounds,
        odds: args.odds.unwrap_or(defaults.default_odds),
        policy,
        owner,
        max_arrangements: args.max_arrangements,
    }
}

/// Gate oversized sweeps behind an explicit yes.
///
/// `--yes` always proceeds. On a terminal the operator is prompted; anywhere
/// else an oversized sweep is refused so a script cannot wedge on a prompt.
fn confirmed(scale: &EnumerationScale, threshold: u64, args: &SimulateArgs) -> Result<bool> {
    let oversized = scale
        .expected_replays()
        .map_or(true, |replays| replays > u128::from(threshold));
    if !oversized || args.yes {
        return Ok(true);
    }
    if !dialoguer::console::user_attended() {
        return Err(Error::SafetyThresholdExceeded {
            planned: describe_count(scale.planned),
            threshold,
        });
    }
    let proceed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "Replay {} arrangements?",
            describe_count(scale.expected_replays()),
        ))
        .default(false)
        .interact()?;
    Ok(proceed)
}

/// A bar when the workload fits a length, a spinner when it is beyond one.
fn progress_bar(scale: &EnumerationScale, json: bool) -> ProgressBar {
    if json {
        return ProgressBar::hidden();
    }
    match scale.expected_replays().and_then(|n| u64::try_from(n).ok()) {
        Some(len) => {
            let bar = ProgressBar::new(len);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("  {bar:40.cyan/blue} {pos}/{len} arrangements")
                    .unwrap(),
            );
            bar
        }
        None => ProgressBar::new_spinner(),
    }
}

#[derive(Tabled)]
struct DistributionRow {
    #[tabled(rename = "Value")]
    value: Decimal,
    #[tabled(rename = "Count")]
    count: u64,
    #[tabled(rename = "Probability")]
    probability: Decimal,
}

fn distribution_table(distribution: &Distribution) -> String {
    let rows: Vec<DistributionRow> = distribution
        .iter()
        .map(|(value, count)| DistributionRow {
            value,
            count,
            probability: distribution.probability(count).round_dp(4),
        })
        .collect();
    Table::new(rows).to_string()
}

fn print_report(spec: &SimulationSpec, report: &SimulationReport) {
    output::section("Campaign");
    output::key_value("Rounds", spec.rounds);
    output::key_value("Loss rounds", spec.loss_rounds);
    output::key_value(
        "Policy",
        format!(
            "{} (opening stake {})",
            spec.policy.name(),
            spec.policy.initial_stake(),
        ),
    );
    output::key_value("Odds", spec.odds);
    output::key_value(
        "Arrangements",
        format!(
            "{} planned, {} replayed",
            describe_count(report.planned),
            report.replayed,
        ),
    );
    if report.truncated {
        output::warn("enumeration stopped at the arrangement cap");
    }

    let aggregate = &report.aggregate;
    let summary = &aggregate.summary;

    output::section("Punter profit");
    output::table(&distribution_table(&aggregate.profit));
    output::key_value("Win chance", percent(summary.win_mass));
    output::key_value("Loss chance", percent(summary.loss_mass));
    output::key_value("Mean profit", summary.mean_profit.round_dp(2));
    output::key_value("Profit sum", summary.profit_sum.round_dp(2));

    output::section("Turnover");
    output::table(&distribution_table(&aggregate.wagered));

    output::section("Prize money");
    output::table(&distribution_table(&aggregate.prize));

    output::section("Risk");
    output::key_value("Worst drawdown", summary.worst_drawdown);
    output::key_value("Mean drawdown", summary.mean_drawdown.round_dp(2));
    output::key_value("Peak stake", summary.worst_peak_stake);

    if let Some(owner) = &aggregate.owner {
        output::section("Shop commission");
        output::table(&distribution_table(&owner.commission));
        output::section("Shop odds-difference income");
        output::table(&distribution_table(&owner.odds_difference));
        output::section("Shop total income");
        output::table(&distribution_table(&owner.total));
    }
}

fn percent(rate: Rate) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).round_dp(2).normalize())
}

fn describe_count(count: Option<u128>) -> String {
    count.map_or_else(|| "more than 2^128".to_string(), |count| count.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policy::PolicySpec;
    use clap::Parser;
    use rust_decimal_macros::dec;

    #[test]
    fn config_defaults_fill_unset_flags() {
        let args = SimulateArgs::parse_from(["simulate", "-n", "3", "-k", "1"]);

        let spec = build_spec(&args, &Config::default());

        assert_eq!(spec.rounds, 3);
        assert_eq!(spec.loss_rounds, 1);
        assert_eq!(spec.odds, dec!(1.35));
        assert_eq!(spec.policy, PolicySpec::Fibonacci { initial: dec!(100) });
        assert!(spec.owner.is_none());
        assert!(spec.max_arrangements.is_none());
    }

    #[test]
    fn actual_odds_flag_enables_owner_tracking() {
        let args =
            SimulateArgs::parse_from(["simulate", "-n", "3", "-k", "1", "--actual-odds", "1.5"]);

        let spec = build_spec(&args, &Config::default());

        let owner = spec.owner.unwrap();
        assert_eq!(owner.actual_odds, dec!(1.5));
        assert_eq!(owner.commission_rate, dec!(0.05));
    }

    #[test]
    fn multiplier_policy_takes_its_factor_from_flags() {
        let args = SimulateArgs::parse_from([
            "simulate",
            "-n",
            "3",
            "-k",
            "1",
            "--policy",
            "multiplier",
            "--stake",
            "50",
            "--multiplier",
            "3",
        ]);

        let spec = build_spec(&args, &Config::default());

        assert_eq!(
            spec.policy,
            PolicySpec::Multiplier {
                initial: dec!(50),
                factor: dec!(3),
            },
        );
    }

    #[test]
    fn commission_flag_requires_actual_odds() {
        let parsed = SimulateArgs::try_parse_from([
            "simulate",
            "-n",
            "3",
            "-k",
            "1",
            "--commission",
            "0.05",
        ]);

        assert!(parsed.is_err());
    }

    #[test]
    fn yes_flag_skips_the_oversized_gate() {
        let args =
            SimulateArgs::parse_from(["simulate", "-n", "40", "-k", "20", "--yes"]);
        let spec = build_spec(&args, &Config::default());
        let scale = spec.scale();

        assert!(confirmed(&scale, 1_000_000, &args).unwrap());
    }

    #[test]
    fn oversized_sweep_without_a_terminal_is_refused() {
        let args = SimulateArgs::parse_from(["simulate", "-n", "40", "-k", "20"]);
        let spec = build_spec(&args, &Config::default());
        let scale = spec.scale();

        if dialoguer::console::user_attended() {
            return; // only meaningful without a terminal
        }
        let err = confirmed(&scale, 1_000_000, &args).unwrap_err();
        assert!(err.to_string().contains("safety threshold"));
    }

    #[test]
    fn a_cap_below_the_threshold_needs_no_confirmation() {
        let args = SimulateArgs::parse_from([
            "simulate",
            "-n",
            "40",
            "-k",
            "20",
            "--max-arrangements",
            "1000",
        ]);
        let spec = build_spec(&args, &Config::default());
        let scale = spec.scale();

        assert!(confirmed(&scale, 1_000_000, &args).unwrap());
    }

    #[test]
    fn counts_describe_themselves() {
        assert_eq!(describe_count(Some(252)), "252");
        assert_eq!(describe_count(None), "more than 2^128");
    }

    #[test]
    fn percent_is_rounded_and_trimmed() {
        assert_eq!(percent(dec!(0.5)), "50%");
        assert_eq!(percent(dec!(0.33333)), "33.33%");
    }
}
