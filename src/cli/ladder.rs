//! Handler for the `ladder` subcommand.

use rust_decimal::Decimal;
use tabled::{Table, Tabled};

use crate::cli::{output, LadderArgs};
use crate::config::Config;
use crate::domain::policy::{stake_ladder, PolicySpec};
use crate::error::{ParameterError, Result};

#[derive(Tabled)]
struct LadderRow {
    #[tabled(rename = "Straight losses")]
    losses: u32,
    #[tabled(rename = "Next stake")]
    stake: Decimal,
    #[tabled(rename = "Bankroll needed")]
    outlay: Decimal,
}

/// Print the stakes a policy climbs through under straight losses, with the
/// bankroll needed to keep placing them.
pub fn execute(args: &LadderArgs, config: &Config) -> Result<()> {
    let defaults = &config.simulation;
    let spec = args.policy.to_spec(
        args.stake.unwrap_or(defaults.default_stake),
        args.multiplier.unwrap_or(defaults.default_multiplier),
    );
    let opening = spec.initial_stake();
    if opening <= Decimal::ZERO {
        return Err(ParameterError::NonPositiveStake { stake: opening }.into());
    }
    if let PolicySpec::Multiplier { factor, .. } = spec {
        if factor < Decimal::ONE {
            return Err(ParameterError::MultiplierTooLow { multiplier: factor }.into());
        }
    }

    let policy = spec.build();
    let ladder = stake_ladder(&*policy, args.losses);

    let mut outlay = Decimal::ZERO;
    let rows: Vec<LadderRow> = ladder
        .iter()
        .enumerate()
        .map(|(losses, next)| {
            outlay += next;
            LadderRow {
                losses: losses as u32,
                stake: *next,
                outlay,
            }
        })
        .collect();

    output::section("Stake ladder");
    output::key_value("Policy", spec.name());
    output::key_value("Opening stake", opening);
    println!();
    output::table(&Table::new(rows).to_string());
    if args.losses > 0 {
        if let Some(last) = ladder.last() {
            output::note(&format!(
                "After {} straight losses the next stake is {last}; surviving the \
                 whole ladder takes {outlay}.",
                args.losses,
            ));
        }
    }
    Ok(())
}
