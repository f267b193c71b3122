//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. Every table and field has a
//! default, so the tool also runs without a file at all.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults and guard rails for `simulate` and `ladder`.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Arrangement count above which a run needs explicit confirmation.
    #[serde(default = "default_safety_threshold")]
    pub safety_threshold: u64,
    /// Odds quoted to the punter when the flag is omitted.
    #[serde(default = "default_odds")]
    pub default_odds: Decimal,
    /// Opening stake when the flag is omitted.
    #[serde(default = "default_stake")]
    pub default_stake: Decimal,
    /// Loss multiplier for the multiplier policy when the flag is omitted.
    #[serde(default = "default_multiplier")]
    pub default_multiplier: Decimal,
    /// Commission rate applied when owner income is requested.
    #[serde(default = "default_commission")]
    pub default_commission: Decimal,
}

fn default_safety_threshold() -> u64 {
    1_000_000
}

fn default_odds() -> Decimal {
    Decimal::new(135, 2) // 1.35
}

fn default_stake() -> Decimal {
    Decimal::from(100)
}

fn default_multiplier() -> Decimal {
    Decimal::TWO
}

fn default_commission() -> Decimal {
    Decimal::new(5, 2) // 5%
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            safety_threshold: default_safety_threshold(),
            default_odds: default_odds(),
            default_stake: default_stake(),
            default_multiplier: default_multiplier(),
            default_commission: default_commission(),
        }
    }
}

/// Wager ledger settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Where ledger records live.
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,
    /// Commission rate prefilled on new records.
    #[serde(default = "default_commission")]
    pub default_commission: Decimal,
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("ledger.json")
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
            default_commission: default_commission(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        config.validate()?;

        Ok(config)
    }

    /// Loads `path` when given. Without one, picks up `config.toml` from the
    /// working directory if it exists, otherwise falls back to built-in
    /// defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let discovered = Path::new("config.toml");
                if discovered.exists() {
                    Self::load(discovered)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.simulation.safety_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "simulation.safety_threshold",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        if self.simulation.default_odds <= Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "simulation.default_odds",
                reason: format!("must exceed 1, got {}", self.simulation.default_odds),
            }
            .into());
        }
        if self.simulation.default_stake <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "simulation.default_stake",
                reason: format!("must be positive, got {}", self.simulation.default_stake),
            }
            .into());
        }
        if self.simulation.default_multiplier < Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "simulation.default_multiplier",
                reason: format!("must be at least 1, got {}", self.simulation.default_multiplier),
            }
            .into());
        }
        for (field, rate) in [
            ("simulation.default_commission", self.simulation.default_commission),
            ("ledger.default_commission", self.ledger.default_commission),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must lie in [0, 1], got {rate}"),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            ledger: LedgerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Logs go to stderr so stdout stays clean for report output.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            _ => {
                fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
    }
}
