use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Simulation parameter errors with structured variants.
#[derive(Error, Debug, Clone)]
pub enum ParameterError {
    #[error("campaign needs at least one round")]
    ZeroRounds,

    #[error("loss rounds exceed total rounds: {loss_rounds} > {rounds}")]
    LossRoundsExceedRounds { loss_rounds: u32, rounds: u32 },

    #[error("stake must be positive, got {stake}")]
    NonPositiveStake { stake: rust_decimal::Decimal },

    #[error("odds must exceed 1, got {odds}")]
    OddsTooLow { odds: rust_decimal::Decimal },

    #[error("payout odds must exceed 1, got {odds}")]
    ActualOddsTooLow { odds: rust_decimal::Decimal },

    #[error("multiplier must be at least 1, got {multiplier}")]
    MultiplierTooLow { multiplier: rust_decimal::Decimal },

    #[error("commission rate must lie in [0, 1], got {rate}")]
    CommissionOutOfRange { rate: rust_decimal::Decimal },
}

/// Wager ledger errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("no record for {date} / {group}")]
    RecordNotFound {
        date: chrono::NaiveDate,
        group: String,
    },

    #[error("invalid record value for {field}: {reason}")]
    InvalidRecord { field: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("arrangement count {planned} exceeds safety threshold {threshold}")]
    SafetyThresholdExceeded { planned: String, threshold: u64 },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
