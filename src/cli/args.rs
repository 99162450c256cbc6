use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::level_filters::LevelFilter;

use crate::config::EngineConfig;
use crate::types::Monetary;

/// Replay banking commands through the transaction engine
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Replay banking commands through the transaction engine", long_about = None)]
pub struct CliArgs {
    /// JSON Lines file of `open`, `submit` and `show` commands
    #[arg(value_name = "INPUT")]
    pub input_file: PathBuf,

    /// Account documents to start from; written back after the run
    #[arg(long = "data", value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    /// `currency,rate` CSV used to quote international transfers (parity when absent)
    #[arg(long = "rates", value_name = "FILE")]
    pub rates_file: Option<PathBuf>,

    #[arg(long = "format", value_name = "FORMAT", default_value = "csv")]
    pub format: OutputFormat,

    #[arg(long = "log-level", value_name = "LEVEL", default_value = "error")]
    pub log_level: LogLevel,

    /// Smallest fixed deposit principal accepted (default: 1000)
    #[arg(long = "minimum-fixed-deposit", value_name = "AMOUNT")]
    pub minimum_fixed_deposit: Option<Monetary>,

    /// Days counted per month of a fixed deposit term (default: 30)
    #[arg(long = "days-per-month", value_name = "DAYS")]
    pub days_per_month: Option<u32>,

    /// Seconds an exchange rate stays cached (default: 300)
    #[arg(long = "rate-cache-ttl", value_name = "SECONDS")]
    pub rate_cache_ttl: Option<u64>
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE
        }
    }
}

impl CliArgs {
    /// Overlays the provided options on top of [`EngineConfig::default`].
    pub fn to_engine_config(&self) -> EngineConfig {
        let default = EngineConfig::default();

        EngineConfig {
            minimum_fixed_deposit: self.minimum_fixed_deposit.unwrap_or(default.minimum_fixed_deposit),
            days_per_month: self.days_per_month.unwrap_or(default.days_per_month),
            rate_cache_ttl: self.rate_cache_ttl.map(Duration::from_secs).unwrap_or(default.rate_cache_ttl)
        }
    }
}
