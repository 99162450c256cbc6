mod cli;
mod config;
mod engine;
mod models;
mod rates;
mod storage;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::cli::{CliArgs, OutputFormat};
use crate::config::EngineConfig;
use crate::engine::{BankEngine, BatchReplay};
use crate::models::AccountSnapshot;
use crate::rates::{CachedRates, ParityRates, RateProvider, StaticRates};
use crate::storage::AccountStorage;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    setup_logging(args.log_level.into());

    let config = args.to_engine_config();
    let storage = open_storage(args.data_file.as_deref())?;
    let rates = build_rates(args.rates_file.as_deref(), &config)?;
    let engine = Arc::new(BankEngine::new(Arc::new(storage), rates, config));
    let replay = BatchReplay::new(engine.clone());

    let timer = Instant::now();
    let summary = replay.run(&args.input_file).await?;
    let duration = timer.elapsed();

    info!("Replayed commands in: {duration:?} ({} applied, {} rejected)", summary.applied, summary.rejected);

    let storage = engine.store();

    if let Some(path) = &args.data_file {
        storage.save(path).with_context(|| format!("Saving accounts to {}", path.display()))?;
    }

    let snapshots: Vec<AccountSnapshot> = storage.accounts().iter().map(|account| account.snapshot()).collect();

    match args.format {
        OutputFormat::Csv => write_results_to_stdout(&snapshots)?,
        OutputFormat::Json => write_json_to_stdout(&snapshots)?
    }

    Ok(())
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Results go to stdout, so logging has to use stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn open_storage(path: Option<&Path>) -> Result<AccountStorage> {
    match path {
        Some(path) if path.exists() => AccountStorage::load(path)
            .with_context(|| format!("Loading accounts from {}", path.display())),
        _ => Ok(AccountStorage::new())
    }
}

fn build_rates(path: Option<&Path>, config: &EngineConfig) -> Result<Arc<dyn RateProvider>> {
    let Some(path) = path else {
        return Ok(Arc::new(ParityRates));
    };

    let table = StaticRates::from_path(path)
        .with_context(|| format!("Loading exchange rates from {}", path.display()))?;

    info!("Loaded [{}] exchange rates", table.len());

    Ok(Arc::new(CachedRates::new(table, config.rate_cache_ttl)))
}

fn write_results_to_stdout(snapshots: &[AccountSnapshot]) -> Result<()> {
    let mut output = csv::Writer::from_writer(BufWriter::new(stdout().lock()));

    output.write_record(["email", "name", "balance", "transactions", "fixed_deposits"])?;

    for snapshot in snapshots {
        output.write_record([
            snapshot.email.clone(),
            snapshot.name.clone(),
            snapshot.balance.to_string(),
            snapshot.transactions.len().to_string(),
            snapshot.fixed_deposits.len().to_string()
        ])?;
    }

    output.flush()?;

    Ok(())
}

fn write_json_to_stdout(snapshots: &[AccountSnapshot]) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    serde_json::to_writer_pretty(&mut output, snapshots)?;
    writeln!(output)?;
    output.flush()?;

    Ok(())
}
