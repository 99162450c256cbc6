use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{error, info, warn};

use crate::engine::BankEngine;
use crate::models::{FixedDepositStatus, OpenAccountRequest, TransactionRequest};
use crate::storage::AccountStore;

/// One line of a replay file.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Open(OpenAccountRequest),
    Submit {
        #[serde(default)]
        caller: Option<String>,
        /// Decoded by [`TransactionRequest::from_json`] so a bad body is a rejection, not a bad line.
        request: Value
    },
    Show {
        #[serde(default)]
        caller: Option<String>,
        email: String
    }
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub rejected: usize
}

/// Feeds a JSON Lines command file through a [`BankEngine`], in file order.
pub struct BatchReplay<S: AccountStore> {
    engine: Arc<BankEngine<S>>,
    backpressure: usize
}

impl<S: AccountStore> BatchReplay<S> {
    pub fn new(engine: Arc<BankEngine<S>>) -> Self {
        Self {
            engine,
            backpressure: 256
        }
    }

    /// Replays every command in `path`. Undecodable lines and rejected commands are
    /// logged and counted as rejected, never fatal.
    pub async fn run(&self, path: &Path) -> anyhow::Result<ReplaySummary> {
        let (sender, receiver) = mpsc::channel::<(usize, serde_json::Result<Command>)>(self.backpressure);
        let reader_handle = self.spawn_reader(path.to_path_buf(), sender);
        let summary = self.process_commands(receiver).await;

        if let Err(error) = reader_handle.await {
            error!("Command ingestion failed: {error}");
        }

        Ok(summary)
    }

    fn spawn_reader(&self, path: PathBuf, sender: mpsc::Sender<(usize, serde_json::Result<Command>)>) -> JoinHandle<()> {
        spawn_blocking(move || {
            let file = match File::open(&path) {
                Ok(file) => file,
                Err(error) => {
                    error!("Error opening commands at path: {} | {error}", path.display());
                    return;
                }
            };

            for (index, line) in BufReader::new(file).lines().enumerate() {
                let line_number = index + 1;
                let line = match line {
                    Ok(line) => line,
                    Err(error) => {
                        error!("Error reading line {line_number}: {error}");
                        break;
                    }
                };

                if line.trim().is_empty() {
                    continue;
                }

                if sender.blocking_send((line_number, serde_json::from_str::<Command>(&line))).is_err() {
                    break;
                }
            }
        })
    }

    async fn process_commands(&self, mut receiver: mpsc::Receiver<(usize, serde_json::Result<Command>)>) -> ReplaySummary {
        let mut summary = ReplaySummary::default();

        while let Some((line_number, command)) = receiver.recv().await {
            let command = match command {
                Ok(command) => command,
                Err(error) => {
                    error!("Command deserialization error on line {line_number}: {error}");
                    summary.rejected += 1;
                    continue;
                }
            };

            let outcome = match command {
                Command::Open(request) => self.engine.open_account(request).map(|_| ()),
                Command::Submit { caller, request } => match TransactionRequest::from_json(request) {
                    Ok(request) => self.engine.submit(caller.as_deref(), request).await.map(|_| ()),
                    Err(error) => Err(error)
                },
                Command::Show { caller, email } => self.engine.account(caller.as_deref(), &email).map(|snapshot| {
                    let active = snapshot.fixed_deposits.iter()
                        .filter(|fixed_deposit| fixed_deposit.status == FixedDepositStatus::Active)
                        .count();

                    info!("Account [{}] balance [{}] with [{}] transactions and [{}] active fixed deposits", snapshot.email, snapshot.balance, snapshot.transactions.len(), active);
                })
            };

            match outcome {
                Ok(()) => summary.applied += 1,
                Err(error) => {
                    warn!("Line {line_number} rejected with status {} [{}]: {error}", error.status(), error.code());
                    summary.rejected += 1;
                }
            }
        }

        summary
    }
}
