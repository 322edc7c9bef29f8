//! # Bankist
//! Application replays user actions from a csv script against the demo bank and prints the
//! remaining accounts to output.
//!
//! ## Input format
//! csv with columns `action`, `user`, `pin`, `target`, `amount`
//!
//! ```csv
//! action,user,pin,target,amount
//! login,js,1111,,
//! transfer,,,jd,500
//! loan,,,,1000
//! sort,,,,
//! close,js,1111,,
//! ```
//!
//! Actions that do not pass validation are ignored, exactly like a form that does nothing
//! when submitted with bad input.

#![deny(missing_docs)]

mod logging;

use anyhow::Context;
use bankist::{
    account::Summary,
    bank::{Bank, Outcome},
    csv::{self, RawAction, RawActionType},
};
use clap::Parser;
use std::path::PathBuf;
use tokio::{
    io::{stdout, BufReader},
    spawn,
    sync::mpsc::{channel, Receiver, Sender},
};
use tracing::{debug, info, trace};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// csv file with the actions to replay
    script: PathBuf,

    /// more output on stderr, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

async fn read_actions_from_file(path: PathBuf, sender: Sender<RawAction>) -> anyhow::Result<()> {
    let f = tokio::fs::File::open(&path)
        .await
        .with_context(|| format!("access input file {}", path.display()))?;

    let bf = BufReader::new(f);
    csv::deserialize_actions_from_csv_reader(bf, sender)
        .await
        .context("improper content of file")
}

// One action at a time, in script order.
async fn run_session(bank: &mut Bank, input: Receiver<RawAction>) {
    let mut input = input;

    while let Some(raw_action) = input.recv().await {
        match bank.try_apply_raw_action(&raw_action) {
            Ok(Outcome::Refresh(acc)) => {
                if raw_action.action == RawActionType::Login {
                    info!("Welcome back, {}", acc.first_name());
                }

                let summary = Summary::of(acc);
                info!(
                    username = acc.username(),
                    balance = %summary.balance,
                    income = %summary.income,
                    expense = %summary.expense,
                    interest = %summary.interest,
                    "account redrawn"
                );
                trace!(rows = ?acc.movement_rows(false), "movements redrawn");
            }
            Ok(Outcome::Sorted(movements)) => {
                debug!(?movements, "movements redrawn");
            }
            Ok(Outcome::Closed(acc)) => {
                info!(owner = acc.owner(), "account closed");
            }
            Err(e) => {
                debug!(action = ?raw_action.action, reason = %e, "action ignored");
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // CLI handle
    let args = Args::parse();
    logging::set_up(args.verbose)?;

    // read actions from csv file
    let (tx_action, rx_action) = channel(8192);
    let task_read_csv = spawn(read_actions_from_file(args.script, tx_action));

    // apply them in order to the demo bank
    let mut bank = Bank::demo();
    run_session(&mut bank, rx_action).await;

    // await reading task and handle its error if occurred
    task_read_csv.await??;

    info!(overall = %bank.overall_balance(), "bank balance");
    csv::summarize_accounts(tokio_stream::iter(bank.accounts()), stdout())
        .await
        .context("failed to save output")?;

    Ok(())
}
