// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! azpool: provision Azure Pipelines agents in containers

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod color;
mod commands;
mod exit_error;
mod logging;
mod output;

use clap::{ArgAction, Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::exit_error::ExitError;

#[derive(Parser)]
#[command(
    name = "azpool",
    version,
    about = "Provision Azure Pipelines agents in containers",
    styles = color::styles()
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the agent image build context (Dockerfile + start.sh)
    Init(commands::init::InitArgs),
    /// Create and start agent containers, waiting for each to come up
    Start(commands::start::StartArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cancel = CancellationToken::new();
    watch_interrupts(cancel.clone());

    let result = match cli.command {
        Command::Init(args) => commands::init::handle(args),
        Command::Start(args) => commands::start::handle(args, cancel).await,
    };

    if let Err(e) = result {
        let code = e.downcast_ref::<ExitError>().map(|e| e.code).unwrap_or(ExitError::FAILURE);
        eprintln!("error: {:#}", e);
        std::process::exit(code);
    }
}

/// First Ctrl-C cancels a pending health check; a second one exits.
fn watch_interrupts(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        tracing::warn!("interrupted, cancelling health check (Ctrl-C again to exit)");
        cancel.cancel();
        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(ExitError::CANCELLED);
        }
    });
}
