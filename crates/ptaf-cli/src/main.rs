use anyhow::Context;
use clap::Parser;

mod cli_args;
mod cli_command;
mod modules;


use crate::cli_args::*;
use crate::cli_command::handle_command;
use crate::modules::auth::SessionManager;
use crate::modules::system::{build_client, load_credentials, CommandContext};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug)?;
    let credentials = load_credentials(&cli.config)?;
    let client = build_client(&credentials)?;
    let mut session = SessionManager::new(client, credentials);
    session
        .authenticate()
        .await
        .context("login to PT AF failed")?;

    let mut ctx = CommandContext {
        session: &mut session,
    };
    handle_command(cli.command, &mut ctx).await
}

fn init_logging(debug: bool) -> anyhow::Result<()> {
    let filter = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
