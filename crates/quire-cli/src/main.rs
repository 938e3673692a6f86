//! Quire CLI - projects and notes from the terminal
//!
//! Every data command runs against the signed-in session of the resolved
//! profile and carries its bearer token.

mod cli;
mod commands;
mod config_profiles;
mod error;
mod token_store;


use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::auth_cmd::run_auth;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::notes::run_notes;
use crate::commands::projects::run_projects;
use crate::commands::search::run_search;
use crate::commands::user::run_user;
use crate::error::CliError;

const DEFAULT_LOG_FILTER: &str = "quire=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Config { command } => run_config(command, profile, cli.json)?,
        Commands::Auth { command } => run_auth(command, profile, cli.json).await?,
        Commands::Projects { command } => run_projects(command, profile, cli.json).await?,
        Commands::Notes { command } => run_notes(command, profile, cli.json).await?,
        Commands::Search { query } => run_search(&query, profile, cli.json).await?,
        Commands::User { command } => run_user(command, profile, cli.json).await?,
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
    }

    Ok(())
}
