pub mod cli;
pub mod core;
pub mod store;

use crate::core::ModelContext;
use crate::core::config::AppConfig;
use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info};

pub enum AppCommand {
    List,
    Convert {
        abbreviation: String,
        amount: f64,
        as_of: NaiveDate,
    },
    Check {
        abbreviation: String,
    },
    Add {
        name: String,
        abbreviation: String,
        symbol: String,
        base: bool,
    },
}

/// Builds the model context described by `config`.
pub fn build_context(config: &AppConfig) -> Result<ModelContext> {
    let store = store::from_config(&config.store)?;
    Ok(ModelContext::new(store)
        .with_date_format(&config.date_format)
        .with_rate_query(config.rate_query))
}

/// Runs `command` and returns its rendered output.
pub async fn execute(command: AppCommand, config_path: Option<&str>) -> Result<String> {
    info!("basefx starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let ctx = build_context(&config)?;

    match command {
        AppCommand::List => cli::list::run(&ctx).await,
        AppCommand::Convert {
            abbreviation,
            amount,
            as_of,
        } => cli::convert::run(&ctx, &abbreviation, amount, as_of).await,
        AppCommand::Check { abbreviation } => cli::check::run(&ctx, &abbreviation).await,
        AppCommand::Add {
            name,
            abbreviation,
            symbol,
            base,
        } => cli::add::run(&ctx, &name, &abbreviation, &symbol, base).await,
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let output = execute(command, config_path).await?;
    println!("{output}");
    Ok(())
}
