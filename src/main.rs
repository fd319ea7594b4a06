use anyhow::Result;
use basefx::core::log::init_logging;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for basefx::AppCommand {
    fn from(cmd: Commands) -> basefx::AppCommand {
        match cmd {
            Commands::List => basefx::AppCommand::List,
            Commands::Convert {
                abbreviation,
                amount,
                as_of,
            } => basefx::AppCommand::Convert {
                abbreviation,
                amount,
                as_of: as_of.unwrap_or_else(|| chrono::Utc::now().date_naive()),
            },
            Commands::Check { abbreviation } => basefx::AppCommand::Check { abbreviation },
            Commands::Add {
                name,
                abbreviation,
                symbol,
                base,
            } => basefx::AppCommand::Add {
                name,
                abbreviation,
                symbol,
                base,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List currencies
    List,
    /// Convert an amount to the base currency
    Convert {
        /// Three letter currency abbreviation
        abbreviation: String,
        amount: f64,
        /// Conversion date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Check whether an abbreviation can be used for a new currency
    Check { abbreviation: String },
    /// Add a currency
    Add {
        name: String,
        abbreviation: String,
        symbol: String,
        /// Mark as the base currency
        #[arg(long)]
        base: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => basefx::cli::setup::setup(),
        Some(cmd) => basefx::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
