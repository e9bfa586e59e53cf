use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use networth::cli::OutputFormat;
use networth::core::log::init_logging;
use networth::core::numeric::SortOrder;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for networth::AppCommand {
    fn from(cmd: Commands) -> networth::AppCommand {
        match cmd {
            Commands::BalanceSheet { descending } => networth::AppCommand::BalanceSheet {
                order: if descending {
                    SortOrder::Descending
                } else {
                    SortOrder::Ascending
                },
            },
            Commands::Summary => networth::AppCommand::Summary,
            Commands::Trends { years } => networth::AppCommand::Trends {
                window_years: years,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration and an example vault
    Setup,
    /// Display balances grouped by balance group and type
    BalanceSheet {
        /// List the largest balances first
        #[arg(long)]
        descending: bool,
    },
    /// Display net worth and monthly cashflow
    Summary,
    /// Display weekly balance trends
    Trends {
        /// Number of years to look back
        #[arg(long)]
        years: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };
    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => networth::cli::setup::setup_at_path(path),
            None => networth::cli::setup::setup(),
        },
        Some(cmd) => networth::run_command(cmd.into(), cli.config_path.as_deref(), format).await,
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
