pub mod cli;
pub mod core;
pub mod store;

use crate::cli::OutputFormat;
use crate::core::ReportEngine;
use crate::core::config::AppConfig;
use crate::core::numeric::SortOrder;
use crate::store::VaultSource;
use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info};

pub enum AppCommand {
    BalanceSheet { order: SortOrder },
    Summary,
    Trends { window_years: Option<u32> },
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    info!("Net worth tracker starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let vault_path = config.vault_path()?;
    let source = VaultSource::open(&vault_path)?;
    let engine = ReportEngine::load(&source, Utc::now()).await?;

    match command {
        AppCommand::BalanceSheet { order } => {
            cli::balance_sheet::run(&engine, order, &config.currency, format)
        }
        AppCommand::Summary => {
            cli::summary::run(&engine, config.cashflow.window_months, &config.currency, format)
        }
        AppCommand::Trends { window_years } => {
            let window_years = window_years.unwrap_or(config.trends.window_years);
            cli::trends::run(&engine, window_years, &config.currency, format).await
        }
    }
}
