pub mod balance_sheet;
pub mod setup;
pub mod summary;
pub mod trends;
pub mod ui;

use anyhow::{Context, Result};
use serde::Serialize;

/// How a report is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub(crate) fn print_json<T: Serialize>(report: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    println!("{json}");
    Ok(())
}
