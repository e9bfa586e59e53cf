//! Entry point tying the record source to the three reports.

use crate::core::balance::BalanceResolver;
use crate::core::balance_sheet::{self, BalanceSheet, BalanceSheetItem};
use crate::core::cashflow;
use crate::core::model::Ledger;
use crate::core::numeric::SortOrder;
use crate::core::source::RecordSource;
use crate::core::summary::{self, BigPictureReport};
use crate::core::trends::{self, TrendReport};
use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::info;

/// A loaded ledger snapshot and the balances resolved from it.
pub struct ReportEngine {
    ledger: Ledger,
    resolver: BalanceResolver,
    now: DateTime<Utc>,
}

impl ReportEngine {
    pub fn new(ledger: Ledger, now: DateTime<Utc>) -> Self {
        let resolver = BalanceResolver::new(&ledger);
        Self {
            ledger,
            resolver,
            now,
        }
    }

    pub async fn load(
        source: &(dyn RecordSource + Send + Sync),
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let ledger = Ledger::load(source).await?;
        Ok(Self::new(ledger, now))
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Every entity with its balance as of `now`, in ledger order.
    pub fn current_items(&self) -> Vec<BalanceSheetItem> {
        self.ledger
            .entities
            .iter()
            .map(|entity| BalanceSheetItem::new(entity, self.resolver.resolve(entity, self.now)))
            .collect()
    }

    pub fn balance_sheet(&self, order: SortOrder) -> BalanceSheet {
        info!(?order, "Building balance sheet");
        balance_sheet::aggregate(self.current_items(), order)
    }

    pub fn big_picture(&self, window_months: u32) -> BigPictureReport {
        info!(window_months, "Building big picture summary");
        BigPictureReport {
            summary: summary::big_picture(&self.current_items()),
            trailing_cashflow: cashflow::trailing_cashflow(
                &self.ledger.transactions,
                self.now,
                window_months,
            ),
        }
    }

    pub async fn trends(
        &self,
        window_years: u32,
        on_progress: &(dyn Fn() + Send + Sync),
    ) -> Result<TrendReport> {
        trends::build_trends(
            &self.ledger.entities,
            &self.resolver,
            self.now,
            window_years,
            on_progress,
        )
        .await
    }
}
