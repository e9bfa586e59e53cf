//! Record source abstraction

use crate::core::model::{BalanceItem, BalanceStatement, Ledger, Transaction};
use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

/// Supplies the raw records reports are computed from.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_accounts(&self) -> Result<Vec<BalanceItem>>;
    async fn fetch_assets(&self) -> Result<Vec<BalanceItem>>;
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>>;
    async fn fetch_statements(&self) -> Result<Vec<BalanceStatement>>;
}

impl Ledger {
    /// Fetches every record kind concurrently into one snapshot.
    pub async fn load(source: &(dyn RecordSource + Send + Sync)) -> Result<Self> {
        let (accounts, assets, transactions, statements) = tokio::try_join!(
            source.fetch_accounts(),
            source.fetch_assets(),
            source.fetch_transactions(),
            source.fetch_statements(),
        )?;
        debug!(
            accounts = accounts.len(),
            assets = assets.len(),
            transactions = transactions.len(),
            statements = statements.len(),
            "Loaded ledger snapshot"
        );
        Ok(Ledger::new(accounts, assets, transactions, statements))
    }
}
