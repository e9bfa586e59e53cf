use crate::core::model::{BalanceItem, BalanceStatement, Transaction};
use crate::core::source::RecordSource;
use anyhow::Result;
use async_trait::async_trait;

/// Record source backed by in-memory vectors.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    accounts: Vec<BalanceItem>,
    assets: Vec<BalanceItem>,
    transactions: Vec<Transaction>,
    statements: Vec<BalanceStatement>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, account: BalanceItem) -> Self {
        self.accounts.push(account);
        self
    }

    pub fn with_asset(mut self, asset: BalanceItem) -> Self {
        self.assets.push(asset);
        self
    }

    pub fn with_transaction(mut self, transaction: Transaction) -> Self {
        self.transactions.push(transaction);
        self
    }

    pub fn with_statement(mut self, statement: BalanceStatement) -> Self {
        self.statements.push(statement);
        self
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    async fn fetch_accounts(&self) -> Result<Vec<BalanceItem>> {
        Ok(self.accounts.clone())
    }

    async fn fetch_assets(&self) -> Result<Vec<BalanceItem>> {
        Ok(self.assets.clone())
    }

    async fn fetch_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.clone())
    }

    async fn fetch_statements(&self) -> Result<Vec<BalanceStatement>> {
        Ok(self.statements.clone())
    }
}
