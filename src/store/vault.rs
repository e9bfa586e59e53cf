//! YAML vault file holding accounts, assets and their records.
//!
//! ```yaml
//! accounts:
//!   - id: 1
//!     name: "Savings"
//!     type: "Savings"
//!     balance_group: 1
//!     auto_calculated: true
//!     transactions:
//!       - date: 2024-01-01
//!         value: 100.00
//! assets:
//!   - id: 1
//!     name: "Tesla"
//!     type: "Security"
//!     balance_group: 3
//!     statements:
//!       - date: 2024-01-01
//!         value: 4251
//! ```

use crate::core::dates;
use crate::core::model::{BalanceGroup, BalanceItem, BalanceStatement, EntityRef, Transaction};
use crate::core::source::RecordSource;
use crate::store::memory::MemorySource;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VaultTransaction {
    #[serde(with = "dates::record_date")]
    pub date: DateTime<Utc>,
    pub value: Decimal,
    #[serde(default)]
    pub excluded: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VaultStatement {
    #[serde(with = "dates::record_date")]
    pub date: DateTime<Utc>,
    pub value: Decimal,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VaultAccount {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub type_label: String,
    pub balance_group: BalanceGroup,
    #[serde(default)]
    pub auto_calculated: bool,
    #[serde(default)]
    pub transactions: Vec<VaultTransaction>,
    #[serde(default)]
    pub statements: Vec<VaultStatement>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VaultAsset {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub type_label: String,
    pub balance_group: BalanceGroup,
    #[serde(default)]
    pub statements: Vec<VaultStatement>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct VaultFile {
    #[serde(default)]
    pub accounts: Vec<VaultAccount>,
    #[serde(default)]
    pub assets: Vec<VaultAsset>,
}

/// Record source reading a [`VaultFile`].
#[derive(Debug, Clone)]
pub struct VaultSource {
    records: MemorySource,
}

impl VaultSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let vault_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read vault file: {}", path.display()))?;
        Self::from_yaml(&vault_str)
            .with_context(|| format!("Failed to load vault file: {}", path.display()))
    }

    pub fn from_yaml(vault_str: &str) -> Result<Self> {
        let vault: VaultFile = serde_yaml::from_str(vault_str).context("Failed to parse vault")?;
        Self::from_vault(vault)
    }

    pub fn from_vault(vault: VaultFile) -> Result<Self> {
        let mut records = MemorySource::new();

        let mut seen = HashSet::new();
        for account in vault.accounts {
            if !seen.insert(account.id) {
                bail!("Duplicate account id {} ({})", account.id, account.name);
            }
            if !account.auto_calculated && !account.transactions.is_empty() {
                warn!(
                    account = %account.name,
                    "Account is not auto-calculated, its transactions only count towards cashflow"
                );
            }
            for tx in &account.transactions {
                records = records.with_transaction(Transaction {
                    account_id: account.id,
                    date: tx.date,
                    value: tx.value,
                    is_excluded: tx.excluded,
                });
            }
            records = add_statements(records, EntityRef::account(account.id), &account.statements);
            records = records.with_account(BalanceItem {
                id: account.id,
                name: account.name,
                balance_group: account.balance_group,
                is_auto_calculated: account.auto_calculated,
                type_label: account.type_label,
            });
        }

        let mut seen = HashSet::new();
        for asset in vault.assets {
            if !seen.insert(asset.id) {
                bail!("Duplicate asset id {} ({})", asset.id, asset.name);
            }
            records = add_statements(records, EntityRef::asset(asset.id), &asset.statements);
            records = records.with_asset(BalanceItem {
                id: asset.id,
                name: asset.name,
                balance_group: asset.balance_group,
                is_auto_calculated: false,
                type_label: asset.type_label,
            });
        }

        debug!("Successfully loaded vault");
        Ok(Self { records })
    }
}

fn add_statements(
    mut records: MemorySource,
    entity: EntityRef,
    statements: &[VaultStatement],
) -> MemorySource {
    for statement in statements {
        records = records.with_statement(BalanceStatement {
            entity,
            date: statement.date,
            value: statement.value,
        });
    }
    records
}

#[async_trait]
impl RecordSource for VaultSource {
    async fn fetch_accounts(&self) -> Result<Vec<BalanceItem>> {
        self.records.fetch_accounts().await
    }

    async fn fetch_assets(&self) -> Result<Vec<BalanceItem>> {
        self.records.fetch_assets().await
    }

    async fn fetch_transactions(&self) -> Result<Vec<Transaction>> {
        self.records.fetch_transactions().await
    }

    async fn fetch_statements(&self) -> Result<Vec<BalanceStatement>> {
        self.records.fetch_statements().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Entity, Ledger};
    use rust_decimal_macros::dec;

    const VAULT: &str = r#"
accounts:
  - id: 1
    name: "Savings"
    type: "Savings"
    balance_group: 1
    auto_calculated: true
    transactions:
      - date: 2024-01-01
        value: 100
      - date: "2024-02-01T10:30:00"
        value: -30.25
      - date: 2024-02-03
        value: 5000
        excluded: true
  - id: 2
    name: "Roth IRA"
    type: "Retirement"
    balance_group: 3
    statements:
      - date: 2024-01-01
        value: 1000
assets:
  - id: 1
    name: "Tesla"
    type: "Security"
    balance_group: 3
    statements:
      - date: 2024-03-01
        value: "4251.50"
"#;

    #[tokio::test]
    async fn test_vault_flattens_records() {
        let source = VaultSource::from_yaml(VAULT).expect("Failed to load vault");
        let ledger = Ledger::load(&source).await.unwrap();

        assert_eq!(ledger.entities.len(), 3);
        match &ledger.entities[0] {
            Entity::Account(item) => {
                assert_eq!(item.name, "Savings");
                assert!(item.is_auto_calculated);
                assert_eq!(item.type_label, "Savings");
            }
            other => panic!("Expected an account, got {other:?}"),
        }
        assert!(matches!(&ledger.entities[2], Entity::Asset(item) if item.name == "Tesla"));

        assert_eq!(ledger.transactions.len(), 3);
        assert_eq!(ledger.transactions[1].value, dec!(-30.25));
        assert_eq!(ledger.transactions[1].date.to_rfc3339(), "2024-02-01T00:00:00+00:00");
        assert!(ledger.transactions[2].is_excluded);

        assert_eq!(ledger.statements.len(), 2);
        assert_eq!(ledger.statements[0].entity, EntityRef::account(2));
        assert_eq!(ledger.statements[1].entity, EntityRef::asset(1));
        assert_eq!(ledger.statements[1].value, dec!(4251.50));
    }

    #[test]
    fn test_duplicate_account_ids_are_rejected() {
        let vault = r#"
accounts:
  - id: 1
    name: "A"
    type: "Savings"
    balance_group: 1
  - id: 1
    name: "B"
    type: "Savings"
    balance_group: 1
"#;
        let err = VaultSource::from_yaml(vault).unwrap_err();
        assert!(err.to_string().contains("Duplicate account id 1"));
    }

    #[test]
    fn test_unknown_balance_group_is_rejected() {
        let vault = r#"
assets:
  - id: 1
    name: "Mystery"
    type: "Other"
    balance_group: 0
"#;
        assert!(VaultSource::from_yaml(vault).is_err());
    }

    #[test]
    fn test_open_missing_file_reports_path() {
        let err = VaultSource::open("/nonexistent/vault.yaml").unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/vault.yaml"));
    }
}
