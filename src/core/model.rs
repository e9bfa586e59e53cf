//! Records consumed by the reporting engine.

use crate::core::dates;
use anyhow::anyhow;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Coarse category every balance-bearing entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BalanceGroup {
    Cash = 1,
    Debt = 2,
    Investments = 3,
    OtherAssets = 4,
}

/// Every declared balance group, in id order.
pub const BALANCE_GROUPS: [BalanceGroup; 4] = [
    BalanceGroup::Cash,
    BalanceGroup::Debt,
    BalanceGroup::Investments,
    BalanceGroup::OtherAssets,
];

impl BalanceGroup {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            BalanceGroup::Cash => "Cash",
            BalanceGroup::Debt => "Debt",
            BalanceGroup::Investments => "Investments",
            BalanceGroup::OtherAssets => "Other assets",
        }
    }
}

impl Display for BalanceGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl TryFrom<u8> for BalanceGroup {
    type Error = anyhow::Error;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        BALANCE_GROUPS
            .into_iter()
            .find(|group| group.id() == id)
            .ok_or_else(|| anyhow!("Unknown balance group: {id}"))
    }
}

impl From<BalanceGroup> for u8 {
    fn from(group: BalanceGroup) -> u8 {
        group.id()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Account,
    Asset,
}

/// Identifies an account or asset; the two kinds have separate id spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: i64,
}

impl EntityRef {
    pub fn account(id: i64) -> Self {
        Self {
            kind: EntityKind::Account,
            id,
        }
    }

    pub fn asset(id: i64) -> Self {
        Self {
            kind: EntityKind::Asset,
            id,
        }
    }
}

/// Fields shared by accounts and assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceItem {
    pub id: i64,
    pub name: String,
    pub balance_group: BalanceGroup,
    #[serde(default)]
    pub is_auto_calculated: bool,
    /// Account type or asset type name, e.g. "Savings" or "Security".
    pub type_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Account(BalanceItem),
    Asset(BalanceItem),
}

impl Entity {
    pub fn item(&self) -> &BalanceItem {
        match self {
            Entity::Account(item) | Entity::Asset(item) => item,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Account(_) => EntityKind::Account,
            Entity::Asset(_) => EntityKind::Asset,
        }
    }

    pub fn entity_ref(&self) -> EntityRef {
        EntityRef {
            kind: self.kind(),
            id: self.item().id,
        }
    }

    pub fn name(&self) -> &str {
        &self.item().name
    }

    pub fn balance_group(&self) -> BalanceGroup {
        self.item().balance_group
    }

    pub fn type_label(&self) -> &str {
        &self.item().type_label
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub account_id: i64,
    #[serde(with = "dates::record_date")]
    pub date: DateTime<Utc>,
    /// Credits are positive, debits negative.
    pub value: Decimal,
    #[serde(default)]
    pub is_excluded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceStatement {
    pub entity: EntityRef,
    #[serde(with = "dates::record_date")]
    pub date: DateTime<Utc>,
    pub value: Decimal,
}

/// Read-only snapshot of every record one computation needs.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub entities: Vec<Entity>,
    pub transactions: Vec<Transaction>,
    pub statements: Vec<BalanceStatement>,
}

impl Ledger {
    /// Accounts first, then assets, each in the order supplied.
    pub fn new(
        accounts: Vec<BalanceItem>,
        assets: Vec<BalanceItem>,
        transactions: Vec<Transaction>,
        statements: Vec<BalanceStatement>,
    ) -> Self {
        let entities = accounts
            .into_iter()
            .map(Entity::Account)
            .chain(assets.into_iter().map(Entity::Asset))
            .collect();
        Self {
            entities,
            transactions,
            statements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_group_ids_and_labels() {
        let ids: Vec<u8> = BALANCE_GROUPS.iter().map(|g| g.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(BalanceGroup::OtherAssets.label(), "Other assets");
        assert_eq!(BalanceGroup::try_from(2).unwrap(), BalanceGroup::Debt);
        assert!(BalanceGroup::try_from(0).is_err());
        assert!(BalanceGroup::try_from(5).is_err());
    }

    #[test]
    fn test_balance_item_deserialization() {
        let yaml_str = r#"
id: 7
name: "Roth IRA"
balance_group: 3
type_label: "Retirement"
"#;
        let item: BalanceItem = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(item.balance_group, BalanceGroup::Investments);
        assert!(!item.is_auto_calculated);

        let bad = serde_yaml::from_str::<BalanceItem>(
            "id: 1\nname: x\nbalance_group: 9\ntype_label: y\n",
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_transaction_date_without_timezone_is_utc_midnight() {
        let tx: Transaction = serde_yaml::from_str(
            "account_id: 1\ndate: \"2024-01-31T21:15:00\"\nvalue: -12.34\n",
        )
        .unwrap();
        assert_eq!(tx.date.to_rfc3339(), "2024-01-31T00:00:00+00:00");
        assert_eq!(tx.value.to_string(), "-12.34");
        assert!(!tx.is_excluded);
    }

    #[test]
    fn test_ledger_orders_accounts_before_assets() {
        let item = |id: i64, name: &str| BalanceItem {
            id,
            name: name.to_string(),
            balance_group: BalanceGroup::Cash,
            is_auto_calculated: false,
            type_label: "Other".to_string(),
        };
        let ledger = Ledger::new(vec![item(1, "a")], vec![item(1, "b")], vec![], vec![]);
        assert_eq!(ledger.entities.len(), 2);
        assert_eq!(ledger.entities[0].entity_ref(), EntityRef::account(1));
        assert_eq!(ledger.entities[1].entity_ref(), EntityRef::asset(1));
        assert_eq!(ledger.entities[1].name(), "b");
    }
}
