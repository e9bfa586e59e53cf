//! Groups current balances into type buckets and balance groups.

use crate::core::model::{BALANCE_GROUPS, BalanceGroup, Entity};
use crate::core::numeric::{SortOrder, sort_by_magnitude};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// One account or asset with its balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSheetItem {
    pub name: String,
    pub balance_group: BalanceGroup,
    pub type_label: String,
    pub current_balance: Decimal,
}

impl BalanceSheetItem {
    pub fn new(entity: &Entity, current_balance: Decimal) -> Self {
        Self {
            name: entity.name().to_string(),
            balance_group: entity.balance_group(),
            type_label: entity.type_label().to_string(),
            current_balance,
        }
    }
}

/// Items sharing an account or asset type within one balance group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeBucket {
    pub type_label: String,
    pub balance_group: BalanceGroup,
    pub current_balance: Decimal,
    pub items: Vec<BalanceSheetItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupBucket {
    pub id: u8,
    pub label: &'static str,
    pub current_balance: Decimal,
    pub type_buckets: Vec<TypeBucket>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSheet {
    pub balance_groups: Vec<GroupBucket>,
}

impl BalanceSheet {
    pub fn net_worth(&self) -> Decimal {
        self.balance_groups.iter().map(|g| g.current_balance).sum()
    }
}

/// Builds the balance sheet.
///
/// Items and type buckets are ranked by `|current_balance|` in `order`, ties
/// keeping their input order. Groups are listed by id, highest first, and
/// every declared group is present even when it has no members.
pub fn aggregate(mut items: Vec<BalanceSheetItem>, order: SortOrder) -> BalanceSheet {
    sort_by_magnitude(&mut items, order, |item| item.current_balance);

    let mut type_buckets: Vec<TypeBucket> = Vec::new();
    let mut bucket_index: HashMap<(BalanceGroup, String), usize> = HashMap::new();
    for item in items {
        let key = (item.balance_group, item.type_label.clone());
        match bucket_index.get(&key) {
            Some(&idx) => {
                let bucket = &mut type_buckets[idx];
                bucket.current_balance += item.current_balance;
                bucket.items.push(item);
            }
            None => {
                bucket_index.insert(key, type_buckets.len());
                type_buckets.push(TypeBucket {
                    type_label: item.type_label.clone(),
                    balance_group: item.balance_group,
                    current_balance: item.current_balance,
                    items: vec![item],
                });
            }
        }
    }
    sort_by_magnitude(&mut type_buckets, order, |bucket| bucket.current_balance);

    let mut by_group: HashMap<BalanceGroup, Vec<TypeBucket>> = HashMap::new();
    for bucket in type_buckets {
        by_group.entry(bucket.balance_group).or_default().push(bucket);
    }

    let mut balance_groups: Vec<GroupBucket> = BALANCE_GROUPS
        .iter()
        .map(|group| {
            let type_buckets = by_group.remove(group).unwrap_or_default();
            GroupBucket {
                id: group.id(),
                label: group.label(),
                current_balance: type_buckets.iter().map(|b| b.current_balance).sum(),
                type_buckets,
            }
        })
        .collect();
    balance_groups.sort_by(|a, b| b.id.cmp(&a.id));

    BalanceSheet { balance_groups }
}
