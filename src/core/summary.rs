//! Big-picture net worth summary.

use crate::core::balance_sheet::BalanceSheetItem;
use crate::core::cashflow::TrailingCashflow;
use crate::core::model::{BALANCE_GROUPS, BalanceGroup};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BigPictureGroup {
    pub id: u8,
    pub label: &'static str,
    pub current_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BigPictureSummary {
    pub net_worth: Decimal,
    pub balance_groups: Vec<BigPictureGroup>,
}

impl BigPictureSummary {
    pub fn group(&self, group: BalanceGroup) -> Option<&BigPictureGroup> {
        self.balance_groups.iter().find(|g| g.id == group.id())
    }
}

/// The dashboard: totals per balance group plus recent cashflow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BigPictureReport {
    pub summary: BigPictureSummary,
    /// `None` when there were no transactions in the cashflow window.
    pub trailing_cashflow: Option<TrailingCashflow>,
}

/// Totals current balances per balance group.
///
/// Entities with a zero balance are left out; every declared group is still
/// listed, highest id first.
pub fn big_picture(items: &[BalanceSheetItem]) -> BigPictureSummary {
    let mut totals: HashMap<BalanceGroup, Decimal> = HashMap::new();
    for item in items.iter().filter(|item| !item.current_balance.is_zero()) {
        *totals.entry(item.balance_group).or_insert(Decimal::ZERO) += item.current_balance;
    }

    let mut balance_groups: Vec<BigPictureGroup> = BALANCE_GROUPS
        .iter()
        .map(|group| BigPictureGroup {
            id: group.id(),
            label: group.label(),
            current_balance: totals.get(group).copied().unwrap_or(Decimal::ZERO),
        })
        .collect();
    balance_groups.sort_by(|a, b| b.id.cmp(&a.id));

    BigPictureSummary {
        net_worth: balance_groups.iter().map(|g| g.current_balance).sum(),
        balance_groups,
    }
}
