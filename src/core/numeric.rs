//! Ranking and ratio helpers shared by the reports.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Direction for ranking balances by magnitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Smallest absolute value first.
    #[default]
    Ascending,
    Descending,
}

/// Compares two balances by absolute value in the given order.
pub fn cmp_magnitude(a: &Decimal, b: &Decimal, order: SortOrder) -> Ordering {
    let ordering = a.abs().cmp(&b.abs());
    match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}

/// Stable sort of `items` by the magnitude of `key`.
pub fn sort_by_magnitude<T>(items: &mut [T], order: SortOrder, key: impl Fn(&T) -> Decimal) {
    items.sort_by(|a, b| cmp_magnitude(&key(a), &key(b), order));
}

/// `num * 100 / total`, rounded to two places. Zero when either side is zero.
pub fn proportion_between(num: Decimal, total: Decimal) -> Decimal {
    if num.is_zero() || total.is_zero() {
        return Decimal::ZERO;
    }
    (num * Decimal::ONE_HUNDRED / total)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
