//! Resolves the balance of an account or asset as of a point in time.
//!
//! Each entity's records are sorted once into a [`BalanceHistory`], a step
//! function of its balance. Point lookups binary-search it and series are
//! produced by walking a [`BalanceCursor`] forward, so building weekly series
//! never rescans the underlying records.

use crate::core::model::{BalanceStatement, Entity, EntityRef, Ledger, Transaction};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Balance of a single entity over time.
///
/// `points` is sorted by date and every value holds from its date until the
/// next point. Before the first point the balance is zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceHistory {
    points: Vec<(DateTime<Utc>, Decimal)>,
}

impl BalanceHistory {
    /// Running sum of every non-excluded transaction.
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut entries: Vec<(DateTime<Utc>, Decimal)> = transactions
            .into_iter()
            .filter(|tx| !tx.is_excluded)
            .map(|tx| (tx.date, tx.value))
            .collect();
        entries.sort_by_key(|(date, _)| *date);

        let mut points: Vec<(DateTime<Utc>, Decimal)> = Vec::with_capacity(entries.len());
        let mut running = Decimal::ZERO;
        for (date, value) in entries {
            running += value;
            match points.last_mut() {
                Some(last) if last.0 == date => last.1 = running,
                _ => points.push((date, running)),
            }
        }
        Self { points }
    }

    /// Latest statement wins; on equal dates the one supplied last wins.
    pub fn from_statements<'a>(statements: impl IntoIterator<Item = &'a BalanceStatement>) -> Self {
        let mut entries: Vec<(DateTime<Utc>, Decimal)> = statements
            .into_iter()
            .map(|statement| (statement.date, statement.value))
            .collect();
        entries.sort_by_key(|(date, _)| *date);

        let mut points: Vec<(DateTime<Utc>, Decimal)> = Vec::with_capacity(entries.len());
        for (date, value) in entries {
            match points.last_mut() {
                Some(last) if last.0 == date => last.1 = value,
                _ => points.push((date, value)),
            }
        }
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn balance_at(&self, as_of: DateTime<Utc>) -> Decimal {
        let idx = self.points.partition_point(|(date, _)| *date <= as_of);
        if idx == 0 {
            Decimal::ZERO
        } else {
            self.points[idx - 1].1
        }
    }

    pub fn cursor(&self) -> BalanceCursor<'_> {
        BalanceCursor {
            points: &self.points,
            next: 0,
            current: Decimal::ZERO,
        }
    }

    /// Balance at each boundary, in boundary order.
    pub fn sample(&self, boundaries: &[DateTime<Utc>]) -> Vec<Decimal> {
        let mut cursor = self.cursor();
        boundaries.iter().map(|as_of| cursor.advance_to(*as_of)).collect()
    }
}

/// Forward-only walk over a [`BalanceHistory`].
#[derive(Debug, Clone)]
pub struct BalanceCursor<'a> {
    points: &'a [(DateTime<Utc>, Decimal)],
    next: usize,
    current: Decimal,
}

impl BalanceCursor<'_> {
    /// Balance as of `as_of`. Moving backwards falls back to a binary search.
    pub fn advance_to(&mut self, as_of: DateTime<Utc>) -> Decimal {
        if self.next > 0 && self.points[self.next - 1].0 > as_of {
            self.next = self.points.partition_point(|(date, _)| *date <= as_of);
            self.current = match self.next {
                0 => Decimal::ZERO,
                n => self.points[n - 1].1,
            };
            return self.current;
        }
        while let Some((date, value)) = self.points.get(self.next) {
            if *date > as_of {
                break;
            }
            self.current = *value;
            self.next += 1;
        }
        self.current
    }
}

/// Point-in-time balance lookups for every entity of a [`Ledger`].
#[derive(Debug, Clone, Default)]
pub struct BalanceResolver {
    histories: HashMap<EntityRef, Arc<BalanceHistory>>,
    empty: Arc<BalanceHistory>,
}

impl BalanceResolver {
    pub fn new(ledger: &Ledger) -> Self {
        let mut transactions_by_account: HashMap<i64, Vec<&Transaction>> = HashMap::new();
        for tx in &ledger.transactions {
            transactions_by_account.entry(tx.account_id).or_default().push(tx);
        }
        let mut statements_by_entity: HashMap<EntityRef, Vec<&BalanceStatement>> = HashMap::new();
        for statement in &ledger.statements {
            statements_by_entity.entry(statement.entity).or_default().push(statement);
        }

        let mut histories = HashMap::with_capacity(ledger.entities.len());
        for entity in &ledger.entities {
            let history = match entity {
                Entity::Account(item) if item.is_auto_calculated => {
                    let transactions = transactions_by_account.remove(&item.id).unwrap_or_default();
                    BalanceHistory::from_transactions(transactions)
                }
                Entity::Account(_) | Entity::Asset(_) => {
                    let statements = statements_by_entity
                        .remove(&entity.entity_ref())
                        .unwrap_or_default();
                    BalanceHistory::from_statements(statements)
                }
            };
            debug!(
                entity = entity.name(),
                points = history.points.len(),
                "Built balance history"
            );
            histories.insert(entity.entity_ref(), Arc::new(history));
        }

        for (entity, statements) in &statements_by_entity {
            if !histories.contains_key(entity) {
                warn!(?entity, count = statements.len(), "Ignoring statements for unknown entity");
            }
        }
        for (account_id, transactions) in &transactions_by_account {
            if !histories.contains_key(&EntityRef::account(*account_id)) {
                warn!(
                    account_id,
                    count = transactions.len(),
                    "Ignoring transactions for unknown account"
                );
            }
        }

        Self {
            histories,
            empty: Arc::new(BalanceHistory::default()),
        }
    }

    /// Balance of `entity` as of `as_of`; zero when it has no data yet.
    pub fn resolve(&self, entity: &Entity, as_of: DateTime<Utc>) -> Decimal {
        self.history(entity).balance_at(as_of)
    }

    pub fn current_balance(&self, entity: &Entity) -> Decimal {
        self.resolve(entity, Utc::now())
    }

    pub fn history(&self, entity: &Entity) -> Arc<BalanceHistory> {
        match self.histories.get(&entity.entity_ref()) {
            Some(history) => Arc::clone(history),
            None => {
                debug!(
                    entity = entity.name(),
                    kind = ?entity.kind(),
                    "No balance history, resolving to zero"
                );
                Arc::clone(&self.empty)
            }
        }
    }
}
