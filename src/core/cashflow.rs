//! Monthly income, expenses and surplus over a trailing window.

use crate::core::dates::{self, utc_midnight};
use crate::core::model::Transaction;
use chrono::{DateTime, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_WINDOW_MONTHS: u32 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingPeriod {
    LastSixMonths,
    LastTwelveMonths,
}

impl TrailingPeriod {
    pub fn months(self) -> usize {
        match self {
            TrailingPeriod::LastSixMonths => 6,
            TrailingPeriod::LastTwelveMonths => 12,
        }
    }
}

/// Cashflow of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodCashflow {
    pub id: usize,
    pub month: NaiveDate,
    pub income: Decimal,
    /// Sum of debits, kept negative.
    pub expenses: Decimal,
    pub surplus: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodAverageCashflow {
    pub income_average: Decimal,
    pub expenses_average: Decimal,
    pub surplus_average: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrailingCashflow {
    /// Oldest month first, through the current month.
    pub periods: Vec<PeriodCashflow>,
    pub last_6_months: PeriodAverageCashflow,
    pub last_12_months: PeriodAverageCashflow,
}

impl TrailingCashflow {
    pub fn average(&self, period: TrailingPeriod) -> &PeriodAverageCashflow {
        match period {
            TrailingPeriod::LastSixMonths => &self.last_6_months,
            TrailingPeriod::LastTwelveMonths => &self.last_12_months,
        }
    }
}

/// Buckets the last `window_months` of transactions into calendar months.
///
/// Returns `None` when no non-excluded transaction falls in the window, so
/// callers can tell "no data" apart from months that net to zero.
pub fn trailing_cashflow(
    transactions: &[Transaction],
    now: DateTime<Utc>,
    window_months: u32,
) -> Option<TrailingCashflow> {
    let window_start = now
        .checked_sub_months(Months::new(window_months))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let selected: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| !tx.is_excluded && tx.date >= window_start && tx.date <= now)
        .collect();
    debug!(
        selected = selected.len(),
        window_months, "Selected transactions for cashflow"
    );

    let earliest = selected.iter().map(|tx| tx.date).min()?;
    let months = dates::month_starts(earliest.date_naive(), now.date_naive());

    let mut periods: Vec<PeriodCashflow> = months
        .iter()
        .enumerate()
        .map(|(id, month)| PeriodCashflow {
            id,
            month: *month,
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
            surplus: Decimal::ZERO,
        })
        .collect();

    let first_month = months[0];
    for tx in selected {
        // Half-open [month_start, next_month_start) at UTC midnight
        let Some(period) = usize::try_from(dates::months_between(first_month, tx.date.date_naive()))
            .ok()
            .and_then(|idx| periods.get_mut(idx))
        else {
            continue;
        };
        debug_assert!(tx.date >= utc_midnight(period.month));
        debug_assert!(tx.date < utc_midnight(dates::next_month_start(period.month)));
        if tx.value > Decimal::ZERO {
            period.income += tx.value;
        } else if tx.value < Decimal::ZERO {
            period.expenses += tx.value;
        }
    }
    for period in &mut periods {
        period.surplus = period.income + period.expenses;
    }

    let last_6_months = average_of_recent(&periods, TrailingPeriod::LastSixMonths);
    let last_12_months = average_of_recent(&periods, TrailingPeriod::LastTwelveMonths);

    Some(TrailingCashflow {
        periods,
        last_6_months,
        last_12_months,
    })
}

/// Averages the most recent months, always dividing by the full period length.
fn average_of_recent(periods: &[PeriodCashflow], period: TrailingPeriod) -> PeriodAverageCashflow {
    let months = period.months();
    let recent = periods.iter().rev().take(months);
    let (income, expenses) = recent.fold((Decimal::ZERO, Decimal::ZERO), |(income, expenses), p| {
        (income + p.income, expenses + p.expenses)
    });
    let divisor = Decimal::from(months);
    let income_average = income / divisor;
    let expenses_average = expenses / divisor;

    PeriodAverageCashflow {
        income_average,
        expenses_average,
        surplus_average: income_average + expenses_average,
    }
}
