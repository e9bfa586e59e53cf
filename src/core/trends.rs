//! Weekly balance series per entity and per balance group.

use crate::core::balance::BalanceResolver;
use crate::core::dates::{self, utc_midnight};
use crate::core::model::{BALANCE_GROUPS, BalanceGroup, Entity};
use crate::core::numeric::{SortOrder, sort_by_magnitude};
use crate::core::palette::{self, Rgb};
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Months, NaiveDate, Utc};
use futures::future::join_all;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

pub const DEFAULT_WINDOW_YEARS: u32 = 2;
pub const MAX_WINDOW_YEARS: u32 = 100;

/// Chart a series is drawn on.
///
/// `NetWorth` holds the aggregate series, the others hold one series per
/// entity of the matching balance group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendCategory {
    NetWorth,
    Cash,
    Debt,
    Investments,
    OtherAssets,
}

impl TrendCategory {
    pub const ALL: [TrendCategory; 5] = [
        TrendCategory::NetWorth,
        TrendCategory::Cash,
        TrendCategory::Debt,
        TrendCategory::Investments,
        TrendCategory::OtherAssets,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TrendCategory::NetWorth => "Net worth",
            TrendCategory::Cash => BalanceGroup::Cash.label(),
            TrendCategory::Debt => BalanceGroup::Debt.label(),
            TrendCategory::Investments => BalanceGroup::Investments.label(),
            TrendCategory::OtherAssets => BalanceGroup::OtherAssets.label(),
        }
    }

    pub fn base_color(self) -> Rgb {
        let (r, g, b) = match self {
            TrendCategory::NetWorth => (0x33, 0x33, 0x33),
            TrendCategory::Cash => (0x00, 0xa3, 0x6f),
            TrendCategory::Debt => (0xe7, 0x52, 0x58),
            TrendCategory::Investments => (0xb1, 0x9b, 0x70),
            TrendCategory::OtherAssets => (0x52, 0x55, 0xac),
        };
        Rgb { r, g, b }
    }

    /// Debt lists the smallest balance first, everything else the largest.
    fn shading_order(self) -> SortOrder {
        match self {
            TrendCategory::Debt => SortOrder::Ascending,
            _ => SortOrder::Descending,
        }
    }
}

impl From<BalanceGroup> for TrendCategory {
    fn from(group: BalanceGroup) -> Self {
        match group {
            BalanceGroup::Cash => TrendCategory::Cash,
            BalanceGroup::Debt => TrendCategory::Debt,
            BalanceGroup::Investments => TrendCategory::Investments,
            BalanceGroup::OtherAssets => TrendCategory::OtherAssets,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub label: String,
    /// One balance per week label.
    pub data: Vec<Decimal>,
    pub color: String,
}

impl TrendSeries {
    pub fn latest(&self) -> Decimal {
        self.data.last().copied().unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    /// ISO dates of the Sunday starting each week.
    pub labels: Vec<String>,
    pub series_by_category: BTreeMap<TrendCategory, Vec<TrendSeries>>,
}

impl TrendReport {
    pub fn series(&self, category: TrendCategory) -> &[TrendSeries] {
        self.series_by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Sundays from `window_years` before the end of the current month up to it.
///
/// The window is capped at [`MAX_WINDOW_YEARS`].
pub fn week_boundaries(now: DateTime<Utc>, window_years: u32) -> Vec<NaiveDate> {
    let end = dates::last_day_of_month(now.date_naive());
    let months = window_years.min(MAX_WINDOW_YEARS) * 12;
    let start = end
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN);
    dates::week_starts(start, end)
}

/// Builds the weekly trend report.
///
/// Each entity is sampled on the blocking pool; results are assembled in
/// entity order. `on_progress` is called once per sampled entity.
pub async fn build_trends(
    entities: &[Entity],
    resolver: &BalanceResolver,
    now: DateTime<Utc>,
    window_years: u32,
    on_progress: &(dyn Fn() + Send + Sync),
) -> Result<TrendReport> {
    if window_years > MAX_WINDOW_YEARS {
        bail!("Trend window of {window_years} years exceeds the maximum of {MAX_WINDOW_YEARS}");
    }
    let weeks = week_boundaries(now, window_years);
    let labels: Vec<String> = weeks.iter().map(|w| w.format("%Y-%m-%d").to_string()).collect();
    let boundaries: Arc<[DateTime<Utc>]> = weeks.iter().map(|w| utc_midnight(*w)).collect();
    let week_count = boundaries.len();
    info!(
        weeks = week_count,
        entities = entities.len(),
        "Building trend series"
    );

    let sample_futures = entities.iter().map(|entity| {
        let history = resolver.history(entity);
        let boundaries = Arc::clone(&boundaries);
        async move {
            let sampled = tokio::task::spawn_blocking(move || history.sample(&boundaries)).await;
            on_progress();
            sampled
        }
    });
    let samples = join_all(sample_futures).await;

    let mut series_by_category: BTreeMap<TrendCategory, Vec<TrendSeries>> = TrendCategory::ALL
        .iter()
        .map(|category| (*category, Vec::new()))
        .collect();
    let mut group_totals: HashMap<BalanceGroup, Vec<Decimal>> = HashMap::new();
    let mut net_worth = vec![Decimal::ZERO; week_count];

    for (entity, sampled) in entities.iter().zip(samples) {
        let data = sampled
            .with_context(|| format!("Failed to sample balances for {}", entity.name()))?;
        let totals = group_totals
            .entry(entity.balance_group())
            .or_insert_with(|| vec![Decimal::ZERO; week_count]);
        for (week, balance) in data.iter().enumerate() {
            totals[week] += *balance;
            net_worth[week] += *balance;
        }
        series_by_category
            .entry(entity.balance_group().into())
            .or_default()
            .push(TrendSeries {
                label: entity.name().to_string(),
                data,
                color: String::new(),
            });
    }

    for (category, series) in series_by_category.iter_mut() {
        shade_series(series, category.base_color(), category.shading_order());
    }

    let mut aggregates = vec![TrendSeries {
        label: TrendCategory::NetWorth.label().to_string(),
        data: net_worth,
        color: TrendCategory::NetWorth.base_color().to_string(),
    }];
    for group in BALANCE_GROUPS {
        let category = TrendCategory::from(group);
        aggregates.push(TrendSeries {
            label: category.label().to_string(),
            data: group_totals
                .remove(&group)
                .unwrap_or_else(|| vec![Decimal::ZERO; week_count]),
            color: category.base_color().to_string(),
        });
    }
    series_by_category.insert(TrendCategory::NetWorth, aggregates);

    debug!("Trend series complete");
    Ok(TrendReport {
        labels,
        series_by_category,
    })
}

/// Sorts by the latest balance and hands out shades of `base` in that order.
fn shade_series(series: &mut [TrendSeries], base: Rgb, order: SortOrder) {
    sort_by_magnitude(series, order, TrendSeries::latest);
    let count = series.len();
    for (s, color) in series.iter_mut().zip(palette::shades(base, count)) {
        s.color = color.to_string();
    }
}
