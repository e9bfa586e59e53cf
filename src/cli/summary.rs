use super::{OutputFormat, ui};
use crate::core::ReportEngine;
use crate::core::cashflow::{PeriodCashflow, TrailingCashflow, TrailingPeriod};
use crate::core::numeric::proportion_between;
use crate::core::summary::BigPictureReport;
use anyhow::Result;
use chrono::Datelike;
use comfy_table::{Attribute, Cell};
use rust_decimal::Decimal;

/// `Jun`, or `Jan '24` for January so year changes stand out.
fn month_label(period: &PeriodCashflow) -> String {
    if period.month.month() == 1 {
        period.month.format("%b '%y").to_string()
    } else {
        period.month.format("%b").to_string()
    }
}

/// Deficits scale against the worst month, surpluses against the best.
fn surplus_scale(surplus: Decimal, highest: Decimal, lowest: Decimal) -> Decimal {
    if surplus < Decimal::ZERO {
        proportion_between(surplus, lowest)
    } else {
        proportion_between(surplus, highest)
    }
}

impl TrailingCashflow {
    pub fn display_as_table(&self, currency: &str) -> String {
        let highest = self.periods.iter().map(|p| p.surplus).max().unwrap_or(Decimal::ZERO);
        let lowest = self.periods.iter().map(|p| p.surplus).min().unwrap_or(Decimal::ZERO);

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Month"),
            ui::header_cell("Income"),
            ui::header_cell("Expenses"),
            ui::header_cell("Surplus"),
            ui::header_cell("Scale"),
        ]);
        for period in &self.periods {
            table.add_row(vec![
                Cell::new(month_label(period)),
                ui::money_cell(period.income, currency),
                ui::money_cell(period.expenses, currency),
                ui::total_cell(period.surplus, currency),
                ui::percentage_cell(surplus_scale(period.surplus, highest, lowest)),
            ]);
        }

        let mut averages = ui::new_styled_table();
        averages.set_header(vec![
            ui::header_cell("Average"),
            ui::header_cell("Income"),
            ui::header_cell("Expenses"),
            ui::header_cell("Surplus"),
        ]);
        for (label, period) in [
            ("Last 6 months", TrailingPeriod::LastSixMonths),
            ("Last 12 months", TrailingPeriod::LastTwelveMonths),
        ] {
            let average = self.average(period);
            averages.add_row(vec![
                Cell::new(label),
                ui::money_cell(average.income_average, currency),
                ui::money_cell(average.expenses_average, currency),
                ui::total_cell(average.surplus_average, currency),
            ]);
        }

        format!(
            "{}\n\n{table}\n\n{averages}",
            ui::style_text("Cashflow", ui::StyleType::Title)
        )
    }
}

impl BigPictureReport {
    pub fn display_as_table(&self, currency: &str, window_months: u32) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Balance group"),
            ui::header_cell(&format!("Balance ({currency})")),
            ui::header_cell("Share"),
        ]);

        let gross: Decimal = self
            .summary
            .balance_groups
            .iter()
            .map(|g| g.current_balance.abs())
            .sum();
        for group in &self.summary.balance_groups {
            table.add_row(vec![
                Cell::new(group.label),
                ui::money_cell(group.current_balance, currency),
                ui::percentage_cell(proportion_between(group.current_balance.abs(), gross)),
            ]);
        }
        table.add_row(vec![
            Cell::new("Net worth").add_attribute(Attribute::Bold),
            ui::total_cell(self.summary.net_worth, currency),
            Cell::new(""),
        ]);

        let mut output = format!(
            "{}\n\n{table}",
            ui::style_text("Big picture", ui::StyleType::Title)
        );
        output.push_str("\n\n");
        match &self.trailing_cashflow {
            Some(cashflow) => output.push_str(&cashflow.display_as_table(currency)),
            None => output.push_str(&ui::style_text(
                &format!("No transactions in the last {window_months} months"),
                ui::StyleType::Subtle,
            )),
        }
        output
    }
}

pub fn run(
    engine: &ReportEngine,
    window_months: u32,
    currency: &str,
    format: OutputFormat,
) -> Result<()> {
    let report = engine.big_picture(window_months);
    match format {
        OutputFormat::Json => super::print_json(&report),
        OutputFormat::Table => {
            println!("{}", report.display_as_table(currency, window_months));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::surplus_scale;
    use crate::core::balance_sheet::BalanceSheetItem;
    use crate::core::cashflow::trailing_cashflow;
    use crate::core::dates::utc_midnight;
    use crate::core::model::{BalanceGroup, Transaction};
    use crate::core::summary::{BigPictureReport, big_picture};
    use chrono::{DateTime, NaiveDate, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        utc_midnight(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn tx(date: DateTime<Utc>, value: Decimal) -> Transaction {
        Transaction {
            account_id: 1,
            date,
            value,
            is_excluded: false,
        }
    }

    #[test]
    fn test_cashflow_table_labels_january_with_year() {
        let cashflow = trailing_cashflow(
            &[
                tx(day(2023, 12, 5), dec!(2000)),
                tx(day(2024, 1, 5), dec!(-500)),
                tx(day(2024, 2, 5), dec!(1000)),
            ],
            day(2024, 2, 20),
            13,
        )
        .unwrap();
        let output = console::strip_ansi_codes(&cashflow.display_as_table("USD")).to_string();

        assert!(output.contains("Dec"));
        assert!(output.contains("Jan '24"));
        assert!(output.contains("Feb"));
        assert!(output.contains("50%"));
        assert!(output.contains("Last 12 months"));
    }

    #[test]
    fn test_worst_deficit_and_best_surplus_both_scale_to_full() {
        assert_eq!(surplus_scale(dec!(-315), dec!(410), dec!(-315)), dec!(100));
        assert_eq!(surplus_scale(dec!(410), dec!(410), dec!(-315)), dec!(100));
        assert_eq!(surplus_scale(dec!(205), dec!(410), dec!(-315)), dec!(50));
        assert_eq!(surplus_scale(dec!(-63), dec!(410), dec!(-315)), dec!(20));
        assert_eq!(surplus_scale(Decimal::ZERO, dec!(410), dec!(-315)), Decimal::ZERO);

        let cashflow = trailing_cashflow(
            &[tx(day(2024, 1, 5), dec!(-315)), tx(day(2024, 2, 5), dec!(410))],
            day(2024, 2, 20),
            13,
        )
        .unwrap();
        let output = console::strip_ansi_codes(&cashflow.display_as_table("USD")).to_string();
        let full_rows = output
            .lines()
            .filter(|line| line.contains("$") && line.contains("100%"))
            .count();
        assert_eq!(full_rows, 2, "{output}");
    }

    #[test]
    fn test_summary_without_cashflow_says_so() {
        let report = BigPictureReport {
            summary: big_picture(&[BalanceSheetItem {
                name: "Savings".to_string(),
                balance_group: BalanceGroup::Cash,
                type_label: "Savings".to_string(),
                current_balance: dec!(1523),
            }]),
            trailing_cashflow: None,
        };
        let output = console::strip_ansi_codes(&report.display_as_table("USD", 13)).to_string();

        assert!(output.contains("Net worth"));
        assert!(output.contains("$1,523"));
        assert!(output.contains("No transactions in the last 13 months"));
    }
}
