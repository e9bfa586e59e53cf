use super::{OutputFormat, ui};
use crate::core::ReportEngine;
use crate::core::balance_sheet::BalanceSheet;
use crate::core::numeric::SortOrder;
use anyhow::Result;
use comfy_table::{Attribute, Cell};
use rust_decimal::Decimal;

impl BalanceSheet {
    pub fn display_as_table(&self, currency: &str) -> String {
        let mut output = String::new();

        for group in &self.balance_groups {
            let mut table = ui::new_styled_table();
            table.set_header(vec![
                ui::header_cell("Name"),
                ui::header_cell(&format!("Balance ({currency})")),
            ]);

            for bucket in &group.type_buckets {
                table.add_row(vec![
                    Cell::new(&bucket.type_label).add_attribute(Attribute::Bold),
                    ui::total_cell(bucket.current_balance, currency),
                ]);
                for item in &bucket.items {
                    table.add_row(vec![
                        Cell::new(format!("  {}", item.name)),
                        ui::money_cell(item.current_balance, currency),
                    ]);
                }
            }

            output.push_str(&format!(
                "{}  {}\n",
                ui::style_text(group.label, ui::StyleType::Title),
                ui::format_currency(group.current_balance, currency, 0)
            ));
            if group.type_buckets.is_empty() {
                output.push_str(&ui::style_text("No balances\n\n", ui::StyleType::Subtle));
            } else {
                output.push_str(&format!("{table}\n\n"));
            }
        }

        let net_worth = ui::format_currency(self.net_worth(), currency, 0);
        let net_worth_style = if self.net_worth() < Decimal::ZERO {
            ui::StyleType::Error
        } else {
            ui::StyleType::TotalValue
        };
        output.push_str(&format!(
            "Net worth ({}): {}",
            ui::style_text(currency, ui::StyleType::TotalLabel),
            ui::style_text(&net_worth, net_worth_style)
        ));
        output
    }
}

pub fn run(
    engine: &ReportEngine,
    order: SortOrder,
    currency: &str,
    format: OutputFormat,
) -> Result<()> {
    let sheet = engine.balance_sheet(order);
    match format {
        OutputFormat::Json => super::print_json(&sheet),
        OutputFormat::Table => {
            println!("{}", sheet.display_as_table(currency));
            Ok(())
        }
    }
}
