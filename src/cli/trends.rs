use super::{OutputFormat, ui};
use crate::core::ReportEngine;
use crate::core::trends::{TrendCategory, TrendReport, TrendSeries};
use anyhow::Result;
use comfy_table::{Cell, Color};
use rust_decimal::Decimal;

fn first_value(series: &TrendSeries) -> Decimal {
    series.data.first().copied().unwrap_or(Decimal::ZERO)
}

fn color_cell(color: &str) -> Cell {
    match color.parse::<crate::core::palette::Rgb>() {
        Ok(rgb) => Cell::new(color).fg(Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }),
        Err(_) => Cell::new(color),
    }
}

impl TrendReport {
    pub fn display_category(&self, category: TrendCategory, currency: &str) -> String {
        let series = self.series(category);
        let title = ui::style_text(category.label(), ui::StyleType::Title);
        if series.is_empty() {
            return format!("{title}\n{}", ui::style_text("No balances", ui::StyleType::Subtle));
        }

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Series"),
            ui::header_cell("Colour"),
            ui::header_cell(self.labels.first().map_or("Start", String::as_str)),
            ui::header_cell(self.labels.last().map_or("Latest", String::as_str)),
            ui::header_cell("Change"),
        ]);
        for s in series {
            let first = first_value(s);
            let latest = s.latest();
            table.add_row(vec![
                Cell::new(&s.label),
                color_cell(&s.color),
                ui::money_cell(first, currency),
                ui::total_cell(latest, currency),
                ui::money_cell(latest - first, currency),
            ]);
        }
        format!("{title}\n\n{table}")
    }
}

pub async fn run(
    engine: &ReportEngine,
    window_years: u32,
    currency: &str,
    format: OutputFormat,
) -> Result<()> {
    let pb = ui::new_progress_bar(engine.ledger().entities.len() as u64, true);
    pb.set_message("Sampling balances...");
    let pb_clone = pb.clone();
    let report = engine.trends(window_years, &move || pb_clone.inc(1)).await;
    pb.finish_and_clear();
    let report = report?;

    match format {
        OutputFormat::Json => super::print_json(&report),
        OutputFormat::Table => {
            println!(
                "Weekly balances over {} weeks, {} to {}",
                report.labels.len(),
                report.labels.first().map_or("-", String::as_str),
                report.labels.last().map_or("-", String::as_str),
            );
            for (i, category) in TrendCategory::ALL.iter().enumerate() {
                if i > 0 {
                    ui::print_separator();
                }
                println!("{}", report.display_category(*category, currency));
            }
            Ok(())
        }
    }
}
