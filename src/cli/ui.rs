use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::{Decimal, RoundingStrategy};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.to_uppercase().as_str() {
        "USD" | "CAD" | "AUD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "INR" => Some("₹"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

/// Formats money as `$1,523` / `-$1,523`, or `1,523 CHF` when the currency
/// has no known symbol.
pub fn format_currency(value: Decimal, currency: &str, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.*}", decimals as usize, rounded.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{grouped}"),
        None => format!("{sign}{grouped} {}", currency.to_uppercase()),
    }
}

/// Right-aligned money cell, red when negative and green when positive.
pub fn money_cell(value: Decimal, currency: &str) -> Cell {
    let cell = Cell::new(format_currency(value, currency, 0)).set_alignment(CellAlignment::Right);
    if value < Decimal::ZERO {
        cell.fg(Color::Red)
    } else if value > Decimal::ZERO {
        cell.fg(Color::Green)
    } else {
        cell
    }
}

/// Bold money cell for totals.
pub fn total_cell(value: Decimal, currency: &str) -> Cell {
    money_cell(value, currency).add_attribute(Attribute::Bold)
}

pub fn percentage_cell(value: Decimal) -> Cell {
    Cell::new(format!("{}%", value.normalize()))
        .fg(Color::DarkGrey)
        .set_alignment(CellAlignment::Right)
}

/// Creates a new `indicatif::ProgressBar` with standard styling.
pub fn new_progress_bar(len: u64, with_message: bool) -> ProgressBar {
    let template = if with_message {
        "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})"
    } else {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})"
    };

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

/// Prints a separator line matching the terminal width.
pub fn print_separator() {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    println!("\n{}", "─".repeat(term_width));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_currency_whole_units() {
        assert_eq!(format_currency(dec!(1523), "USD", 0), "$1,523");
        assert_eq!(format_currency(dec!(-1523.4), "USD", 0), "-$1,523");
        assert_eq!(format_currency(dec!(63225.5), "usd", 0), "$63,226");
        assert_eq!(format_currency(dec!(-0.4), "USD", 0), "$0");
        assert_eq!(format_currency(dec!(999), "USD", 0), "$999");
    }

    #[test]
    fn test_format_currency_with_decimals_and_codes() {
        assert_eq!(format_currency(dec!(1234567.891), "EUR", 2), "€1,234,567.89");
        assert_eq!(format_currency(dec!(-311), "GBP", 2), "-£311.00");
        assert_eq!(format_currency(dec!(1523), "CHF", 0), "1,523 CHF");
    }
}
