use chrono::{DateTime, NaiveDate, Utc};
use networth::AppCommand;
use networth::cli::OutputFormat;
use networth::core::ReportEngine;
use networth::core::dates::utc_midnight;
use networth::core::model::BalanceGroup;
use networth::core::numeric::SortOrder;
use networth::core::trends::TrendCategory;
use networth::store::VaultSource;
use rust_decimal_macros::dec;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tracing::info;

const VAULT: &str = r#"
accounts:
  - id: 1
    name: "Checking"
    type: "Checking"
    balance_group: 1
    auto_calculated: true
    transactions:
      - date: 2024-04-01
        value: 3000
      - date: 2024-04-20
        value: -1200
      - date: 2024-05-01
        value: 3000
      - date: 2024-05-14
        value: -2500
      - date: 2024-05-15
        value: 10000
        excluded: true
  - id: 2
    name: "Visa"
    type: "Credit card"
    balance_group: 2
    statements:
      - date: 2024-03-31
        value: -450
      - date: 2024-05-31
        value: -300
assets:
  - id: 1
    name: "House"
    type: "Property"
    balance_group: 4
    statements:
      - date: 2023-01-01
        value: 250000
"#;

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    utc_midnight(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn write_workspace(dir: &Path) -> String {
    let config_path = dir.join("config.yaml");
    fs::write(dir.join("vault.yaml"), VAULT).expect("Failed to write vault file");
    fs::write(
        &config_path,
        "vault_path: vault.yaml\ncurrency: USD\ncashflow:\n  window_months: 13\n",
    )
    .expect("Failed to write config file");
    config_path.to_str().unwrap().to_string()
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_for_every_report() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_workspace(temp_dir.path());

    for format in [OutputFormat::Table, OutputFormat::Json] {
        let commands = [
            AppCommand::BalanceSheet {
                order: SortOrder::Ascending,
            },
            AppCommand::BalanceSheet {
                order: SortOrder::Descending,
            },
            AppCommand::Summary,
            AppCommand::Trends {
                window_years: Some(1),
            },
        ];
        for command in commands {
            let result = networth::run_command(command, Some(&config_path), format).await;
            assert!(
                result.is_ok(),
                "Command failed with: {:?}",
                result.err()
            );
        }
    }
}

#[test_log::test(tokio::test)]
async fn test_missing_vault_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, "vault_path: missing.yaml\n").unwrap();

    let result = networth::run_command(
        AppCommand::Summary,
        Some(config_path.to_str().unwrap()),
        OutputFormat::Table,
    )
    .await;
    let err = result.expect_err("Missing vault should fail");
    info!(error = %err, "Got expected error");
    assert!(err.to_string().contains("missing.yaml"));
}

#[test_log::test(tokio::test)]
async fn test_reports_from_vault_as_of_fixed_date() {
    let source = VaultSource::from_yaml(VAULT).expect("Failed to load vault");
    let engine = ReportEngine::load(&source, day(2024, 5, 20)).await.unwrap();

    let sheet = engine.balance_sheet(SortOrder::Ascending);
    let labels: Vec<&str> = sheet.balance_groups.iter().map(|g| g.label).collect();
    assert_eq!(labels, vec!["Other assets", "Investments", "Debt", "Cash"]);
    // Visa still uses the March statement on May 20th
    assert_eq!(sheet.net_worth(), dec!(2300) - dec!(450) + dec!(250000));

    let big_picture = engine.big_picture(13);
    assert_eq!(
        big_picture.summary.group(BalanceGroup::Cash).unwrap().current_balance,
        dec!(2300)
    );
    let cashflow = big_picture.trailing_cashflow.expect("Expected cashflow");
    assert_eq!(cashflow.periods.len(), 2);
    assert_eq!(cashflow.periods[0].surplus, dec!(1800));
    assert_eq!(cashflow.periods[1].income, dec!(3000));
    assert_eq!(cashflow.periods[1].expenses, dec!(-2500));
    assert_eq!(cashflow.last_6_months.income_average, dec!(1000));

    let trends = engine.trends(1, &|| ()).await.unwrap();
    let net_worth = &trends.series(TrendCategory::NetWorth)[0];
    assert_eq!(net_worth.data.len(), trends.labels.len());
    assert_eq!(trends.series(TrendCategory::OtherAssets)[0].latest(), dec!(250000));
}
