use crate::core::cashflow::DEFAULT_WINDOW_MONTHS;
use crate::core::trends::DEFAULT_WINDOW_YEARS;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CashflowConfig {
    pub window_months: u32,
}

impl Default for CashflowConfig {
    fn default() -> Self {
        CashflowConfig {
            window_months: DEFAULT_WINDOW_MONTHS,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TrendsConfig {
    pub window_years: u32,
}

impl Default for TrendsConfig {
    fn default() -> Self {
        TrendsConfig {
            window_years: DEFAULT_WINDOW_YEARS,
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Vault file; relative paths resolve against the config file's directory.
    pub vault_path: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub cashflow: CashflowConfig,
    #[serde(default)]
    pub trends: TrendsConfig,
    #[serde(skip)]
    config_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "networth").context("Could not determine project directories")
    }

    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.yaml"))
    }

    pub fn default_vault_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().join("vault.yaml"))
    }

    pub fn vault_path(&self) -> Result<PathBuf> {
        match &self.vault_path {
            Some(custom_path) => {
                let path = PathBuf::from(custom_path);
                match &self.config_dir {
                    Some(dir) if path.is_relative() => Ok(dir.join(path)),
                    _ => Ok(path),
                }
            }
            None => Self::default_vault_path(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let mut config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config.config_dir = path.as_ref().parent().map(Path::to_path_buf);
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
vault_path: "/data/vault.yaml"
currency: "EUR"
cashflow:
  window_months: 25
trends:
  window_years: 5
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.cashflow.window_months, 25);
        assert_eq!(config.trends.window_years, 5);
        assert_eq!(config.vault_path().unwrap(), PathBuf::from("/data/vault.yaml"));
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("vault_path: vault.yaml\n").unwrap();
        assert_eq!(config.currency, "USD");
        assert_eq!(config.cashflow, CashflowConfig::default());
        assert_eq!(config.cashflow.window_months, 13);
        assert_eq!(config.trends.window_years, 2);
    }

    #[test]
    fn test_relative_vault_path_resolves_against_config_dir() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "vault_path: records/vault.yaml\n")?;

        let config = AppConfig::load_from_path(&config_path)?;
        assert_eq!(config.vault_path()?, temp_dir.path().join("records/vault.yaml"));
        Ok(())
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "cashflow: [1, 2]\n").unwrap();
        let err = AppConfig::load_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
