use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;

const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");
const EXAMPLE_VAULT: &str = include_str!("../../docs/example_vault.yaml");

/// Creates a default configuration and example vault at the default location
pub fn setup() -> Result<()> {
    let path = AppConfig::default_config_path()?;
    setup_at_path(path)
}

/// Creates a default configuration at `path` with an example vault next to it.
///
/// An existing vault is left untouched.
pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;
    tracing::info!("Created default configuration at {}", path.display());

    let vault_path = AppConfig::load_from_path(path)?.vault_path()?;
    if vault_path.exists() {
        tracing::info!("Keeping existing vault at {}", vault_path.display());
        return Ok(());
    }
    std::fs::write(&vault_path, EXAMPLE_VAULT)
        .with_context(|| format!("Failed to write vault file to {}", vault_path.display()))?;
    tracing::info!("Created example vault at {}", vault_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::VaultSource;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_setup_creates_config_and_vault() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.yaml");

        setup_at_path(&config_path)?;

        assert!(config_path.exists());
        let content = fs::read_to_string(&config_path)?;
        assert!(content.contains("vault_path:"));
        assert!(content.contains("currency:"));
        assert!(content.contains("# Example configuration file for networth"));
        assert!(temp_dir.path().join("vault.yaml").exists());

        Ok(())
    }

    #[test]
    fn test_setup_keeps_existing_vault() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let vault_path = temp_dir.path().join("vault.yaml");
        fs::write(&vault_path, "accounts: []\n")?;

        setup_at_path(temp_dir.path().join("config.yaml"))?;
        assert_eq!(fs::read_to_string(&vault_path)?, "accounts: []\n");

        Ok(())
    }

    #[test]
    fn test_setup_fails_if_config_exists() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.yaml");

        std::fs::write(&config_path, "test")?;

        let result = setup_at_path(&config_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already exists"));

        Ok(())
    }

    #[test]
    fn test_examples_are_valid() -> Result<()> {
        let config: AppConfig = serde_yaml::from_str(EXAMPLE_CONFIG)
            .context("Failed to parse example config as YAML")?;
        assert_eq!(config.vault_path.as_deref(), Some("vault.yaml"));
        assert!(!config.currency.is_empty());

        VaultSource::from_yaml(EXAMPLE_VAULT).context("Failed to parse example vault")?;
        Ok(())
    }
}
