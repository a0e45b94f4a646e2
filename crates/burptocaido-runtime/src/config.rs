use crate::{Error, Result};
use burptocaido_store::{PRIMARY_DB_FILE, RAW_DB_FILE, SessionOptions};
use burptocaido_types::{PayloadPolicy, TimestampPolicy, TransactionScope};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How items are decoded and committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub payload_policy: PayloadPolicy,
    pub timestamp_policy: TimestampPolicy,
    pub transaction_scope: TransactionScope,
}

/// Where the Caido databases live inside a project directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub primary_file: String,
    pub raw_file: String,
    pub enforce_foreign_keys: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            primary_file: PRIMARY_DB_FILE.to_string(),
            raw_file: RAW_DB_FILE.to_string(),
            enforce_foreign_keys: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    /// Load a config file, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|err| Error::Config(format!("Cannot read {}: {}", path.display(), err)))?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            primary_file: self.store.primary_file.clone(),
            raw_file: self.store.raw_file.clone(),
            enforce_foreign_keys: self.store.enforce_foreign_keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.conversion.payload_policy, PayloadPolicy::Strict);
        assert_eq!(config.conversion.timestamp_policy, TimestampPolicy::Abort);
        assert_eq!(config.conversion.transaction_scope, TransactionScope::Item);
        assert_eq!(config.session_options(), SessionOptions::default());
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path)?;
        assert_eq!(config, Config::default());

        Ok(())
    }

    #[test]
    fn test_load_partial_file() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[conversion]\npayload_policy = \"lenient\"\n\n[store]\nraw_file = \"blobs.db\"\n",
        )?;

        let config = Config::load_from(&config_path)?;
        assert_eq!(config.conversion.payload_policy, PayloadPolicy::Lenient);
        assert_eq!(config.conversion.transaction_scope, TransactionScope::Item);

        let options = config.session_options();
        assert_eq!(options.primary_file, PRIMARY_DB_FILE);
        assert_eq!(options.raw_file, "blobs.db");
        assert!(!options.enforce_foreign_keys);

        Ok(())
    }

    #[test]
    fn test_malformed_file_is_config_error() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[conversion]\ntransaction_scope = \"forever\"\n")?;

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().starts_with("Configuration error:"));

        Ok(())
    }
}
