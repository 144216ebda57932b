use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::storage::DEFAULT_STORAGE_KEY;

// ============================================================================
// Application Configuration
// ============================================================================
//
// Read from the environment with the SEWIN prefix:
// - SEWIN_DATA_DIR   directory for the file store (default `.sewin`)
// - SEWIN_STORE_KEY  key the ledger document is stored under (default `sewin:v1`)
// - SEWIN_SEED_DEMO  install the demo data into an empty ledger (default true)
//
// The log filter comes from RUST_LOG and is read by the subscriber in main.
//
// ============================================================================

pub const ENV_PREFIX: &str = "SEWIN";
pub const DEFAULT_DATA_DIR: &str = ".sewin";
pub const DEFAULT_LOG_FILTER: &str = "info,sewin_ledger=debug";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    #[serde(rename = "store_key")]
    pub storage_key: String,
    #[serde(rename = "seed_demo")]
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed_demo_data: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_environment(Self::environment())
    }

    /// Environment source for the SEWIN_ variables; blank values keep defaults
    pub fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .ignore_empty(true)
    }

    /// Layer an environment source over the defaults
    pub fn from_environment(environment: config::Environment) -> Result<Self> {
        config::Config::builder()
            .add_source(environment)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_environment(AppConfig::environment().source(Some(vars)))
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.storage_key, "sewin:v1");
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SEWIN_DATA_DIR", "/var/lib/sewin"),
            ("SEWIN_STORE_KEY", "shop:test"),
            ("SEWIN_SEED_DEMO", "false"),
        ])
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/sewin"));
        assert_eq!(config.storage_key, "shop:test");
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_unprefixed_variables_are_ignored() {
        let config = config_from(&[("STORE_KEY", "other"), ("RUST_LOG", "warn")]).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = config_from(&[("SEWIN_STORE_KEY", "")]).unwrap();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_invalid_flag_is_an_error() {
        assert!(config_from(&[("SEWIN_SEED_DEMO", "maybe")]).is_err());
    }
}
