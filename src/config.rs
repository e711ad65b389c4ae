// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_intention_path() -> String {
    "intentions".to_string()
}

fn default_daily_log_path() -> String {
    "daily log".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Vault folder that receives intention notes.
    #[serde(default = "default_intention_path")]
    pub intention_path: String,
    /// Vault folder that receives the daily log files.
    #[serde(default = "default_daily_log_path")]
    pub daily_log_path: String,
    /// Root of the note vault. Falls back to `<data dir>/vault`.
    #[serde(default)]
    pub vault_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            intention_path: default_intention_path(),
            daily_log_path: default_daily_log_path(),
            vault_root: None,
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Load the configuration, writing the defaults on first run.
    ///
    /// Only a missing file falls back to defaults; a file that exists but
    /// cannot be read or parsed is reported.
    pub fn load_or_init(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                let config = Self::default();
                if let Err(save_err) = config.save(ctx) {
                    log::warn!("Could not write default config: {}", save_err);
                } else {
                    log::info!("Wrote default config to {}", Self::get_path_string(ctx)?);
                }
                Ok(config)
            }
            Err(e) => Err(e),
        }
    }

    /// Detect whether an error means the config file was missing, either by
    /// our explicit message or by an IO NotFound anywhere in the chain.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }

    /// Vault root from the config, or the context default.
    pub fn resolve_vault_root(&self, ctx: &dyn AppContext) -> Result<PathBuf> {
        match &self.vault_root {
            Some(root) => Ok(root.clone()),
            None => ctx.get_default_vault_dir(),
        }
    }
}
