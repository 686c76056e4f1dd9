//! Configuration management for the probe.
//!
//! This module provides configuration loading, validation, and access
//! through a singleton pattern. Settings are read from a JSON value under
//! the "http-probe" key and merged with defaults. The defaults preserve the
//! core behavior: no transport timeout, storage under the per-user default
//! directory.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::RwLock;

/// Probe configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProbeConfig {
    /// Optional transport timeout in milliseconds.
    ///
    /// `None` (the default) applies no timeout of its own; whatever the
    /// underlying HTTP transport does is what happens.
    pub request_timeout_ms: Option<u64>,

    /// Override for the file store's directory.
    pub storage_dir: Option<PathBuf>,
}

impl ProbeConfig {
    /// Merges user settings over this configuration; set fields win.
    pub fn merge(&self, user: &ProbeConfig) -> ProbeConfig {
        ProbeConfig {
            request_timeout_ms: user.request_timeout_ms.or(self.request_timeout_ms),
            storage_dir: user
                .storage_dir
                .clone()
                .or_else(|| self.storage_dir.clone()),
        }
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout_ms == Some(0) {
            return Err("requestTimeoutMs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Global configuration instance.
///
/// Lazily initialized on first access and updated when settings change.
static CONFIG: Lazy<RwLock<ProbeConfig>> = Lazy::new(|| RwLock::new(ProbeConfig::default()));

/// Loads configuration from a settings JSON value.
///
/// Reads the "http-probe" settings, merges them with defaults, validates
/// the result, and updates the global configuration.
///
/// # Arguments
///
/// * `settings_json` - Optional JSON value containing user settings under the "http-probe" key
///
/// # Returns
///
/// `Ok(ProbeConfig)` with the loaded configuration, or `Err` if validation fails.
pub fn load_config(settings_json: Option<Value>) -> Result<ProbeConfig, String> {
    let mut config = ProbeConfig::default();

    if let Some(settings) = settings_json {
        if let Some(probe_settings) = settings.get("http-probe") {
            match serde_json::from_value::<ProbeConfig>(probe_settings.clone()) {
                Ok(user_config) => {
                    config = config.merge(&user_config);
                }
                Err(err) => {
                    log::warn!("failed to parse http-probe settings, using defaults: {}", err);
                }
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}. Using defaults.", e))?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Gets the current global configuration.
///
/// Returns a clone of the current configuration; defaults if nothing has
/// been loaded yet.
pub fn get_config() -> ProbeConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| ProbeConfig::default())
}

/// Updates specific configuration settings in place.
///
/// # Arguments
///
/// * `updater` - A closure that modifies the configuration
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut ProbeConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(err) = config.validate() {
            log::warn!("configuration invalid after update, reverting to defaults: {}", err);
            *config = ProbeConfig::default();
        }
    }
}

/// Resets the configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = ProbeConfig::default();
    }
}
