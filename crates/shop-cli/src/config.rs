//! Settings of the command line client

use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use shop_common::Network;
use shop_purchase::PurchaseConfig;

/// Directory under the home directory holding the default config file
pub const DEFAULT_WORK_DIR: &str = ".wallet-shop";

/// Name of the config file
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Device name sent when pairing without a configured one
pub const DEFAULT_DEVICE_NAME: &str = "wallet-shop-cli";

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Http {
    /// Total timeout of a request
    pub timeout_secs: u64,
    /// Proxy for every request
    pub proxy: Option<String>,
}

impl Default for Http {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            proxy: None,
        }
    }
}

/// Client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Network of the account and shop APIs
    pub network: Network,
    /// Name this device is paired under
    pub device_name: String,
    /// HTTP transport
    pub http: Http,
    /// Purchase flow timings and confirmation polling
    pub purchase: PurchaseConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            network: Network::default(),
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            http: Http::default(),
            purchase: PurchaseConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from `config_file_name`, or the default location
    ///
    /// Falls back to the defaults when the file cannot be read.
    pub fn new<P>(config_file_name: Option<P>) -> Self
    where
        P: Into<PathBuf>,
    {
        let default_settings = Self::default();

        match Self::new_from_default(&default_settings, config_file_name) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!("Error reading config file, falling back to defaults. Error: {e}");
                default_settings
            }
        }
    }

    fn new_from_default<P>(
        default: &Settings,
        config_file_name: Option<P>,
    ) -> Result<Self, ConfigError>
    where
        P: Into<PathBuf>,
    {
        let explicit = config_file_name.is_some();
        let config_file = match config_file_name {
            Some(value) => value.into(),
            None => default_config_path()?,
        };

        tracing::debug!("Reading config from {}", config_file.display());

        let config: Config = Config::builder()
            .add_source(Config::try_from(default)?)
            .add_source(File::from(config_file).required(explicit))
            .build()?;

        let mut settings: Settings = config.try_deserialize()?;

        if settings.device_name.trim().is_empty() {
            settings.device_name = DEFAULT_DEVICE_NAME.to_string();
        }

        // The purchase flow quotes wallets of the client's network
        settings.purchase.network = settings.network;

        Ok(settings)
    }
}

/// `~/.wallet-shop/config.toml`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(home::home_dir()
        .ok_or(ConfigError::NotFound("Config Path".to_string()))?
        .join(DEFAULT_WORK_DIR)
        .join(CONFIG_FILE_NAME))
}
