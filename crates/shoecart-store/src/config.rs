//! # Store Configuration
//!
//! Where the stock API lives, where the cart snapshot is kept and which
//! language user notifications are shown in.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHOECART_API_URL=http://localhost:3333                             │
//! │     SHOECART_LOCALE=en                                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/shoecart/shoecart.toml (Linux)                           │
//! │     ~/Library/Application Support/com.rocketshoes.shoecart/… (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:3333, "@RocketShoes:cart", pt-BR                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # shoecart.toml
//! [api]
//! base_url = "http://localhost:3333"
//! timeout_secs = 10
//!
//! [storage]
//! db_path = "/var/lib/shoecart/shoecart.db"
//! key = "@RocketShoes:cart"
//!
//! [ui]
//! locale = "pt-BR"
//! ```

use serde::{Deserialize, Serialize};
use shoecart_core::{Locale, STORAGE_KEY};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Sections
// =============================================================================

/// Stock/product API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL; `stock/{id}` and `products/{id}` are resolved against it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Durable snapshot settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. `None` uses the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,

    /// Key the cart snapshot is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_key() -> String {
    STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            db_path: None,
            key: default_storage_key(),
        }
    }
}

/// User-facing presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default)]
    pub locale: Locale,
}

// =============================================================================
// Store Config
// =============================================================================

/// Complete cart store configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (shoecart.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| StoreError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        let url = self.api.base_url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(StoreError::InvalidConfig(format!(
                "API URL must start with http:// or https://, got: {}",
                url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(StoreError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        shoecart_core::validation::validate_storage_key(&self.storage.key)
            .map_err(|e| StoreError::InvalidConfig(e.to_string()))?;

        Ok(())
    }

    /// Applies `SHOECART_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from an arbitrary variable source.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("SHOECART_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup("SHOECART_HTTP_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric HTTP timeout"),
            }
        }

        if let Some(path) = lookup("SHOECART_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.db_path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup("SHOECART_STORAGE_KEY") {
            self.storage.key = key;
        }

        if let Some(locale) = lookup("SHOECART_LOCALE") {
            match locale.parse::<Locale>() {
                Ok(parsed) => self.ui.locale = parsed,
                Err(_) => warn!(locale = %locale, "Unknown locale in environment"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "rocketshoes", "shoecart")
            .map(|dirs| dirs.config_dir().join("shoecart.toml"))
    }

    /// Returns the default database path in the platform data directory.
    pub fn default_db_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "rocketshoes", "shoecart")
            .map(|dirs| dirs.data_dir().join("shoecart.db"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Resolved database path: configured, platform default, or the
    /// working directory as a last resort.
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .db_path
            .clone()
            .or_else(Self::default_db_path)
            .unwrap_or_else(|| PathBuf::from("shoecart.db"))
    }

    /// HTTP request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Storage key for the cart snapshot.
    pub fn storage_key(&self) -> &str {
        &self.storage.key
    }

    /// Locale for user notifications.
    pub fn locale(&self) -> Locale {
        self.ui.locale
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
