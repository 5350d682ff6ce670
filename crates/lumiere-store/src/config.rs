//! # Storefront Configuration
//!
//! Configuration management for the storefront session layer.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     LUMIERE_PAYMENT_DELAY_MS=500                                       │
//! │     LUMIERE_ORDER_PREFIX=LUM                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.lumiere.storefront/... (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     2 s simulated payment, 3 attempts, "LUM" order prefix              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [checkout]
//! payment_delay_ms = 2000
//! payment_timeout_ms = 10000
//! max_payment_attempts = 3
//! initial_backoff_ms = 250
//! order_prefix = "LUM"
//! delivery_estimate = "5-7 business days"
//!
//! [catalog]
//! new_arrivals_limit = 6
//! ```

use lumiere_core::{
    DEFAULT_DELIVERY_ESTIMATE, DEFAULT_NEW_ARRIVALS_LIMIT, DEFAULT_ORDER_PREFIX,
    SIMULATED_PAYMENT_DELAY_MS,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Checkout Settings
// =============================================================================

/// Payment round trip and order confirmation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Duration of the simulated gateway round trip (milliseconds).
    #[serde(default = "default_payment_delay")]
    pub payment_delay_ms: u64,

    /// Upper bound for a single gateway call (milliseconds).
    #[serde(default = "default_payment_timeout")]
    pub payment_timeout_ms: u64,

    /// Attempts per payment submit, counting the first one.
    #[serde(default = "default_max_attempts")]
    pub max_payment_attempts: u32,

    /// Initial backoff between retryable failures (milliseconds).
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,

    /// Prefix of synthesized order numbers.
    #[serde(default = "default_order_prefix")]
    pub order_prefix: String,

    /// Delivery estimate printed on the confirmation.
    #[serde(default = "default_delivery_estimate")]
    pub delivery_estimate: String,
}

fn default_payment_delay() -> u64 {
    SIMULATED_PAYMENT_DELAY_MS
}
fn default_payment_timeout() -> u64 {
    10_000
}
fn default_max_attempts() -> u32 {
    3
}
fn default_initial_backoff() -> u64 {
    250
}
fn default_order_prefix() -> String {
    DEFAULT_ORDER_PREFIX.to_string()
}
fn default_delivery_estimate() -> String {
    DEFAULT_DELIVERY_ESTIMATE.to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        CheckoutConfig {
            payment_delay_ms: default_payment_delay(),
            payment_timeout_ms: default_payment_timeout(),
            max_payment_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff(),
            order_prefix: default_order_prefix(),
            delivery_estimate: default_delivery_estimate(),
        }
    }
}

impl CheckoutConfig {
    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }

    pub fn payment_timeout(&self) -> Duration {
        Duration::from_millis(self.payment_timeout_ms)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }
}

// =============================================================================
// Catalog Settings
// =============================================================================

/// Catalog page settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// How many products the new-arrivals page lists.
    #[serde(default = "default_new_arrivals_limit")]
    pub new_arrivals_limit: usize,
}

fn default_new_arrivals_limit() -> usize {
    DEFAULT_NEW_ARRIVALS_LIMIT
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            new_arrivals_limit: default_new_arrivals_limit(),
        }
    }
}

// =============================================================================
// Main Storefront Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub checkout: CheckoutConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl StorefrontConfig {
    /// Builds the effective configuration.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Like [`load`](Self::load), falling back to defaults with a warning.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes this configuration as pretty TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    /// Rejects values the checkout cannot run with.
    pub fn validate(&self) -> StoreResult<()> {
        let checkout = &self.checkout;

        if checkout.max_payment_attempts == 0 {
            return Err(StoreError::InvalidConfig(
                "max_payment_attempts must be greater than 0".into(),
            ));
        }

        if checkout.payment_timeout_ms == 0 {
            return Err(StoreError::InvalidConfig(
                "payment_timeout_ms must be greater than 0".into(),
            ));
        }

        if checkout.order_prefix.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "order_prefix must not be empty".into(),
            ));
        }

        if self.catalog.new_arrivals_limit == 0 {
            return Err(StoreError::InvalidConfig(
                "new_arrivals_limit must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Overlays `LUMIERE_*` variables that are set and parse.
    fn apply_env_overrides(&mut self) {
        if let Some(ms) = env_parse::<u64>("LUMIERE_PAYMENT_DELAY_MS") {
            debug!(payment_delay_ms = ms, "Overriding payment delay from environment");
            self.checkout.payment_delay_ms = ms;
        }

        if let Some(ms) = env_parse::<u64>("LUMIERE_PAYMENT_TIMEOUT_MS") {
            self.checkout.payment_timeout_ms = ms;
        }

        if let Some(attempts) = env_parse::<u32>("LUMIERE_MAX_PAYMENT_ATTEMPTS") {
            self.checkout.max_payment_attempts = attempts;
        }

        if let Some(ms) = env_parse::<u64>("LUMIERE_INITIAL_BACKOFF_MS") {
            self.checkout.initial_backoff_ms = ms;
        }

        if let Ok(prefix) = std::env::var("LUMIERE_ORDER_PREFIX") {
            debug!(prefix = %prefix, "Overriding order prefix from environment");
            self.checkout.order_prefix = prefix;
        }

        if let Ok(estimate) = std::env::var("LUMIERE_DELIVERY_ESTIMATE") {
            self.checkout.delivery_estimate = estimate;
        }

        if let Some(limit) = env_parse::<usize>("LUMIERE_NEW_ARRIVALS_LIMIT") {
            self.catalog.new_arrivals_limit = limit;
        }
    }

    /// `<platform config dir>/storefront.toml`, when the platform has one.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "lumiere", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }
}

/// Reads and parses an environment variable, ignoring malformed values.
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring malformed environment override");
            None
        }
    }
}
