//! Configuration for the catalog CLI
//!
//! Loaded from a TOML file. Every section falls back to the defaults of the
//! production deployment, so an absent file or a partial file is fine.

pub mod custom_fields;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use custom_fields::{CustomFieldSlot, SlotField, default_custom_fields};

/// Directory name under the platform config dir
const CONFIG_DIR_NAME: &str = "catalog-sync";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub product: ProductConfig,
    pub throttle: ThrottleConfig,
    /// Custom-field slot id → catalog field mapping agreed with the remote schema
    pub custom_fields: Vec<CustomFieldSlot>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            product: ProductConfig::default(),
            throttle: ThrottleConfig::default(),
            custom_fields: default_custom_fields(),
        }
    }
}

/// Remote API endpoints and transport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub create_endpoint: String,
    /// Path template, `{id}` is replaced with the product id
    pub update_endpoint: String,
    pub search_endpoint: String,
    pub api_key_header: String,
    pub timeout_secs: u64,
    pub search_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.redai.vn/api/v1".to_string(),
            create_endpoint: "/user/simple-customer-products".to_string(),
            update_endpoint: "/user/products/physical/{id}".to_string(),
            search_endpoint: "/user/customer-products".to_string(),
            api_key_header: "x-api-key".to_string(),
            timeout_secs: 30,
            search_limit: 10,
        }
    }
}

impl ApiConfig {
    pub fn create_url(&self) -> String {
        join_url(&self.base_url, &self.create_endpoint)
    }

    pub fn update_url(&self, product_id: &str) -> String {
        join_url(&self.base_url, &self.update_endpoint.replace("{id}", product_id))
    }

    pub fn search_url(&self) -> String {
        join_url(&self.base_url, &self.search_endpoint)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Fixed values sent with every created or updated product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductConfig {
    pub product_type: String,
    pub currency: String,
    pub sku_prefix: String,
    pub barcode_prefix: String,
    pub shipment: ShipmentConfig,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            product_type: "PHYSICAL".to_string(),
            currency: "VND".to_string(),
            sku_prefix: "SKU-".to_string(),
            barcode_prefix: "893".to_string(),
            shipment: ShipmentConfig::default(),
        }
    }
}

/// Physical shipping profile applied to imported products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipmentConfig {
    pub width_cm: u32,
    pub height_cm: u32,
    pub length_cm: u32,
    pub weight_gram: u32,
}

impl Default for ShipmentConfig {
    fn default() -> Self {
        Self {
            width_cm: 25,
            height_cm: 5,
            length_cm: 30,
            weight_gram: 200,
        }
    }
}

/// Delay between units of work (one row, one changed entry)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    pub delay_ms: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self { delay_ms: 500 }
    }
}

impl ThrottleConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Config {
    /// Load configuration from an explicit path, the default location, or
    /// fall back to built-in defaults when no file exists.
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Config file does not exist: {}", path.display());
            }
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.api.update_endpoint.contains("{id}") {
            anyhow::bail!(
                "api.update_endpoint must contain an {{id}} placeholder, got '{}'",
                self.api.update_endpoint
            );
        }
        custom_fields::validate_slots(&self.custom_fields)
    }
}

/// `<config_dir>/catalog-sync/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
