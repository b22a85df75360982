//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SPEEDPARTS_SELLER_PHONE` - Seller contact number for the messaging
//!   deep link
//! - `SPEEDPARTS_CATALOG_URL` - URL of the catalog JSON document
//!
//! ## Optional
//! - `SPEEDPARTS_CURRENCY` - Display currency code (default: GHS)
//! - `SPEEDPARTS_ORDER_ENDPOINT` - Remote order submission endpoint; when
//!   absent or empty, orders go out through the mail fallback only
//! - `SPEEDPARTS_CART_PATH` - Durable cart slot path
//!   (default: speedparts-cart.json)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront engine configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Seller phone carried in the messaging deep link
    pub seller_phone: String,
    /// Display currency code
    pub currency: String,
    /// Catalog document URL
    pub catalog_url: String,
    /// Remote order submission endpoint, when configured
    pub order_endpoint: Option<Url>,
    /// Durable cart slot path
    pub cart_path: PathBuf,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let seller_phone = get_required_env("SPEEDPARTS_SELLER_PHONE")?;
        if seller_phone.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "SPEEDPARTS_SELLER_PHONE".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let catalog_url = get_required_env("SPEEDPARTS_CATALOG_URL")?;
        let currency = get_env_or_default("SPEEDPARTS_CURRENCY", "GHS");
        let order_endpoint = parse_order_endpoint(get_optional_env("SPEEDPARTS_ORDER_ENDPOINT"))?;
        let cart_path = PathBuf::from(get_env_or_default(
            "SPEEDPARTS_CART_PATH",
            "speedparts-cart.json",
        ));

        Ok(Self {
            seller_phone,
            currency,
            catalog_url,
            order_endpoint,
            cart_path,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse the optional submission endpoint. An empty value means "not
/// configured", the same as an unset variable.
fn parse_order_endpoint(raw: Option<String>) -> Result<Option<Url>, ConfigError> {
    match raw {
        Some(value) if !value.trim().is_empty() => {
            let url = Url::parse(value.trim()).map_err(|e| {
                ConfigError::InvalidEnvVar("SPEEDPARTS_ORDER_ENDPOINT".to_string(), e.to_string())
            })?;
            Ok(Some(url))
        }
        _ => Ok(None),
    }
}
