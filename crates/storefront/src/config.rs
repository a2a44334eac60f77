//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `TIENDITA_DATA_DIR` - Directory for cart storage and order summaries (default: .tiendita)
//! - `TIENDITA_CATALOG` - Path to a YAML catalog (default: built-in catalog)
//! - `TIENDITA_SHOP_NAME` - Shop name shown in summaries and messages (default: Tiendita)
//! - `TIENDITA_WHATSAPP_NUMBER` - Recipient phone number for the order message
//! - `TIENDITA_MESSAGING_BASE_URL` - Messaging link base (default: <https://wa.me>)

use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".tiendita";
const DEFAULT_SHOP_NAME: &str = "Tiendita";
const DEFAULT_MESSAGING_BASE_URL: &str = "https://wa.me";
const STORAGE_FILE_NAME: &str = "storage.json";
const SUMMARIES_DIR_NAME: &str = "orders";

/// E.164 allows at most 15 digits; anything shorter than 7 is not a real number.
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the storage file and generated summaries
    pub data_dir: PathBuf,
    /// YAML catalog to load instead of the built-in one
    pub catalog_path: Option<PathBuf>,
    /// Shop name used in the summary document and message
    pub shop_name: String,
    /// Messaging handoff configuration
    pub messaging: MessagingConfig,
}

/// Where the order message is handed off to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagingConfig {
    /// Link base without trailing slash, e.g. `https://wa.me`
    pub base_url: String,
    /// Recipient number, digits only. `None` lets the user pick a contact.
    pub phone: Option<String>,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MESSAGING_BASE_URL.to_string(),
            phone: None,
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_path: None,
            shop_name: DEFAULT_SHOP_NAME.to_string(),
            messaging: MessagingConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_dir = get("TIENDITA_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let catalog_path = get("TIENDITA_CATALOG").map(PathBuf::from);
        let shop_name = get("TIENDITA_SHOP_NAME")
            .map_or_else(|| DEFAULT_SHOP_NAME.to_string(), |name| name.trim().to_string());

        let base_url = match get("TIENDITA_MESSAGING_BASE_URL") {
            Some(raw) => validate_base_url(&raw, "TIENDITA_MESSAGING_BASE_URL")?,
            None => DEFAULT_MESSAGING_BASE_URL.to_string(),
        };
        let phone = get("TIENDITA_WHATSAPP_NUMBER")
            .map(|raw| normalize_phone(&raw, "TIENDITA_WHATSAPP_NUMBER"))
            .transpose()?;

        Ok(Self {
            data_dir,
            catalog_path,
            shop_name,
            messaging: MessagingConfig { base_url, phone },
        })
    }

    /// File backing the cart storage slot.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE_NAME)
    }

    /// Directory generated order summaries are written to.
    #[must_use]
    pub fn summaries_dir(&self) -> PathBuf {
        self.data_dir.join(SUMMARIES_DIR_NAME)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Strip formatting from a phone number, keeping only digits.
fn normalize_phone(raw: &str, var_name: &str) -> Result<String, ConfigError> {
    let mut digits = String::with_capacity(raw.len());
    for ch in raw.trim().trim_start_matches('+').chars() {
        match ch {
            '0'..='9' => digits.push(ch),
            ' ' | '-' | '(' | ')' | '.' => {}
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    var_name.to_string(),
                    format!("unexpected character '{other}' in phone number"),
                ));
            }
        }
    }

    if !PHONE_DIGITS.contains(&digits.len()) {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!(
                "phone number must have {} to {} digits (got {})",
                PHONE_DIGITS.start(),
                PHONE_DIGITS.end(),
                digits.len()
            ),
        ));
    }
    Ok(digits)
}

/// Require an absolute http(s) URL and drop any trailing slash.
fn validate_base_url(raw: &str, var_name: &str) -> Result<String, ConfigError> {
    let parsed = url::Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
