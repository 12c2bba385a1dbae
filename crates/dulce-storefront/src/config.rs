//! Storefront configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use dulce_commerce::cart::CART_STORAGE_KEY;
use dulce_commerce::search::DEFAULT_PER_PAGE;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::StorefrontError;

/// Storefront configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Storage slot settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Catalog page settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Simulated account service.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Hero carousel.
    #[serde(default)]
    pub carousel: CarouselConfig,

    /// Notification timings.
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are JSON, anything else TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StorefrontError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| StorefrontError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        config.validate()?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Save config to a file, format chosen by extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StorefrontError> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content).map_err(|source| StorefrontError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject values the storefront cannot run with.
    pub fn validate(&self) -> Result<(), StorefrontError> {
        if self.storage.key.trim().is_empty() {
            return Err(StorefrontError::InvalidConfig(
                "storage.key must not be empty".to_string(),
            ));
        }
        if self.catalog.per_page == 0 {
            return Err(StorefrontError::InvalidConfig(
                "catalog.per_page must be at least 1".to_string(),
            ));
        }
        if self.carousel.interval_ms == 0 {
            return Err(StorefrontError::InvalidConfig(
                "carousel.interval_ms must be at least 1".to_string(),
            ));
        }
        if self.carousel.slides == 0 {
            return Err(StorefrontError::InvalidConfig(
                "carousel.slides must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Storage slot settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key the cart is persisted under.
    #[serde(default = "default_storage_key")]
    pub key: String,

    /// Directory for the file-backed store. Relative paths resolve against
    /// the config file's directory; unset means the per-user data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_storage_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_storage_key(),
            data_dir: None,
        }
    }
}

/// Catalog page settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Products per page.
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    /// JSON file replacing the bundled catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<PathBuf>,
}

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            products: None,
        }
    }
}

/// Simulated account service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_latency_ms")]
    pub login_latency_ms: u64,

    #[serde(default = "default_latency_ms")]
    pub register_latency_ms: u64,
}

fn default_latency_ms() -> u64 {
    1500
}

impl AuthConfig {
    pub fn login_latency(&self) -> Duration {
        Duration::from_millis(self.login_latency_ms)
    }

    pub fn register_latency(&self) -> Duration {
        Duration::from_millis(self.register_latency_ms)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_latency_ms: default_latency_ms(),
            register_latency_ms: default_latency_ms(),
        }
    }
}

/// Hero carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Auto-advance period.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Number of slides.
    #[serde(default = "default_slides")]
    pub slides: usize,
}

fn default_interval_ms() -> u64 {
    10_000
}

fn default_slides() -> usize {
    3
}

impl CarouselConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            slides: default_slides(),
        }
    }
}

/// Notification timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// How long "added to cart" stays fully visible.
    #[serde(default = "default_cart_visible_ms")]
    pub cart_visible_ms: u64,

    /// Exit animation after `cart_visible_ms`.
    #[serde(default = "default_exit_ms")]
    pub exit_ms: u64,

    /// Success banner lifetime.
    #[serde(default = "default_success_ms")]
    pub success_ms: u64,

    /// General form message lifetime.
    #[serde(default = "default_form_message_ms")]
    pub form_message_ms: u64,

    /// Product names longer than this are truncated.
    #[serde(default = "default_name_max_chars")]
    pub name_max_chars: usize,
}

fn default_cart_visible_ms() -> u64 {
    2700
}

fn default_exit_ms() -> u64 {
    300
}

fn default_success_ms() -> u64 {
    4000
}

fn default_form_message_ms() -> u64 {
    5000
}

fn default_name_max_chars() -> usize {
    20
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            cart_visible_ms: default_cart_visible_ms(),
            exit_ms: default_exit_ms(),
            success_ms: default_success_ms(),
            form_message_ms: default_form_message_ms(),
            name_max_chars: default_name_max_chars(),
        }
    }
}

/// Default `dulce.toml` contents.
pub fn generate_default_config() -> String {
    format!(
        r#"# Dulce Hogar storefront configuration

[storage]
key = "{key}"
# data_dir = ".dulce"

[catalog]
per_page = {per_page}
# products = "products.json"

[auth]
login_latency_ms = 1500
register_latency_ms = 1500

[carousel]
interval_ms = 10000
slides = 3

[notifications]
cart_visible_ms = 2700
exit_ms = 300
success_ms = 4000
form_message_ms = 5000
name_max_chars = 20
"#,
        key = CART_STORAGE_KEY,
        per_page = DEFAULT_PER_PAGE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_matches_defaults() {
        let parsed: StorefrontConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, StorefrontConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: StorefrontConfig = toml::from_str(
            r#"
            [catalog]
            per_page = 3

            [auth]
            login_latency_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(parsed.catalog.per_page, 3);
        assert_eq!(parsed.auth.login_latency(), Duration::ZERO);
        assert_eq!(parsed.auth.register_latency(), Duration::from_millis(1500));
        assert_eq!(parsed.storage.key, "dulceHogarCart");
    }

    #[test]
    fn test_json_config() {
        let parsed: StorefrontConfig =
            serde_json::from_str(r#"{"carousel": {"interval_ms": 500}}"#).unwrap();
        assert_eq!(parsed.carousel.interval(), Duration::from_millis(500));
        assert_eq!(parsed.carousel.slides, 3);
    }

    #[test]
    fn test_validate() {
        let mut config = StorefrontConfig::default();
        assert!(config.validate().is_ok());

        config.catalog.per_page = 0;
        assert!(matches!(
            config.validate(),
            Err(StorefrontError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("dulce-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut config = StorefrontConfig::default();
        config.storage.data_dir = Some(PathBuf::from("carts"));

        for name in ["dulce.toml", "dulce.json"] {
            let path = dir.join(name);
            config.save(&path).unwrap();
            assert_eq!(StorefrontConfig::load(&path).unwrap(), config);
        }

        let _ = std::fs::remove_dir_all(&dir);
    }
}
