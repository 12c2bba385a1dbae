//! Storefront error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while wiring or running a storefront session.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Failed to read or write a config file.
    #[error("Config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a TOML config file.
    #[error("Invalid TOML config: {0}")]
    ConfigToml(#[from] toml::de::Error),

    /// Failed to render a TOML config file.
    #[error("Cannot write TOML config: {0}")]
    ConfigTomlWrite(#[from] toml::ser::Error),

    /// Failed to parse or render a JSON document.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Config values out of range.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A carousel needs at least one slide.
    #[error("Carousel has no slides")]
    NoSlides,

    /// Slide index outside the carousel.
    #[error("No slide at index {index} (carousel has {len})")]
    SlideOutOfBounds { index: usize, len: usize },

    /// A timer task was cancelled before it finished.
    #[error("Task cancelled")]
    Cancelled,

    /// A timer task panicked.
    #[error("Task failed: {0}")]
    TaskFailed(String),

    /// Cart, catalog or search error.
    #[error(transparent)]
    Commerce(#[from] dulce_commerce::CommerceError),

    /// Account error.
    #[error(transparent)]
    Auth(#[from] dulce_auth::AuthError),

    /// Storage slot error.
    #[error(transparent)]
    Cache(#[from] dulce_cache::CacheError),
}

impl StorefrontError {
    /// Whether the error is a cancelled task rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, StorefrontError::Cancelled)
    }
}
