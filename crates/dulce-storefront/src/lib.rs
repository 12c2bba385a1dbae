//! Dulce Hogar storefront session.
//!
//! Wires the cart, catalog browser, text search and account flows into a
//! single [`StorefrontSession`], together with the page's timed behavior:
//! the hero carousel and transient notifications.
//!
//! Timers run as tokio tasks behind [`TaskHandle`]s, so they stop when their
//! owner is dropped.

pub mod carousel;
pub mod config;
pub mod error;
pub mod notify;
pub mod session;
pub mod timer;

pub use carousel::{Carousel, HeroSlider};
pub use config::{
    generate_default_config, AuthConfig, CarouselConfig, CatalogConfig, NotificationConfig,
    StorageConfig, StorefrontConfig,
};
pub use error::StorefrontError;
pub use notify::{Notification, NotificationKind, Notifier, PURCHASE_COMPLETE_MESSAGE};
pub use session::StorefrontSession;
pub use timer::TaskHandle;
