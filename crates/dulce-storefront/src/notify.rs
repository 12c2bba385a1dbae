//! Transient notifications.

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tracing::debug;

use crate::config::NotificationConfig;

/// Shown after a successful checkout.
pub const PURCHASE_COMPLETE_MESSAGE: &str = "¡Compra realizada con éxito!";

/// Kind of notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    /// Toast after adding to the cart. Several can be on screen.
    CartAdded,
    /// Success banner above a form. Replaces the previous one.
    Success,
    /// General form message. Replaces the previous one.
    FormError,
    /// General form message. Replaces the previous one.
    FormInfo,
}

impl NotificationKind {
    fn replaces_previous(&self) -> bool {
        !matches!(self, NotificationKind::CartAdded)
    }

    fn slot(&self) -> u8 {
        match self {
            NotificationKind::CartAdded => 0,
            NotificationKind::Success => 1,
            NotificationKind::FormError | NotificationKind::FormInfo => 2,
        }
    }
}

/// A notification and how long it stays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
    /// Time fully visible.
    #[serde(with = "millis")]
    pub visible_for: Duration,
    /// Exit animation after `visible_for`.
    #[serde(with = "millis")]
    pub exit: Duration,
}

mod millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

impl Notification {
    /// "✅ {name} agregado al carrito", with long names truncated.
    pub fn cart_added(product_name: &str, config: &NotificationConfig) -> Self {
        Self {
            kind: NotificationKind::CartAdded,
            text: format!(
                "✅ {} agregado al carrito",
                truncate_name(product_name, config.name_max_chars)
            ),
            visible_for: Duration::from_millis(config.cart_visible_ms),
            exit: Duration::from_millis(config.exit_ms),
        }
    }

    /// Success banner.
    pub fn success(message: &str, config: &NotificationConfig) -> Self {
        Self {
            kind: NotificationKind::Success,
            text: format!("✅ {message}"),
            visible_for: Duration::from_millis(config.success_ms),
            exit: Duration::ZERO,
        }
    }

    /// General form error.
    pub fn form_error(message: &str, config: &NotificationConfig) -> Self {
        Self {
            kind: NotificationKind::FormError,
            text: format!("❌ {message}"),
            visible_for: Duration::from_millis(config.form_message_ms),
            exit: Duration::ZERO,
        }
    }

    /// General form confirmation.
    pub fn form_info(message: &str, config: &NotificationConfig) -> Self {
        Self {
            kind: NotificationKind::FormInfo,
            text: format!("✅ {message}"),
            visible_for: Duration::from_millis(config.form_message_ms),
            exit: Duration::ZERO,
        }
    }

    /// Total time on screen.
    pub fn lifetime(&self) -> Duration {
        self.visible_for + self.exit
    }
}

/// Cut `name` to `max_chars` characters, adding "..." when shortened.
pub fn truncate_name(name: &str, max_chars: usize) -> String {
    match name.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &name[..cut]),
        None => name.to_string(),
    }
}

#[derive(Debug)]
struct Active {
    notification: Notification,
    expires_at: Instant,
}

/// Keeps the notifications currently on screen.
///
/// Each notification carries its deadline and drops out of [`visible`]
/// once it passes. Deadlines follow tokio's clock.
///
/// [`visible`]: Notifier::visible
#[derive(Debug, Default)]
pub struct Notifier {
    active: Vec<Active>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `notification` on screen until its lifetime runs out.
    pub fn show(&mut self, notification: Notification) {
        let now = Instant::now();
        self.active.retain(|a| a.expires_at > now);
        if notification.kind.replaces_previous() {
            let slot = notification.kind.slot();
            self.active.retain(|a| a.notification.kind.slot() != slot);
        }
        debug!(text = %notification.text, "notification shown");
        self.active.push(Active {
            expires_at: now + notification.lifetime(),
            notification,
        });
    }

    /// Notifications on screen, oldest first.
    pub fn visible(&self) -> Vec<Notification> {
        let now = Instant::now();
        self.active
            .iter()
            .filter(|a| a.expires_at > now)
            .map(|a| a.notification.clone())
            .collect()
    }

    /// Remove everything now.
    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Medialunas", 20), "Medialunas");
        assert_eq!(truncate_name("Alfajores Artesanales", 20), "Alfajores Artesanale...");
        assert_eq!(truncate_name("Exactamente veinte!!", 20), "Exactamente veinte!!");
        assert_eq!(truncate_name("Pañuelos de azúcar y canela", 10), "Pañuelos d...");
    }

    #[test]
    fn test_cart_added_text() {
        let config = NotificationConfig::default();
        let n = Notification::cart_added("Pan Campesino", &config);
        assert_eq!(n.text, "✅ Pan Campesino agregado al carrito");
        assert_eq!(n.lifetime(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_notifications_expire() {
        let config = NotificationConfig::default();
        let mut notifier = Notifier::new();
        notifier.show(Notification::cart_added("Pan Campesino", &config));
        notifier.show(Notification::success(PURCHASE_COMPLETE_MESSAGE, &config));
        assert_eq!(notifier.visible().len(), 2);

        sleep(Duration::from_millis(3_100)).await;
        let left = notifier.visible();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].kind, NotificationKind::Success);

        sleep(Duration::from_secs(1)).await;
        assert!(notifier.visible().is_empty());
    }

    #[test]
    fn test_show_without_runtime() {
        let config = NotificationConfig::default();
        let mut notifier = Notifier::new();
        notifier.show(Notification::cart_added("Medialunas", &config));
        assert_eq!(notifier.visible().len(), 1);
        notifier.clear();
        assert!(notifier.visible().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_is_exact() {
        let config = NotificationConfig::default();
        let mut notifier = Notifier::new();
        notifier.show(Notification::cart_added("Medialunas", &config));

        sleep(Duration::from_millis(2_900)).await;
        assert_eq!(notifier.visible().len(), 1);
        sleep(Duration::from_millis(100)).await;
        assert!(notifier.visible().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_form_messages_replace_each_other() {
        let config = NotificationConfig::default();
        let mut notifier = Notifier::new();
        notifier.show(Notification::form_error("Credenciales incorrectas.", &config));
        notifier.show(Notification::form_info("Revisa tu correo", &config));
        notifier.show(Notification::cart_added("Medialunas", &config));
        notifier.show(Notification::cart_added("Medialunas", &config));

        let kinds: Vec<NotificationKind> = notifier.visible().iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NotificationKind::FormInfo,
                NotificationKind::CartAdded,
                NotificationKind::CartAdded
            ]
        );

        // The replaced message's deadline must not remove its successor early.
        sleep(Duration::from_millis(4_900)).await;
        assert_eq!(notifier.visible().len(), 1);
        sleep(Duration::from_millis(200)).await;
        assert!(notifier.visible().is_empty());
    }
}
