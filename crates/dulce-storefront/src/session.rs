//! Page session: everything one open storefront page owns.

use std::sync::Arc;

use dulce_auth::{
    AuthError, Authenticator, LoginForm, PasswordHasher, RegistrationForm, UserDirectory,
    UserProfile, LOGIN_SUCCESS_MESSAGE, REGISTER_SUCCESS_MESSAGE,
};
use dulce_cache::KvStore;
use dulce_commerce::cart::{
    AddOutcome, CartController, CartRenderer, CartStore, Decrease, Hydration, LineItem, Receipt,
};
use dulce_commerce::catalog::Catalog;
use dulce_commerce::search::{CatalogBrowser, SearchOutcome, TextSearch};
use tracing::info;

use crate::carousel::{Carousel, HeroSlider};
use crate::config::StorefrontConfig;
use crate::notify::{Notification, Notifier, PURCHASE_COMPLETE_MESSAGE};
use crate::timer::TaskHandle;
use crate::StorefrontError;

/// State of one storefront page: cart, catalog, account and notifications.
///
/// Cart operations run to completion one at a time through `&mut self`.
pub struct StorefrontSession<S, R> {
    config: StorefrontConfig,
    cart: CartController<S, R>,
    browser: CatalogBrowser,
    auth: Authenticator,
    notifier: Notifier,
    user: Option<UserProfile>,
}

impl<S: KvStore, R: CartRenderer> StorefrontSession<S, R> {
    /// Open a session, hydrating the cart from `store`.
    pub fn open(
        store: S,
        renderer: R,
        config: StorefrontConfig,
    ) -> Result<(Self, Hydration), StorefrontError> {
        config.validate()?;

        let catalog = match &config.catalog.products {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| {
                    StorefrontError::ConfigIo {
                        path: path.clone(),
                        source,
                    }
                })?;
                Catalog::from_json(&json)?
            }
            None => Catalog::bakery()?,
        };

        let (cart_store, hydration) = CartStore::open_with_key(store, config.storage.key.clone())?;
        let cart = CartController::new(cart_store, renderer)?;

        let directory = UserDirectory::seeded(PasswordHasher::fast())?;
        let auth = Authenticator::new(Arc::new(directory))
            .with_latency(config.auth.login_latency(), config.auth.register_latency());

        let browser = CatalogBrowser::new(catalog, config.catalog.per_page);
        info!(
            products = browser.catalog().len(),
            cart_lines = cart.store().cart().len(),
            "storefront session opened"
        );

        Ok((
            Self {
                config,
                cart,
                browser,
                auth,
                notifier: Notifier::new(),
                user: None,
            },
            hydration,
        ))
    }

    /// "Add to cart" on a product card. `reference` is a product id or name.
    pub fn add_to_cart(&mut self, reference: &str) -> Result<AddOutcome, StorefrontError> {
        let product = self.browser.catalog().resolve(reference)?;
        let outcome = self.cart.add_product(product)?;
        self.notifier.show(Notification::cart_added(
            &product.name,
            &self.config.notifications,
        ));
        Ok(outcome)
    }

    pub fn increase(&mut self, index: usize) -> Result<u32, StorefrontError> {
        Ok(self.cart.increase(index)?)
    }

    pub fn decrease(&mut self, index: usize) -> Result<Decrease, StorefrontError> {
        Ok(self.cart.decrease(index)?)
    }

    pub fn remove(&mut self, index: usize) -> Result<LineItem, StorefrontError> {
        Ok(self.cart.remove(index)?)
    }

    /// Place the order.
    pub fn checkout(&mut self) -> Result<Receipt, StorefrontError> {
        let receipt = self.cart.checkout()?;
        self.notifier.show(Notification::success(
            PURCHASE_COMPLETE_MESSAGE,
            &self.config.notifications,
        ));
        Ok(receipt)
    }

    /// Live search box.
    pub fn search(&self, term: &str) -> SearchOutcome<'_> {
        TextSearch::new(self.browser.catalog()).search(term)
    }

    /// Start a login in the background. Dropping the handle cancels it.
    pub fn login_task(&self, form: LoginForm) -> TaskHandle<Result<UserProfile, AuthError>> {
        let auth = self.auth.clone();
        TaskHandle::spawn(async move { auth.login(form).await })
    }

    /// Start a registration in the background. Dropping the handle cancels it.
    pub fn register_task(
        &self,
        form: RegistrationForm,
    ) -> TaskHandle<Result<UserProfile, AuthError>> {
        let auth = self.auth.clone();
        TaskHandle::spawn(async move { auth.register(form).await })
    }

    /// Submit the login form and wait for the answer.
    pub async fn login(&mut self, form: LoginForm) -> Result<UserProfile, StorefrontError> {
        let result = self.login_task(form).await?;
        let profile = self.settle(result, LOGIN_SUCCESS_MESSAGE)?;
        self.user = Some(profile.clone());
        Ok(profile)
    }

    /// Submit the registration form and wait for the answer.
    pub async fn register(
        &mut self,
        form: RegistrationForm,
    ) -> Result<UserProfile, StorefrontError> {
        let result = self.register_task(form).await?;
        Ok(self.settle(result, REGISTER_SUCCESS_MESSAGE)?)
    }

    fn settle(
        &mut self,
        result: Result<UserProfile, AuthError>,
        success: &str,
    ) -> Result<UserProfile, AuthError> {
        let notifications = &self.config.notifications;
        match &result {
            Ok(_) => self.notifier.show(Notification::success(success, notifications)),
            Err(e) => self
                .notifier
                .show(Notification::form_error(e.user_message(), notifications)),
        }
        result
    }

    /// Start the hero carousel with the configured slides and interval.
    pub fn start_hero(&self) -> Result<HeroSlider, StorefrontError> {
        let carousel = Carousel::new(self.config.carousel.slides)?;
        Ok(HeroSlider::start(carousel, self.config.carousel.interval()))
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn cart(&self) -> &CartController<S, R> {
        &self.cart
    }

    pub fn browser(&self) -> &CatalogBrowser {
        &self.browser
    }

    pub fn browser_mut(&mut self) -> &mut CatalogBrowser {
        &mut self.browser
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dulce_cache::MemoryStore;
    use dulce_commerce::cart::{NavBadge, CART_STORAGE_KEY};
    use dulce_commerce::CommerceError;
    use std::time::Duration;

    fn session() -> StorefrontSession<Arc<MemoryStore>, NavBadge> {
        let store = Arc::new(MemoryStore::new());
        let (session, _) =
            StorefrontSession::open(store, NavBadge::new(), StorefrontConfig::default()).unwrap();
        session
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_to_cart_notifies() {
        let mut s = session();
        s.add_to_cart("Alfajores Artesanales").unwrap();
        s.add_to_cart("7").unwrap();

        assert_eq!(s.cart().renderer().count, 2);
        let shown = s.notifier().visible();
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].text, "✅ Alfajores Artesanale... agregado al carrito");

        tokio::time::sleep(Duration::from_millis(2_900)).await;
        assert_eq!(s.notifier().visible().len(), 2);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(s.notifier().visible().is_empty());
    }

    #[test]
    fn test_cart_operations_without_runtime() {
        let backend = Arc::new(MemoryStore::new());
        let (mut s, _) = StorefrontSession::open(
            Arc::clone(&backend),
            NavBadge::new(),
            StorefrontConfig::default(),
        )
        .unwrap();

        s.add_to_cart("Pan Campesino").unwrap();
        assert_eq!(s.notifier().visible().len(), 1);

        let receipt = s.checkout().unwrap();
        assert_eq!(receipt.total.amount, 2500);
        let texts: Vec<String> = s.notifier().visible().into_iter().map(|n| n.text).collect();
        assert!(texts.contains(&format!("✅ {PURCHASE_COMPLETE_MESSAGE}")));

        let (reopened, _) = CartStore::open(backend).unwrap();
        assert!(reopened.cart().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_product() {
        let mut s = session();
        let err = s.add_to_cart("Croissant").unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::Commerce(CommerceError::ProductNotFound(_))
        ));
        assert!(s.notifier().visible().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_checkout_flow() {
        let mut s = session();
        s.add_to_cart("1").unwrap();
        s.increase(0).unwrap();
        let receipt = s.checkout().unwrap();
        assert_eq!(receipt.total.amount, 5000);
        assert_eq!(s.cart().renderer().tooltip, "Carrito vacío");

        assert!(matches!(
            s.checkout(),
            Err(StorefrontError::Commerce(CommerceError::EmptyCart))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_and_failure_messages() {
        let mut s = session();

        let err = s
            .login(LoginForm::new("ana@example.com", "incorrecta"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::Auth(AuthError::InvalidCredentials)));
        assert_eq!(s.notifier().visible()[0].text, "❌ Credenciales incorrectas.");
        assert!(s.user().is_none());

        let profile = s
            .login(LoginForm::new("ana@example.com", "Clave2025"))
            .await
            .unwrap();
        assert_eq!(s.user(), Some(&profile));
        let texts: Vec<String> = s.notifier().visible().into_iter().map(|n| n.text).collect();
        assert!(texts.contains(&"✅ ¡Login exitoso! Redirigiendo...".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_then_login() {
        let mut s = session();
        let form = RegistrationForm {
            name: "Lucía Pérez".to_string(),
            email: "lucia@example.com".to_string(),
            password: "Medialuna9".to_string(),
            confirm: "Medialuna9".to_string(),
            phone: None,
            accept_terms: true,
        };
        s.register(form.clone()).await.unwrap();
        assert!(s.user().is_none());

        let err = s.register(form).await.unwrap_err();
        assert!(matches!(err, StorefrontError::Auth(AuthError::UserAlreadyExists(_))));
        assert_eq!(s.notifier().visible().last().unwrap().text, "❌ El email ya está registrado");

        let profile = s
            .login(LoginForm::new("lucia@example.com", "Medialuna9"))
            .await
            .unwrap();
        assert_eq!(profile.name.as_deref(), Some("Lucía Pérez"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_login_task() {
        let s = session();
        let mut task = s.login_task(LoginForm::new("ana@example.com", "Clave2025"));
        tokio::time::sleep(Duration::from_millis(500)).await;
        task.cancel();
        assert!(matches!(task.await, Err(StorefrontError::Cancelled)));
        assert!(s.user().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_restores_cart() {
        let backend = Arc::new(MemoryStore::new().with_raw(
            CART_STORAGE_KEY,
            r#"[{"name":"Medialunas","price":"$3.500","quantity":2}]"#,
        ));
        let (s, hydration) =
            StorefrontSession::open(backend, NavBadge::new(), StorefrontConfig::default()).unwrap();
        assert!(matches!(hydration, Hydration::Restored { lines: 1, legacy: true }));
        assert_eq!(s.cart().renderer().tooltip, "2 items - $7.000");
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_and_hero() {
        let s = session();
        assert_eq!(s.search("pan").hits.len(), 3);

        let hero = s.start_hero().unwrap();
        assert_eq!(hero.len(), 3);
        tokio::time::sleep(Duration::from_millis(10_050)).await;
        assert_eq!(hero.current(), 1);
    }
}
