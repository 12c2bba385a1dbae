//! Simulated login and registration.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::directory::{NewUser, UserDirectory, UserProfile};
use crate::validate::{LoginForm, RegistrationForm};
use crate::AuthError;

/// Simulated round-trip time of a login or registration request.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

/// Shown after a successful login.
pub const LOGIN_SUCCESS_MESSAGE: &str = "¡Login exitoso! Redirigiendo...";

/// Shown after a successful registration.
pub const REGISTER_SUCCESS_MESSAGE: &str = "¡Cuenta creada exitosamente! Redirigiendo...";

/// Greeting shown once logged in.
pub fn welcome_message(profile: &UserProfile) -> String {
    format!("¡Bienvenido {}!", profile.email)
}

/// Runs the login and registration flows against a [`UserDirectory`].
///
/// Forms are validated up front and fail immediately. Valid submissions
/// wait out the configured latency before the directory is consulted, so
/// dropping the returned future (or aborting the task running it) cancels
/// the request with no effect on the directory.
#[derive(Debug, Clone)]
pub struct Authenticator {
    directory: Arc<UserDirectory>,
    login_latency: Duration,
    register_latency: Duration,
}

impl Authenticator {
    pub fn new(directory: Arc<UserDirectory>) -> Self {
        Self {
            directory,
            login_latency: DEFAULT_LATENCY,
            register_latency: DEFAULT_LATENCY,
        }
    }

    /// Set both latencies.
    pub fn with_latency(mut self, login: Duration, register: Duration) -> Self {
        self.login_latency = login;
        self.register_latency = register;
        self
    }

    pub fn directory(&self) -> &Arc<UserDirectory> {
        &self.directory
    }

    /// Submit the login form.
    pub async fn login(&self, form: LoginForm) -> Result<UserProfile, AuthError> {
        form.validate()?;
        tokio::time::sleep(self.login_latency).await;

        match self.directory.authenticate(&form.email, &form.password) {
            Ok(profile) => {
                info!(email = %profile.email, "login succeeded");
                Ok(profile)
            }
            Err(e) => {
                warn!(email = %form.email, error = %e, "login failed");
                Err(e)
            }
        }
    }

    /// Submit the registration form.
    pub async fn register(&self, form: RegistrationForm) -> Result<UserProfile, AuthError> {
        form.validate()?;
        tokio::time::sleep(self.register_latency).await;

        self.directory.register(NewUser {
            email: &form.email,
            password: &form.password,
            name: Some(form.name.trim()),
            phone: form.phone.as_deref(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::PasswordHasher;
    use crate::validate::Field;
    use tokio::time::Instant;

    fn authenticator() -> Authenticator {
        let directory = UserDirectory::seeded(PasswordHasher::fast()).unwrap();
        Authenticator::new(Arc::new(directory))
    }

    fn registration(email: &str) -> RegistrationForm {
        RegistrationForm {
            name: "Lucía".into(),
            email: email.into(),
            password: "Levadura9".into(),
            confirm: "Levadura9".into(),
            phone: Some("+56 2 2345 6789".into()),
            accept_terms: true,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_latency() {
        let auth = authenticator();
        let start = Instant::now();

        let profile = auth
            .login(LoginForm::new("pedro@example.com", "Password123"))
            .await
            .unwrap();

        assert_eq!(profile.email, "pedro@example.com");
        assert!(start.elapsed() >= DEFAULT_LATENCY);
        assert_eq!(welcome_message(&profile), "¡Bienvenido pedro@example.com!");
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_form_fails_fast() {
        let auth = authenticator();
        let start = Instant::now();

        let err = auth.login(LoginForm::new("pedro", "")).await.unwrap_err();
        match err {
            AuthError::Validation(errors) => {
                assert!(errors.get(Field::Email).is_some());
                assert!(errors.get(Field::Password).is_some());
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(start.elapsed() < DEFAULT_LATENCY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bad_credentials() {
        let auth = authenticator();
        let err = auth
            .login(LoginForm::new("ana@example.com", "Password123"))
            .await
            .unwrap_err();
        assert!(err.is_auth_failure());
        assert_eq!(err.user_message(), "Credenciales incorrectas.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_then_login() {
        let auth = authenticator().with_latency(Duration::from_millis(10), Duration::from_millis(10));
        let profile = auth.register(registration("lucia@example.com")).await.unwrap();
        assert_eq!(profile.name.as_deref(), Some("Lucía"));

        assert!(auth
            .login(LoginForm::new("lucia@example.com", "Levadura9"))
            .await
            .is_ok());

        let err = auth.register(registration("lucia@example.com")).await.unwrap_err();
        assert_eq!(err.user_message(), "El email ya está registrado");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_registration_has_no_effect() {
        let auth = authenticator();
        let task = tokio::spawn({
            let auth = auth.clone();
            async move { auth.register(registration("nuevo@example.com")).await }
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());

        tokio::time::sleep(DEFAULT_LATENCY).await;
        assert!(!auth.directory().contains("nuevo@example.com").unwrap());
    }
}
