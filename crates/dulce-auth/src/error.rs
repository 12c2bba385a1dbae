//! Authentication errors.

use thiserror::Error;

use crate::validate::ValidationErrors;

/// Shown above the login form when credentials do not match.
pub const LOGIN_FAILED_MESSAGE: &str = "Credenciales incorrectas.";

/// Shown under the email field when credentials do not match.
pub const LOGIN_FAILED_EMAIL_HINT: &str = "Correo electrónico no encontrado o contraseña incorrecta";

/// Shown under the password field when credentials do not match.
pub const LOGIN_FAILED_PASSWORD_HINT: &str = "Verifica tus credenciales e intenta nuevamente";

/// Shown when a form has field errors.
pub const FORM_INVALID_MESSAGE: &str = "Por favor corrige los errores en el formulario";

/// Shown when registering an email that already has an account.
pub const EMAIL_TAKEN_MESSAGE: &str = "El email ya está registrado";

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// One or more form fields failed validation.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Invalid credentials provided.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),

    /// Password hashing failed.
    #[error("password hash error: {0}")]
    Hash(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AuthError::InvalidCredentials)
    }

    /// Message to show the shopper above the form.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => FORM_INVALID_MESSAGE,
            AuthError::InvalidCredentials => LOGIN_FAILED_MESSAGE,
            AuthError::UserAlreadyExists(_) => EMAIL_TAKEN_MESSAGE,
            AuthError::Hash(_) | AuthError::Internal(_) => "Ocurrió un error, intenta nuevamente",
        }
    }
}

impl From<ValidationErrors> for AuthError {
    fn from(errors: ValidationErrors) -> Self {
        AuthError::Validation(errors)
    }
}
