//! Customer accounts for the Dulce Hogar storefront.
//!
//! Provides form validation, a simulated customer directory with Argon2
//! password hashes, and login/registration flows with simulated latency.

mod authenticator;
mod directory;
mod error;
mod password;
pub mod validate;

pub use authenticator::{
    welcome_message, Authenticator, DEFAULT_LATENCY, LOGIN_SUCCESS_MESSAGE,
    REGISTER_SUCCESS_MESSAGE,
};
pub use directory::{NewUser, UserDirectory, UserProfile};
pub use error::{
    AuthError, EMAIL_TAKEN_MESSAGE, FORM_INVALID_MESSAGE, LOGIN_FAILED_EMAIL_HINT,
    LOGIN_FAILED_MESSAGE, LOGIN_FAILED_PASSWORD_HINT,
};
pub use password::PasswordHasher;
pub use validate::{Field, FieldError, LoginForm, RegistrationForm, ValidationErrors};
