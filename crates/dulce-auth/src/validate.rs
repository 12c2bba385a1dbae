//! Form field validation.
//!
//! Each validator returns the message to show under the field. Forms collect
//! every failing field rather than stopping at the first one.

use serde::Serialize;
use std::fmt;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Inclusive name length bounds, in characters, after trimming.
pub const NAME_LEN: (usize, usize) = (2, 50);

/// Inclusive phone length bounds, in characters.
pub const PHONE_LEN: (usize, usize) = (8, 20);

/// A form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Password,
    Confirm,
    Phone,
    Terms,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::Confirm => "confirm",
            Field::Phone => "phone",
            Field::Terms => "terms",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed field and the message shown under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Every field error of one form submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `result` against `field` if it failed.
    pub fn check(&mut self, field: Field, result: Result<(), &'static str>) {
        if let Err(message) = result {
            self.errors.push(FieldError { field, message });
        }
    }

    /// Message for `field`, if it failed.
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// `Ok(())` when nothing failed.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

/// Validate an email address.
///
/// No whitespace, exactly one `@` with text before it, and a `.` inside the
/// domain with text on both sides.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.trim().is_empty() {
        return Err("El email es requerido");
    }
    const INVALID: &str = "Por favor ingresa un email válido";

    if email.chars().any(char::is_whitespace) {
        return Err(INVALID);
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(INVALID);
    };
    if local.is_empty() || domain.contains('@') {
        return Err(INVALID);
    }
    let dotted = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    if !dotted {
        return Err(INVALID);
    }
    Ok(())
}

/// Validate password strength, reporting the first unmet rule.
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.trim().is_empty() {
        return Err("La contraseña es requerida");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Mínimo 8 caracteres");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Debe incluir al menos 1 mayúscula");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Debe incluir al menos 1 minúscula");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Debe incluir al menos 1 número");
    }
    Ok(())
}

/// Login only requires a non-blank password.
pub fn validate_password_present(password: &str) -> Result<(), &'static str> {
    if password.trim().is_empty() {
        Err("La contraseña es requerida")
    } else {
        Ok(())
    }
}

/// Validate a display name.
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let len = name.trim().chars().count();
    if (NAME_LEN.0..=NAME_LEN.1).contains(&len) {
        Ok(())
    } else {
        Err("El nombre debe tener entre 2 y 50 caracteres")
    }
}

/// Validate an optional phone number. Empty is accepted; whitespace alone is not.
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if phone.is_empty() {
        return Ok(());
    }
    let len = phone.chars().count();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '(' | ')'));
    if allowed && (PHONE_LEN.0..=PHONE_LEN.1).contains(&len) {
        Ok(())
    } else {
        Err("Formato de teléfono inválido")
    }
}

/// Check the confirmation field.
pub fn validate_confirmation(password: &str, confirm: &str) -> Result<(), &'static str> {
    if password == confirm {
        Ok(())
    } else {
        Err("Las contraseñas no coinciden")
    }
}

/// Check the terms checkbox.
pub fn validate_terms(accepted: bool) -> Result<(), &'static str> {
    if accepted {
        Ok(())
    } else {
        Err("Debes aceptar los términos y condiciones")
    }
}

/// Login form input.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(Field::Email, validate_email(&self.email));
        errors.check(Field::Password, validate_password_present(&self.password));
        errors.into_result()
    }
}

/// Registration form input.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub phone: Option<String>,
    pub accept_terms: bool,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(Field::Name, validate_name(&self.name));
        errors.check(Field::Email, validate_email(&self.email));
        errors.check(Field::Password, validate_password(&self.password));
        errors.check(
            Field::Confirm,
            validate_confirmation(&self.password, &self.confirm),
        );
        if let Some(phone) = &self.phone {
            errors.check(Field::Phone, validate_phone(phone));
        }
        errors.check(Field::Terms, validate_terms(self.accept_terms));
        errors.into_result()
    }
}
