//! Simulated customer directory.

use std::sync::RwLock;

use serde::Serialize;
use tracing::{debug, info};

use crate::password::PasswordHasher;
use crate::AuthError;

/// Customers present in a fresh directory: `(email, password)`.
const SEED_CUSTOMERS: [(&str, &str); 3] = [
    ("ana@example.com", "Clave2025"),
    ("pedro@example.com", "Password123"),
    ("cliente@dulcehogar.com", "Cliente2025"),
];

/// Public view of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// A directory entry.
#[derive(Debug, Clone)]
struct UserRecord {
    profile: UserProfile,
    password_hash: String,
}

/// New account details for [`UserDirectory::register`].
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: Option<&'a str>,
    pub phone: Option<&'a str>,
}

/// In-memory customer accounts, keyed by email.
///
/// Lives for the process only. Emails match exactly.
#[derive(Debug)]
pub struct UserDirectory {
    users: RwLock<Vec<UserRecord>>,
    hasher: PasswordHasher,
}

fn poisoned() -> AuthError {
    AuthError::Internal("user directory lock poisoned".to_string())
}

impl UserDirectory {
    /// An empty directory.
    pub fn new(hasher: PasswordHasher) -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            hasher,
        }
    }

    /// A directory holding the storefront's three demo customers.
    pub fn seeded(hasher: PasswordHasher) -> Result<Self, AuthError> {
        let directory = Self::new(hasher);
        for (email, password) in SEED_CUSTOMERS {
            directory.register(NewUser {
                email,
                password,
                name: None,
                phone: None,
            })?;
        }
        Ok(directory)
    }

    /// Check credentials, returning the customer on a match.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let users = self.users.read().map_err(|_| poisoned())?;
        let Some(record) = users.iter().find(|u| u.profile.email == email) else {
            debug!(email, "unknown email");
            return Err(AuthError::InvalidCredentials);
        };
        if !self.hasher.verify(password, &record.password_hash)? {
            debug!(email, "password mismatch");
            return Err(AuthError::InvalidCredentials);
        }
        Ok(record.profile.clone())
    }

    /// Add a customer. Fails when the email is taken.
    pub fn register(&self, user: NewUser<'_>) -> Result<UserProfile, AuthError> {
        if self.contains(user.email)? {
            return Err(AuthError::UserAlreadyExists(user.email.to_string()));
        }
        let password_hash = self.hasher.hash(user.password)?;

        let mut users = self.users.write().map_err(|_| poisoned())?;
        // Re-check under the write lock; hashing ran unlocked.
        if users.iter().any(|u| u.profile.email == user.email) {
            return Err(AuthError::UserAlreadyExists(user.email.to_string()));
        }
        let profile = UserProfile {
            email: user.email.to_string(),
            name: user.name.map(str::to_string),
            phone: user.phone.filter(|p| !p.trim().is_empty()).map(str::to_string),
        };
        users.push(UserRecord {
            profile: profile.clone(),
            password_hash,
        });
        info!(email = %profile.email, "customer registered");
        Ok(profile)
    }

    /// Whether an account exists for `email`.
    pub fn contains(&self, email: &str) -> Result<bool, AuthError> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.iter().any(|u| u.profile.email == email))
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.users.read().map(|u| u.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> UserDirectory {
        UserDirectory::seeded(PasswordHasher::fast()).unwrap()
    }

    #[test]
    fn test_seeded_customers_log_in() {
        let dir = directory();
        assert_eq!(dir.len(), 3);
        for (email, password) in SEED_CUSTOMERS {
            assert_eq!(dir.authenticate(email, password).unwrap().email, email);
        }
    }

    #[test]
    fn test_wrong_password_or_email() {
        let dir = directory();
        assert!(matches!(
            dir.authenticate("ana@example.com", "Clave2026"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            dir.authenticate("nadie@example.com", "Clave2025"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_register() {
        let dir = directory();
        let profile = dir
            .register(NewUser {
                email: "sofia@example.com",
                password: "Masa2025",
                name: Some("Sofía"),
                phone: Some(""),
            })
            .unwrap();
        assert_eq!(profile.name.as_deref(), Some("Sofía"));
        assert_eq!(profile.phone, None);
        assert!(dir.authenticate("sofia@example.com", "Masa2025").is_ok());

        let dup = dir.register(NewUser {
            email: "pedro@example.com",
            password: "Otra2025x",
            name: None,
            phone: None,
        });
        assert!(matches!(dup, Err(AuthError::UserAlreadyExists(_))));
    }
}
