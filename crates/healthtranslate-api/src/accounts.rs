use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use tracing::{debug, warn};

use healthtranslate_types::api::CurrentUser;
use healthtranslate_types::models::Account;

use crate::error::{ApiError, ApiResult};

/// Lookup seam for login-capable accounts.
pub trait AccountRepository: Send + Sync {
    fn find(&self, email: &str) -> Option<Account>;
}

/// The single account seeded at startup. Immutable for the process lifetime.
pub struct SeedAccount {
    account: Account,
}

impl SeedAccount {
    /// Hashes `password` with Argon2id. Slow on purpose; call once at startup.
    pub fn new(email: &str, username: &str, password: &str) -> anyhow::Result<Self> {
        Ok(Self {
            account: Account {
                email: normalize_email(email),
                username: username.to_string(),
                password_hash: hash_password(password)?,
            },
        })
    }
}

impl AccountRepository for SeedAccount {
    fn find(&self, email: &str) -> Option<Account> {
        (self.account.email == email).then(|| self.account.clone())
    }
}

/// Verifies credentials and vets registrations against an `AccountRepository`.
#[derive(Clone)]
pub struct CredentialStore {
    accounts: Arc<dyn AccountRepository>,
    // Verified against when the email is unknown, so both failure paths
    // pay for one Argon2 run.
    decoy_hash: String,
}

impl CredentialStore {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> anyhow::Result<Self> {
        Ok(Self {
            accounts,
            decoy_hash: hash_password("decoy-password-never-matches")?,
        })
    }

    /// Returns the identity of the matching account.
    pub fn authenticate(&self, email: &str, password: &str) -> ApiResult<CurrentUser> {
        let Some(account) = self.accounts.find(&normalize_email(email)) else {
            let _ = verify_password(password, &self.decoy_hash);
            debug!("Login attempt for unknown account");
            return Err(ApiError::Unauthorized);
        };

        if !verify_password(password, &account.password_hash)? {
            warn!("Failed login for {}", account.email);
            return Err(ApiError::Unauthorized);
        }

        Ok(CurrentUser {
            username: account.username,
            email: account.email,
        })
    }

    /// Vets a registration and returns the identity to put in the token.
    ///
    /// Nothing is persisted: the account store is read-only, so a
    /// registered identity lives only as long as its token.
    pub fn register(
        &self,
        email: &str,
        _password: &str,
        username: Option<&str>,
    ) -> ApiResult<CurrentUser> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(ApiError::InvalidEmail);
        }
        if self.accounts.find(&email).is_some() {
            return Err(ApiError::AlreadyRegistered);
        }

        let username = match username.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => local_part(&email).to_string(),
        };
        Ok(CurrentUser { username, email })
    }
}

fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Password hashing failed: {}", e))?
        .to_string();
    Ok(hash)
}

fn verify_password(password: &str, hash: &str) -> ApiResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| anyhow::anyhow!("Stored password hash is invalid: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Trim and lowercase the domain. The local part is kept as typed.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Shape check only: one `@`, non-empty local part, dotted domain.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let labels: Vec<&str> = domain.split('.').collect();

    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && labels.len() >= 2
        && labels.iter().all(|label| !label.is_empty())
}
