//! Authentication primitives and the credential verification service.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port, and keep
//! the verification policy behind [`CredentialAuthenticator`] so the HTTP
//! edge depends on an interface rather than a concrete strategy.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use zeroize::Zeroizing;

use super::ports::{PasswordScheme, UserStore};
use super::user::UserRecord;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the authenticator.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use wicket::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("a@x.com", "secret1").unwrap();
/// assert_eq!(creds.email(), "a@x.com");
/// assert_eq!(creds.password(), "secret1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    ///
    /// # Errors
    /// Returns a [`LoginValidationError`] naming the first blank field.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for user lookups.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller; zeroized on drop.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Why an authentication attempt was refused.
///
/// `NoSuchUser` and `WrongPassword` stay internal: the HTTP edge collapses
/// both into one generic flash message so responses never reveal which
/// field was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    /// No record matches the submitted email.
    #[error("no user with that email")]
    NoSuchUser,
    /// A record matched but the password did not verify.
    #[error("password incorrect")]
    WrongPassword,
    /// The store or verifier itself failed; surfaced to the caller.
    #[error("authentication failed internally: {message}")]
    Internal {
        /// Description of the underlying failure.
        message: String,
    },
}

impl AuthFailure {
    fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Pluggable credential verification policy.
///
/// Modeled as an explicit interface with one concrete implementation
/// ([`LocalAuthenticator`]) instead of a runtime-registered strategy name.
#[async_trait]
pub trait CredentialAuthenticator: Send + Sync {
    /// Resolve credentials to the matching user record or refuse them.
    ///
    /// # Errors
    /// Returns the typed [`AuthFailure`] reason; only
    /// [`AuthFailure::Internal`] indicates something other than bad
    /// credentials.
    async fn authenticate(&self, credentials: &LoginCredentials)
    -> Result<UserRecord, AuthFailure>;
}

/// Local-credential verification against the in-process user store.
pub struct LocalAuthenticator {
    users: Arc<dyn UserStore>,
    passwords: Arc<dyn PasswordScheme>,
}

impl LocalAuthenticator {
    /// Wire the authenticator to its store and password scheme.
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>, passwords: Arc<dyn PasswordScheme>) -> Self {
        Self { users, passwords }
    }
}

#[async_trait]
impl CredentialAuthenticator for LocalAuthenticator {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<UserRecord, AuthFailure> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .map_err(|err| AuthFailure::internal(err.to_string()))?
            .ok_or(AuthFailure::NoSuchUser)?;

        // Verification is CPU-bound; run it off the async executor and with
        // no store lock held so concurrent reads are never stalled.
        let scheme = Arc::clone(&self.passwords);
        let password = Zeroizing::new(credentials.password().to_owned());
        let stored_hash = user.password_hash().to_owned();
        let verified = tokio::task::spawn_blocking(move || scheme.verify(&password, &stored_hash))
            .await
            .map_err(|err| AuthFailure::internal(format!("verification task failed: {err}")))?
            .map_err(|err| AuthFailure::internal(err.to_string()))?;

        if verified {
            Ok(user)
        } else {
            Err(AuthFailure::WrongPassword)
        }
    }
}
