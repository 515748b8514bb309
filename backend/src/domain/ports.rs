//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the credential store, the password scheme, the session registry). Each
//! trait exposes strongly typed errors so adapters map their failures into
//! predictable variants instead of returning `anyhow::Result`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{UserId, UserRecord};

/// Errors surfaced by the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserStoreError {
    /// The email is already bound to an existing record.
    #[error("a user with email {email} already exists")]
    DuplicateEmail {
        /// Email that collided with an existing record.
        email: String,
    },
    /// Catch-all for storage failures that bubble up from the adapter.
    #[error("user store backend failure: {message}")]
    Backend {
        /// Adapter-provided description of the failure.
        message: String,
    },
}

impl UserStoreError {
    /// Helper for duplicate-email conflicts.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }

    /// Helper for backend-level failures.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Credential store holding every registered user for the process lifetime.
///
/// Lookups are case-sensitive exact matches; the first matching record wins.
/// Implementations must be safe under concurrent reads and inserts.
pub trait UserStore: Send + Sync {
    /// Find a record by its email lookup key.
    ///
    /// # Errors
    /// Returns [`UserStoreError::Backend`] when the store itself fails.
    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserStoreError>;

    /// Find a record by its stable identifier.
    ///
    /// # Errors
    /// Returns [`UserStoreError::Backend`] when the store itself fails.
    fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, UserStoreError>;

    /// Append a new record.
    ///
    /// # Errors
    /// Returns [`UserStoreError::DuplicateEmail`] when the email is taken and
    /// [`UserStoreError::Backend`] when the store itself fails.
    fn insert(&self, record: UserRecord) -> Result<(), UserStoreError>;
}

/// Errors surfaced by the password scheme.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordSchemeError {
    /// The stored hash is not a parseable PHC string.
    #[error("stored password hash is malformed")]
    Malformed,
    /// Hash computation failed.
    #[error("password hashing failed: {message}")]
    Hash {
        /// Adapter-provided description of the failure.
        message: String,
    },
    /// Verification failed for a reason other than a mismatch.
    #[error("password verification failed: {message}")]
    Verify {
        /// Adapter-provided description of the failure.
        message: String,
    },
}

/// One-way salted password hashing with a fixed work factor.
pub trait PasswordScheme: Send + Sync {
    /// Hash a plaintext password with a fresh random salt.
    ///
    /// Two calls with the same plaintext must yield distinct hashes.
    ///
    /// # Errors
    /// Returns [`PasswordSchemeError::Hash`] when computation fails.
    fn hash(&self, plaintext: &str) -> Result<String, PasswordSchemeError>;

    /// Verify a plaintext password against a stored PHC-format hash.
    ///
    /// A mismatch is `Ok(false)`, not an error.
    ///
    /// # Errors
    /// Returns [`PasswordSchemeError::Malformed`] for unparseable hashes and
    /// [`PasswordSchemeError::Verify`] for internal verifier failures.
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordSchemeError>;
}

/// Opaque server-issued session token carried in the client cookie.
///
/// The token is the only session datum the client ever holds; the identity
/// it stands for lives server-side in the [`SessionRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap an adapter-minted token value.
    ///
    /// # Errors
    /// Returns [`SessionTokenError::Empty`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, SessionTokenError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(SessionTokenError::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the underlying token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors returned when constructing [`SessionToken`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionTokenError {
    /// Token value is empty after trimming whitespace.
    #[error("session token must not be empty")]
    Empty,
}

/// Errors surfaced by the session registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionRegistryError {
    /// Registry backend is unavailable or corrupted.
    #[error("session registry backend failure: {message}")]
    Backend {
        /// Adapter-provided description of the failure.
        message: String,
    },
}

impl SessionRegistryError {
    /// Helper for backend-level failures.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Server-side registry mapping live session tokens to user identities.
///
/// Implementations must be safe under concurrent access. A revoked or
/// unknown token resolves to `None`; revoking an unknown token is a no-op
/// so logout stays idempotent.
pub trait SessionRegistry: Send + Sync {
    /// Mint a fresh token bound to `user_id`.
    ///
    /// Every call issues a new token; tokens are never reused, which is the
    /// session-fixation mitigation at login.
    ///
    /// # Errors
    /// Returns [`SessionRegistryError::Backend`] when the registry fails.
    fn start(&self, user_id: UserId) -> Result<SessionToken, SessionRegistryError>;

    /// Resolve a token to the identity it was bound to, if still live.
    ///
    /// # Errors
    /// Returns [`SessionRegistryError::Backend`] when the registry fails.
    fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, SessionRegistryError>;

    /// Revoke a token so it never resolves again.
    ///
    /// # Errors
    /// Returns [`SessionRegistryError::Backend`] when the registry fails;
    /// callers must surface this rather than pretend the logout succeeded.
    fn revoke(&self, token: &SessionToken) -> Result<(), SessionRegistryError>;
}
