//! User data model.
//!
//! [`UserRecord`] is the stored aggregate: immutable once inserted, owned by
//! the credential store for the process lifetime. [`NewUser`] validates raw
//! registration input before any hashing happens, keeping form parsing out
//! of the handlers.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Validation errors returned by [`NewUser::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
///
/// Serializes as the canonical hyphenated string so it can live inside
/// session state and JSON payloads unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Stored user aggregate.
///
/// ## Invariants
/// - `password_hash` is a PHC-format hash, never the plaintext password.
/// - Records are never mutated or deleted after insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    id: UserId,
    name: String,
    email: String,
    password_hash: String,
}

impl UserRecord {
    /// Assemble a record from an already-hashed password.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Display name captured at registration.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Email used as the lookup key (case-sensitive exact match).
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// PHC-format password hash.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }
}

/// Validated registration input, held before hashing.
///
/// ## Invariants
/// - `name` and `email` are trimmed and non-empty.
/// - `password` is non-empty and retains caller-provided whitespace to avoid
///   surprising credential comparisons later.
///
/// # Examples
/// ```
/// use wicket::domain::NewUser;
///
/// let new_user = NewUser::try_from_parts("Alice", "a@x.com", "secret1").unwrap();
/// assert_eq!(new_user.email(), "a@x.com");
/// ```
#[derive(Debug, Clone)]
pub struct NewUser {
    name: String,
    email: String,
    password: Zeroizing<String>,
}

impl NewUser {
    /// Construct a registration request from raw form inputs.
    ///
    /// # Errors
    /// Returns a [`UserValidationError`] naming the first blank field.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, UserValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        let email = email.trim();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Display name for the record under registration.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Email the record will be looked up by.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plaintext password awaiting hashing; zeroized on drop.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "a@x.com", "pw", UserValidationError::EmptyName)]
    #[case("   ", "a@x.com", "pw", UserValidationError::EmptyName)]
    #[case("Alice", "", "pw", UserValidationError::EmptyEmail)]
    #[case("Alice", "  ", "pw", UserValidationError::EmptyEmail)]
    #[case("Alice", "a@x.com", "", UserValidationError::EmptyPassword)]
    fn invalid_registration_input(
        #[case] name: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: UserValidationError,
    ) {
        let err = NewUser::try_from_parts(name, email, password)
            .expect_err("blank fields must fail validation");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  Alice  ", " a@x.com ", "secret1")]
    #[case("Bob", "b@x.com", "correct horse battery staple")]
    fn valid_input_trims_name_and_email(
        #[case] name: &str,
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let new_user =
            NewUser::try_from_parts(name, email, password).expect("valid inputs should succeed");
        assert_eq!(new_user.name(), name.trim());
        assert_eq!(new_user.email(), email.trim());
        assert_eq!(new_user.password(), password);
    }

    #[rstest]
    fn user_id_displays_the_canonical_hyphenated_form() {
        let rendered = UserId::random().to_string();
        assert_eq!(rendered.len(), 36);
        assert_eq!(rendered.matches('-').count(), 4);
    }

    #[rstest]
    fn random_user_ids_are_distinct() {
        assert_ne!(UserId::random(), UserId::random());
    }
}
