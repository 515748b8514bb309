//! Argon2id password scheme adapter.
//!
//! Hashes with the crate-default Argon2id parameters and a fresh 16-byte
//! random salt per call, emitting PHC-format strings. The work factor is
//! fixed; changing it later only affects newly hashed passwords.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

use crate::domain::ports::{PasswordScheme, PasswordSchemeError};

/// Stateless Argon2id hasher/verifier.
#[derive(Default, Clone, Copy)]
pub struct Argon2Scheme;

impl Argon2Scheme {
    /// Create the scheme with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PasswordScheme for Argon2Scheme {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordSchemeError> {
        let mut salt_bytes = [0u8; 16];
        getrandom::getrandom(&mut salt_bytes).map_err(|err| PasswordSchemeError::Hash {
            message: err.to_string(),
        })?;
        let salt =
            SaltString::encode_b64(&salt_bytes).map_err(|err| PasswordSchemeError::Hash {
                message: err.to_string(),
            })?;
        let phc = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| PasswordSchemeError::Hash {
                message: err.to_string(),
            })?
            .to_string();
        Ok(phc)
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordSchemeError> {
        let parsed = PasswordHash::new(hash).map_err(|_| PasswordSchemeError::Malformed)?;
        match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordSchemeError::Verify {
                message: err.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hashing_twice_yields_distinct_hashes_that_both_verify() {
        let scheme = Argon2Scheme::new();
        let first = scheme.hash("secret1").expect("hash succeeds");
        let second = scheme.hash("secret1").expect("hash succeeds");
        assert_ne!(first, second, "salts must differ between calls");
        assert!(scheme.verify("secret1", &first).expect("verify succeeds"));
        assert!(scheme.verify("secret1", &second).expect("verify succeeds"));
    }

    #[rstest]
    fn wrong_password_fails_verification_without_error() {
        let scheme = Argon2Scheme::new();
        let hash = scheme.hash("secret1").expect("hash succeeds");
        assert!(!scheme.verify("wrong", &hash).expect("verify succeeds"));
    }

    #[rstest]
    fn hash_output_is_never_the_plaintext() {
        let scheme = Argon2Scheme::new();
        let hash = scheme.hash("secret1").expect("hash succeeds");
        assert_ne!(hash, "secret1");
        assert!(hash.starts_with("$argon2"));
    }

    #[rstest]
    #[case("")]
    #[case("not a phc string")]
    fn malformed_stored_hashes_are_an_error(#[case] stored: &str) {
        let scheme = Argon2Scheme::new();
        let err = scheme
            .verify("secret1", stored)
            .expect_err("malformed hash must not verify");
        assert_eq!(err, PasswordSchemeError::Malformed);
    }
}
