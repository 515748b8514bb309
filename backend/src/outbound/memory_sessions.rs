//! In-memory session registry adapter.
//!
//! Holds the server-side half of every live session: an opaque token mapped
//! to the user it was issued for. Tokens are random UUIDs, minted fresh on
//! every `start` so a pre-authentication identifier can never be promoted.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::domain::UserId;
use crate::domain::ports::{SessionRegistry, SessionRegistryError, SessionToken};

/// Lock-guarded token-to-identity map.
#[derive(Default)]
pub struct InMemorySessionRegistry {
    sessions: RwLock<HashMap<SessionToken, UserId>>,
}

impl InMemorySessionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions; test and diagnostics helper.
    ///
    /// # Errors
    /// Returns [`SessionRegistryError::Backend`] when the lock is poisoned.
    pub fn live_sessions(&self) -> Result<usize, SessionRegistryError> {
        Ok(self
            .sessions
            .read()
            .map_err(|_| SessionRegistryError::backend("session registry lock poisoned"))?
            .len())
    }

    fn mint_token() -> Result<SessionToken, SessionRegistryError> {
        SessionToken::new(Uuid::new_v4().to_string())
            .map_err(|err| SessionRegistryError::backend(err.to_string()))
    }
}

impl SessionRegistry for InMemorySessionRegistry {
    fn start(&self, user_id: UserId) -> Result<SessionToken, SessionRegistryError> {
        let token = Self::mint_token()?;
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionRegistryError::backend("session registry lock poisoned"))?;
        sessions.insert(token.clone(), user_id);
        Ok(token)
    }

    fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, SessionRegistryError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| SessionRegistryError::backend("session registry lock poisoned"))?;
        Ok(sessions.get(token).copied())
    }

    fn revoke(&self, token: &SessionToken) -> Result<(), SessionRegistryError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionRegistryError::backend("session registry lock poisoned"))?;
        // Unknown tokens are already dead; revocation stays idempotent.
        sessions.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn started_sessions_resolve_to_their_user() {
        let registry = InMemorySessionRegistry::new();
        let user_id = UserId::random();
        let token = registry.start(user_id).expect("start succeeds");
        assert_eq!(
            registry.resolve(&token).expect("resolve succeeds"),
            Some(user_id)
        );
    }

    #[rstest]
    fn every_start_mints_a_distinct_token() {
        let registry = InMemorySessionRegistry::new();
        let user_id = UserId::random();
        let first = registry.start(user_id).expect("start succeeds");
        let second = registry.start(user_id).expect("start succeeds");
        assert_ne!(first, second);
        assert_eq!(registry.live_sessions().expect("count"), 2);
    }

    #[rstest]
    fn revoked_tokens_no_longer_resolve() {
        let registry = InMemorySessionRegistry::new();
        let token = registry.start(UserId::random()).expect("start succeeds");
        registry.revoke(&token).expect("revoke succeeds");
        assert_eq!(registry.resolve(&token).expect("resolve succeeds"), None);
    }

    #[rstest]
    fn revoking_an_unknown_token_is_a_no_op() {
        let registry = InMemorySessionRegistry::new();
        let stray = SessionToken::new("stray-token").expect("non-empty token");
        registry.revoke(&stray).expect("revoke is idempotent");
    }

    #[rstest]
    fn unknown_tokens_resolve_to_none() {
        let registry = InMemorySessionRegistry::new();
        let stray = SessionToken::new("stray-token").expect("non-empty token");
        assert_eq!(registry.resolve(&stray).expect("resolve succeeds"), None);
    }
}
