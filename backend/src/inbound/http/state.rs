//! Shared application state handed to HTTP handlers.
//!
//! Holds the port implementations behind `Arc` so every worker and every
//! in-flight request shares the same credential store and session registry.

use std::sync::Arc;

use crate::domain::{CredentialAuthenticator, LocalAuthenticator};
use crate::domain::ports::{PasswordScheme, SessionRegistry, UserStore};
use crate::outbound::{Argon2Scheme, InMemorySessionRegistry, InMemoryUserStore};

/// Bundle of port implementations used by the HTTP edge.
pub struct HttpState {
    users: Arc<dyn UserStore>,
    passwords: Arc<dyn PasswordScheme>,
    sessions: Arc<dyn SessionRegistry>,
    authenticator: Arc<dyn CredentialAuthenticator>,
}

impl HttpState {
    /// Assemble state from explicit port implementations.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserStore>,
        passwords: Arc<dyn PasswordScheme>,
        sessions: Arc<dyn SessionRegistry>,
        authenticator: Arc<dyn CredentialAuthenticator>,
    ) -> Self {
        Self {
            users,
            passwords,
            sessions,
            authenticator,
        }
    }

    /// Wire the default in-memory adapters with local credential checking.
    #[must_use]
    pub fn in_memory() -> Self {
        let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
        let passwords: Arc<dyn PasswordScheme> = Arc::new(Argon2Scheme::new());
        let sessions: Arc<dyn SessionRegistry> = Arc::new(InMemorySessionRegistry::new());
        let authenticator: Arc<dyn CredentialAuthenticator> = Arc::new(LocalAuthenticator::new(
            Arc::clone(&users),
            Arc::clone(&passwords),
        ));
        Self::new(users, passwords, sessions, authenticator)
    }

    /// Credential store port.
    #[must_use]
    pub fn users(&self) -> &Arc<dyn UserStore> {
        &self.users
    }

    /// Password scheme port.
    #[must_use]
    pub fn passwords(&self) -> &Arc<dyn PasswordScheme> {
        &self.passwords
    }

    /// Session registry port.
    #[must_use]
    pub fn sessions(&self) -> &Arc<dyn SessionRegistry> {
        &self.sessions
    }

    /// Credential verification strategy.
    #[must_use]
    pub fn authenticator(&self) -> &Arc<dyn CredentialAuthenticator> {
        &self.authenticator
    }
}
