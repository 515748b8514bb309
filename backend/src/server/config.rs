//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};

/// Configuration for creating the HTTP server.
#[derive(Clone)]
pub struct ServerConfig {
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
    bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a server configuration.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }

    /// Key used to sign and encrypt the session cookie.
    #[must_use]
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Whether the session cookie carries the `Secure` flag.
    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    /// `SameSite` policy for the session cookie.
    #[must_use]
    pub fn same_site(&self) -> SameSite {
        self.same_site
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
