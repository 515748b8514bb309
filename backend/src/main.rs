//! Service entry-point: wires configuration, state, and the HTTP server.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use wicket::inbound::http::state::HttpState;
use wicket::server::{self, ServerConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Minimum secret length accepted for cookie key derivation.
const MIN_SECRET_LEN: usize = 32;

fn session_key() -> std::io::Result<Key> {
    // Debug builds fall back to an ephemeral key so local runs need no
    // setup; release builds refuse to start without a secret.
    session_key_from(env::var("SESSION_SECRET").ok(), !cfg!(debug_assertions))
}

fn session_key_from(secret: Option<String>, require_secret: bool) -> std::io::Result<Key> {
    match secret {
        Some(secret) if secret.len() >= MIN_SECRET_LEN => Ok(Key::derive_from(secret.as_bytes())),
        Some(_) => Err(std::io::Error::other(format!(
            "SESSION_SECRET must be at least {MIN_SECRET_LEN} bytes"
        ))),
        None if require_secret => Err(std::io::Error::other("SESSION_SECRET is required")),
        None => {
            warn!("using temporary session key (dev only)");
            Ok(Key::generate())
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = session_key()?;

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let config = ServerConfig::new(key, cookie_secure, SameSite::Lax, bind_addr);
    server::run(config, HttpState::in_memory()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn long_secret_derives_a_key() {
        let secret = "0123456789abcdef0123456789abcdef".to_owned();
        assert!(session_key_from(Some(secret), true).is_ok());
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn short_secret_is_rejected_in_every_build(#[case] require_secret: bool) {
        let err = session_key_from(Some("too-short".to_owned()), require_secret)
            .err()
            .expect("short secret must be refused");
        assert!(err.to_string().contains("at least"));
    }

    #[rstest]
    fn missing_secret_is_fatal_when_required() {
        let err = session_key_from(None, true)
            .err()
            .expect("release builds need a secret");
        assert!(err.to_string().contains("SESSION_SECRET is required"));
    }

    #[rstest]
    fn missing_secret_falls_back_to_an_ephemeral_key_when_allowed() {
        assert!(session_key_from(None, false).is_ok());
    }
}
