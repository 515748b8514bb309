//! Domain primitives, ports, and the authentication service.
//!
//! Purpose: define strongly typed entities used by the HTTP edge and the
//! adapters. Keep types immutable and document invariants in each type's
//! Rustdoc; framework details never reach this layer.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`] — transport-facing error payload.
//! - [`UserRecord`] / [`NewUser`] — stored aggregate and validated input.
//! - [`LoginCredentials`] / [`AuthFailure`] — authentication inputs/outcomes.
//! - [`ports`] — store, password scheme, and session registry interfaces.

pub mod auth;
pub mod error;
pub mod ports;
pub mod user;

pub use self::auth::{
    AuthFailure, CredentialAuthenticator, LocalAuthenticator, LoginCredentials,
    LoginValidationError,
};
pub use self::error::{Error, ErrorCode};
pub use self::user::{NewUser, UserId, UserRecord, UserValidationError};
