//! Session-based authentication service.
//!
//! Registration hashes the submitted password and appends a user record to
//! an in-memory credential store; login verifies credentials and binds a
//! fresh opaque session token to the user; guards redirect unauthenticated
//! requests away from the home page and authenticated requests away from the
//! login and registration forms; logout revokes the token server-side.
//!
//! The crate follows a hexagonal layout: [`domain`] holds entities, ports,
//! and the authentication service; [`outbound`] holds the in-memory adapters
//! for those ports; [`inbound`] holds the HTTP edge; [`middleware`] and
//! [`server`] wire the Actix application together.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::MethodOverride;
