//! Outbound adapters implementing domain ports for infrastructure concerns.
//!
//! This module follows the hexagonal architecture pattern, providing the
//! concrete implementations behind the domain port traits:
//!
//! - **`memory_users`**: lock-guarded in-memory credential store
//! - **`memory_sessions`**: lock-guarded in-memory session registry
//! - **`argon2_scheme`**: Argon2id password hashing and verification
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod argon2_scheme;
pub mod memory_sessions;
pub mod memory_users;

pub use argon2_scheme::Argon2Scheme;
pub use memory_sessions::InMemorySessionRegistry;
pub use memory_users::InMemoryUserStore;
