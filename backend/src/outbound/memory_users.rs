//! In-memory credential store adapter.
//!
//! Stands in for a database: an append-only vector behind an `RwLock`,
//! scanned linearly on lookup. State lives for the process lifetime only
//! and is lost on restart.

use std::sync::RwLock;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{UserId, UserRecord};

/// Append-only, lock-guarded user collection.
///
/// Reads take the shared lock and writes the exclusive lock, so concurrent
/// lookups never block each other. Nothing expensive ever runs under either
/// lock; password hashing happens before `insert` is called.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<UserRecord>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records; test and diagnostics helper.
    ///
    /// # Errors
    /// Returns [`UserStoreError::Backend`] when the lock is poisoned.
    pub fn len(&self) -> Result<usize, UserStoreError> {
        Ok(self.read_users()?.len())
    }

    /// Whether the store holds no records.
    ///
    /// # Errors
    /// Returns [`UserStoreError::Backend`] when the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, UserStoreError> {
        Ok(self.len()? == 0)
    }

    fn read_users(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<UserRecord>>, UserStoreError> {
        self.users
            .read()
            .map_err(|_| UserStoreError::backend("user store lock poisoned"))
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserStoreError> {
        let users = self.read_users()?;
        Ok(users.iter().find(|user| user.email() == email).cloned())
    }

    fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, UserStoreError> {
        let users = self.read_users()?;
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }

    fn insert(&self, record: UserRecord) -> Result<(), UserStoreError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| UserStoreError::backend("user store lock poisoned"))?;
        // Email is the login lookup key; a duplicate would make first-match
        // lookups ambiguous, so reject it at insert.
        if users.iter().any(|user| user.email() == record.email()) {
            return Err(UserStoreError::duplicate_email(record.email()));
        }
        users.push(record);
        Ok(())
    }
}
