//! Port abstraction for profile persistence adapters.

use async_trait::async_trait;

use crate::domain::{Profile, UserId};

/// Persistence errors raised by profile repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileStoreError {
    /// Repository connection could not be established.
    #[error("profile store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation was rejected during execution.
    #[error("profile store query failed: {message}")]
    Query { message: String },
}

impl ProfileStoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// The store's own description of the failure, without the port prefix.
    pub fn store_message(&self) -> &str {
        match self {
            Self::Connection { message } | Self::Query { message } => message.as_str(),
        }
    }
}

/// Port for the one-to-one profile rows keyed by user identifier.
///
/// Profiles are created once at signup (best-effort; the caller decides how
/// to react to failure) and read for display purposes. No update operation
/// exists in current scope.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert the profile row for a freshly created account.
    async fn insert(&self, profile: &Profile) -> Result<(), ProfileStoreError>;

    /// Fetch the profile for a user, if one was ever created.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Profile>, ProfileStoreError>;
}

/// In-memory implementation for tests and database-less development runs.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    rows: std::sync::RwLock<std::collections::HashMap<String, Profile>>,
}

impl InMemoryProfileRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_poisoned() -> ProfileStoreError {
        ProfileStoreError::connection("in-memory store lock poisoned")
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn insert(&self, profile: &Profile) -> Result<(), ProfileStoreError> {
        let mut rows = self.rows.write().map_err(|_| Self::lock_poisoned())?;
        if rows.contains_key(profile.id.as_ref()) {
            return Err(ProfileStoreError::query(format!(
                "duplicate key value violates unique constraint \"profiles_pkey\": {}",
                profile.id
            )));
        }
        rows.insert(profile.id.as_ref().to_owned(), profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Profile>, ProfileStoreError> {
        let rows = self.rows.read().map_err(|_| Self::lock_poisoned())?;
        Ok(rows.get(id.as_ref()).cloned())
    }
}
