//! Port for the external identity provider.
//!
//! The provider owns credential storage and verification; the domain only
//! consumes the resulting opaque identifier. Session transport (cookies)
//! stays in the inbound adapter.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::{Error, LoginCredentials, UserId};

/// Failures reported by identity provider adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityProviderError {
    /// The provider rejected the request (bad credentials, duplicate email).
    #[error("identity provider rejected the request: {message}")]
    Rejected { message: String },
    /// The provider could not be reached or answered abnormally.
    #[error("identity provider unavailable: {message}")]
    Unavailable { message: String },
}

impl IdentityProviderError {
    /// Create a rejection with the provider's message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Create an availability error with the given message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// The provider's own message, without the port prefix.
    pub fn provider_message(&self) -> &str {
        match self {
            Self::Rejected { message } | Self::Unavailable { message } => message.as_str(),
        }
    }
}

/// Driven port for credential verification and account creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials and return the account's stable identifier.
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<UserId, IdentityProviderError>;

    /// Create a new account and return its freshly assigned identifier.
    async fn register(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<UserId, IdentityProviderError>;
}

/// In-memory identity provider for tests and database-less development runs.
///
/// Accounts registered here live for the process lifetime only. Identifiers
/// are random UUIDs rendered as opaque strings, matching the shape a hosted
/// provider would hand out.
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    accounts: RwLock<HashMap<String, StoredAccount>>,
}

#[derive(Debug, Clone)]
struct StoredAccount {
    password: Zeroizing<String>,
    user_id: UserId,
}

impl InMemoryIdentityProvider {
    /// Create a provider with no registered accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account, returning its assigned identifier.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::ports::InMemoryIdentityProvider;
    ///
    /// let provider = InMemoryIdentityProvider::new();
    /// let id = provider.seed_account("jo@example.com", "hunter2").unwrap();
    /// assert!(!id.as_ref().is_empty());
    /// ```
    pub fn seed_account(&self, email: &str, password: &str) -> Result<UserId, Error> {
        let user_id = Self::mint_user_id()?;
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| Error::internal("identity fixture lock poisoned"))?;
        accounts.insert(
            email.to_owned(),
            StoredAccount {
                password: Zeroizing::new(password.to_owned()),
                user_id: user_id.clone(),
            },
        );
        Ok(user_id)
    }

    fn mint_user_id() -> Result<UserId, Error> {
        UserId::new(Uuid::new_v4().to_string())
            .map_err(|err| Error::internal(format!("invalid generated user id: {err}")))
    }

    fn lock_poisoned() -> IdentityProviderError {
        IdentityProviderError::unavailable("identity fixture lock poisoned")
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<UserId, IdentityProviderError> {
        let accounts = self.accounts.read().map_err(|_| Self::lock_poisoned())?;
        accounts
            .get(credentials.email())
            .filter(|account| account.password.as_str() == credentials.password())
            .map(|account| account.user_id.clone())
            .ok_or_else(|| IdentityProviderError::rejected("Invalid login credentials"))
    }

    async fn register(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<UserId, IdentityProviderError> {
        let mut accounts = self.accounts.write().map_err(|_| Self::lock_poisoned())?;
        if accounts.contains_key(credentials.email()) {
            return Err(IdentityProviderError::rejected(
                "User already registered",
            ));
        }

        let user_id = UserId::new(Uuid::new_v4().to_string())
            .map_err(|err| IdentityProviderError::unavailable(format!("bad generated id: {err}")))?;
        accounts.insert(
            credentials.email().to_owned(),
            StoredAccount {
                password: Zeroizing::new(credentials.password().to_owned()),
                user_id: user_id.clone(),
            },
        );
        Ok(user_id)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn creds(email: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(email, password).expect("credential shape")
    }

    #[rstest]
    #[tokio::test]
    async fn register_then_authenticate_round_trips() {
        let provider = InMemoryIdentityProvider::new();
        let registered = provider
            .register(&creds("jo@example.com", "hunter2"))
            .await
            .expect("register");

        let authenticated = provider
            .authenticate(&creds("jo@example.com", "hunter2"))
            .await
            .expect("authenticate");
        assert_eq!(registered, authenticated);
    }

    #[rstest]
    #[case("jo@example.com", "wrong")]
    #[case("nobody@example.com", "hunter2")]
    #[tokio::test]
    async fn bad_credentials_are_rejected(#[case] email: &str, #[case] password: &str) {
        let provider = InMemoryIdentityProvider::new();
        provider.seed_account("jo@example.com", "hunter2").expect("seed");

        let err = provider
            .authenticate(&creds(email, password))
            .await
            .expect_err("must reject");
        assert!(matches!(err, IdentityProviderError::Rejected { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let provider = InMemoryIdentityProvider::new();
        provider
            .register(&creds("jo@example.com", "hunter2"))
            .await
            .expect("first registration");

        let err = provider
            .register(&creds("jo@example.com", "other"))
            .await
            .expect_err("duplicate must fail");
        assert_eq!(err.provider_message(), "User already registered");
    }
}
