//! Driving ports for account provisioning and profile reads.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Profile, SignupDetails, UserId};

/// Domain use-case port for signup and login.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account with the identity provider, then attempt the
    /// matching profile row. Profile failure must not fail the signup.
    async fn signup(&self, details: &SignupDetails) -> Result<UserId, Error>;

    /// Verify credentials and return the authenticated identifier.
    async fn login(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Domain use-case port for reading the caller's profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// The caller's profile, or `None` when signup's best-effort insert
    /// never succeeded.
    async fn profile(&self, user: &UserId) -> Result<Option<Profile>, Error>;
}
