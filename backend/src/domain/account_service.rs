//! Account provisioning and profile lookup service.
//!
//! Signup is deliberately asymmetric: the identity-provider call must
//! succeed, while the follow-up profile insert is best-effort. A missing
//! profile only costs the dashboard greeting, so its failure is logged as a
//! provisioning warning and never shown to the caller.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AccountCommand, IdentityProvider, IdentityProviderError, ProfileQuery, ProfileRepository,
};
use crate::domain::{Error, LoginCredentials, Profile, SignupDetails, UserId};

/// Account service over the identity provider and profile repository ports.
#[derive(Clone)]
pub struct AccountService<I, P> {
    identity: Arc<I>,
    profiles: Arc<P>,
}

impl<I, P> AccountService<I, P> {
    /// Create a new service with the given ports.
    pub fn new(identity: Arc<I>, profiles: Arc<P>) -> Self {
        Self { identity, profiles }
    }
}

fn map_login_error(error: &IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::Rejected { message } => Error::unauthorized(message.clone()),
        IdentityProviderError::Unavailable { message } => Error::store_failure(message.clone()),
    }
}

/// Registration failures pass the provider's message through; either way the
/// external backend refused the operation.
fn map_register_error(error: &IdentityProviderError) -> Error {
    Error::store_failure(error.provider_message())
}

#[async_trait]
impl<I, P> AccountCommand for AccountService<I, P>
where
    I: IdentityProvider,
    P: ProfileRepository,
{
    async fn signup(&self, details: &SignupDetails) -> Result<UserId, Error> {
        let user_id = self
            .identity
            .register(details.credentials())
            .await
            .map_err(|err| map_register_error(&err))?;

        let profile = Profile {
            id: user_id.clone(),
            email: details.email().to_owned(),
            first_name: details.first_name().map(str::to_owned),
            last_name: details.last_name().map(str::to_owned),
        };
        if let Err(error) = self.profiles.insert(&profile).await {
            // Provisioning warning: the account exists and is usable; the
            // profile can be created later. Never surfaced to the caller.
            tracing::warn!(
                user_id = %user_id,
                %error,
                "profile creation failed after successful signup"
            );
        }

        tracing::info!(user_id = %user_id, "account created");
        Ok(user_id)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        self.identity
            .authenticate(credentials)
            .await
            .map_err(|err| map_login_error(&err))
    }
}

#[async_trait]
impl<I, P> ProfileQuery for AccountService<I, P>
where
    I: IdentityProvider,
    P: ProfileRepository,
{
    async fn profile(&self, user: &UserId) -> Result<Option<Profile>, Error> {
        self.profiles
            .find_by_id(user)
            .await
            .map_err(|err| Error::store_failure(err.store_message()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{
        InMemoryIdentityProvider, InMemoryProfileRepository, MockIdentityProvider,
        MockProfileRepository, ProfileStoreError,
    };
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn details() -> SignupDetails {
        SignupDetails::try_from_parts("jo@example.com", "hunter2", Some("Jo"), Some("Bloggs"))
            .expect("signup shape")
    }

    #[rstest]
    #[tokio::test]
    async fn signup_creates_account_and_profile() {
        let identity = Arc::new(InMemoryIdentityProvider::new());
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let service = AccountService::new(Arc::clone(&identity), Arc::clone(&profiles));

        let user_id = service.signup(&details()).await.expect("signup");
        let profile = service
            .profile(&user_id)
            .await
            .expect("profile query")
            .expect("profile created");
        assert_eq!(profile.email, "jo@example.com");
        assert_eq!(profile.first_name.as_deref(), Some("Jo"));
    }

    #[rstest]
    #[tokio::test]
    async fn signup_survives_profile_insert_failure() {
        let identity = Arc::new(InMemoryIdentityProvider::new());
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_insert()
            .returning(|_| Err(ProfileStoreError::query("permission denied")));
        let service = AccountService::new(Arc::clone(&identity), Arc::new(profiles));

        let user_id = service
            .signup(&details())
            .await
            .expect("signup must not fail on profile error");

        // The account remains usable: login yields the same identifier.
        let credentials =
            LoginCredentials::try_from_parts("jo@example.com", "hunter2").expect("creds");
        let logged_in = service.login(&credentials).await.expect("login");
        assert_eq!(logged_in, user_id);
    }

    #[rstest]
    #[tokio::test]
    async fn signup_hard_fails_when_provider_rejects() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_register()
            .returning(|_| Err(IdentityProviderError::rejected("User already registered")));
        let mut profiles = MockProfileRepository::new();
        profiles.expect_insert().never();
        let service = AccountService::new(Arc::new(identity), Arc::new(profiles));

        let err = service.signup(&details()).await.expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::StoreFailure);
        assert_eq!(err.message(), "User already registered");
    }

    #[rstest]
    #[tokio::test]
    async fn login_maps_rejection_to_unauthorized() {
        let identity = Arc::new(InMemoryIdentityProvider::new());
        identity.seed_account("jo@example.com", "hunter2").expect("seed");
        let service =
            AccountService::new(Arc::clone(&identity), Arc::new(InMemoryProfileRepository::new()));

        let credentials =
            LoginCredentials::try_from_parts("jo@example.com", "wrong").expect("creds");
        let err = service.login(&credentials).await.expect_err("must reject");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "Invalid login credentials");
    }

    #[rstest]
    #[tokio::test]
    async fn missing_profile_reads_as_none() {
        let service = AccountService::new(
            Arc::new(InMemoryIdentityProvider::new()),
            Arc::new(InMemoryProfileRepository::new()),
        );
        let user = UserId::new("ghost").expect("id");
        assert_eq!(service.profile(&user).await.expect("query"), None);
    }
}
