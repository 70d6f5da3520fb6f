//! Shared helpers for HTTP adapter tests.

use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;

use crate::domain::ports::{
    InMemoryIdentityProvider, InMemoryOpportunityRepository, InMemoryProfileRepository,
};
use crate::domain::{AccountService, OpportunityService};
use crate::inbound::http::state::HttpState;

/// Cookie-backed session middleware with test-friendly settings.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// In-memory fixtures behind real services, plus handles to the raw stores.
pub struct TestBackend {
    pub state: HttpState,
    pub identity: Arc<InMemoryIdentityProvider>,
    pub profiles: Arc<InMemoryProfileRepository>,
    pub opportunities: Arc<InMemoryOpportunityRepository>,
}

/// Wire the full service stack over in-memory stores.
pub fn test_backend() -> TestBackend {
    let identity = Arc::new(InMemoryIdentityProvider::new());
    let profiles = Arc::new(InMemoryProfileRepository::new());
    let opportunities = Arc::new(InMemoryOpportunityRepository::new());

    let accounts = Arc::new(AccountService::new(
        Arc::clone(&identity),
        Arc::clone(&profiles),
    ));
    let opportunity_service = Arc::new(OpportunityService::new(Arc::clone(&opportunities)));

    let state = HttpState::new(
        accounts.clone(),
        accounts,
        opportunity_service.clone(),
        opportunity_service,
    );

    TestBackend {
        state,
        identity,
        profiles,
        opportunities,
    }
}
