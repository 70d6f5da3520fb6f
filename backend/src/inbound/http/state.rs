//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, OpportunityCommand, OpportunityQuery, ProfileQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Signup and login use-cases.
    pub accounts: Arc<dyn AccountCommand>,
    /// Profile lookup for the dashboard greeting.
    pub profiles: Arc<dyn ProfileQuery>,
    /// Opportunity create/delete use-cases.
    pub opportunities: Arc<dyn OpportunityCommand>,
    /// Opportunity listing use-case.
    pub opportunities_query: Arc<dyn OpportunityQuery>,
}

impl HttpState {
    /// Construct state from the four driving ports.
    pub fn new(
        accounts: Arc<dyn AccountCommand>,
        profiles: Arc<dyn ProfileQuery>,
        opportunities: Arc<dyn OpportunityCommand>,
        opportunities_query: Arc<dyn OpportunityQuery>,
    ) -> Self {
        Self {
            accounts,
            profiles,
            opportunities,
            opportunities_query,
        }
    }
}
