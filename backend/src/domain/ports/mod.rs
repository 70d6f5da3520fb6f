//! Domain ports and supporting types for the hexagonal boundary.

mod account;
mod identity_provider;
mod opportunity_command;
mod opportunity_query;
mod opportunity_repository;
mod profile_repository;

#[cfg(test)]
pub use account::{MockAccountCommand, MockProfileQuery};
pub use account::{AccountCommand, ProfileQuery};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityProviderError, InMemoryIdentityProvider};
#[cfg(test)]
pub use opportunity_command::MockOpportunityCommand;
pub use opportunity_command::{
    CreateOpportunityRequest, DeleteOpportunityRequest, DeleteOpportunityResponse,
    OpportunityCommand,
};
#[cfg(test)]
pub use opportunity_query::MockOpportunityQuery;
pub use opportunity_query::OpportunityQuery;
#[cfg(test)]
pub use opportunity_repository::MockOpportunityRepository;
pub use opportunity_repository::{
    InMemoryOpportunityRepository, OpportunityRepository, OpportunityStoreError,
};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{InMemoryProfileRepository, ProfileRepository, ProfileStoreError};
