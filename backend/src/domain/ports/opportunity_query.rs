//! Driving port for opportunity reads.

use async_trait::async_trait;

use crate::domain::{Error, Opportunity, UserId};

/// Domain use-case port for listing a caller's opportunities.
///
/// Each call re-reads current state and returns a finite snapshot; there is
/// no incremental or streaming variant.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpportunityQuery: Send + Sync {
    /// All opportunities owned by `owner`, `created_at` descending. An owner
    /// with no rows gets an empty vector, not an error.
    async fn list(&self, owner: &UserId) -> Result<Vec<Opportunity>, Error>;
}
