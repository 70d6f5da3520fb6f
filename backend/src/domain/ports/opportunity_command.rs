//! Driving port for opportunity mutations.
//!
//! Inbound adapters call this to create and delete records without knowing
//! the backing store. The caller identity always travels inside the request
//! object; handlers obtain it from the session, never from the form payload.

use async_trait::async_trait;

use crate::domain::{Error, OpportunityForm, UserId};

/// Request to create one opportunity attributed to `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOpportunityRequest {
    /// Authenticated caller; becomes the row's immutable `owner_id`.
    pub owner: UserId,
    /// Raw string-valued field set from the presentation layer.
    pub form: OpportunityForm,
}

/// Request to delete rows matching a code for the calling owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOpportunityRequest {
    /// Authenticated caller; only rows they own are candidates.
    pub owner: UserId,
    /// The de facto row selector for deletion.
    pub code: String,
}

/// Outcome of a delete, including the internal rows-affected count.
///
/// The public contract stays success-only: deleting a nonexistent or
/// foreign-owned code succeeds with `rows_deleted == 0`. The count exists so
/// internal callers and tests can tell the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOpportunityResponse {
    /// How many rows the store actually removed.
    pub rows_deleted: usize,
}

/// Domain use-case port for opportunity mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpportunityCommand: Send + Sync {
    /// Validate, coerce, attribute, and persist one new opportunity.
    async fn create(&self, request: CreateOpportunityRequest) -> Result<(), Error>;

    /// Delete at most the rows matching (`code`, `owner`). Idempotent.
    async fn delete(
        &self,
        request: DeleteOpportunityRequest,
    ) -> Result<DeleteOpportunityResponse, Error>;
}
