//! Opportunity domain service implementing the driving ports.
//!
//! Create validates and coerces the form, stamps the owner from the session
//! identity, and inserts. List and delete both apply the ownership predicate
//! through the repository **and** re-check it here; the two guards are
//! deliberately independent so either one failing cannot expose another
//! user's rows.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::domain::ports::{
    CreateOpportunityRequest, DeleteOpportunityRequest, DeleteOpportunityResponse,
    OpportunityCommand, OpportunityQuery, OpportunityRepository, OpportunityStoreError,
};
use crate::domain::{Error, Opportunity, OpportunityDraft, UserId};

/// Opportunity service over a repository port.
#[derive(Clone)]
pub struct OpportunityService<R> {
    repo: Arc<R>,
}

impl<R> OpportunityService<R> {
    /// Create a new service with the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> OpportunityService<R>
where
    R: OpportunityRepository,
{
    /// Store failures surface the backend's own message verbatim.
    fn map_store_error(error: &OpportunityStoreError) -> Error {
        Error::store_failure(error.store_message())
    }

    /// Second ownership guard: drop any row the repository returned that is
    /// not owned by the caller. The repository already filters in its query;
    /// a row discarded here means one of the two layers is defective.
    fn retain_owned(rows: Vec<Opportunity>, owner: &UserId) -> Vec<Opportunity> {
        let total = rows.len();
        let owned: Vec<Opportunity> = rows
            .into_iter()
            .filter(|row| row.owner_id == *owner)
            .collect();
        if owned.len() != total {
            tracing::error!(
                owner = %owner,
                dropped = total - owned.len(),
                "repository returned rows not owned by the caller; dropped"
            );
        }
        owned
    }
}

#[async_trait]
impl<R> OpportunityCommand for OpportunityService<R>
where
    R: OpportunityRepository,
{
    async fn create(&self, request: CreateOpportunityRequest) -> Result<(), Error> {
        let draft = OpportunityDraft::from_form(&request.form).map_err(|err| {
            Error::validation_failed(err.to_string())
                .with_details(json!({ "field": err.field(), "code": "missing_field" }))
        })?;

        let opportunity = Opportunity::from_draft(draft, request.owner, Utc::now());
        self.repo
            .insert(&opportunity)
            .await
            .map_err(|err| Self::map_store_error(&err))?;

        tracing::info!(
            owner = %opportunity.owner_id,
            code = %opportunity.code,
            "opportunity created"
        );
        Ok(())
    }

    async fn delete(
        &self,
        request: DeleteOpportunityRequest,
    ) -> Result<DeleteOpportunityResponse, Error> {
        let code = request.code.trim();
        if code.is_empty() {
            return Err(Error::validation_failed(
                "missing required field: opportunityCode",
            )
            .with_details(json!({ "field": "opportunityCode", "code": "missing_field" })));
        }

        let rows_deleted = self
            .repo
            .delete_by_code(code, &request.owner)
            .await
            .map_err(|err| Self::map_store_error(&err))?;

        // Zero rows is a reportable-but-successful outcome; it may hide a
        // wrong code on the client side, so keep it visible in the logs.
        tracing::info!(
            owner = %request.owner,
            code,
            rows_deleted,
            "opportunity delete completed"
        );
        Ok(DeleteOpportunityResponse { rows_deleted })
    }
}

#[async_trait]
impl<R> OpportunityQuery for OpportunityService<R>
where
    R: OpportunityRepository,
{
    async fn list(&self, owner: &UserId) -> Result<Vec<Opportunity>, Error> {
        let rows = self
            .repo
            .list_by_owner(owner)
            .await
            .map_err(|err| Self::map_store_error(&err))?;

        let mut owned = Self::retain_owned(rows, owner);
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }
}
