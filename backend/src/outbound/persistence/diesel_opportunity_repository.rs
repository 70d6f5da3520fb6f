//! PostgreSQL-backed `OpportunityRepository` implementation using Diesel ORM.
//!
//! This adapter translates between Diesel rows and domain opportunities. The
//! `owner_id` predicate is applied inside every query so the database never
//! returns or deletes another user's rows, regardless of what the service
//! layer does with the result.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{OpportunityRepository, OpportunityStoreError};
use crate::domain::{Opportunity, UserId};

use super::models::{NewOpportunityRow, OpportunityRow};
use super::pool::{DbPool, PoolError};
use super::schema::opportunities;

/// Diesel-backed implementation of the `OpportunityRepository` port.
#[derive(Clone)]
pub struct DieselOpportunityRepository {
    pool: DbPool,
}

impl DieselOpportunityRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain opportunity store errors.
fn map_pool_error(error: PoolError) -> OpportunityStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            OpportunityStoreError::connection(message)
        }
    }
}

/// Map Diesel errors to domain opportunity store errors.
///
/// Database error messages are preserved, not summarised: store failures
/// surface to the client with the store's own wording.
fn map_diesel_error(error: diesel::result::Error) -> OpportunityStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(message = info.message(), "diesel connection failed");
            OpportunityStoreError::connection(info.message())
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            OpportunityStoreError::query(info.message())
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            OpportunityStoreError::query(other.to_string())
        }
    }
}

/// Convert a database row to a domain opportunity.
fn row_to_opportunity(row: OpportunityRow) -> Result<Opportunity, OpportunityStoreError> {
    let owner_id = UserId::new(row.owner_id)
        .map_err(|err| OpportunityStoreError::query(format!("invalid owner id in row: {err}")))?;

    Ok(Opportunity {
        code: row.opportunity_code,
        name: row.opportunity_name,
        status: row.opportunity_status,
        description: row.opportunity_description,
        customer_info: row.customer_info,
        pre_sales_owner: row.pre_sales_owner,
        amount: row.opportunity_amount,
        support_start_date: row.support_start_date,
        support_end_date: row.support_end_date,
        need_travel: row.need_travel,
        travel_days: row.travel_days,
        travel_location: row.travel_location,
        owner_id,
        created_at: row.created_at,
    })
}

fn insertable_row(opportunity: &Opportunity) -> NewOpportunityRow<'_> {
    NewOpportunityRow {
        opportunity_code: &opportunity.code,
        opportunity_name: &opportunity.name,
        opportunity_status: &opportunity.status,
        opportunity_description: opportunity.description.as_deref(),
        customer_info: &opportunity.customer_info,
        pre_sales_owner: &opportunity.pre_sales_owner,
        opportunity_amount: opportunity.amount,
        support_start_date: opportunity.support_start_date,
        support_end_date: opportunity.support_end_date,
        need_travel: opportunity.need_travel,
        travel_days: opportunity.travel_days,
        travel_location: opportunity.travel_location.as_deref(),
        owner_id: opportunity.owner_id.as_ref(),
        created_at: opportunity.created_at,
    }
}

#[async_trait]
impl OpportunityRepository for DieselOpportunityRepository {
    async fn insert(&self, opportunity: &Opportunity) -> Result<(), OpportunityStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(opportunities::table)
            .values(insertable_row(opportunity))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Opportunity>, OpportunityStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<OpportunityRow> = opportunities::table
            .filter(opportunities::owner_id.eq(owner.as_ref()))
            .order(opportunities::created_at.desc())
            .select(OpportunityRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_opportunity).collect()
    }

    async fn delete_by_code(
        &self,
        code: &str,
        owner: &UserId,
    ) -> Result<usize, OpportunityStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            opportunities::table
                .filter(opportunities::opportunity_code.eq(code))
                .filter(opportunities::owner_id.eq(owner.as_ref())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        debug!(code, owner = %owner, deleted, "opportunity delete executed");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for error and row mapping. Query behaviour against a live
    //! database is covered by the repository contract exercised through the
    //! in-memory implementation.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_failures() {
        let err = map_pool_error(PoolError::checkout("timed out waiting for connection"));
        assert_eq!(
            err,
            OpportunityStoreError::connection("timed out waiting for connection")
        );
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_failure() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, OpportunityStoreError::Query { .. }));
    }

    #[rstest]
    fn rows_with_blank_owner_are_rejected() {
        let row = OpportunityRow {
            id: 1,
            opportunity_code: "OPP-001".to_owned(),
            opportunity_name: "Deal".to_owned(),
            opportunity_status: "open".to_owned(),
            opportunity_description: None,
            customer_info: "Acme".to_owned(),
            pre_sales_owner: "Jo".to_owned(),
            opportunity_amount: None,
            support_start_date: None,
            support_end_date: None,
            need_travel: false,
            travel_days: None,
            travel_location: None,
            owner_id: "   ".to_owned(),
            created_at: Utc::now(),
        };

        let err = row_to_opportunity(row).expect_err("blank owner must fail");
        assert!(matches!(err, OpportunityStoreError::Query { .. }));
    }
}
