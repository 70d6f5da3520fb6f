//! Port abstraction for opportunity persistence adapters.
//!
//! This is the Record Store seam for opportunity rows. Adapters must apply
//! the `owner_id` predicate inside their own queries: the repository is the
//! first of two ownership guards (the service re-checks returned rows), so a
//! defect in either layer alone cannot leak or delete another user's data.

use async_trait::async_trait;

use crate::domain::{Opportunity, UserId};

/// Persistence errors raised by opportunity repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpportunityStoreError {
    /// Repository connection could not be established.
    #[error("opportunity store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation was rejected during execution.
    #[error("opportunity store query failed: {message}")]
    Query { message: String },
}

impl OpportunityStoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// The store's own description of the failure, without the port prefix.
    pub fn store_message(&self) -> &str {
        match self {
            Self::Connection { message } | Self::Query { message } => message.as_str(),
        }
    }
}

/// Port for opportunity storage, retrieval, and removal.
///
/// # Ownership semantics
///
/// - `list_by_owner` returns only rows whose `owner_id` matches, newest
///   first (`created_at` descending).
/// - `delete_by_code` removes only rows matching **both** the code and the
///   owner, and reports how many rows that was; zero is a normal outcome,
///   not an error.
/// - No update operation exists; rows are immutable once inserted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpportunityRepository: Send + Sync {
    /// Persist one fully attributed opportunity row.
    async fn insert(&self, opportunity: &Opportunity) -> Result<(), OpportunityStoreError>;

    /// Fetch all rows owned by `owner`, `created_at` descending.
    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Opportunity>, OpportunityStoreError>;

    /// Delete rows matching (`code`, `owner`); returns the affected count.
    async fn delete_by_code(
        &self,
        code: &str,
        owner: &UserId,
    ) -> Result<usize, OpportunityStoreError>;
}

/// In-memory implementation for tests and database-less development runs.
///
/// Mirrors the contract of the SQL adapter, including the ownership
/// predicate and the newest-first ordering, so service behaviour can be
/// exercised without I/O.
#[derive(Debug, Default)]
pub struct InMemoryOpportunityRepository {
    rows: std::sync::RwLock<Vec<Opportunity>>,
}

impl InMemoryOpportunityRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_poisoned() -> OpportunityStoreError {
        OpportunityStoreError::connection("in-memory store lock poisoned")
    }
}

#[async_trait]
impl OpportunityRepository for InMemoryOpportunityRepository {
    async fn insert(&self, opportunity: &Opportunity) -> Result<(), OpportunityStoreError> {
        let mut rows = self.rows.write().map_err(|_| Self::lock_poisoned())?;
        rows.push(opportunity.clone());
        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Opportunity>, OpportunityStoreError> {
        let rows = self.rows.read().map_err(|_| Self::lock_poisoned())?;
        let mut owned: Vec<Opportunity> = rows
            .iter()
            .filter(|row| row.owner_id == *owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn delete_by_code(
        &self,
        code: &str,
        owner: &UserId,
    ) -> Result<usize, OpportunityStoreError> {
        let mut rows = self.rows.write().map_err(|_| Self::lock_poisoned())?;
        let before = rows.len();
        rows.retain(|row| !(row.code == code && row.owner_id == *owner));
        Ok(before - rows.len())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::{Duration, Utc};
    use rstest::rstest;

    fn row(code: &str, owner: &str, age_minutes: i64) -> Opportunity {
        Opportunity {
            code: code.to_owned(),
            name: "Deal".to_owned(),
            status: "Active".to_owned(),
            description: None,
            customer_info: "Acme".to_owned(),
            pre_sales_owner: "Jo".to_owned(),
            amount: None,
            support_start_date: None,
            support_end_date: None,
            need_travel: false,
            travel_days: None,
            travel_location: None,
            owner_id: UserId::new(owner).expect("fixture owner"),
            created_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn list_is_scoped_to_owner_and_newest_first() {
        let repo = InMemoryOpportunityRepository::new();
        repo.insert(&row("OPP-1", "u1", 10)).await.expect("insert");
        repo.insert(&row("OPP-2", "u1", 1)).await.expect("insert");
        repo.insert(&row("OPP-1", "u2", 0)).await.expect("insert");

        let owner = UserId::new("u1").expect("owner id");
        let rows = repo.list_by_owner(&owner).await.expect("list");
        let codes: Vec<&str> = rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["OPP-2", "OPP-1"]);
        assert!(rows.iter().all(|r| r.owner_id == owner));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_affected_rows_and_spares_other_owners() {
        let repo = InMemoryOpportunityRepository::new();
        repo.insert(&row("OPP-1", "u1", 5)).await.expect("insert");
        repo.insert(&row("OPP-1", "u2", 5)).await.expect("insert");

        let owner = UserId::new("u1").expect("owner id");
        let deleted = repo.delete_by_code("OPP-1", &owner).await.expect("delete");
        assert_eq!(deleted, 1);

        let again = repo.delete_by_code("OPP-1", &owner).await.expect("delete");
        assert_eq!(again, 0);

        let other = UserId::new("u2").expect("owner id");
        let remaining = repo.list_by_owner(&other).await.expect("list");
        assert_eq!(remaining.len(), 1);
    }

    #[rstest]
    fn store_message_strips_port_prefix() {
        let err = OpportunityStoreError::query("duplicate key value");
        assert_eq!(err.store_message(), "duplicate key value");
        assert!(err.to_string().contains("opportunity store query failed"));
    }
}
