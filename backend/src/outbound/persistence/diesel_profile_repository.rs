//! PostgreSQL-backed `ProfileRepository` implementation using Diesel ORM.
//!
//! Profiles are written once at signup and read back for display. The insert
//! reports failures verbatim; the caller decides whether a failed profile
//! write is fatal (it is not, for signup).

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{ProfileRepository, ProfileStoreError};
use crate::domain::{Profile, UserId};

use super::models::{NewProfileRow, ProfileRow};
use super::pool::{DbPool, PoolError};
use super::schema::profiles;

/// Diesel-backed implementation of the `ProfileRepository` port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain profile store errors.
fn map_pool_error(error: PoolError) -> ProfileStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ProfileStoreError::connection(message)
        }
    }
}

/// Map Diesel errors to domain profile store errors, preserving the
/// database's own message.
fn map_diesel_error(error: diesel::result::Error) -> ProfileStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(message = info.message(), "diesel connection failed");
            ProfileStoreError::connection(info.message())
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            ProfileStoreError::query(info.message())
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            ProfileStoreError::query(other.to_string())
        }
    }
}

/// Convert a database row to a domain profile.
fn row_to_profile(row: ProfileRow) -> Result<Profile, ProfileStoreError> {
    let id = UserId::new(row.id)
        .map_err(|err| ProfileStoreError::query(format!("invalid user id in row: {err}")))?;

    Ok(Profile {
        id,
        email: row.email,
        first_name: row.first_name,
        last_name: row.last_name,
    })
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn insert(&self, profile: &Profile) -> Result<(), ProfileStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewProfileRow {
            id: profile.id.as_ref(),
            email: &profile.email,
            first_name: profile.first_name.as_deref(),
            last_name: profile.last_name.as_deref(),
        };

        diesel::insert_into(profiles::table)
            .values(row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Profile>, ProfileStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ProfileRow> = profiles::table
            .filter(profiles::id.eq(id.as_ref()))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_profile).transpose()
    }
}
