//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{opportunities, profiles};

/// Row struct for reading from the opportunities table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = opportunities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OpportunityRow {
    #[expect(dead_code, reason = "surrogate key is not surfaced in the domain")]
    pub id: i64,
    pub opportunity_code: String,
    pub opportunity_name: String,
    pub opportunity_status: String,
    pub opportunity_description: Option<String>,
    pub customer_info: String,
    pub pre_sales_owner: String,
    pub opportunity_amount: Option<f64>,
    pub support_start_date: Option<NaiveDate>,
    pub support_end_date: Option<NaiveDate>,
    pub need_travel: bool,
    pub travel_days: Option<i32>,
    pub travel_location: Option<String>,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new opportunity records.
///
/// The surrogate `id` is generated by the database; `created_at` is supplied
/// by the service so attribution and ordering use one clock.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = opportunities)]
pub(crate) struct NewOpportunityRow<'a> {
    pub opportunity_code: &'a str,
    pub opportunity_name: &'a str,
    pub opportunity_status: &'a str,
    pub opportunity_description: Option<&'a str>,
    pub customer_info: &'a str,
    pub pre_sales_owner: &'a str,
    pub opportunity_amount: Option<f64>,
    pub support_start_date: Option<NaiveDate>,
    pub support_end_date: Option<NaiveDate>,
    pub need_travel: bool,
    pub travel_days: Option<i32>,
    pub travel_location: Option<&'a str>,
    pub owner_id: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[expect(dead_code, reason = "audit column is not surfaced in the domain")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new profile records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profiles)]
pub(crate) struct NewProfileRow<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
}
