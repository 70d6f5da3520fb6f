//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Sales opportunity rows, append-only and owned by a single user.
    ///
    /// `(opportunity_code, owner_id)` is deliberately not unique: two users
    /// may reuse a code, and one user may hold several rows under the same
    /// code. Deletion therefore operates on the pair, not the surrogate key.
    opportunities (id) {
        /// Surrogate primary key (identity column).
        id -> Int8,
        /// Customer-facing code, e.g. `OPP-001`.
        opportunity_code -> Text,
        opportunity_name -> Text,
        opportunity_status -> Text,
        opportunity_description -> Nullable<Text>,
        customer_info -> Text,
        pre_sales_owner -> Text,
        opportunity_amount -> Nullable<Float8>,
        support_start_date -> Nullable<Date>,
        support_end_date -> Nullable<Date>,
        need_travel -> Bool,
        travel_days -> Nullable<Int4>,
        travel_location -> Nullable<Text>,
        /// Identifier of the owning account, as issued by the identity provider.
        owner_id -> Text,
        /// Attribution timestamp set by the service, not the database.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Display profiles, one per account, created best-effort at signup.
    profiles (id) {
        /// Primary key: the identity provider's account identifier.
        id -> Text,
        email -> Text,
        first_name -> Nullable<Text>,
        last_name -> Nullable<Text>,
        /// Record creation timestamp (database default).
        created_at -> Timestamptz,
    }
}
