//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are implementation details, never exposed to
//!   the domain layer.
//! - **Verbatim errors**: database failures keep the store's own message so
//!   the HTTP layer can surface it unchanged.

mod diesel_opportunity_repository;
mod diesel_profile_repository;
mod models;
mod pool;
mod schema;

pub use diesel_opportunity_repository::DieselOpportunityRepository;
pub use diesel_profile_repository::DieselProfileRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
