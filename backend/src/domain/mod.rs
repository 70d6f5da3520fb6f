//! Domain primitives, aggregates, services, and ports.
//!
//! Purpose: define the strongly typed entities and use-cases shared by the
//! inbound and outbound adapters. Types are immutable; invariants and
//! serialisation contracts live in each type's Rustdoc. Everything here is
//! transport and storage agnostic.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod identity;
pub mod opportunity;
pub mod opportunity_service;
pub mod ports;
pub mod profile;

pub use self::account_service::AccountService;
pub use self::auth::{CredentialValidationError, LoginCredentials, SignupDetails};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{UserId, UserIdValidationError};
pub use self::opportunity::{
    Opportunity, OpportunityDraft, OpportunityForm, OpportunityValidationError,
};
pub use self::opportunity_service::OpportunityService;
pub use self::profile::Profile;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error};
///
/// fn guard(authenticated: bool) -> ApiResult<()> {
///     if authenticated {
///         Ok(())
///     } else {
///         Err(Error::unauthorized("login required"))
///     }
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
