//! Identity primitives shared across the domain.
//!
//! The identity provider assigns each account an opaque, stable identifier.
//! The domain never inspects its structure; it only requires the value to be
//! non-empty so an empty session payload can never masquerade as a user.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a user identifier fails shape validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdValidationError {
    /// Identifier was missing or blank once trimmed.
    Empty,
}

impl fmt::Display for UserIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "user id must not be empty"),
        }
    }
}

impl std::error::Error for UserIdValidationError {}

/// Opaque stable identifier of an authenticated principal.
///
/// ## Invariants
/// - The wrapped string is trimmed and non-empty.
/// - Assigned by the identity provider; never minted or rewritten by the
///   opportunity service.
///
/// # Examples
/// ```
/// use backend::domain::UserId;
///
/// let id = UserId::new("u1").unwrap();
/// assert_eq!(id.as_ref(), "u1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Construct an identifier from a raw string, trimming whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserIdValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserIdValidationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}
