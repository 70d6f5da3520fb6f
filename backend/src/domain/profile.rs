//! Profile metadata attached one-to-one to an account.

use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// Cosmetic profile row keyed by the owning account's identifier.
///
/// Created best-effort at signup; its absence is a normal state, not an
/// error, so lookups return `Option<Profile>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Shared primary key: the owning user's identifier.
    pub id: UserId,
    /// Email recorded at signup.
    pub email: String,
    /// Optional first name.
    pub first_name: Option<String>,
    /// Optional last name.
    pub last_name: Option<String>,
}

impl Profile {
    /// Display name for greetings: names when present, email otherwise.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Profile, UserId};
    ///
    /// let profile = Profile {
    ///     id: UserId::new("u1").unwrap(),
    ///     email: "jo@example.com".into(),
    ///     first_name: Some("Jo".into()),
    ///     last_name: None,
    /// };
    /// assert_eq!(profile.display_name(), "Jo");
    /// ```
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self.email.clone(),
        }
    }
}
