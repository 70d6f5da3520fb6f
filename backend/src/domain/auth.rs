//! Authentication primitives such as login credentials and signup details.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Validated login credentials used by the identity provider port.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("jo@example.com", "hunter2").unwrap();
/// assert_eq!(creds.email(), "jo@example.com");
/// assert_eq!(creds.password(), "hunter2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(CredentialValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for account lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated signup payload: credentials plus optional profile names.
///
/// The names are cosmetic profile metadata; they carry no validation beyond
/// trimming, and blank values collapse to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    credentials: LoginCredentials,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl SignupDetails {
    /// Construct signup details from raw form values.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<Self, CredentialValidationError> {
        let credentials = LoginCredentials::try_from_parts(email, password)?;
        Ok(Self {
            credentials,
            first_name: normalize_name(first_name),
            last_name: normalize_name(last_name),
        })
    }

    /// Credentials to register with the identity provider.
    pub fn credentials(&self) -> &LoginCredentials {
        &self.credentials
    }

    /// Email the profile row will carry.
    pub fn email(&self) -> &str {
        self.credentials.email()
    }

    /// Optional first name for the profile row.
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Optional last name for the profile row.
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }
}

fn normalize_name(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}
