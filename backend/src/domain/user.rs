//! Registrant data model.
//!
//! A [`User`] is created the first time an email address registers and
//! updated in place on every later registration with the same address.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation errors returned while building registration input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The name was missing or blank.
    #[error("name must not be empty")]
    EmptyName,
    /// The email address was missing or blank.
    #[error("email must not be empty")]
    EmptyEmail,
}

/// Server-assigned user identifier (serial primary key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a database-assigned identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name of a registrant, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registration email address and unique key of a [`User`].
///
/// Addresses are trimmed and lower-cased so `Ada@Example.com` and
/// `ada@example.com` resolve to the same registrant. No further format
/// validation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and construct an [`EmailAddress`].
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(trimmed.to_lowercase()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated input of one registration, whichever path it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registrant {
    /// Name to store (last write wins).
    pub name: UserName,
    /// Unique key of the user row.
    pub email: EmailAddress,
}

impl Registrant {
    /// Build a registrant from raw parts, checking the name first.
    ///
    /// # Examples
    /// ```
    /// use tripsync::domain::{Registrant, UserValidationError};
    ///
    /// let registrant = Registrant::try_from_parts(" Ada ", "ADA@example.com").unwrap();
    /// assert_eq!(registrant.name.as_ref(), "Ada");
    /// assert_eq!(registrant.email.as_ref(), "ada@example.com");
    ///
    /// let missing = Registrant::try_from_parts("", "ada@example.com");
    /// assert_eq!(missing, Err(UserValidationError::EmptyName));
    /// ```
    pub fn try_from_parts(
        name: impl AsRef<str>,
        email: impl AsRef<str>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            name: UserName::new(name)?,
            email: EmailAddress::new(email)?,
        })
    }
}

/// Stored registrant.
///
/// ## Invariants
/// - `email` is unique across all users.
/// - `created_at` is set by the first insert and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
    created_at: DateTime<Utc>,
}

impl User {
    /// Assemble a user from persisted components.
    pub fn new(id: UserId, registrant: Registrant, created_at: DateTime<Utc>) -> Self {
        let Registrant { name, email } = registrant;
        Self {
            id,
            name,
            email,
            created_at,
        }
    }

    /// Server-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Most recently registered name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Unique email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// First registration time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
