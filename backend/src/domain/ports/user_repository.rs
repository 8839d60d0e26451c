//! Port abstraction for user persistence adapters and their errors.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{EmailAddress, Registrant, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Storage of registrants keyed by email address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user or, when the email already exists, overwrite its name.
    ///
    /// Must be a single atomic operation: concurrent registrations with the
    /// same email leave exactly one row carrying the last written name, and
    /// `created_at` keeps the value of the first insert.
    async fn upsert(&self, registrant: &Registrant) -> Result<User, UserPersistenceError>;

    /// Fetch a user by email address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;
}

/// In-memory repository used when no database is configured and in tests.
#[derive(Debug, Default)]
pub struct FixtureUserRepository {
    rows: Mutex<HashMap<EmailAddress, User>>,
}

impl FixtureUserRepository {
    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap_or_else(|err| err.into_inner()).len()
    }

    /// Whether no user has registered yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn upsert(&self, registrant: &Registrant) -> Result<User, UserPersistenceError> {
        let mut rows = self.rows.lock().unwrap_or_else(|err| err.into_inner());
        let next_id = i32::try_from(rows.len() + 1)
            .map_err(|_| UserPersistenceError::query("user id space exhausted"))?;
        let user = match rows.get(&registrant.email) {
            Some(existing) => User::new(existing.id(), registrant.clone(), existing.created_at()),
            None => User::new(UserId::new(next_id), registrant.clone(), Utc::now()),
        };
        rows.insert(registrant.email.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let rows = self.rows.lock().unwrap_or_else(|err| err.into_inner());
        Ok(rows.get(email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn registrant(name: &str, email: &str) -> Registrant {
        Registrant::try_from_parts(name, email).expect("valid registrant")
    }

    #[rstest]
    #[tokio::test]
    async fn repeated_email_updates_name_in_place() {
        let repo = FixtureUserRepository::default();
        let first = repo
            .upsert(&registrant("Ada", "ada@example.com"))
            .await
            .expect("first upsert");
        let second = repo
            .upsert(&registrant("Ada Lovelace", "ADA@example.com"))
            .await
            .expect("second upsert");

        assert_eq!(repo.len(), 1);
        assert_eq!(first.id(), second.id());
        assert_eq!(first.created_at(), second.created_at());
        assert_eq!(second.name().as_ref(), "Ada Lovelace");
    }

    #[rstest]
    #[tokio::test]
    async fn distinct_emails_get_distinct_ids() {
        let repo = FixtureUserRepository::default();
        let ada = repo
            .upsert(&registrant("Ada", "ada@example.com"))
            .await
            .expect("upsert ada");
        let grace = repo
            .upsert(&registrant("Grace", "grace@example.com"))
            .await
            .expect("upsert grace");

        assert_ne!(ada.id(), grace.id());
        let found = repo
            .find_by_email(grace.email())
            .await
            .expect("lookup")
            .expect("grace stored");
        assert_eq!(found, grace);
    }
}
