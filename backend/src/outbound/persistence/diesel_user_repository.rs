//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, Registrant, User, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        name,
        email,
        created_at,
    } = row;
    let registrant = Registrant::try_from_parts(name, email)
        .map_err(|err| UserPersistenceError::query(format!("stored user is invalid: {err}")))?;
    Ok(User::new(UserId::new(id), registrant, created_at))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn upsert(&self, registrant: &Registrant) -> Result<User, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let new_row = NewUserRow {
            name: registrant.name.as_ref(),
            email: registrant.email.as_ref(),
        };

        // One statement: the unique index on email arbitrates concurrent
        // registrations and created_at keeps its first value.
        let row = diesel::insert_into(users::table)
            .values(&new_row)
            .on_conflict(users::email)
            .do_update()
            .set(users::name.eq(excluded(users::name)))
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    "upsert user",
                    UserPersistenceError::query,
                    UserPersistenceError::connection,
                )
            })?;

        row_to_user(row)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                map_diesel_error(
                    err,
                    "find user by email",
                    UserPersistenceError::query,
                    UserPersistenceError::connection,
                )
            })?;

        row.map(row_to_user).transpose()
    }
}
