//! PostgreSQL-backed `FeedbackRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FeedbackPersistenceError, FeedbackRepository};
use crate::domain::{FeedbackEntry, NewFeedback};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{FeedbackRow, NewFeedbackRow};
use super::pool::DbPool;
use super::schema::feedback;

/// Diesel-backed implementation of the feedback repository port.
#[derive(Clone)]
pub struct DieselFeedbackRepository {
    pool: DbPool,
}

impl DieselFeedbackRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<FeedbackRow> for FeedbackEntry {
    fn from(row: FeedbackRow) -> Self {
        Self {
            id: row.id,
            name: row.name.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            message: row.message.unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

fn map_error(error: diesel::result::Error, operation: &'static str) -> FeedbackPersistenceError {
    map_diesel_error(
        error,
        operation,
        FeedbackPersistenceError::query,
        FeedbackPersistenceError::connection,
    )
}

#[async_trait]
impl FeedbackRepository for DieselFeedbackRepository {
    async fn insert(
        &self,
        entry: &NewFeedback,
    ) -> Result<FeedbackEntry, FeedbackPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, FeedbackPersistenceError::connection))?;

        diesel::insert_into(feedback::table)
            .values(&NewFeedbackRow {
                name: &entry.name,
                email: &entry.email,
                message: &entry.message,
            })
            .returning(FeedbackRow::as_returning())
            .get_result::<FeedbackRow>(&mut conn)
            .await
            .map(FeedbackEntry::from)
            .map_err(|err| map_error(err, "insert feedback"))
    }

    async fn list_newest_first(&self) -> Result<Vec<FeedbackEntry>, FeedbackPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, FeedbackPersistenceError::connection))?;

        let rows: Vec<FeedbackRow> = feedback::table
            .order(feedback::id.desc())
            .select(FeedbackRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_error(err, "list feedback"))?;

        Ok(rows.into_iter().map(FeedbackEntry::from).collect())
    }
}
