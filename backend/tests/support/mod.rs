//! Shared helpers for the embedded PostgreSQL integration suites.
//!
//! Each suite under `backend/tests/` compiles as its own crate; this module
//! is pulled in with `mod support;` where a database is needed.

pub mod cluster_skip;

pub use cluster_skip::handle_cluster_setup_failure;

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};

/// Render a `postgres` error with its SQLSTATE and server message.
///
/// `postgres::Error`'s `Display` often collapses to `db error`, which hides
/// what actually failed.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Drop and recreate `name` through the maintenance database.
///
/// Runs over `postgres` rather than Diesel because `DROP DATABASE` cannot run
/// inside a transaction.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<String, String> {
    let admin_url = cluster.connection().database_url("postgres");
    let mut client = Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!(
            "DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE); CREATE DATABASE \"{name}\";"
        ))
        .map_err(|err| format_postgres_error(&err))?;
    Ok(cluster.connection().database_url(name))
}

/// Count rows in `table` matching `filter`, a trusted SQL predicate.
pub fn count_rows(url: &str, table: &str, filter: &str) -> Result<i64, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let row = client
        .query_one(&format!("SELECT COUNT(*) FROM {table} WHERE {filter}"), &[])
        .map_err(|err| format_postgres_error(&err))?;
    row.try_get(0).map_err(|err| format_postgres_error(&err))
}

/// Run raw SQL against `url`, for seeding rows the adapters never write.
pub fn execute_sql(url: &str, sql: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(sql)
        .map_err(|err| format_postgres_error(&err))
}
