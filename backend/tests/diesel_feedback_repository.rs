//! Integration tests for `DieselFeedbackRepository` against embedded
//! PostgreSQL.
//!
//! Covers the newest-first listing and tables created by the earlier
//! application, whose text columns are nullable. Set `SKIP_TEST_CLUSTER=1`
//! where the cluster cannot start.

use pg_embedded_setup_unpriv::TestCluster;
use rstest::rstest;
use tokio::runtime::Runtime;
use tripsync::domain::NewFeedback;
use tripsync::domain::ports::FeedbackRepository;
use tripsync::outbound::persistence::{
    DbPool, DieselFeedbackRepository, PoolConfig, run_pending_migrations,
};

#[path = "support/pg_embed.rs"]
mod pg_embed;

#[allow(dead_code)]
mod support;

use pg_embed::test_cluster;
use support::{count_rows, execute_sql, handle_cluster_setup_failure, reset_database};

const TEST_DB: &str = "diesel_feedback_repository_test";

/// Schema the earlier application created at startup.
const LEGACY_SCHEMA: &str = "
    CREATE TABLE feedback (
        id SERIAL PRIMARY KEY,
        name TEXT,
        email TEXT,
        message TEXT,
        created_at TIMESTAMP DEFAULT NOW()
    );
";

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    repository: DieselFeedbackRepository,
    database_url: String,
}

impl TestContext {
    fn insert(&self, name: &str, message: &str) {
        let feedback = NewFeedback::from_parts(
            Some(name.to_owned()),
            None,
            Some(message.to_owned()),
        );
        self.runtime
            .block_on(self.repository.insert(&feedback))
            .expect("insert feedback");
    }

    fn listed_messages(&self) -> Vec<String> {
        self.runtime
            .block_on(self.repository.list_newest_first())
            .expect("list feedback")
            .into_iter()
            .map(|entry| entry.message)
            .collect()
    }
}

/// Start a cluster, optionally lay down `pre_existing` SQL, then migrate.
fn setup_context(pre_existing: Option<&str>) -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database_url = reset_database(&cluster, TEST_DB)?;
    if let Some(sql) = pre_existing {
        execute_sql(&database_url, sql)?;
    }
    runtime
        .block_on(run_pending_migrations(database_url.clone()))
        .map_err(|err| err.to_string())?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        repository: DieselFeedbackRepository::new(pool),
        database_url,
    })
}

fn context(pre_existing: Option<&str>) -> Option<TestContext> {
    match setup_context(pre_existing) {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn entries_are_listed_newest_first() {
    let Some(ctx) = context(None) else {
        eprintln!("SKIP-TEST-CLUSTER: entries_are_listed_newest_first skipped");
        return;
    };

    for message in ["first", "second", "third"] {
        ctx.insert("Ada", message);
    }

    assert_eq!(ctx.listed_messages(), vec!["third", "second", "first"]);
    assert_eq!(
        count_rows(&ctx.database_url, "feedback", "TRUE").expect("count feedback"),
        3
    );
}

#[rstest]
fn later_inserts_lead_even_with_an_earlier_timestamp() {
    let Some(ctx) = context(None) else {
        eprintln!("SKIP-TEST-CLUSTER: later_inserts_lead_even_with_an_earlier_timestamp skipped");
        return;
    };

    execute_sql(
        &ctx.database_url,
        "INSERT INTO feedback (name, email, message, created_at) \
         VALUES ('Ada', '', 'clock ahead', NOW() + INTERVAL '1 hour');",
    )
    .expect("seed entry");
    ctx.insert("Grace", "after clock fix");

    assert_eq!(ctx.listed_messages(), vec!["after clock fix", "clock ahead"]);
}

#[rstest]
fn legacy_rows_with_nulls_read_as_empty_text() {
    let Some(ctx) = context(Some(LEGACY_SCHEMA)) else {
        eprintln!("SKIP-TEST-CLUSTER: legacy_rows_with_nulls_read_as_empty_text skipped");
        return;
    };

    execute_sql(
        &ctx.database_url,
        "INSERT INTO feedback (name, email, message) VALUES (NULL, 'a@b', 'hi');",
    )
    .expect("seed legacy row");
    ctx.insert("Ada", "new entry");

    let entries = ctx
        .runtime
        .block_on(ctx.repository.list_newest_first())
        .expect("list feedback");
    let messages: Vec<&str> = entries.iter().map(|entry| entry.message.as_str()).collect();
    assert_eq!(messages, vec!["new entry", "hi"]);
    let legacy = entries.last().expect("legacy entry");
    assert_eq!(legacy.name, "");
    assert_eq!(legacy.email, "a@b");
}
