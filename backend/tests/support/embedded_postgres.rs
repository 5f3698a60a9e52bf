//! Embedded PostgreSQL provisioning for repository tests.
//!
//! One shared cluster serves the whole test binary. A template database is
//! migrated once per migration-directory hash, and every test gets its own
//! clone of it, so suites never see each other's rows.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::{Connection, RunQueryDsl};
use diesel_migrations::MigrationHarness;
use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{BootstrapResult, ClusterHandle, TemporaryDatabase};
use titto_backend::outbound::persistence::MIGRATIONS;
use uuid::Uuid;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "titto_template";
const RETRIES: usize = 5;
const RETRY_DELAY: Duration = Duration::from_millis(500);

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String, String> {
    let hash = hash_directory(migrations_dir()).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

/// Keep `PG_PASSWORD` stable so a reused data directory still accepts the
/// password it was initialised with.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster bootstrap spawns any threads.
        unsafe {
            std::env::set_var("PG_PASSWORD", "titto_embedded_test");
        }
    }
}

/// Return the process-wide embedded cluster, retrying transient bootstrap
/// failures.
pub fn shared_cluster() -> BootstrapResult<&'static ClusterHandle> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= RETRIES => return Err(error),
            Err(_) => {
                std::thread::sleep(RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Apply every embedded migration to the database at `url`.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err}"))?;
    Ok(())
}

fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template_name);
        migrate_schema(&url)?;
    }
    Ok(template_name)
}

/// Clone a fresh, fully migrated database from the template.
pub fn provision_template_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let mut last_error = String::from("create database from template: no attempt made");
    for attempt in 1..=RETRIES {
        let outcome = ensure_template_database(cluster).and_then(|template_name| {
            let db_name = format!("test_{}", Uuid::new_v4().simple());
            cluster
                .temporary_database_from_template(db_name.as_str(), template_name.as_str())
                .map_err(|err| format!("create database from template: {err:?}"))
        });
        match outcome {
            Ok(database) => return Ok(database),
            Err(error) => last_error = format!("attempt {attempt}/{RETRIES}: {error}"),
        }
        if attempt < RETRIES {
            std::thread::sleep(RETRY_DELAY);
        }
    }
    Err(last_error)
}

/// Run one raw statement outside the repositories, returning the rows
/// affected or the Diesel error untouched.
pub fn execute_sql(url: &str, sql: &str) -> Result<usize, diesel::result::Error> {
    let mut conn = PgConnection::establish(url)
        .map_err(|err| diesel::result::Error::QueryBuilderError(Box::new(err)))?;
    diesel::sql_query(sql).execute(&mut conn)
}
