//! Embedded PostgreSQL databases for repository integration tests.
//!
//! Every suite shares one cluster per test binary and gets its own temporary
//! database, migrated with the same embedded migrations the service applies
//! at startup.

use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use volunteer_backend::outbound::persistence::run_pending_migrations;

/// Create a fresh database on the shared cluster and apply all migrations.
///
/// The database is dropped when the returned guard is dropped.
pub fn migrated_database() -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster_handle().map_err(|err| format!("cluster bootstrap: {err:?}"))?;
    let database = cluster
        .create_temporary_database()
        .map_err(|err| format!("create temporary database: {err:?}"))?;
    let url = database.url().to_string();
    run_pending_migrations(&url).map_err(|err| format!("migrations: {err}"))?;
    Ok(database)
}
