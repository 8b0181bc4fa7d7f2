use axum::Router;
use faitness::db::{Database, PoolSettings};
use faitness_server::{AppState, router};
use tempfile::TempDir;

/// Router over a fresh migrated database. Keep the `TempDir` alive for the
/// length of the test.
pub fn app() -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("faitness.db");
    let db = Database::connect(path.to_str().unwrap(), &PoolSettings::default()).unwrap();
    db.run_migrations().unwrap();
    (router(AppState::new(db)), dir)
}
