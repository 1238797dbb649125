//! Shared helpers for tool tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::db::{migrations, Database};

static NEXT_DB: AtomicUsize = AtomicUsize::new(0);

/// Open a fresh migrated database under a unique temp path
pub(crate) fn test_db() -> Database {
    let path = std::env::temp_dir().join(format!(
        "waterlog-test-{}-{}.db",
        std::process::id(),
        NEXT_DB.fetch_add(1, Ordering::SeqCst),
    ));
    let _ = std::fs::remove_file(&path);

    let db = Database::new(&path).expect("open test database");
    db.with_conn(|conn| migrations::run_migrations(conn))
        .expect("run migrations");
    db
}
