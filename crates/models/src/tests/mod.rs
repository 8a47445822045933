//! Database-backed tests. They run against `DATABASE_URL` and are skipped
//! when `SKIP_DB_TESTS` is set or the database cannot be reached.



/// Transaction handling tests
pub mod transaction_tests;

use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Migrations run once per test process; `false` means no database is reachable.
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_config() -> DatabaseConfig {
    let mut cfg = DatabaseConfig::from_env();
    cfg.max_connections = cfg.max_connections.max(5);
    cfg.connect_timeout_secs = 5;
    cfg.acquire_timeout_secs = 10;
    cfg
}

/// Connect and migrate, or `None` if the tests should be skipped.
pub async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let ready = *MIGRATED
        .get_or_init(|| async {
            match crate::db::connect_with_config(&test_config()).await {
                Ok(db) => {
                    let migrated = crate::db::migrate(&db).await;
                    if let Err(e) = &migrated {
                        eprintln!("skip: migrate up failed: {}", e);
                    }
                    migrated.is_ok()
                }
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {}", e);
                    false
                }
            }
        })
        .await;
    if !ready {
        return None;
    }
    // Fresh pool bound to the current test's runtime
    crate::db::connect_with_config(&test_config()).await.ok()
}

pub fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}
