#![cfg(test)]
use configs::{AppConfig, DatabaseConfig};
use models::db::{connect_with_config, migrate};
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Migrations run once per test process; `false` means no database is reachable.
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_config() -> DatabaseConfig {
    let mut cfg = AppConfig::load_and_validate()
        .expect("invalid test configuration")
        .database;
    cfg.max_connections = cfg.max_connections.max(10);
    cfg.min_connections = cfg.min_connections.min(1);
    cfg.connect_timeout_secs = 5;
    cfg.acquire_timeout_secs = 10;
    cfg
}

/// Connected and migrated pool, or `None` when DB tests should be skipped.
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let ready = *MIGRATED
        .get_or_init(|| async {
            match connect_with_config(&test_config()).await {
                Ok(db) => match migrate(&db).await {
                    Ok(()) => true,
                    Err(e) => {
                        eprintln!("skip: migrate up failed: {e}");
                        false
                    }
                },
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {e}");
                    false
                }
            }
        })
        .await;
    if !ready {
        return None;
    }
    // fresh pool for the current test's runtime
    connect_with_config(&test_config()).await.ok()
}

pub fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}
