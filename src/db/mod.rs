//! Document store module.
//!
//! Recipes live as JSON documents in a single SQLite table. The connection pool is
//! established lazily on first use and can be torn down and re-established.

mod query;
mod repository;

pub use query::*;
pub use repository::*;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tokio::sync::RwLock;

use crate::errors::AppError;

/// Owns the lifecycle of the connection to the document store.
///
/// The first caller of [`RecordStore::get_or_init`] connects, pings and migrates.
/// Later callers reuse the published pool without re-verifying it. A failed
/// attempt leaves nothing behind, so the next call tries again.
pub struct RecordStore {
    db_path: PathBuf,
    pool: RwLock<Option<SqlitePool>>,
}

impl RecordStore {
    /// Create a store handle. No connection is made until first use.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            pool: RwLock::new(None),
        }
    }

    /// Connect eagerly.
    pub async fn init(&self) -> Result<(), AppError> {
        self.get_or_init().await.map(|_| ())
    }

    /// Return the established pool, connecting first if necessary.
    pub async fn get_or_init(&self) -> Result<SqlitePool, AppError> {
        if let Some(pool) = self.pool.read().await.as_ref() {
            return Ok(pool.clone());
        }

        // Concurrent first calls may each connect; the first one published wins.
        tracing::info!("Document store not connected, connecting now...");
        let fresh = connect(&self.db_path).await.map_err(|e| {
            tracing::error!(
                "Failed to connect to document store at {:?}: {}",
                self.db_path,
                e
            );
            AppError::from(e)
        })?;

        let mut slot = self.pool.write().await;
        if let Some(existing) = slot.as_ref() {
            let existing = existing.clone();
            drop(slot);
            fresh.close().await;
            return Ok(existing);
        }
        *slot = Some(fresh.clone());
        tracing::info!("Connected to document store at {:?}", self.db_path);
        Ok(fresh)
    }

    /// Whether a pool is currently held.
    #[cfg(test)]
    pub async fn is_connected(&self) -> bool {
        self.pool.read().await.is_some()
    }

    /// Close and forget the pool. A no-op when nothing is connected.
    pub async fn shutdown(&self) {
        let pool = self.pool.write().await.take();
        if let Some(pool) = pool {
            pool.close().await;
            tracing::info!("Document store connection closed");
        }
    }
}

/// Open the pool, verify it with a ping and run migrations.
async fn connect(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    if let Err(e) = ping(&pool).await {
        pool.close().await;
        return Err(e);
    }

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Liveness check.
async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recipes (
            id TEXT PRIMARY KEY,
            doc TEXT NOT NULL CHECK (json_valid(doc)),
            name_folded TEXT NOT NULL,
            cuisine_folded TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
