//! SQLite persistence layer for Keeper.
//!
//! This crate owns the storage substrate: six per-user tables (message log,
//! credentials, passwords, notes, emails, links) behind async operations
//! built on SQLx. Every operation takes `user_id` first and no query ever
//! runs unscoped — cross-user leakage is impossible by construction.
//!
//! # Example
//!
//! ```no_run
//! use database::{note, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:keeper.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     note::append_note(db.pool(), "user-1", "remember the milk").await?;
//!
//!     Ok(())
//! }
//! ```

pub mod credential;
pub mod email;
pub mod error;
pub mod link;
pub mod message;
pub mod models;
pub mod note;
pub mod password;
pub mod search;
pub mod summary;
pub mod validation;

pub use error::{Result, StoreError};
pub use models::{
    CategorySummary, Credential, Email, Link, Note, Password, SearchHit, StoredMessage,
};
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size. One user's writes serialize above this layer, but
    /// reads and unrelated users' writes run concurrently.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist, or
    /// `sqlite::memory:` for an in-memory database (testing).
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// Call once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Fresh migrated in-memory database for unit tests.
#[cfg(test)]
pub(crate) async fn test_db() -> Database {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    db.migrate().await.unwrap();
    db
}
