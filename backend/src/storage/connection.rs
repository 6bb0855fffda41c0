use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// File name of the todo database inside the data directory
pub const DATABASE_FILE: &str = "todos.db";

/// DbConnection manages the SQLite pool backing the local store
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection from explicit connect options
    pub async fn new(options: SqliteConnectOptions) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .context("Failed to connect to the todo database")?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Open (creating if needed) the database file inside `data_dir`
    pub async fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

        let db_path = data_dir.join(DATABASE_FILE);
        info!("Opening todo database at {}", db_path.display());

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);
        Self::new(options).await
    }

    /// Initialize an in-memory database private to one test
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        use std::str::FromStr;

        // Every `:memory:` options value names its own shared-cache database,
        // so all pooled connections see the same data.
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        Self::new(options).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS TodoEntity (
                id INTEGER NOT NULL UNIQUE,
                todoTitle TEXT,
                body TEXT,
                completed BOOLEAN NOT NULL DEFAULT FALSE,
                date DATETIME
            );
            "#,
        )
        .execute(pool)
        .await
        .context("Failed to create TodoEntity table")?;

        // Lists are always read newest first
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_todo_entity_date
            ON TodoEntity(date DESC);
            "#,
        )
        .execute(pool)
        .await
        .context("Failed to create TodoEntity date index")?;

        Ok(())
    }
}
