//! Database connection management

use async_trait::async_trait;
use mockall::automock;
use sqlx::{
    PgPool, Postgres, Transaction,
    migrate::{MigrateError, Migrator},
    postgres::PgPoolOptions,
    query_scalar,
};

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

const PING_SQL: &str = "SELECT 1";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction. It rolls back when dropped without a commit.
    ///
    /// # Errors
    ///
    /// Returns an error when no connection can be acquired.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}

#[async_trait]
impl DatabaseHealth for Db {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        query_scalar::<_, i32>(PING_SQL)
            .fetch_one(&self.pool)
            .await
            .map(|_one| ())
    }
}

/// Storage reachability check used by the health endpoint.
#[automock]
#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    /// Run a trivial query against the database.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Apply any pending migrations.
///
/// # Errors
///
/// Returns an error if a migration fails or the history is inconsistent.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
