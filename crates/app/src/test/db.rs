//! Database test utilities and shared infrastructure

use std::sync::atomic::{AtomicU64, Ordering};

use sqlx::{Connection, PgConnection, PgPool, postgres::PgPoolOptions, query};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::OnceCell;

use crate::database::MIGRATOR;

const USER: &str = "wisteria_test";
const PASSWORD: &str = "wisteria_test_password";
const MAINTENANCE_DATABASE: &str = "postgres";

/// Shared PostgreSQL container that starts once and is reused across all tests
static POSTGRES_CONTAINER: OnceCell<ContainerAsync<PostgresImage>> = OnceCell::const_new();

static NEXT_DATABASE: AtomicU64 = AtomicU64::new(0);

async fn init_postgres_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(USER)
        .with_password(PASSWORD)
        .with_db_name(USER)
        .with_tag("17-alpine")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

async fn database_url(database: &str) -> String {
    let container = POSTGRES_CONTAINER
        .get_or_init(init_postgres_container)
        .await;

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get container port");

    let host = std::env::var("TESTCONTAINERS_HOST_OVERRIDE")
        .unwrap_or_else(|_| "localhost".to_string());

    format!("postgresql://{USER}:{PASSWORD}@{host}:{port}/{database}")
}

/// A freshly migrated database of its own inside the shared container.
///
/// Services commit normally, so isolation comes from every test owning a
/// whole database rather than from rolling back. Databases live as long as
/// the container, which is discarded once the test binary exits.
#[derive(Debug, Clone)]
pub(crate) struct TestDb {
    pool: PgPool,
    pub name: String,
}

impl TestDb {
    pub(crate) async fn new() -> Self {
        let name = format!(
            "wisteria_test_{}_{}",
            std::process::id(),
            NEXT_DATABASE.fetch_add(1, Ordering::Relaxed)
        );

        let mut admin = PgConnection::connect(&database_url(MAINTENANCE_DATABASE).await)
            .await
            .expect("Failed to connect to maintenance database");

        query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut admin)
            .await
            .expect("Failed to create test database");

        admin
            .close()
            .await
            .expect("Failed to close maintenance connection");

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&database_url(&name).await)
            .await
            .expect("Failed to create pool for test database");

        MIGRATOR
            .run(&pool)
            .await
            .expect("Failed to run migrations on test database");

        Self { pool, name }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use sqlx::query_scalar;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn migrations_create_schema() -> TestResult {
        let test_db = TestDb::new().await;

        let tables: Vec<String> = query_scalar(
            "SELECT table_name::text FROM information_schema.tables \
             WHERE table_schema = 'public' AND table_name <> '_sqlx_migrations' \
             ORDER BY table_name",
        )
        .fetch_all(test_db.pool())
        .await?;

        assert_eq!(tables, vec!["admin_users", "order_items", "orders", "products"]);

        Ok(())
    }

    #[tokio::test]
    async fn each_test_gets_its_own_database() -> TestResult {
        let first = TestDb::new().await;
        let second = TestDb::new().await;

        assert_ne!(first.name, second.name);

        query("CREATE TABLE scratch (id INTEGER)")
            .execute(first.pool())
            .await?;

        let result = query("SELECT COUNT(*) FROM scratch")
            .execute(second.pool())
            .await;

        assert!(result.is_err());

        Ok(())
    }
}
