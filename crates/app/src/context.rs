//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, TokenSigner},
    database::{self, DatabaseHealth, Db},
    domain::{
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] MigrateError),
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseOptions {
    pub url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,
    pub database: Arc<dyn DatabaseHealth>,
}

impl AppContext {
    /// Build application context from database settings and the token signer.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails, or
    /// when requested migrations cannot be applied.
    pub async fn from_database(
        options: &DatabaseOptions,
        signer: TokenSigner,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(&options.url, options.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if options.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        Ok(Self::from_db(Db::new(pool), signer))
    }

    #[must_use]
    pub fn from_db(db: Db, signer: TokenSigner) -> Self {
        Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(db.clone(), signer)),
            database: Arc::new(db),
        }
    }
}
