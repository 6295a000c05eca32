//! Test context for service-level integration tests.

use crate::{
    auth::{DEFAULT_TOKEN_TTL, PgAdminUsersService, PgAuthService, TokenSigner},
    database::Db,
    domain::{orders::PgOrdersService, products::PgProductsService},
};

use super::db::TestDb;

pub(crate) const TEST_SECRET_KEY: &[u8] = b"wisteria-test-secret-key";

pub(crate) struct TestContext {
    pub db: TestDb,
    pub products: PgProductsService,
    pub orders: PgOrdersService,
    pub auth: PgAuthService,
    pub admins: PgAdminUsersService,
    pub signer: TokenSigner,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let signer = TokenSigner::new(TEST_SECRET_KEY, DEFAULT_TOKEN_TTL)
            .expect("Failed to build test token signer");

        Self {
            products: PgProductsService::new(db.clone()),
            orders: PgOrdersService::new(db.clone()),
            auth: PgAuthService::new(db.clone(), signer.clone()),
            admins: PgAdminUsersService::new(db),
            signer,
            db: test_db,
        }
    }
}
