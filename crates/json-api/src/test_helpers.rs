//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use wisteria_app::{
    auth::{AdminUser, AdminUserUuid, MockAuthService},
    context::AppContext,
    database::MockDatabaseHealth,
    domain::{
        orders::MockOrdersService,
        products::{MockProductsService, Product, ProductCategory, ProductCondition, ProductUuid},
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_ADMIN_UUID: AdminUserUuid = AdminUserUuid::from_uuid(Uuid::nil());

pub(crate) fn test_admin() -> AdminUser {
    AdminUser {
        uuid: TEST_ADMIN_UUID,
        email: "admin@wisteria.com".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid, slug: &str) -> Product {
    Product {
        uuid,
        name: "Rem 1/7 Scale Figure".to_string(),
        slug: slug.to_string(),
        description: "Crystal dress version.".to_string(),
        price_cents: 5000,
        condition: ProductCondition::New,
        category: ProductCategory::ScaleFigure,
        image_url: "https://example.com/rem.jpg".to_string(),
        is_available: true,
        quantity: 2,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

#[salvo::handler]
async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_admin_user(test_admin());
    ctrl.call_next(req, depot, res).await;
}

/// Mock-backed application services. Any mock left at its default rejects
/// every call, so a handler touching the wrong service fails the test.
#[derive(Default)]
pub(crate) struct TestApp {
    products: MockProductsService,
    orders: MockOrdersService,
    auth: MockAuthService,
    database: MockDatabaseHealth,
}

impl TestApp {
    pub(crate) fn with_products(mut self, products: MockProductsService) -> Self {
        self.products = products;
        self
    }

    pub(crate) fn with_orders(mut self, orders: MockOrdersService) -> Self {
        self.orders = orders;
        self
    }

    pub(crate) fn with_auth(mut self, auth: MockAuthService) -> Self {
        self.auth = auth;
        self
    }

    pub(crate) fn with_database(mut self, database: MockDatabaseHealth) -> Self {
        self.database = database;
        self
    }

    fn state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            products: Arc::new(self.products),
            orders: Arc::new(self.orders),
            auth: Arc::new(self.auth),
            database: Arc::new(self.database),
        })
    }

    /// Serve `route` with the mocks injected and no authentication.
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.state())).push(route))
    }

    /// Serve `route` as though the auth gate had already admitted an admin.
    pub(crate) fn admin_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.state()))
                .hoop(inject_admin)
                .push(route),
        )
    }
}
