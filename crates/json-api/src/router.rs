//! API Router

use salvo::Router;

use crate::{
    auth::{self, LoginRateLimit},
    healthcheck, orders, products,
};

/// Every API route, relative to the configured prefix.
pub(crate) fn api_router(login_limit: LoginRateLimit) -> Router {
    Router::new()
        .push(Router::with_path("health").get(healthcheck::handler))
        .push(
            Router::with_path("products")
                .get(products::handlers::catalog::handler)
                .push(Router::with_path("{slug}").get(products::handlers::show::handler)),
        )
        .push(
            Router::with_path("auth/login")
                .hoop(login_limit)
                .post(auth::login::handler),
        )
        .push(admin_router())
}

fn admin_router() -> Router {
    Router::with_path("admin")
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("products")
                .get(products::handlers::index::handler)
                .post(products::handlers::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(products::handlers::get::handler)
                        .put(products::handlers::update::handler)
                        .delete(products::handlers::delete::handler),
                ),
        )
        .push(Router::with_path("orders/{id}").get(orders::handlers::get::handler))
}
