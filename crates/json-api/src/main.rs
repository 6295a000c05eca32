//! Wisteria JSON API Server

use std::{process, time::Duration};

use salvo::{
    affix_state::inject,
    catcher::Catcher,
    cors::Cors,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use thiserror::Error;
use tracing::{error, info};

use wisteria_app::{
    auth::{TokenError, TokenSigner},
    context::{AppContext, AppInitError},
};

use crate::{
    auth::LoginRateLimit, config::ServerConfig, observability::Observability, state::State,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod config;
mod errors;
mod extensions;
mod healthcheck;
mod observability;
mod orders;
mod products;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// How often fully replenished login rate limit entries are dropped.
const LOGIN_LIMIT_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
enum StartupError {
    #[error("invalid token signing key: {0}")]
    Signer(#[source] TokenError),

    #[error("failed to initialize app context: {0}")]
    App(#[source] AppInitError),
}

/// Wisteria JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = match Observability::init(&config) {
        Ok(observability) => observability,
        Err(init_error) => {
            #[expect(
                clippy::print_stderr,
                reason = "the subscriber failed to install, so tracing output goes nowhere"
            )]
            {
                eprintln!("Observability error: {init_error}");
            }

            process::exit(1);
        }
    };

    let outcome = run(&config).await;

    if let Err(startup_error) = &outcome {
        error!("{startup_error}");
    }

    observability.shutdown();

    if outcome.is_err() {
        process::exit(1);
    }
}

async fn run(config: &ServerConfig) -> Result<(), StartupError> {
    let signer = TokenSigner::new(config.auth.secret_key.as_bytes(), config.auth.token_ttl())
        .map_err(StartupError::Signer)?;

    let app = AppContext::from_database(&config.database.options(), signer)
        .await
        .map_err(StartupError::App)?;

    let addr = config.socket_addr();

    info!(%addr, prefix = config.server.api_prefix(), "starting server");

    let listener = TcpListener::new(addr).bind().await;

    let login_limit = LoginRateLimit::per_minute(config.auth.login_attempts_per_minute);

    tokio::spawn(login_limit.clone().prune_every(LOGIN_LIMIT_PRUNE_INTERVAL));

    let api =
        Router::with_path(config.server.api_prefix()).push(router::api_router(login_limit));

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(Observability::request_logging(config))
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(api)
        .push(Router::with_path("metrics").get(observability::metrics_handler));

    let doc = OpenApi::new("Wisteria API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let cors = Cors::new()
        .allow_origin(config.server.frontend_url.as_str())
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(vec![AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true)
        .into_handler();

    let service = Service::new(router)
        .catcher(Catcher::default().hoop(cors.clone()))
        .hoop(cors);

    let server = Server::new(listener);
    let handle = server.handle();
    let grace = config.server.shutdown_grace();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace, shutdown::wait()).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(service).await;

    info!("server stopped");

    Ok(())
}
