//! Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    /// `ok` or `error`
    pub status: String,

    /// `connected` or `unreachable`
    pub database: String,
}

impl HealthResponse {
    fn new(status: &str, database: &str) -> Self {
        Self {
            status: status.to_owned(),
            database: database.to_owned(),
        }
    }
}

/// Healthcheck handler
///
/// Reports whether the database answers a trivial query.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Service and database are up"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unreachable"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    match state.app.database.ping().await {
        Ok(()) => Ok(Json(HealthResponse::new("ok", "connected"))),
        Err(source) => {
            warn!("database ping failed: {source}");

            res.status_code(StatusCode::SERVICE_UNAVAILABLE);

            Ok(Json(HealthResponse::new("error", "unreachable")))
        }
    }
}
