//! Liveness probe.

use salvo::prelude::*;
use serde::{Deserialize, Serialize};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct HealthResponse {
    pub status: String,
}

/// Always `{"status":"OK"}`; the database is not consulted.
#[handler]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
    })
}
