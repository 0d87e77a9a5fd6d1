use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;

use crate::application::{RouteError, RouteSignalUseCase};
use crate::infrastructure::parse_payload;
use crate::presentation::rest::{dto::*, ApiError};

use super::AppState;

/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Root is working",
    })
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "alive" })
}

/// GET /ping
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse { pong: true })
}

/// POST /pine-entry
///
/// Takes the body as raw bytes: the upstream platform sometimes ships
/// double-encoded JSON that a typed extractor would reject outright.
pub async fn webhook(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<WebhookResponse>, ApiError> {
    let document = parse_payload(&body)?;

    let use_case = RouteSignalUseCase::new(
        state.routes.clone(),
        Arc::clone(&state.forwarder),
        Arc::clone(&state.hub),
    );

    let outcome = use_case.execute(document).await.map_err(|e| {
        if matches!(e, RouteError::Forward(_)) {
            tracing::error!(error = %e, "downstream forward failed");
        }
        ApiError::from(e)
    })?;

    Ok(Json(WebhookResponse::from(outcome)))
}
