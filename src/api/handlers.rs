use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info};

use crate::{
    api::models::*,
    backend::{BackendClient, SearchUpload},
    Error, Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub settings: crate::config::Settings,
}

/// POST /api/search - Relay an upload to the recommendation backend
pub async fn search_recipes(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Response> {
    let multipart = multipart.map_err(|e| Error::Validation(e.body_text()))?;
    let upload = SearchUpload::from_multipart(multipart, &state.settings.upload).await?;
    debug!(
        "Search request (image: {}, description: {}, num_recipes: {:?})",
        upload.has_image(),
        upload.description.is_some(),
        upload.num_recipes
    );

    let reply = state.backend.forward(upload).await?;
    info!("Backend answered {} ({} bytes)", reply.status, reply.body.len());

    Ok((
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response())
}

/// Any method other than POST on /api/search
pub async fn method_not_allowed() -> Error {
    Error::MethodNotAllowed
}

/// Rejections from the rate and body limit layers come back as plain text.
/// Fold them into the generic JSON error so /api only answers 405 or 500.
pub async fn collapse_layer_rejections(response: Response) -> Response {
    match response.status() {
        StatusCode::PAYLOAD_TOO_LARGE => {
            Error::UploadTooLarge("request body exceeds limit".to_string()).into_response()
        }
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimited.into_response(),
        _ => response,
    }
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    let backend_healthy = state.backend.probe().await;

    Ok(Json(ReadinessResponse {
        ready: backend_healthy,
        backend: if backend_healthy { "ok" } else { "error" }.to_string(),
    }))
}
