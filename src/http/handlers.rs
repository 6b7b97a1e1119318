//! Request handlers.

use std::time::Instant;

use axum::{
    body::Body,
    extract::{Query, RawQuery, State},
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactError;
use crate::error::ApiError;
use crate::generator::{GenerationOutcome, GenerationRequest};
use crate::http::request::request_id_of;
use crate::http::server::AppState;
use crate::mock::{Credential, PayloadTemplate};
use crate::observability::metrics;

/// Body returned by `GET /generate_api`.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub message: String,
    pub file_name: String,
    pub download_link: Option<String>,
    pub connection: String,
    pub auth_required: bool,
    pub specforge_api_key: Credential,
    pub example_data: PayloadTemplate,
    pub endpoint_example: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_error: Option<String>,
}

impl From<GenerationOutcome> for GenerationResponse {
    fn from(outcome: GenerationOutcome) -> Self {
        let message = if outcome.artifact_error.is_some() {
            "Live endpoints added, but the API file could not be written."
        } else {
            "API file generated successfully! Live endpoints added."
        };
        Self {
            message: message.to_string(),
            file_name: outcome.file_name,
            download_link: outcome.download_link,
            connection: outcome.connection,
            auth_required: outcome.auth_required,
            specforge_api_key: outcome.credential,
            example_data: outcome.example_data,
            endpoint_example: outcome.routes.forward,
            artifact_error: outcome.artifact_error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub live_routes: usize,
}

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub file: Option<String>,
}

/// `GET /generate_api`
pub async fn generate_api(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<GenerationResponse>, ApiError> {
    let request = GenerationRequest::from_query(query.as_deref().unwrap_or_default())?;
    tracing::debug!(app1 = %request.app1, app2 = %request.app2, "Generation requested");

    let outcome = state.forge.generate(request).await?;
    Ok(Json(outcome.into()))
}

/// `GET /download_api?file=<name>`
pub async fn download_api(
    State(state): State<AppState>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, ApiError> {
    let name = params
        .file
        .filter(|f| !f.is_empty())
        .ok_or_else(|| ApiError::Validation("Missing required query parameter 'file'".to_string()))?;

    match state.forge.artifacts().read(&name).await {
        Ok(bytes) => {
            metrics::record_download(200);
            tracing::info!(file = %name, bytes = bytes.len(), "Artifact downloaded");
            Ok((
                [
                    (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", name.replace('"', "")),
                    ),
                ],
                bytes,
            )
                .into_response())
        }
        Err(ArtifactError::NotFound(_)) | Err(ArtifactError::InvalidName(_)) => {
            metrics::record_download(404);
            tracing::debug!(file = %name, "Artifact not found");
            Err(ApiError::NotFound("File not found".to_string()))
        }
        Err(e) => {
            metrics::record_download(500);
            tracing::error!(file = %name, error = %e, "Artifact read failed");
            Err(ApiError::Internal("Failed to read file".to_string()))
        }
    }
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "operational",
        version: env!("CARGO_PKG_VERSION"),
        live_routes: state.live.len(),
    })
}

/// Fallback: serve any path installed by a generation.
pub async fn dispatch_live(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request_id_of(&request);
    let raw_path = request.uri().path();
    let path = urlencoding::decode(raw_path)
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| raw_path.to_string());

    let response = match state.live.dispatch(request.method(), &path, request.headers()) {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };

    let status = response.status();
    if status != StatusCode::NOT_FOUND {
        metrics::record_mock_request(&path, status.as_u16(), start);
    }
    tracing::debug!(
        request_id = %request_id,
        method = %request.method(),
        path = %path,
        status = status.as_u16(),
        "Live mock request"
    );
    response
}
