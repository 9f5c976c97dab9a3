//! HTTP front end for the OpenAPI converter.
//!
//! Exposes a single conversion endpoint plus health probes. The service is
//! stateless: every request carries the spec text and its options, and the
//! response is the rendered configuration.

mod types;

pub use types::{ConvertRequest, ConvertRequestOptions, OutputFormat};

use axum::{
    extract::Json,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use omcp_core::ConvertOptions;
use omcp_openapi::{Converter, SpecLoader};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Build the service router.
pub fn create_router() -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health_check))
        .route("/readiness", get(readiness_check))
        // API endpoints
        .route("/api/v1/convert", post(convert))
        // Middleware layers (applied in reverse order)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
}

/// Health check endpoint - returns OK if the service is running
async fn health_check() -> impl IntoResponse {
    tracing::debug!("Health check requested");
    (StatusCode::OK, "OK")
}

/// Readiness check endpoint - the service has no external dependencies
async fn readiness_check() -> impl IntoResponse {
    tracing::debug!("Readiness check requested");
    (StatusCode::OK, "READY")
}

async fn convert(Json(request): Json<ConvertRequest>) -> Result<Response, AppError> {
    if request.spec.trim().is_empty() {
        return Err(AppError::bad_request("spec must not be empty"));
    }

    let loader = SpecLoader::from_str(&request.spec)
        .map_err(|e| AppError::bad_request(format!("failed to parse OpenAPI spec: {e}")))?;

    if request.options.validate {
        loader
            .validate()
            .map_err(|e| AppError::bad_request(e.to_string()))?;
    }

    let options = ConvertOptions {
        server_name: request.options.server_name,
        tool_name_prefix: request.options.tool_name_prefix,
        server_config: request.options.server_config,
        template: request.options.template,
        response_template: request.options.response_template,
    };

    let config = Converter::new(loader, options).convert()?;

    match request.format {
        OutputFormat::Json => Ok(Json(config).into_response()),
        OutputFormat::Yaml => {
            let yaml = config.to_yaml().map_err(anyhow::Error::from)?;
            Ok(([(header::CONTENT_TYPE, "application/yaml")], yaml).into_response())
        }
    }
}

// Error handling
enum AppError {
    BadRequest(String),
    Internal(anyhow::Error),
}

impl AppError {
    fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }
}

impl From<omcp_openapi::OpenApiError> for AppError {
    fn from(err: omcp_openapi::OpenApiError) -> Self {
        AppError::Internal(err.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };
        let json = serde_json::json!({
            "error": message
        });
        (status, Json(json)).into_response()
    }
}
