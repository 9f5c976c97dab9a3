//! Error types for OpenAPI conversion.

use thiserror::Error;

/// Result type for OpenAPI operations.
pub type Result<T> = std::result::Result<T, OpenApiError>;

/// Errors that can occur while loading a spec or converting it.
#[derive(Error, Debug)]
pub enum OpenApiError {
    /// OpenAPI spec parsing error
    #[error("Failed to parse OpenAPI spec: {0}")]
    Parse(String),

    /// Invalid OpenAPI specification
    #[error("Invalid OpenAPI spec: {0}")]
    InvalidSpec(String),

    /// The document declares no operations at all
    #[error("OpenAPI document contains no operations")]
    NoOperations,

    /// Overlay template parsing error; fatal for the whole conversion
    #[error("Failed to parse config template: {0}")]
    Template(#[source] omcp_core::ConfigError),

    /// Conversion of a single operation failed
    #[error("Failed to convert operation {method} {path}: {source}")]
    Operation {
        method: String,
        path: String,
        #[source]
        source: Box<OpenApiError>,
    },

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
