//! Request/response types for the conversion service.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Body of `POST /api/v1/convert`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertRequest {
    /// Inline OpenAPI specification text, JSON or YAML.
    pub spec: String,
    #[serde(default)]
    pub options: ConvertRequestOptions,
    #[serde(default)]
    pub format: OutputFormat,
}

/// Conversion options accepted over the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConvertRequestOptions {
    #[serde(default)]
    pub server_name: String,
    #[serde(default)]
    pub tool_name_prefix: String,
    #[serde(default)]
    pub server_config: BTreeMap<String, Value>,
    /// Literal preamble for generated response documentation.
    #[serde(default)]
    pub response_template: Option<String>,
    /// Inline overlay template, YAML.
    #[serde(default)]
    pub template: Option<String>,
    /// Run structural validation before converting.
    #[serde(default)]
    pub validate: bool,
}

/// Encoding of the returned configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}
