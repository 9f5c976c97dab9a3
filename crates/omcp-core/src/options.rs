//! Conversion options.

use serde_json::Value;
use std::collections::BTreeMap;

/// Server name used when the caller does not supply one.
pub const DEFAULT_SERVER_NAME: &str = "openapi-server";

/// Options for a single conversion run.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Name of the generated MCP server; defaults to [`DEFAULT_SERVER_NAME`].
    pub server_name: String,
    /// Prefix prepended to every generated tool name.
    pub tool_name_prefix: String,
    /// Initial server config map, passed through to the output.
    pub server_config: BTreeMap<String, Value>,
    /// Raw YAML overlay template, applied after generation. Unparseable
    /// overlay text fails the whole conversion.
    pub template: Option<String>,
    /// Literal preamble for generated response documentation. When absent,
    /// the default template file is consulted, then a built-in header.
    pub response_template: Option<String>,
}
